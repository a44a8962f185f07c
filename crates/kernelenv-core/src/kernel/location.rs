//! Display name → `kernel.json` path.
//!
//! The mapping is deterministic but not injective: `a b` and `a/b` both land
//! in `a_b`. The no-clobber guard in `install` makes the first one win.

use std::path::{Path, PathBuf};

pub const KERNELS_DIR: &str = "kernels";
pub const KERNEL_FILE: &str = "kernel.json";

/// Replace every character outside `[A-Za-z0-9]` with `_`.
pub fn safe_name(display_name: &str) -> String {
    display_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `<data_dir>/kernels/<safe_name>/kernel.json`. No I/O.
pub fn kernel_path(data_dir: &Path, display_name: &str) -> PathBuf {
    data_dir
        .join(KERNELS_DIR)
        .join(safe_name(display_name))
        .join(KERNEL_FILE)
}
