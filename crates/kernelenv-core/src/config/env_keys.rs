//! Environment variable keys.
//!
//! Primary keys use the `KERNELENV_*` prefix; the rest are conventions owned
//! by virtualenv and Jupyter.

/// Active environment and kernel storage
pub mod kernel {
    /// Set by `activate` scripts; the only "inside an environment" signal.
    pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";

    /// Jupyter's own override for the data directory.
    pub const JUPYTER_DATA_DIR: &str = "JUPYTER_DATA_DIR";
}

/// Logging
pub mod observability {
    pub const KERNELENV_QUIET: &str = "KERNELENV_QUIET";
    pub const KERNELENV_LOG_LEVEL: &str = "KERNELENV_LOG_LEVEL";
    pub const KERNELENV_LOG_JSON: &str = "KERNELENV_LOG_JSON";
}
