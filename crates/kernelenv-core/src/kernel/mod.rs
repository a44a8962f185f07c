//! Jupyter kernel registrations for virtual environments.

pub mod location;
pub mod registrar;
pub mod spec;

pub use location::{kernel_path, safe_name};
pub use registrar::{confirm_path_is_safe_to_write, Installation, KernelRegistrar, Lookup, Removal};
pub use spec::{EnvironmentRoot, KernelSpec};
