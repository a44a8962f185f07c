//! Configuration layer.
//!
//! Every environment variable is read here, once, at the process boundary.
//! The rest of the crate only sees the typed structs from `schema`.
//!
//! - `loader`: env_or, env_path, env_bool
//! - `schema`: KernelEnvConfig, ObservabilityConfig
//! - `env_keys`: key constants

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_or, env_path};
pub use schema::{default_data_dir, KernelEnvConfig, ObservabilityConfig};
