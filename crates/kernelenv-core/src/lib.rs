pub mod config;
pub mod error;
pub mod kernel;
pub mod observability;

pub use error::{KernelError, Result};
