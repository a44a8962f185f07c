use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KernelError>;

#[derive(Debug, Error)]
pub enum KernelError {
    /// No kernel name was given and no virtual environment is active.
    #[error(
        "The environment variable VIRTUAL_ENV is not set (usually this is set automatically \
         by activating a virtualenv). Please make sure you are in a virtual environment!"
    )]
    NoEnvironment,

    #[error(
        "Could not determine the Jupyter data directory; set JUPYTER_DATA_DIR to choose one"
    )]
    NoDataDir,

    #[error("Kernel file {} is not valid JSON: {source}", path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl KernelError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Usage errors abort before any filesystem access.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::NoEnvironment)
    }
}
