//! Typed configuration, grouped by concern and loaded from the environment.

use super::env_keys::{kernel as kernel_keys, observability as obv_keys};
use super::loader::{env_bool, env_or, env_path};
use std::path::PathBuf;

/// Where kernels live and which environment is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelEnvConfig {
    /// Root of the active virtual environment, if any.
    pub env_root: Option<PathBuf>,
    /// Jupyter data directory; kernels go under `<data_dir>/kernels`.
    /// `None` when neither `JUPYTER_DATA_DIR` nor a platform default exists.
    pub data_dir: Option<PathBuf>,
}

impl KernelEnvConfig {
    pub fn from_env() -> Self {
        let env_root = env_path(kernel_keys::VIRTUAL_ENV);
        let data_dir = env_path(kernel_keys::JUPYTER_DATA_DIR).or_else(default_data_dir);
        let cfg = Self { env_root, data_dir };
        tracing::debug!(?cfg, "loaded kernel config");
        cfg
    }

    pub fn in_virtual_env(&self) -> bool {
        self.env_root.is_some()
    }
}

/// Jupyter's per-user data directory for this platform.
#[cfg(target_os = "macos")]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join("Library").join("Jupyter"))
}

/// Jupyter's per-user data directory for this platform.
#[cfg(not(target_os = "macos"))]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("jupyter"))
}

/// Logging configuration: quiet, log_level, log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self {
            quiet: env_bool(obv_keys::KERNELENV_QUIET, &[], false),
            log_level: env_or(
                obv_keys::KERNELENV_LOG_LEVEL,
                &[],
                || "kernelenv=warn,kernelenv_core=warn,kernelenv_fs=warn".to_string(),
            ),
            log_json: env_bool(obv_keys::KERNELENV_LOG_JSON, &[], false),
        })
    }
}
