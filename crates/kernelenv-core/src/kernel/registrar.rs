//! KernelRegistrar: derive, read, install and delete the kernel of a
//! virtual environment.
//!
//! Each call is one synchronous request against the filesystem; the JSON file
//! is the only state.

use std::path::{Path, PathBuf};

use super::location;
use super::spec::{EnvironmentRoot, KernelSpec, SYSTEM_INTERPRETER};
use crate::config::KernelEnvConfig;
use crate::error::{KernelError, Result};

/// Result of looking a kernel up.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found { spec: KernelSpec, path: PathBuf },
    NotFound { path: PathBuf },
}

/// Result of an install attempt. `Conflict` means nothing was written.
#[derive(Debug, Clone, PartialEq)]
pub enum Installation {
    Installed { spec: KernelSpec, path: PathBuf },
    Conflict { spec: KernelSpec, path: PathBuf },
}

/// Result of a delete attempt. `Deleted` carries the record as it was on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    Deleted { spec: KernelSpec, path: PathBuf },
    NotFound { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct KernelRegistrar {
    data_dir: PathBuf,
    environment: Option<EnvironmentRoot>,
}

impl KernelRegistrar {
    pub fn new(data_dir: impl Into<PathBuf>, environment: Option<EnvironmentRoot>) -> Self {
        Self {
            data_dir: data_dir.into(),
            environment,
        }
    }

    pub fn from_config(cfg: &KernelEnvConfig) -> Result<Self> {
        let data_dir = cfg.data_dir.clone().ok_or(KernelError::NoDataDir)?;
        Ok(Self::new(data_dir, cfg.env_root.clone().map(EnvironmentRoot::new)))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `supplied` when non-empty, else the environment's directory name.
    pub fn display_name(&self, supplied: &str) -> Result<String> {
        if !supplied.is_empty() {
            return Ok(supplied.to_string());
        }
        self.environment
            .as_ref()
            .and_then(EnvironmentRoot::name)
            .ok_or(KernelError::NoEnvironment)
    }

    pub fn locate(&self, display_name: &str) -> PathBuf {
        location::kernel_path(&self.data_dir, display_name)
    }

    pub fn read(&self, name: &str) -> Result<Lookup> {
        let display_name = self.display_name(name)?;
        let path = self.locate(&display_name);
        let Some(raw) = kernelenv_fs::read_if_exists(&path).map_err(KernelError::io(&path))? else {
            tracing::debug!(path = %path.display(), "no kernel file");
            return Ok(Lookup::NotFound { path });
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(document) => Ok(Lookup::Found {
                spec: KernelSpec::from_document(document),
                path,
            }),
            Err(source) => Err(KernelError::CorruptData { path, source }),
        }
    }

    /// Record `install` would write for `name`.
    pub fn build_spec(&self, display_name: &str, extra_path: Option<&Path>) -> KernelSpec {
        let executable = match &self.environment {
            Some(env) => env.executable(),
            None => PathBuf::from(SYSTEM_INTERPRETER),
        };
        KernelSpec::for_interpreter(display_name, &executable, extra_path)
    }

    /// Create the kernel file. Never overwrites an existing one.
    pub fn install(&self, name: &str, extra_path: Option<&Path>) -> Result<Installation> {
        let display_name = self.display_name(name)?;
        let spec = self.build_spec(&display_name, extra_path);
        let path = self.locate(&display_name);

        if !kernelenv_fs::confirm_path_is_safe_to_write(&path).map_err(KernelError::io(&path))? {
            tracing::info!(path = %path.display(), "kernel already exists, not overwriting");
            return Ok(Installation::Conflict { spec, path });
        }

        let written = kernelenv_fs::write_new(&path, spec.to_pretty_json().as_bytes())
            .map_err(KernelError::io(&path))?;
        if !written {
            tracing::warn!(path = %path.display(), "kernel file appeared during install");
            return Ok(Installation::Conflict { spec, path });
        }
        tracing::info!(display_name = %spec.display_name, path = %path.display(), "installed kernel");
        Ok(Installation::Installed { spec, path })
    }

    /// Remove the whole per-kernel directory, returning what was in it.
    pub fn delete(&self, name: &str) -> Result<Removal> {
        match self.read(name)? {
            Lookup::Found { spec, path } => {
                kernelenv_fs::remove_containing_dir(&path).map_err(KernelError::io(&path))?;
                tracing::info!(display_name = %spec.display_name, path = %path.display(), "deleted kernel");
                Ok(Removal::Deleted { spec, path })
            }
            Lookup::NotFound { path } => Ok(Removal::NotFound { path }),
        }
    }
}

/// Free-standing form of the install guard.
pub fn confirm_path_is_safe_to_write(path: &Path) -> Result<bool> {
    kernelenv_fs::confirm_path_is_safe_to_write(path).map_err(KernelError::io(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const NAMES: &[&str] = &[
        "easy",
        "hard/one with spaces",
        "\\o/",
        "¯\\_(ツ)_/¯",
        "\\u041c\\u0430\\u043a\\u0435\\u0434\\u043e\\u043d\\u0438\\u0458\\u0430",
    ];

    fn registrar(tmp: &tempfile::TempDir) -> KernelRegistrar {
        let env = EnvironmentRoot::new(tmp.path().join("venvs").join("env1"));
        KernelRegistrar::new(tmp.path().join("jupyter"), Some(env))
    }

    #[test]
    fn test_display_name_prefers_supplied() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = registrar(&tmp);
        assert_eq!(reg.display_name("pete").unwrap(), "pete");
        assert_eq!(reg.display_name("").unwrap(), "env1");
    }

    #[test]
    fn test_display_name_without_environment() {
        let reg = KernelRegistrar::new("/data", None);
        assert!(matches!(reg.display_name(""), Err(KernelError::NoEnvironment)));
        assert_eq!(reg.display_name("named").unwrap(), "named");
    }

    #[test]
    fn test_from_config_requires_data_dir() {
        let cfg = KernelEnvConfig::default();
        assert!(matches!(KernelRegistrar::from_config(&cfg), Err(KernelError::NoDataDir)));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_env1_scenario() {
        let reg = KernelRegistrar::new("/data", Some(EnvironmentRoot::new("/tmp/env1")));
        let name = reg.display_name("").unwrap();
        assert_eq!(name, "env1");
        assert_eq!(reg.locate(&name), PathBuf::from("/data/kernels/env1/kernel.json"));
        assert_eq!(reg.build_spec(&name, None).argv[0], "/tmp/env1/bin/python");
    }

    #[test]
    fn test_named_kernel_outside_environment_uses_system_python() {
        let reg = KernelRegistrar::new("/data", None);
        assert_eq!(reg.build_spec("x", None).argv[0], SYSTEM_INTERPRETER);
    }

    #[test]
    fn test_install_is_create_only() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = registrar(&tmp);
        for name in NAMES {
            let path = reg.locate(name);
            assert!(confirm_path_is_safe_to_write(&path).unwrap());

            let first = reg.install(name, Some(Path::new("fake_env_path"))).unwrap();
            let Installation::Installed { spec, path: installed_at } = first else {
                panic!("first install of {name} should succeed");
            };
            assert_eq!(installed_at, path);
            assert_eq!(spec.display_name, *name);
            assert!(spec.env["PYTHONPATH"].contains("fake_env_path"));
            assert!(!confirm_path_is_safe_to_write(&path).unwrap());

            let before = fs::read_to_string(&path).unwrap();
            let second = reg.install(name, None).unwrap();
            assert!(matches!(second, Installation::Conflict { .. }), "{name}");
            assert_eq!(fs::read_to_string(&path).unwrap(), before);
        }
    }

    #[test]
    fn test_read_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = registrar(&tmp);
        reg.install("", Some(Path::new("/opt/src"))).unwrap();
        match reg.read("").unwrap() {
            Lookup::Found { spec, path } => {
                assert_eq!(spec.display_name, "env1");
                assert!(spec.env["PYTHONPATH"].contains("/opt/src"));
                assert!(path.starts_with(tmp.path()));
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn test_install_delete_read() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = registrar(&tmp);
        reg.install("", None).unwrap();
        let path = reg.locate("env1");

        let removed = reg.delete("").unwrap();
        assert!(matches!(removed, Removal::Deleted { ref spec, .. } if spec.display_name == "env1"));
        assert!(!path.parent().unwrap().exists());
        assert!(matches!(reg.read("").unwrap(), Lookup::NotFound { .. }));
    }

    #[test]
    fn test_delete_missing_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = registrar(&tmp);
        let removal = reg.delete("ghost").unwrap();
        assert_eq!(removal, Removal::NotFound { path: reg.locate("ghost") });
    }

    #[test]
    fn test_read_corrupt_file() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = registrar(&tmp);
        let path = reg.locate("broken");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        match reg.read("broken") {
            Err(KernelError::CorruptData { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected CorruptData, got {other:?}"),
        }
    }

    #[test]
    fn test_off_schema_kernel_can_be_read_and_deleted() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = registrar(&tmp);
        let path = reg.locate("env1");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"argv":["python"],"display_name":"env1","env":{"OMP_NUM_THREADS":4},"language":"python"}"#,
        )
        .unwrap();

        match reg.read("").unwrap() {
            Lookup::Found { spec, .. } => {
                assert_eq!(spec.display_name, "env1");
                assert!(spec.to_pretty_json().contains("OMP_NUM_THREADS"));
            }
            other => panic!("expected Found, got {other:?}"),
        }
        assert!(matches!(reg.delete("").unwrap(), Removal::Deleted { .. }));
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_read_top_level_array() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = registrar(&tmp);
        let path = reg.locate("env1");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(reg.read("").unwrap(), Lookup::Found { .. }));
        assert!(matches!(reg.delete("").unwrap(), Removal::Deleted { .. }));
    }

    #[test]
    fn test_read_is_usage_error_without_name_or_env() {
        let tmp = tempfile::tempdir().unwrap();
        let reg = KernelRegistrar::new(tmp.path(), None);
        let err = reg.read("").unwrap_err();
        assert!(err.is_usage());
        assert!(fs::read_dir(tmp.path()).unwrap().next().is_none());
    }
}
