//! `kernel.json` record and the environment it points at.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Placeholder Jupyter substitutes with the real connection file at launch.
pub const CONNECTION_FILE_PLACEHOLDER: &str = "{connection_file}";

pub const KERNEL_LANGUAGE: &str = "python";

/// Variable prepended to by `--path`.
pub const SEARCH_PATH_VAR: &str = "PYTHONPATH";

/// Interpreter used when a name is given outside any virtual environment.
pub const SYSTEM_INTERPRETER: &str = "python3";

#[cfg(windows)]
const SEARCH_PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
const SEARCH_PATH_SEPARATOR: char = ':';

/// Kernel descriptor as Jupyter reads it from `kernel.json`.
///
/// Field names and order are fixed by Jupyter's kernelspec format. Keys a
/// user added by hand survive a read in `extra`; `install` never writes any.
/// A record read from disk also keeps the document it came from, so fields
/// that do not fit the typed shape are echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    #[serde(default)]
    pub argv: Vec<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub language: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    document: Option<Value>,
}

impl KernelSpec {
    /// Build the record `install` writes.
    pub fn for_interpreter(display_name: &str, executable: &Path, extra_path: Option<&Path>) -> Self {
        Self {
            argv: vec![
                executable.to_string_lossy().into_owned(),
                "-m".to_string(),
                "ipykernel".to_string(),
                "-f".to_string(),
                CONNECTION_FILE_PLACEHOLDER.to_string(),
            ],
            display_name: display_name.to_string(),
            env: search_path_env(extra_path),
            language: KERNEL_LANGUAGE.to_string(),
            extra: Map::new(),
            document: None,
        }
    }

    /// Map any JSON document onto the typed fields. A field with the wrong
    /// type is left at its default; the document itself is kept as read.
    pub fn from_document(document: Value) -> Self {
        let mut spec = Self {
            argv: Vec::new(),
            display_name: String::new(),
            env: BTreeMap::new(),
            language: String::new(),
            extra: Map::new(),
            document: None,
        };
        if let Value::Object(map) = &document {
            for (key, value) in map {
                match key.as_str() {
                    "argv" => spec.argv = loose(value),
                    "display_name" => spec.display_name = loose(value),
                    "env" => spec.env = loose(value),
                    "language" => spec.language = loose(value),
                    _ => {
                        spec.extra.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        spec.document = Some(document);
        spec
    }

    pub fn to_pretty_json(&self) -> String {
        // Plain JSON values and string maps cannot fail to serialize.
        match &self.document {
            Some(doc) => serde_json::to_string_pretty(doc).unwrap_or_default(),
            None => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}

fn loose<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

/// `{"PYTHONPATH": "<extra>:PYTHONPATH"}`, or empty when there is no extra path.
fn search_path_env(extra_path: Option<&Path>) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    if let Some(p) = extra_path.filter(|p| !p.as_os_str().is_empty()) {
        env.insert(
            SEARCH_PATH_VAR.to_string(),
            format!("{}{}{}", p.display(), SEARCH_PATH_SEPARATOR, SEARCH_PATH_VAR),
        );
    }
    env
}

/// Root directory of an activated virtual environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRoot {
    root: PathBuf,
}

impl EnvironmentRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Last path component, e.g. `env1` for `/tmp/env1`.
    pub fn name(&self) -> Option<String> {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
    }

    #[cfg(windows)]
    pub fn executable(&self) -> PathBuf {
        self.root.join("Scripts").join("python.exe")
    }

    #[cfg(not(windows))]
    pub fn executable(&self) -> PathBuf {
        self.root.join("bin").join("python")
    }
}
