use clap::Parser;
use std::path::PathBuf;

/// Manage the Jupyter kernel for this virtual environment.
///
/// With no flags, installs a kernel for the active virtualenv.
#[derive(Parser, Debug)]
#[command(name = "kernelenv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Name of kernel. Must provide a kernel name or run in a virtual environment.
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Path to add to the start of PYTHONPATH
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Get information about the current kernel
    #[arg(short, long)]
    pub list: bool,

    /// Delete the existing Jupyter kernel
    #[arg(short, long)]
    pub delete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Delete,
    Install,
}

impl Cli {
    /// `--list` wins over `--delete`; neither means install.
    pub fn mode(&self) -> Mode {
        if self.list {
            Mode::List
        } else if self.delete {
            Mode::Delete
        } else {
            Mode::Install
        }
    }
}
