//! kernelenv CLI library: parses flags, dispatches to the registrar and
//! prints the outcome.
//!
//! Only a missing environment (with no `--name`) changes the exit status.
//! "Not found" and "already exists" are reported as text and exit 0.

pub mod cli;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io::{self, Write};

use cli::{Cli, Mode};
use kernelenv_core::config::KernelEnvConfig;
use kernelenv_core::kernel::{Installation, KernelRegistrar, Lookup, Removal};
use kernelenv_core::KernelError;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Entry point for the `kernelenv` binary. Returns the process exit status.
pub fn run_cli() -> u8 {
    kernelenv_core::observability::init_tracing();
    let cli = Cli::parse();
    let cfg = KernelEnvConfig::from_env();
    let mut stdout = io::stdout().lock();
    run(&cli, &cfg, &mut stdout)
}

/// Run one invocation against an already-loaded config.
pub fn run(cli: &Cli, cfg: &KernelEnvConfig, out: &mut impl Write) -> u8 {
    match execute(cli, cfg, out) {
        Ok(()) => EXIT_OK,
        Err(e) if is_usage_error(&e) => {
            let err = Cli::command().error(clap::error::ErrorKind::MissingRequiredArgument, e);
            let _ = err.print();
            u8::try_from(err.exit_code()).unwrap_or(EXIT_FAILURE)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

fn is_usage_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<KernelError>()
        .is_some_and(KernelError::is_usage)
}

fn execute(cli: &Cli, cfg: &KernelEnvConfig, out: &mut impl Write) -> Result<()> {
    if !cfg.in_virtual_env() && cli.name.is_empty() {
        return Err(KernelError::NoEnvironment.into());
    }
    let registrar = KernelRegistrar::from_config(cfg)?;
    let mode = cli.mode();
    tracing::debug!(?mode, name = %cli.name, data_dir = %registrar.data_dir().display(), "dispatch");

    match mode {
        Mode::List => match registrar.read(&cli.name)? {
            Lookup::Found { spec, path } => {
                writeln!(out, "Found kernel \"{}\" at {}:", spec.display_name, path.display())?;
                writeln!(out, "{}", spec.to_pretty_json())?;
            }
            Lookup::NotFound { path } => {
                writeln!(out, "No kernel found at {}", path.display())?;
            }
        },
        Mode::Delete => match registrar.delete(&cli.name)? {
            Removal::Deleted { spec, path } => {
                writeln!(
                    out,
                    "Deleted jupyter kernel \"{}\" from {}:",
                    spec.display_name,
                    path.display()
                )?;
                writeln!(out, "{}", spec.to_pretty_json())?;
            }
            Removal::NotFound { path } => {
                writeln!(out, "No kernel found to delete (checked {})", path.display())?;
            }
        },
        Mode::Install => {
            let installation = registrar
                .install(&cli.name, cli.path.as_deref())
                .context("Failed to install kernel")?;
            match installation {
                Installation::Installed { spec, path } => {
                    writeln!(
                        out,
                        "Successfully installed a new jupyter kernel \"{}\":",
                        spec.display_name
                    )?;
                    writeln!(out, "{}", spec.to_pretty_json())?;
                    writeln!(out, "See {} to edit.", path.display())?;
                }
                Installation::Conflict { spec, path } => {
                    writeln!(
                        out,
                        "Failed to install a new jupyter kernel \"{}\".",
                        spec.display_name
                    )?;
                    writeln!(
                        out,
                        "See {} to confirm it isn't already there.",
                        path.display()
                    )?;
                }
            }
        }
    }
    Ok(())
}
