use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(kernelenv::run_cli())
}
