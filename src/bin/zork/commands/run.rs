//! `zork run` command

use anyhow::Result;

use crate::cli::RunArgs;
use crate::commands::load_project;
use zork::ops::zork_build::{build, BuildOptions};
use zork::util::diagnostic::{emit, Diagnostic};
use zork::util::SystemRunner;

pub fn execute(args: RunArgs, verbose: bool) -> Result<i32> {
    let project = load_project(args.config.as_deref())?;

    let opts = BuildOptions { verbose, run: true };
    let runner = SystemRunner::new(&project.root);
    let outcome = build(&project.root, &project.model, &opts, &runner)?;

    match outcome.run_exit_code {
        Some(0) => Ok(0),
        Some(code) => {
            emit(
                &Diagnostic::warning(format!(
                    "`{}` exited with code {}",
                    outcome.executable.display(),
                    code
                )),
                false,
            );
            Ok(code)
        }
        None => Ok(outcome.exit_code),
    }
}
