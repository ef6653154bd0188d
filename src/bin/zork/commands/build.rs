//! `zork build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use crate::commands::load_project;
use zork::ops::zork_build::{build, plan, BuildOptions};
use zork::util::SystemRunner;

pub fn execute(args: BuildArgs, verbose: bool) -> Result<i32> {
    let project = load_project(args.config.as_deref())?;

    if args.plan {
        let build_plan = plan(&project.model)?;
        tracing::debug!("plan has {} invocation(s)", build_plan.invocation_count());
        println!("{}", build_plan.to_json()?);
        return Ok(0);
    }

    let opts = BuildOptions {
        verbose,
        run: false,
    };
    let runner = SystemRunner::new(&project.root);
    let outcome = build(&project.root, &project.model, &opts, &runner)?;

    if let Some(code) = outcome.run_exit_code {
        tracing::debug!("`{}` exited with code {}", outcome.executable.display(), code);
    }
    Ok(outcome.exit_code)
}
