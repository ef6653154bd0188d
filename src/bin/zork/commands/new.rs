//! `zork new` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::NewArgs;
use zork::ops::zork_new::{new_project, NewOptions};

pub fn execute(args: NewArgs) -> Result<i32> {
    let path = args.path.unwrap_or_else(|| PathBuf::from(&args.name));

    let opts = NewOptions {
        name: args.name.clone(),
        modules: !args.no_modules,
    };

    new_project(&path, &opts)?;

    eprintln!("     Created project `{}` at {}", args.name, path.display());

    Ok(0)
}
