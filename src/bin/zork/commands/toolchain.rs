//! `zork toolchain` command

use anyhow::Result;

use crate::cli::ToolchainArgs;
use crate::commands::load_project;
use zork::builder::select_toolchain;
use zork::util::process::find_executable;

pub fn execute(args: ToolchainArgs) -> Result<i32> {
    let project = load_project(args.config.as_deref())?;
    let compiler = &project.model.compiler;

    println!("Compiler: {}", compiler.cpp_compiler);

    let toolchain = select_toolchain(compiler)?;
    let driver = toolchain.driver();
    match find_executable(driver) {
        Some(path) => println!("Driver:   {}", path.display()),
        None => println!("Driver:   {} (not found in PATH)", driver.display()),
    }
    println!(
        "Language: C++{} ({})",
        project.model.language.standard, project.model.language.std_lib
    );
    println!("Modules:  {}", project.model.language.modules.len());

    Ok(0)
}
