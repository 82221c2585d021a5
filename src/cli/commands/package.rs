//! Package command implementation
//!
//! Implements `pkgforge package`: install into the package folder, copy the
//! license into licenses/, and write the published package info.

use anyhow::Result;
use std::path::Path;

use super::{load_invocation, InvocationArgs};
use crate::cli::output::{println_unless_quiet, status};

/// Execute the package command
pub fn execute(recipe_dir: &Path, args: &InvocationArgs) -> Result<()> {
    let invocation = load_invocation(recipe_dir, args)?;

    invocation.package()?;

    println_unless_quiet(&format!(
        "{} Packaged {} into {}",
        status::SUCCESS,
        invocation.recipe().reference(),
        invocation.layout().package_folder.display()
    ));
    Ok(())
}
