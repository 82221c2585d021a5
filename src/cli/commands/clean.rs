//! Clean command implementation
//!
//! Implements `pkgforge clean` to remove the build and package folders.

use anyhow::Result;
use std::path::Path;

use super::{load_invocation, InvocationArgs};
use crate::cli::output::{println_unless_quiet, status};

/// Execute the clean command
pub fn execute(recipe_dir: &Path, args: &InvocationArgs) -> Result<()> {
    let invocation = load_invocation(recipe_dir, args)?;

    invocation.clean()?;

    println_unless_quiet(&format!(
        "{} Removed build and package folders for {}",
        status::SUCCESS,
        invocation.recipe().reference()
    ));
    Ok(())
}
