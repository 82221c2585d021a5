//! Build command implementation
//!
//! Implements `pkgforge build`: resolve, generate, then configure and
//! compile via the backend build tool.

use anyhow::Result;
use std::path::Path;

use super::{load_invocation, InvocationArgs};
use crate::cli::output::{create_spinner, println_unless_quiet, status};

/// Execute the build command
pub fn execute(recipe_dir: &Path, args: &InvocationArgs) -> Result<()> {
    let invocation = load_invocation(recipe_dir, args)?;
    tracing::info!("Building {}", invocation.recipe().reference());

    let spinner = create_spinner("Resolving requirements");
    let resolved = invocation.resolve()?;
    let generated = invocation.generate(&resolved)?;
    spinner.finish_and_clear();

    invocation.configure(&generated)?;
    invocation.build()?;

    println_unless_quiet(&format!(
        "{} Built {} in {}",
        status::SUCCESS,
        invocation.recipe().reference(),
        invocation.layout().build_folder.display()
    ));
    Ok(())
}
