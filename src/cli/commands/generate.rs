//! Generate command implementation
//!
//! Implements `pkgforge generate` to resolve requirements and write the
//! toolchain and dependency files without invoking the backend tool.

use anyhow::Result;
use std::path::Path;

use super::{load_invocation, InvocationArgs};
use crate::cli::output::{create_spinner, println_unless_quiet, status};

/// Execute the generate command
pub fn execute(recipe_dir: &Path, args: &InvocationArgs) -> Result<()> {
    let invocation = load_invocation(recipe_dir, args)?;

    let spinner = create_spinner("Resolving requirements");
    let resolved = invocation.resolve()?;
    spinner.set_message("Generating files");
    let generated = invocation.generate(&resolved)?;
    spinner.finish_and_clear();

    println_unless_quiet(&format!(
        "{} Generated {}",
        status::SUCCESS,
        generated.toolchain.display()
    ));
    println_unless_quiet(&format!(
        "{} Generated {}",
        status::SUCCESS,
        generated.deps.display()
    ));
    Ok(())
}
