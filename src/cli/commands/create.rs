//! Create command implementation
//!
//! Implements `pkgforge create`: the full lifecycle (build, package, test)
//! followed by publication into the package index.

use anyhow::Result;
use std::path::Path;

use super::{load_invocation, InvocationArgs};
use crate::cli::output::{create_spinner, println_unless_quiet, status};

/// Execute the create command
pub fn execute(recipe_dir: &Path, args: &InvocationArgs) -> Result<()> {
    let invocation = load_invocation(recipe_dir, args)?;
    tracing::info!("Creating {}", invocation.recipe().reference());

    let spinner = create_spinner("Resolving requirements");
    let resolved = invocation.resolve()?;
    let generated = invocation.generate(&resolved)?;
    spinner.finish_and_clear();

    invocation.configure(&generated)?;
    invocation.build()?;
    invocation.package()?;
    invocation.test()?;
    let published = invocation.publish()?;

    println_unless_quiet(&format!(
        "{} Created {} and published to {}",
        status::SUCCESS,
        invocation.recipe().reference(),
        published.display()
    ));
    Ok(())
}
