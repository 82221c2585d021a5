//! New command implementation
//!
//! Implements `pkgforge new` to scaffold a recipe from a built-in template.

use anyhow::Result;
use std::path::Path;

use crate::cli::output::{println_unless_quiet, status};
use crate::core::templates::{self, TemplateKind};

/// Execute the new command
pub fn execute(parent: &Path, name: &str, template: &str, requires: &[String]) -> Result<()> {
    let kind = TemplateKind::from_name(template)?;
    let result = templates::scaffold(parent, name, kind, requires)?;

    println_unless_quiet(&format!(
        "{} Created '{name}' from the {template} template",
        status::SUCCESS
    ));
    println_unless_quiet(&format!("  Recipe: {}", result.recipe_path.display()));
    Ok(())
}
