//! Check command implementation
//!
//! Implements `pkgforge check` to validate the recipe, profile, and
//! requirements without touching the build tree.

use anyhow::{bail, Result};
use std::path::Path;

use super::InvocationArgs;
use crate::cli::output::{json_enabled, println_unless_quiet, status};
use crate::core::check;

/// Execute the check command
pub fn execute(recipe_dir: &Path, args: &InvocationArgs) -> Result<()> {
    // Settings errors are part of the report, so skip load_profile's
    // validation and let check() collect them.
    let mut profile = match &args.profile {
        Some(path) => crate::core::settings::Profile::load(path)?,
        None => crate::core::settings::Profile::host(),
    };
    for input in &args.settings {
        profile.settings.apply_override(input)?;
    }

    let index = args.open_index();
    let result = check::check(recipe_dir, &profile, &index);

    if json_enabled() {
        let report = serde_json::json!({
            "valid": result.is_valid(),
            "recipe_valid": result.recipe_valid,
            "settings_valid": result.settings_valid,
            "requirements_valid": result.requirements_valid,
            "resolved": result.resolved,
            "errors": result.errors,
            "warnings": result.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for warning in &result.warnings {
            println_unless_quiet(&format!("{} {warning}", status::WARNING));
        }
        for error in &result.errors {
            eprintln!("{} {error}", status::ERROR);
        }
        for reference in &result.resolved {
            println_unless_quiet(&format!("{} resolved {reference}", status::INFO));
        }
    }

    if !result.is_valid() {
        bail!("check found {} error(s)", result.errors.len());
    }

    if !json_enabled() {
        println_unless_quiet(&format!("{} Recipe is valid", status::SUCCESS));
    }
    Ok(())
}
