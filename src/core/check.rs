//! Check logic
//!
//! Validates a recipe and profile, resolves requirements, and reports what a
//! build would do, without writing anything.

use std::path::Path;

use crate::config::defaults;
use crate::core::index::PackageIndex;
use crate::core::lifecycle;
use crate::core::recipe::{self, Recipe};
use crate::core::requirements::RequirementSet;
use crate::core::settings::Profile;

/// Result of the check operation
#[derive(Debug, Default)]
pub struct CheckResult {
    /// Whether the recipe file is valid
    pub recipe_valid: bool,
    /// Whether the profile settings are valid
    pub settings_valid: bool,
    /// Whether every requirement resolved
    pub requirements_valid: bool,
    /// Resolved requirement references (`name/version`)
    pub resolved: Vec<String>,
    /// Errors found
    pub errors: Vec<String>,
    /// Non-fatal warnings
    pub warnings: Vec<String>,
}

impl CheckResult {
    /// Check if all validations passed
    pub fn is_valid(&self) -> bool {
        self.recipe_valid && self.settings_valid && self.requirements_valid
    }
}

/// Perform the check operation on a recipe directory
pub fn check(recipe_dir: &Path, profile: &Profile, index: &PackageIndex) -> CheckResult {
    let mut result = CheckResult {
        recipe_valid: true,
        settings_valid: true,
        requirements_valid: true,
        ..CheckResult::default()
    };

    let recipe_path = recipe_dir.join(defaults::RECIPE_FILE);
    if !recipe_path.exists() {
        result.recipe_valid = false;
        result.errors.push(format!(
            "Recipe not found at '{}'. Run 'pkgforge new' to create one.",
            recipe_path.display()
        ));
        return result;
    }

    if let Err(errors) = recipe::validate_recipe(&recipe_path) {
        result.recipe_valid = false;
        result.errors.extend(errors);
    }

    if let Err(e) = profile.settings.validate() {
        result.settings_valid = false;
        result.errors.push(e.to_string());
    }

    // Resolution only makes sense once the recipe itself parses.
    if result.recipe_valid {
        match Recipe::load(&recipe_path) {
            Ok(loaded) => {
                check_requirements(&loaded, index, &mut result);

                for pattern in &loaded.package.exports {
                    if lifecycle::exported_files(recipe_dir, pattern).is_empty() {
                        result
                            .warnings
                            .push(format!("Export pattern '{pattern}' matches no files"));
                    }
                }
            }
            Err(e) => {
                result.recipe_valid = false;
                result.errors.push(e.to_string());
            }
        }

        if !recipe_dir.join(defaults::LICENSE_FILE).is_file() {
            result.warnings.push(format!(
                "No {} file in the source folder; packaging will fail",
                defaults::LICENSE_FILE
            ));
        }
    }

    if which::which(&profile.conf.cmake_program).is_err() {
        result.warnings.push(format!(
            "Backend tool '{}' not found in PATH",
            profile.conf.cmake_program
        ));
    }

    result
}

fn check_requirements(recipe: &Recipe, index: &PackageIndex, result: &mut CheckResult) {
    let set = match RequirementSet::from_section(&recipe.requirements) {
        Ok(set) => set,
        Err(e) => {
            result.requirements_valid = false;
            result.errors.push(e.to_string());
            return;
        }
    };

    for req in set.iter() {
        match index.resolve(req) {
            Ok(resolved) => result
                .resolved
                .push(format!("{}/{}", resolved.name, resolved.version)),
            Err(e) => {
                result.requirements_valid = false;
                result.errors.push(e.to_string());
            }
        }
    }
}
