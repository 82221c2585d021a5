//! Recipe (recipe.toml) parsing and validation
//!
//! The recipe is the declarative description of one buildable package:
//! identity, options, requirements, toolchain wiring, and published consumer
//! info. Supports environment variable substitution using ${VAR} syntax.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::defaults;
use crate::core::options::OptionDefaults;
use crate::core::requirements::{Requirement, RequirementKind, RequirementsSection};
use crate::core::version;
use crate::error::RecipeError;

/// Known backend build-tool flavors
pub const KNOWN_GENERATORS: &[&str] = &["Ninja", "Unix Makefiles", "NMake Makefiles", "Xcode"];

/// Known values for the published `cmake_find_mode`
pub const KNOWN_FIND_MODES: &[&str] = &["none", "config", "module", "both"];

/// The package recipe (recipe.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Package identity
    pub package: PackageMeta,

    /// Option defaults declared by the recipe
    #[serde(default)]
    pub options: OptionDefaults,

    /// Requirement declarations
    #[serde(default)]
    pub requirements: RequirementsSection,

    /// Toolchain generation settings
    #[serde(default)]
    pub toolchain: ToolchainSection,

    /// Info published to consumers at package time
    #[serde(default)]
    pub package_info: Option<PackageInfoSection>,

    /// Test hook; a section without a command is an explicit no-op
    #[serde(default)]
    pub test: Option<TestSection>,
}

/// Package identity metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageMeta {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// License identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Project URL
    #[serde(default)]
    pub url: Option<String>,

    /// Exported source path patterns (`*` wildcard)
    #[serde(default)]
    pub exports: Vec<String>,
}

/// Toolchain generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolchainSection {
    /// Backend build-tool flavor
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Variables injected into the toolchain file: variable name to tool
    /// program name, discovered in resolved build requirements
    #[serde(default)]
    pub tool_vars: BTreeMap<String, String>,
}

fn default_generator() -> String {
    defaults::DEFAULT_GENERATOR.to_string()
}

impl Default for ToolchainSection {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            tool_vars: BTreeMap::new(),
        }
    }
}

/// Consumer-facing info published with the package
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageInfoSection {
    /// Downstream config-file generation mode ("none" disables it)
    #[serde(default)]
    pub cmake_find_mode: Option<String>,

    /// Search-path entries appended for consumers
    #[serde(default)]
    pub builddirs: Vec<String>,
}

/// Test hook declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestSection {
    /// Command run in the build folder; absent means no-op
    #[serde(default)]
    pub command: Option<String>,
}

/// Substitute environment variables in a string using ${VAR} syntax.
///
/// Unset variables substitute to the empty string.
pub fn substitute_env_vars(input: &str) -> Result<String, String> {
    let re =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| format!("Invalid regex: {e}"))?;

    let mut last_end = 0;
    let mut output = String::new();

    for cap in re.captures_iter(input) {
        let full_match = cap.get(0).unwrap();
        let var_name = &cap[1];

        output.push_str(&input[last_end..full_match.start()]);

        let value = std::env::var(var_name).unwrap_or_default();
        output.push_str(&value);

        last_end = full_match.end();
    }

    output.push_str(&input[last_end..]);

    Ok(output)
}

/// Substitute environment variables in all string values of a TOML document.
pub fn substitute_env_vars_in_toml(content: &str) -> Result<String, String> {
    let mut value: toml::Value =
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {e}"))?;

    substitute_in_value(&mut value)?;

    toml::to_string_pretty(&value).map_err(|e| format!("Failed to serialize TOML: {e}"))
}

/// Recursively substitute environment variables in a TOML value
fn substitute_in_value(value: &mut toml::Value) -> Result<(), String> {
    match value {
        toml::Value::String(s) => {
            *s = substitute_env_vars(s)?;
        }
        toml::Value::Array(arr) => {
            for item in arr.iter_mut() {
                substitute_in_value(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, v) in table.iter_mut() {
                substitute_in_value(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}

impl Recipe {
    /// Load a recipe from a recipe directory
    pub fn load_dir(recipe_dir: &Path) -> Result<Self, RecipeError> {
        let path = recipe_dir.join(defaults::RECIPE_FILE);
        if !path.exists() {
            return Err(RecipeError::NotFound { path });
        }
        Self::load(&path)
    }

    /// Load a recipe from a file path, substituting ${VAR} patterns
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let content = std::fs::read_to_string(path).map_err(|_| RecipeError::NotFound {
            path: path.to_path_buf(),
        })?;

        let substituted =
            substitute_env_vars_in_toml(&content).map_err(RecipeError::Substitution)?;

        Self::from_toml(&substituted).map_err(|e| RecipeError::Parse { source: e })
    }

    /// Parse a recipe from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize the recipe to a TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The recipe's `name/version` reference
    pub fn reference(&self) -> String {
        format!("{}/{}", self.package.name, self.package.version)
    }
}

/// Validate a recipe file and report all errors, not just the first.
pub fn validate_recipe(path: &Path) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            errors.push(format!("Failed to read recipe file: {e}"));
            return Err(errors);
        }
    };

    let value: toml::Value = match toml::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            errors.push(format!("Invalid TOML syntax: {e}"));
            return Err(errors);
        }
    };

    let Some(package) = value.get("package") else {
        errors.push("Missing required [package] section".to_string());
        return Err(errors);
    };

    match package.get("name").and_then(|v| v.as_str()) {
        None => errors.push("Missing required field 'package.name'".to_string()),
        Some("") => errors.push("Field 'package.name' cannot be empty".to_string()),
        Some(_) => {}
    }

    match package.get("version").and_then(|v| v.as_str()) {
        None => errors.push("Missing required field 'package.version'".to_string()),
        Some(v) => {
            if let Err(e) = version::lenient_version(v) {
                errors.push(e.to_string());
            }
        }
    }

    if let Some(exports) = package.get("exports").and_then(|v| v.as_array()) {
        for entry in exports {
            match entry.as_str() {
                Some("") => errors.push("Export patterns cannot be empty".to_string()),
                Some(_) => {}
                None => errors.push("Export patterns must be strings".to_string()),
            }
        }
    }

    if let Some(options) = value.get("options").and_then(|v| v.as_table()) {
        for key in options.keys() {
            if key != "shared" && key != "fPIC" {
                errors.push(format!(
                    "Unknown option '{key}': must be one of [\"shared\", \"fPIC\"]"
                ));
            }
        }
    }

    for (group, kind) in [
        ("tools", RequirementKind::Tool),
        ("test", RequirementKind::Test),
        ("host", RequirementKind::Host),
    ] {
        let entries = value
            .get("requirements")
            .and_then(|r| r.get(group))
            .and_then(|v| v.as_array());
        if let Some(entries) = entries {
            for entry in entries {
                match entry.as_str() {
                    Some(reference) => {
                        if let Err(e) = Requirement::parse(reference, kind) {
                            errors.push(e.to_string());
                        }
                    }
                    None => errors.push(format!(
                        "Entries of 'requirements.{group}' must be strings"
                    )),
                }
            }
        }
    }

    if let Some(generator) = value
        .get("toolchain")
        .and_then(|t| t.get("generator"))
        .and_then(|v| v.as_str())
    {
        if !KNOWN_GENERATORS.contains(&generator) {
            errors.push(format!(
                "Invalid toolchain generator '{generator}': must be one of {KNOWN_GENERATORS:?}"
            ));
        }
    }

    if let Some(mode) = value
        .get("package_info")
        .and_then(|p| p.get("cmake_find_mode"))
        .and_then(|v| v.as_str())
    {
        if !KNOWN_FIND_MODES.contains(&mode) {
            errors.push(format!(
                "Invalid cmake_find_mode '{mode}': must be one of {KNOWN_FIND_MODES:?}"
            ));
        }
    }

    // Full parse catches any remaining structural issues
    if let Err(e) = Recipe::from_toml(&content) {
        let err_str = e.to_string();
        if !errors
            .iter()
            .any(|existing| err_str.contains(&existing[..existing.len().min(20)]))
        {
            errors.push(format!("Recipe structure error: {e}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"
[package]
name = "geometry-kit"
version = "1.0"
license = "Apache-2.0"
url = "https://example.com/geometry-kit"
exports = ["geometry_kit/*", "tests/*", "CMakeLists.txt", "LICENSE"]

[options]
shared = false
fPIC = true

[requirements]
tools = ["cmake/[^4.0.0]", "ninja/[^1.3.0]"]
test = ["boost-ext-ut/2.3.1"]

[toolchain]
generator = "Ninja"

[package_info]
cmake_find_mode = "none"
builddirs = ["lib/cmake"]
"#;

    #[test]
    fn test_recipe_parses_from_valid_toml() {
        let recipe = Recipe::from_toml(SAMPLE).expect("Failed to parse valid TOML");

        assert_eq!(recipe.package.name, "geometry-kit");
        assert_eq!(recipe.package.version, "1.0");
        assert_eq!(recipe.package.license.as_deref(), Some("Apache-2.0"));
        assert_eq!(recipe.package.exports.len(), 4);
        assert_eq!(recipe.requirements.tools.len(), 2);
        assert_eq!(recipe.requirements.test.len(), 1);
        assert!(recipe.requirements.host.is_empty());
        assert_eq!(recipe.toolchain.generator, "Ninja");
        assert_eq!(
            recipe.package_info.as_ref().unwrap().cmake_find_mode.as_deref(),
            Some("none")
        );
        assert!(recipe.test.is_none());
    }

    #[test]
    fn test_recipe_roundtrip() {
        let recipe = Recipe::from_toml(SAMPLE).unwrap();
        let serialized = recipe.to_toml().unwrap();
        let parsed = Recipe::from_toml(&serialized).unwrap();
        assert_eq!(recipe, parsed);
    }

    #[test]
    fn test_recipe_missing_name_fails() {
        let toml_content = r#"
[package]
version = "1.0"
"#;
        assert!(Recipe::from_toml(toml_content).is_err());
    }

    #[test]
    fn test_recipe_defaults_applied() {
        let toml_content = r#"
[package]
name = "minimal"
version = "0.1.0"
"#;
        let recipe = Recipe::from_toml(toml_content).unwrap();
        assert_eq!(recipe.toolchain.generator, "Ninja");
        assert!(recipe.toolchain.tool_vars.is_empty());
        assert!(recipe.package_info.is_none());
        assert_eq!(recipe.reference(), "minimal/0.1.0");
    }

    #[test]
    fn test_test_section_without_command() {
        let toml_content = r#"
[package]
name = "harness"
version = "0.1.0"

[test]
"#;
        let recipe = Recipe::from_toml(toml_content).unwrap();
        let test = recipe.test.expect("test section should be present");
        assert!(test.command.is_none());
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("PKGFORGE_TEST_SUB", "hello");
        let result = substitute_env_vars("prefix_${PKGFORGE_TEST_SUB}_suffix").unwrap();
        assert_eq!(result, "prefix_hello_suffix");
        std::env::remove_var("PKGFORGE_TEST_SUB");
    }

    #[test]
    fn test_substitute_unset_var_is_empty() {
        let result = substitute_env_vars("a${PKGFORGE_TEST_UNSET_VAR}b").unwrap();
        assert_eq!(result, "ab");
    }

    #[test]
    fn test_validate_recipe_collects_all_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("recipe.toml");
        std::fs::write(
            &path,
            r#"
[package]
name = ""
version = "not-a-version"

[options]
lto = true

[requirements]
tools = ["cmake"]
"#,
        )
        .unwrap();

        let errors = validate_recipe(&path).unwrap_err();
        assert!(errors.len() >= 4, "expected several errors, got {errors:?}");
        assert!(errors.iter().any(|e| e.contains("name")));
        assert!(errors.iter().any(|e| e.contains("not-a-version")));
        assert!(errors.iter().any(|e| e.contains("lto")));
        assert!(errors.iter().any(|e| e.contains("cmake")));
    }

    #[test]
    fn test_validate_recipe_accepts_sample() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("recipe.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        assert!(validate_recipe(&path).is_ok());
    }

    #[test]
    fn test_validate_recipe_rejects_bad_generator() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("recipe.toml");
        std::fs::write(
            &path,
            r#"
[package]
name = "pkg"
version = "1.0"

[toolchain]
generator = "MSBuild"
"#,
        )
        .unwrap();

        let errors = validate_recipe(&path).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("MSBuild")));
    }

    /// Strategy for generating valid package names
    fn package_name_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,30}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }

    /// Strategy for generating valid versions
    fn version_strategy() -> impl Strategy<Value = String> {
        (1u32..100, 0u32..100, 0u32..100)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Identity survives a serialization round-trip
        #[test]
        fn prop_recipe_identity_roundtrip(
            name in package_name_strategy(),
            version in version_strategy(),
        ) {
            let recipe = Recipe {
                package: PackageMeta {
                    name: name.clone(),
                    version: version.clone(),
                    license: Some("Apache-2.0".to_string()),
                    url: None,
                    exports: vec!["src/*".to_string()],
                },
                options: OptionDefaults::default(),
                requirements: RequirementsSection::default(),
                toolchain: ToolchainSection::default(),
                package_info: None,
                test: None,
            };

            let toml_str = recipe.to_toml().unwrap();
            let parsed = Recipe::from_toml(&toml_str).unwrap();
            prop_assert_eq!(parsed.package.name, name);
            prop_assert_eq!(parsed.package.version, version);
        }
    }
}
