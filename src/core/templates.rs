//! Recipe scaffolding
//!
//! `pkgforge new` creates a recipe directory from one of four built-in
//! templates: a library, a native-graphics binding, a demo application, and
//! a test-package harness.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::recipe::Recipe;
use crate::error::NewError;
use crate::infra::filesystem;

/// Entries added to a scaffolded .gitignore
pub const GITIGNORE_ENTRIES: &[&str] = &["build/", "package/"];

/// Marker comment for the pkgforge section in .gitignore
pub const GITIGNORE_MARKER: &str = "# pkgforge";

/// The built-in templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// A static/shared native library
    Library,
    /// A library binding a windowing and native graphics stack
    Graphics,
    /// A demo application consuming a library
    Demo,
    /// A consumer harness with a placeholder test hook
    TestPackage,
}

/// Template names accepted by `--template`
pub const TEMPLATE_NAMES: &[&str] = &["library", "graphics", "demo", "test-package"];

impl TemplateKind {
    /// Parse a `--template` value
    pub fn from_name(name: &str) -> Result<Self, NewError> {
        match name {
            "library" => Ok(Self::Library),
            "graphics" => Ok(Self::Graphics),
            "demo" => Ok(Self::Demo),
            "test-package" => Ok(Self::TestPackage),
            _ => Err(NewError::UnknownTemplate {
                name: name.to_string(),
                known: TEMPLATE_NAMES.to_vec(),
            }),
        }
    }
}

/// Result of scaffolding a recipe
#[derive(Debug)]
pub struct NewResult {
    /// Directory the recipe was created in
    pub recipe_dir: PathBuf,
    /// Path to the created recipe file
    pub recipe_path: PathBuf,
}

/// Generate the recipe.toml content for a template
pub fn recipe_content(name: &str, kind: TemplateKind, extra_requires: &[String]) -> String {
    let tool_lines = r#"tools = ["cmake/[^4.0.0]", "ninja/[^1.3.0]", "cmake-utils/4.0"]
test = ["boost-ext-ut/2.3.1"]"#;

    match kind {
        TemplateKind::Library => format!(
            r#"[package]
name = "{name}"
version = "1.0"
license = "Apache-2.0"
url = "https://example.com/{name}"
exports = ["src/*", "include/*", "tests/*", "CMakeLists.txt", "LICENSE"]

[options]
shared = false
fPIC = true

[requirements]
{tool_lines}
{host_line}

[toolchain]
generator = "Ninja"

[package_info]
cmake_find_mode = "none"
builddirs = ["{builddir}"]
"#,
            host_line = host_line(extra_requires),
            builddir = defaults::DEFAULT_BUILDDIR,
        ),
        TemplateKind::Graphics => format!(
            r#"[package]
name = "{name}"
version = "1.0"
license = "Apache-2.0"
url = "https://example.com/{name}"
exports = ["src/*", "include/*", "CMakeLists.txt", "LICENSE"]

[options]
shared = false
fPIC = true

[requirements]
tools = ["cmake/[^4.0.0]", "ninja/[^1.3.0]", "cmake-utils/4.0", "clang-tools/[^18.0.0]"]
test = ["boost-ext-ut/2.3.1"]
host = [{host_entries}]

[toolchain]
generator = "Ninja"

[toolchain.tool_vars]
CMAKE_CXX_CLANG_TIDY = "clang-tidy"

[package_info]
cmake_find_mode = "none"
builddirs = ["{builddir}"]
"#,
            host_entries = host_entries(&with_defaults(
                extra_requires,
                &["glfw/3.4", "metal-cpp/15"]
            )),
            builddir = defaults::DEFAULT_BUILDDIR,
        ),
        TemplateKind::Demo => format!(
            r#"[package]
name = "{name}"
version = "1.0"
license = "Apache-2.0"
url = "https://example.com/{name}"
exports = ["src/*", "CMakeLists.txt", "LICENSE"]

[requirements]
{tool_lines}
host = [{host_entries}]

[toolchain]
generator = "Ninja"
"#,
            host_entries = host_entries(&with_defaults(extra_requires, &["library-template/1.0"])),
        ),
        TemplateKind::TestPackage => format!(
            r#"[package]
name = "{name}"
version = "0.1.0"
exports = ["src/*", "CMakeLists.txt"]

[requirements]
{tool_lines}
host = [{host_entries}]

[toolchain]
generator = "Ninja"

# Placeholder test hook; set a command to exercise the consumed package.
[test]
"#,
            host_entries = host_entries(extra_requires),
        ),
    }
}

fn with_defaults(extra: &[String], default: &[&str]) -> Vec<String> {
    if extra.is_empty() {
        default.iter().map(ToString::to_string).collect()
    } else {
        extra.to_vec()
    }
}

fn host_entries(requires: &[String]) -> String {
    requires
        .iter()
        .map(|r| format!("\"{r}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn host_line(requires: &[String]) -> String {
    if requires.is_empty() {
        "host = []".to_string()
    } else {
        format!("host = [{}]", host_entries(requires))
    }
}

/// Generate a minimal build script stub for the template
pub fn cmakelists_content(name: &str, kind: TemplateKind) -> String {
    let target = match kind {
        TemplateKind::Library | TemplateKind::Graphics => {
            format!("add_library({name} src/{name}.cpp)")
        }
        TemplateKind::Demo | TemplateKind::TestPackage => {
            format!("add_executable({name} src/main.cpp)")
        }
    };

    format!(
        r"cmake_minimum_required(VERSION 3.25)
project({name} LANGUAGES CXX)

{target}

install(TARGETS {name})
"
    )
}

/// Generate the LICENSE placeholder
pub fn license_content(name: &str) -> String {
    format!("Copyright (c) the {name} authors.\n\nLicensed under the Apache License, Version 2.0.\n")
}

/// Generate .gitignore content
pub fn gitignore_content() -> String {
    let mut content = String::from(GITIGNORE_MARKER);
    content.push('\n');
    for entry in GITIGNORE_ENTRIES {
        content.push_str(entry);
        content.push('\n');
    }
    content
}

/// Scaffold a new recipe directory under `parent`
pub fn scaffold(
    parent: &Path,
    name: &str,
    kind: TemplateKind,
    extra_requires: &[String],
) -> Result<NewResult, NewError> {
    let recipe_dir = parent.join(name);
    let recipe_path = recipe_dir.join(defaults::RECIPE_FILE);

    if recipe_path.exists() {
        return Err(NewError::AlreadyExists { path: recipe_dir });
    }

    let content = recipe_content(name, kind, extra_requires);

    // Scaffolded recipes must parse; a failure here is a template bug.
    debug_assert!(Recipe::from_toml(&content).is_ok());

    filesystem::write_file(&recipe_path, &content)?;
    filesystem::write_file(
        &recipe_dir.join("CMakeLists.txt"),
        &cmakelists_content(name, kind),
    )?;
    filesystem::write_file(
        &recipe_dir.join(defaults::LICENSE_FILE),
        &license_content(name),
    )?;
    filesystem::write_file(&recipe_dir.join(".gitignore"), &gitignore_content())?;

    tracing::info!("Created recipe at {}", recipe_path.display());

    Ok(NewResult {
        recipe_dir,
        recipe_path,
    })
}
