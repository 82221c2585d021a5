//! Toolchain and dependency file generation
//!
//! Writes the two artifacts the backend build system consumes: a toolchain
//! file (build type, option variables, backend flavor, injected tool paths)
//! and a dependency file (roots and search paths of resolved runtime
//! requirements). Output is deterministic: regenerating with unchanged
//! inputs produces byte-identical files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::config::defaults;
use crate::core::index::ResolvedSet;
use crate::core::layout::Layout;
use crate::core::options::Options;
use crate::core::recipe::Recipe;
use crate::core::settings::Settings;
use crate::error::GenerateError;
use crate::infra::filesystem;

/// Paths of the generated artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Toolchain file consumed via `-DCMAKE_TOOLCHAIN_FILE`
    pub toolchain: PathBuf,
    /// Dependency file included from the toolchain file
    pub deps: PathBuf,
}

/// Generate both artifacts into the layout's generators folder
pub fn generate(
    recipe: &Recipe,
    settings: &Settings,
    options: Options,
    resolved: &ResolvedSet,
    layout: &Layout,
) -> Result<GeneratedFiles, GenerateError> {
    let tool_paths = discover_tool_vars(recipe, resolved)?;

    let generators = layout.generators_folder();
    let toolchain_path = generators.join(defaults::TOOLCHAIN_FILE);
    let deps_path = generators.join(defaults::DEPS_FILE);

    filesystem::write_file(
        &toolchain_path,
        &render_toolchain(recipe, settings, options, &tool_paths),
    )?;
    filesystem::write_file(&deps_path, &render_deps(resolved))?;

    tracing::info!("Generated {} and {}", toolchain_path.display(), deps_path.display());

    Ok(GeneratedFiles {
        toolchain: toolchain_path,
        deps: deps_path,
    })
}

/// Render the toolchain file contents
pub fn render_toolchain(
    recipe: &Recipe,
    settings: &Settings,
    options: Options,
    tool_paths: &BTreeMap<String, PathBuf>,
) -> String {
    let mut out = String::new();
    out.push_str("# Generated by pkgforge. Do not edit.\n");
    out.push_str(&format!(
        "set(CMAKE_BUILD_TYPE \"{}\" CACHE STRING \"\" FORCE)\n",
        settings.build_type
    ));
    out.push_str(&format!(
        "set(BUILD_SHARED_LIBS {} CACHE BOOL \"\" FORCE)\n",
        if options.shared { "ON" } else { "OFF" }
    ));
    out.push_str(&format!(
        "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"\" FORCE)\n",
        if options.fpic { "ON" } else { "OFF" }
    ));
    out.push_str(&format!(
        "set(PKGFORGE_GENERATOR \"{}\" CACHE STRING \"\" FORCE)\n",
        recipe.toolchain.generator
    ));

    for (variable, path) in tool_paths {
        out.push_str(&format!(
            "set({variable} \"{}\" CACHE STRING \"\" FORCE)\n",
            path.display()
        ));
    }

    out.push_str("include(\"${CMAKE_CURRENT_LIST_DIR}/deps.cmake\")\n");
    out
}

/// Render the dependency file contents
pub fn render_deps(resolved: &ResolvedSet) -> String {
    let mut out = String::new();
    out.push_str("# Generated by pkgforge. Do not edit.\n");

    for dep in &resolved.runtime {
        let root = dep.root.display();
        out.push_str(&format!("# {} {}\n", dep.name, dep.version));
        out.push_str(&format!("set({}_ROOT \"{root}\")\n", dep.name));
        out.push_str(&format!("list(APPEND CMAKE_PREFIX_PATH \"{root}\")\n"));

        if let Some(info) = dep.package_info() {
            for builddir in &info.builddirs {
                out.push_str(&format!(
                    "list(APPEND CMAKE_PREFIX_PATH \"{root}/{builddir}\")\n"
                ));
            }
            if info.cmake_find_mode.as_deref() == Some("none") {
                // Package ships its own config files; no find hints emitted.
                out.push_str(&format!("# {} provides its own config\n", dep.name));
                continue;
            }
        }

        out.push_str(&format!("set({}_DIR \"{root}\")\n", dep.name));
    }

    out
}

/// Discover the executables for the recipe's injected toolchain variables.
///
/// Each program is searched inside the resolved build requirement roots
/// (bin/ first, then a shallow walk), falling back to PATH lookup.
fn discover_tool_vars(
    recipe: &Recipe,
    resolved: &ResolvedSet,
) -> Result<BTreeMap<String, PathBuf>, GenerateError> {
    let mut paths = BTreeMap::new();
    for (variable, program) in &recipe.toolchain.tool_vars {
        let path = find_tool_program(program, resolved).ok_or_else(|| {
            GenerateError::ToolNotFound {
                program: program.clone(),
                variable: variable.clone(),
            }
        })?;
        tracing::debug!("Injecting {variable} = {}", path.display());
        paths.insert(variable.clone(), path);
    }
    Ok(paths)
}

/// Locate a tool program in resolved build requirements, then on PATH
pub fn find_tool_program(program: &str, resolved: &ResolvedSet) -> Option<PathBuf> {
    for dep in &resolved.build {
        let candidate = dep.root.join("bin").join(program);
        if candidate.is_file() {
            return Some(candidate);
        }

        let found = WalkDir::new(&dep.root)
            .max_depth(3)
            .into_iter()
            .filter_map(Result::ok)
            .find(|e| e.file_type().is_file() && e.file_name() == std::ffi::OsStr::new(program));
        if let Some(entry) = found {
            return Some(entry.into_path());
        }
    }

    which::which(program).ok()
}
