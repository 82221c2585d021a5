//! Lifecycle actions
//!
//! One invocation runs the hooks in a fixed order: requirements, layout,
//! generate, build, package, test. The build/package/test actions are thin
//! delegations to the backend build tool; each either succeeds or propagates
//! the tool's failure. There are no retries and no partial recovery.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::generator::{self, GeneratedFiles};
use crate::core::index::{PackageIndex, PackageInfo, ResolvedSet};
use crate::core::layout::Layout;
use crate::core::options::Options;
use crate::core::recipe::Recipe;
use crate::core::requirements::RequirementSet;
use crate::core::settings::Profile;
use crate::error::{ActionError, FilesystemError, PkgforgeError};
use crate::infra::{filesystem, process};

/// Outcome of the test hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// The recipe's test command ran successfully
    Ran { command: String },
    /// The recipe declares no test command
    NoOp,
}

/// Driver for one build invocation of a recipe
#[derive(Debug)]
pub struct Invocation {
    recipe: Recipe,
    recipe_dir: PathBuf,
    profile: Profile,
    options: Options,
    layout: Layout,
    index: PackageIndex,
}

impl Invocation {
    /// Assemble an invocation; the layout is fixed from here on
    pub fn new(
        recipe_dir: &Path,
        recipe: Recipe,
        profile: Profile,
        options: Options,
        index: PackageIndex,
    ) -> Self {
        let layout = Layout::resolve(recipe_dir, &profile.settings);
        Self {
            recipe,
            recipe_dir: recipe_dir.to_path_buf(),
            profile,
            options,
            layout,
            index,
        }
    }

    /// The recipe under build
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// The resolved directory layout
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The invocation's option values
    pub fn options(&self) -> Options {
        self.options
    }

    /// The invocation's profile
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Declare and resolve the recipe's requirements.
    ///
    /// Fatal if any requirement is unsatisfied; nothing later runs.
    pub fn resolve(&self) -> Result<ResolvedSet, PkgforgeError> {
        let set = RequirementSet::from_section(&self.recipe.requirements)?;
        let resolved = self.index.resolve_set(&set)?;
        tracing::info!(
            "Resolved {} build and {} runtime requirements",
            resolved.build.len(),
            resolved.runtime.len()
        );
        Ok(resolved)
    }

    /// Write the toolchain and dependency files into the build folder
    pub fn generate(&self, resolved: &ResolvedSet) -> Result<GeneratedFiles, PkgforgeError> {
        Ok(generator::generate(
            &self.recipe,
            &self.profile.settings,
            self.options,
            resolved,
            &self.layout,
        )?)
    }

    /// Configure the build tree via the backend tool
    pub fn configure(&self, generated: &GeneratedFiles) -> Result<(), ActionError> {
        let args = vec![
            "-S".to_string(),
            self.layout.source_folder.display().to_string(),
            "-B".to_string(),
            self.layout.build_folder.display().to_string(),
            "-G".to_string(),
            self.recipe.toolchain.generator.clone(),
            format!("-DCMAKE_TOOLCHAIN_FILE={}", generated.toolchain.display()),
            format!("-DCMAKE_BUILD_TYPE={}", self.profile.settings.build_type),
        ];
        self.run_step("configure", &args)
    }

    /// Compile via the backend tool
    pub fn build(&self) -> Result<(), ActionError> {
        let args = vec![
            "--build".to_string(),
            self.layout.build_folder.display().to_string(),
            "--parallel".to_string(),
            self.profile.conf.effective_jobs().to_string(),
        ];
        self.run_step("build", &args)
    }

    /// Install into the package folder via the backend tool
    pub fn install(&self) -> Result<(), ActionError> {
        let args = vec![
            "--install".to_string(),
            self.layout.build_folder.display().to_string(),
            "--prefix".to_string(),
            self.layout.package_folder.display().to_string(),
        ];
        self.run_step("install", &args)
    }

    /// Copy the license file into the package's licenses directory.
    ///
    /// A missing source license aborts packaging.
    pub fn copy_license(&self) -> Result<(), ActionError> {
        let source = self.layout.source_folder.join(defaults::LICENSE_FILE);
        if !source.is_file() {
            return Err(ActionError::LicenseMissing { path: source });
        }

        let target = self.layout.licenses_folder().join(defaults::LICENSE_FILE);
        filesystem::copy_file(&source, &target)?;
        tracing::info!("Copied license to {}", target.display());
        Ok(())
    }

    /// Write the published package info into the package folder
    pub fn publish_info(&self) -> Result<(), FilesystemError> {
        let section = self.recipe.package_info.clone().unwrap_or_default();
        let info = PackageInfo {
            name: self.recipe.package.name.clone(),
            version: self.recipe.package.version.clone(),
            cmake_find_mode: section.cmake_find_mode,
            builddirs: section.builddirs,
        };
        info.save_to(&self.layout.package_folder)
    }

    /// Package: install, then license copy, then published info
    pub fn package(&self) -> Result<(), PkgforgeError> {
        self.install()?;
        self.copy_license()?;
        self.publish_info()?;
        Ok(())
    }

    /// Run the recipe's test hook, or no-op when none is declared
    pub fn test(&self) -> Result<TestOutcome, ActionError> {
        let command = self
            .recipe
            .test
            .as_ref()
            .and_then(|t| t.command.as_deref());

        let Some(command) = command else {
            tracing::info!("No test command declared; skipping");
            return Ok(TestOutcome::NoOp);
        };

        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or_else(|| ActionError::ToolSpawn {
            step: "test".to_string(),
            program: String::new(),
            error: "empty test command".to_string(),
        })?;
        let args: Vec<String> = parts.map(String::from).collect();

        process::run_tool("test", program, &args, &self.layout.build_folder)?;
        Ok(TestOutcome::Ran {
            command: command.to_string(),
        })
    }

    /// Publish the package folder into the index
    pub fn publish(&self) -> Result<PathBuf, PkgforgeError> {
        self.index.publish(
            &self.recipe.package.name,
            &self.recipe.package.version,
            &self.layout.package_folder,
        )
    }

    /// Remove the build and package folders
    pub fn clean(&self) -> Result<(), FilesystemError> {
        filesystem::remove_dir_all(&self.layout.build_folder)?;
        filesystem::remove_dir_all(&self.layout.package_folder)?;
        Ok(())
    }

    fn run_step(&self, step: &str, args: &[String]) -> Result<(), ActionError> {
        process::run_tool(
            step,
            &self.profile.conf.cmake_program,
            args,
            &self.recipe_dir,
        )
    }
}

/// Files under `source_folder` matched by an export pattern, relative paths
/// sorted for stable output
pub fn exported_files(source_folder: &Path, pattern: &str) -> Vec<PathBuf> {
    let mut matched: Vec<PathBuf> = walkdir::WalkDir::new(source_folder)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            e.path()
                .strip_prefix(source_folder)
                .ok()
                .map(Path::to_path_buf)
        })
        .filter(|rel| matches_pattern(pattern, rel))
        .collect();
    matched.sort();
    matched
}

/// Match a relative path against an export pattern.
///
/// Supported forms: exact file names ("LICENSE"), directory prefixes
/// ("tests/*", matching recursively), and a single `*` wildcard within one
/// name segment ("*.txt").
pub fn matches_pattern(pattern: &str, path: &Path) -> bool {
    let path_str = path.to_string_lossy();

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path_str.starts_with(&format!("{prefix}/"));
    }

    if let Some((head, tail)) = pattern.split_once('*') {
        return path_str.starts_with(head)
            && path_str.ends_with(tail)
            && path_str.len() >= head.len() + tail.len();
    }

    path_str == pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact() {
        assert!(matches_pattern("LICENSE", Path::new("LICENSE")));
        assert!(!matches_pattern("LICENSE", Path::new("LICENSE.md")));
    }

    #[test]
    fn test_matches_directory_prefix() {
        assert!(matches_pattern("tests/*", Path::new("tests/unit.cpp")));
        assert!(matches_pattern("tests/*", Path::new("tests/nested/deep.cpp")));
        assert!(!matches_pattern("tests/*", Path::new("src/lib.cpp")));
    }

    #[test]
    fn test_matches_wildcard_segment() {
        assert!(matches_pattern("*.txt", Path::new("CMakeLists.txt")));
        assert!(!matches_pattern("*.txt", Path::new("src/main.cpp")));
    }

    #[test]
    fn test_exported_files_matches_tree() {
        let dir = tempfile::TempDir::new().unwrap();
        crate::infra::filesystem::write_file(&dir.path().join("LICENSE"), "l").unwrap();
        crate::infra::filesystem::write_file(&dir.path().join("src/lib.cpp"), "c").unwrap();
        crate::infra::filesystem::write_file(&dir.path().join("docs/guide.md"), "d").unwrap();

        let matched = exported_files(dir.path(), "src/*");
        assert_eq!(matched, vec![std::path::PathBuf::from("src/lib.cpp")]);

        assert!(exported_files(dir.path(), "missing/*").is_empty());
    }
}
