//! Layout resolution
//!
//! Maps a recipe directory plus invocation settings to the conventional
//! source/build/package folders. Pure computation: no filesystem access.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::settings::Settings;

/// Directory roles for one build invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Where the sources live (the recipe directory)
    pub source_folder: PathBuf,
    /// Where configure/build artifacts go
    pub build_folder: PathBuf,
    /// Where the installed package goes
    pub package_folder: PathBuf,
}

impl Layout {
    /// Resolve the layout for a recipe directory and settings.
    ///
    /// Deterministic: identical inputs always produce identical folders, and
    /// the three folders are pairwise disjoint.
    pub fn resolve(recipe_dir: &Path, settings: &Settings) -> Self {
        let build_type = &settings.build_type;
        Self {
            source_folder: recipe_dir.to_path_buf(),
            build_folder: recipe_dir.join("build").join(build_type),
            package_folder: recipe_dir.join("package").join(build_type),
        }
    }

    /// Folder receiving generated toolchain/dependency files
    pub fn generators_folder(&self) -> PathBuf {
        self.build_folder.join(defaults::GENERATORS_DIR)
    }

    /// Folder receiving the license copy inside the package
    pub fn licenses_folder(&self) -> PathBuf {
        self.package_folder.join(defaults::LICENSES_DIR)
    }

    /// True when build and package folders do not contain one another
    pub fn is_disjoint(&self) -> bool {
        !self.build_folder.starts_with(&self.package_folder)
            && !self.package_folder.starts_with(&self.build_folder)
    }
}
