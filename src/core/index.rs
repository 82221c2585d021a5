//! Local package index
//!
//! Published packages live under `<home>/packages/<name>/<version>/`, where
//! each version directory is that package's installed package folder. The
//! index is the only source requirement resolution draws from; a requirement
//! that no indexed version satisfies aborts the invocation.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::requirements::{Requirement, RequirementKind, RequirementSet};
use crate::core::version::lenient_version;
use crate::error::{FilesystemError, RequirementError};
use crate::infra::filesystem;

/// Package info published alongside an installed package (pkginfo.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageInfo {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Downstream config-file generation mode ("none" disables it)
    #[serde(default)]
    pub cmake_find_mode: Option<String>,

    /// Search-path entries appended for consumers
    #[serde(default)]
    pub builddirs: Vec<String>,
}

impl PackageInfo {
    /// Load the published info from a package folder, if present
    pub fn load_from(package_folder: &Path) -> Option<Self> {
        let path = package_folder.join(defaults::PKGINFO_FILE);
        let content = std::fs::read_to_string(path).ok()?;
        toml::from_str(&content).ok()
    }

    /// Write the published info into a package folder
    pub fn save_to(&self, package_folder: &Path) -> Result<(), FilesystemError> {
        let content = toml::to_string_pretty(self).expect("package info serializes");
        filesystem::write_file(&package_folder.join(defaults::PKGINFO_FILE), &content)
    }
}

/// One requirement resolved against the index
#[derive(Debug, Clone)]
pub struct ResolvedRequirement {
    /// Package name
    pub name: String,
    /// Selected version
    pub version: Version,
    /// Root of the installed package
    pub root: PathBuf,
    /// Requirement stage
    pub kind: RequirementKind,
}

impl ResolvedRequirement {
    /// Published consumer info of the resolved package, if any
    pub fn package_info(&self) -> Option<PackageInfo> {
        PackageInfo::load_from(&self.root)
    }
}

/// A fully resolved requirement set
#[derive(Debug, Clone, Default)]
pub struct ResolvedSet {
    /// Resolved build-time requirements
    pub build: Vec<ResolvedRequirement>,
    /// Resolved runtime requirements
    pub runtime: Vec<ResolvedRequirement>,
}

/// The local package index
#[derive(Debug, Clone)]
pub struct PackageIndex {
    packages_root: PathBuf,
}

impl PackageIndex {
    /// Open the index under a pkgforge home directory
    pub fn open(home: &Path) -> Self {
        Self {
            packages_root: home.join(defaults::PACKAGES_DIR),
        }
    }

    /// The default home: `$PKGFORGE_HOME`, or the platform data directory
    pub fn default_home() -> PathBuf {
        if let Ok(home) = std::env::var(defaults::HOME_ENV) {
            return PathBuf::from(home);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pkgforge")
    }

    /// Root directory holding published packages
    pub fn packages_root(&self) -> &Path {
        &self.packages_root
    }

    /// Installed version directories of a package, ascending by version
    fn version_entries(&self, name: &str) -> Vec<(Version, PathBuf)> {
        let dir = self.packages_root.join(name);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut versions: Vec<(Version, PathBuf)> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .filter_map(|e| {
                let dirname = e.file_name().to_str().map(String::from)?;
                Some((lenient_version(&dirname).ok()?, e.path()))
            })
            .collect();
        versions.sort_by(|a, b| a.0.cmp(&b.0));
        versions
    }

    /// Available versions of a package, ascending
    pub fn available_versions(&self, name: &str) -> Vec<Version> {
        self.version_entries(name)
            .into_iter()
            .map(|(v, _)| v)
            .collect()
    }

    /// Resolve a single requirement to the highest satisfying version
    pub fn resolve(&self, req: &Requirement) -> Result<ResolvedRequirement, RequirementError> {
        let available = self.version_entries(&req.name);

        if available.is_empty() {
            return Err(RequirementError::NotInIndex {
                reference: req.reference.clone(),
                name: req.name.clone(),
            });
        }

        let (version, root) = available
            .iter()
            .rev()
            .find(|(v, _)| req.constraint.matches(v))
            .cloned()
            .ok_or_else(|| RequirementError::Unsatisfied {
                reference: req.reference.clone(),
                name: req.name.clone(),
                available: available.iter().map(|(v, _)| v.to_string()).collect(),
            })?;

        Ok(ResolvedRequirement {
            name: req.name.clone(),
            version,
            root,
            kind: req.kind,
        })
    }

    /// Resolve a whole requirement set; the first unresolved entry is fatal
    pub fn resolve_set(&self, set: &RequirementSet) -> Result<ResolvedSet, RequirementError> {
        let mut resolved = ResolvedSet::default();
        for req in &set.build {
            resolved.build.push(self.resolve(req)?);
        }
        for req in &set.runtime {
            resolved.runtime.push(self.resolve(req)?);
        }
        Ok(resolved)
    }

    /// Publish a package folder into the index, replacing any prior content
    pub fn publish(
        &self,
        name: &str,
        version: &str,
        package_folder: &Path,
    ) -> Result<PathBuf, crate::error::PkgforgeError> {
        let version = lenient_version(version).map_err(|e| {
            crate::error::RequirementError::InvalidReference {
                reference: format!("{name}/{version}"),
                reason: e.to_string(),
            }
        })?;
        let target = self.version_root(name, &version);

        filesystem::remove_dir_all(&target)?;
        filesystem::copy_dir_all(package_folder, &target)?;

        tracing::info!("Published {name}/{version} to {}", target.display());
        Ok(target)
    }

    fn version_root(&self, name: &str, version: &Version) -> PathBuf {
        self.packages_root.join(name).join(version.to_string())
    }
}
