//! Version handling for recipes and the package index
//!
//! Recipe versions are short-form friendly: "3.4" and "15" are accepted and
//! padded to full semver ("3.4.0", "15.0.0") before comparison. Constraint
//! strings use standard semver range syntax.

use semver::{Version, VersionReq};
use thiserror::Error;

/// Current pkgforge version from Cargo.toml
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors related to version parsing and checking
#[derive(Error, Debug, PartialEq)]
pub enum VersionError {
    /// Invalid version format
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Invalid version constraint format
    #[error("Invalid version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },
}

/// Parse a version string, padding missing components.
///
/// Package versions in recipes follow the short forms common in native
/// packaging ("3.4", "15"); those are padded to "3.4.0" and "15.0.0".
/// Full semver strings (including pre-release tags) pass through unchanged.
pub fn lenient_version(version: &str) -> Result<Version, VersionError> {
    if let Ok(v) = Version::parse(version) {
        return Ok(v);
    }

    // Only pad plain dotted-numeric forms; anything else is a real error.
    let numeric = version
        .split('.')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

    let padded = match version.split('.').count() {
        1 if numeric => format!("{version}.0.0"),
        2 if numeric => format!("{version}.0"),
        _ => version.to_string(),
    };

    Version::parse(&padded).map_err(|e| VersionError::InvalidVersion {
        version: version.to_string(),
        reason: e.to_string(),
    })
}

/// Parse and validate a semver version constraint
pub fn parse_constraint(constraint: &str) -> Result<VersionReq, VersionError> {
    VersionReq::parse(constraint).map_err(|e| VersionError::InvalidConstraint {
        constraint: constraint.to_string(),
        reason: e.to_string(),
    })
}

/// Build an exact-match constraint for a short-form version string
pub fn exact_constraint(version: &str) -> Result<VersionReq, VersionError> {
    let v = lenient_version(version)?;
    parse_constraint(&format!("={v}"))
}

/// Check if a version satisfies a constraint
pub fn check_version_constraint(
    version: &str,
    constraint: &str,
) -> Result<bool, VersionError> {
    let parsed = lenient_version(version)?;
    let req = parse_constraint(constraint)?;
    Ok(req.matches(&parsed))
}

/// Compare two version strings
pub fn compare_versions(v1: &str, v2: &str) -> Result<std::cmp::Ordering, VersionError> {
    let parsed_v1 = lenient_version(v1)?;
    let parsed_v2 = lenient_version(v2)?;
    Ok(parsed_v1.cmp(&parsed_v2))
}
