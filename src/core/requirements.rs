//! Requirement declaration
//!
//! A requirement string is `name/version` for an exact pin ("glfw/3.4") or
//! `name/[constraint]` for a semver range ("cmake/[^4.0.0]"). Recipes declare
//! three groups: build-time tools, build-time test frameworks, and runtime
//! libraries. Tools and test frameworks together form the build list of the
//! resulting [`RequirementSet`].

use semver::VersionReq;
use serde::{Deserialize, Serialize};

use crate::core::version;
use crate::error::RequirementError;

/// Which stage of a build a requirement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    /// Build-time tool (build generator, backend tool, utility toolchain)
    Tool,
    /// Build-time test framework
    Test,
    /// Runtime library dependency
    Host,
}

impl std::fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tool => write!(f, "tool"),
            Self::Test => write!(f, "test"),
            Self::Host => write!(f, "host"),
        }
    }
}

/// A single parsed requirement
#[derive(Debug, Clone)]
pub struct Requirement {
    /// Package name
    pub name: String,
    /// Version constraint (exact pins become `=x.y.z`)
    pub constraint: VersionReq,
    /// The reference string as written in the recipe
    pub reference: String,
    /// Requirement stage
    pub kind: RequirementKind,
}

impl Requirement {
    /// Parse a requirement reference
    pub fn parse(reference: &str, kind: RequirementKind) -> Result<Self, RequirementError> {
        let (name, version_part) =
            reference
                .split_once('/')
                .ok_or_else(|| RequirementError::InvalidReference {
                    reference: reference.to_string(),
                    reason: "expected 'name/version' or 'name/[constraint]'".to_string(),
                })?;

        if name.is_empty() {
            return Err(RequirementError::InvalidReference {
                reference: reference.to_string(),
                reason: "package name is empty".to_string(),
            });
        }

        let constraint = if let Some(inner) = version_part
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
        {
            version::parse_constraint(inner)
        } else {
            version::exact_constraint(version_part)
        }
        .map_err(|e| RequirementError::InvalidReference {
            reference: reference.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            name: name.to_string(),
            constraint,
            reference: reference.to_string(),
            kind,
        })
    }
}

/// The `[requirements]` table of a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementsSection {
    /// Build-time tool requirements
    #[serde(default)]
    pub tools: Vec<String>,

    /// Build-time test-framework requirements
    #[serde(default)]
    pub test: Vec<String>,

    /// Runtime library requirements
    #[serde(default)]
    pub host: Vec<String>,
}

/// Requirements of one invocation, split into the two disjoint stages
#[derive(Debug, Clone, Default)]
pub struct RequirementSet {
    /// Build-time requirements (tools and test frameworks)
    pub build: Vec<Requirement>,
    /// Runtime library requirements
    pub runtime: Vec<Requirement>,
}

impl RequirementSet {
    /// Parse a recipe's requirements table into a requirement set
    pub fn from_section(section: &RequirementsSection) -> Result<Self, RequirementError> {
        let mut build = Vec::new();
        for reference in &section.tools {
            build.push(Requirement::parse(reference, RequirementKind::Tool)?);
        }
        for reference in &section.test {
            build.push(Requirement::parse(reference, RequirementKind::Test)?);
        }

        let mut runtime = Vec::new();
        for reference in &section.host {
            runtime.push(Requirement::parse(reference, RequirementKind::Host)?);
        }

        Ok(Self { build, runtime })
    }

    /// Iterate over build and runtime requirements in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.build.iter().chain(self.runtime.iter())
    }

    /// True when the recipe declares no requirements at all
    pub fn is_empty(&self) -> bool {
        self.build.is_empty() && self.runtime.is_empty()
    }
}
