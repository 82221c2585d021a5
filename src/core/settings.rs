//! Settings and profile handling
//!
//! Settings (compiler, build_type, os, arch) describe one build invocation.
//! They are not part of the recipe: values come from a profile file, from
//! `-s key=value` overrides, or from host detection, and stay immutable for
//! the lifetime of the invocation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::defaults;
use crate::error::SettingsError;

/// Known compiler values
pub const COMPILERS: &[&str] = &["gcc", "clang", "apple-clang", "msvc"];

/// Known build-type values
pub const BUILD_TYPES: &[&str] = &["Debug", "Release", "RelWithDebInfo", "MinSizeRel"];

/// Known operating-system values
pub const OSES: &[&str] = &["Linux", "Macos", "Windows", "FreeBSD"];

/// Known architecture values
pub const ARCHS: &[&str] = &["x86_64", "armv7", "armv8", "riscv64"];

/// Names accepted in `-s key=value` overrides
pub const SETTING_NAMES: &[&str] = &["compiler", "build_type", "os", "arch"];

/// Build settings for one invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Compiler family
    #[serde(default = "default_compiler")]
    pub compiler: String,

    /// Build type (Debug, Release, ...)
    #[serde(default = "default_build_type")]
    pub build_type: String,

    /// Target operating system
    #[serde(default = "default_os")]
    pub os: String,

    /// Target architecture
    #[serde(default = "default_arch")]
    pub arch: String,
}

fn default_build_type() -> String {
    "Release".to_string()
}

fn default_os() -> String {
    match std::env::consts::OS {
        "macos" => "Macos",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        _ => "Linux",
    }
    .to_string()
}

fn default_arch() -> String {
    match std::env::consts::ARCH {
        "aarch64" => "armv8",
        "arm" => "armv7",
        "riscv64" => "riscv64",
        _ => "x86_64",
    }
    .to_string()
}

fn default_compiler() -> String {
    match std::env::consts::OS {
        "macos" => "apple-clang",
        "windows" => "msvc",
        _ => "gcc",
    }
    .to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            build_type: default_build_type(),
            os: default_os(),
            arch: default_arch(),
        }
    }
}

impl Settings {
    /// Validate every setting against its known value set
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_value("compiler", &self.compiler, COMPILERS)?;
        check_value("build_type", &self.build_type, BUILD_TYPES)?;
        check_value("os", &self.os, OSES)?;
        check_value("arch", &self.arch, ARCHS)?;
        Ok(())
    }

    /// Apply a `-s key=value` override
    pub fn apply_override(&mut self, input: &str) -> Result<(), SettingsError> {
        let (key, value) = input
            .split_once('=')
            .ok_or_else(|| SettingsError::InvalidOverride {
                input: input.to_string(),
            })?;

        match key {
            "compiler" => self.compiler = value.to_string(),
            "build_type" => self.build_type = value.to_string(),
            "os" => self.os = value.to_string(),
            "arch" => self.arch = value.to_string(),
            _ => {
                return Err(SettingsError::UnknownSetting {
                    name: key.to_string(),
                    known: SETTING_NAMES.to_vec(),
                })
            }
        }
        Ok(())
    }
}

fn check_value(setting: &str, value: &str, allowed: &[&'static str]) -> Result<(), SettingsError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::InvalidValue {
            setting: setting.to_string(),
            value: value.to_string(),
            allowed: allowed.to_vec(),
        })
    }
}

/// Tool configuration section of a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conf {
    /// Build-system driver program
    #[serde(default = "default_cmake_program")]
    pub cmake_program: String,

    /// Number of parallel jobs for the backend tool
    #[serde(default)]
    pub jobs: Option<usize>,
}

fn default_cmake_program() -> String {
    defaults::DEFAULT_CMAKE_PROGRAM.to_string()
}

impl Default for Conf {
    fn default() -> Self {
        Self {
            cmake_program: default_cmake_program(),
            jobs: None,
        }
    }
}

impl Conf {
    /// Effective parallel job count
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(num_cpus::get)
    }
}

/// A build profile: settings plus tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Build settings
    #[serde(default)]
    pub settings: Settings,

    /// Tool configuration
    #[serde(default)]
    pub conf: Conf,
}

impl Profile {
    /// The host profile: detected settings, default tool configuration
    pub fn host() -> Self {
        Self::default()
    }

    /// Load a profile from a TOML file, substituting `${VAR}` patterns
    pub fn load(path: &Path) -> Result<Self, crate::error::PkgforgeError> {
        let content = crate::infra::filesystem::read_file(path)?;
        let substituted = crate::core::recipe::substitute_env_vars_in_toml(&content)
            .map_err(crate::error::RecipeError::Substitution)?;
        let profile: Self = toml::from_str(&substituted)
            .map_err(|e| SettingsError::Parse { source: e })?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_host_profile_is_valid() {
        let profile = Profile::host();
        assert!(profile.settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_build_type_rejected() {
        let settings = Settings {
            build_type: "Fastest".to_string(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue { ref setting, .. } if setting == "build_type"
        ));
    }

    #[test]
    fn test_apply_override() {
        let mut settings = Settings::default();
        settings.apply_override("build_type=Debug").unwrap();
        assert_eq!(settings.build_type, "Debug");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_apply_override_rejects_unknown_setting() {
        let mut settings = Settings::default();
        let err = settings.apply_override("optimizer=O3").unwrap_err();
        assert!(matches!(err, SettingsError::UnknownSetting { .. }));
    }

    #[test]
    fn test_apply_override_rejects_missing_equals() {
        let mut settings = Settings::default();
        let err = settings.apply_override("build_type").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidOverride { .. }));
    }

    #[test]
    fn test_profile_toml_roundtrip() {
        let profile = Profile {
            settings: Settings {
                compiler: "clang".to_string(),
                build_type: "Debug".to_string(),
                os: "Linux".to_string(),
                arch: "armv8".to_string(),
            },
            conf: Conf {
                cmake_program: "cmake".to_string(),
                jobs: Some(4),
            },
        };

        let toml_str = toml::to_string_pretty(&profile).unwrap();
        let parsed: Profile = toml::from_str(&toml_str).unwrap();
        assert_eq!(profile, parsed);
    }

    #[test]
    fn test_effective_jobs_defaults_to_cpu_count() {
        let conf = Conf::default();
        assert!(conf.effective_jobs() >= 1);
        let pinned = Conf {
            jobs: Some(3),
            ..Conf::default()
        };
        assert_eq!(pinned.effective_jobs(), 3);
    }

    /// Strategy over valid settings combinations
    fn settings_strategy() -> impl Strategy<Value = Settings> {
        (
            proptest::sample::select(COMPILERS),
            proptest::sample::select(BUILD_TYPES),
            proptest::sample::select(OSES),
            proptest::sample::select(ARCHS),
        )
            .prop_map(|(compiler, build_type, os, arch)| Settings {
                compiler: compiler.to_string(),
                build_type: build_type.to_string(),
                os: os.to_string(),
                arch: arch.to_string(),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every combination drawn from the known sets validates
        #[test]
        fn prop_known_combinations_validate(settings in settings_strategy()) {
            prop_assert!(settings.validate().is_ok());
        }
    }
}
