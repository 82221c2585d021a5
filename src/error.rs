//! Error types for pkgforge
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Recipe loading and parsing errors
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Recipe file not found
    #[error("Recipe not found at '{path}'. Run 'pkgforge new' to create one.")]
    NotFound { path: PathBuf },

    /// Recipe parse error
    #[error("Failed to parse recipe: {source}")]
    Parse { source: toml::de::Error },

    /// Missing required field
    #[error("Recipe is missing required field '{field}'")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Recipe field '{field}' has invalid value '{value}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Environment substitution error
    #[error("Environment substitution failed: {0}")]
    Substitution(String),
}

/// Profile and settings errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Setting has a value outside its known set
    #[error("Setting '{setting}' has invalid value '{value}': must be one of {allowed:?}")]
    InvalidValue {
        setting: String,
        value: String,
        allowed: Vec<&'static str>,
    },

    /// Malformed -s key=value override
    #[error("Invalid setting override '{input}': expected 'key=value'")]
    InvalidOverride { input: String },

    /// Unknown setting name in an override
    #[error("Unknown setting '{name}': must be one of {known:?}")]
    UnknownSetting {
        name: String,
        known: Vec<&'static str>,
    },

    /// Profile parse error
    #[error("Failed to parse profile: {source}")]
    Parse { source: toml::de::Error },
}

/// Option validation errors
#[derive(Error, Debug)]
pub enum OptionError {
    /// Unknown option name
    #[error("Unknown option '{name}': must be one of {known:?}")]
    Unknown {
        name: String,
        known: Vec<&'static str>,
    },

    /// Option value is not a boolean
    #[error("Option '{name}' has invalid value '{value}': expected 'true' or 'false'")]
    InvalidValue { name: String, value: String },

    /// Malformed -o key=value override
    #[error("Invalid option override '{input}': expected 'key=value'")]
    InvalidOverride { input: String },
}

/// Requirement parsing and resolution errors
#[derive(Error, Debug)]
pub enum RequirementError {
    /// Malformed requirement reference
    #[error("Invalid requirement '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    /// No available version satisfies the constraint
    #[error("Requirement '{reference}' cannot be satisfied: available versions of '{name}' are {available:?}")]
    Unsatisfied {
        reference: String,
        name: String,
        available: Vec<String>,
    },

    /// Requirement names a package absent from the index
    #[error("Requirement '{reference}' cannot be satisfied: package '{name}' is not in the index")]
    NotInIndex { reference: String, name: String },
}

/// Artifact generation errors
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Tool program for an injected variable could not be discovered
    #[error("Tool '{program}' for toolchain variable '{variable}' not found in build requirements or PATH")]
    ToolNotFound { program: String, variable: String },

    /// Filesystem error while writing artifacts
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Lifecycle action errors (configure, build, install, test, package)
#[derive(Error, Debug)]
pub enum ActionError {
    /// External build tool could not be started
    #[error("Failed to start '{program}' during {step}: {error}")]
    ToolSpawn {
        step: String,
        program: String,
        error: String,
    },

    /// External build tool exited with a failure status
    #[error("Step '{step}' failed: '{program}' exited with {status}")]
    ToolFailed {
        step: String,
        program: String,
        status: String,
    },

    /// License file absent during packaging
    #[error("License file not found at '{path}': packaging requires it")]
    LicenseMissing { path: PathBuf },

    /// Filesystem error during an action
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Template scaffolding errors
#[derive(Error, Debug)]
pub enum NewError {
    /// Target directory already contains a recipe
    #[error("Directory '{path}' already contains a recipe. Choose another name.")]
    AlreadyExists { path: PathBuf },

    /// Unknown template name
    #[error("Unknown template '{name}': must be one of {known:?}")]
    UnknownTemplate {
        name: String,
        known: Vec<&'static str>,
    },

    /// IO error during scaffolding
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Top-level pkgforge error type
#[derive(Error, Debug)]
pub enum PkgforgeError {
    /// Recipe error
    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    /// Settings or profile error
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Option error
    #[error("Option error: {0}")]
    Option(#[from] OptionError),

    /// Requirement error
    #[error("Requirement error: {0}")]
    Requirement(#[from] RequirementError),

    /// Generation error
    #[error("Generate error: {0}")]
    Generate(#[from] GenerateError),

    /// Lifecycle action error
    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Scaffolding error
    #[error("New error: {0}")]
    New(#[from] NewError),

    /// IO error
    #[error("IO error: {source}")]
    Io { source: std::io::Error },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
