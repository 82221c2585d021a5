//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod clean;
pub mod create;
pub mod generate;
pub mod info;
pub mod new;
pub mod package;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::core::index::PackageIndex;
use crate::core::lifecycle::Invocation;
use crate::core::options::Options;
use crate::core::recipe::Recipe;
use crate::core::settings::Profile;

/// Arguments shared by every lifecycle command
#[derive(Args, Debug, Clone, Default)]
pub struct InvocationArgs {
    /// Path to a profile file (defaults to the host profile)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Override a setting (e.g. -s build_type=Debug)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Override an option (e.g. -o shared=true)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Override the pkgforge home directory
    #[arg(long, env = "PKGFORGE_HOME")]
    pub home: Option<PathBuf>,
}

impl InvocationArgs {
    /// Load the profile with setting overrides applied and validated
    pub fn load_profile(&self) -> Result<Profile> {
        let mut profile = match &self.profile {
            Some(path) => Profile::load(path)?,
            None => Profile::host(),
        };
        for input in &self.settings {
            profile.settings.apply_override(input)?;
        }
        profile.settings.validate()?;
        Ok(profile)
    }

    /// Open the package index for this invocation
    pub fn open_index(&self) -> PackageIndex {
        let home = self
            .home
            .clone()
            .unwrap_or_else(PackageIndex::default_home);
        PackageIndex::open(&home)
    }
}

/// Assemble a full invocation for a recipe directory
pub fn load_invocation(recipe_dir: &Path, args: &InvocationArgs) -> Result<Invocation> {
    let recipe = Recipe::load_dir(recipe_dir)?;
    let profile = args.load_profile()?;

    let mut options = Options::from_defaults(&recipe.options);
    options.apply_overrides(&args.options)?;

    Ok(Invocation::new(
        recipe_dir,
        recipe,
        profile,
        options,
        args.open_index(),
    ))
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new recipe from a built-in template
    New {
        /// Recipe (package) name
        name: String,

        /// Template: library, graphics, demo, or test-package
        #[arg(short, long, default_value = "library")]
        template: String,

        /// Runtime requirement to add (repeatable, e.g. --requires lib/1.0)
        #[arg(long = "requires", value_name = "REF")]
        requires: Vec<String>,
    },

    /// Validate recipe, profile, and requirements without building
    Check {
        #[command(flatten)]
        args: InvocationArgs,
    },

    /// Show recipe identity, options, requirements, and layout
    Info {
        #[command(flatten)]
        args: InvocationArgs,
    },

    /// Resolve requirements and write toolchain/dependency files
    Generate {
        #[command(flatten)]
        args: InvocationArgs,
    },

    /// Generate, then configure and compile via the backend tool
    Build {
        #[command(flatten)]
        args: InvocationArgs,
    },

    /// Install into the package folder and copy the license
    Package {
        #[command(flatten)]
        args: InvocationArgs,
    },

    /// Run the recipe's test hook
    Test {
        #[command(flatten)]
        args: InvocationArgs,
    },

    /// Full pipeline: build, package, test, then publish to the index
    Create {
        #[command(flatten)]
        args: InvocationArgs,
    },

    /// Remove the build and package folders
    Clean {
        #[command(flatten)]
        args: InvocationArgs,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        let current_dir = std::env::current_dir()?;
        match self {
            Self::New {
                name,
                template,
                requires,
            } => new::execute(&current_dir, &name, &template, &requires),
            Self::Check { args } => check::execute(&current_dir, &args),
            Self::Info { args } => info::execute(&current_dir, &args),
            Self::Generate { args } => generate::execute(&current_dir, &args),
            Self::Build { args } => build::execute(&current_dir, &args),
            Self::Package { args } => package::execute(&current_dir, &args),
            Self::Test { args } => test::execute(&current_dir, &args),
            Self::Create { args } => create::execute(&current_dir, &args),
            Self::Clean { args } => clean::execute(&current_dir, &args),
        }
    }
}
