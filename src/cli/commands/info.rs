//! Info command implementation
//!
//! Implements `pkgforge info` to display a recipe's identity, options,
//! requirements, and computed layout.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{load_invocation, InvocationArgs};
use crate::cli::output::json_enabled;
use crate::core::settings::Settings;

/// Serializable info report
#[derive(Debug, Serialize)]
struct InfoReport {
    name: String,
    version: String,
    license: Option<String>,
    url: Option<String>,
    settings: Settings,
    options: OptionsReport,
    generator: String,
    tools: Vec<String>,
    test: Vec<String>,
    host: Vec<String>,
    exports: Vec<String>,
    source_folder: PathBuf,
    build_folder: PathBuf,
    package_folder: PathBuf,
}

#[derive(Debug, Serialize)]
struct OptionsReport {
    shared: bool,
    #[serde(rename = "fPIC")]
    fpic: bool,
}

/// Execute the info command
pub fn execute(recipe_dir: &Path, args: &InvocationArgs) -> Result<()> {
    let invocation = load_invocation(recipe_dir, args)?;
    let recipe = invocation.recipe();
    let layout = invocation.layout();
    let options = invocation.options();

    let report = InfoReport {
        name: recipe.package.name.clone(),
        version: recipe.package.version.clone(),
        license: recipe.package.license.clone(),
        url: recipe.package.url.clone(),
        settings: invocation.profile().settings.clone(),
        options: OptionsReport {
            shared: options.shared,
            fpic: options.fpic,
        },
        generator: recipe.toolchain.generator.clone(),
        tools: recipe.requirements.tools.clone(),
        test: recipe.requirements.test.clone(),
        host: recipe.requirements.host.clone(),
        exports: recipe.package.exports.clone(),
        source_folder: layout.source_folder.clone(),
        build_folder: layout.build_folder.clone(),
        package_folder: layout.package_folder.clone(),
    };

    if json_enabled() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}/{}", report.name, report.version);
    if let Some(license) = &report.license {
        println!("  license: {license}");
    }
    if let Some(url) = &report.url {
        println!("  url: {url}");
    }
    println!(
        "  settings: compiler={} build_type={} os={} arch={}",
        report.settings.compiler, report.settings.build_type, report.settings.os, report.settings.arch
    );
    println!(
        "  options: shared={} fPIC={}",
        report.options.shared, report.options.fpic
    );
    println!("  generator: {}", report.generator);
    if !report.tools.is_empty() {
        println!("  tools: {}", report.tools.join(", "));
    }
    if !report.test.is_empty() {
        println!("  test: {}", report.test.join(", "));
    }
    if !report.host.is_empty() {
        println!("  host: {}", report.host.join(", "));
    }
    if !report.exports.is_empty() {
        println!("  exports: {}", report.exports.join(", "));
    }
    println!("  source: {}", report.source_folder.display());
    println!("  build: {}", report.build_folder.display());
    println!("  package: {}", report.package_folder.display());

    Ok(())
}
