//! Core business logic module
//!
//! This module contains all business logic for pkgforge. Process and
//! filesystem side effects live in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`recipe`] - Recipe (recipe.toml) parsing and validation
//! - [`settings`] - Settings and profile handling
//! - [`options`] - Package option handling
//! - [`requirements`] - Requirement declaration and parsing
//! - [`index`] - Local package index and resolution
//! - [`layout`] - Layout resolution
//! - [`generator`] - Toolchain and dependency file generation
//! - [`lifecycle`] - Build/package/test lifecycle actions
//! - [`templates`] - Recipe scaffolding
//! - [`check`] - Dry-run validation
//! - [`version`] - Version parsing and constraints

pub mod check;
pub mod generator;
pub mod index;
pub mod layout;
pub mod lifecycle;
pub mod options;
pub mod recipe;
pub mod requirements;
pub mod settings;
pub mod templates;
pub mod version;
