//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary recipe directory plus an isolated pkgforge home, and
/// provides utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the recipe under test
    pub dir: TempDir,
    /// Temporary directory used as the pkgforge home
    pub home: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test project with an isolated home
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            home: TempDir::new().expect("Failed to create temp home"),
        }
    }

    /// Get the path to the recipe directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Get the path to the pkgforge home
    pub fn home_path(&self) -> PathBuf {
        self.home.path().to_path_buf()
    }

    /// Create a file in the recipe directory
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the recipe directory
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the recipe directory
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the recipe directory
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Seed an empty package version into the home's index
    pub fn seed_package(&self, name: &str, version: &str) {
        let dir = self.home.path().join("packages").join(name).join(version);
        std::fs::create_dir_all(dir).expect("Failed to seed package");
    }

    /// Seed a package version carrying an executable under bin/
    pub fn seed_tool_package(&self, name: &str, version: &str, program: &str) {
        let bin = self
            .home
            .path()
            .join("packages")
            .join(name)
            .join(version)
            .join("bin");
        std::fs::create_dir_all(&bin).expect("Failed to seed tool package");
        write_executable(&bin.join(program), "#!/bin/sh\nexit 0\n");
    }

    /// Seed every tool the built-in templates require
    pub fn seed_template_tools(&self) {
        self.seed_package("cmake", "4.1.0");
        self.seed_package("ninja", "1.12.0");
        self.seed_package("cmake-utils", "4.0");
        self.seed_package("boost-ext-ut", "2.3.1");
    }

    /// Write a stub backend tool that records its invocations and succeeds.
    ///
    /// Returns the path to a profile file pointing `cmake_program` at it.
    pub fn stub_backend(&self) -> PathBuf {
        let stub = self.home.path().join("stub-cmake");
        write_executable(
            &stub,
            "#!/bin/sh\necho \"$@\" >> \"$(dirname \"$0\")/invocations.log\"\nexit 0\n",
        );

        let profile = self.home.path().join("profile.toml");
        std::fs::write(
            &profile,
            format!("[conf]\ncmake_program = \"{}\"\n", stub.display()),
        )
        .expect("Failed to write profile");
        profile
    }

    /// Invocations recorded by the stub backend, one line per call
    pub fn backend_invocations(&self) -> Vec<String> {
        let log = self.home.path().join("invocations.log");
        std::fs::read_to_string(log)
            .map(|c| c.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Run pkgforge in the recipe directory with the isolated home
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_in(&self.path(), args)
    }

    /// Run pkgforge in an arbitrary working directory with the isolated home
    pub fn run_in(&self, cwd: &std::path::Path, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pkgforge"));
        cmd.current_dir(cwd);
        cmd.env("PKGFORGE_HOME", self.home.path());
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute pkgforge")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a file and mark it executable
#[allow(dead_code)]
fn write_executable(path: &std::path::Path, content: &str) {
    std::fs::write(path, content).expect("Failed to write executable");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
    }
}

/// Sample recipe TOML for testing
#[allow(dead_code)]
pub const SAMPLE_RECIPE: &str = r#"
[package]
name = "geometry-kit"
version = "1.0"
license = "Apache-2.0"
url = "https://example.com/geometry-kit"
exports = ["src/*", "CMakeLists.txt", "LICENSE"]

[options]
shared = false
fPIC = true

[toolchain]
generator = "Ninja"

[package_info]
cmake_find_mode = "none"
builddirs = ["lib/cmake"]
"#;

/// Sample license text for testing
#[allow(dead_code)]
pub const SAMPLE_LICENSE: &str = "Copyright (c) the geometry-kit authors.\n";
