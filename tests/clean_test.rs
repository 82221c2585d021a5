//! Integration tests for `pkgforge clean`

mod common;

use common::{TestProject, SAMPLE_LICENSE, SAMPLE_RECIPE};

#[test]
fn test_clean_removes_build_and_package_folders() {
    let project = TestProject::new();
    project.create_file("recipe.toml", SAMPLE_RECIPE);
    project.create_file("LICENSE", SAMPLE_LICENSE);
    let profile = project.stub_backend();

    assert!(project
        .run(&["build", "--profile", profile.to_str().unwrap()])
        .status
        .success());
    assert!(project
        .run(&["package", "--profile", profile.to_str().unwrap()])
        .status
        .success());
    assert!(project.file_exists("build/Release/generators/toolchain.cmake"));
    assert!(project.file_exists("package/Release/licenses/LICENSE"));

    let output = project.run(&["clean"]);
    assert!(
        output.status.success(),
        "clean should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(!project.file_exists("build/Release"));
    assert!(!project.file_exists("package/Release"));
    assert!(
        project.file_exists("recipe.toml"),
        "clean must not touch sources"
    );
    assert!(project.file_exists("LICENSE"));
}

#[test]
fn test_clean_is_idempotent() {
    let project = TestProject::new();
    project.create_file("recipe.toml", SAMPLE_RECIPE);

    assert!(project.run(&["clean"]).status.success());
    assert!(project.run(&["clean"]).status.success());
}

#[test]
fn test_clean_only_affects_current_build_type() {
    let project = TestProject::new();
    project.create_file("recipe.toml", SAMPLE_RECIPE);

    assert!(project.run(&["generate"]).status.success());
    assert!(project
        .run(&["generate", "-s", "build_type=Debug"])
        .status
        .success());

    assert!(project
        .run(&["clean", "-s", "build_type=Debug"])
        .status
        .success());

    assert!(!project.file_exists("build/Debug"));
    assert!(
        project.file_exists("build/Release/generators/toolchain.cmake"),
        "the Release tree belongs to a different invocation"
    );
}
