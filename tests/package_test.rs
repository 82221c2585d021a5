//! Integration tests for `pkgforge package`

mod common;

use common::{TestProject, SAMPLE_LICENSE, SAMPLE_RECIPE};

#[test]
fn test_package_copies_license() {
    let project = TestProject::new();
    project.create_file("recipe.toml", SAMPLE_RECIPE);
    project.create_file("LICENSE", SAMPLE_LICENSE);
    let profile = project.stub_backend();

    let output = project.run(&["package", "--profile", profile.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "package should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(
        project.file_exists("package/Release/licenses/LICENSE"),
        "package folder must contain licenses/LICENSE"
    );
    assert_eq!(
        project.read_file("package/Release/licenses/LICENSE"),
        SAMPLE_LICENSE,
        "license copy must be unmodified"
    );
}

#[test]
fn test_package_fails_without_license() {
    let project = TestProject::new();
    project.create_file("recipe.toml", SAMPLE_RECIPE);
    let profile = project.stub_backend();

    let output = project.run(&["package", "--profile", profile.to_str().unwrap()]);
    assert!(
        !output.status.success(),
        "package must fail when the license file is absent"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("License file not found"),
        "should name the missing file: {stderr}"
    );
    assert!(
        !project.file_exists("package/Release/licenses/LICENSE"),
        "nothing may be silently packaged"
    );
}

#[test]
fn test_package_invokes_install() {
    let project = TestProject::new();
    project.create_file("recipe.toml", SAMPLE_RECIPE);
    project.create_file("LICENSE", SAMPLE_LICENSE);
    let profile = project.stub_backend();

    assert!(project
        .run(&["package", "--profile", profile.to_str().unwrap()])
        .status
        .success());

    let invocations = project.backend_invocations();
    assert_eq!(invocations.len(), 1);
    assert!(
        invocations[0].contains("--install") && invocations[0].contains("--prefix"),
        "install call: {}",
        invocations[0]
    );
}

#[test]
fn test_package_publishes_consumer_info() {
    let project = TestProject::new();
    project.create_file("recipe.toml", SAMPLE_RECIPE);
    project.create_file("LICENSE", SAMPLE_LICENSE);
    let profile = project.stub_backend();

    assert!(project
        .run(&["package", "--profile", profile.to_str().unwrap()])
        .status
        .success());

    let info = project.read_file("package/Release/pkginfo.toml");
    assert!(info.contains("name = \"geometry-kit\""));
    assert!(info.contains("cmake_find_mode = \"none\""));
    assert!(info.contains("lib/cmake"));
}
