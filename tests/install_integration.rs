//! End-to-end install tests
//!
//! Drives the real binary against a graph snapshot whose address links
//! point at local git repositories.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn kcm_cmd() -> Command {
    Command::cargo_bin("kcm").unwrap()
}

/// Snapshot with root `x` depending on `y`, both reusable specifications
/// with one alternative address each pointing at a local git repository.
fn two_component_graph(workspace: &common::TestWorkspace) -> std::path::PathBuf {
    let repo_x = workspace.create_source_repo("x-src", &[("specification.scs", "x spec")]);
    let repo_y = workspace.create_source_repo("y-src", &[("specification.scs", "y spec")]);

    workspace.write_graph(&format!(
        "components:\n  \
         x:\n    kind: reusable-specification\n    reusable: true\n    \
         installation-method: local\n    dependencies: [y]\n    addresses:\n      \
         - primary: true\n        links:\n          - url: {}\n            scheme: github_url\n    \
         install-scripts:\n      - \"touch installed.flag\"\n  \
         y:\n    kind: reusable-specification\n    reusable: true\n    \
         installation-method: local\n    addresses:\n      \
         - primary: true\n        links:\n          - url: {}\n            scheme: github_url\n    \
         install-scripts:\n      - \"touch installed.flag\"\n",
        repo_x.display(),
        repo_y.display(),
    ))
}

#[test]
fn test_install_resolves_downloads_and_installs_in_order() {
    let workspace = common::TestWorkspace::new();
    let graph = two_component_graph(&workspace);
    let downloads = workspace.path.join("downloads");

    kcm_cmd()
        .current_dir(&workspace.path)
        .args(["install", "x", "--graph"])
        .arg(&graph)
        .arg("--dir")
        .arg(&downloads)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 component(s) installed"));

    // Each component got its own directory with the fetched specification
    assert_eq!(
        workspace.read_file("downloads/x/specification.scs"),
        "x spec"
    );
    assert_eq!(
        workspace.read_file("downloads/y/specification.scs"),
        "y spec"
    );

    // Install scripts ran inside the component directories
    assert!(workspace.file_exists("downloads/x/installed.flag"));
    assert!(workspace.file_exists("downloads/y/installed.flag"));
}

#[test]
fn test_install_json_report() {
    let workspace = common::TestWorkspace::new();
    let graph = two_component_graph(&workspace);
    let downloads = workspace.path.join("downloads");

    kcm_cmd()
        .current_dir(&workspace.path)
        .args(["install", "x", "--json", "--graph"])
        .arg(&graph)
        .arg("--dir")
        .arg(&downloads)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":\"y\""))
        .stdout(predicate::str::contains("\"state\":\"installed\""));
}

#[test]
fn test_install_cycle_aborts_without_filesystem_effects() {
    let workspace = common::TestWorkspace::new();
    let graph = workspace.write_graph(
        "components:\n  x:\n    dependencies: [y]\n  y:\n    dependencies: [x]\n",
    );
    let downloads = workspace.path.join("downloads");

    kcm_cmd()
        .current_dir(&workspace.path)
        .args(["install", "x", "--graph"])
        .arg(&graph)
        .arg("--dir")
        .arg(&downloads)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cyclic dependency"));

    assert!(
        !downloads.exists(),
        "cycle abort must not create the download directory"
    );
}

#[test]
fn test_install_fail_fast_stops_after_first_failure() {
    let workspace = common::TestWorkspace::new();
    let repo_x = workspace.create_source_repo("x-src", &[("specification.scs", "x spec")]);

    // y has an unsupported hosting scheme and resolves before x
    let graph = workspace.write_graph(&format!(
        "components:\n  \
         x:\n    kind: reusable-specification\n    reusable: true\n    \
         installation-method: local\n    dependencies: [y]\n    addresses:\n      \
         - primary: true\n        links:\n          - url: {}\n            scheme: github_url\n  \
         y:\n    kind: repository\n    address:\n      links:\n        \
         - url: ftp://example.com/y\n          scheme: ftp_url\n",
        repo_x.display(),
    ));
    let downloads = workspace.path.join("downloads");

    kcm_cmd()
        .current_dir(&workspace.path)
        .args(["install", "x", "--graph"])
        .arg(&graph)
        .arg("--dir")
        .arg(&downloads)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unsupported hosting scheme"));

    // x was never attempted under fail-fast
    assert!(!workspace.file_exists("downloads/x/specification.scs"));
}

#[test]
fn test_install_keep_going_attempts_remaining_components() {
    let workspace = common::TestWorkspace::new();
    let repo_x = workspace.create_source_repo("x-src", &[("specification.scs", "x spec")]);

    let graph = workspace.write_graph(&format!(
        "components:\n  \
         x:\n    kind: reusable-specification\n    reusable: true\n    \
         installation-method: local\n    dependencies: [y]\n    addresses:\n      \
         - primary: true\n        links:\n          - url: {}\n            scheme: github_url\n  \
         y:\n    kind: repository\n    address:\n      links:\n        \
         - url: ftp://example.com/y\n          scheme: ftp_url\n",
        repo_x.display(),
    ));
    let downloads = workspace.path.join("downloads");

    kcm_cmd()
        .current_dir(&workspace.path)
        .args(["install", "x", "--keep-going", "--graph"])
        .arg(&graph)
        .arg("--dir")
        .arg(&downloads)
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 component(s) failed"));

    // x was still fetched despite y failing
    assert_eq!(
        workspace.read_file("downloads/x/specification.scs"),
        "x spec"
    );
}

#[test]
fn test_install_component_without_install_scripts_is_noop() {
    let workspace = common::TestWorkspace::new();
    let repo = workspace.create_source_repo("z-src", &[("specification.scs", "z spec")]);

    let graph = workspace.write_graph(&format!(
        "components:\n  z:\n    kind: reusable-specification\n    reusable: true\n    \
         installation-method: local\n    addresses:\n      \
         - primary: true\n        links:\n          - url: {}\n            scheme: github_url\n",
        repo.display(),
    ));
    let downloads = workspace.path.join("downloads");

    kcm_cmd()
        .current_dir(&workspace.path)
        .args(["install", "z", "--graph"])
        .arg(&graph)
        .arg("--dir")
        .arg(&downloads)
        .assert()
        .success();

    assert_eq!(
        workspace.read_file("downloads/z/specification.scs"),
        "z spec"
    );
}
