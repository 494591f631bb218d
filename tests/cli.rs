//! End-to-end tests for the runlike binary.
//!
//! Every test feeds inspect documents from `tests/fixtures` so no docker
//! daemon is needed.

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

const WEB_FLAGS: &str = concat!(
    "--restart=unless-stopped --env=APP_MODE=production --env=\"GREETING=hello world\" ",
    "--volume=/srv/www:/usr/share/nginx/html:ro --log-opt max-file=3 --log-opt max-size=10m ",
    "--label='com.example.team=web' --cap-add=CAP_NET_ADMIN --cap-drop=CAP_MKNOD ",
    "-p 8080:80 -p 127.0.0.1:8443:443 --add-host=db.internal:10.0.0.5 ",
    "--health-cmd=\"curl -f http://localhost/ || exit 1\" --health-interval=30s --health-retries=3 ",
    "--health-timeout=5s -d --cpus=1.5 --memory=268435456 --ulimit nofile=65536 nginx:1.25",
);

fn runlike() -> Command {
    cargo_bin_cmd!("runlike")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn container_json() -> String {
    std::fs::read_to_string(fixture("container.json")).unwrap()
}

fn from_stdin() -> Command {
    let mut cmd = runlike();
    cmd
        .arg("--stdin")
        .arg("--image-file")
        .arg(fixture("image.json"))
        .arg("--docker")
        .arg("/nonexistent/docker")
        .write_stdin(container_json());
    cmd
}

// =============================================================================
// Help & Usage
// =============================================================================

#[test]
fn help_flag_works() {
    runlike()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--no-labels"));
}

#[test]
fn no_target_is_usage_error() {
    runlike()
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("provide [container] or --stdin"));
}

#[test]
fn target_with_stdin_is_usage_error() {
    runlike()
        .args(["--stdin", "web"])
        .write_stdin(container_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not both"));
}

// =============================================================================
// Reconstruction
// =============================================================================

#[test]
fn reconstructs_from_stdin() {
    from_stdin()
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("--name=web {}\n", WEB_FLAGS)));
}

#[test]
fn no_name_drops_name_flag() {
    from_stdin()
        .arg("--no-name")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", WEB_FLAGS)));
}

#[test]
fn no_labels_drops_labels() {
    from_stdin()
        .arg("--no-labels")
        .assert()
        .success()
        .stdout(predicate::str::contains("--label").not())
        .stdout(predicate::str::contains("--cap-add=CAP_NET_ADMIN"));
}

#[test]
fn pretty_puts_one_flag_per_line() {
    let assert = from_stdin().arg("-p").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.first(), Some(&"--name=web \\"));
    assert_eq!(lines.get(1), Some(&"\t--restart=unless-stopped \\"));
    assert_eq!(lines.last(), Some(&"\tnginx:1.25"));
}

#[test]
fn output_is_stable() {
    let first = from_stdin().output().unwrap();
    let second = from_stdin().output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn several_containers_are_rejected() {
    let doc = r#"[{"Name": "/a"}, {"Name": "/b"}]"#;
    runlike()
        .args(["--stdin", "--image-file"])
        .arg(fixture("image.json"))
        .write_stdin(doc)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("only 1 container"));
}

#[test]
fn malformed_stdin_is_rejected() {
    runlike()
        .args(["--stdin", "--image-file"])
        .arg(fixture("image.json"))
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode"));
}

#[test]
fn missing_docker_is_reported() {
    runlike()
        .args(["--docker", "/nonexistent/docker", "web"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to inspect"));
}
