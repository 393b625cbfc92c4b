// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for syncing and running service tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

// =============================================================================
// EXIT CODES
// =============================================================================

/// > services = {A ok, B fails, C no manifest} -> A and B tested, exit 1
#[test]
fn mixed_services_exit_with_failure_code() {
    let project = Project::empty();
    project.service("a", 0).service("b", 1).plain_dir("c");

    project
        .cmd()
        .assert()
        .code(1)
        .stdout(predicates::str::contains("🧪 Testing a..."))
        .stdout(predicates::str::contains("🧪 Testing b..."))
        .stdout(predicates::str::contains("Testing c").not());

    assert!(project.synced());
    assert!(project.ran("a"));
    assert!(project.ran("b"));
    assert!(!project.ran("c"));
}

/// > empty services directory -> no tests, exit 0
#[test]
fn empty_services_dir_succeeds() {
    let project = Project::empty();

    project.cmd().assert().success().stdout(predicates::str::contains("No services found."));
    assert!(project.synced());
}

#[test]
fn all_passing_services_succeed() {
    let project = Project::empty();
    project.service("api", 0).service("web", 0);

    project
        .cmd()
        .assert()
        .success()
        .stdout(predicates::str::contains("2 passed, 0 failed"));
}

#[test]
fn exit_code_is_first_failure_in_order() {
    let project = Project::empty();
    project.service("a", 0).service("b", 3).service("c", 5);

    project.cmd().arg("--sorted").assert().code(3);
    assert!(project.ran("c"));
}

#[test]
fn sorted_order_from_config() {
    let project = Project::empty();
    project.config(&format!("order = \"sorted\"\n{}", shell_config(0)));
    project.service("b", 4).service("a", 6);

    project.cmd().assert().code(6);
}

// =============================================================================
// SYNC
// =============================================================================

/// > sync failure -> zero test invocations, nonzero exit
#[test]
fn sync_failure_is_fatal() {
    let project = Project::empty();
    project.config(&shell_config(9));
    project.service("a", 0);

    project
        .cmd()
        .assert()
        .code(1)
        .stderr(predicates::str::contains("dependency sync"))
        .stdout(predicates::str::contains("Testing").not());

    assert!(project.synced());
    assert!(!project.ran("a"));
}

#[test]
fn no_sync_skips_sync_command() {
    let project = Project::empty();
    project.config(&shell_config(9));
    project.service("a", 0);

    project.cmd().arg("--no-sync").assert().success();
    assert!(!project.synced());
    assert!(project.ran("a"));
}

#[test]
fn missing_test_tool_is_fatal() {
    let project = Project::empty();
    project.config("[sync]\ncommand = [\"true\"]\n[test]\ncommand = [\"svctest-no-such-runner\"]\n");
    project.service("a", 0);

    project
        .cmd()
        .assert()
        .code(1)
        .stderr(predicates::str::contains("failed to run `svctest-no-such-runner`"));
}

// =============================================================================
// SELECTION AND LISTING
// =============================================================================

#[test]
fn list_prints_services_without_running() {
    let project = Project::empty();
    project.service("web", 0).service("api", 0).plain_dir("docs");

    project.cmd().args(["--list", "--sorted"]).assert().success().stdout("api\nweb\n");
    assert!(!project.synced());
    assert!(!project.ran("api"));
}

#[test]
fn service_flag_limits_run() {
    let project = Project::empty();
    project.service("api", 1).service("web", 0);

    project.cmd().args(["-s", "web"]).assert().success();
    assert!(project.ran("web"));
    assert!(!project.ran("api"));
}

#[test]
fn unknown_service_is_config_error() {
    let project = Project::empty();
    project.service("api", 0);

    project
        .cmd()
        .args(["--service", "billing"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unknown service: billing"));
    assert!(!project.synced());
}

// =============================================================================
// ROOT AND CONFIG
// =============================================================================

#[test]
fn runs_from_service_subdirectory() {
    let project = Project::empty();
    project.service("api", 0);

    project.cmd().current_dir(project.service_path("api")).assert().success();
    assert!(project.synced());
}

#[test]
fn explicit_root_flag() {
    let project = Project::empty();
    project.service("api", 5);
    let elsewhere = Project::bare();

    // Config is read from the explicit root.
    elsewhere.cmd().arg("--root").arg(project.path()).assert().code(5);
    assert!(project.ran("api"));
}

#[test]
fn missing_root_is_config_error() {
    let project = Project::bare();

    project
        .cmd()
        .assert()
        .code(2)
        .stderr(predicates::str::contains("no repository root"));
}

#[test]
fn invalid_config_is_config_error() {
    let project = Project::empty();
    project.config("parallel = 4\n");

    project.cmd().assert().code(2).stderr(predicates::str::contains("invalid config"));
}

#[test]
fn config_flag_selects_services_dir() {
    let project = Project::bare();
    project.file(
        "ci/svctest.toml",
        &format!("services_dir = \"apps\"\n{}", shell_config(0)),
    );
    project.file("apps/one/pyproject.toml", "");
    project.file("apps/one/test.sh", "touch ran\nexit 0\n");

    project.cmd().args(["-C", "ci/svctest.toml"]).assert().success();
    assert!(project.path().join("apps/one/ran").exists());
}

// =============================================================================
// OUTPUT
// =============================================================================

#[test]
fn json_output_is_parseable() {
    let project = Project::empty();
    project.service("api", 0).service("web", 4);

    let output = project.cmd().args(["-o", "json", "--sorted"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["exit_code"], 4);
    assert_eq!(value["services"][0]["name"], "api");
    assert_eq!(value["services"][1]["passed"], false);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Testing web"));
}

#[test]
fn text_summary_marks_failures() {
    let project = Project::empty();
    project.service("api", 0).service("web", 4);

    project
        .cmd()
        .assert()
        .code(4)
        .stdout(predicates::str::contains("PASS api"))
        .stdout(predicates::str::contains("FAIL web (exit 4"));
}

#[test]
fn unwritable_stdout_keeps_aggregate_exit_code() {
    let project = Project::empty();
    project.service("a", 0).service("b", 5);
    let full = std::fs::OpenOptions::new().write(true).open("/dev/full").unwrap();

    let status = project.cmd().arg("--sorted").stdout(full).status().unwrap();
    assert_eq!(status.code(), Some(5));
    assert!(project.ran("a"));
    assert!(project.ran("b"));
}

#[test]
fn unwritable_stdout_keeps_aggregate_exit_code_for_json() {
    let project = Project::empty();
    project.service("a", 3);
    let full = std::fs::OpenOptions::new().write(true).open("/dev/full").unwrap();

    let status = project.cmd().args(["-o", "json"]).stdout(full).status().unwrap();
    assert_eq!(status.code(), Some(3));
}

// =============================================================================
// MISSING SERVICES DIRECTORY
// =============================================================================

fn project_without_services() -> Project {
    let project = Project::bare();
    project.config(&shell_config(0));
    project
}

#[test]
fn missing_services_dir_fails_before_sync() {
    let project = project_without_services();

    project
        .cmd()
        .assert()
        .code(2)
        .stderr(predicates::str::contains("services directory not found"));
    assert!(!project.synced());
}

#[test]
fn missing_services_dir_fails_before_sync_when_sorted() {
    let project = project_without_services();

    project.cmd().arg("--sorted").assert().code(2);
    assert!(!project.synced());
}

#[test]
fn missing_services_dir_fails_before_sync_with_service_filter() {
    let project = project_without_services();

    project.cmd().args(["-s", "api"]).assert().code(2);
    assert!(!project.synced());
}
