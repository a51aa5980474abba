// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end tests driving the `gi` binary, mostly in dry-run mode so no
//! git state is touched.

use assert_cmd::prelude::{CommandCargoExt, OutputAssertExt};
use assert_fs::prelude::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use std::process::Command;

type TestResult = Result<(), Box<dyn std::error::Error>>;

// A `gi` command shielded from the developer's own startup file and git
// configuration. A fixed git identity keeps identity prompts out of tests.
fn gi(dir: &assert_fs::TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let gitconfig = dir.child("test-gitconfig");
    if !gitconfig.path().exists() {
        gitconfig.write_str("[user]\n\tname = Test User\n\temail = test@example.org\n")?;
    }

    let mut cmd = Command::cargo_bin("gi")?;
    cmd.current_dir(dir.path())
        .env("GI_STARTUP", "")
        .env("XDG_CONFIG_HOME", dir.child("xdg-config").path())
        .env("GIT_CONFIG_GLOBAL", gitconfig.path())
        .env("GIT_CONFIG_NOSYSTEM", "1");
    Ok(cmd)
}

fn git_init(dir: &assert_fs::TempDir) -> TestResult {
    Command::new("git")
        .current_dir(dir.path())
        .args(["init", "-q"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn dry_run_echoes_the_git_command_without_executing() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    git_init(&dir)?;

    gi(&dir)?
        .args(["-n", "branch", "br7625"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[gi]$ git branch br7625"));

    let listed = Command::new("git")
        .current_dir(dir.path())
        .args(["branch", "--list", "br7625"])
        .output()?;
    assert!(listed.stdout.is_empty());

    Ok(())
}

#[test]
fn aliases_route_to_their_actions() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    git_init(&dir)?;

    gi(&dir)?
        .args(["-n", "sw", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[gi]$ git checkout main"));

    Ok(())
}

#[test]
fn missing_action_runs_the_default_one() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    git_init(&dir)?;

    gi(&dir)?
        .arg("-n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[gi]$ git status -sb ."));

    Ok(())
}

#[test]
fn quiet_mode_suppresses_echoback() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    git_init(&dir)?;

    gi(&dir)?
        .args(["-n", "-q", "branch", "br1"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn unknown_action_is_reported() -> TestResult {
    let dir = assert_fs::TempDir::new()?;

    gi(&dir)?
        .arg("no:such:action")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no:such:action: Action not found."));

    Ok(())
}

#[test]
fn startup_file_sets_prompt_and_user_aliases() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    git_init(&dir)?;
    let startup = dir.child("startup.toml");
    startup.write_str(
        r#"
[config]
prompt = "(gi) "

[alias]
b = ["branch:create"]
"#,
    )?;

    gi(&dir)?
        .env("GI_STARTUP", startup.path())
        .args(["-n", "b", "topic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(gi) git branch topic"));

    Ok(())
}

#[test]
fn missing_startup_file_is_reported() -> TestResult {
    let dir = assert_fs::TempDir::new()?;

    gi(&dir)?
        .env("GI_STARTUP", dir.child("no-such.toml").path())
        .arg("-n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Setup file specified but not exist."));

    Ok(())
}

#[test]
fn startupfile_action_prints_the_template() -> TestResult {
    let dir = assert_fs::TempDir::new()?;

    gi(&dir)?
        .arg("misc:startupfile")
        .assert()
        .success()
        .stdout(predicate::str::contains("[config]"))
        .stdout(predicate::str::contains("#default_action"));

    Ok(())
}

#[test]
fn startupfile_action_generates_a_file_once() -> TestResult {
    let dir = assert_fs::TempDir::new()?;

    gi(&dir)?
        .args(["misc:startupfile", "startup.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] startup.toml generated."));
    assert!(dir.child("startup.toml").path().is_file());

    gi(&dir)?
        .args(["misc:startupfile", "startup.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File already exists"));

    Ok(())
}

#[test]
fn tag_creation_rejects_the_remote_option() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    git_init(&dir)?;

    gi(&dir)?
        .args(["-n", "tag", "v1.0", "HEAD", "-r"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "not available for creating tag",
        ));

    Ok(())
}

#[test]
fn revert_requires_a_commit_or_a_count() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    git_init(&dir)?;

    gi(&dir)?
        .args(["-n", "commit:revert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("`-n <N>` option required."));

    Ok(())
}

#[test]
fn action_listing_names_every_category() -> TestResult {
    let dir = assert_fs::TempDir::new()?;

    gi(&dir)?
        .arg("-l")
        .assert()
        .success()
        .stdout(predicate::str::contains("branch:join"))
        .stdout(predicate::str::contains("history:edit:start"))
        .stdout(predicate::str::contains("misc:startupfile"));

    Ok(())
}

#[test]
fn category_abbreviations_expand() -> TestResult {
    let dir = assert_fs::TempDir::new()?;
    git_init(&dir)?;

    gi(&dir)?
        .args(["-n", "g:show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[gi]$ git diff --cached"));

    Ok(())
}

#[test]
fn clone_expands_repository_shorthand() -> TestResult {
    let dir = assert_fs::TempDir::new()?;

    gi(&dir)?
        .args(["-n", "repo:clone", "github:user1/repo1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[gi]$ git clone git@github.com:user1/repo1.git",
        ));

    Ok(())
}
