//! Repository discovery, re-initialization and locking

use crate::common::TestRepo;
use crate::nora;
use anyhow::Result;

#[test]
fn init_twice_fails() -> Result<()> {
    let repo = TestRepo::init()?;

    let result = nora!(repo.path(), "init").assert_failure()?;
    assert!(result.contains_stderr("already initialized"));
    Ok(())
}

#[test]
fn init_prints_location() -> Result<()> {
    let repo = TestRepo::empty()?;

    let out = nora!(repo.path(), "init").assert_success()?;
    assert!(out.contains_stdout("Initialized empty nora repository"));
    assert!(out.contains_stdout("On timeline: main"));
    assert!(repo.path().join(".nora/objects").is_dir());
    Ok(())
}

#[test]
fn commands_outside_repository_fail() -> Result<()> {
    let dir = TestRepo::empty()?;

    let result = nora!(dir.path(), "status").assert_failure()?;
    assert!(result.contains_stderr("Not a nora repository"));
    Ok(())
}

#[test]
fn paths_outside_repository_are_rejected() -> Result<()> {
    let repo = TestRepo::init()?;

    let result = nora!(repo.path(), "prepare", "../outside.txt").assert_failure()?;
    assert!(result.contains_stderr("outside the repository"));
    Ok(())
}

#[test]
fn logs_stay_off_stdout() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("foo.txt", "bar")?;

    let out = nora!(repo.path(), "prepare", "foo.txt")
        .env("RUST_LOG", "debug")
        .assert_success()?;
    assert_eq!(out.stdout, "Prepared: foo.txt\n");
    assert!(out.contains_stderr("prepared files"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn held_lock_blocks_mutating_commands() -> Result<()> {
    use nora_cli::locks::RepoLock;

    let repo = TestRepo::init()?;
    repo.write("foo.txt", "bar")?;

    let lock = RepoLock::acquire(&repo.path().join(".nora"))?;
    let blocked = nora!(repo.path(), "prepare", "foo.txt").assert_failure()?;
    assert!(blocked.contains_stderr("locked by another nora process"));

    drop(lock);
    nora!(repo.path(), "prepare", "foo.txt").assert_success()?;
    Ok(())
}

#[test]
fn log_and_diff_leave_state_files_untouched() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("foo.txt", "bar\n")?;
    nora!(repo.path(), "prepare", "foo.txt").assert_success()?;

    let config = repo.path().join(".nora/config/config.json");
    std::fs::remove_file(&config)?;

    let log = nora!(repo.path(), "log").assert_success()?;
    assert!(log.contains_stdout("On timeline: main"));
    nora!(repo.path(), "diff", "foo.txt").assert_success()?;
    assert!(!config.exists());

    // A locked command repairs it
    nora!(repo.path(), "status").assert_success()?;
    assert!(config.is_file());
    Ok(())
}
