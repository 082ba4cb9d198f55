//! prepare / forget / diff / status

use crate::common::TestRepo;
use crate::nora;
use anyhow::Result;

#[test]
fn diff_before_first_snapshot_is_all_added() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("foo.txt", "one\ntwo\n")?;
    nora!(repo.path(), "prepare", "foo.txt").assert_success()?;

    let diff = nora!(repo.path(), "diff", "foo.txt").assert_success()?;
    assert_eq!(diff.stdout, "+ one\n+ two\n+ \n");
    Ok(())
}

#[test]
fn diff_against_current_snapshot() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("f.txt", "a\nb\nc\n")?;
    nora!(repo.path(), "prepare", "f.txt").assert_success()?;
    nora!(repo.path(), "capture", "base").assert_success()?;

    repo.write("f.txt", "a\nx\nc\n")?;
    nora!(repo.path(), "prepare", "f.txt").assert_success()?;

    let diff = nora!(repo.path(), "diff", "f.txt").assert_success()?;
    assert_eq!(diff.stdout, "  a\n- b\n+ x\n  c\n  \n");
    Ok(())
}

#[test]
fn diff_shows_final_newline_change() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("f.txt", "a\nb")?;
    nora!(repo.path(), "prepare", "f.txt").assert_success()?;
    nora!(repo.path(), "capture", "base").assert_success()?;

    repo.write("f.txt", "a\nb\n")?;
    nora!(repo.path(), "prepare", "f.txt").assert_success()?;

    let diff = nora!(repo.path(), "diff", "f.txt").assert_success()?;
    assert_eq!(diff.stdout, "  a\n  b\n+ \n");

    let status = nora!(repo.path(), "status").assert_success()?;
    assert!(status.contains_stdout("f.txt: modified (prepared)"));
    Ok(())
}

#[test]
fn diff_requires_prepared_file() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("foo.txt", "bar")?;

    let result = nora!(repo.path(), "diff", "foo.txt").assert_failure()?;
    assert!(result.contains_stderr("file not prepared: foo.txt"));
    Ok(())
}

#[test]
fn status_groups_changes() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("tracked.txt", "v1")?;
    nora!(repo.path(), "prepare", "tracked.txt").assert_success()?;
    nora!(repo.path(), "capture", "base").assert_success()?;

    repo.write("tracked.txt", "v2")?;
    repo.write("new.txt", "new")?;
    repo.write("staged.txt", "staged")?;
    nora!(repo.path(), "prepare", "staged.txt").assert_success()?;

    let status = nora!(repo.path(), "status").assert_success()?;
    let stdout = &status.stdout;

    assert!(stdout.starts_with("On timeline: main\n"));
    let prepared_at = stdout.find("Changes prepared for snapshot:").expect("prepared header");
    let unprepared_at = stdout
        .find("Changes not prepared for snapshot:")
        .expect("unprepared header");

    let staged_at = stdout.find("staged.txt: added (prepared)").expect("staged line");
    assert!(prepared_at < staged_at && staged_at < unprepared_at);

    assert!(stdout.find("new.txt: untracked").expect("untracked line") > unprepared_at);
    assert!(stdout.find("tracked.txt: modified").expect("modified line") > unprepared_at);
    Ok(())
}

#[test]
fn status_on_clean_tree() -> Result<()> {
    let repo = TestRepo::init()?;

    let status = nora!(repo.path(), "status").assert_success()?;
    assert!(status.contains_stdout("  no changes prepared"));
    assert!(status.contains_stdout("  working directory clean"));
    Ok(())
}

#[test]
fn prepare_dot_stages_only_changes() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("same.txt", "same")?;
    repo.write("src/lib.rs", "v1")?;
    nora!(repo.path(), "prepare", ".").assert_success()?;
    nora!(repo.path(), "capture", "base").assert_success()?;

    repo.write("src/lib.rs", "v2")?;
    repo.write("src/new.rs", "new")?;
    repo.write("scratch.tmp", "ignored")?;

    let out = nora!(repo.path(), "prepare", ".").assert_success()?;
    assert!(out.contains_stdout("Prepared: src/lib.rs"));
    assert!(out.contains_stdout("Prepared: src/new.rs"));
    assert!(!out.contains_stdout("same.txt"));
    assert!(!out.contains_stdout("scratch.tmp"));

    let index = repo.read_json("index/prepared.json")?;
    let keys: Vec<&String> = index.as_object().expect("index object").keys().collect();
    assert_eq!(keys, vec!["src/lib.rs", "src/new.rs"]);
    Ok(())
}

#[test]
fn prepare_from_subdirectory_uses_repo_relative_paths() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("src/main.rs", "fn main() {}")?;

    nora!(repo.path().join("src"), "prepare", "main.rs").assert_success()?;

    let index = repo.read_json("index/prepared.json")?;
    assert!(index.get("src/main.rs").is_some());
    Ok(())
}

#[test]
fn prepare_skips_ignored_files() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write(".noraignore", "*.log\n")?;
    repo.write("debug.log", "noise")?;

    let out = nora!(repo.path(), "prepare", "debug.log").assert_success()?;
    assert!(out.contains_stdout("Skipping ignored file: debug.log"));

    let status = nora!(repo.path(), "status").assert_success()?;
    assert!(!status.contains_stdout("debug.log"));
    assert!(!status.contains_stdout(".noraignore"));
    Ok(())
}

#[test]
fn forget_unstages() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("a.txt", "a")?;
    repo.write("b.txt", "b")?;
    nora!(repo.path(), "prepare", "a.txt", "b.txt").assert_success()?;

    let out = nora!(repo.path(), "forget", "b.txt").assert_success()?;
    assert!(out.contains_stdout("Forgot 1 prepared file(s)"));

    let index = repo.read_json("index/prepared.json")?;
    assert!(index.get("a.txt").is_some());
    assert!(index.get("b.txt").is_none());
    Ok(())
}

#[test]
fn prepare_missing_file_fails() -> Result<()> {
    let repo = TestRepo::init()?;

    let result = nora!(repo.path(), "prepare", "missing.txt").assert_failure()?;
    assert!(result.contains_stderr("missing.txt"));
    Ok(())
}
