//! init → prepare → capture → recall → log

use crate::common::TestRepo;
use crate::nora;
use anyhow::Result;

#[test]
fn first_snapshot_roundtrip() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("foo.txt", "bar")?;

    let prepared = nora!(repo.path(), "prepare", "foo.txt").assert_success()?;
    assert!(prepared.contains_stdout("Prepared: foo.txt"));

    let captured = nora!(repo.path(), "capture", "first").assert_success()?;
    let id = captured.parse_snapshot_id().expect("snapshot id in output");
    assert_eq!(id.len(), 12);

    let snapshot = repo.read_json(&format!("memories/{}.json", id))?;
    assert_eq!(snapshot["message"], "first");
    assert_eq!(snapshot["parent"], "");
    assert_eq!(
        snapshot["files"]["foo.txt"],
        "62cdb7020ff920e5aa642c3d4066950dd1f01f4d"
    );

    let main = repo.read_json("timelines/main.json")?;
    assert_eq!(main["current"], id.as_str());
    assert_eq!(main["snapshots"], serde_json::json!([id]));

    let index = repo.read_json("index/prepared.json")?;
    assert_eq!(index, serde_json::json!({}));

    let recalled = nora!(repo.path(), "recall", &id).assert_success()?;
    assert!(recalled.contains_stdout(&format!("Snapshot: {}", id)));
    assert!(recalled.contains_stdout("Message: first"));
    assert!(recalled.contains_stdout("Parent: (none)"));
    assert!(recalled.contains_stdout("  foo.txt: 3 bytes"));

    Ok(())
}

#[test]
fn log_lists_newest_first() -> Result<()> {
    let repo = TestRepo::init()?;

    let mut ids = Vec::new();
    for i in 0..3 {
        repo.write("notes.txt", &format!("revision {}\n", i))?;
        nora!(repo.path(), "prepare", "notes.txt").assert_success()?;
        let out = nora!(repo.path(), "capture", &format!("rev {}", i)).assert_success()?;
        ids.push(out.parse_snapshot_id().expect("snapshot id in output"));
    }

    let log = nora!(repo.path(), "log").assert_success()?;
    assert!(log.contains_stdout("On timeline: main"));
    let order: Vec<usize> = ids
        .iter()
        .map(|id| log.stdout.find(id.as_str()).expect("id in log"))
        .collect();
    assert!(order[2] < order[1] && order[1] < order[0]);

    let limited = nora!(repo.path(), "log", "--limit", "1").assert_success()?;
    assert!(limited.contains_stdout(&ids[2]));
    assert!(!limited.contains_stdout(&ids[0]));

    let second = nora!(repo.path(), "recall", &ids[1]).assert_success()?;
    assert!(second.contains_stdout(&format!("Parent: {}", ids[0])));
    Ok(())
}

#[test]
fn capture_without_prepared_files_fails() -> Result<()> {
    let repo = TestRepo::init()?;

    let result = nora!(repo.path(), "capture", "empty").assert_failure()?;
    assert_eq!(result.exit_code, 1);
    assert!(result.contains_stderr("no files prepared for snapshot"));
    Ok(())
}

#[test]
fn recall_unknown_snapshot_fails() -> Result<()> {
    let repo = TestRepo::init()?;

    let result = nora!(repo.path(), "recall", "0123456789ab").assert_failure()?;
    assert!(result.contains_stderr("snapshot not found"));
    Ok(())
}

#[test]
fn snapshot_holds_only_prepared_files() -> Result<()> {
    let repo = TestRepo::init()?;
    repo.write("a.txt", "a1")?;
    repo.write("b.txt", "b1")?;
    nora!(repo.path(), "prepare", "a.txt", "b.txt").assert_success()?;
    nora!(repo.path(), "capture", "both").assert_success()?;

    repo.write("a.txt", "a22")?;
    nora!(repo.path(), "prepare", "a.txt").assert_success()?;
    let id = nora!(repo.path(), "capture", "only a")
        .assert_success()?
        .parse_snapshot_id()
        .expect("snapshot id in output");

    let recalled = nora!(repo.path(), "recall", &id).assert_success()?;
    assert!(recalled.contains_stdout("  a.txt: 3 bytes"));
    assert!(!recalled.contains_stdout("b.txt"));

    let snapshot = repo.read_json(&format!("memories/{}.json", id))?;
    let files: Vec<&String> = snapshot["files"].as_object().expect("files object").keys().collect();
    assert_eq!(files, vec!["a.txt"]);
    Ok(())
}
