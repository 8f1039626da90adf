use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use bucket_relay_core::contract::{MockBlobStore, NewBlob, StoreError};
use bucket_relay_core::cycle::scan_and_upload;
use bucket_relay_core::error::RelayError;

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("writing fixture file should succeed");
    path
}

fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}

#[tokio::test]
async fn partitions_files_by_upload_outcome() {
    let watch = tempdir().expect("tempdir");
    let a = write_file(watch.path(), "a.json", br#"{"id":1}"#);
    let b = write_file(watch.path(), "b.json", br#"{"id":2}"#);

    let mut store = MockBlobStore::new();
    store.expect_put_blob().returning(|req: NewBlob<'_>| {
        if req.name == "b.json" {
            Err(StoreError::Rejected {
                name: req.name.to_string(),
                reason: "simulated rejection".to_string(),
            })
        } else {
            Ok(())
        }
    });

    let outcome = scan_and_upload(watch.path(), ".json", "exports", &store)
        .await
        .expect("cycle should succeed despite the per-file failure");

    assert_eq!(outcome.uploaded, vec![a]);
    assert_eq!(outcome.failed, vec![b]);
}

#[tokio::test]
async fn single_failure_never_aborts_the_remaining_files() {
    let watch = tempdir().expect("tempdir");
    let mut all = Vec::new();
    for i in 0..4 {
        all.push(write_file(
            watch.path(),
            &format!("f{i}.json"),
            format!("{{\"id\":{i}}}").as_bytes(),
        ));
    }
    let failing = watch.path().join("f2.json");

    let mut store = MockBlobStore::new();
    store.expect_put_blob().returning(|req: NewBlob<'_>| {
        if req.name == "f2.json" {
            Err(StoreError::Rejected {
                name: req.name.to_string(),
                reason: "simulated rejection".to_string(),
            })
        } else {
            Ok(())
        }
    });

    let outcome = scan_and_upload(watch.path(), ".json", "exports", &store)
        .await
        .expect("cycle should succeed");

    assert_eq!(outcome.failed, vec![failing.clone()]);
    let expected_uploaded: Vec<PathBuf> =
        all.into_iter().filter(|p| *p != failing).collect();
    assert_eq!(
        sorted(outcome.uploaded),
        sorted(expected_uploaded),
        "every other file should still be uploaded"
    );
}

#[tokio::test]
async fn uploads_blob_under_the_files_base_name_with_its_bytes() {
    let watch = tempdir().expect("tempdir");
    write_file(watch.path(), "report.json", br#"{"rows":42}"#);

    let mut store = MockBlobStore::new();
    store
        .expect_put_blob()
        .times(1)
        .returning(|req: NewBlob<'_>| {
            assert_eq!(req.container, "exports");
            assert_eq!(req.name, "report.json");
            assert_eq!(req.content, br#"{"rows":42}"#);
            Ok(())
        });

    scan_and_upload(watch.path(), ".json", "exports", &store)
        .await
        .expect("cycle should succeed");
}

#[tokio::test]
async fn ignores_files_that_do_not_match_the_suffix() {
    let watch = tempdir().expect("tempdir");
    let notes = write_file(watch.path(), "notes.txt", b"not a candidate");
    // Suffix match is exact, not substring containment.
    let backup = write_file(watch.path(), "archive.json.bak", b"also not a candidate");

    // No expectations: any put_blob call panics the mock.
    let store = MockBlobStore::new();

    let outcome = scan_and_upload(watch.path(), ".json", "exports", &store)
        .await
        .expect("cycle should succeed");

    assert!(outcome.is_empty());
    assert!(notes.exists(), "non-matching file must be left untouched");
    assert!(backup.exists(), "near-miss suffix must be left untouched");
}

#[tokio::test]
async fn skips_directories_even_when_their_names_match() {
    let watch = tempdir().expect("tempdir");
    let nested = watch.path().join("nested.json");
    fs::create_dir(&nested).expect("create nested dir");
    write_file(&nested, "inner.json", b"{}");

    let store = MockBlobStore::new();

    let outcome = scan_and_upload(watch.path(), ".json", "exports", &store)
        .await
        .expect("cycle should succeed");

    assert!(outcome.is_empty(), "listing is non-recursive");
    assert!(nested.join("inner.json").exists());
}

#[tokio::test]
async fn lost_session_aborts_the_cycle_as_fatal() {
    let watch = tempdir().expect("tempdir");
    let orphan = write_file(watch.path(), "a.json", b"{}");

    let mut store = MockBlobStore::new();
    store.expect_put_blob().returning(|_| {
        Err(StoreError::SessionLost {
            reason: "simulated credential refusal".to_string(),
        })
    });

    let err = scan_and_upload(watch.path(), ".json", "exports", &store)
        .await
        .expect_err("cycle must abort when the session dies");

    assert!(matches!(err, RelayError::SessionLost { .. }));
    assert!(err.is_fatal());
    assert!(
        orphan.exists(),
        "aborted cycle must leave files in the watch directory for restart"
    );
}

#[tokio::test]
async fn unreadable_watch_directory_is_an_error_not_zero_files() {
    let base = tempdir().expect("tempdir");
    let missing = base.path().join("gone");

    let store = MockBlobStore::new();

    let err = scan_and_upload(&missing, ".json", "exports", &store)
        .await
        .expect_err("listing failure must propagate");

    assert!(matches!(err, RelayError::ListWatchDir { .. }));
    assert!(!err.is_fatal(), "listing failures are retried next interval");
}
