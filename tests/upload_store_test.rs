use bytes::Bytes;

use skagen::application::ports::UploadStore;
use skagen::infrastructure::storage::LocalUploadStore;

#[tokio::test]
async fn given_upload_when_stored_then_file_exists_with_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalUploadStore::new(dir.path().to_path_buf()).unwrap();

    let name = store
        .store("report.pdf", Bytes::from_static(b"pdf bytes"))
        .await
        .unwrap();

    let contents = std::fs::read(dir.path().join(&name)).unwrap();
    assert_eq!(contents, b"pdf bytes");
    assert!(name.ends_with("report.pdf"));
}

#[tokio::test]
async fn given_same_filename_twice_when_stored_then_names_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalUploadStore::new(dir.path().to_path_buf()).unwrap();

    let first = store
        .store("notes.pdf", Bytes::from_static(b"first"))
        .await
        .unwrap();
    let second = store
        .store("notes.pdf", Bytes::from_static(b"second"))
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(std::fs::read(dir.path().join(&first)).unwrap(), b"first");
    assert_eq!(std::fs::read(dir.path().join(&second)).unwrap(), b"second");
}

#[tokio::test]
async fn given_filename_with_path_separators_when_stored_then_name_is_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalUploadStore::new(dir.path().to_path_buf()).unwrap();

    let name = store
        .store("../../etc/passwd", Bytes::from_static(b"nope"))
        .await
        .unwrap();

    assert!(!name.contains('/'));
    assert!(dir.path().join(&name).exists());
}
