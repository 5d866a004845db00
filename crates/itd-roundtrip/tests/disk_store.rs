use itd_roundtrip::xml::XmlElement;
use itd_roundtrip::{DiskFileStore, FileManager, FileStore, XmlRoundTripFileManager};
use itd_roundtrip::xml::XmlDocument;
use std::path::Path;
use std::sync::Arc;

#[test]
fn deferred_writes_reach_disk_on_commit() {
    let dir = tempfile::tempdir().unwrap();
    let files = FileManager::new(Arc::new(DiskFileStore::new(dir.path())));
    let path = Path::new("src/main/java/com/foo/Person_Roo_Editor.aj");

    files
        .create_or_update_text_file_if_required(path, "privileged aspect X {}\n", "editor", false)
        .unwrap();
    assert!(!dir.path().join(path).exists());
    assert_eq!(files.commit().unwrap(), 1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join(path)).unwrap(),
        "privileged aspect X {}\n"
    );

    files.delete(path, "stale", false).unwrap();
    files.commit().unwrap();
    assert!(!dir.path().join(path).exists());
}

#[test]
fn xml_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn FileStore> = Arc::new(DiskFileStore::new(dir.path()));
    let manager = XmlRoundTripFileManager::new(Arc::new(FileManager::new(store)));
    let path = Path::new("src/main/webapp/WEB-INF/views/people/show.jspx");
    let doc = XmlDocument::new(
        XmlElement::new("page:show")
            .with_attribute("id", "ps_person")
            .with_unique_key(),
    );

    assert!(manager.write_to_disk_if_necessary(path, &doc).unwrap());
    let written = std::fs::read_to_string(dir.path().join(path)).unwrap();
    assert!(written.starts_with("<?xml"));
    assert!(!manager.write_to_disk_if_necessary(path, &doc).unwrap());
    assert_eq!(std::fs::read_to_string(dir.path().join(path)).unwrap(), written);
}

#[test]
fn malformed_existing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.jspx"), "<a><b></a>").unwrap();
    let store: Arc<dyn FileStore> = Arc::new(DiskFileStore::new(dir.path()));
    let manager = XmlRoundTripFileManager::new(Arc::new(FileManager::new(store)));
    let doc = XmlDocument::new(XmlElement::new("a"));
    assert!(manager
        .write_to_disk_if_necessary(Path::new("broken.jspx"), &doc)
        .is_err());
}
