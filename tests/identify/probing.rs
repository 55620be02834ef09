use std::fs;

use bytes::Bytes;
use typesift::identify::probe::{probe_view, InferProbe, SignatureProvider};
use typesift::io::{read_file_with_limit, IoLimits};
use typesift::identify;

use crate::common::zip_archive;

fn classify_bytes(data: Vec<u8>) -> typesift::Identification {
    identify(&probe_view(Bytes::from(data), &InferProbe))
}

#[test]
fn probed_zip_with_workbook_is_xlsx() {
    let zip = zip_archive(&[("[Content_Types].xml", b"<Types/>"), ("xl/workbook.xml", b"<workbook/>")]);
    let view = probe_view(Bytes::from(zip), &InferProbe);
    assert_eq!(view.children().len(), 2);
    // infer may already call this an Office package; either way it lands on xlsx
    assert_eq!(identify(&view).extension(), Some("xlsx"));
}

#[test]
fn probed_plain_zip() {
    let zip = zip_archive(&[("notes/readme.txt", b"hello")]);
    assert_eq!(classify_bytes(zip).extension(), Some("zip"));
}

#[test]
fn probed_epub_is_treated_as_zip() {
    let epub = zip_archive(&[("mimetype", b"application/epub+zip"), ("OEBPS/content.opf", b"<package/>")]);
    let view = probe_view(Bytes::from(epub), &InferProbe);
    assert_eq!(view.mime(), "application/zip");
    assert!(view.get_child("mimetype").is_some());
    assert_eq!(identify(&view).extension(), Some("zip"));
}

#[test]
fn probed_view_lists_jar_members() {
    let jar = zip_archive(&[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n")]);
    let view = probe_view(Bytes::from(jar), &InferProbe);
    assert!(view.get_child("META-INF/MANIFEST.MF").is_some());
    assert!(view.magic().contains("archive data"));
}

#[test]
fn probed_text_and_binary() {
    assert_eq!(classify_bytes(b"just a note\n".to_vec()).extension(), Some("txt"));
    let mut font = typesift::identify::disambiguate::TRUETYPE_SIGNATURE.to_vec();
    font.extend_from_slice(&[0u8; 32]);
    assert!(!InferProbe.probe(&font).magic.is_empty());
    assert_eq!(classify_bytes(font).extension(), Some("ttf"));
}

#[test]
fn probed_empty_file_is_unclassified() {
    assert!(classify_bytes(Vec::new()).is_unclassified());
}

#[test]
fn read_from_disk_under_limits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<!DOCTYPE html>\n<html><body>hello</body></html>\n").unwrap();
    let data = read_file_with_limit(&path, IoLimits::default()).unwrap();
    let id = identify(&probe_view(data, &InferProbe));
    assert_eq!(id.extension(), Some("html"));
}
