use std::fs;
use std::path::Path;

use typesift::config::UnpackConfig;
use typesift::hashing::sha256_digest;
use typesift::identify::probe::InferProbe;
use typesift::unpack::{DuplicateSet, EmlUnpacker, ExtensionPicker, Unpacker};
use typesift::{identify, Error};

use crate::common::message_with_attachment;

// "MZ" followed by a few header bytes
const MZ_BASE64: &str = "TVqQAAMAAAAEAAAA//8AALgAAAAAAAAAQAAAAAAAAAA=";

#[test]
fn one_attachment_then_duplicate_on_rerun() {
    let msg = message_with_attachment("invoice.exe", MZ_BASE64);
    let unpacker = EmlUnpacker::default();
    let mut seen = DuplicateSet::new();

    let first = unpacker.unpack(msg.as_bytes(), &mut seen).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].filename.as_deref(), Some("invoice.exe"));
    assert!(!first[0].duplicate);
    assert_eq!(first[0].hashes.sha256, sha256_digest(&first[0].contents));

    let second = unpacker.unpack(msg.as_bytes(), &mut seen).unwrap();
    assert_eq!(second.len(), 1);
    assert!(second[0].duplicate);
    assert_eq!(second[0].contents, first[0].contents);
}

#[test]
fn caller_supplied_digests_mark_duplicates() {
    let msg = message_with_attachment("a.bin", MZ_BASE64);
    let digest = {
        let mut scratch = DuplicateSet::new();
        EmlUnpacker::default().unpack(msg.as_bytes(), &mut scratch).unwrap()[0]
            .hashes
            .sha256
            .clone()
    };
    let mut seen: DuplicateSet = [digest].into_iter().collect();
    let entries = EmlUnpacker::default().unpack(msg.as_bytes(), &mut seen).unwrap();
    assert!(entries[0].duplicate);
    assert_eq!(seen.len(), 1);
}

#[test]
fn custom_whitelist_drops_attachment() {
    let cfg = UnpackConfig {
        whitelisted_content_types: vec!["text/plain".into(), "application/octet-stream".into()],
        ..UnpackConfig::default()
    };
    let msg = message_with_attachment("a.bin", MZ_BASE64);
    let entries = EmlUnpacker::new(&cfg)
        .unpack(msg.as_bytes(), &mut DuplicateSet::new())
        .unwrap();
    assert!(entries.is_empty());
}

#[test]
fn attachments_can_be_classified() {
    let msg = message_with_attachment("notes.txt.js", "dmFyIGEgPSAxOyBmdW5jdGlvbiBmKCkgeyBldmFsKGIpOyByZXR1cm4gdHJ1ZSB8fCBmYWxzZSB8fCBudWxsOyB9");
    let entries = EmlUnpacker::default()
        .unpack(msg.as_bytes(), &mut DuplicateSet::new())
        .unwrap();
    let id = identify(&entries[0].to_file_view(&InferProbe));
    assert_eq!(id.extension(), Some("js"));
}

#[test]
fn picker_routes_eml_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Message.EML");
    fs::write(&path, message_with_attachment("x.bin", MZ_BASE64)).unwrap();
    let unpacker = EmlUnpacker::default();
    assert!(unpacker.handles(&path, &ExtensionPicker::default()));
    assert!(!unpacker.handles(Path::new("x.msg"), &ExtensionPicker::default()));
}

#[test]
fn error_variants_are_typed() {
    let err = Error::Email("broken header".into());
    assert!(err.to_string().contains("broken header"));
}
