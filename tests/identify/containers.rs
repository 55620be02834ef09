use typesift::identify::containers::zip_entry_names;

use crate::common::zip_archive;

#[test]
fn lists_members_in_order() {
    let zip = zip_archive(&[("[Content_Types].xml", b"<Types/>"), ("xl/workbook.xml", b"<workbook/>")]);
    assert_eq!(zip_entry_names(&zip, 100), vec!["[Content_Types].xml", "xl/workbook.xml"]);
}

#[test]
fn respects_entry_cap() {
    let zip = zip_archive(&[("a", b"1"), ("b", b"2"), ("c", b"3")]);
    assert_eq!(zip_entry_names(&zip, 2), vec!["a", "b"]);
}

#[test]
fn prepended_stub_is_tolerated() {
    let mut data = b"MZ self-extractor stub".to_vec();
    data.extend(zip_archive(&[("AndroidManifest.xml", b"\x03\x00")]));
    assert_eq!(zip_entry_names(&data, 10), vec!["AndroidManifest.xml"]);
}

#[test]
fn truncated_archive_yields_nothing() {
    let zip = zip_archive(&[("a.txt", b"hello")]);
    // cut into the central directory: EOCD is gone
    assert!(zip_entry_names(&zip[..zip.len() - 30], 10).is_empty());
}
