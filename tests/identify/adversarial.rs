use typesift::{identify, Classifier, DetectorSet, FileView, Identification, RuleTable};

use crate::common::view;

fn junk(len: usize, seed: u32) -> Vec<u8> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (x >> 24) as u8
        })
        .collect()
}

#[test]
fn random_content_under_every_functional_signature() {
    let signatures = [
        ("Zip archive data", "application/zip"),
        ("Java archive data (JAR)", "application/java-archive"),
        ("data", "application/octet-stream"),
        ("XML 1.0 document", "text/xml"),
        ("HTML document", "text/html"),
        ("ASCII text", "text/plain"),
        ("PE32 executable", "application/x-dosexec"),
        ("Macromedia Flash data", "application/x-shockwave-flash"),
        ("Composite Document File V2 Document, Can't read SAT", "application/CDFV2"),
    ];
    for seed in 0..16 {
        let data = junk(2048, seed);
        for (magic, mime) in signatures {
            let id = identify(&view(&data, magic, mime));
            assert_ne!(id, Identification::Unclassified, "{magic}");
        }
    }
}

#[test]
fn truncated_and_empty_contents() {
    for len in 0..20 {
        let data = vec![0u8; len];
        let _ = identify(&view(&data, "data", "application/octet-stream"));
        let _ = identify(&view(&data, "ASCII text", "text/plain"));
    }
    assert!(identify(&FileView::default()).is_unclassified());
}

#[test]
fn hostile_child_names() {
    let names = ["", "/", "\\", "../../workbook.xml", "a/b/c/", "\u{0}"];
    let f = crate::common::zip_view(b"PK", &names);
    // "../../workbook.xml" still has basename workbook.xml
    assert_eq!(identify(&f).extension(), Some("xlsx"));
}

#[test]
fn classifier_is_shareable_across_threads() {
    let detectors = DetectorSet::builtin();
    let classifier = Classifier::new(RuleTable::builtin(), detectors);
    let f = view(b"var a; function b() {}", "ASCII text", "text/plain");
    let expected = classifier.identify(&f);
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| assert_eq!(classifier.identify(&f), expected));
        }
    });
}
