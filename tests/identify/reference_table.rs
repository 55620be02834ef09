use typesift::identify::Rule;
use typesift::{identify, Identification, PlatformSet, RuleTable};

use crate::common::view;

fn ext(magic: &str, mime: &str) -> Option<String> {
    identify(&view(b"", magic, mime)).extension().map(str::to_string)
}

#[test]
fn literal_entries_from_libmagic_descriptions() {
    let cases = [
        ("PDF document, version 1.4", "application/pdf", "pdf"),
        ("RAR archive data, v1d", "application/x-rar", "rar"),
        ("7-zip archive data, version 0.4", "application/x-7z-compressed", "7zip"),
        ("gzip compressed data, was \"a.tar\"", "application/gzip", "gz"),
        ("POSIX tar archive (GNU)", "application/x-tar", "tar"),
        ("JPEG image data, JFIF standard 1.01", "image/jpeg", "jpg"),
        ("GIF image data, version 89a, 1 x 1", "image/gif", "gif"),
        ("ELF 64-bit LSB executable, x86-64", "application/x-executable", "elf"),
        ("Rich Text Format data, version 1", "text/rtf", "rtf"),
        ("MS Windows shortcut, Item id list present", "application/octet-stream", "lnk"),
        ("SMTP mail, ASCII text", "message/rfc822", "email"),
        ("Microsoft Word 2007+", "application/vnd.openxmlformats-officedocument.wordprocessingml.document", "docx"),
        ("Composite Document File V2 Document, Little Endian", "application/msword", "doc"),
        ("Composite Document File V2 Document, Little Endian", "application/vnd.ms-excel", "xls"),
        ("Macromedia Flash Video", "video/x-flv", "flv"),
        ("RPM v3.0 bin i386/x86_64", "application/x-rpm", "rpm"),
        ("FLAC audio bitstream data, 16 bit", "audio/x-flac", "flac"),
        ("TrueType Font data, 18 tables", "application/font-sfnt", "ttf"),
        ("Netscape cookie file", "text/plain", "iecookie"),
    ];
    for (magic, mime, expected) in cases {
        assert_eq!(ext(magic, mime).as_deref(), Some(expected), "{magic} / {mime}");
    }
}

#[test]
fn reconstructed_entries_keep_their_platforms() {
    let rpm = identify(&view(b"", "RPM v3.0 bin", "application/x-rpm"));
    assert_eq!(rpm.platforms(), Some(PlatformSet::LINUX));
    let flv = identify(&view(b"", "Macromedia Flash Video", "video/x-flv"));
    assert_eq!(flv.label(), Some("Flash Video File"));
    assert!(flv.analyze_further());
}

#[test]
fn every_literal_rule_is_reachable_or_shadowed_by_an_earlier_one() {
    let table = RuleTable::builtin();
    for (index, rule) in table.rules().iter().enumerate() {
        let Rule::Literal(lit) = rule else { continue };
        let magic = lit.magic_tokens.join(" ");
        let id = identify(&view(b"", &magic, &lit.mime_contains));
        let tokens = typesift::identify::tokenize_magic(&magic);
        let (winner, _) = table
            .first_match(&tokens, &lit.mime_contains)
            .expect("a rule always matches its own tokens");
        assert!(winner <= index, "rule {index} matched by later rule {winner}");
        if winner == index {
            assert_eq!(
                id,
                Identification::Identified {
                    analyze_further: lit.analyze_further,
                    classification: lit.classification(),
                },
                "rule {index}"
            );
        }
    }
}

#[test]
fn first_match_wins_between_overlapping_rules() {
    // a DLL's description also contains PE32; the literal (DLL) rule is earlier
    let id = identify(&view(b"MZ", "PE32 executable (DLL) (GUI) Intel 80386", "application/x-dosexec"));
    assert_eq!(id.label(), Some("Dynamic linked library"));

    // ["RIFF"] x-wav is listed before ["RIFF"] msvideo
    assert_eq!(ext("RIFF (little-endian) data, WAVE audio", "audio/x-wav").as_deref(), Some("wav"));
    assert_eq!(ext("RIFF (little-endian) data, AVI", "video/x-msvideo").as_deref(), Some("avi"));
}

#[test]
fn mime_mismatch_is_unclassified() {
    let id = identify(&view(b"\x89PNG", "PNG image data", "application/x-nothing"));
    assert_eq!(id, Identification::Unclassified);
}

#[test]
fn tokens_must_match_exactly() {
    // "PNGs" is not the token "PNG"
    assert!(identify(&view(b"", "PNGs image", "image/png")).is_unclassified());
}
