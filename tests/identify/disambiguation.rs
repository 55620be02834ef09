use typesift::identify::disambiguate::TRUETYPE_SIGNATURE;
use typesift::{identify, FileView, Identification, PlatformSet};

use crate::common::{view, zip_view};

const PE_MIME: &str = "application/x-dosexec";

#[test]
fn pe32_dll_flag_decides_extension() {
    // "(DLL)" as its own token is caught by the literal rule; a bare DLL
    // flag inside another token reaches the PE32 disambiguator
    let pe32_plus = identify(&view(b"MZ", "PE32+ executable DLL-like (console) x86-64", PE_MIME));
    let exe = identify(&view(b"MZ", "PE32 executable (console) Intel 80386", PE_MIME));
    let dll = identify(&view(b"MZ", "PE32 executable DLL (console) Intel 80386", PE_MIME));

    assert_eq!(exe.extension(), Some("exe"));
    assert_eq!(dll.extension(), Some("dll"));
    for id in [&exe, &dll] {
        assert_eq!(id.platforms(), Some(PlatformSet::WINDOWS));
        assert!(id.analyze_further());
    }
    // "PE32+" is not the token "PE32"
    assert!(pe32_plus.is_unclassified());
}

#[test]
fn zip_children_pick_office_type() {
    let xlsx = identify(&zip_view(b"PK\x03\x04", &["[Content_Types].xml", "xl/WORKBOOK.xml"]));
    let docx = identify(&zip_view(b"PK\x03\x04", &["word/worddocument.xml"]));
    let plain = identify(&zip_view(b"PK\x03\x04", &["readme.txt", "src/main.c"]));
    assert_eq!(xlsx.extension(), Some("xlsx"));
    assert_eq!(docx.extension(), Some("docx"));
    assert_eq!(plain.extension(), Some("zip"));
    assert!(plain.analyze_further());
}

#[test]
fn zip_with_java_content_is_jar() {
    let id = identify(&zip_view(b"PK\x03\x04\x14\x00META-INF/MANIFEST.MF", &[]));
    assert_eq!(id.extension(), Some("jar"));
    assert_eq!(id.label(), Some("JAR file"));
}

#[test]
fn jar_with_android_manifest_is_apk() {
    let jar = view(b"PK\x03\x04", "Java archive data (JAR)", "application/java-archive");
    let apk = jar.clone().with_child(FileView::named("AndroidManifest.xml"));

    let apk_id = identify(&apk);
    assert_eq!(apk_id.extension(), Some("apk"));
    assert_eq!(apk_id.platforms(), Some(PlatformSet::ANDROID));

    let jar_id = identify(&jar);
    assert_eq!(jar_id.extension(), Some("jar"));
    assert_eq!(jar_id.platforms(), Some(PlatformSet::WINDOWS));
}

#[test]
fn truetype_prefix_and_single_byte_flips() {
    let mut font = TRUETYPE_SIGNATURE.to_vec();
    font.extend_from_slice(&[0x10, 0x20, 0x30]);
    let id = identify(&view(&font, "data", "application/octet-stream"));
    assert_eq!(id.extension(), Some("ttf"));

    for i in 0..TRUETYPE_SIGNATURE.len() {
        let mut flipped = font.clone();
        flipped[i] = flipped[i].wrapping_add(1);
        let id = identify(&view(&flipped, "data", "application/octet-stream"));
        assert_eq!(id.label(), Some("octet"), "byte {i}");
        assert_eq!(id.extension(), Some(""));
    }
}

#[test]
fn text_cascade() {
    let js = b"var a = 1; function f() { eval(b); return true || false || null; }";
    let cases: [(&[u8], &str); 5] = [
        (js, "js"),
        (b"Invoke-Expression (New-Object System.Net.WebClient).DownloadString('u')", "ps1"),
        (b"<job><script language=\"VBScript\">MsgBox 1</script></job>", "wsf"),
        (b"On Error Resume Next\r\nSet o = CreateObject(\"x\")", "vb"),
        (b"WEB\r\n1\r\nhttp://example.test/", "iqy"),
    ];
    for (body, expected) in cases {
        let id = identify(&view(body, "ASCII text", "text/plain"));
        assert_eq!(id.extension(), Some(expected));
        assert_eq!(id.platforms(), Some(PlatformSet::WINDOWS));
    }

    let txt = identify(&view(b"shopping list: eggs", "ASCII text", "text/plain"));
    assert_eq!(txt.extension(), Some("txt"));
    assert_eq!(txt.platforms(), Some(PlatformSet::ANY));
}

#[test]
fn javascript_vote_needs_six_markers() {
    let five = b"var a = function () { eval(x); return true || false; }";
    let id = identify(&view(five, "ASCII text", "text/plain"));
    assert_eq!(id.extension(), Some("txt"));
}

#[test]
fn html_and_xml() {
    let html = identify(&view(b"<html><p>hi</p></html>", "HTML document, ASCII text", "text/html"));
    assert_eq!(html.extension(), Some("html"));
    assert!(html.analyze_further());

    let office = identify(&view(
        b"<Types><Override ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/></Types>",
        "XML 1.0 document, ASCII text",
        "text/xml",
    ));
    assert_eq!(office.extension(), Some("doc"));
}

#[test]
fn sat_without_presentation_stays_unrefined() {
    let f = view(b"\xd0\xcf\x11\xe0", "Composite Document File V2 Document, Can't read SAT", "application/CDFV2");
    assert_eq!(identify(&f), Identification::Unrefined { analyze_further: false });
    let with = f.with_child(FileView::named("ppt/presentation.xml"));
    assert_eq!(identify(&with).label(), Some("Powerpoint"));
}

#[test]
fn unreadable_section_is_cdf() {
    let f = view(b"", "Composite Document File V2 Document, Cannot read section info", "application/CDFV2");
    assert_eq!(identify(&f).extension(), Some("cdf"));
}
