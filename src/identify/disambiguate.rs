//! Disambiguators for coarse magic/mime matches.
//!
//! Each function refines one functional rule's match into a concrete type by
//! looking at content and, for containers, child names. Missing children or
//! malformed content lead to the generic fallback of that rule, never to an
//! error.

use crate::core::classification::Refinement;
use crate::core::file_view::FileView;
use crate::core::platform::PlatformSet;
use crate::identify::detectors::{DetectorSet, ScriptKind};

const WIN: PlatformSet = PlatformSet::WINDOWS;

/// Marker of an Office Open XML package part.
pub const OFFICE_OPEN_XML_MARKER: &[u8] = b"application/vnd.openxmlformats-officedocument";

/// First 17 bytes of the TrueType fonts recognised by the octet fallback.
pub const TRUETYPE_SIGNATURE: [u8; 17] = [
    0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

fn windows_script() -> Refinement {
    Refinement::refined("Windows script file", "wsf", WIN)
}

pub fn html(f: &FileView, d: &DetectorSet) -> Refinement {
    if d.wsf(f.contents()) {
        return windows_script();
    }
    Refinement::refined("Hypertext Markup Language File", "html", PlatformSet::ANY)
}

pub fn xml(f: &FileView, d: &DetectorSet) -> Refinement {
    if memchr::memmem::find(f.contents(), OFFICE_OPEN_XML_MARKER).is_some() {
        return Refinement::refined("Office file", "doc", WIN);
    }
    if d.wsf(f.contents()) {
        return windows_script();
    }
    Refinement::refined("XML file", "xml", PlatformSet::ANY)
}

/// Powerpoint inside a CDF whose sector allocation table is unreadable.
pub fn sat(f: &FileView, _: &DetectorSet) -> Refinement {
    if f.get_child("ppt/presentation.xml").is_some() {
        return Refinement::refined("Powerpoint", "ppt", WIN);
    }
    Refinement::NoRefinement
}

pub fn section(_: &FileView, _: &DetectorSet) -> Refinement {
    Refinement::refined("CDF file", "cdf", WIN)
}

pub fn text(f: &FileView, d: &DetectorSet) -> Refinement {
    let data = f.contents();
    if let Some(kind) = d.first_script(data) {
        return match kind {
            ScriptKind::JavaScript => Refinement::refined("Javascript file", "js", WIN),
            ScriptKind::PowerShell => Refinement::refined("Powershell script", "ps1", WIN),
            ScriptKind::WindowsScript => windows_script(),
            ScriptKind::VisualBasic => Refinement::refined("Visual basic file", "vb", WIN),
        };
    }
    if data.starts_with(b"WEB") {
        return Refinement::refined("IQY file", "iqy", WIN);
    }
    if data.starts_with(b"ID;") {
        return Refinement::refined("SYLK file", "slk", WIN);
    }
    Refinement::refined("Text", "txt", PlatformSet::ANY)
}

/// Children are checked in listing order; the first Office part wins.
pub fn zip(f: &FileView, d: &DetectorSet) -> Refinement {
    for child in f.children() {
        let Some(name) = child.filename() else {
            continue;
        };
        if name.eq_ignore_ascii_case("workbook.xml") {
            return Refinement::refined("Excel document", "xlsx", WIN);
        }
        if name.eq_ignore_ascii_case("worddocument.xml") {
            return Refinement::refined("Word document", "docx", WIN);
        }
    }
    if d.java(f.contents()) {
        return Refinement::refined("JAR file", "jar", WIN);
    }
    Refinement::refined("ZIP file", "zip", WIN)
}

pub fn jar(f: &FileView, _: &DetectorSet) -> Refinement {
    if f.get_child("AndroidManifest.xml").is_some() {
        return Refinement::refined("Android Package File", "apk", PlatformSet::ANDROID);
    }
    Refinement::refined("Java Archive File", "jar", WIN)
}

pub fn octet(f: &FileView, d: &DetectorSet) -> Refinement {
    if d.wsf(f.contents()) {
        return windows_script();
    }
    if f.contents().starts_with(&TRUETYPE_SIGNATURE) {
        return Refinement::refined("TrueType Font", "ttf", WIN);
    }
    Refinement::refined("octet", "", WIN)
}

/// DLL and EXE share magic and mime; only the description's flag differs.
pub fn pe32(f: &FileView, _: &DetectorSet) -> Refinement {
    if f.magic().contains("DLL") {
        return Refinement::refined("DLL file", "dll", WIN);
    }
    Refinement::refined("Exe file", "exe", WIN)
}

pub fn flash(f: &FileView, _: &DetectorSet) -> Refinement {
    if f.magic().contains("(compressed)") {
        return Refinement::refined("SWF file", "swf", WIN);
    }
    Refinement::refined("FLV file", "flv", WIN)
}
