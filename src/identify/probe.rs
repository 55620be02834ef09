//! Signature probing.
//!
//! The classifier consumes libmagic-style descriptions and mime types. The
//! built-in [`InferProbe`] derives both from content using `infer`, then
//! phrases the result the way libmagic would so that the rule table's token
//! sets apply. Anything `infer` does not know falls back to a small text
//! sniffer and finally to `data`.

use crate::core::file_view::FileView;
use crate::identify::containers::zip_entry_names;
use bytes::Bytes;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// A magic description and mime type for one blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub magic: String,
    pub mime: String,
}

impl Signature {
    pub fn new(magic: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            magic: magic.into(),
            mime: mime.into(),
        }
    }
}

/// Source of magic/mime signatures.
pub trait SignatureProvider: Send + Sync {
    fn probe(&self, data: &[u8]) -> Signature;
}

/// Content-based probe backed by `infer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InferProbe;

static DESCRIPTIONS: Lazy<HashMap<&'static str, (&'static str, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        ("png", ("PNG image data", "image/png")),
        ("jpg", ("JPEG image data", "image/jpeg")),
        ("gif", ("GIF image data", "image/gif")),
        ("bmp", ("PC bitmap", "image/x-ms-bmp")),
        ("tif", ("TIFF image data", "image/tiff")),
        ("ico", ("MS Windows icon resource", "image/x-icon")),
        ("psd", ("Adobe Photoshop Image", "image/vnd.adobe.photoshop")),
        ("xcf", ("GIMP XCF image data", "image/x-xcf")),
        ("pdf", ("PDF document", "application/pdf")),
        ("rtf", ("Rich Text Format data", "text/rtf")),
        ("ps", ("PostScript document text", "application/postscript")),
        ("zip", ("Zip archive data", "application/zip")),
        ("jar", ("Java archive data (JAR)", "application/java-archive")),
        (
            "docx",
            (
                "Microsoft Word 2007+",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
        ),
        (
            "xlsx",
            (
                "Microsoft Excel 2007+",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
        ),
        (
            "pptx",
            (
                "Microsoft PowerPoint 2007+",
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            ),
        ),
        ("odt", ("OpenDocument Text", "application/vnd.oasis.opendocument.text")),
        ("ods", ("OpenDocument Spreadsheet", "application/vnd.oasis.opendocument.spreadsheet")),
        ("odp", ("OpenDocument Presentation", "application/vnd.oasis.opendocument.presentation")),
        ("doc", ("Composite Document File V2 Document", "application/msword")),
        ("xls", ("Composite Document File V2 Document", "application/vnd.ms-excel")),
        ("ppt", ("Composite Document File V2 Document", "application/vnd.ms-powerpoint")),
        ("msi", ("Composite Document File V2 Document", "application/x-msi")),
        ("rar", ("RAR archive data", "application/x-rar")),
        ("7z", ("7-zip archive data", "application/x-7z-compressed")),
        ("gz", ("gzip compressed data", "application/gzip")),
        ("bz2", ("bzip2 compressed data", "application/x-bzip2")),
        ("tar", ("POSIX tar archive", "application/x-tar")),
        ("cab", ("Microsoft Cabinet archive data", "application/vnd.ms-cab-compressed")),
        ("ar", ("current ar archive", "application/x-archive")),
        ("elf", ("ELF executable", "application/x-executable")),
        ("rpm", ("RPM v3.0 bin", "application/x-rpm")),
        ("deb", ("Debian binary package", "application/vnd.debian.binary-package")),
        ("crx", ("Google Chrome extension", "application/x-chrome-extension")),
        ("flv", ("Macromedia Flash Video", "video/x-flv")),
        ("wav", ("RIFF (little-endian) data, WAVE audio", "audio/x-wav")),
        ("avi", ("RIFF (little-endian) data, AVI", "video/x-msvideo")),
        ("mp4", ("ISO Media, MP4 v2", "video/mp4")),
        ("mov", ("ISO Media, Apple QuickTime movie", "video/quicktime")),
        ("mp3", ("Audio file with ID3, contains:MPEG ADTS, layer III", "audio/mpeg")),
        ("ogg", ("Ogg data", "audio/ogg")),
        ("flac", ("FLAC audio bitstream data", "audio/x-flac")),
        ("mid", ("Standard MIDI data", "audio/midi")),
        ("ttf", ("TrueType Font data", "application/font-sfnt")),
    ])
});

impl InferProbe {
    fn describe(kind: &infer::Type, data: &[u8]) -> Option<Signature> {
        match kind.extension() {
            "exe" | "dll" => Some(describe_mz(data)),
            "swf" => {
                let magic = if data.first().is_some_and(|&b| b == b'C' || b == b'Z') {
                    "Macromedia Flash data (compressed)"
                } else {
                    "Macromedia Flash data"
                };
                Some(Signature::new(magic, "application/x-shockwave-flash"))
            }
            ext => DESCRIPTIONS
                .get(ext)
                .map(|(magic, mime)| Signature::new(*magic, *mime)),
        }
    }
}

impl SignatureProvider for InferProbe {
    fn probe(&self, data: &[u8]) -> Signature {
        if data.is_empty() {
            return Signature::new("empty", "application/x-empty");
        }
        if let Some(kind) = infer::get(data) {
            trace!(extension = kind.extension(), mime = kind.mime_type(), "infer matched");
            if let Some(sig) = Self::describe(&kind, data) {
                return sig;
            }
            if kind.mime_type().ends_with("+zip") {
                debug!(extension = kind.extension(), "zip-based type described as zip");
                return zip_signature();
            }
            debug!(extension = kind.extension(), "no description for infer type");
        }
        if data.starts_with(ZIP_LOCAL_HEADER) {
            return zip_signature();
        }
        sniff_text(data).unwrap_or_else(|| Signature::new("data", "application/octet-stream"))
    }
}

const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";

/// Generic ZIP signature, so the ZIP and JAR disambiguators see the archive.
fn zip_signature() -> Signature {
    Signature::new("Zip archive data, at least v2.0 to extract", "application/zip")
}

/// PE files carry `PE\0\0` at the offset stored at 0x3c; anything else is a
/// plain DOS executable.
fn describe_mz(data: &[u8]) -> Signature {
    let pe_offset = data
        .get(0x3c..0x40)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize);
    let Some(pe) = pe_offset.filter(|&o| data.get(o..o + 4) == Some(&b"PE\0\0"[..])) else {
        return Signature::new("MS-DOS executable", "application/x-dosexec");
    };
    // COFF characteristics sit 18 bytes past the signature.
    let characteristics = data
        .get(pe + 22..pe + 24)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .unwrap_or(0);
    let magic = if characteristics & 0x2000 != 0 {
        "PE32 executable (DLL) (GUI) Intel 80386, for MS Windows"
    } else {
        "PE32 executable (GUI) Intel 80386, for MS Windows"
    };
    Signature::new(magic, "application/x-dosexec")
}

const TEXT_SNIFF_LEN: usize = 8192;

fn looks_textual(data: &[u8]) -> bool {
    let head = &data[..data.len().min(TEXT_SNIFF_LEN)];
    if memchr::memchr(0, head).is_some() {
        return false;
    }
    let printable = head
        .iter()
        .filter(|&&b| b >= 0x20 || matches!(b, b'\t' | b'\n' | b'\r' | 0x0c))
        .count();
    printable * 100 >= head.len() * 95
}

fn sniff_text(data: &[u8]) -> Option<Signature> {
    if !looks_textual(data) {
        return None;
    }
    let head = &data[..data.len().min(TEXT_SNIFF_LEN)];
    let lower = head.to_ascii_lowercase();
    let start = lower
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(lower.len());
    let trimmed = &lower[start..];
    let charset = if head.is_ascii() { "ASCII" } else { "UTF-8 Unicode" };

    let sig = if trimmed.starts_with(b"<?xml") {
        Signature::new(format!("XML 1.0 document, {charset} text"), "text/xml")
    } else if trimmed.starts_with(b"<!doctype html") || trimmed.starts_with(b"<html") {
        Signature::new(format!("HTML document, {charset} text"), "text/html")
    } else if trimmed.starts_with(b"#!/bin/bash") || trimmed.starts_with(b"#!/usr/bin/env bash") {
        Signature::new(
            format!("Bourne-Again shell script, {charset} text executable"),
            "text/x-shellscript",
        )
    } else if trimmed.starts_with(b"#!/usr/bin/env python") || trimmed.starts_with(b"#!/usr/bin/python") {
        Signature::new(format!("Python script, {charset} text executable"), "text/x-python")
    } else if is_mail_header(trimmed) {
        Signature::new(format!("SMTP mail, {charset} text"), "message/rfc822")
    } else {
        Signature::new(format!("{charset} text"), "text/plain")
    };
    Some(sig)
}

fn is_mail_header(lower: &[u8]) -> bool {
    const HEADERS: [&[u8]; 5] = [b"received:", b"return-path:", b"from:", b"delivered-to:", b"message-id:"];
    HEADERS.iter().any(|h| lower.starts_with(h))
}

/// Build a [`FileView`] for `data`, listing ZIP members as children.
pub fn probe_view(data: Bytes, provider: &dyn SignatureProvider) -> FileView {
    let sig = provider.probe(&data);
    let children = if data.starts_with(b"PK") || sig.mime.contains("zip") || sig.mime.contains("java-archive") {
        zip_entry_names(&data, u16::MAX as usize)
    } else {
        Vec::new()
    };
    FileView::new(data, sig.magic, sig.mime).with_children(children.into_iter().map(FileView::named))
}
