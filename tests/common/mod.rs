//! Shared builders for integration tests.

use typesift::FileView;

/// A file view with the given signature and no children.
pub fn view(contents: &[u8], magic: &str, mime: &str) -> FileView {
    FileView::new(contents.to_vec(), magic, mime)
}

/// A ZIP-typed view whose children carry the given names.
pub fn zip_view(contents: &[u8], names: &[&str]) -> FileView {
    view(contents, "Zip archive data, at least v2.0 to extract", "application/zip")
        .with_children(names.iter().map(|n| FileView::named(*n)))
}

/// A stored (uncompressed) ZIP archive holding `members`.
pub fn zip_archive(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();
    for (name, body) in members {
        let offset = out.len() as u32;
        let size = (body.len() as u32).to_le_bytes();
        let name_len = (name.len() as u16).to_le_bytes();

        out.extend_from_slice(b"PK\x03\x04");
        out.extend_from_slice(&[20, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        out.extend_from_slice(&size);
        out.extend_from_slice(&size);
        out.extend_from_slice(&name_len);
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(body);

        central.extend_from_slice(b"PK\x01\x02");
        central.extend_from_slice(&[20, 0, 20, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        central.extend_from_slice(&size);
        central.extend_from_slice(&size);
        central.extend_from_slice(&name_len);
        central.extend_from_slice(&[0; 12]);
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(name.as_bytes());
    }
    let cd_offset = out.len() as u32;
    out.extend_from_slice(&central);
    out.extend_from_slice(b"PK\x05\x06\x00\x00\x00\x00");
    out.extend_from_slice(&(members.len() as u16).to_le_bytes());
    out.extend_from_slice(&(members.len() as u16).to_le_bytes());
    out.extend_from_slice(&(central.len() as u32).to_le_bytes());
    out.extend_from_slice(&cd_offset.to_le_bytes());
    out.extend_from_slice(&[0, 0]);
    out
}

/// A two-part message: a plain-text body and one base64 attachment.
pub fn message_with_attachment(filename: &str, base64_body: &str) -> String {
    format!(
        "From: sender@example.test\r\n\
         To: rcpt@example.test\r\n\
         Subject: invoice\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: multipart/mixed; boundary=\"==sep==\"\r\n\
         \r\n\
         --==sep==\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         \r\n\
         Please find the invoice attached.\r\n\
         --==sep==\r\n\
         Content-Type: application/octet-stream; name=\"{filename}\"\r\n\
         Content-Disposition: attachment; filename=\"{filename}\"\r\n\
         Content-Transfer-Encoding: base64\r\n\
         \r\n\
         {base64_body}\r\n\
         --==sep==--\r\n"
    )
}
