//! ZIP central directory listing.
//!
//! Disambiguators only need member names, so nothing is decompressed. The
//! listing is read from the central directory located through the End of
//! Central Directory record; truncated or inconsistent archives yield the
//! entries that could be read before the damage.

use tracing::debug;

const EOCD_SIG: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];
const CDH_SIG: [u8; 4] = [0x50, 0x4B, 0x01, 0x02];
const EOCD_LEN: usize = 22;
const CDH_LEN: usize = 46;
/// EOCD record plus the longest possible archive comment.
const EOCD_SEARCH: usize = EOCD_LEN + u16::MAX as usize;

fn u16_at(data: &[u8], off: usize) -> Option<u16> {
    data.get(off..off + 2).map(|b| u16::from_le_bytes([b[0], b[1]]))
}

fn u32_at(data: &[u8], off: usize) -> Option<u32> {
    data.get(off..off + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Offset of the last EOCD record in `data`.
fn find_eocd(data: &[u8]) -> Option<usize> {
    if data.len() < EOCD_LEN {
        return None;
    }
    let start = data.len().saturating_sub(EOCD_SEARCH);
    (start..=data.len() - EOCD_LEN)
        .rev()
        .find(|&i| data[i..i + 4] == EOCD_SIG)
}

/// Names of the members of a ZIP archive, in central directory order.
///
/// At most `max_entries` names are returned. Data that is not a ZIP archive
/// yields an empty list.
pub fn zip_entry_names(data: &[u8], max_entries: usize) -> Vec<String> {
    let Some(eocd) = find_eocd(data) else {
        return Vec::new();
    };
    let total = u16_at(data, eocd + 10).unwrap_or(0) as usize;
    let cd_size = u32_at(data, eocd + 12).unwrap_or(0) as usize;
    let cd_offset = u32_at(data, eocd + 16).unwrap_or(0) as usize;

    // Prepended data (self-extractors) shifts the recorded offset.
    let mut off = cd_offset;
    if u32_at(data, off) != Some(u32::from_le_bytes(CDH_SIG)) {
        off = eocd.saturating_sub(cd_size);
    }

    let mut names = Vec::with_capacity(total.min(max_entries));
    while names.len() < total.min(max_entries) {
        if data.get(off..off + 4) != Some(&CDH_SIG[..]) {
            debug!(offset = off, read = names.len(), total, "central directory ends early");
            break;
        }
        let (Some(name_len), Some(extra_len), Some(comment_len)) =
            (u16_at(data, off + 28), u16_at(data, off + 30), u16_at(data, off + 32))
        else {
            break;
        };
        let name_start = off + CDH_LEN;
        let Some(raw) = data.get(name_start..name_start + name_len as usize) else {
            break;
        };
        names.push(String::from_utf8_lossy(raw).into_owned());
        off = name_start + name_len as usize + extra_len as usize + comment_len as usize;
    }
    names
}
