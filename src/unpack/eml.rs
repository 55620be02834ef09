//! RFC 822 / MIME message unpacking.

use crate::config::UnpackConfig;
use crate::error::Result;
use crate::unpack::{DuplicateSet, UnpackedEntry, Unpacker};
use bytes::Bytes;
use mailparse::{parse_mail, ParsedMail};
use tracing::{debug, info, warn};

/// Emits every non-whitelisted leaf part of a message as an entry.
#[derive(Debug, Clone)]
pub struct EmlUnpacker {
    whitelist: Vec<String>,
    max_parts: usize,
}

impl Default for EmlUnpacker {
    fn default() -> Self {
        Self::new(&UnpackConfig::default())
    }
}

impl EmlUnpacker {
    pub const NAME: &'static str = "emlfile";

    pub fn new(cfg: &UnpackConfig) -> Self {
        Self {
            whitelist: cfg.whitelisted_content_types.clone(),
            max_parts: cfg.max_parts,
        }
    }

    fn is_whitelisted(&self, content_type: &str) -> bool {
        self.whitelist
            .iter()
            .any(|w| w.eq_ignore_ascii_case(content_type))
    }
}

fn part_filename(part: &ParsedMail<'_>) -> Option<String> {
    part.get_content_disposition()
        .params
        .get("filename")
        .or_else(|| part.ctype.params.get("name"))
        .cloned()
}

/// Attached messages nested deeper than this are emitted whole.
const MAX_NESTING: usize = 16;

fn is_multipart(part: &ParsedMail<'_>) -> bool {
    !part.subparts.is_empty() || part.ctype.mimetype.starts_with("multipart/")
}

fn is_attached_message(part: &ParsedMail<'_>) -> bool {
    part.ctype.mimetype.eq_ignore_ascii_case("message/rfc822")
}

/// State carried across a message and the messages attached to it.
struct Walk<'s> {
    entries: Vec<UnpackedEntry>,
    seen: &'s mut DuplicateSet,
    visited: usize,
    exhausted: bool,
}

impl EmlUnpacker {
    /// Visit the parts of `root` depth-first in document order.
    fn walk(&self, root: &ParsedMail<'_>, depth: usize, walk: &mut Walk<'_>) {
        let mut stack = vec![root];
        while let Some(part) = stack.pop() {
            if is_multipart(part) {
                stack.extend(part.subparts.iter().rev());
                continue;
            }
            walk.visited += 1;
            if walk.visited > self.max_parts {
                warn!(max_parts = self.max_parts, "part limit reached, remaining parts skipped");
                walk.exhausted = true;
                return;
            }
            if is_attached_message(part) && depth < MAX_NESTING && self.descend(part, depth, walk) {
                if walk.exhausted {
                    return;
                }
                continue;
            }
            self.extract(part, walk);
        }
    }

    /// Parse an attached message and walk its parts. Returns `false` when it
    /// cannot be parsed and should be treated as a leaf.
    fn descend(&self, part: &ParsedMail<'_>, depth: usize, walk: &mut Walk<'_>) -> bool {
        let body = match part.get_body_raw() {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "undecodable attached message kept whole");
                return false;
            }
        };
        match parse_mail(&body) {
            Ok(inner) => {
                debug!(depth = depth + 1, "descending into attached message");
                self.walk(&inner, depth + 1, walk);
                true
            }
            Err(e) => {
                warn!(error = %e, "unparsable attached message kept whole");
                false
            }
        }
    }

    fn extract(&self, part: &ParsedMail<'_>, walk: &mut Walk<'_>) {
        let content_type = &part.ctype.mimetype;
        if self.is_whitelisted(content_type) {
            return;
        }
        let payload = match part.get_body_raw() {
            Ok(p) => p,
            Err(e) => {
                warn!(content_type = %content_type, error = %e, "undecodable part skipped");
                return;
            }
        };
        if payload.is_empty() {
            return;
        }
        let entry = UnpackedEntry::new(part_filename(part), Bytes::from(payload), &mut *walk.seen);
        debug!(
            filename = ?entry.filename,
            sha256 = %entry.hashes.sha256,
            duplicate = entry.duplicate,
            "extracted part"
        );
        walk.entries.push(entry);
    }
}

impl Unpacker for EmlUnpacker {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Parts are visited depth-first in document order. Attached
    /// `message/rfc822` parts are descended like multipart containers.
    fn unpack(&self, raw: &[u8], seen: &mut DuplicateSet) -> Result<Vec<UnpackedEntry>> {
        let message = parse_mail(raw)?;
        let mut walk = Walk {
            entries: Vec::new(),
            seen,
            visited: 0,
            exhausted: false,
        };
        self.walk(&message, 0, &mut walk);

        let entries = walk.entries;
        info!(
            entries = entries.len(),
            duplicates = entries.iter().filter(|e| e.duplicate).count(),
            parts = walk.visited,
            "unpacked message"
        );
        Ok(entries)
    }
}
