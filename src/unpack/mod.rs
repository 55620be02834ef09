//! Unpacking collaborators.
//!
//! Unpackers turn one container blob into child entries. Each entry carries
//! its digests; an entry whose SHA-256 is already in the caller's
//! [`DuplicateSet`] is flagged as a duplicate but still returned.

pub mod eml;

pub use eml::EmlUnpacker;

use crate::core::file_view::FileView;
use crate::error::Result;
use crate::hashing::Hashes;
use crate::identify::probe::{probe_view, SignatureProvider};
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Maps a path to the name of the unpacker that should handle it.
pub trait Picker {
    fn pick(&self, path: &Path) -> Option<&str>;
}

/// Picks by file extension, ignoring ASCII case.
#[derive(Debug, Clone)]
pub struct ExtensionPicker {
    by_extension: HashMap<String, String>,
}

impl ExtensionPicker {
    pub fn empty() -> Self {
        Self {
            by_extension: HashMap::new(),
        }
    }

    pub fn with(mut self, extension: &str, unpacker: &str) -> Self {
        self.by_extension
            .insert(extension.to_ascii_lowercase(), unpacker.to_string());
        self
    }
}

impl Default for ExtensionPicker {
    fn default() -> Self {
        Self::empty().with("eml", EmlUnpacker::NAME)
    }
}

impl Picker for ExtensionPicker {
    fn pick(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.by_extension.get(&ext).map(String::as_str)
    }
}

/// SHA-256 digests seen so far across unpacking runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateSet(HashSet<String>);

impl DuplicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, sha256: &str) -> bool {
        self.0.contains(sha256)
    }

    /// Record `sha256`. Returns `true` if it had not been seen before.
    pub fn insert(&mut self, sha256: &str) -> bool {
        if self.0.contains(sha256) {
            return false;
        }
        self.0.insert(sha256.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DuplicateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One extracted child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedEntry {
    /// Original filename, when the container recorded one.
    pub filename: Option<String>,
    pub contents: Bytes,
    pub hashes: Hashes,
    /// The digest was already in the caller's set when this entry was found.
    pub duplicate: bool,
}

impl UnpackedEntry {
    /// Hash `contents` and check it against `seen`, recording new digests.
    pub fn new(filename: Option<String>, contents: Bytes, seen: &mut DuplicateSet) -> Self {
        let hashes = Hashes::compute(&contents);
        let duplicate = !seen.insert(&hashes.sha256);
        Self {
            filename,
            contents,
            hashes,
            duplicate,
        }
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }

    /// A classifier view of this entry.
    pub fn to_file_view(&self, provider: &dyn SignatureProvider) -> FileView {
        let view = probe_view(self.contents.clone(), provider);
        match &self.filename {
            Some(name) => view.with_name(name.clone()),
            None => view,
        }
    }
}

/// A format-specific unpacker.
pub trait Unpacker {
    /// Name a [`Picker`] returns for paths this unpacker handles.
    fn name(&self) -> &'static str;

    fn handles(&self, path: &Path, picker: &dyn Picker) -> bool {
        picker.pick(path) == Some(self.name())
    }

    fn unpack(&self, raw: &[u8], seen: &mut DuplicateSet) -> Result<Vec<UnpackedEntry>>;
}
