//! Read-only snapshot of a file handed to the classifier.

use bytes::Bytes;

/// A file blob with its precomputed signature and, for containers, its
/// named children.
///
/// `name` is the path relative to the parent container (or the file name for
/// a top-level file). Children are kept in the order the container listed
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileView {
    name: Option<String>,
    contents: Bytes,
    magic: String,
    mime: String,
    children: Vec<FileView>,
}

impl FileView {
    pub fn new(contents: impl Into<Bytes>, magic: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: None,
            contents: contents.into(),
            magic: magic.into(),
            mime: mime.into(),
            children: Vec::new(),
        }
    }

    /// A child known only by name, as produced by a directory listing.
    pub fn named(name: impl Into<String>) -> Self {
        Self::default().with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_child(mut self, child: FileView) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I: IntoIterator<Item = FileView>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Shared handle to the content buffer.
    pub fn bytes(&self) -> Bytes {
        self.contents.clone()
    }

    pub fn magic(&self) -> &str {
        &self.magic
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Path relative to the parent container.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Last path component of `name`.
    pub fn filename(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(|n| n.rsplit(['/', '\\']).next().unwrap_or(n))
    }

    pub fn children(&self) -> &[FileView] {
        &self.children
    }

    /// First child whose relative path equals `name` exactly.
    pub fn get_child(&self, name: &str) -> Option<&FileView> {
        self.children.iter().find(|c| c.name() == Some(name))
    }
}
