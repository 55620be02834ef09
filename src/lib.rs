//! typesift: file-type identification of untrusted blobs.
//!
//! A file arrives as a [`FileView`]: its bytes, a libmagic-style magic
//! description, a mime type and, for containers, its named children. The
//! [`Classifier`] maps it to a [`Classification`] (label, canonical extension,
//! platforms) or reports it unclassified.
//!
//! ```
//! use typesift::{identify, FileView};
//!
//! let file = FileView::new(&b"MZ\x90\x00"[..], "PE32 executable (DLL) (GUI) Intel 80386", "application/x-dosexec");
//! assert_eq!(identify(&file).extension(), Some("dll"));
//! ```

/// Core data types
pub mod core;

pub mod config;
pub mod error;
pub mod hashing;
pub mod identify;
pub mod io;
pub mod logging;
pub mod unpack;

pub use crate::config::SiftConfig;
pub use crate::core::classification::{Classification, Identification, Refinement};
pub use crate::core::file_view::FileView;
pub use crate::core::platform::{Platform, PlatformSet};
pub use crate::error::{Error, Result, RuleTableError};
pub use crate::identify::{identify, Classifier, DetectorSet, RuleTable};
