//! Core data types for typesift.
//!
//! The classifier's inputs and outputs: the [`file_view::FileView`] snapshot
//! it reads, the [`platform::PlatformSet`] a type runs on, and the
//! [`classification::Identification`] it produces.

pub mod classification;
pub mod file_view;
pub mod platform;
