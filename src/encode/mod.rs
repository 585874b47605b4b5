//! Frame export.
//!
//! Sinks consume frames in replay order; [`png::DirSink`] hands each one to an
//! [`png::ImageEncoder`] and writes the bytes to disk.

pub(crate) mod png;
pub(crate) mod sink;
