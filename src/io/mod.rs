//! Bounded I/O for reading inputs from disk.
//!
//! Inputs are untrusted: files above `max_file_size` are refused before any
//! byte is read, and at most `max_read_bytes` are ever pulled into memory.

use crate::config::IoConfig;
use crate::error::{Error, Result};
use bytes::Bytes;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Resource limits for reading one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoLimits {
    pub max_read_bytes: u64,
    pub max_file_size: u64,
}

impl Default for IoLimits {
    fn default() -> Self {
        Self::from(&IoConfig::default())
    }
}

impl From<&IoConfig> for IoLimits {
    fn from(cfg: &IoConfig) -> Self {
        Self {
            max_read_bytes: cfg.max_read_bytes,
            max_file_size: cfg.max_file_size,
        }
    }
}

/// A reader that reports EOF once `limit` bytes have been consumed.
pub struct BoundedReader<R> {
    inner: R,
    bytes_read: u64,
    limit: u64,
}

impl<R: Read> BoundedReader<R> {
    pub fn new(reader: R, limit: u64) -> Self {
        Self {
            inner: reader,
            bytes_read: 0,
            limit,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bytes_read >= self.limit {
            return Ok(0);
        }
        let remaining = self.limit - self.bytes_read;
        let max = std::cmp::min(buf.len() as u64, remaining) as usize;
        let n = self.inner.read(&mut buf[..max])?;
        self.bytes_read += n as u64;
        if self.bytes_read >= self.limit {
            debug!(limit = self.limit, "bounded reader reached its limit");
        }
        Ok(n)
    }
}

/// A file opened under [`IoLimits`].
pub struct SafeFileReader {
    file: File,
    size: u64,
    limits: IoLimits,
}

impl SafeFileReader {
    /// Open `path`, refusing files larger than `limits.max_file_size`.
    pub fn open<P: AsRef<Path>>(path: P, limits: IoLimits) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        if size > limits.max_file_size {
            warn!(path = %path.display(), size, limit = limits.max_file_size, "file too large");
            return Err(Error::ResourceExhausted {
                resource: "file size".to_string(),
                used: size,
                limit: limits.max_file_size,
            });
        }
        debug!(path = %path.display(), size, "opened input");
        Ok(Self { file, size, limits })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn limits(&self) -> IoLimits {
        self.limits
    }

    /// Read the file, truncated to `max_read_bytes`.
    pub fn read_all(self) -> Result<Bytes> {
        let cap = std::cmp::min(self.size, self.limits.max_read_bytes) as usize;
        let mut data = Vec::with_capacity(cap);
        BoundedReader::new(self.file, self.limits.max_read_bytes).read_to_end(&mut data)?;
        if (data.len() as u64) < self.size {
            debug!(read = data.len(), size = self.size, "input truncated to read limit");
        }
        Ok(Bytes::from(data))
    }
}

/// Open and read `path` under `limits`.
pub fn read_file_with_limit<P: AsRef<Path>>(path: P, limits: IoLimits) -> Result<Bytes> {
    SafeFileReader::open(path, limits)?.read_all()
}
