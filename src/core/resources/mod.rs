//=========================================================================
// Shared Resources
//=========================================================================
//
// Resource loading plus the session-wide resource set built on it.
//
// Components:
// - `ResourceLoader`: finds a named file in the data search paths
// - `ResourceFile`: in-memory file with a fixed-size RLE block reader
// - `font`: panel image, fonts, and the six-font set
// - `trig`: fixed-point sine lookup table
// - `network`: network subsystem handle
//
//=========================================================================

//=== Module Declarations =================================================

pub mod font;
pub mod network;
pub mod trig;

//=== Standard Library Imports ============================================

use std::fs;
use std::io::ErrorKind;

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::error::ResourceError;
use crate::core::paths::SearchPathList;

//=== Public API ==========================================================

pub use font::{Font, FontSet, FontSlot, PanelImage};
pub use network::Network;
pub use trig::{Fixed, TrigTable};

//=== ResourceLoader ======================================================

/// File-resource collaborator.
pub trait ResourceLoader {
    /// Opens `name` from the first data path that has it.
    fn open(&self, paths: &SearchPathList, name: &str) -> Result<ResourceFile, ResourceError>;
}

//=== FileSystemLoader ====================================================

/// Reads resources from disk.
///
/// Each search path is tried with the name as given and then in lower
/// case, since data sets ship with either convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemLoader;

impl ResourceLoader for FileSystemLoader {
    fn open(&self, paths: &SearchPathList, name: &str) -> Result<ResourceFile, ResourceError> {
        let mut variants = vec![name.to_string()];
        let lower = name.to_lowercase();
        if lower != name {
            variants.push(lower);
        }

        for dir in paths.iter() {
            for variant in &variants {
                let path = format!("{dir}{variant}");
                match fs::read(&path) {
                    Ok(data) => {
                        debug!(target: "resources", "Opened {} ({} bytes)", path, data.len());
                        return Ok(ResourceFile::from_bytes(name, data));
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        trace!(target: "resources", "{} not present", path);
                    }
                    Err(source) => {
                        return Err(ResourceError::Io { name: name.to_string(), source });
                    }
                }
            }
        }

        Err(ResourceError::NotFound { name: name.to_string() })
    }
}

//=== ResourceFile ========================================================

/// An opened resource with a read cursor.
#[derive(Debug, Clone)]
pub struct ResourceFile {
    name: String,
    data: Vec<u8>,
    pos: usize,
}

impl ResourceFile {
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            pos: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Unread bytes from the cursor onward.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Consumes the rest of the file.
    pub fn read_rest(&mut self) -> Vec<u8> {
        let rest = self.remaining().to_vec();
        self.pos = self.data.len();
        rest
    }

    //--- load_fixed_block() -----------------------------------------------
    //
    // Decodes one run-length block into exactly `length` bytes.
    //
    // Layout: u16 LE encoded size, then codes:
    //   1xxxxxxx v  → repeat v, x times
    //   0xxxxxxx .. → copy x literal bytes (x > 0)
    //   00000000 v  → one literal byte
    //
    // Short or truncated data leaves the tail zero-filled. The cursor
    // always ends up just past the encoded block.
    //
    pub fn load_fixed_block(&mut self, length: usize) -> Vec<u8> {
        let mut block = Vec::with_capacity(length);

        let encoded_size = match (self.read_u8(), self.read_u8()) {
            (Some(lo), Some(hi)) => u16::from_le_bytes([lo, hi]) as usize,
            _ => {
                block.resize(length, 0);
                return block;
            }
        };
        let start = self.pos;
        let end = (start + encoded_size).min(self.data.len());

        while block.len() < length && self.pos < end {
            let Some(code) = self.read_u8() else { break };
            let amount = (code & 0x7f) as usize;
            let room = length - block.len();

            if code & 0x80 != 0 {
                let Some(value) = self.read_u8() else { break };
                block.extend(std::iter::repeat(value).take(amount.min(room)));
            } else if amount > 0 {
                let available = end.saturating_sub(self.pos);
                let take = amount.min(room).min(available);
                block.extend_from_slice(&self.data[self.pos..self.pos + take]);
                self.pos += amount.min(available);
            } else if let Some(value) = self.read_u8() {
                block.push(value);
            }
        }

        if block.len() < length {
            trace!(target: "resources", "{}: block short by {} bytes", self.name, length - block.len());
            block.resize(length, 0);
        }

        self.pos = end;
        block
    }

    fn read_u8(&mut self) -> Option<u8> {
        let byte = self.data.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
