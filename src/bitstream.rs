//! The encoded file format: the bit sequence, preceded by a padding marker,
//! packed most significant bit first.
//!
//! The marker is `8 - len % 8` bits long: zeros ending in a single one. It is
//! never empty, so a sequence whose length is already a multiple of 8 gets a
//! whole byte `00000001` in front. There is no header and no length field.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use bitvec::prelude::Msb0;
use bitvec::view::BitView;
use tempfile::NamedTempFile;

use crate::error::{HuffmanError, Result};
use crate::{BitSlice, BitVec};

/// number of marker bits written in front of a sequence of `len` bits, in [1, 8]
pub fn padding_len(len: usize) -> usize {
    8 - len % 8
}

/// Prepends the padding marker and packs the bits into bytes
pub fn pack(bits: &BitSlice) -> Vec<u8> {
    let padding = padding_len(bits.len());
    let mut padded = BitVec::with_capacity(padding + bits.len());
    padded.extend(std::iter::repeat(false).take(padding - 1));
    padded.push(true);
    padded.extend_from_bitslice(bits);
    debug_assert_eq!(padded.len() % 8, 0);
    padded.into_vec()
}

/// Like [`pack`] for a textual bit-string. Any character other than '0' or
/// '1' fails the whole operation.
pub fn pack_bit_string(bit_string: &str) -> Result<Vec<u8>> {
    let mut bits = BitVec::with_capacity(bit_string.len());
    for (position, found) in bit_string.chars().enumerate() {
        match found {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(HuffmanError::InvalidBitString { position, found }),
        }
    }
    Ok(pack(&bits))
}

/// Unpacks `bytes` and strips everything up to and including the first one
/// bit of the first byte. A first byte without a one bit is dropped whole.
pub fn unpack(bytes: &[u8]) -> BitVec {
    let bits = bytes.view_bits::<Msb0>();
    if bits.is_empty() {
        return BitVec::new();
    }
    let start = match bits[..8].first_one() {
        Some(marker) => marker + 1,
        None => {
            log::warn!("no padding marker in first byte, dropping it");
            8
        }
    };
    bits[start..].to_bitvec()
}

/// renders bits as a string of '0' and '1'
pub fn to_bit_string(bits: &BitSlice) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Writes `bytes` to a temporary file next to `path` and renames it into
/// place, so `path` is either fully replaced or left as it was.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let access = |e: io::Error| HuffmanError::file_access(path, e);
    let mut staged = NamedTempFile::new_in(dir).map_err(access)?;
    staged.write_all(bytes).map_err(access)?;
    staged.persist(path).map_err(|e| access(e.error))?;
    Ok(())
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| HuffmanError::file_access(path, e))
}

/// Packs `bits` and writes them to `path`, replacing any existing file
pub fn write_bits<P: AsRef<Path>>(path: P, bits: &BitSlice) -> Result<()> {
    let bytes = pack(bits);
    log::debug!(
        "writing {} bits as {} bytes to {}",
        bits.len(),
        bytes.len(),
        path.as_ref().display()
    );
    write_file(path.as_ref(), &bytes)
}

/// Writes a textual bit-string to `path`. Nothing is written if the string
/// is invalid.
pub fn write_bit_string<P: AsRef<Path>>(path: P, bit_string: &str) -> Result<()> {
    let bytes = pack_bit_string(bit_string)?;
    write_file(path.as_ref(), &bytes)
}

/// Reads `path` and returns the bits that follow the padding marker
pub fn read_bits<P: AsRef<Path>>(path: P) -> Result<BitVec> {
    let bytes = read_file(path.as_ref())?;
    Ok(unpack(&bytes))
}

pub fn read_bit_string<P: AsRef<Path>>(path: P) -> Result<String> {
    read_bits(path).map(|bits| to_bit_string(&bits))
}
