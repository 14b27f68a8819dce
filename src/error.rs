use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::Symbol;

/// Everything that can go wrong while building a code or moving bits through it
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Frequency analysis needs at least one symbol to divide by
    #[error("cannot compute symbol frequencies of empty input")]
    EmptyInput,

    /// A bit-string contained something other than '0' or '1'
    #[error("invalid character {found:?} at position {position} in bit-string")]
    InvalidBitString { position: usize, found: char },

    /// Opening, reading or writing a named file failed
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A caller supplied reader or writer failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Code generation needs a tree with at least two leaves
    #[error("huffman tree has {leaves} leaves, at least 2 are required")]
    MalformedTree { leaves: usize },

    /// Input byte outside the 7-bit alphabet
    #[error("byte {byte:#04x} at offset {offset} is outside the 7-bit alphabet")]
    SymbolOutOfRange { byte: u8, offset: usize },

    /// The table being used has no code for this symbol
    #[error("symbol {symbol} at offset {offset} has no code in this table")]
    UnknownSymbol { symbol: Symbol, offset: usize },
}

impl HuffmanError {
    pub(crate) fn file_access<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        HuffmanError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
