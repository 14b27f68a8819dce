//! Huffman coding of 7-bit text.
//!
//! The tree is never written to the encoded file. Encoder and decoder each
//! rebuild it from the statistics of the original text, and because every
//! stage is deterministic both sides arrive at the same codes.
//!
//! ```no_run
//! use huffman_text::HuffmanCoding;
//!
//! let coding = HuffmanCoding::from_file("book.txt")?;
//! coding.encode_file("book.txt", "book.huff")?;
//! coding.decode_file("book.huff", "book.decoded.txt")?;
//! # Ok::<(), huffman_text::HuffmanError>(())
//! ```

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bitvec::prelude::Msb0;

pub mod bitstream;
pub mod code;
pub mod error;
pub mod frequency;
pub mod tree;

pub use code::{Code, CodeTable};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyEntry;
pub use tree::{HuffmanNode, HuffmanTree};

//Only use these bit types throughout this crate, MSB first like the file format
pub type BitVec = bitvec::vec::BitVec<u8, Msb0>;
pub type BitSlice = bitvec::slice::BitSlice<u8, Msb0>;

/// one character of the 7-bit alphabet
pub type Symbol = u8;

/// number of distinct symbols
pub const ALPHABET_SIZE: usize = 128;

/// type used to store count of characters
type Count = u64;

/// Concatenates the code of every input symbol, in input order
pub fn encode_symbols(table: &CodeTable, input: &[u8]) -> Result<BitVec> {
    let mut bits = BitVec::new();
    for (offset, &symbol) in input.iter().enumerate() {
        let code = table
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol, offset })?;
        bits.extend_from_bitslice(code.bits());
    }
    Ok(bits)
}

/// Walks `tree` one bit at a time, emitting a symbol and restarting at the
/// root whenever a leaf is reached
pub fn decode_bits(tree: &HuffmanTree, bits: &BitSlice) -> Vec<u8> {
    let root = tree.root();
    let mut decoded = Vec::new();
    let mut node = root;
    for bit in bits.iter().by_vals() {
        if let HuffmanNode::Interior { left, right, .. } = node {
            node = if bit { &**right } else { &**left };
        }
        if let HuffmanNode::Leaf(entry) = node {
            decoded.push(entry.symbol);
            node = root;
        }
    }
    if !std::ptr::eq(node, root) {
        log::warn!("encoded bits end in the middle of a code, ignoring the tail");
    }
    decoded
}

/// The statistics, tree and code table built from one source text.
/// Decoding needs the same instance (or one built from the same text)
/// that was used for encoding.
#[derive(Clone, Debug)]
pub struct HuffmanCoding {
    source: Option<PathBuf>,
    sorted_frequencies: Vec<FrequencyEntry>,
    tree: HuffmanTree,
    table: CodeTable,
}

impl HuffmanCoding {
    pub fn from_bytes(input: &[u8]) -> Result<HuffmanCoding> {
        let sorted_frequencies = frequency::sorted_frequencies(input)?;
        let tree = HuffmanTree::build(&sorted_frequencies)?;
        let table = CodeTable::generate(&tree)?;
        log::debug!(
            "{} input bytes, {} distinct symbols",
            input.len(),
            table.len()
        );
        Ok(HuffmanCoding {
            source: None,
            sorted_frequencies,
            tree,
            table,
        })
    }

    pub fn from_reader<R: Read>(mut r: R) -> Result<HuffmanCoding> {
        let mut input = Vec::new();
        r.read_to_end(&mut input)?;
        HuffmanCoding::from_bytes(&input)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<HuffmanCoding> {
        let path = path.as_ref();
        let input = bitstream::read_file(path)?;
        let mut coding = HuffmanCoding::from_bytes(&input)?;
        coding.source = Some(path.to_path_buf());
        Ok(coding)
    }

    /// the file the statistics were read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn sorted_frequencies(&self) -> &[FrequencyEntry] {
        &self.sorted_frequencies
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    /// expected code length in bits per symbol
    pub fn average_code_len(&self) -> f64 {
        self.sorted_frequencies
            .iter()
            .filter_map(|entry| {
                self.table
                    .get(entry.symbol)
                    .map(|code| entry.probability * code.len() as f64)
            })
            .sum()
    }

    /// number of code bits `input` encodes to, padding excluded
    pub fn encoded_bit_len(&self, input: &[u8]) -> Result<usize> {
        input
            .iter()
            .enumerate()
            .map(|(offset, &symbol)| {
                self.table
                    .get(symbol)
                    .map(Code::len)
                    .ok_or(HuffmanError::UnknownSymbol { symbol, offset })
            })
            .sum()
    }

    /// the complete encoded file contents for `input`
    pub fn encode_bytes(&self, input: &[u8]) -> Result<Vec<u8>> {
        let bits = encode_symbols(&self.table, input)?;
        let bytes = bitstream::pack(&bits);
        log::debug!(
            "encoded {} bytes into {} bits, {} bytes with padding",
            input.len(),
            bits.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Encodes everything `r` yields. `out` is only written once the whole
    /// encoding succeeded.
    pub fn encode<R, W>(&self, mut r: R, mut out: W) -> Result<()>
    where
        R: Read,
        W: Write,
    {
        let mut input = Vec::new();
        r.read_to_end(&mut input)?;
        let bytes = self.encode_bytes(&input)?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }

    /// Re-reads `input` and writes its encoding to `encoded`. No file is
    /// left behind when encoding fails.
    pub fn encode_file<P, Q>(&self, input: P, encoded: Q) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let text = bitstream::read_file(input.as_ref())?;
        let bits = encode_symbols(&self.table, &text)?;
        bitstream::write_bits(encoded, &bits)
    }

    pub fn decode_bytes(&self, encoded: &[u8]) -> Vec<u8> {
        let bits = bitstream::unpack(encoded);
        let decoded = decode_bits(&self.tree, &bits);
        log::debug!(
            "decoded {} bytes from {} bits",
            decoded.len(),
            bits.len()
        );
        decoded
    }

    pub fn decode<R, W>(&self, mut r: R, mut out: W) -> Result<()>
    where
        R: Read,
        W: Write,
    {
        let mut encoded = Vec::new();
        r.read_to_end(&mut encoded)?;
        out.write_all(&self.decode_bytes(&encoded))?;
        out.flush()?;
        Ok(())
    }

    pub fn decode_file<P, Q>(&self, encoded: P, decoded: Q) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let bits = bitstream::read_bits(encoded)?;
        let text = decode_bits(&self.tree, &bits);
        bitstream::write_file(decoded.as_ref(), &text)
    }
}

/// Gathers statistics from `r`, seeks back to the start and writes the
/// encoding of the same text to `out`. The returned coding is needed to
/// decode the output again.
pub fn encode<R, W>(mut r: R, out: W) -> Result<HuffmanCoding>
where
    R: Read + Seek,
    W: Write,
{
    let coding = HuffmanCoding::from_reader(&mut r)?;
    r.seek(SeekFrom::Start(0))?;
    coding.encode(r, out)?;
    Ok(coding)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn single_symbol_wire_format() {
        let coding = HuffmanCoding::from_bytes(b"aaaa").unwrap();
        // a = 1, padding 0001
        assert_eq!(coding.encode_bytes(b"aaaa").unwrap(), vec![0b0001_1111]);
        assert_eq!(coding.decode_bytes(&[0b0001_1111]), b"aaaa".to_vec());
    }

    #[test]
    fn wraparound_symbol_round_trips() {
        let input = vec![127u8; 9];
        let coding = HuffmanCoding::from_bytes(&input).unwrap();
        assert_eq!(coding.code_table().get(0).map(Code::len), Some(1));
        let encoded = coding.encode_bytes(&input).unwrap();
        // nine data bits need a seven bit marker
        assert_eq!(encoded.len(), 2);
        assert_eq!(coding.decode_bytes(&encoded), input);
    }

    #[test]
    fn tie_break_wire_format() {
        let coding = HuffmanCoding::from_bytes(b"aabc").unwrap();
        // a=0 a=0 b=10 c=11 -> 001011, marker 01
        assert_eq!(coding.encode_bytes(b"aabc").unwrap(), vec![0b0100_1011]);
    }

    #[test]
    fn unknown_symbol_is_reported() {
        let coding = HuffmanCoding::from_bytes(b"abc").unwrap();
        match coding.encode_bytes(b"abcd") {
            Err(HuffmanError::UnknownSymbol { symbol, offset }) => {
                assert_eq!(symbol, b'd');
                assert_eq!(offset, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn truncated_code_is_ignored() {
        let coding = HuffmanCoding::from_bytes(b"aabc").unwrap();
        // 0 then a dangling 1
        let bits: Code = "01".parse().unwrap();
        assert_eq!(decode_bits(coding.tree(), bits.bits()), b"a".to_vec());
    }

    #[test]
    fn stream_round_trip() {
        let text = b"It was the best of times, it was the worst of times.\n".to_vec();
        let mut encoded = Vec::new();
        let coding = encode(Cursor::new(&text), &mut encoded).unwrap();
        assert!(encoded.len() < text.len());

        let mut decoded = Vec::new();
        coding.decode(Cursor::new(&encoded), &mut decoded).unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn encoded_len_matches() {
        let text = b"abracadabra";
        let coding = HuffmanCoding::from_bytes(text).unwrap();
        let bits = coding.encoded_bit_len(text).unwrap();
        let expected = coding.average_code_len() * text.len() as f64;
        assert!((bits as f64 - expected).abs() < 1e-9);
        let encoded = coding.encode_bytes(text).unwrap();
        assert_eq!(encoded.len() * 8, bits + bitstream::padding_len(bits));
    }
}
