use std::cmp::Ordering;

use crate::error::{HuffmanError, Result};
use crate::{Count, Symbol, ALPHABET_SIZE};

/// A symbol together with its probability of occurrence in the input
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyEntry {
    pub symbol: Symbol,
    pub probability: f64,
}

impl FrequencyEntry {
    pub fn new(symbol: Symbol, probability: f64) -> FrequencyEntry {
        FrequencyEntry {
            symbol,
            probability,
        }
    }

    /// Ascending probability, equal probabilities ordered by symbol value.
    /// This is the order the tree builder's source queue is filled in.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.probability
            .total_cmp(&other.probability)
            .then(self.symbol.cmp(&other.symbol))
    }
}

/// counts occurrences of every symbol, rejecting bytes outside the alphabet
pub fn count_symbols(input: &[u8]) -> Result<[Count; ALPHABET_SIZE]> {
    let mut counts = [0 as Count; ALPHABET_SIZE];
    for (offset, &byte) in input.iter().enumerate() {
        if byte as usize >= ALPHABET_SIZE {
            return Err(HuffmanError::SymbolOutOfRange { byte, offset });
        }
        counts[byte as usize] += 1;
    }
    Ok(counts)
}

/// Scans `input` and returns one entry per distinct symbol, sorted by
/// [`FrequencyEntry::canonical_cmp`].
///
/// When the input holds a single distinct symbol, a zero probability entry
/// for the next symbol (wrapping 127 to 0) is added so the tree gets two leaves.
pub fn sorted_frequencies(input: &[u8]) -> Result<Vec<FrequencyEntry>> {
    if input.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }
    let counts = count_symbols(input)?;
    let total = input.len() as f64;

    let mut entries: Vec<FrequencyEntry> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(symbol, &count)| FrequencyEntry::new(symbol as Symbol, count as f64 / total))
        .collect();

    if let [only] = entries[..] {
        let companion = ((only.symbol as usize + 1) % ALPHABET_SIZE) as Symbol;
        entries.push(FrequencyEntry::new(companion, 0.0));
    }

    entries.sort_by(FrequencyEntry::canonical_cmp);
    log::trace!("sorted frequencies: {:?}", entries);
    Ok(entries)
}
