use std::fmt;
use std::str::FromStr;

use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanNode, HuffmanTree};
use crate::{BitVec, Symbol, ALPHABET_SIZE};

/// The path from the root to one leaf, `false` for left and `true` for right
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct Code {
    inner: BitVec,
}

impl Code {
    pub fn new() -> Code {
        Code {
            inner: BitVec::new(),
        }
    }

    pub fn push(&mut self, bit: bool) {
        self.inner.push(bit);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn bits(&self) -> &crate::BitSlice {
        &self.inner
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.inner.starts_with(self.inner.as_bitslice())
    }

    /// this code with one more step appended
    fn child(&self, bit: bool) -> Code {
        let mut code = self.clone();
        code.push(bit);
        code
    }
}

/// writes the code as a string of '0' and '1'
impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in self.inner.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Code> {
        let mut code = Code::new();
        for (position, found) in s.chars().enumerate() {
            match found {
                '0' => code.push(false),
                '1' => code.push(true),
                _ => return Err(HuffmanError::InvalidBitString { position, found }),
            }
        }
        Ok(code)
    }
}

/// Maps each symbol of the alphabet to its code, or to nothing when the
/// symbol is not a leaf of the tree the table was generated from.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walks `tree` depth first, appending `0` going left and `1` going
    /// right, and records the accumulated path at every leaf.
    pub fn generate(tree: &HuffmanTree) -> Result<CodeTable> {
        let root = tree.root();
        if root.is_leaf() {
            return Err(HuffmanError::MalformedTree { leaves: 1 });
        }
        let mut codes = vec![None; ALPHABET_SIZE];
        // explicit stack, skewed trees can be as deep as the alphabet is wide
        let mut stack = vec![(root, Code::new())];
        while let Some((node, code)) = stack.pop() {
            match node {
                HuffmanNode::Leaf(entry) => codes[entry.symbol as usize] = Some(code),
                HuffmanNode::Interior { left, right, .. } => {
                    stack.push((&**right, code.child(true)));
                    stack.push((&**left, code.child(false)));
                }
            }
        }
        let table = CodeTable { codes };
        log::trace!("code table: {}", table);
        Ok(table)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(symbol as usize).and_then(Option::as_ref)
    }

    /// symbols with a code, in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as Symbol, code)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (symbol, code) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{:?}={}", symbol as char, code)?;
        }
        Ok(())
    }
}
