use std::collections::VecDeque;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyEntry;
use crate::{Symbol, ALPHABET_SIZE};

/// A node of the code tree. Interior nodes own both children.
#[derive(Clone, Debug, PartialEq)]
pub enum HuffmanNode {
    Leaf(FrequencyEntry),
    Interior {
        probability: f64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn probability(&self) -> f64 {
        match self {
            HuffmanNode::Leaf(entry) => entry.probability,
            HuffmanNode::Interior { probability, .. } => *probability,
        }
    }

    /// the symbol of a leaf, `None` for interior nodes
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            HuffmanNode::Leaf(entry) => Some(entry.symbol),
            HuffmanNode::Interior { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf(_))
    }

    /// follows the right branch for `true`, the left for `false`
    pub fn child(&self, bit: bool) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Leaf(_) => None,
            HuffmanNode::Interior { left, right, .. } => Some(if bit { &**right } else { &**left }),
        }
    }
}

/// combines two nodes, the first one dequeued becomes the left ("0") subtree
fn combine(left: HuffmanNode, right: HuffmanNode) -> HuffmanNode {
    HuffmanNode::Interior {
        probability: left.probability() + right.probability(),
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// The two FIFO queues of the merge. `source` holds the leaves in sorted
/// order, `target` receives merged nodes, which come out in non-decreasing
/// probability, so comparing the two fronts always yields the minimum.
struct MergeQueues {
    source: VecDeque<HuffmanNode>,
    target: VecDeque<HuffmanNode>,
}

impl MergeQueues {
    fn new(entries: &[FrequencyEntry]) -> MergeQueues {
        MergeQueues {
            source: entries.iter().copied().map(HuffmanNode::Leaf).collect(),
            target: VecDeque::with_capacity(entries.len()),
        }
    }

    fn done(&self) -> bool {
        self.source.is_empty() && self.target.len() <= 1
    }

    /// Dequeues the front with the smaller probability. Source wins ties.
    fn dequeue_min(&mut self) -> Option<HuffmanNode> {
        let from_source = match (self.source.front(), self.target.front()) {
            (Some(s), Some(t)) => s.probability() <= t.probability(),
            (Some(_), None) => true,
            (None, _) => false,
        };
        if from_source {
            self.source.pop_front()
        } else {
            self.target.pop_front()
        }
    }
}

/// An immutable Huffman code tree with at least two leaves
#[derive(Clone, Debug, PartialEq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Builds the tree from a list sorted by [`FrequencyEntry::canonical_cmp`]
    /// using the two-queue merge. The same list always yields the same tree.
    /// Every symbol must lie inside the alphabet.
    pub fn build(entries: &[FrequencyEntry]) -> Result<HuffmanTree> {
        let malformed = || HuffmanError::MalformedTree {
            leaves: entries.len(),
        };
        if entries.len() < 2 {
            return Err(malformed());
        }
        if let Some((offset, entry)) = entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.symbol as usize >= ALPHABET_SIZE)
        {
            return Err(HuffmanError::SymbolOutOfRange {
                byte: entry.symbol,
                offset,
            });
        }
        let mut queues = MergeQueues::new(entries);
        while !queues.done() {
            let left = queues.dequeue_min().ok_or_else(malformed)?;
            let right = queues.dequeue_min().ok_or_else(malformed)?;
            queues.target.push_back(combine(left, right));
        }
        let root = queues.target.pop_front().ok_or_else(malformed)?;
        let tree = HuffmanTree { root };
        log::debug!(
            "built huffman tree: {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// leaves in left-to-right order
    pub fn leaves(&self) -> Vec<&FrequencyEntry> {
        let mut leaves = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf(entry) => leaves.push(entry),
                HuffmanNode::Interior { left, right, .. } => {
                    stack.push(&**right);
                    stack.push(&**left);
                }
            }
        }
        leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf(_) => deepest = deepest.max(depth),
                HuffmanNode::Interior { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
        deepest
    }
}
