use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use super::frequency::FrequencyTable;
use super::{display_token, PrefixDecoder, Symbol};
use crate::binary_stream::bits_to_string;
use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> usize {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    fn child(&self, take_right: bool) -> Option<&Node> {
        match self {
            Self::Internal { left, right, .. } => Some(if take_right { right } else { left }),
            Self::Leaf { .. } => None,
        }
    }
}

// equal weights leave the queue in insertion order
struct QueueEntry {
    sequence: usize,
    node: Node,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .weight()
            .cmp(&other.node.weight())
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
    leaf_count: usize,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves are queued in ascending symbol order. On equal weight the
    /// node queued first is popped first and becomes the left child.
    pub fn new(frequencies: &FrequencyTable) -> crate::Result<HuffmanTree> {
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        let mut sequence = 0;
        for sf in frequencies.iter() {
            heap.push(Reverse(QueueEntry {
                sequence,
                node: Node::Leaf {
                    symbol: sf.symbol,
                    weight: sf.frequency,
                },
            }));
            sequence += 1;
        }
        let leaf_count = heap.len();

        // merge nodes until one is left
        while heap.len() > 1 {
            let (Some(Reverse(t1)), Some(Reverse(t2))) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = Node::Internal {
                weight: t1.node.weight() + t2.node.weight(),
                left: Box::new(t1.node),
                right: Box::new(t2.node),
            };
            heap.push(Reverse(QueueEntry { sequence, node }));
            sequence += 1;
        }
        let root = heap.pop().ok_or(Error::EmptyInput)?.0.node;
        Ok(HuffmanTree { root, leaf_count })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// A tree over a single distinct symbol consists of its root leaf only
    pub fn is_degenerate(&self) -> bool {
        matches!(self.root, Node::Leaf { .. })
    }
}

impl PrefixDecoder for HuffmanTree {
    fn decode_symbols<I>(&self, bits: I, symbol_count: usize) -> crate::Result<String>
    where
        I: IntoIterator<Item = bool>,
    {
        let mut decoded = String::new();
        let mut decoded_count = 0;
        let mut path = Vec::new();
        let mut current = &self.root;
        let mut bits = bits.into_iter();
        while decoded_count < symbol_count {
            let Some(take_right) = bits.next() else {
                return Err(Error::TruncatedStream {
                    decoded: decoded_count,
                    expected: symbol_count,
                });
            };
            path.push(take_right);
            let next = match &self.root {
                // the single symbol of a degenerate tree is coded as "0"
                Node::Leaf { .. } if !take_right => &self.root,
                Node::Leaf { .. } => return Err(Error::UnknownCode(bits_to_string(&path))),
                Node::Internal { .. } => current
                    .child(take_right)
                    .ok_or_else(|| Error::UnknownCode(bits_to_string(&path)))?,
            };
            match next {
                Node::Leaf { symbol, .. } => {
                    decoded.push(*symbol);
                    decoded_count += 1;
                    path.clear();
                    current = &self.root;
                }
                Node::Internal { .. } => current = next,
            }
        }
        Ok(decoded)
    }
}

const BOX_DRAWINGS_DOUBLE_HORIZONTAL: &str = "═";
const SPACE: &str = " ";

// Node & Tree visualization
impl Node {
    fn get_string(&self) -> Vec<String> {
        match self {
            Self::Leaf { symbol, weight } => {
                vec![format!("(s:{},w:{})", display_token(*symbol), weight)]
            }
            Self::Internal { left, right, .. } => {
                let left_box: Vec<String> = left.get_string();
                let right_box: Vec<String> = right.get_string();
                let left_width = left_box[0].chars().count();
                let right_width = right_box[0].chars().count();
                let mut result: Vec<String> = Vec::new();

                result.push(format!(
                    "{}•{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));
                result.push(format!(
                    "{}║{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));

                let left_pos = center_of_first_line(&left_box[0]);
                let right_pos = center_of_first_line(&right_box[0]);
                result.push(format!(
                    "{}╔{}╩{}╗{}",
                    SPACE.repeat(left_pos),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(left_width - left_pos - 1),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(right_pos),
                    SPACE.repeat(right_width - right_pos - 1)
                ));

                let left_depth = left_box.len();
                let right_depth = right_box.len();
                for i in 0..std::cmp::max(left_depth, right_depth) {
                    let left_str = left_box
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| SPACE.repeat(left_width));
                    let right_str = right_box
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| SPACE.repeat(right_width));
                    result.push(format!("{} {}", left_str, right_str));
                }
                result
            }
        }
    }
}

fn center_of_first_line(line: &str) -> usize {
    let offset = line.chars().position(|c| c != ' ').unwrap_or(0);
    let content_width = line.chars().skip(offset).filter(|&c| c != ' ').count();
    (offset * 2 + content_width) / 2
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in self.root.get_string().iter() {
            writeln!(f, "{}", s)?;
        }
        Ok(())
    }
}
