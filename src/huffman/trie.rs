use super::code::{Code, CodeTable};
use super::{display_token, PrefixDecoder, Symbol};
use crate::binary_stream::bits_to_string;
use crate::error::Error;

#[derive(Clone, Copy, Debug)]
enum TrieNode {
    Branch { children: [Option<usize>; 2] },
    Symbol(Symbol),
}

const ROOT_INDEX: usize = 0;

/// Code to symbol lookup rebuilt from a code table.
///
/// Decoding through the trie gives the same result as walking the
/// tree the table was generated from.
#[derive(Clone, Debug)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
    symbol_count: usize,
}

impl DecodeTrie {
    pub fn new(code_table: &CodeTable) -> DecodeTrie {
        let mut trie = DecodeTrie {
            nodes: vec![TrieNode::Branch {
                children: [None, None],
            }],
            symbol_count: 0,
        };
        for (symbol, code) in code_table.iter() {
            if trie.insert(symbol, code) {
                trie.symbol_count += 1;
            } else {
                log::warn!(
                    "Skipping code {} of symbol '{}', it collides with another code",
                    code,
                    display_token(symbol)
                );
            }
        }
        trie
    }

    /// Number of symbols reachable through the trie
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    fn insert(&mut self, symbol: Symbol, code: &Code) -> bool {
        let Some((&last_bit, path)) = code.bits().split_last() else {
            return false;
        };
        let mut current_index = ROOT_INDEX;
        for &bit in path {
            current_index = match self.child(current_index, bit) {
                Some(index) => match self.nodes[index] {
                    TrieNode::Branch { .. } => index,
                    TrieNode::Symbol(_) => return false,
                },
                None => self.push_child(
                    current_index,
                    bit,
                    TrieNode::Branch {
                        children: [None, None],
                    },
                ),
            };
        }
        if self.child(current_index, last_bit).is_some() {
            return false;
        }
        self.push_child(current_index, last_bit, TrieNode::Symbol(symbol));
        true
    }

    fn child(&self, index: usize, bit: bool) -> Option<usize> {
        match self.nodes[index] {
            TrieNode::Branch { children } => children[bit as usize],
            TrieNode::Symbol(_) => None,
        }
    }

    fn push_child(&mut self, parent_index: usize, bit: bool, node: TrieNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        if let TrieNode::Branch { children } = &mut self.nodes[parent_index] {
            children[bit as usize] = Some(index);
        }
        index
    }
}

impl From<&CodeTable> for DecodeTrie {
    fn from(value: &CodeTable) -> Self {
        Self::new(value)
    }
}

impl PrefixDecoder for DecodeTrie {
    fn decode_symbols<I>(&self, bits: I, symbol_count: usize) -> crate::Result<String>
    where
        I: IntoIterator<Item = bool>,
    {
        let mut decoded = String::new();
        let mut decoded_count = 0;
        let mut path = Vec::new();
        let mut current_index = ROOT_INDEX;
        let mut bits = bits.into_iter();
        while decoded_count < symbol_count {
            let Some(bit) = bits.next() else {
                return Err(Error::TruncatedStream {
                    decoded: decoded_count,
                    expected: symbol_count,
                });
            };
            path.push(bit);
            let next_index = self
                .child(current_index, bit)
                .ok_or_else(|| Error::UnknownCode(bits_to_string(&path)))?;
            match self.nodes[next_index] {
                TrieNode::Symbol(symbol) => {
                    decoded.push(symbol);
                    decoded_count += 1;
                    path.clear();
                    current_index = ROOT_INDEX;
                }
                TrieNode::Branch { .. } => current_index = next_index,
            }
        }
        Ok(decoded)
    }
}
