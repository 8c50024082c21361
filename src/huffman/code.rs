use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::frequency::FrequencyTable;
use super::tree::{HuffmanTree, Node};
use super::{display_token, Symbol};
use crate::error::Error;

/// A code word, the path from the root to a leaf (`false` = left)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }

    fn with_bit(&self, bit: bool) -> Code {
        let mut bits = self.0.clone();
        bits.push(bit);
        Code(bits)
    }
}

impl From<Vec<bool>> for Code {
    fn from(value: Vec<bool>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseCodeError;

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseCodeError);
        }
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseCodeError),
            })
            .collect::<Result<Vec<bool>, _>>()
            .map(Code)
    }
}

/// Symbol to code mapping, iterated in symbol order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

fn fill_table(table: &mut BTreeMap<Symbol, Code>, node: &Node, current_code: Code) {
    match node {
        Node::Leaf { symbol, .. } => {
            // a lone root leaf still needs one bit per symbol
            let code = if current_code.is_empty() {
                current_code.with_bit(false)
            } else {
                current_code
            };
            table.insert(*symbol, code);
        }
        Node::Internal { left, right, .. } => {
            fill_table(table, left, current_code.with_bit(false));
            fill_table(table, right, current_code.with_bit(true));
        }
    }
}

impl CodeTable {
    /// Walks the tree depth first, left before right
    pub fn generate(tree: &HuffmanTree) -> CodeTable {
        let mut codes = BTreeMap::new();
        fill_table(&mut codes, tree.root(), Code::default());
        CodeTable { codes }
    }

    /// Returns the code previously stored for `symbol`, if any
    pub fn insert(&mut self, symbol: Symbol, code: Code) -> Option<Code> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn encode(&self, text: &str) -> crate::Result<Vec<bool>> {
        let mut bits = Vec::new();
        for symbol in text.chars() {
            let code = self
                .get(symbol)
                .ok_or(Error::SymbolNotInCodeTable(symbol))?;
            bits.extend_from_slice(code.bits());
        }
        Ok(bits)
    }

    pub fn encoded_bit_count(&self, text: &str) -> crate::Result<usize> {
        text.chars().try_fold(0, |total, symbol| {
            self.get(symbol)
                .map(|code| total + code.len())
                .ok_or(Error::SymbolNotInCodeTable(symbol))
        })
    }

    /// Sum of frequency times code length; symbols without code count as zero
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> usize {
        frequencies
            .iter()
            .map(|sf| sf.frequency * self.get(sf.symbol).map_or(0, Code::len))
            .sum()
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(index, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(other_index, b)| index == other_index || !a.is_prefix_of(b))
        })
    }
}

impl From<&HuffmanTree> for CodeTable {
    fn from(value: &HuffmanTree) -> Self {
        Self::generate(value)
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            writeln!(f, "'{}': {}", display_token(symbol), code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Code, CodeTable, ParseCodeError};
    use crate::error::Error;
    use crate::huffman::frequency::FrequencyTable;
    use crate::huffman::tree::HuffmanTree;

    const CLASSICAL_FREQUENCIES: [(char, usize); 6] =
        [('a', 5), ('b', 9), ('c', 12), ('d', 13), ('e', 16), ('f', 45)];

    fn table_for(frequencies: &FrequencyTable) -> CodeTable {
        CodeTable::generate(&HuffmanTree::new(frequencies).unwrap())
    }

    fn code_string(table: &CodeTable, symbol: char) -> String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn classical_distribution_gets_textbook_codes() {
        let table = table_for(&FrequencyTable::from(CLASSICAL_FREQUENCIES));
        let expected = [
            ('a', "1100"),
            ('b', "1101"),
            ('c', "100"),
            ('d', "101"),
            ('e', "111"),
            ('f', "0"),
        ];
        for (symbol, expected_code) in expected {
            assert_eq!(
                code_string(&table, symbol),
                expected_code,
                "Code of symbol {} does not match",
                symbol
            );
        }
    }

    #[test]
    fn classical_distribution_reaches_optimal_weighted_length() {
        let frequencies = FrequencyTable::from(CLASSICAL_FREQUENCIES);
        let table = table_for(&frequencies);
        assert_eq!(table.weighted_length(&frequencies), 224);
    }

    #[test]
    fn every_symbol_gets_exactly_one_code() {
        let frequencies = FrequencyTable::count("Hello, World!\nHow are you?\t\r");
        let table = table_for(&frequencies);
        assert_eq!(table.len(), frequencies.len());
        for sf in frequencies.iter() {
            assert!(table.get(sf.symbol).is_some());
        }
    }

    #[test]
    fn generated_codes_are_prefix_free() {
        let table = table_for(&FrequencyTable::count(
            "It was the best of times, it was the worst of times.",
        ));
        assert!(table.is_prefix_free());
    }

    #[test]
    fn prefix_violation_is_detected() {
        let mut table = CodeTable::default();
        table.insert('a', "0".parse().unwrap());
        table.insert('b', "01".parse().unwrap());
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn more_frequent_symbols_get_shorter_codes() {
        let frequencies = FrequencyTable::count("aaaaaaaabbbbccd");
        let table = table_for(&frequencies);
        let length = |symbol| table.get(symbol).unwrap().len();
        assert!(length('a') <= length('b'));
        assert!(length('b') <= length('c'));
        assert!(length('c') <= length('d'));
    }

    #[test]
    fn single_symbol_gets_one_bit_code() {
        let table = table_for(&FrequencyTable::count("aaaa"));
        assert_eq!(code_string(&table, 'a'), "0");
        assert_eq!(table.encode("aaaa").unwrap(), vec![false; 4]);
    }

    #[test]
    fn encode_concatenates_codes() {
        // a=0, b=10, d=110, c=111
        let table = table_for(&FrequencyTable::count("aaaabbbccd"));
        let bits = table.encode("abdc").unwrap();
        assert_eq!(Code::from(bits).to_string(), "010110111");
        assert_eq!(table.encoded_bit_count("aaaabbbccd").unwrap(), 19);
    }

    #[test]
    fn encode_rejects_unknown_symbols() {
        let table = table_for(&FrequencyTable::count("ab"));
        assert!(matches!(
            table.encode("abc"),
            Err(Error::SymbolNotInCodeTable('c'))
        ));
        assert!(table.encoded_bit_count("z").is_err());
    }

    #[test]
    fn code_parsing_accepts_only_binary_digits() {
        assert_eq!("0110".parse::<Code>().unwrap().len(), 4);
        assert_eq!("".parse::<Code>(), Err(ParseCodeError));
        assert_eq!("01a".parse::<Code>(), Err(ParseCodeError));
    }

    #[test]
    fn display_lists_entries_sorted_with_tokens() {
        let table = table_for(&FrequencyTable::count("b a\n"));
        let listing = table.to_string();
        let symbols: Vec<&str> = listing
            .lines()
            .map(|line| line.rsplit_once(": ").unwrap().0)
            .collect();
        assert_eq!(symbols, vec!["'NEWLINE'", "'SPACE'", "'a'", "'b'"]);
    }
}
