use std::borrow::Cow;

pub mod code;
pub mod frequency;
pub mod tree;
pub mod trie;

pub type Symbol = char;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolFrequency {
    pub symbol: Symbol,
    pub frequency: usize,
}

impl From<(Symbol, usize)> for SymbolFrequency {
    fn from(value: (Symbol, usize)) -> Self {
        Self {
            symbol: value.0,
            frequency: value.1,
        }
    }
}

/// Turns a bit sequence back into text by walking a prefix-free code.
///
/// Decoding stops as soon as `symbol_count` symbols were produced, so
/// padding bits following the last code are never interpreted.
pub trait PrefixDecoder {
    fn decode_symbols<I>(&self, bits: I, symbol_count: usize) -> crate::Result<String>
    where
        I: IntoIterator<Item = bool>;
}

const DISPLAY_TOKENS: [(Symbol, &str); 4] = [
    (' ', "SPACE"),
    ('\n', "NEWLINE"),
    ('\t', "TAB"),
    ('\r', "RETURN"),
];

/// Human readable rendering of a symbol, whitespace is spelled out
pub fn display_token(symbol: Symbol) -> Cow<'static, str> {
    DISPLAY_TOKENS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, token)| Cow::Borrowed(*token))
        .unwrap_or_else(|| Cow::Owned(symbol.to_string()))
}

pub fn parse_display_token(token: &str) -> Option<Symbol> {
    if let Some((symbol, _)) = DISPLAY_TOKENS.iter().find(|(_, t)| *t == token) {
        return Some(*symbol);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Some(symbol),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::{display_token, parse_display_token};

    #[test]
    fn whitespace_symbols_use_tokens() {
        assert_eq!(display_token(' '), "SPACE");
        assert_eq!(display_token('\n'), "NEWLINE");
        assert_eq!(display_token('\t'), "TAB");
        assert_eq!(display_token('\r'), "RETURN");
        assert_eq!(display_token('x'), "x");
        assert_eq!(display_token('ß'), "ß");
    }

    #[test]
    fn tokens_parse_back_to_symbols() {
        for symbol in [' ', '\n', '\t', '\r', 'a', '\'', ':', 'ß'] {
            assert_eq!(parse_display_token(&display_token(symbol)), Some(symbol));
        }
    }

    #[test]
    fn unknown_multi_character_tokens_are_rejected() {
        assert_eq!(parse_display_token("SPAC"), None);
        assert_eq!(parse_display_token(""), None);
    }
}
