use std::fmt;

use crate::error::Error;
use crate::huffman::display_token;
use crate::Result;

const MAX_REPORTED_MISMATCHES: usize = 10;

/// A character position where decoded and original text disagree.
///
/// `None` marks a position past the end of the shorter text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub position: usize,
    pub original: Option<char>,
    pub decoded: Option<char>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show(symbol: Option<char>) -> String {
            symbol.map_or("<end>".to_owned(), |symbol| {
                format!("'{}'", display_token(symbol))
            })
        }
        write!(
            f,
            "Position {}: original {} vs decoded {}",
            self.position,
            show(self.original),
            show(self.decoded)
        )
    }
}

pub fn find_mismatches(original: &str, decoded: &str) -> Vec<Mismatch> {
    let mut original = original.chars();
    let mut decoded = decoded.chars();
    let mut mismatches = Vec::new();
    let mut position = 0;
    loop {
        match (original.next(), decoded.next()) {
            (None, None) => return mismatches,
            (a, b) if a == b => {}
            (a, b) => mismatches.push(Mismatch {
                position,
                original: a,
                decoded: b,
            }),
        }
        position += 1;
    }
}

/// Fails with the first differing positions unless both texts are equal
pub fn verify_decoded_text(original: &str, decoded: &str) -> Result<()> {
    let mut mismatches = find_mismatches(original, decoded);
    if mismatches.is_empty() {
        return Ok(());
    }
    let total = mismatches.len();
    log::warn!("Decoded text differs from the original at {} positions", total);
    mismatches.truncate(MAX_REPORTED_MISMATCHES);
    Err(Error::DecodedTextMismatch { mismatches, total })
}

#[cfg(test)]
mod test {
    use super::{find_mismatches, verify_decoded_text, Mismatch};
    use crate::error::Error;

    #[test]
    fn equal_texts_verify() {
        assert!(find_mismatches("größe\n", "größe\n").is_empty());
        assert!(verify_decoded_text("", "").is_ok());
    }

    #[test]
    fn positions_count_characters() {
        let mismatches = find_mismatches("añb c", "añx c");
        assert_eq!(
            mismatches,
            vec![Mismatch {
                position: 2,
                original: Some('b'),
                decoded: Some('x'),
            }]
        );
    }

    #[test]
    fn length_difference_is_a_mismatch() {
        let mismatches = find_mismatches("abc", "a");
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].position, 1);
        assert_eq!(mismatches[0].decoded, None);
        assert_eq!(
            mismatches[1].to_string(),
            "Position 2: original 'c' vs decoded <end>"
        );
    }

    #[test]
    fn reported_mismatches_are_capped() {
        let original = "a".repeat(25);
        let decoded = "b".repeat(25);
        match verify_decoded_text(&original, &decoded) {
            Err(Error::DecodedTextMismatch { mismatches, total }) => {
                assert_eq!(total, 25);
                assert_eq!(mismatches.len(), 10);
                assert_eq!(mismatches[9].position, 9);
            }
            other => panic!("Expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn whitespace_is_shown_by_token() {
        let mismatches = find_mismatches("a b", "a\tb");
        assert_eq!(
            mismatches[0].to_string(),
            "Position 1: original 'SPACE' vs decoded 'TAB'"
        );
    }
}
