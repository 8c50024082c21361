use std::fmt;

use crate::huffman::code::CodeTable;

/// Size comparison between a text and its Huffman encoding
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressionStats {
    /// UTF-8 byte length of the text
    pub original_bytes: usize,
    /// encoded bit count rounded up to whole bytes
    pub compressed_bytes: usize,
    pub percent_saved: f64,
}

impl CompressionStats {
    pub fn compute(original_text: &str, code_table: &CodeTable) -> crate::Result<Self> {
        let encoded_bits = code_table.encoded_bit_count(original_text)?;
        Ok(Self::from_sizes(original_text.len(), encoded_bits))
    }

    pub fn from_sizes(original_bytes: usize, encoded_bits: usize) -> Self {
        let compressed_bytes = encoded_bits.div_ceil(8);
        let percent_saved = if original_bytes == 0 {
            0.0
        } else {
            (1.0 - compressed_bytes as f64 / original_bytes as f64) * 100.0
        };
        Self {
            original_bytes,
            compressed_bytes,
            percent_saved,
        }
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original size: {} bytes", self.original_bytes)?;
        writeln!(f, "Compressed size: {} bytes", self.compressed_bytes)?;
        write!(f, "Compression: {:.2}%", self.percent_saved)
    }
}
