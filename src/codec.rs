use std::path::{Path, PathBuf};

use threadpool::ThreadPool;

use crate::format::code_table::{read_code_table, write_code_table};
use crate::format::compressed::{read_compressed, write_compressed};
use crate::huffman::code::CodeTable;
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::tree::HuffmanTree;
use crate::huffman::trie::DecodeTrie;
use crate::huffman::PrefixDecoder;
use crate::stats::CompressionStats;
use crate::error::Error;
use crate::{path_to_string, CompressArguments, Result};

pub const DEFAULT_COMPRESSED_FILE_NAME: &str = "compressedBinary.txt";
pub const DEFAULT_CODE_TABLE_FILE_NAME: &str = "huffmanCodes.txt";
pub const DEFAULT_DECOMPRESSED_FILE_NAME: &str = "decompressed.txt";

/// Where the artifacts of a session are written
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    pub output_directory: PathBuf,
    pub compressed_file_name: String,
    pub code_table_file_name: String,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            compressed_file_name: DEFAULT_COMPRESSED_FILE_NAME.to_owned(),
            code_table_file_name: DEFAULT_CODE_TABLE_FILE_NAME.to_owned(),
        }
    }
}

impl CodecOptions {
    pub fn in_directory(output_directory: impl Into<PathBuf>) -> Self {
        Self {
            output_directory: output_directory.into(),
            ..Self::default()
        }
    }

    pub fn compressed_file_path(&self) -> PathBuf {
        self.output_directory.join(&self.compressed_file_name)
    }

    pub fn code_table_file_path(&self) -> PathBuf {
        self.output_directory.join(&self.code_table_file_name)
    }
}

impl From<&CompressArguments> for CodecOptions {
    fn from(value: &CompressArguments) -> Self {
        Self {
            output_directory: value.output_directory.clone(),
            compressed_file_name: value.compressed_file_name.clone(),
            code_table_file_name: value.code_table_file_name.clone(),
        }
    }
}

/// Outcome of one encode call.
///
/// Holds the tree, which the compressed file does not carry, so the
/// same session can decode its own output without the code table file.
#[derive(Debug)]
pub struct EncodedSession {
    tree: HuffmanTree,
    code_table: CodeTable,
    stats: CompressionStats,
    compressed_file: PathBuf,
    code_table_file: PathBuf,
}

impl EncodedSession {
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.code_table
    }

    pub fn stats(&self) -> &CompressionStats {
        &self.stats
    }

    pub fn compressed_file(&self) -> &Path {
        &self.compressed_file
    }

    pub fn code_table_file(&self) -> &Path {
        &self.code_table_file
    }

    /// Decodes the compressed file written by this session with its tree
    pub fn decode(&self) -> Result<String> {
        decode(&self.compressed_file, &self.tree)
    }
}

pub struct Encoder<'a> {
    options: &'a CodecOptions,
    threadpool: &'a ThreadPool,
}

impl<'a> Encoder<'a> {
    pub fn new(options: &'a CodecOptions, threadpool: &'a ThreadPool) -> Self {
        Encoder {
            options,
            threadpool,
        }
    }

    /// Compresses `text` into the compressed file and the code table file
    pub fn encode(&self, text: &str) -> Result<EncodedSession> {
        let compressed_file = self.options.compressed_file_path();
        let code_table_file = self.options.code_table_file_path();
        if compressed_file == code_table_file {
            return Err(Error::OutputFilesCollide(path_to_string(&compressed_file)));
        }

        let frequencies = FrequencyTable::count_parallel(text, self.threadpool);
        let tree = HuffmanTree::new(&frequencies)?;
        log::debug!("Huffman tree\n{}", tree);
        let code_table = CodeTable::from(&tree);
        let bits = code_table.encode(text)?;
        let stats = CompressionStats::compute(text, &code_table)?;
        log::info!(
            "Encoded {} symbols ({} distinct) into {} bits",
            frequencies.total_symbols(),
            frequencies.len(),
            bits.len()
        );

        write_compressed(&bits, frequencies.total_symbols(), &compressed_file)?;
        write_code_table(&code_table, &code_table_file)?;

        Ok(EncodedSession {
            tree,
            code_table,
            stats,
            compressed_file,
            code_table_file,
        })
    }
}

/// Decodes a compressed file with the tree or code table it was encoded with
pub fn decode<D: PrefixDecoder>(compressed_file: &Path, decoder: &D) -> Result<String> {
    let data = read_compressed(compressed_file)?;
    decoder.decode_symbols(data.bits(), data.symbol_count())
}

pub fn decode_with_code_table_file(compressed_file: &Path, code_table_file: &Path) -> Result<String> {
    let code_table = read_code_table(code_table_file)?;
    decode(compressed_file, &DecodeTrie::from(&code_table))
}
