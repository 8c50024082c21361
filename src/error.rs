use std::fmt::Display;

use crate::verify::Mismatch;

#[derive(Debug)]
pub enum Error {
    EmptyInput,
    TruncatedStream { decoded: usize, expected: usize },
    MalformedCodeTableLine(usize, String),
    UnknownCode(String),
    SymbolNotInCodeTable(char),
    SymbolCountOverflow(usize),
    CompressedHeaderMissing(usize),
    InputFileNotFound(String),
    InputFileIsNotText(String),
    InvalidUtf8(String),
    OutputFilesCollide(String),
    DecodedTextMismatch { mismatches: Vec<Mismatch>, total: usize },
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadFile(String, std::io::Error),
    FailedToWriteFile(String, std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input contains no symbols to encode"),
            Self::TruncatedStream { decoded, expected } => {
                write!(
                    f,
                    "Bit stream exhausted after {} of {} symbols",
                    decoded, expected
                )
            }
            Self::MalformedCodeTableLine(line_number, line) => {
                write!(
                    f,
                    "Malformed code table entry in line {}: '{}'",
                    line_number, line
                )
            }
            Self::UnknownCode(code) => {
                write!(f, "Bit sequence '{}' does not match any known code", code)
            }
            Self::SymbolNotInCodeTable(symbol) => {
                write!(f, "Symbol {:?} not present in code table", symbol)
            }
            Self::SymbolCountOverflow(count) => {
                write!(
                    f,
                    "Input holds {} symbols, but at most {} can be stored",
                    count,
                    u32::MAX
                )
            }
            Self::CompressedHeaderMissing(length) => {
                write!(
                    f,
                    "Compressed data is {} bytes long and lacks the 4 byte symbol count header",
                    length
                )
            }
            Self::InputFileNotFound(path) => {
                write!(f, "Input file '{}' not found", path)
            }
            Self::InputFileIsNotText(path) => {
                write!(f, "Input file '{}' is not a .txt file", path)
            }
            Self::InvalidUtf8(path) => {
                write!(f, "Content of '{}' is not valid UTF-8", path)
            }
            Self::OutputFilesCollide(path) => {
                write!(
                    f,
                    "Compressed file and code table file both point to '{}'",
                    path
                )
            }
            Self::DecodedTextMismatch { mismatches, total } => {
                write!(
                    f,
                    "Decoded text differs from the original at {} positions",
                    total
                )?;
                for mismatch in mismatches {
                    write!(f, "\n  {}", mismatch)?;
                }
                if *total > mismatches.len() {
                    write!(f, "\n  ...")?;
                }
                Ok(())
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadFile(path, error) => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            Self::FailedToWriteFile(path, error) => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToReadFile(_, error)
            | Self::FailedToWriteFile(_, error) => Some(error),
            _ => None,
        }
    }
}
