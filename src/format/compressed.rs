use std::io::Read;
use std::path::Path;

use crate::binary_stream::{pack, unpack};
use crate::error::Error;
use crate::{open_input_file, path_to_string, Result};

use super::write_atomically;

const SYMBOL_COUNT_HEADER_LENGTH: usize = 4;

/// Content of a compressed file: symbol count header plus packed payload.
///
/// No code table travels with the payload, decoding needs the matching
/// code table file or the tree of the encoding session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedData {
    symbol_count: u32,
    payload: Vec<u8>,
}

impl CompressedData {
    pub fn new(bits: &[bool], symbol_count: usize) -> Result<Self> {
        let symbol_count =
            u32::try_from(symbol_count).map_err(|_| Error::SymbolCountOverflow(symbol_count))?;
        Ok(Self {
            symbol_count,
            payload: pack(bits),
        })
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_count as usize
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// All payload bits, padding included
    pub fn bits(&self) -> Vec<bool> {
        unpack(&self.payload, self.payload.len() * 8)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SYMBOL_COUNT_HEADER_LENGTH + self.payload.len());
        bytes.extend_from_slice(&self.symbol_count.to_be_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Some((header, payload)) = bytes.split_first_chunk::<SYMBOL_COUNT_HEADER_LENGTH>()
        else {
            return Err(Error::CompressedHeaderMissing(bytes.len()));
        };
        Ok(Self {
            symbol_count: u32::from_be_bytes(*header),
            payload: payload.to_vec(),
        })
    }
}

pub fn write_compressed(bits: &[bool], symbol_count: usize, path: &Path) -> Result<()> {
    let data = CompressedData::new(bits, symbol_count)?;
    let bytes = data.to_bytes();
    crate::logger::log_compressed_data(&data);
    write_atomically(path, |writer| writer.write_all(&bytes))?;
    log::info!(
        "Wrote {} symbols in {} bytes to '{}'",
        symbol_count,
        bytes.len(),
        path.display()
    );
    Ok(())
}

pub fn read_compressed(path: &Path) -> Result<CompressedData> {
    let mut file = open_input_file(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::FailedToReadFile(path_to_string(path), e))?;
    let data = CompressedData::from_bytes(&bytes)?;
    log::info!(
        "Read {} symbols in {} bytes from '{}'",
        data.symbol_count(),
        bytes.len(),
        path.display()
    );
    Ok(data)
}
