use std::path::Path;

use crate::format::compressed::CompressedData;
use crate::huffman::code::CodeTable;
use crate::huffman::display_token;

const LOG_CONFIGURATION_FILE: &str = "log4rs.yaml";
const LOGGED_PAYLOAD_BYTES: usize = 32;

#[ctor::ctor]
fn init() {
    if let Err(message) = init_from_file(Path::new(LOG_CONFIGURATION_FILE)) {
        eprintln!("Logging disabled: {}", message);
    }
}

/// Without a configuration file logging stays disabled
fn init_from_file(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    log4rs::init_file(path, Default::default())
        .map_err(|e| format!("invalid configuration '{}': {}", path.display(), e))
}

pub fn log_code_table(code_table: &CodeTable) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    for (symbol, code) in code_table.iter() {
        log::debug!("'{}' ({} bits): {}", display_token(symbol), code.len(), code);
    }
}

pub fn log_compressed_data(data: &CompressedData) {
    fn get_byte_array(bytes: &[u8]) -> Vec<String> {
        bytes.iter().map(|byte| format!("{:02X}", byte)).collect()
    }
    let payload = data.payload();
    log::debug!(
        "{:?} {:?}{}",
        get_byte_array(&(data.symbol_count() as u32).to_be_bytes()),
        get_byte_array(&payload[..payload.len().min(LOGGED_PAYLOAD_BYTES)]),
        if payload.len() > LOGGED_PAYLOAD_BYTES {
            " ..."
        } else {
            ""
        }
    );
}
