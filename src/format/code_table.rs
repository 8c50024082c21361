use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::error::Error;
use crate::huffman::code::{Code, CodeTable};
use crate::huffman::{parse_display_token, Symbol};
use crate::{open_input_file, path_to_string, Result};

use super::write_atomically;

const QUOTE: char = '\'';
const SEPARATOR: &str = ": ";

/// Writes one `'<display>': <code>` line per symbol, in symbol order
pub fn write_entries(code_table: &CodeTable, writer: &mut dyn Write) -> io::Result<()> {
    write!(writer, "{}", code_table)
}

/// Parses a single code table line.
///
/// `line_number` starts at 1 and only serves error reporting.
pub fn parse_line(line_number: usize, line: &str) -> Result<(Symbol, Code)> {
    let malformed = || Error::MalformedCodeTableLine(line_number, line.to_owned());
    let (quoted_token, code) = line.trim().rsplit_once(SEPARATOR).ok_or_else(malformed)?;
    let token = quoted_token
        .strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
        .ok_or_else(malformed)?;
    let symbol = parse_display_token(token).ok_or_else(malformed)?;
    let code = code.parse::<Code>().map_err(|_| malformed())?;
    Ok((symbol, code))
}

/// Reads a code table, skipping blank and malformed lines
pub fn parse_entries<R: BufRead>(reader: R) -> io::Result<CodeTable> {
    let mut code_table = CodeTable::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(index + 1, &line) {
            Ok((symbol, code)) => {
                if let Some(previous) = code_table.insert(symbol, code) {
                    log::warn!(
                        "Line {} replaces code {} of a symbol listed before",
                        index + 1,
                        previous
                    );
                }
            }
            Err(error) => log::warn!("Skipping line: {}", error),
        }
    }
    Ok(code_table)
}

pub fn write_code_table(code_table: &CodeTable, path: &Path) -> Result<()> {
    crate::logger::log_code_table(code_table);
    write_atomically(path, |writer| write_entries(code_table, writer))?;
    log::info!(
        "Wrote {} codes to '{}'",
        code_table.len(),
        path.display()
    );
    Ok(())
}

pub fn read_code_table(path: &Path) -> Result<CodeTable> {
    let file = open_input_file(path)?;
    let code_table = parse_entries(BufReader::new(file)).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => Error::InvalidUtf8(path_to_string(path)),
        _ => Error::FailedToReadFile(path_to_string(path), e),
    })?;
    log::info!(
        "Read {} codes from '{}'",
        code_table.len(),
        path.display()
    );
    Ok(code_table)
}
