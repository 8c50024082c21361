use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::{open_output_file, path_to_string, Result};

pub mod code_table;
pub mod compressed;

const TEMPORARY_FILE_SUFFIX: &str = ".tmp";

fn temporary_path(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    file_name.push(TEMPORARY_FILE_SUFFIX);
    path.with_file_name(file_name)
}

fn write_to_file<F>(file: File, write_content: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let mut writer = BufWriter::new(file);
    write_content(&mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Writes a file completely or not at all.
///
/// Content goes to a sibling temporary file first, which replaces the
/// target only after every byte was written.
pub fn write_atomically<F>(path: &Path, write_content: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let temp_path = temporary_path(path);
    let file = open_output_file(&temp_path)?;
    write_to_file(file, write_content)
        .and_then(|_| fs::rename(&temp_path, path))
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            Error::FailedToWriteFile(path_to_string(path), e)
        })
}
