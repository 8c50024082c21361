use std::{
    fs::{File, OpenOptions},
    io::{self, Read},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
use codec::{CodecOptions, EncodedSession, Encoder};
pub use error::Error;
use format::write_atomically;
use threadpool::ThreadPool;

pub mod binary_stream;
mod cli;
pub mod codec;
mod error;
pub mod format;
pub mod huffman;
mod logger;
pub mod stats;
pub mod verify;

pub type Result<T> = std::result::Result<T, error::Error>;

const TEXT_FILE_EXTENSION: &str = "txt";

pub enum Arguments {
    Compress(CompressArguments),
    Decompress(DecompressArguments),
}

pub struct CompressArguments {
    pub input_file: PathBuf,
    pub output_directory: PathBuf,
    pub compressed_file_name: String,
    pub code_table_file_name: String,
    pub number_of_threads: usize,
    pub print_codes: bool,
}

pub struct DecompressArguments {
    pub compressed_file: PathBuf,
    pub code_table_file: PathBuf,
    pub output_file: PathBuf,
    pub original_file: Option<PathBuf>,
}

fn path_to_string(file_path: &Path) -> String {
    file_path.display().to_string()
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputFileNotFound(path_to_string(file_path)),
        _ => Error::UnableToOpenInputFileForReading(path_to_string(file_path), e),
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_to_string(file_path), e))
}

fn ensure_text_file(file_path: &Path) -> Result<()> {
    match file_path.extension() {
        Some(extension) if extension == TEXT_FILE_EXTENSION => Ok(()),
        _ => Err(Error::InputFileIsNotText(path_to_string(file_path))),
    }
}

fn read_text_file(file_path: &Path) -> Result<String> {
    let mut file = open_input_file(file_path)?;
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => Error::InvalidUtf8(path_to_string(file_path)),
        _ => Error::FailedToReadFile(path_to_string(file_path), e),
    })?;
    Ok(text)
}

pub fn compress_text_file(arguments: &CompressArguments) -> Result<EncodedSession> {
    ensure_text_file(&arguments.input_file)?;
    let text = read_text_file(&arguments.input_file)?;
    let options = CodecOptions::from(arguments);
    let threadpool = ThreadPool::new(arguments.number_of_threads.max(1));
    let encoder = Encoder::new(&options, &threadpool);
    encoder.encode(&text)
}

pub fn decompress_text_file(arguments: &DecompressArguments) -> Result<String> {
    let text =
        codec::decode_with_code_table_file(&arguments.compressed_file, &arguments.code_table_file)?;
    write_atomically(&arguments.output_file, |writer| {
        writer.write_all(text.as_bytes())
    })?;
    log::info!(
        "Wrote {} decoded bytes to '{}'",
        text.len(),
        arguments.output_file.display()
    );
    if let Some(original_file) = &arguments.original_file {
        let original = read_text_file(original_file)?;
        verify::verify_decoded_text(&original, &text)?;
        log::info!("Decoded text matches '{}'", original_file.display());
    }
    Ok(text)
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::{ensure_text_file, read_text_file};
    use crate::error::Error;

    #[test]
    fn only_txt_files_are_accepted() {
        assert!(ensure_text_file(Path::new("notes.txt")).is_ok());
        assert!(matches!(
            ensure_text_file(Path::new("image.ppm")),
            Err(Error::InputFileIsNotText(_))
        ));
        assert!(ensure_text_file(Path::new("no_extension")).is_err());
    }

    #[test]
    fn missing_input_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_text_file(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(Error::InputFileNotFound(_))));
    }

    #[test]
    fn non_utf8_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [0x48, 0xE9, 0x6C]).unwrap();
        assert!(matches!(read_text_file(&path), Err(Error::InvalidUtf8(_))));
    }
}
