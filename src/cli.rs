use crate::codec::{
    DEFAULT_CODE_TABLE_FILE_NAME, DEFAULT_COMPRESSED_FILE_NAME, DEFAULT_DECOMPRESSED_FILE_NAME,
};
use crate::{Arguments, CompressArguments, DecompressArguments};
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

const COMPRESS_SUBCOMMAND: &str = "compress";
const DECOMPRESS_SUBCOMMAND: &str = "decompress";

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_subcommands(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_subcommands(command: Command) -> Command {
        command
            .subcommand(Self::create_compress_subcommand())
            .subcommand(Self::create_decompress_subcommand())
    }

    fn create_compress_subcommand() -> Command {
        let command =
            Command::new(COMPRESS_SUBCOMMAND).about("Compress a text file with Huffman coding");
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_directory_argument(command);
        let command = Self::register_compressed_file_name_argument(command);
        let command = Self::register_code_table_file_name_argument(command);
        let command = Self::register_threads_argument(command);
        Self::register_print_codes_argument(command)
    }

    fn create_decompress_subcommand() -> Command {
        let command = Command::new(DECOMPRESS_SUBCOMMAND)
            .about("Restore a text file from a compressed file and its code table");
        let command = Self::register_compressed_file_argument(command);
        let command = Self::register_code_table_file_argument(command);
        let command = Self::register_output_file_argument(command);
        Self::register_verify_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn register_compressed_file_name_argument(command: Command) -> Command {
        command.arg(Self::create_compressed_file_name_argument())
    }

    fn register_code_table_file_name_argument(command: Command) -> Command {
        command.arg(Self::create_code_table_file_name_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_print_codes_argument(command: Command) -> Command {
        command.arg(Self::create_print_codes_argument())
    }

    fn register_compressed_file_argument(command: Command) -> Command {
        command.arg(Self::create_compressed_file_argument())
    }

    fn register_code_table_file_argument(command: Command) -> Command {
        command.arg(Self::create_code_table_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_verify_argument(command: Command) -> Command {
        command.arg(Self::create_verify_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
            .subcommand_required(true)
            .arg_required_else_help(true)
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to the .txt input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_directory <DIR> "Directory receiving the compressed and code table files")
            .default_value(".")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_compressed_file_name_argument() -> Arg {
        arg!(compressed_file_name: -c --compressed_file <NAME> "File name of the compressed output")
            .default_value(DEFAULT_COMPRESSED_FILE_NAME)
    }

    fn create_code_table_file_name_argument() -> Arg {
        arg!(code_table_file_name: -k --code_table_file <NAME> "File name of the code table output")
            .default_value(DEFAULT_CODE_TABLE_FILE_NAME)
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of threads counting symbol frequencies")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_print_codes_argument() -> Arg {
        arg!(print_codes: -p --print_codes "Print the tree and the code of every symbol")
    }

    fn create_compressed_file_argument() -> Arg {
        Arg::new("compressed_file")
            .help("Path to the compressed input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_code_table_file_argument() -> Arg {
        Arg::new("code_table_file")
            .help("Path to the code table written alongside the compressed file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output_file <PATH> "Path of the restored text file")
            .default_value(DEFAULT_DECOMPRESSED_FILE_NAME)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_verify_argument() -> Arg {
        arg!(original_file: -v --verify <ORIGINAL> "Compare the restored text with this original file")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        match matches.subcommand() {
            Some((COMPRESS_SUBCOMMAND, sub_matches)) => {
                Arguments::Compress(Self::extract_compress_arguments(sub_matches))
            }
            Some((DECOMPRESS_SUBCOMMAND, sub_matches)) => {
                Arguments::Decompress(Self::extract_decompress_arguments(sub_matches))
            }
            _ => unreachable!("A subcommand is required"),
        }
    }

    fn extract_compress_arguments(matches: &ArgMatches) -> CompressArguments {
        CompressArguments {
            input_file: Self::extract_input_file_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
            compressed_file_name: Self::extract_compressed_file_name_argument(matches),
            code_table_file_name: Self::extract_code_table_file_name_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            print_codes: Self::extract_print_codes_argument(matches),
        }
    }

    fn extract_decompress_arguments(matches: &ArgMatches) -> DecompressArguments {
        DecompressArguments {
            compressed_file: Self::extract_compressed_file_argument(matches),
            code_table_file: Self::extract_code_table_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            original_file: Self::extract_verify_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_directory")
            .expect("Output directory must be provided, but was unset.")
            .clone()
    }

    fn extract_compressed_file_name_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("compressed_file_name")
            .expect("Compressed file name must be provided, but was unset.")
            .clone()
    }

    fn extract_code_table_file_name_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("code_table_file_name")
            .expect("Code table file name must be provided, but was unset.")
            .clone()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_print_codes_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("print_codes")
    }

    fn extract_compressed_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("compressed_file")
            .expect("Required argument compressed_file not provided")
            .clone()
    }

    fn extract_code_table_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("code_table_file")
            .expect("Required argument code_table_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Output file must be provided, but was unset.")
            .clone()
    }

    fn extract_verify_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("original_file").cloned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::CLIParser;
    use crate::Arguments;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_input_file_argument() {
        let input_file_name = "testfile.txt";
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, input_file_name]);
        let input_file = CLIParser::extract_input_file_argument(&matches);
        assert_eq!(input_file.file_name().unwrap(), input_file_name);
    }

    #[test]
    fn parse_output_directory_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_output_directory_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--output_directory", "/out"]);
        let output_directory = CLIParser::extract_output_directory_argument(&matches);
        assert_eq!(output_directory.to_str().unwrap(), "/out");
    }

    #[test]
    fn parse_file_name_arguments() {
        let command = Command::new("test");
        let command = CLIParser::register_compressed_file_name_argument(command);
        let command = CLIParser::register_code_table_file_name_argument(command);
        let matches = command.get_matches_from(vec![
            PROGRAM_NAME_ARGUMENT,
            "-c",
            "packed.bin",
            "--code_table_file",
            "codes.txt",
        ]);
        assert_eq!(
            CLIParser::extract_compressed_file_name_argument(&matches),
            "packed.bin"
        );
        assert_eq!(
            CLIParser::extract_code_table_file_name_argument(&matches),
            "codes.txt"
        );
    }

    #[test]
    fn parse_number_of_threads_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_threads_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--threads", "5"]);
        let actual = CLIParser::extract_threads_argument(&matches);
        let expected = 5;
        assert_eq!(actual, expected);
    }

    #[test]
    fn parse_number_of_threads_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_threads_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-t", "many"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Illegal value for threads not detected");
        }
    }

    #[test]
    fn parse_print_codes_flag() {
        let command = Command::new("test");
        let command = CLIParser::register_print_codes_argument(command);
        let matches = command
            .clone()
            .get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-p"]);
        assert!(CLIParser::extract_print_codes_argument(&matches));
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        assert!(!CLIParser::extract_print_codes_argument(&matches));
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        let mut command = CLIParser::create_base_command();
        command = CLIParser::register_subcommands(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_compress_with_required_arguments_only() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![
            PROGRAM_NAME_ARGUMENT,
            "compress",
            "/input_directory/inputfile.txt",
            "-t",
            "8",
        ]);
        let Arguments::Compress(arguments) = arguments else {
            panic!("compress subcommand not recognized");
        };
        assert_eq!(
            arguments.input_file.file_name().unwrap(),
            "inputfile.txt",
            "input file does not match"
        );
        assert_eq!(
            arguments.output_directory.to_str().unwrap(),
            ".",
            "output directory does not match"
        );
        assert_eq!(
            arguments.compressed_file_name, "compressedBinary.txt",
            "compressed file name does not match"
        );
        assert_eq!(
            arguments.code_table_file_name, "huffmanCodes.txt",
            "code table file name does not match"
        );
        assert_eq!(
            arguments.number_of_threads, 8,
            "number_of_threads does not match"
        );
        assert!(!arguments.print_codes, "print_codes does not match");
    }

    #[test]
    fn parse_decompress_arguments() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![
            PROGRAM_NAME_ARGUMENT,
            "decompress",
            "compressedBinary.txt",
            "huffmanCodes.txt",
            "--output_file",
            "/restored/text.txt",
        ]);
        let Arguments::Decompress(arguments) = arguments else {
            panic!("decompress subcommand not recognized");
        };
        assert_eq!(
            arguments.compressed_file.to_str().unwrap(),
            "compressedBinary.txt"
        );
        assert_eq!(arguments.code_table_file.to_str().unwrap(), "huffmanCodes.txt");
        assert_eq!(arguments.output_file.to_str().unwrap(), "/restored/text.txt");
        assert!(arguments.original_file.is_none());
    }

    #[test]
    fn parse_verify_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_verify_argument(command);
        let matches = command
            .clone()
            .get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--verify", "original.txt"]);
        let original_file = CLIParser::extract_verify_argument(&matches);
        assert_eq!(original_file.unwrap().to_str().unwrap(), "original.txt");
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        assert!(CLIParser::extract_verify_argument(&matches).is_none());
    }
}
