use std::env::args_os;

use dmmt_huffman_codec::{compress_text_file, decompress_text_file, Arguments, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    match cli_parser.parse(args_os()) {
        Arguments::Compress(arguments) => match compress_text_file(&arguments) {
            Ok(session) => {
                println!("{}", session.stats());
                println!("{}", "-".repeat(30));
                if arguments.print_codes {
                    println!("{}", session.tree());
                    print!("{}", session.code_table());
                }
                println!(
                    "Huffman codes saved to: {}",
                    session.code_table_file().display()
                );
                println!(
                    "Huffman binary was saved to: {}",
                    session.compressed_file().display()
                );
            }
            Err(e) => eprintln!("Compression failed because of: {}", e),
        },
        Arguments::Decompress(arguments) => match decompress_text_file(&arguments) {
            Ok(text) => {
                println!("{}", text);
                println!(
                    "Decompressed text was saved to: {}",
                    arguments.output_file.display()
                );
                if let Some(original_file) = &arguments.original_file {
                    println!(
                        "Decoded text matches the original: {}",
                        original_file.display()
                    );
                }
            }
            Err(e) => eprintln!("Decompression failed because of: {}", e),
        },
    }
}
