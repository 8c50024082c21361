use dmmt_huffman_codec::binary_stream::{bits_to_string, pack, unpack};
use dmmt_huffman_codec::huffman::code::CodeTable;
use dmmt_huffman_codec::huffman::frequency::FrequencyTable;
use dmmt_huffman_codec::huffman::tree::HuffmanTree;
use dmmt_huffman_codec::huffman::trie::DecodeTrie;
use dmmt_huffman_codec::huffman::PrefixDecoder;
use dmmt_huffman_codec::stats::CompressionStats;
use dmmt_huffman_codec::Error;

fn main() -> Result<(), Error> {
    let text = "abracadabra alakazam\n";

    let frequencies = FrequencyTable::count(text);
    let tree = HuffmanTree::new(&frequencies)?;
    println!("huffman tree\n{}", tree);

    let code_table = CodeTable::generate(&tree);
    println!("code table\n{}", code_table);

    let bits = code_table.encode(text)?;
    let packed = pack(&bits);
    println!("text to encode\n{:?}", text);
    println!("encoded bits\n{}", bits_to_string(&bits));
    println!("packed bytes\n{:?}", packed);

    let symbol_count = frequencies.total_symbols();
    let unpacked = unpack(&packed, packed.len() * 8);
    let via_tree = tree.decode_symbols(unpacked.iter().copied(), symbol_count)?;
    let via_table = DecodeTrie::new(&code_table).decode_symbols(unpacked, symbol_count)?;
    println!("decoded with tree\n{:?}", via_tree);
    println!("decoded with code table\n{:?}", via_table);

    println!("{}", CompressionStats::compute(text, &code_table)?);
    Ok(())
}
