use dmmt_huffman_codec::codec::{decode, decode_with_code_table_file, CodecOptions, Encoder};
use dmmt_huffman_codec::huffman::trie::DecodeTrie;
use proptest::prelude::*;
use threadpool::ThreadPool;

/// Texts mixing code table tokens, quotes and separators with arbitrary characters.
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{1,200}",
        "[ \t\r\n':a-c]{1,120}",
        prop::collection::vec(any::<char>(), 1..100)
            .prop_map(|chars| chars.into_iter().collect::<String>()),
    ]
}

fn check_round_trip(text: &str) -> Result<(), TestCaseError> {
    let output_directory = tempfile::tempdir().unwrap();
    let options = CodecOptions::in_directory(output_directory.path());
    let threadpool = ThreadPool::new(2);
    let session = Encoder::new(&options, &threadpool).encode(text).unwrap();

    prop_assert!(session.code_table().is_prefix_free());
    prop_assert_eq!(session.decode().unwrap(), text);

    let via_trie = decode(
        session.compressed_file(),
        &DecodeTrie::from(session.code_table()),
    )
    .unwrap();
    prop_assert_eq!(via_trie, text);

    let via_files =
        decode_with_code_table_file(session.compressed_file(), session.code_table_file())
            .unwrap();
    prop_assert_eq!(via_files, text);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn encoded_text_decodes_to_itself(text in text_strategy()) {
        check_round_trip(&text)?;
    }

    #[test]
    fn code_lengths_respect_frequencies(text in "[a-f]{2,300}") {
        let output_directory = tempfile::tempdir().unwrap();
        let options = CodecOptions::in_directory(output_directory.path());
        let threadpool = ThreadPool::new(1);
        let session = Encoder::new(&options, &threadpool).encode(&text).unwrap();
        let table = session.code_table();
        for (a, code_a) in table.iter() {
            for (b, code_b) in table.iter() {
                let count_a = text.chars().filter(|c| *c == a).count();
                let count_b = text.chars().filter(|c| *c == b).count();
                if count_a > count_b {
                    prop_assert!(code_a.len() <= code_b.len());
                }
            }
        }
    }
}
