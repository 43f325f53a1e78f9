use super::*;

#[test]
fn keep_is_identity() {
    let s = "你好，世界! (hi)";
    assert_eq!(remove_punctuation(s, PunctuationFilter::Keep), s);
}

#[test]
fn chinese_removes_only_full_width_marks() {
    assert_eq!(
        remove_punctuation("你好，世界！“引号”《书》…ok, fine.", PunctuationFilter::Chinese),
        "你好世界引号书ok, fine."
    );
}

#[test]
fn english_removes_only_ascii_marks() {
    assert_eq!(
        remove_punctuation("Hello, world! (a-b) [c] {d} <e> 你好，", PunctuationFilter::English),
        "Hello world ab c d e 你好，"
    );
}

#[test]
fn all_removes_both_sets() {
    assert_eq!(
        remove_punctuation("你好，world!「x」", PunctuationFilter::All),
        "你好worldx"
    );
}

#[test]
fn all_symbols_keeps_ideographs_alphanumerics_and_whitespace() {
    assert_eq!(
        remove_punctuation("A1 你好\n★€@#_ é", PunctuationFilter::AllSymbols),
        "A1 你好\n "
    );
}

#[test]
fn filter_deserializes_from_kebab_case() {
    let f: PunctuationFilter = serde_json::from_str("\"all-symbols\"").unwrap();
    assert_eq!(f, PunctuationFilter::AllSymbols);
}
