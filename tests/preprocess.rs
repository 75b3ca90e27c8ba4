use std::path::Path;

use shoprec::{build_preprocessor, AppConfig};

fn fixture_preprocessor() -> shoprec::Preprocessor {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shoprec.yaml");
    let config = AppConfig::from_file(path).expect("fixture config");
    build_preprocessor(&config).expect("preprocessor")
}

#[test]
fn lexicon_and_negation_compounds_are_joined() {
    let pre = fixture_preprocessor();
    let doc = pre.preprocess("Áo sơ mi và quần thời trang, không nhăn 2 kg");
    assert_eq!(doc.text, "áo sơ_mi quần thời_trang không_nhăn");
    assert_eq!(doc.version, 1);
    assert!(!doc.used_fallback());
}

#[test]
fn processed_text_is_a_fixed_point() {
    let pre = fixture_preprocessor();
    let once = pre.preprocess("Giày THỂ THAO êm chân, rất nhẹ!!!");
    let twice = pre.preprocess(&once.text);
    assert_eq!(once.text, "giày thể_thao êm chân nhẹ");
    assert_eq!(once, twice);
}

#[test]
fn empty_and_symbol_only_input_yield_empty_text() {
    let pre = fixture_preprocessor();
    assert!(pre.preprocess("").is_empty());
    assert!(pre.preprocess("!!! 100% ???").is_empty());
}
