use std::env;
use std::sync::Arc;

use canonical::{DictionarySegmenter, PreprocessConfig, Preprocessor, StopwordSet};

fn main() {
    let text = env::args().skip(1).collect::<Vec<_>>().join(" ");
    let text = if text.is_empty() {
        "Áo sơ mi nam công sở, vải cotton 100% thoáng mát. Không nhăn, không phai màu!".to_string()
    } else {
        text
    };

    let stopwords = StopwordSet::from_lines(["và", "của", "cho", "rất"], false);
    let segmenter = DictionarySegmenter::from_entries(["áo sơ mi", "công sở", "thoáng mát"]);
    let pre = Preprocessor::new(PreprocessConfig::default(), stopwords, Arc::new(segmenter))
        .expect("default config is valid");

    let doc = pre.preprocess(&text);
    println!("raw:       {text}");
    println!("processed: {}", doc.text);
    println!("tokens:    {:?}", doc.tokens);
}
