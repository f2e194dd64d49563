use lazy_static::lazy_static;
use regex::Regex;

/// Shortest word that is indexed.
pub const MIN_WORD_LEN: usize = 3;

lazy_static! {
    static ref MARKUP: Regex = Regex::new(r"<[^>]*>?").expect("valid regex");
    static ref WORD: Regex = Regex::new(r"\p{Alphabetic}+").expect("valid regex");
}

/// Case-fold a word into a term.
pub fn normalize(word: &str) -> String { word.to_lowercase() }

/// Alphabetic runs of page content, skipping anything inside `<...>` markup.
pub fn words(content: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut last = 0;
    for tag in MARKUP.find_iter(content) {
        out.extend(WORD.find_iter(&content[last..tag.start()]).map(|m| m.as_str()));
        last = tag.end();
    }
    out.extend(WORD.find_iter(&content[last..]).map(|m| m.as_str()));
    out
}

/// Words of at least `min_len` characters, lowercased.
pub fn terms(content: &str, min_len: usize) -> Vec<String> {
    words(content)
        .into_iter()
        .filter(|w| w.chars().count() >= min_len)
        .map(normalize)
        .collect()
}
