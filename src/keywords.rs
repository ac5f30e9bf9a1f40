use crate::models::Entry;
use std::collections::BTreeMap;

const STRIPPED: [char; 9] = ['.', ',', '!', '?', '"', '\'', '(', ')', '…'];

/// Token counts over today's keyword text. Tokens are case-sensitive and
/// tokens one UTF-16 unit long are dropped, so a lone emoji outside the BMP
/// survives while a lone letter or syllable does not.
pub fn keyword_frequencies(todays: &[Entry]) -> BTreeMap<String, u32> {
    let mut freq = BTreeMap::new();

    for entry in todays.iter().filter(|entry| !entry.keywords.is_empty()) {
        for token in tokenize(&entry.keywords) {
            *freq.entry(token).or_insert(0) += 1;
        }
    }

    freq
}

fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .map(|c| if STRIPPED.contains(&c) { ' ' } else { c })
        .collect();

    cleaned
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|token| token.encode_utf16().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Frequency pairs ordered by descending count, then token.
pub fn ranked(freq: &BTreeMap<String, u32>) -> Vec<(String, u32)> {
    let mut pairs: Vec<(String, u32)> = freq
        .iter()
        .map(|(token, count)| (token.clone(), *count))
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}
