/// Full-width punctuation removed by [`PunctuationFilter::Chinese`].
pub const CHINESE_PUNCTUATION: &str = "，。！？、；：“”‘’（）【】《》〈〉「」『』〔〕…—·～";
/// ASCII punctuation removed by [`PunctuationFilter::English`].
pub const ENGLISH_PUNCTUATION: &str = ",.!?;:'\"()[]<>{}-";

/// Punctuation stripping mode applied before layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PunctuationFilter {
    /// Leave the text untouched.
    #[default]
    Keep,
    /// Remove full-width punctuation.
    Chinese,
    /// Remove ASCII punctuation.
    English,
    /// Remove both sets.
    All,
    /// Keep only CJK ideographs, ASCII letters and digits, and whitespace.
    AllSymbols,
}

/// Strip punctuation from `text` according to `filter`.
pub fn remove_punctuation(text: &str, filter: PunctuationFilter) -> String {
    match filter {
        PunctuationFilter::Keep => text.to_owned(),
        PunctuationFilter::Chinese => strip(text, |c| CHINESE_PUNCTUATION.contains(c)),
        PunctuationFilter::English => strip(text, |c| ENGLISH_PUNCTUATION.contains(c)),
        PunctuationFilter::All => strip(text, |c| {
            CHINESE_PUNCTUATION.contains(c) || ENGLISH_PUNCTUATION.contains(c)
        }),
        PunctuationFilter::AllSymbols => strip(text, |c| {
            let kept = ('\u{4e00}'..='\u{9fa5}').contains(&c)
                || c.is_ascii_alphanumeric()
                || c.is_whitespace();
            !kept
        }),
    }
}

fn strip(text: &str, drop: impl Fn(char) -> bool) -> String {
    text.chars().filter(|&c| !drop(c)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/punctuation.rs"]
mod tests;
