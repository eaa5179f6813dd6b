//! Feature extraction from texts.

/// Splits texts into whitespace-delimited tokens.
///
/// Tokens are kept verbatim in order: no case folding and no punctuation stripping.
/// Runs of whitespace never produce empty tokens.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Creates an instance.
    pub const fn new() -> Self {
        Self
    }

    /// Extracts the tokens of `text` into `feature`, clearing it beforehand.
    ///
    /// # Examples
    ///
    /// ```
    /// use find_dupsite::feature::FeatureExtractor;
    ///
    /// let mut feature = vec![];
    /// FeatureExtractor::new().extract(" The  quick\tbrown\nfox. ", &mut feature);
    /// assert_eq!(feature, vec!["The", "quick", "brown", "fox."]);
    /// ```
    pub fn extract<'a>(&self, text: &'a str, feature: &mut Vec<&'a str>) {
        feature.clear();
        feature.extend(self.tokens(text));
    }

    /// Creates an iterator over the tokens of `text`.
    pub fn tokens<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        text.split(is_separator).filter(|t| !t.is_empty())
    }
}

// Unicode whitespace plus the ASCII information separators (U+001C to U+001F).
#[inline(always)]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
