//! Documents handed over by the content extraction service.
use serde::{Deserialize, Serialize};
use url::Url;

/// A page's extracted text along with where it came from.
///
/// `url` identifies the document within a run and must be unique.
/// `text` is `None` when extraction failed, which is kept apart from
/// an extracted but empty text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Network host of `url`, or `None` if it has none.
    #[serde(default)]
    pub host: Option<String>,
    /// Source URL.
    pub url: String,
    /// Extracted text, or `None` on extraction failure.
    #[serde(default)]
    pub text: Option<String>,
}

impl DocumentRecord {
    /// Creates a record, deriving the host from `url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use find_dupsite::DocumentRecord;
    ///
    /// let doc = DocumentRecord::new("https://News.Example.com/a?b=c", None);
    /// assert_eq!(doc.host(), Some("news.example.com"));
    ///
    /// let doc = DocumentRecord::new("not a url", Some("text".to_string()));
    /// assert_eq!(doc.host(), None);
    /// ```
    pub fn new<U>(url: U, text: Option<String>) -> Self
    where
        U: Into<String>,
    {
        let url = url.into();
        Self {
            host: host_of(&url),
            url,
            text,
        }
    }

    /// Creates a record with a host given by the caller.
    pub fn with_host<U>(host: Option<String>, url: U, text: Option<String>) -> Self
    where
        U: Into<String>,
    {
        Self {
            host,
            url: url.into(),
            text,
        }
    }

    /// Fills in the host from `url` if it is missing.
    pub fn with_derived_host(mut self) -> Self {
        if self.host().is_none() {
            self.host = host_of(&self.url);
        }
        self
    }

    /// Gets the host, where an empty one counts as missing.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().filter(|h| !h.is_empty())
    }

    /// Gets the extracted text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Extracts the lowercased host of a URL, or `None` if it cannot be parsed or has no host.
pub fn host_of(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://a.com/x"), Some("a.com".to_string()));
        assert_eq!(host_of("http://A.COM:8080/x"), Some("a.com".to_string()));
        assert_eq!(host_of("https://sub.b.org"), Some("sub.b.org".to_string()));
        assert_eq!(host_of("mailto:someone@a.com"), None);
        assert_eq!(host_of("a.com/x"), None);
        assert_eq!(host_of(""), None);
    }

    #[test]
    fn test_empty_host_is_missing() {
        let doc = DocumentRecord::with_host(Some(String::new()), "u1", None);
        assert_eq!(doc.host(), None);
    }

    #[test]
    fn test_with_derived_host() {
        let doc = DocumentRecord::with_host(None, "https://a.com/x", None).with_derived_host();
        assert_eq!(doc.host(), Some("a.com"));

        let doc = DocumentRecord::with_host(Some("given".to_string()), "https://a.com/x", None)
            .with_derived_host();
        assert_eq!(doc.host(), Some("given"));
    }

    #[test]
    fn test_deserialize_keeps_missing_and_empty_text_apart() {
        let missing: DocumentRecord = serde_json::from_str(r#"{"url":"u1"}"#).unwrap();
        let null: DocumentRecord = serde_json::from_str(r#"{"url":"u2","text":null}"#).unwrap();
        let empty: DocumentRecord = serde_json::from_str(r#"{"url":"u3","text":""}"#).unwrap();
        assert_eq!(missing.text(), None);
        assert_eq!(null.text(), None);
        assert_eq!(empty.text(), Some(""));
        assert_eq!(missing.host(), None);
    }
}
