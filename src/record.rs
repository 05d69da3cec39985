use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Precedence chains for the convenience accessors. First present key wins;
// for `images` the winner contributes its whole list.
const TITLE_KEYS: &[&str] = &["og:title", "twitter:title", "title"];
const DESCRIPTION_KEYS: &[&str] = &["og:description", "twitter:description", "description"];
const URL_KEYS: &[&str] = &["og:url", "url"];
const IMAGE_KEYS: &[&str] = &[
    "og:image",
    "og:image:url",
    "og:image:secure_url",
    "twitter:image",
    "twitter:image:src",
    "image",
];
const SITE_NAME_KEYS: &[&str] = &["og:site_name", "twitter:site"];

/// Metadata extracted from one page, keyed by property name (`og:title`,
/// `twitter:image`, `favicon`, ...).
///
/// A page may carry several tags under the same property (multiple
/// `og:image` entries are common), so every key maps to a list holding the
/// values in document order. A key is present only when at least one tag
/// contributed a non-empty value, and a present key's list is never empty.
///
/// The record is immutable once built; every accessor is a pure read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageMeta {
    properties: BTreeMap<String, Vec<String>>,
}

impl PageMeta {
    pub(crate) fn new(properties: BTreeMap<String, Vec<String>>) -> Self {
        Self { properties }
    }

    /// Every property name present on the page, in sorted order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of distinct properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True when the page yielded no metadata at all.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn has_content(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Every value stored under `key`, in document order. An absent key
    /// yields an empty slice, never an error.
    pub fn content(&self, key: &str) -> &[String] {
        self.properties.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Page title: `og:title`, else `twitter:title`, else the `title` entry
    /// captured from the document's own title element.
    pub fn title(&self) -> Option<&str> {
        self.first_of(TITLE_KEYS)
    }

    pub fn has_title(&self) -> bool {
        self.any_of(TITLE_KEYS)
    }

    /// Page description: `og:description`, else `twitter:description`, else
    /// the plain `description` meta fallback.
    pub fn description(&self) -> Option<&str> {
        self.first_of(DESCRIPTION_KEYS)
    }

    pub fn has_description(&self) -> bool {
        self.any_of(DESCRIPTION_KEYS)
    }

    /// Page URL: `og:url`, else the canonical-link `url` fallback.
    pub fn url(&self) -> Option<&str> {
        self.first_of(URL_KEYS)
    }

    pub fn has_url(&self) -> bool {
        self.any_of(URL_KEYS)
    }

    /// Every image under the first populated key of `og:image`,
    /// `og:image:url`, `og:image:secure_url`, `twitter:image`,
    /// `twitter:image:src`, `image`. The winning key contributes its whole
    /// list, not just its first entry. Empty when none of the keys are
    /// present.
    pub fn images(&self) -> &[String] {
        IMAGE_KEYS
            .iter()
            .find_map(|key| self.properties.get(*key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_images(&self) -> bool {
        self.any_of(IMAGE_KEYS)
    }

    /// Open Graph content type (`og:type`); no fallback source.
    pub fn page_type(&self) -> Option<&str> {
        self.first_of(&["og:type"])
    }

    pub fn has_type(&self) -> bool {
        self.has_content("og:type")
    }

    /// Site name: `og:site_name`, else `twitter:site`.
    pub fn site_name(&self) -> Option<&str> {
        self.first_of(SITE_NAME_KEYS)
    }

    pub fn has_site_name(&self) -> bool {
        self.any_of(SITE_NAME_KEYS)
    }

    fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.properties.get(*key))
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn any_of(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.properties.contains_key(*key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, &[&str])]) -> PageMeta {
        let properties = entries
            .iter()
            .map(|(key, values)| {
                (
                    key.to_string(),
                    values.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect();
        PageMeta::new(properties)
    }

    #[test]
    fn test_title_prefers_og() {
        let meta = record(&[
            ("og:title", &["OG"]),
            ("twitter:title", &["Twitter"]),
            ("title", &["Plain"]),
        ]);
        assert_eq!(meta.title(), Some("OG"));
    }

    #[test]
    fn test_title_falls_through_chain() {
        let meta = record(&[("twitter:title", &["Twitter"]), ("title", &["Plain"])]);
        assert_eq!(meta.title(), Some("Twitter"));

        let meta = record(&[("title", &["Plain"])]);
        assert_eq!(meta.title(), Some("Plain"));

        let meta = record(&[]);
        assert_eq!(meta.title(), None);
        assert!(!meta.has_title());
    }

    #[test]
    fn test_description_chain() {
        let meta = record(&[
            ("twitter:description", &["tw desc"]),
            ("description", &["plain desc"]),
        ]);
        assert_eq!(meta.description(), Some("tw desc"));
        assert!(meta.has_description());
    }

    #[test]
    fn test_url_chain() {
        let meta = record(&[("url", &["https://example.com/canonical"])]);
        assert_eq!(meta.url(), Some("https://example.com/canonical"));

        let meta = record(&[
            ("og:url", &["https://example.com/og"]),
            ("url", &["https://example.com/canonical"]),
        ]);
        assert_eq!(meta.url(), Some("https://example.com/og"));
    }

    #[test]
    fn test_images_returns_whole_list_of_winning_key() {
        let meta = record(&[
            ("og:image:url", &["https://a.example/1.jpg", "https://a.example/2.jpg"]),
            ("twitter:image", &["https://a.example/t.jpg"]),
        ]);
        assert_eq!(
            meta.images(),
            &["https://a.example/1.jpg".to_string(), "https://a.example/2.jpg".to_string()]
        );
    }

    #[test]
    fn test_images_chain_cascades_as_keys_disappear() {
        // drop the head of the chain and the next key's list surfaces
        let chain: &[(&str, &[&str])] = &[
            ("og:image", &["og_image.jpg"]),
            ("og:image:url", &["og_image_url.jpg"]),
            ("og:image:secure_url", &["og_image_secure_url.png"]),
            ("twitter:image", &["twitter_image.jpeg"]),
            ("twitter:image:src", &["twitter_image_src.jpg"]),
            ("image", &["scanned_image.png"]),
        ];

        for skip in 0..chain.len() {
            let meta = record(&chain[skip..]);
            assert_eq!(meta.images(), meta.content(chain[skip].0));
        }
    }

    #[test]
    fn test_images_empty_when_absent() {
        let meta = record(&[("og:title", &["T"])]);
        assert!(meta.images().is_empty());
        assert!(!meta.has_images());
    }

    #[test]
    fn test_type_has_no_fallback() {
        let meta = record(&[("og:type", &["article"])]);
        assert_eq!(meta.page_type(), Some("article"));
        assert!(meta.has_type());

        let meta = record(&[("twitter:card", &["summary"])]);
        assert_eq!(meta.page_type(), None);
        assert!(!meta.has_type());
    }

    #[test]
    fn test_site_name_falls_back_to_twitter_site() {
        let meta = record(&[("twitter:site", &["@nytimes"])]);
        assert_eq!(meta.site_name(), Some("@nytimes"));

        let meta = record(&[
            ("og:site_name", &["The New York Times"]),
            ("twitter:site", &["@nytimes"]),
        ]);
        assert_eq!(meta.site_name(), Some("The New York Times"));
    }

    #[test]
    fn test_content_preserves_order_and_duplicates() {
        let meta = record(&[("article:tag", &["Germany", "China", "Germany"])]);
        assert_eq!(meta.content("article:tag"), &["Germany", "China", "Germany"]);
    }

    #[test]
    fn test_content_on_absent_key_is_empty() {
        let meta = record(&[]);
        assert!(meta.content("og:title").is_empty());
        assert!(!meta.has_content("og:title"));
    }

    #[test]
    fn test_properties_lists_every_key() {
        let meta = record(&[("og:title", &["T"]), ("favicon", &["/f.ico"])]);
        let keys: Vec<&str> = meta.properties().collect();
        assert_eq!(keys, vec!["favicon", "og:title"]);
        assert_eq!(meta.len(), 2);
        assert!(!meta.is_empty());
    }

    #[test]
    fn test_empty_record_answers_everything_absent() {
        let meta = PageMeta::default();
        assert!(meta.is_empty());
        assert!(!meta.has_title());
        assert!(!meta.has_description());
        assert!(!meta.has_url());
        assert!(!meta.has_images());
        assert!(!meta.has_type());
        assert!(!meta.has_site_name());
        assert_eq!(meta.properties().count(), 0);
    }

    #[test]
    fn test_accessors_are_idempotent_and_records_comparable() {
        let meta = record(&[("og:title", &["A", "B"]), ("og:image", &["x.png"])]);
        assert_eq!(meta.title(), meta.title());
        assert_eq!(meta.images(), meta.images());

        let same = record(&[("og:title", &["A", "B"]), ("og:image", &["x.png"])]);
        assert_eq!(meta, same);
    }

    #[test]
    fn test_serializes_as_bare_map() {
        let meta = record(&[("og:title", &["T"])]);
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"og:title":["T"]}"#);
    }
}
