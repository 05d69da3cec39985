//! Metadata extraction from parsed HTML: the Open Graph / Twitter Card meta
//! scan plus the fallback probes for pages that carry little or no markup.

use crate::record::PageMeta;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use url::Url;

/// Recognized vocabulary prefixes. Meta tags whose key starts with any of
/// these are collected verbatim; everything else is ignored.
const VOCAB_PREFIXES: &[&str] = &[
    "og:", "music:", "video:", "article:", "book:", "profile:", "twitter:",
];

/// Keys that count as "the page already declared an image". When any of them
/// is present the `<img>` fallback is skipped.
const IMAGE_META_KEYS: &[&str] = &[
    "og:image",
    "og:image:url",
    "og:image:secure_url",
    "twitter:image",
    "twitter:image:src",
];

/// Suffixes an `<img>` src must end with to be accepted by the fallback.
const IMAGE_SUFFIXES: &[&str] = &[".png", ".jpeg", ".jpg"];

static FAVICON_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(ico|png)").expect("Failed to compile favicon href regex"));

/// Parse `html` and extract its metadata. `url` is the address the document
/// was fetched from and anchors relative image sources; extraction still
/// works when it does not parse, relative fallback images just stay out.
pub fn extract(html: &str, url: &str) -> PageMeta {
    let document = scraper::Html::parse_document(html);
    let base_url = Url::parse(url).ok();
    extract_document(&document, base_url.as_ref())
}

/// Extract metadata from an already-parsed document.
pub fn extract_document(document: &scraper::Html, base_url: Option<&Url>) -> PageMeta {
    let mut properties = scan_meta_tags(document);
    resolve_fallbacks(document, base_url, &mut properties);
    resolve_favicon(document, &mut properties);
    log::debug!("extracted {} metadata properties", properties.len());
    PageMeta::new(properties)
}

/// Walk every `<meta>` element in document order and collect the tags that
/// belong to a recognized vocabulary. The key comes from `property`, or from
/// `name` when `property` is missing; the value from `content`, or `value`
/// when `content` is missing. Tags without a key or with an empty value are
/// dropped, duplicates accumulate in order.
fn scan_meta_tags(document: &scraper::Html) -> BTreeMap<String, Vec<String>> {
    let meta_selector = scraper::Selector::parse("meta").unwrap();

    let mut properties: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for element in document.select(&meta_selector) {
        let key = match element.attr("property").or_else(|| element.attr("name")) {
            Some(key) => key,
            None => continue,
        };
        if !VOCAB_PREFIXES.iter().any(|prefix| key.starts_with(prefix)) {
            continue;
        }
        let value = match element.attr("content").or_else(|| element.attr("value")) {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };
        properties
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }
    properties
}

/// Probe the document body for substitutes for the fields the meta scan did
/// not provide. Each probe is independent and guarded only by its own keys.
fn resolve_fallbacks(
    document: &scraper::Html,
    base_url: Option<&Url>,
    properties: &mut BTreeMap<String, Vec<String>>,
) {
    let title_selector = scraper::Selector::parse("title").unwrap();
    let description_selector = scraper::Selector::parse(r#"meta[name="description"]"#).unwrap();
    let canonical_selector = scraper::Selector::parse(r#"link[rel="canonical"]"#).unwrap();
    let img_selector = scraper::Selector::parse("img").unwrap();

    if !properties.contains_key("og:title") && !properties.contains_key("twitter:title") {
        let title = document
            .select(&title_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string());
        insert_if_value(properties, "title", title);
    }

    if !properties.contains_key("og:description") && !properties.contains_key("twitter:description")
    {
        let description = first_attr(document, &description_selector, "content");
        insert_if_value(properties, "description", description);
    }

    if !properties.contains_key("og:url") {
        let canonical = first_attr(document, &canonical_selector, "href");
        insert_if_value(properties, "url", canonical);
    }

    if !IMAGE_META_KEYS.iter().any(|key| properties.contains_key(*key)) {
        let image = first_image_src(document, &img_selector, base_url);
        insert_if_value(properties, "image", image);
    }
}

/// The favicon probe always runs: first `<link>` whose href looks like an
/// `.ico` or `.png` resource, stored exactly as written in the document.
fn resolve_favicon(document: &scraper::Html, properties: &mut BTreeMap<String, Vec<String>>) {
    let link_selector = scraper::Selector::parse("link").unwrap();

    let favicon = document
        .select(&link_selector)
        .filter_map(|element| element.attr("href"))
        .find(|href| FAVICON_HREF.is_match(href))
        .map(str::to_string);
    insert_if_value(properties, "favicon", favicon);
}

fn insert_if_value(
    properties: &mut BTreeMap<String, Vec<String>>,
    key: &str,
    value: Option<String>,
) {
    if let Some(value) = value {
        if !value.is_empty() {
            properties.insert(key.to_string(), vec![value]);
        }
    }
}

/// First element matched by `selector` that carries `attr`, whatever its
/// value. Later elements never override an earlier empty attribute.
fn first_attr(
    document: &scraper::Html,
    selector: &scraper::Selector,
    attr: &str,
) -> Option<String> {
    document
        .select(selector)
        .find_map(|element| element.attr(attr))
        .map(str::to_string)
}

/// First `<img>` whose src resolves to an absolute URL ending in a known
/// image suffix. The resolved URL is what gets stored.
fn first_image_src(
    document: &scraper::Html,
    selector: &scraper::Selector,
    base_url: Option<&Url>,
) -> Option<String> {
    document.select(selector).find_map(|element| {
        let src = element.attr("src")?;
        let absolute = absolute_url(src, base_url)?;
        IMAGE_SUFFIXES
            .iter()
            .any(|suffix| absolute.ends_with(suffix))
            .then_some(absolute)
    })
}

fn absolute_url(src: &str, base_url: Option<&Url>) -> Option<String> {
    match Url::parse(src) {
        Ok(url) => Some(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => base_url
            .and_then(|base| base.join(src).ok())
            .map(|url| url.to_string()),
        Err(_) => None,
    }
}
