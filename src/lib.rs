//! Fetch a web page and extract its Open Graph / Twitter Card metadata into
//! a queryable record.
//!
//! ```no_run
//! use pagemeta::FetchConfig;
//!
//! fn main() -> pagemeta::Result<()> {
//!     let meta = pagemeta::fetch_meta("https://www.rust-lang.org", &FetchConfig::default())?;
//!     if let Some(title) = meta.title() {
//!         println!("title: {title}");
//!     }
//!     for image in meta.images() {
//!         println!("image: {image}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Extraction works without the network too: [`extract`] takes any HTML
//! string you already have.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod record;

pub use config::FetchConfig;
pub use error::{Error, Result};
pub use extract::{extract, extract_document};
pub use fetch::{fetch_page, FetchedPage};
pub use record::PageMeta;

/// Main entry point: fetch `url` and extract its metadata in one call.
pub fn fetch_meta(url: &str, config: &FetchConfig) -> Result<PageMeta> {
    let page = fetch::fetch_page(url, config)?;
    Ok(extract::extract(&page.html, &page.final_url))
}
