//! # Apple Music Integration Module
//!
//! Everything needed to look a track up in the Apple Music catalog without an
//! Apple developer account.
//!
//! ```text
//! MatchEngine
//!     ├── TokenProvider ── TokenSource (web player page scrape)
//!     └── CatalogSearch (amp-api catalog search)
//! ```
//!
//! - [`token`] - Scrapes and caches the web player's bearer token. The token
//!   lives for 60 seconds and is refetched on the first request after that.
//! - [`catalog`] - Free-text song search scoped to a storefront and language.
//! - [`normalize`] - The character filter and parenthetical stripping used by
//!   the fallback search.
//! - [`matcher`] - The search-then-normalize-then-retry loop.
//!
//! The search is first-result-wins. There is no scoring or disambiguation, so
//! the fallback trades precision for hit rate on titles that carry
//! annotations like `(Feat. X)` or mixed-script punctuation.

pub mod catalog;
pub mod matcher;
pub mod normalize;
pub mod token;

pub use catalog::{AppleMusicClient, CatalogSearch};
pub use matcher::MatchEngine;
pub use token::{CachedValue, TokenProvider, TokenSource, WebPageTokenSource};
