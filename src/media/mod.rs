//! Reward media: where it comes from and how it is fetched ahead of a session.

mod fetcher;
mod prefetch;
mod source;

pub use fetcher::{FetchError, FetchMedia, HttpFetcher};
pub use prefetch::{
    prefetch, JoinPolicy, PrefetchConfig, PrefetchError, DEFAULT_RETRIES, DEFAULT_TIMEOUT,
};
pub use source::{breed_from_locator, MediaSource};
