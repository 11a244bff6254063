//! Fetching a whole session's rewards up front.
//!
//! All slots are fetched concurrently on the calling task and joined in slot
//! order, so reward `i` always belongs to question `i` whatever order the
//! sources answer in. What happens when a slot fails is decided by
//! [`JoinPolicy`].

use std::fmt;
use std::time::Duration;

use futures_util::future::{join_all, try_join_all};

use crate::models::{MediaItem, QUESTIONS_PER_SESSION};

use super::fetcher::{FetchError, FetchMedia};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RETRIES: u32 = 1;

/// How a prefetch reacts to a slot that cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum JoinPolicy {
    /// The first failure fails the prefetch and cancels the other slots.
    FailFast,
    /// Retry the slot, then put a placeholder in it.
    #[default]
    Fallback,
}

#[derive(Debug, Clone)]
pub struct PrefetchConfig {
    /// Number of rewards to fetch.
    pub count: usize,
    /// Per-attempt limit.
    pub timeout: Duration,
    /// Extra attempts per slot under [`JoinPolicy::Fallback`].
    pub retries: u32,
    pub policy: JoinPolicy,
    /// Warm each reward once it is known.
    pub warm: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            count: QUESTIONS_PER_SESSION,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            policy: JoinPolicy::default(),
            warm: true,
        }
    }
}

#[derive(Debug)]
pub enum PrefetchError {
    /// A slot failed under [`JoinPolicy::FailFast`].
    Fetch { index: usize, source: FetchError },
    /// Every slot fell back to a placeholder.
    AllSourcesDown,
}

impl fmt::Display for PrefetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefetchError::Fetch { index, source } => {
                write!(f, "could not fetch reward {}: {}", index + 1, source)
            }
            PrefetchError::AllSourcesDown => write!(f, "none of the animal sources are reachable"),
        }
    }
}

impl std::error::Error for PrefetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrefetchError::Fetch { source, .. } => Some(source),
            PrefetchError::AllSourcesDown => None,
        }
    }
}

/// Fetches `config.count` rewards, in slot order.
pub async fn prefetch<F: FetchMedia + ?Sized>(
    fetcher: &F,
    config: &PrefetchConfig,
) -> Result<Vec<MediaItem>, PrefetchError> {
    log::info!(
        "prefetching {} rewards ({:?}, timeout {:?})",
        config.count,
        config.policy,
        config.timeout
    );

    let items = match config.policy {
        JoinPolicy::FailFast => {
            let slots = (0..config.count).map(|index| async move {
                let item = fetch_once(fetcher, config.timeout)
                    .await
                    .map_err(|source| PrefetchError::Fetch { index, source })?;
                if config.warm {
                    fetcher.warm(&item);
                }
                Ok::<_, PrefetchError>(item)
            });
            try_join_all(slots).await.inspect_err(|e| log::warn!("prefetch aborted: {}", e))?
        }
        JoinPolicy::Fallback => {
            let slots = (0..config.count).map(|index| fetch_or_placeholder(fetcher, config, index));
            let items = join_all(slots).await;

            if !items.is_empty() && items.iter().all(MediaItem::is_placeholder) {
                log::warn!("every reward slot fell back to a placeholder");
                return Err(PrefetchError::AllSourcesDown);
            }
            items
        }
    };

    log::info!("prefetched {} rewards", items.len());
    Ok(items)
}

async fn fetch_once<F: FetchMedia + ?Sized>(
    fetcher: &F,
    timeout: Duration,
) -> Result<MediaItem, FetchError> {
    match tokio::time::timeout(timeout, fetcher.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout)),
    }
}

async fn fetch_or_placeholder<F: FetchMedia + ?Sized>(
    fetcher: &F,
    config: &PrefetchConfig,
    index: usize,
) -> MediaItem {
    let attempts = config.retries.saturating_add(1);

    for attempt in 1..=attempts {
        match fetch_once(fetcher, config.timeout).await {
            Ok(item) => {
                if config.warm {
                    fetcher.warm(&item);
                }
                return item;
            }
            Err(e) => log::warn!(
                "reward {} attempt {}/{} failed: {}",
                index + 1,
                attempt,
                attempts,
                e
            ),
        }
    }

    MediaItem::placeholder()
}
