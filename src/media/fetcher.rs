//! Fetching single rewards over HTTP.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::header::RANGE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{MediaItem, MediaKind};

use super::source::{
    cataas_locator, DogCeoResponse, MediaSource, RandomDogResponse, DOG_CEO_URL, RANDOM_DOG_URL,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Bytes requested when warming a video.
const VIDEO_WARM_BYTES: u64 = 256 * 1024;

/// Error fetching one reward.
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure.
    Http(reqwest::Error),
    /// The source answered with a non-success status.
    Status(StatusCode),
    /// The source answered with something we could not use.
    Malformed(String),
    /// The source did not answer in time.
    Timeout(Duration),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "request failed: {}", e),
            FetchError::Status(status) => write!(f, "source answered {}", status),
            FetchError::Malformed(reason) => write!(f, "unusable response: {}", reason),
            FetchError::Timeout(after) => write!(f, "no response after {:?}", after),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Http(err)
        }
    }
}

/// Something that can produce random rewards.
pub trait FetchMedia: Send + Sync + 'static {
    /// Fetches one reward from a randomly chosen source.
    fn fetch(&self) -> impl Future<Output = Result<MediaItem, FetchError>> + Send;

    /// Starts loading `item` in the background so it shows up quickly later.
    /// Never blocks and never fails the caller.
    fn warm(&self, item: &MediaItem);
}

/// Fetches rewards from the public animal APIs.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    pub async fn fetch_from(&self, source: MediaSource) -> Result<MediaItem, FetchError> {
        let locator = match source {
            MediaSource::DogCeo => {
                let body: DogCeoResponse = self.get_json(DOG_CEO_URL).await?;
                if body.status != "success" {
                    return Err(FetchError::Malformed(format!("status {:?}", body.status)));
                }
                body.message
            }
            MediaSource::RandomDog => {
                let body: RandomDogResponse = self.get_json(RANDOM_DOG_URL).await?;
                body.url
            }
            MediaSource::Cataas => fresh_cat_locator(),
        };

        if locator.trim().is_empty() {
            return Err(FetchError::Malformed(format!("{} sent an empty locator", source.name())));
        }

        Ok(source.normalize(locator))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.json::<T>().await?)
    }
}

impl FetchMedia for HttpFetcher {
    async fn fetch(&self) -> Result<MediaItem, FetchError> {
        let source = MediaSource::choose(&mut rand::thread_rng());
        log::debug!("fetching reward from {:?}", source);
        self.fetch_from(source).await
    }

    fn warm(&self, item: &MediaItem) {
        let client = self.client.clone();
        let item = item.clone();

        tokio::spawn(async move {
            let request = match item.kind {
                MediaKind::Image | MediaKind::Gif => client.get(&item.locator),
                MediaKind::Video => client
                    .get(&item.locator)
                    .header(RANGE, format!("bytes=0-{}", VIDEO_WARM_BYTES - 1)),
            };

            let result = async { request.send().await?.error_for_status()?.bytes().await }.await;
            match result {
                Ok(bytes) => log::debug!("warmed {} ({} bytes)", item.locator, bytes.len()),
                Err(e) => log::debug!("warming {} failed: {}", item.locator, e),
            }
        });
    }
}

fn fresh_cat_locator() -> String {
    cataas_locator(&mut rand::thread_rng())
}
