//! Random animal sources and how their answers become [`MediaItem`]s.

use rand::Rng;
use serde::Deserialize;

use crate::models::{MediaItem, MediaKind};

pub const DOG_CEO_URL: &str = "https://dog.ceo/api/breeds/image/random";
pub const RANDOM_DOG_URL: &str = "https://random.dog/woof.json";
pub const CATAAS_URL: &str = "https://cataas.com/cat";

/// One of the public random-media endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaSource {
    /// Breed-tagged dog photos. Always a still image.
    DogCeo,
    /// Dog photos, gifs and clips.
    RandomDog,
    /// Cat pictures addressed directly, no lookup needed.
    Cataas,
}

/// `{"message": "<url>", "status": "success"}`
#[derive(Debug, Deserialize)]
pub struct DogCeoResponse {
    pub message: String,
    pub status: String,
}

/// `{"fileSizeBytes": 12345, "url": "<url>"}`
#[derive(Debug, Deserialize)]
pub struct RandomDogResponse {
    pub url: String,
}

impl MediaSource {
    pub const ALL: [MediaSource; 3] = [
        MediaSource::DogCeo,
        MediaSource::RandomDog,
        MediaSource::Cataas,
    ];

    /// Picks a source uniformly at random.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MediaSource::DogCeo | MediaSource::RandomDog => "Dog",
            MediaSource::Cataas => "Cat",
        }
    }

    /// Turns a locator returned by (or built for) this source into a reward.
    pub fn normalize(&self, locator: String) -> MediaItem {
        let (kind, label) = match self {
            MediaSource::DogCeo => (
                MediaKind::Image,
                breed_from_locator(&locator).unwrap_or_else(|| self.name().to_string()),
            ),
            MediaSource::RandomDog => {
                let kind = match suffix(&locator).as_deref() {
                    Some("gif") => MediaKind::Gif,
                    Some("mp4") | Some("webm") => MediaKind::Video,
                    _ => MediaKind::Image,
                };
                (kind, self.name().to_string())
            }
            MediaSource::Cataas => {
                let kind = if suffix(&locator).as_deref() == Some("gif") {
                    MediaKind::Gif
                } else {
                    MediaKind::Image
                };
                (kind, self.name().to_string())
            }
        };

        MediaItem {
            locator,
            kind,
            label,
        }
    }
}

/// Builds a cat locator that no cache has seen before.
pub fn cataas_locator<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}?width=480&r={}&t={}",
        CATAAS_URL,
        rng.r#gen::<u32>(),
        rng.r#gen::<u64>()
    )
}

/// Lowercased file extension of the locator's path, ignoring query and fragment.
fn suffix(locator: &str) -> Option<String> {
    let path = locator.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    let (_, extension) = file.rsplit_once('.')?;
    Some(extension.to_ascii_lowercase())
}

/// `https://images.dog.ceo/breeds/wolfhound-irish/n02090721_1918.jpg` -> `Wolfhound Irish`
pub fn breed_from_locator(locator: &str) -> Option<String> {
    let (_, rest) = locator.split_once("breeds/")?;
    let slug = rest.split('/').next().filter(|slug| !slug.is_empty())?;

    let words: Vec<String> = slug
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    Some(words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dog_ceo_is_always_image() {
        let item = MediaSource::DogCeo
            .normalize("https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.gif".into());
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.label, "Hound Afghan");
    }

    #[test]
    fn test_dog_ceo_without_breed_uses_source_name() {
        let item = MediaSource::DogCeo.normalize("https://images.dog.ceo/random.jpg".into());
        assert_eq!(item.label, "Dog");
    }

    #[test]
    fn test_random_dog_kinds() {
        let kind = |url: &str| MediaSource::RandomDog.normalize(url.to_string()).kind;

        assert_eq!(kind("https://random.dog/abc.gif"), MediaKind::Gif);
        assert_eq!(kind("https://random.dog/abc.MP4"), MediaKind::Video);
        assert_eq!(kind("https://random.dog/abc.webm?x=1"), MediaKind::Video);
        assert_eq!(kind("https://random.dog/abc.jpg"), MediaKind::Image);
        assert_eq!(kind("https://random.dog/noext"), MediaKind::Image);
    }

    #[test]
    fn test_cataas_locator_defeats_cache() {
        let mut rng = StdRng::seed_from_u64(9);
        let first = cataas_locator(&mut rng);
        let second = cataas_locator(&mut rng);

        assert!(first.starts_with(CATAAS_URL));
        assert_ne!(first, second);

        let item = MediaSource::Cataas.normalize(first);
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.label, "Cat");
        assert_eq!(
            MediaSource::Cataas
                .normalize("https://cataas.com/cat/abc.gif".into())
                .kind,
            MediaKind::Gif
        );
    }

    #[test]
    fn test_breed_from_locator() {
        assert_eq!(
            breed_from_locator("https://images.dog.ceo/breeds/wolfhound-irish/n02090721_1918.jpg"),
            Some("Wolfhound Irish".to_string())
        );
        assert_eq!(
            breed_from_locator("https://images.dog.ceo/breeds/pug/x.jpg"),
            Some("Pug".to_string())
        );
        assert_eq!(breed_from_locator("https://random.dog/abc.jpg"), None);
    }

    #[test]
    fn test_choose_hits_every_source() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(MediaSource::choose(&mut rng));
        }
        assert_eq!(seen.len(), MediaSource::ALL.len());
    }

    #[test]
    fn test_dog_ceo_response_parses() {
        let body = r#"{"message":"https://images.dog.ceo/breeds/pug/a.jpg","status":"success"}"#;
        let parsed: DogCeoResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.status, "success");

        let body = r#"{"fileSizeBytes":1200,"url":"https://random.dog/a.mp4"}"#;
        let parsed: RandomDogResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.url, "https://random.dog/a.mp4");
    }
}
