use std::path::Path;

use crate::artwork::{DecodedOutline, Outline};
use crate::error::SurfaceResult;

/// Fetches outline content for an artwork.
///
/// Inline SVG resolves immediately; image locations are downloaded over HTTP
/// or read from disk.
#[derive(Debug, Clone, Default)]
pub struct OutlineLoader {
    client: reqwest::Client,
}

impl OutlineLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, outline: &Outline) -> SurfaceResult<DecodedOutline> {
        match outline {
            Outline::Svg(markup) => Ok(DecodedOutline::Svg(markup.clone())),
            Outline::Image(location) if is_http(location) => {
                log::debug!("fetching outline {location}");
                let bytes = self
                    .client
                    .get(location)
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?;
                DecodedOutline::from_bytes(bytes.to_vec())
            }
            Outline::Image(location) => {
                let path = location.strip_prefix("file://").unwrap_or(location);
                let bytes = tokio::fs::read(Path::new(path)).await?;
                DecodedOutline::from_bytes(bytes)
            }
        }
    }
}

fn is_http(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
