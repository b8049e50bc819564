use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::core::{
    http::{
        fetch,
        http_client,
    },
    DaneoError,
};

const HTML_URL: &str = "https://duckduckgo.com/";
const IMAGE_API_URL: &str = "https://duckduckgo.com/i.js";
const REGION: &str = "wt-wt";

/// First-result image lookup. The live provider is DuckDuckGo; tests
/// substitute in-memory fakes.
pub trait ImageSearch {
    /// Returns the first result's image URL, or `None` when the search
    /// comes back empty.
    fn first_image_url(&self, query: &str) -> Result<Option<String>, DaneoError>;
}

pub struct DuckDuckGoImages {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ImageResults {
    #[serde(default)]
    results: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
struct ImageResult {
    image: String,
}

impl DuckDuckGoImages {
    pub fn new() -> Result<Self, DaneoError> {
        Ok(DuckDuckGoImages { client: http_client()? })
    }

    // The image endpoint requires a session token harvested from the
    // search page markup.
    fn vqd_token(&self, query: &str) -> Result<Option<String>, DaneoError> {
        let params: Vec<(&str, String)> = vec![
            ("q", query.to_string()),
            ("iax", "images".to_string()),
            ("ia", "images".to_string()),
        ];
        let resp = fetch(&self.client, HTML_URL, &[], &params)?;
        if !resp.status().is_success() {
            return Err(DaneoError::Custom(format!(
                "DuckDuckGo token request returned {}",
                resp.status()
            )));
        }

        let body = resp.text()?;
        let re = Regex::new(r#"vqd=['"]?([\d-]+)['"]?"#)?;
        Ok(re.captures(&body).map(|caps| caps[1].to_string()))
    }
}

impl ImageSearch for DuckDuckGoImages {
    fn first_image_url(&self, query: &str) -> Result<Option<String>, DaneoError> {
        let Some(token) = self.vqd_token(query)? else {
            return Ok(None);
        };

        let params: Vec<(&str, String)> = vec![
            ("l", REGION.to_string()),
            ("o", "json".to_string()),
            ("q", query.to_string()),
            ("vqd", token),
            // Safe search on, small images.
            ("p", "1".to_string()),
            ("f", ",,size:Small,,,".to_string()),
        ];

        let resp = fetch(&self.client, IMAGE_API_URL, &[("Referer", HTML_URL)], &params)?;
        if !resp.status().is_success() {
            return Err(DaneoError::Custom(format!(
                "DuckDuckGo image search returned {}",
                resp.status()
            )));
        }

        let results: ImageResults = resp.json()?;
        Ok(results.results.into_iter().next().map(|r| r.image))
    }
}
