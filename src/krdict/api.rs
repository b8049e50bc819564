use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{
    core::{
        http::{
            fetch,
            http_client,
        },
        Config,
        DaneoError,
    },
    krdict::categories::{
        Category,
        CategoryKind,
    },
};

const SEARCH_URL: &str = "https://krdict.korean.go.kr/api/search";
const TRANS_LANG_ENGLISH: &str = "1";

/// One page of upstream dictionary entries. Implemented by the live
/// KRDict client and by in-memory fakes in tests.
pub trait WordSource {
    fn fetch_page(
        &self,
        category: &Category,
        kind: CategoryKind,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Entry>, DaneoError>;
}

/// Response shapes for the open API's XML `<channel>` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub total: u32,
    #[serde(rename = "item", default)]
    pub items: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub word: String,
    #[serde(rename = "sense", default)]
    pub senses: Vec<Sense>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub definition: String,
    #[serde(rename = "translation", default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub trans_lang: String,
    #[serde(default)]
    pub trans_word: String,
    #[serde(default)]
    pub trans_dfn: String,
}

pub struct KrdictApi {
    client: Client,
    api_key: String,
}

impl KrdictApi {
    pub fn new(config: &Config) -> Result<Self, DaneoError> {
        let api_key = config.api_key.clone().ok_or(DaneoError::MissingApiKey)?;
        Ok(KrdictApi { client: http_client()?, api_key })
    }
}

impl WordSource for KrdictApi {
    fn fetch_page(
        &self,
        category: &Category,
        kind: CategoryKind,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Entry>, DaneoError> {
        // The API addresses pages by 1-based record offset, not page number.
        let start = (page - 1) * per_page + 1;
        let cat_param = match kind {
            CategoryKind::Subject => "subject_cat",
            CategoryKind::Semantic => "sense_cat",
        };

        let params: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("part", "word".to_string()),
            ("advanced", "y".to_string()),
            (cat_param, category.code.to_string()),
            ("translated", "y".to_string()),
            ("trans_lang", TRANS_LANG_ENGLISH.to_string()),
            ("start", start.to_string()),
            ("num", per_page.to_string()),
        ];

        let resp = fetch(&self.client, SEARCH_URL, &[], &params)?;
        if !resp.status().is_success() {
            return Err(DaneoError::Custom(format!(
                "KRDict API returned {} for category '{}'",
                resp.status(),
                category.label
            )));
        }

        let body = resp.text()?;
        let channel = parse_channel(&body)?;
        Ok(channel.items)
    }
}

pub fn parse_channel(xml: &str) -> Result<Channel, DaneoError> {
    Ok(quick_xml::de::from_str(xml)?)
}
