use reqwest::blocking::Client;

use crate::core::{
    http::{
        fetch,
        http_client,
    },
    DaneoError,
};

const TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Text plus language tag to audio bytes. The live provider is the
/// Google Translate TTS endpoint.
pub trait SpeechSynthesizer {
    fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, DaneoError>;
}

pub struct GoogleTranslateTts {
    client: Client,
}

impl GoogleTranslateTts {
    pub fn new() -> Result<Self, DaneoError> {
        Ok(GoogleTranslateTts { client: http_client()? })
    }
}

impl SpeechSynthesizer for GoogleTranslateTts {
    fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, DaneoError> {
        let params: Vec<(&str, String)> = vec![
            ("ie", "UTF-8".to_string()),
            ("q", text.to_string()),
            ("tl", lang.to_string()),
            ("client", "tw-ob".to_string()),
        ];

        let resp = fetch(&self.client, TTS_URL, &[], &params)?;
        if !resp.status().is_success() {
            return Err(DaneoError::Custom(format!(
                "TTS request for '{text}' returned {}",
                resp.status()
            )));
        }

        Ok(resp.bytes()?.to_vec())
    }
}
