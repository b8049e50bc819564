pub mod image_search;
pub mod tts;

use std::{
    fs,
    path::PathBuf,
};

use reqwest::{
    blocking::Client,
    StatusCode,
};

pub use image_search::{
    DuckDuckGoImages,
    ImageSearch,
};
pub use tts::{
    GoogleTranslateTts,
    SpeechSynthesizer,
};

use crate::core::{
    http::{
        fetch,
        http_client,
    },
    Config,
    DaneoError,
};

/// Owns the local media directory and the lookup/synthesis providers.
/// Every acquisition is idempotent: an existing file under the media
/// directory short-circuits before any network traffic.
pub struct MediaStore<I: ImageSearch, S: SpeechSynthesizer> {
    config: Config,
    client: Client,
    image_search: I,
    tts: S,
}

impl MediaStore<DuckDuckGoImages, GoogleTranslateTts> {
    pub fn new(config: &Config) -> Result<Self, DaneoError> {
        MediaStore::with_providers(config, DuckDuckGoImages::new()?, GoogleTranslateTts::new()?)
    }
}

impl<I: ImageSearch, S: SpeechSynthesizer> MediaStore<I, S> {
    pub fn with_providers(config: &Config, image_search: I, tts: S) -> Result<Self, DaneoError> {
        fs::create_dir_all(&config.media_dir)?;
        Ok(MediaStore { config: config.clone(), client: http_client()?, image_search, tts })
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.config.media_dir.join(filename)
    }

    /// Looks up the first image result for `query`, wrapped with the
    /// configured prefix/suffix. `Ok(None)` means the search was empty.
    pub fn find_image_url(&self, query: &str) -> Result<Option<String>, DaneoError> {
        let wrapped = self.config.wrap_query(query);
        self.image_search.first_image_url(&wrapped)
    }

    /// Downloads `url` into the media directory unless `filename` is
    /// already there. Anything but HTTP 200 is an error; callers log and
    /// degrade.
    pub fn download_file(&self, url: &str, filename: &str) -> Result<PathBuf, DaneoError> {
        let path = self.path_for(filename);
        if path.exists() {
            return Ok(path);
        }

        let resp = fetch(&self.client, url, &[], &[])?;
        if resp.status() != StatusCode::OK {
            return Err(DaneoError::Custom(format!(
                "Download of {url} returned {}",
                resp.status()
            )));
        }

        let bytes = resp.bytes()?;
        fs::write(&path, &bytes)?;
        Ok(path)
    }

    /// Synthesizes `text` in `lang` into the media directory unless
    /// `filename` is already there.
    pub fn synthesize_audio(
        &self,
        text: &str,
        filename: &str,
        lang: &str,
    ) -> Result<PathBuf, DaneoError> {
        let path = self.path_for(filename);
        if path.exists() {
            return Ok(path);
        }

        let bytes = self.tts.synthesize(text, lang)?;
        fs::write(&path, bytes)?;
        Ok(path)
    }
}
