pub mod ids;
pub mod package;
pub mod templates;
pub mod types;

use std::path::PathBuf;

use ids::deterministic_id;
use types::{
    CardTemplate,
    Deck,
    Model,
    Note,
};

use crate::{
    core::{
        Config,
        DaneoError,
    },
    export,
    media::{
        DuckDuckGoImages,
        GoogleTranslateTts,
        ImageSearch,
        MediaStore,
        SpeechSynthesizer,
    },
};

const MODEL_NAME: &str = "Daneo Bidirectional Model";
const MODEL_FIELDS: [&str; 4] = ["English", "Korean", "Audio", "Image"];
const AUDIO_LANG: &str = "ko";

#[derive(Debug, Clone)]
pub struct DeckRequest {
    pub input_csv: PathBuf,
    pub output_file: PathBuf,
    pub title: String,
    pub include_eng_kor: bool,
    pub include_listening: bool,
    pub include_image_card: bool,
}

impl DeckRequest {
    fn selected_templates(&self) -> Vec<CardTemplate> {
        let mut selected = Vec::new();
        if self.include_eng_kor {
            selected.push(templates::ENG_TO_KOR);
        }
        if self.include_listening {
            selected.push(templates::LISTENING);
        }
        if self.include_image_card {
            selected.push(templates::IMAGE_TO_KOR);
        }
        selected
    }
}

/// Builds an `.apkg` from a word-collection CSV, acquiring audio (and,
/// when the image card is enabled, images) per row. Returns the number
/// of notes written.
pub fn create_deck(
    config: &Config,
    request: &DeckRequest,
    progress: &mut dyn FnMut(&str),
) -> Result<usize, DaneoError> {
    // Template validation comes before the store is built so a bad
    // request performs no file I/O at all.
    if request.selected_templates().is_empty() {
        return Err(DaneoError::NoTemplatesSelected);
    }
    let store: MediaStore<DuckDuckGoImages, GoogleTranslateTts> = MediaStore::new(config)?;
    create_deck_with(&store, request, progress)
}

pub fn create_deck_with<I: ImageSearch, S: SpeechSynthesizer>(
    store: &MediaStore<I, S>,
    request: &DeckRequest,
    progress: &mut dyn FnMut(&str),
) -> Result<usize, DaneoError> {
    let card_templates = request.selected_templates();
    if card_templates.is_empty() {
        return Err(DaneoError::NoTemplatesSelected);
    }

    let model = Model {
        id: deterministic_id(&format!("{}_model_v1", request.title)),
        name: MODEL_NAME.to_string(),
        fields: MODEL_FIELDS.to_vec(),
        templates: card_templates,
        css: templates::DEFAULT_CSS,
    };
    let mut deck = Deck {
        id: deterministic_id(&format!("{}_deck_v1", request.title)),
        name: request.title.clone(),
        notes: Vec::new(),
    };
    let mut media_files: Vec<PathBuf> = Vec::new();

    progress(&format!("Processing CSV: {}", request.input_csv.display()));
    let words = export::read_words(&request.input_csv)?;

    for word in words {
        if !word.is_complete() {
            continue;
        }
        progress(&format!("Processing: {} -> {}", word.english, word.korean));

        let stem = word.media_stem();

        // Audio is always attempted; the reference is written into the
        // note even when synthesis failed, and is inert without the file.
        let audio_file = format!("ko_{stem}.mp3");
        match store.synthesize_audio(&word.korean, &audio_file, AUDIO_LANG) {
            Ok(path) => media_files.push(path),
            Err(e) => {
                log::warn!("Audio synthesis failed for '{}': {e}", word.korean);
                progress(&format!("Could not generate audio for {}: {e}", word.korean));
            }
        }

        let mut image_ref = String::new();
        if request.include_image_card {
            let image_file = format!("img_{stem}.jpg");
            let local = store.path_for(&image_file);
            if local.exists() {
                media_files.push(local);
                image_ref = format!("<img src=\"{image_file}\">");
            } else {
                let query =
                    if word.image_query.is_empty() { &word.english } else { &word.image_query };
                match acquire_image(store, query, &image_file) {
                    Ok(Some(path)) => {
                        media_files.push(path);
                        image_ref = format!("<img src=\"{image_file}\">");
                    }
                    Ok(None) => {
                        progress(&format!("No image found for {}", word.english));
                    }
                    Err(e) => {
                        log::warn!("Image acquisition failed for '{query}': {e}");
                        progress(&format!("Could not fetch an image for {}: {e}", word.english));
                    }
                }
            }
        }

        deck.notes.push(Note {
            fields: vec![
                word.english,
                word.korean,
                format!("[sound:{audio_file}]"),
                image_ref,
            ],
        });
    }

    package::write_package(&model, &deck, &media_files, &request.output_file)?;
    progress(&format!(
        "Created deck '{}' with {} notes.",
        request.output_file.display(),
        deck.notes.len()
    ));

    Ok(deck.notes.len())
}

fn acquire_image<I: ImageSearch, S: SpeechSynthesizer>(
    store: &MediaStore<I, S>,
    query: &str,
    filename: &str,
) -> Result<Option<PathBuf>, DaneoError> {
    match store.find_image_url(query)? {
        Some(url) => Ok(Some(store.download_file(&url, filename)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{
        self,
        File,
    };

    use tempfile::TempDir;
    use zip::ZipArchive;

    use super::*;
    use crate::{
        core::WordRecord,
        export::save_words,
        media::fakes::{
            FakeImageSearch,
            FakeTts,
        },
    };

    fn record(english: &str, korean: &str) -> WordRecord {
        WordRecord {
            english: english.to_string(),
            korean: korean.to_string(),
            image_query: english.to_string(),
            definition: format!("def of {english}"),
        }
    }

    fn request(dir: &TempDir, csv: &std::path::Path, image_card: bool) -> DeckRequest {
        DeckRequest {
            input_csv: csv.to_path_buf(),
            output_file: dir.path().join("out.apkg"),
            title: "Test Deck".to_string(),
            include_eng_kor: true,
            include_listening: true,
            include_image_card: image_card,
        }
    }

    fn note_count(output: &std::path::Path, scratch: &TempDir) -> i64 {
        let mut archive = ZipArchive::new(File::open(output).unwrap()).unwrap();
        let mut entry = archive.by_name("collection.anki2").unwrap();
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut entry, &mut bytes).unwrap();
        drop(entry);
        let db = scratch.path().join("check.anki2");
        fs::write(&db, bytes).unwrap();
        let conn = rusqlite::Connection::open(&db).unwrap();
        conn.query_row("SELECT count(*) FROM notes", [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn zero_selected_templates_fail_before_any_io() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            media_dir: dir.path().join("media"),
            data_dir: dir.path().join("data"),
            ..Config::default()
        };
        let req = DeckRequest {
            input_csv: dir.path().join("missing.csv"),
            output_file: dir.path().join("out.apkg"),
            title: "Empty".to_string(),
            include_eng_kor: false,
            include_listening: false,
            include_image_card: false,
        };

        let err = create_deck(&config, &req, &mut |_| {}).unwrap_err();
        assert!(matches!(err, DaneoError::NoTemplatesSelected));
        assert!(!dir.path().join("media").exists());
        assert!(!dir.path().join("out.apkg").exists());
    }

    #[test]
    fn csv_round_trip_skips_incomplete_rows() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            media_dir: dir.path().join("media"),
            data_dir: dir.path().join("data"),
            ..Config::default()
        };

        let words = vec![
            record("apple", "사과"),
            record("", "물"),
            record("book", ""),
            record("tree", "나무"),
        ];
        let csv = save_words(&config, &words, "mixed").unwrap();

        let image = FakeImageSearch::empty();
        let tts = FakeTts::returning(b"mp3");
        let store = MediaStore::with_providers(&config, &image, &tts).unwrap();

        let req = request(&dir, &csv, false);
        let count = create_deck_with(&store, &req, &mut |_| {}).unwrap();

        assert_eq!(count, 2);
        assert_eq!(note_count(&req.output_file, &dir), 2);
        // Audio is synthesized for each complete row.
        assert_eq!(tts.call_count(), 2);
        assert!(store.path_for("ko_apple.mp3").exists());
        assert!(store.path_for("ko_tree.mp3").exists());
    }

    #[test]
    fn image_lookup_is_skipped_when_the_image_card_is_disabled() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            media_dir: dir.path().join("media"),
            data_dir: dir.path().join("data"),
            ..Config::default()
        };
        let csv = save_words(&config, &[record("apple", "사과")], "fruit").unwrap();

        let image = FakeImageSearch::returning("https://example.com/a.jpg");
        let tts = FakeTts::returning(b"mp3");
        let store = MediaStore::with_providers(&config, &image, &tts).unwrap();

        create_deck_with(&store, &request(&dir, &csv, false), &mut |_| {}).unwrap();
        assert_eq!(image.call_count(), 0);
    }

    #[test]
    fn cached_image_is_reused_without_a_search() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            media_dir: dir.path().join("media"),
            data_dir: dir.path().join("data"),
            ..Config::default()
        };
        let csv = save_words(&config, &[record("apple", "사과")], "fruit").unwrap();

        let image = FakeImageSearch::returning("https://example.com/a.jpg");
        let tts = FakeTts::returning(b"mp3");
        let store = MediaStore::with_providers(&config, &image, &tts).unwrap();
        fs::write(store.path_for("img_apple.jpg"), b"jpg").unwrap();

        create_deck_with(&store, &request(&dir, &csv, true), &mut |_| {}).unwrap();
        assert_eq!(image.call_count(), 0);
    }

    #[test]
    fn audio_failure_degrades_to_an_inert_reference() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            media_dir: dir.path().join("media"),
            data_dir: dir.path().join("data"),
            ..Config::default()
        };
        let csv = save_words(&config, &[record("apple", "사과")], "fruit").unwrap();

        let image = FakeImageSearch::empty();
        let tts = FakeTts::failing();
        let store = MediaStore::with_providers(&config, &image, &tts).unwrap();

        let mut messages = Vec::new();
        let req = request(&dir, &csv, false);
        let count =
            create_deck_with(&store, &req, &mut |m| messages.push(m.to_string())).unwrap();

        // The row still becomes a note; only the media file is missing.
        assert_eq!(count, 1);
        assert!(messages.iter().any(|m| m.contains("Could not generate audio")));
        assert!(!store.path_for("ko_apple.mp3").exists());
    }

    #[test]
    fn deck_identity_is_deterministic_across_builds() {
        let a = deterministic_id("Test Deck_deck_v1");
        let b = deterministic_id("Test Deck_deck_v1");
        let other = deterministic_id("Other Deck_deck_v1");
        assert_eq!(a, b);
        assert_ne!(a, other);
    }
}
