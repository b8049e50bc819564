use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use crate::core::{
    Config,
    DaneoError,
    WordRecord,
};

const COLLECTIONS_DIR: &str = "collections";
const HEADER: [&str; 4] = ["english", "korean", "image_query", "definition"];

/// Writes `words` to `<data_dir>/collections/<category_name>.csv` with
/// the fixed header `english,korean,image_query,definition`. An existing
/// file of the same name is overwritten.
pub fn save_words(
    config: &Config,
    words: &[WordRecord],
    category_name: &str,
) -> Result<PathBuf, DaneoError> {
    let dir = config.data_dir.join(COLLECTIONS_DIR);
    fs::create_dir_all(&dir)?;

    let path = dir.join(format!("{}.csv", category_name.to_lowercase()));
    // Write the header ourselves so even an empty export carries it.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(&path)?;
    writer.write_record(HEADER)?;
    for word in words {
        writer.serialize(word)?;
    }
    writer.flush()?;

    Ok(path)
}

/// Reads a collection back. Incomplete rows are kept here; the deck
/// builder applies its own skip rule.
pub fn read_words(path: &Path) -> Result<Vec<WordRecord>, DaneoError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut words = Vec::new();
    for row in reader.deserialize() {
        words.push(row?);
    }
    Ok(words)
}
