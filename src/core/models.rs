use serde::{
    Deserialize,
    Serialize,
};

/// One dictionary entry after English-gloss extraction and simplification.
/// Field order doubles as the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub english: String,
    pub korean: String,
    pub image_query: String,
    pub definition: String,
}

impl WordRecord {
    /// Filesystem-safe stem used to name media assets for this record.
    pub fn media_stem(&self) -> String {
        self.english.replace(' ', "_").to_lowercase()
    }

    /// Rows missing either required field are dropped by the deck builder.
    pub fn is_complete(&self) -> bool {
        !self.english.is_empty() && !self.korean.is_empty()
    }
}
