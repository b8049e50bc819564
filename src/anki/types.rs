use crate::anki::ids::note_guid;

/// One question/answer HTML pair. Each enabled template yields one card
/// per note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTemplate {
    pub name: &'static str,
    pub qfmt: &'static str,
    pub afmt: &'static str,
}

/// Field schema plus templates plus stylesheet. The field schema is
/// fixed at four fields regardless of which templates are enabled.
#[derive(Debug, Clone)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub fields: Vec<&'static str>,
    pub templates: Vec<CardTemplate>,
    pub css: &'static str,
}

/// One row's worth of field values bound to the model's schema.
#[derive(Debug, Clone)]
pub struct Note {
    pub fields: Vec<String>,
}

impl Note {
    pub fn guid(&self) -> String {
        note_guid(&self.fields)
    }

    /// The sort field is the first field (English).
    pub fn sort_field(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub notes: Vec<Note>,
}
