pub mod anki;
pub mod core;
pub mod export;
pub mod krdict;
pub mod media;

pub use crate::{
    anki::{
        create_deck,
        create_deck_with,
        DeckRequest,
    },
    core::{
        Config,
        DaneoError,
        WordRecord,
    },
    export::{
        read_words,
        save_words,
    },
    krdict::{
        categories::{
            semantic_categories,
            subject_categories,
            Category,
            CategoryKind,
        },
        fetch_category_words,
        fetch_category_words_with,
    },
};
