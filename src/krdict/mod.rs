pub mod api;
pub mod categories;

use api::{
    Entry,
    KrdictApi,
    WordSource,
};
use categories::{
    categories,
    CategoryKind,
};

use crate::core::{
    Config,
    DaneoError,
    WordRecord,
};

const PER_PAGE: usize = 100;
const ENGLISH_TAGS: [&str; 2] = ["영어", "English"];

/// Fetches up to `limit` words for the category at `index`, normalizing
/// each upstream entry to a [`WordRecord`]. Validation happens before any
/// network traffic; a mid-pagination failure returns what was accumulated
/// so far rather than discarding it.
pub fn fetch_category_words(
    config: &Config,
    kind: CategoryKind,
    index: usize,
    limit: usize,
    progress: &mut dyn FnMut(&str),
) -> Result<Vec<WordRecord>, DaneoError> {
    let table = categories(kind);
    if index >= table.len() {
        return Err(DaneoError::InvalidCategoryIndex { index, len: table.len() });
    }
    let source = KrdictApi::new(config)?;
    fetch_category_words_with(&source, kind, index, limit, progress)
}

pub fn fetch_category_words_with(
    source: &dyn WordSource,
    kind: CategoryKind,
    index: usize,
    limit: usize,
    progress: &mut dyn FnMut(&str),
) -> Result<Vec<WordRecord>, DaneoError> {
    let table = categories(kind);
    let Some(category) = table.get(index) else {
        return Err(DaneoError::InvalidCategoryIndex { index, len: table.len() });
    };

    progress(&format!("Starting download for {}...", category.label));

    let mut words: Vec<WordRecord> = Vec::new();
    let mut page = 1;

    while words.len() < limit {
        progress(&format!("Fetching page {} for {}...", page, category.label));

        let entries = match source.fetch_page(category, kind, page, PER_PAGE) {
            Ok(entries) => entries,
            Err(e) => {
                // Keep the partial accumulation; the caller decides what
                // to do with an incomplete list.
                log::warn!("Stopping category fetch on page {page}: {e}");
                progress(&format!("Error fetching from KRDict: {e}"));
                break;
            }
        };

        if entries.is_empty() {
            break;
        }

        let page_size = entries.len();
        for entry in entries {
            if let Some(record) = normalize_entry(entry) {
                words.push(record);
            }
            if words.len() >= limit {
                break;
            }
        }

        // A short page signals the last page.
        if page_size < PER_PAGE {
            break;
        }
        page += 1;
    }

    Ok(words)
}

/// Extracts the English gloss from an upstream entry. Entries without any
/// English translation are dropped; this is a cleaning filter, not an
/// error.
fn normalize_entry(entry: Entry) -> Option<WordRecord> {
    // A malformed entry without a headword can never satisfy the
    // non-empty `korean` contract.
    if entry.word.is_empty() {
        return None;
    }

    let mut translation = String::new();
    let mut definition = String::new();

    for sense in &entry.senses {
        for trans in &sense.translations {
            if ENGLISH_TAGS.contains(&trans.trans_lang.as_str()) {
                translation = trans.trans_word.clone();
                definition = trans.trans_dfn.clone();
                break;
            }
        }
        if !translation.is_empty() {
            break;
        }
    }

    if definition.is_empty() {
        if let Some(first) = entry.senses.first() {
            definition = first.definition.clone();
        }
    }

    if translation.is_empty() {
        return None;
    }

    let english = simplify_translation(&translation);
    Some(WordRecord {
        image_query: english.clone(),
        english,
        korean: entry.word,
        definition,
    })
}

/// Keeps only the first of comma- or semicolon-separated alternatives:
/// "foo, bar; baz" -> "foo".
pub fn simplify_translation(translation: &str) -> String {
    translation
        .split(',')
        .next()
        .unwrap_or_default()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{
        api::{
            Sense,
            Translation,
        },
        categories::Category,
        *,
    };

    fn english_entry(word: &str, translation: &str) -> Entry {
        Entry {
            word: word.to_string(),
            senses: vec![Sense {
                definition: String::new(),
                translations: vec![Translation {
                    trans_lang: "영어".to_string(),
                    trans_word: translation.to_string(),
                    trans_dfn: format!("def of {translation}"),
                }],
            }],
        }
    }

    fn untranslated_entry(word: &str) -> Entry {
        Entry {
            word: word.to_string(),
            senses: vec![Sense {
                definition: "뜻풀이만 있음".to_string(),
                translations: Vec::new(),
            }],
        }
    }

    /// Serves scripted pages; panics if asked for more than scripted.
    struct FakeSource {
        pages: Vec<Vec<Entry>>,
        fail_after: Option<usize>,
    }

    impl WordSource for FakeSource {
        fn fetch_page(
            &self,
            _category: &Category,
            _kind: CategoryKind,
            page: usize,
            _per_page: usize,
        ) -> Result<Vec<Entry>, DaneoError> {
            if let Some(limit) = self.fail_after {
                if page > limit {
                    return Err(DaneoError::Custom("upstream went away".to_string()));
                }
            }
            Ok(self.pages.get(page - 1).cloned().unwrap_or_default())
        }
    }

    struct PanickingSource;

    impl WordSource for PanickingSource {
        fn fetch_page(
            &self,
            _category: &Category,
            _kind: CategoryKind,
            _page: usize,
            _per_page: usize,
        ) -> Result<Vec<Entry>, DaneoError> {
            panic!("fetch_page must not be called for an invalid index");
        }
    }

    #[test]
    fn simplification_keeps_the_first_alternative() {
        assert_eq!(simplify_translation("foo, bar; baz"), "foo");
        assert_eq!(simplify_translation("foo; bar, baz"), "foo");
        assert_eq!(simplify_translation("  plain  "), "plain");
        assert_eq!(simplify_translation(""), "");
    }

    #[test]
    fn respects_limit_and_populates_both_fields() {
        let page: Vec<Entry> =
            (0..100).map(|i| english_entry(&format!("단어{i}"), &format!("word{i}"))).collect();
        let source = FakeSource { pages: vec![page.clone(), page], fail_after: None };

        let words =
            fetch_category_words_with(&source, CategoryKind::Subject, 0, 150, &mut |_| {})
                .unwrap();

        assert_eq!(words.len(), 150);
        for word in &words {
            assert!(!word.english.is_empty());
            assert!(!word.korean.is_empty());
        }
    }

    #[test]
    fn short_page_ends_pagination() {
        let source = FakeSource {
            pages: vec![vec![english_entry("사과", "apple"), english_entry("물", "water")]],
            fail_after: None,
        };

        let mut messages = Vec::new();
        let words = fetch_category_words_with(&source, CategoryKind::Semantic, 0, 500, &mut |m| {
            messages.push(m.to_string())
        })
        .unwrap();

        assert_eq!(words.len(), 2);
        // One start message plus exactly one page fetch.
        assert!(messages.iter().any(|m| m.contains("page 1")));
        assert!(!messages.iter().any(|m| m.contains("page 2")));
    }

    #[test]
    fn entries_without_english_gloss_are_skipped() {
        let source = FakeSource {
            pages: vec![vec![
                english_entry("사과", "apple"),
                untranslated_entry("물"),
                english_entry("책", "book"),
            ]],
            fail_after: None,
        };

        let words =
            fetch_category_words_with(&source, CategoryKind::Subject, 0, 100, &mut |_| {})
                .unwrap();

        let english: Vec<_> = words.iter().map(|w| w.english.as_str()).collect();
        assert_eq!(english, vec!["apple", "book"]);
    }

    #[test]
    fn entries_without_a_headword_are_skipped() {
        let source = FakeSource {
            pages: vec![vec![english_entry("", "ghost"), english_entry("사과", "apple")]],
            fail_after: None,
        };

        let words =
            fetch_category_words_with(&source, CategoryKind::Subject, 0, 100, &mut |_| {})
                .unwrap();

        assert_eq!(words.len(), 1);
        assert_eq!(words[0].korean, "사과");
        assert!(words.iter().all(|w| !w.korean.is_empty()));
    }

    #[test]
    fn multi_value_translations_are_simplified_into_query_and_gloss() {
        let source = FakeSource {
            pages: vec![vec![english_entry("개", "dog, hound; canine")]],
            fail_after: None,
        };

        let words =
            fetch_category_words_with(&source, CategoryKind::Subject, 0, 10, &mut |_| {})
                .unwrap();

        assert_eq!(words[0].english, "dog");
        assert_eq!(words[0].image_query, "dog");
        assert_eq!(words[0].korean, "개");
    }

    #[test]
    fn pagination_failure_returns_partial_results() {
        let page: Vec<Entry> =
            (0..100).map(|i| english_entry(&format!("단어{i}"), &format!("word{i}"))).collect();
        let source = FakeSource { pages: vec![page], fail_after: Some(1) };

        let mut messages = Vec::new();
        let words = fetch_category_words_with(&source, CategoryKind::Subject, 0, 300, &mut |m| {
            messages.push(m.to_string())
        })
        .unwrap();

        assert_eq!(words.len(), 100);
        assert!(messages.iter().any(|m| m.contains("Error fetching")));
    }

    #[test]
    fn out_of_range_index_fails_before_any_fetch() {
        for kind in [CategoryKind::Subject, CategoryKind::Semantic] {
            let len = categories(kind).len();
            let err = fetch_category_words_with(&PanickingSource, kind, len, 10, &mut |_| {})
                .unwrap_err();
            match err {
                DaneoError::InvalidCategoryIndex { index, len: reported } => {
                    assert_eq!(index, len);
                    assert_eq!(reported, len);
                }
                other => panic!("expected InvalidCategoryIndex, got {other:?}"),
            }
        }
    }
}
