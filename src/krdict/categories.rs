/// One entry in the dictionary service's browse taxonomy. `code` is the
/// value the open API expects in `subject_cat` / `sense_cat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub code: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Subject,
    Semantic,
}

// Subject (topic and situation) categories from the KRDict browse
// taxonomy. Ordering is stable; callers address these by index.
static SUBJECT: &[Category] = &[
    Category { label: "greeting", code: 1 },
    Category { label: "introducing_oneself", code: 2 },
    Category { label: "introducing_family", code: 3 },
    Category { label: "exchanging_personal_information", code: 4 },
    Category { label: "describing_appearance", code: 5 },
    Category { label: "expressing_time", code: 6 },
    Category { label: "expressing_date", code: 7 },
    Category { label: "expressing_day_of_week", code: 8 },
    Category { label: "weather_and_season", code: 9 },
    Category { label: "daily_life", code: 10 },
    Category { label: "school_life", code: 11 },
    Category { label: "life_in_korea", code: 12 },
    Category { label: "making_promises", code: 13 },
    Category { label: "making_phone_calls", code: 14 },
    Category { label: "expressing_gratitude", code: 15 },
    Category { label: "apologizing", code: 16 },
    Category { label: "travel", code: 17 },
    Category { label: "weekends_and_holidays", code: 18 },
    Category { label: "hobbies", code: 19 },
    Category { label: "family_events", code: 20 },
    Category { label: "health", code: 21 },
    Category { label: "using_transportation", code: 22 },
    Category { label: "using_public_institutions", code: 23 },
    Category { label: "inviting_and_visiting", code: 24 },
    Category { label: "finding_directions", code: 25 },
    Category { label: "using_public_transportation", code: 26 },
    Category { label: "giving_directions", code: 27 },
    Category { label: "shopping", code: 28 },
    Category { label: "ordering_food", code: 29 },
    Category { label: "describing_food", code: 30 },
    Category { label: "describing_dishes", code: 31 },
    Category { label: "expressing_emotions", code: 32 },
    Category { label: "describing_personality", code: 33 },
    Category { label: "describing_clothes", code: 34 },
    Category { label: "describing_physical_features", code: 35 },
    Category { label: "watching_movies", code: 36 },
    Category { label: "mass_media", code: 37 },
    Category { label: "computers_and_internet", code: 38 },
    Category { label: "describing_events_and_accidents", code: 39 },
    Category { label: "environmental_issues", code: 40 },
];

// Semantic (meaning) categories, top level of the taxonomy.
static SEMANTIC: &[Category] = &[
    Category { label: "human", code: 1 },
    Category { label: "life", code: 2 },
    Category { label: "dietary_life", code: 3 },
    Category { label: "clothing", code: 4 },
    Category { label: "housing", code: 5 },
    Category { label: "social_life", code: 6 },
    Category { label: "economic_life", code: 7 },
    Category { label: "education", code: 8 },
    Category { label: "religion", code: 9 },
    Category { label: "culture", code: 10 },
    Category { label: "politics_and_administration", code: 11 },
    Category { label: "nature", code: 12 },
    Category { label: "animals_and_plants", code: 13 },
    Category { label: "concepts", code: 14 },
];

pub fn subject_categories() -> &'static [Category] {
    SUBJECT
}

pub fn semantic_categories() -> &'static [Category] {
    SEMANTIC
}

pub fn categories(kind: CategoryKind) -> &'static [Category] {
    match kind {
        CategoryKind::Subject => SUBJECT,
        CategoryKind::Semantic => SEMANTIC,
    }
}
