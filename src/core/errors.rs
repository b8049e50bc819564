use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaneoError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(Box<quick_xml::DeError>),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("SQLite error: {0}")]
    Sqlite(Box<rusqlite::Error>),

    #[error("Zip error: {0}")]
    Zip(Box<zip::result::ZipError>),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Rate limited after {attempts} attempts: {url}")]
    RateLimited { url: String, attempts: usize },

    #[error("Invalid category index {index} (list has {len} categories)")]
    InvalidCategoryIndex { index: usize, len: usize },

    #[error("No card templates selected")]
    NoTemplatesSelected,

    #[error("KRDICT_API_KEY is not set")]
    MissingApiKey,

    #[error("DaneoError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for DaneoError {
    fn from(error: std::io::Error) -> Self {
        DaneoError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for DaneoError {
    fn from(error: reqwest::Error) -> Self {
        DaneoError::Reqwest(Box::new(error))
    }
}

impl From<quick_xml::DeError> for DaneoError {
    fn from(error: quick_xml::DeError) -> Self {
        DaneoError::Xml(Box::new(error))
    }
}

impl From<csv::Error> for DaneoError {
    fn from(error: csv::Error) -> Self {
        DaneoError::Csv(Box::new(error))
    }
}

impl From<rusqlite::Error> for DaneoError {
    fn from(error: rusqlite::Error) -> Self {
        DaneoError::Sqlite(Box::new(error))
    }
}

impl From<zip::result::ZipError> for DaneoError {
    fn from(error: zip::result::ZipError) -> Self {
        DaneoError::Zip(Box::new(error))
    }
}
