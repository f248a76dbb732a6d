use std::fmt;
use std::path::Path;

/// File representation recognised from a path's extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Xlsx,
    /// Anything else, carrying the lower-cased extension text.
    Other(String),
}

impl FileFormat {
    /// Classifies `path` by the text after its last `.`, lower-cased. A path
    /// without a dot is classified by its whole text.
    pub fn detect(path: &Path) -> FileFormat {
        let text = path.to_string_lossy();
        let tag = text.rsplit('.').next().unwrap_or_default().to_lowercase();
        match tag.as_str() {
            "json" => FileFormat::Json,
            "xlsx" => FileFormat::Xlsx,
            _ => FileFormat::Other(tag),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Json => write!(f, "json"),
            FileFormat::Xlsx => write!(f, "xlsx"),
            FileFormat::Other(tag) => write!(f, "{tag}"),
        }
    }
}
