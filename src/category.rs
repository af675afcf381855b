//! Media categories offered by the picker.
//!
//! The set is fixed: each category maps to one value of the archive's
//! `mediatype` search field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A media type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Texts,
    #[serde(alias = "videos")]
    Movies,
    Audio,
    Images,
    Software,
}

impl Category {
    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Category::Texts,
            Category::Movies,
            Category::Audio,
            Category::Images,
            Category::Software,
        ]
    }

    /// Identifier used in the `mediatype:` query
    pub fn id(&self) -> &'static str {
        match self {
            Category::Texts => "texts",
            Category::Movies => "movies",
            Category::Audio => "audio",
            Category::Images => "images",
            Category::Software => "software",
        }
    }

    /// Label shown next to the checkbox
    pub fn label(&self) -> &'static str {
        match self {
            Category::Texts => "Texts/PDFs",
            Category::Movies => "Videos",
            Category::Audio => "Audio",
            Category::Images => "Images",
            Category::Software => "Software",
        }
    }

    /// Search filter string for this category
    pub fn query(&self) -> String {
        format!("mediatype:{}", self.id())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown category '{0}' (expected one of: texts, movies, audio, images, software)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "texts" => Ok(Category::Texts),
            // The archive calls videos "movies"
            "movies" | "videos" => Ok(Category::Movies),
            "audio" => Ok(Category::Audio),
            "images" => Ok(Category::Images),
            "software" => Ok(Category::Software),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_and_labels() {
        let pairs: Vec<(&str, &str)> = Category::all().iter().map(|c| (c.id(), c.label())).collect();
        assert_eq!(
            pairs,
            vec![
                ("texts", "Texts/PDFs"),
                ("movies", "Videos"),
                ("audio", "Audio"),
                ("images", "Images"),
                ("software", "Software"),
            ]
        );
    }

    #[test]
    fn test_query() {
        assert_eq!(Category::Images.query(), "mediatype:images");
        assert_eq!(Category::Movies.query(), "mediatype:movies");
    }

    #[test]
    fn test_parse() {
        assert_eq!("texts".parse::<Category>(), Ok(Category::Texts));
        assert_eq!("Videos".parse::<Category>(), Ok(Category::Movies));
        assert_eq!(" AUDIO ".parse::<Category>(), Ok(Category::Audio));
        assert_eq!(
            "music".parse::<Category>(),
            Err(UnknownCategory("music".to_string()))
        );
    }

    #[test]
    fn test_parse_roundtrips_display() {
        for category in Category::all() {
            assert_eq!(category.to_string().parse::<Category>(), Ok(*category));
        }
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Category::Movies).unwrap();
        assert_eq!(json, "\"movies\"");
        let parsed: Category = serde_json::from_str("\"videos\"").unwrap();
        assert_eq!(parsed, Category::Movies);
    }
}
