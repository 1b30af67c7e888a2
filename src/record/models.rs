//! Record models.
//!
//! Records are stored and exchanged as JSON objects with camelCase keys. The
//! deserializers are lenient about the shapes older collection files used
//! (numeric ids, years stored as strings) so that any document the web
//! frontend ever produced can still be loaded.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Condition
// =============================================================================

/// Grade of a record, following the usual Goldmine scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Grade {
    Mint,
    NearMint,
    VeryGoodPlus,
    VeryGood,
    GoodPlus,
    Good,
    Fair,
    Poor,
}

impl Grade {
    pub const ALL: [Grade; 8] = [
        Grade::Mint,
        Grade::NearMint,
        Grade::VeryGoodPlus,
        Grade::VeryGood,
        Grade::GoodPlus,
        Grade::Good,
        Grade::Fair,
        Grade::Poor,
    ];

    /// Parse a grade, accepting both the long tokens and the short aliases.
    pub fn parse(s: &str) -> Option<Self> {
        let grade = match s.trim().to_lowercase().as_str() {
            "mint" | "m" => Grade::Mint,
            "near-mint" | "near mint" | "nm" | "m-" => Grade::NearMint,
            "very-good-plus" | "very good plus" | "vg+" => Grade::VeryGoodPlus,
            "very-good" | "very good" | "vg" => Grade::VeryGood,
            "good-plus" | "good plus" | "g+" => Grade::GoodPlus,
            "good" | "g" => Grade::Good,
            "fair" | "f" => Grade::Fair,
            "poor" | "p" => Grade::Poor,
            _ => return None,
        };
        Some(grade)
    }

    pub fn token(&self) -> &'static str {
        match self {
            Grade::Mint => "mint",
            Grade::NearMint => "near-mint",
            Grade::VeryGoodPlus => "very-good-plus",
            Grade::VeryGood => "very-good",
            Grade::GoodPlus => "good-plus",
            Grade::Good => "good",
            Grade::Fair => "fair",
            Grade::Poor => "poor",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Condition text of a record, kept exactly as it was written so that a
/// collection saved back reads the same as the one loaded. Use
/// [`Condition::grade`] to interpret it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub struct Condition(String);

impl Condition {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The grade the text stands for, if it is one of the known tokens or
    /// aliases.
    pub fn grade(&self) -> Option<Grade> {
        Grade::parse(&self.0)
    }

    fn trimmed(self) -> Self {
        Condition(self.0.trim().to_string())
    }
}

impl From<Grade> for Condition {
    fn from(grade: Grade) -> Self {
        Condition(grade.token().to_string())
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition(value)
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        Condition(value.to_string())
    }
}

impl From<Option<String>> for Condition {
    fn from(value: Option<String>) -> Self {
        value.map(Condition).unwrap_or_default()
    }
}

impl From<Condition> for String {
    fn from(value: Condition) -> Self {
        value.0
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Record
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub album_cover: Option<String>,
    #[serde(default)]
    pub date_added: String,
    /// Keys this model does not know about, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Build a record from already normalized fields.
    pub fn new(id: String, date_added: String, fields: RecordFields) -> Self {
        let mut record = Record {
            id,
            artist: String::new(),
            album: String::new(),
            year: None,
            genre: None,
            condition: Condition::default(),
            notes: None,
            album_cover: None,
            date_added,
            extra: Map::new(),
        };
        record.apply(fields);
        record
    }

    /// Overwrite every mutable field. `id`, `date_added` and unknown keys are
    /// kept.
    pub fn apply(&mut self, fields: RecordFields) {
        self.artist = fields.artist;
        self.album = fields.album;
        self.year = fields.year;
        self.genre = fields.genre;
        self.condition = fields.condition;
        self.notes = fields.notes;
        self.album_cover = fields.album_cover;
    }

    pub fn fields(&self) -> RecordFields {
        RecordFields {
            artist: self.artist.clone(),
            album: self.album.clone(),
            year: self.year,
            genre: self.genre.clone(),
            condition: self.condition.clone(),
            notes: self.notes.clone(),
            album_cover: self.album_cover.clone(),
        }
    }
}

/// User-supplied values for a record, as entered in an add or edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub artist: String,
    pub album: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub condition: Condition,
    pub notes: Option<String>,
    pub album_cover: Option<String>,
}

impl RecordFields {
    pub fn new<A: Into<String>, B: Into<String>>(artist: A, album: B) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genre<S: Into<String>>(mut self, genre: S) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_condition<C: Into<Condition>>(mut self, condition: C) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_album_cover<S: Into<String>>(mut self, album_cover: S) -> Self {
        self.album_cover = Some(album_cover.into());
        self
    }

    /// Trim every text field and turn blank optional values into `None`.
    pub fn normalized(self) -> Self {
        Self {
            artist: self.artist.trim().to_string(),
            album: self.album.trim().to_string(),
            year: self.year,
            genre: blank_to_none(self.genre),
            condition: self.condition.trimmed(),
            notes: blank_to_none(self.notes),
            album_cover: blank_to_none(self.album_cover),
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// =============================================================================
// Lenient parsing
// =============================================================================

/// Parse a year the way a form field would be read: leading whitespace is
/// skipped and the leading run of digits is taken, so `"1977 (reissue)"`
/// reads as 1977. Returns `None` when there are no leading digits.
pub fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i32>().ok()?;
    Some(if negative { -value } else { value })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawScalar::Integer(n)) => i32::try_from(n).ok(),
        Some(RawScalar::Float(f)) if f.is_finite() => Some(f.trunc() as i32),
        Some(RawScalar::Float(_)) => None,
        Some(RawScalar::Text(s)) => parse_year(&s),
        Some(RawScalar::Other(_)) => None,
    })
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawScalar::deserialize(deserializer)? {
        RawScalar::Integer(n) => Ok(n.to_string()),
        RawScalar::Float(f) => Ok(f.to_string()),
        RawScalar::Text(s) => Ok(s),
        RawScalar::Other(_) => Err(serde::de::Error::custom(
            "record id must be a string or a number",
        )),
    }
}
