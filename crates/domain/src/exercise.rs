use std::collections::BTreeSet;

use derive_more::{Deref, Display};

use crate::Category;

pub const DEFAULT_KIND: &str = "Strength";
pub const DEFAULT_BODY_PART: &str = "Unknown";
pub const DEFAULT_EQUIPMENT: &str = "Body Only";
pub const DEFAULT_LEVEL: &str = "Beginner";

/// One row of the exercise catalog.
///
/// All tag fields are guaranteed to be non-empty. Missing values of the
/// source are replaced by the `DEFAULT_*` constants when the row is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub id: ExerciseID,
    pub title: String,
    pub description: String,
    pub kind: String,
    pub body_part: String,
    pub equipment: String,
    pub level: String,
    pub rating: Option<f32>,
    pub rating_description: String,
}

impl ExerciseRecord {
    /// Create a record with the given title and default values for all other fields.
    #[must_use]
    pub fn new(id: impl Into<ExerciseID>, title: &str) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            description: String::new(),
            kind: DEFAULT_KIND.to_string(),
            body_part: DEFAULT_BODY_PART.to_string(),
            equipment: DEFAULT_EQUIPMENT.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            rating: None,
            rating_description: String::new(),
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.level.trim().parse().ok()
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(u32);

impl From<u32> for ExerciseID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A catalog record together with the data derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: ExerciseRecord,
    pub keywords: BTreeSet<String>,
    pub category: Category,
}

impl EnrichedRecord {
    #[must_use]
    pub fn new(record: ExerciseRecord) -> Self {
        let keywords = crate::keyword::synthesize(&record);
        let category = crate::category::categorize(&record);
        Self {
            record,
            keywords,
            category,
        }
    }
}

impl std::ops::Deref for EnrichedRecord {
    type Target = ExerciseRecord;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Difficulty::Beginner => &["easy", "basic", "starter", "novice"],
            Difficulty::Intermediate => &["moderate", "medium", "standard"],
            Difficulty::Advanced => &["hard", "difficult", "expert", "pro"],
        }
    }
}
