//! The `Entry` row and the typed values of its fields.
use crate::errors::ValidationError;
use chrono::NaiveDate;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Categorical rating used for the substance and diet fields.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rating {
    Bad,
    #[default]
    Neutral,
    Good,
}

/// A 1 to 10 score. Values outside that range cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VibeScore(u8);

impl VibeScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for VibeScore {
    fn default() -> Self {
        Self(5)
    }
}

impl fmt::Display for VibeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Minutes,
    Rating,
    Vibe,
}

/// The editable columns of an entry, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Field {
    MeditationMinutes,
    ExerciseMinutes,
    TimeWithPersonA,
    TimeWithPersonB,
    TimeWithPersonC,
    SubstanceRating,
    DietRating,
    ScreenMinutes,
    ProductiveMinutes,
    VibeScore,
}

impl Field {
    /// Column name in the persisted table.
    pub fn column(self) -> &'static str {
        match self {
            Field::MeditationMinutes => "meditation_minutes",
            Field::ExerciseMinutes => "exercise_minutes",
            Field::TimeWithPersonA => "time_with_person_a",
            Field::TimeWithPersonB => "time_with_person_b",
            Field::TimeWithPersonC => "time_with_person_c",
            Field::SubstanceRating => "substance_rating",
            Field::DietRating => "diet_rating",
            Field::ScreenMinutes => "screen_minutes",
            Field::ProductiveMinutes => "productive_minutes",
            Field::VibeScore => "vibe_score",
        }
    }

    /// Short name accepted on the command line (e.g. `vibe=7`).
    pub fn alias(self) -> &'static str {
        match self {
            Field::MeditationMinutes => "meditation",
            Field::ExerciseMinutes => "exercise",
            Field::TimeWithPersonA => "person-a",
            Field::TimeWithPersonB => "person-b",
            Field::TimeWithPersonC => "person-c",
            Field::SubstanceRating => "substance",
            Field::DietRating => "diet",
            Field::ScreenMinutes => "screen",
            Field::ProductiveMinutes => "productive",
            Field::VibeScore => "vibe",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::MeditationMinutes => "Meditation",
            Field::ExerciseMinutes => "Exercise",
            Field::TimeWithPersonA => "Person A",
            Field::TimeWithPersonB => "Person B",
            Field::TimeWithPersonC => "Person C",
            Field::SubstanceRating => "Substance",
            Field::DietRating => "Diet",
            Field::ScreenMinutes => "Screen",
            Field::ProductiveMinutes => "Productive",
            Field::VibeScore => "Vibe",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::SubstanceRating | Field::DietRating => FieldKind::Rating,
            Field::VibeScore => FieldKind::Vibe,
            _ => FieldKind::Minutes,
        }
    }

    /// Index of the tracked person for the `TimeWithPerson*` fields.
    pub fn person_index(self) -> Option<usize> {
        match self {
            Field::TimeWithPersonA => Some(0),
            Field::TimeWithPersonB => Some(1),
            Field::TimeWithPersonC => Some(2),
            _ => None,
        }
    }

    /// Finds a field by column name, alias or (for the person fields) the person's
    /// display name. Matching ignores case and treats `_`, `-` and spaces alike.
    pub fn lookup(name: &str, people: &[String]) -> Result<Field, ValidationError> {
        let wanted = normalize_name(name);
        Field::iter()
            .find(|field| {
                normalize_name(field.column()) == wanted
                    || normalize_name(field.alias()) == wanted
                    || field
                        .person_index()
                        .and_then(|i| people.get(i))
                        .is_some_and(|person| normalize_name(person) == wanted)
            })
            .ok_or_else(|| ValidationError::UnknownField(name.trim().to_string()))
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// A typed value for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Minutes(u32),
    Rating(Rating),
    Vibe(VibeScore),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Minutes(m) => write!(f, "{m}"),
            FieldValue::Rating(r) => write!(f, "{r}"),
            FieldValue::Vibe(v) => write!(f, "{v}"),
        }
    }
}

/// One day of metrics, keyed by `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub date: NaiveDate,
    pub meditation_minutes: u32,
    pub exercise_minutes: u32,
    pub time_with_person_a: u32,
    pub time_with_person_b: u32,
    pub time_with_person_c: u32,
    pub substance_rating: Rating,
    pub diet_rating: Rating,
    pub screen_minutes: u32,
    pub productive_minutes: u32,
    pub vibe_score: VibeScore,
}

impl Entry {
    /// An entry for `date` with every field at its default.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meditation_minutes: 0,
            exercise_minutes: 0,
            time_with_person_a: 0,
            time_with_person_b: 0,
            time_with_person_c: 0,
            substance_rating: Rating::default(),
            diet_rating: Rating::default(),
            screen_minutes: 0,
            productive_minutes: 0,
            vibe_score: VibeScore::default(),
        }
    }

    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::MeditationMinutes => FieldValue::Minutes(self.meditation_minutes),
            Field::ExerciseMinutes => FieldValue::Minutes(self.exercise_minutes),
            Field::TimeWithPersonA => FieldValue::Minutes(self.time_with_person_a),
            Field::TimeWithPersonB => FieldValue::Minutes(self.time_with_person_b),
            Field::TimeWithPersonC => FieldValue::Minutes(self.time_with_person_c),
            Field::SubstanceRating => FieldValue::Rating(self.substance_rating),
            Field::DietRating => FieldValue::Rating(self.diet_rating),
            Field::ScreenMinutes => FieldValue::Minutes(self.screen_minutes),
            Field::ProductiveMinutes => FieldValue::Minutes(self.productive_minutes),
            Field::VibeScore => FieldValue::Vibe(self.vibe_score),
        }
    }

    /// Parses `raw` for `field` and stores it. On error the entry is left untouched.
    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<(), ValidationError> {
        let raw = raw.trim();
        match field {
            Field::MeditationMinutes => self.meditation_minutes = parse_minutes(field, raw)?,
            Field::ExerciseMinutes => self.exercise_minutes = parse_minutes(field, raw)?,
            Field::TimeWithPersonA => self.time_with_person_a = parse_minutes(field, raw)?,
            Field::TimeWithPersonB => self.time_with_person_b = parse_minutes(field, raw)?,
            Field::TimeWithPersonC => self.time_with_person_c = parse_minutes(field, raw)?,
            Field::SubstanceRating => self.substance_rating = parse_rating(field, raw)?,
            Field::DietRating => self.diet_rating = parse_rating(field, raw)?,
            Field::ScreenMinutes => self.screen_minutes = parse_minutes(field, raw)?,
            Field::ProductiveMinutes => self.productive_minutes = parse_minutes(field, raw)?,
            Field::VibeScore => self.vibe_score = parse_vibe(field, raw)?,
        }
        Ok(())
    }

    /// Fields whose values differ from `other`, in column order.
    pub fn changed_fields(&self, other: &Entry) -> Vec<Field> {
        Field::iter()
            .filter(|field| self.value(*field) != other.value(*field))
            .collect()
    }
}

fn parse_minutes(field: Field, raw: &str) -> Result<u32, ValidationError> {
    let value: i64 = raw.parse().map_err(|_| ValidationError::NotANumber {
        field: field.column().to_string(),
        value: raw.to_string(),
    })?;
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.column().to_string(),
            value: raw.to_string(),
        });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field: field.column().to_string(),
        value: raw.to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

fn parse_rating(field: Field, raw: &str) -> Result<Rating, ValidationError> {
    raw.parse().map_err(|_| ValidationError::UnknownRating {
        field: field.column().to_string(),
        value: raw.to_string(),
    })
}

fn parse_vibe(field: Field, raw: &str) -> Result<VibeScore, ValidationError> {
    let value: i64 = raw.parse().map_err(|_| ValidationError::NotANumber {
        field: field.column().to_string(),
        value: raw.to_string(),
    })?;
    u8::try_from(value)
        .ok()
        .and_then(VibeScore::new)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: field.column().to_string(),
            value: raw.to_string(),
            min: i64::from(VibeScore::MIN),
            max: i64::from(VibeScore::MAX),
        })
}
