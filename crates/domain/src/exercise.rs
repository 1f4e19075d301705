use std::fmt;

use derive_more::{AsRef, Deref, Display};
use uuid::Uuid;

use crate::{Reps, SetTarget, Time, Weight};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > 128 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 128 characters or fewer ({0} > 128)")]
    TooLong(usize),
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Equipment determines the smallest sensible weight adjustment. Descriptions
/// come from free-text exercise catalogs, so resolution is a substring match
/// in a fixed priority order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Equipment {
    Bodyweight,
    #[default]
    Dumbbell,
    Cable,
    Barbell,
    Kettlebell,
    Machine,
}

impl Equipment {
    const PATTERNS: [(Equipment, &'static str); 6] = [
        (Equipment::Bodyweight, "bodyweight"),
        (Equipment::Kettlebell, "kettlebell"),
        (Equipment::Machine, "machine"),
        (Equipment::Barbell, "barbell"),
        (Equipment::Cable, "cable"),
        (Equipment::Dumbbell, "dumbbell"),
    ];

    #[must_use]
    pub fn from_description(description: Option<&str>) -> Self {
        let Some(description) = description else {
            return Equipment::default();
        };
        let description = description.to_lowercase();
        Self::PATTERNS
            .iter()
            .find(|(_, pattern)| description.contains(pattern))
            .map_or_else(Equipment::default, |(equipment, _)| *equipment)
    }

    #[must_use]
    pub fn increment(self) -> Weight {
        match self {
            Equipment::Bodyweight => Weight::default(),
            Equipment::Dumbbell | Equipment::Cable | Equipment::Barbell => {
                Weight::new(2.5).unwrap()
            }
            Equipment::Kettlebell => Weight::new(4.0).unwrap(),
            Equipment::Machine => Weight::new(5.0).unwrap(),
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Equipment::Bodyweight => "bodyweight",
                Equipment::Dumbbell => "dumbbell",
                Equipment::Cable => "cable",
                Equipment::Barbell => "barbell",
                Equipment::Kettlebell => "kettlebell",
                Equipment::Machine => "machine",
            }
        )
    }
}

/// Per-exercise prescription, read-only for the duration of a session. A
/// non-empty `set_targets` drives set generation; the remaining target fields
/// are the fallback prescription.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSpec {
    pub id: ExerciseID,
    pub name: Name,
    pub equipment: Option<String>,
    pub target_weight: Option<Weight>,
    pub target_reps: Option<Reps>,
    pub target_rest: Option<Time>,
    pub duration: Option<Time>,
    pub sets: Option<u32>,
    pub set_targets: Vec<SetTarget>,
    pub is_drop_set: bool,
    pub is_failure_set: bool,
}

impl ExerciseSpec {
    pub const DEFAULT_SETS: u32 = 3;
    pub const DEFAULT_REPS: u32 = 10;

    #[must_use]
    pub fn equipment_type(&self) -> Equipment {
        Equipment::from_description(self.equipment.as_deref())
    }

    #[must_use]
    pub fn set_count(&self) -> u32 {
        self.sets.unwrap_or(Self::DEFAULT_SETS)
    }

    #[must_use]
    pub fn default_reps(&self) -> Reps {
        self.target_reps
            .unwrap_or_else(|| Reps::new(Self::DEFAULT_REPS).unwrap())
    }
}
