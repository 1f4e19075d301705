use std::fmt;

use derive_more::{Display, Into};

pub const LB_PER_KG: f32 = 2.204_62;

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }

    pub fn from_display(value: f32, unit: WeightUnit) -> Result<Self, WeightError> {
        Self::new(value / unit.factor())
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Weights are stored in kilograms. Conversion into the display unit is
/// lossless; rounding happens only in `format`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    #[must_use]
    pub fn factor(self) -> f32 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lb => LB_PER_KG,
        }
    }

    #[must_use]
    pub fn convert(self, weight: Weight) -> f32 {
        f32::from(weight) * self.factor()
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            WeightUnit::Kg => WeightUnit::Lb,
            WeightUnit::Lb => WeightUnit::Kg,
        }
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lbs",
        }
    }

    #[must_use]
    pub fn format(self, weight: Weight) -> String {
        let value = self.convert(weight);
        match self {
            WeightUnit::Kg => {
                let value = (value * 10.0).round() / 10.0;
                if value.fract().abs() < f32::EPSILON {
                    format!("{value:.0} {}", self.suffix())
                } else {
                    format!("{value:.1} {}", self.suffix())
                }
            }
            #[allow(clippy::cast_possible_truncation)]
            WeightUnit::Lb => format!("{} {}", value.trunc() as i64, self.suffix()),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Time(u32);

impl Time {
    pub fn new(value: u32) -> Result<Self, TimeError> {
        if !(0..1000).contains(&value) {
            return Err(TimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl From<Time> for i64 {
    fn from(value: Time) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<&str> for Time {
    type Error = TimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Time::new(parsed_value),
            Err(_) => Err(TimeError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TimeError {
    #[error("Time must be in the range 0 to 999 s")]
    OutOfRange,
    #[error("Time must be an integer")]
    ParseError,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RPE(u8);

impl RPE {
    pub const ONE: RPE = RPE(10);
    pub const TWO: RPE = RPE(20);
    pub const THREE: RPE = RPE(30);
    pub const FOUR: RPE = RPE(40);
    pub const FIVE: RPE = RPE(50);
    pub const SIX: RPE = RPE(60);
    pub const SEVEN: RPE = RPE(70);
    pub const EIGHT: RPE = RPE(80);
    pub const NINE: RPE = RPE(90);
    pub const TEN: RPE = RPE(100);

    pub fn new(value: f32) -> Result<Self, RPEError> {
        if !(1.0..=10.0).contains(&value) {
            return Err(RPEError::OutOfRange);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = (value * 10.0) as u8;

        if v % 5 != 0 {
            return Err(RPEError::InvalidResolution);
        }

        Ok(Self(v))
    }
}

impl From<RPE> for f32 {
    fn from(value: RPE) -> Self {
        f32::from(value.0) / 10.0
    }
}

impl TryFrom<&str> for RPE {
    type Error = RPEError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => RPE::new(parsed_value),
            Err(_) => Err(RPEError::ParseError),
        }
    }
}

impl fmt::Display for RPE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", f32::from(*self))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RPEError {
    #[error("RPE must be in the range 1.0 to 10.0")]
    OutOfRange,
    #[error("RPE must be a multiple of 0.5")]
    InvalidResolution,
    #[error("RPE must be a decimal")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct RIR(u8);

impl RIR {
    pub const ZERO: RIR = RIR(0);
    pub const ONE: RIR = RIR(1);
    pub const TWO: RIR = RIR(2);
    pub const THREE: RIR = RIR(3);

    pub fn new(value: u8) -> Result<Self, RIRError> {
        if value > 5 {
            return Err(RIRError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for RIR {
    type Error = RIRError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u8>() {
            Ok(parsed_value) => RIR::new(parsed_value),
            Err(_) => Err(RIRError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RIRError {
    #[error("RIR must be in the range 0 to 5")]
    OutOfRange,
    #[error("RIR must be an integer")]
    ParseError,
}
