#![warn(clippy::pedantic)]

pub mod ongoing_workout;
pub mod service;
pub mod settings;

pub use ongoing_workout::{
    OngoingWorkout, OngoingWorkoutRepository, OngoingWorkoutService, RestTimer,
};
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService};
