#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod exercise;
pub mod history;
pub mod image;
pub mod plan;
pub mod progression;
pub mod service;
pub mod tracker;
pub mod training;

pub use error::{CreateError, ReadError, StorageError};
pub use exercise::{Equipment, ExerciseID, ExerciseSpec, Name, NameError};
pub use history::{PreviousSet, SetLogRepository, SetLogService};
pub use image::{
    CachedImageRepository, ExerciseImage, ExerciseImageRepository, ExerciseImageService,
};
pub use plan::{SetPlan, SetTarget, SetType};
pub use service::Service;
pub use tracker::{ActiveSetData, CompletedSet, SetState, SetTracker};
pub use training::{
    LB_PER_KG, RIR, RIRError, RPE, RPEError, Reps, RepsError, Time, TimeError, Weight, WeightError,
    WeightUnit,
};
