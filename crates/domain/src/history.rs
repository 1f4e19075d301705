use crate::{CompletedSet, CreateError, ExerciseID, ReadError, Reps, Weight};

/// One set from the last session of the same exercise, aligned by set index.
/// Used for display and autofill only, never for target computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviousSet {
    pub weight: Weight,
    pub reps: Reps,
}

#[allow(async_fn_in_trait)]
pub trait SetLogService {
    async fn get_previous_sets(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<Vec<PreviousSet>, ReadError>;
    async fn store_set_log(
        &self,
        exercise_id: ExerciseID,
        sets: &[CompletedSet],
    ) -> Result<(), CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait SetLogRepository {
    async fn read_previous_sets(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<Vec<PreviousSet>, ReadError>;
    async fn write_set_log(
        &self,
        exercise_id: ExerciseID,
        sets: &[CompletedSet],
    ) -> Result<(), CreateError>;
}
