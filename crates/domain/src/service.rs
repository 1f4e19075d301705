use log::{debug, error};

use crate::{
    CompletedSet, CreateError, ExerciseID, ExerciseImage, ExerciseImageRepository,
    ExerciseImageService, PreviousSet, ReadError, SetLogRepository, SetLogService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SetLogRepository> SetLogService for Service<R> {
    async fn get_previous_sets(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<Vec<PreviousSet>, ReadError> {
        log_on_error!(
            self.repository.read_previous_sets(exercise_id),
            ReadError,
            "get",
            "previous sets"
        )
    }

    async fn store_set_log(
        &self,
        exercise_id: ExerciseID,
        sets: &[CompletedSet],
    ) -> Result<(), CreateError> {
        log_on_error!(
            self.repository.write_set_log(exercise_id, sets),
            CreateError,
            "store",
            "set log"
        )
    }
}

impl<R: ExerciseImageRepository> ExerciseImageService for Service<R> {
    async fn get_image(&self, exercise_id: ExerciseID) -> Result<Option<ExerciseImage>, ReadError> {
        log_on_error!(
            self.repository.read_image(exercise_id),
            ReadError,
            "get",
            "exercise image"
        )
    }
}
