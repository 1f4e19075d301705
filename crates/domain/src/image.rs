//! Exercise images
//!
//! Illustrative media is resolved against a local cache first, with a remote
//! source as the authoritative fallback. This is the only asynchronous
//! operation of the engine; a failing cache never fails the lookup.

use log::error;

use crate::{CreateError, ExerciseID, ReadError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseImage {
    pub exercise_id: ExerciseID,
    pub url: String,
}

#[allow(async_fn_in_trait)]
pub trait ExerciseImageService {
    async fn get_image(&self, exercise_id: ExerciseID) -> Result<Option<ExerciseImage>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseImageRepository {
    async fn read_image(&self, exercise_id: ExerciseID)
    -> Result<Option<ExerciseImage>, ReadError>;
    async fn write_image(&self, image: ExerciseImage) -> Result<(), CreateError>;
}

pub struct CachedImageRepository<C, R> {
    cache: C,
    remote: R,
}

impl<C, R> CachedImageRepository<C, R> {
    pub fn new(cache: C, remote: R) -> Self {
        Self { cache, remote }
    }
}

impl<C: ExerciseImageRepository, R: ExerciseImageRepository> ExerciseImageRepository
    for CachedImageRepository<C, R>
{
    async fn read_image(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<Option<ExerciseImage>, ReadError> {
        match self.cache.read_image(exercise_id).await {
            Ok(Some(image)) => return Ok(Some(image)),
            Ok(None) => {}
            Err(err) => {
                error!("failed to read image from cache: {err}");
            }
        }

        let image = self.remote.read_image(exercise_id).await?;
        if let Some(image) = &image {
            if let Err(err) = self.cache.write_image(image.clone()).await {
                error!("failed to write image into cache: {err}");
            }
        }

        Ok(image)
    }

    async fn write_image(&self, image: ExerciseImage) -> Result<(), CreateError> {
        self.cache.write_image(image).await
    }
}
