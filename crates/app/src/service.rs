use crate::{
    OngoingWorkout, OngoingWorkoutRepository, OngoingWorkoutService, Settings, SettingsRepository,
    SettingsService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, String> {
        self.repository.read_settings().await
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), String> {
        self.repository.write_settings(settings).await
    }
}

impl<R: OngoingWorkoutRepository> OngoingWorkoutService for Service<R> {
    async fn get_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String> {
        self.repository.read_ongoing_workout().await
    }

    async fn set_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkout>,
    ) -> Result<(), String> {
        self.repository.write_ongoing_workout(ongoing_workout).await
    }
}
