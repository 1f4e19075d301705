use chrono::{DateTime, Duration, Utc};
use pondus_domain as domain;

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutService {
    async fn get_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String>;
    async fn set_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkout>,
    ) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutRepository {
    async fn read_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, String>;
    async fn write_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkout>,
    ) -> Result<(), String>;
}

/// Per-workout coordination state. The exercise being performed and the
/// exercise being viewed diverge while the user browses ahead or behind
/// without changing what they are actually performing. Changing external
/// workout state is the embedding application's responsibility; this type
/// only reports the derived signals.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct OngoingWorkout {
    start_time: DateTime<Utc>,
    exercise_count: usize,
    current_exercise_idx: usize,
    viewing_exercise_idx: usize,
    minimized: bool,
    rest_timer: RestTimer,
}

impl OngoingWorkout {
    #[must_use]
    pub fn new(exercise_count: usize) -> Self {
        Self {
            start_time: Utc::now(),
            exercise_count,
            current_exercise_idx: 0,
            viewing_exercise_idx: 0,
            minimized: false,
            rest_timer: RestTimer::Unset,
        }
    }

    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.exercise_count
    }

    #[must_use]
    pub fn current_exercise(&self) -> usize {
        self.current_exercise_idx
    }

    #[must_use]
    pub fn viewing_exercise(&self) -> usize {
        self.viewing_exercise_idx
    }

    #[must_use]
    pub fn is_viewing_current(&self) -> bool {
        self.viewing_exercise_idx == self.current_exercise_idx
    }

    #[must_use]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    #[must_use]
    pub fn can_view_previous(&self) -> bool {
        self.viewing_exercise_idx > 0
    }

    #[must_use]
    pub fn can_view_next(&self) -> bool {
        self.viewing_exercise_idx + 1 < self.exercise_count
    }

    pub fn view_previous(&mut self) {
        if self.can_view_previous() {
            self.viewing_exercise_idx -= 1;
        }
    }

    pub fn view_next(&mut self) {
        if self.can_view_next() {
            self.viewing_exercise_idx += 1;
        }
    }

    pub fn view_current(&mut self) {
        self.viewing_exercise_idx = self.current_exercise_idx;
    }

    /// Moves the performed exercise forward, dragging the view along if the
    /// user was viewing the performed exercise.
    pub fn advance_exercise(&mut self) {
        if self.current_exercise_idx + 1 >= self.exercise_count {
            return;
        }
        let was_viewing_current = self.is_viewing_current();
        self.current_exercise_idx += 1;
        if was_viewing_current {
            self.viewing_exercise_idx = self.current_exercise_idx;
        }
        self.rest_timer = RestTimer::Unset;
    }

    pub fn start_rest(&mut self, duration: domain::Time, now: DateTime<Utc>) {
        self.rest_timer = RestTimer::Active {
            target_time: now + Duration::seconds(i64::from(duration)),
        };
    }

    pub fn pause_rest(&mut self, now: DateTime<Utc>) {
        if let RestTimer::Active { target_time } = self.rest_timer {
            self.rest_timer = RestTimer::Paused {
                remaining: (target_time - now).num_seconds().max(0),
            };
        }
    }

    pub fn resume_rest(&mut self, now: DateTime<Utc>) {
        if let RestTimer::Paused { remaining } = self.rest_timer {
            self.rest_timer = RestTimer::Active {
                target_time: now + Duration::seconds(remaining),
            };
        }
    }

    pub fn clear_rest(&mut self) {
        self.rest_timer = RestTimer::Unset;
    }

    #[must_use]
    pub fn rest_timer(&self) -> RestTimer {
        self.rest_timer
    }

    #[must_use]
    pub fn rest_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        match self.rest_timer {
            RestTimer::Unset => None,
            RestTimer::Active { target_time } => Some((target_time - now).num_seconds().max(0)),
            RestTimer::Paused { remaining } => Some(remaining),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum RestTimer {
    Unset,
    Active { target_time: DateTime<Utc> },
    Paused { remaining: i64 },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_new_workout() {
        let workout = OngoingWorkout::new(4);

        assert_eq!(workout.exercise_count(), 4);
        assert_eq!(workout.current_exercise(), 0);
        assert_eq!(workout.viewing_exercise(), 0);
        assert!(workout.is_viewing_current());
        assert!(!workout.is_minimized());
        assert_eq!(workout.rest_timer(), RestTimer::Unset);
    }

    #[rstest]
    #[case(0, false, true)]
    #[case(1, true, true)]
    #[case(3, true, false)]
    fn test_navigation_guards(
        #[case] steps: usize,
        #[case] can_previous: bool,
        #[case] can_next: bool,
    ) {
        let mut workout = OngoingWorkout::new(4);
        for _ in 0..steps {
            workout.view_next();
        }

        assert_eq!(workout.can_view_previous(), can_previous);
        assert_eq!(workout.can_view_next(), can_next);
    }

    #[test]
    fn test_navigation_is_guarded_at_both_ends() {
        let mut workout = OngoingWorkout::new(2);

        workout.view_previous();
        assert_eq!(workout.viewing_exercise(), 0);

        workout.view_next();
        workout.view_next();
        assert_eq!(workout.viewing_exercise(), 1);
    }

    #[test]
    fn test_browsing_diverges_from_current() {
        let mut workout = OngoingWorkout::new(3);

        workout.view_next();

        assert_eq!(workout.current_exercise(), 0);
        assert_eq!(workout.viewing_exercise(), 1);
        assert!(!workout.is_viewing_current());

        workout.view_current();
        assert!(workout.is_viewing_current());
    }

    #[test]
    fn test_advance_drags_view_when_viewing_current() {
        let mut workout = OngoingWorkout::new(3);

        workout.advance_exercise();

        assert_eq!(workout.current_exercise(), 1);
        assert_eq!(workout.viewing_exercise(), 1);
        assert!(workout.is_viewing_current());
    }

    #[test]
    fn test_advance_keeps_view_when_browsing() {
        let mut workout = OngoingWorkout::new(3);
        workout.view_next();
        workout.view_next();

        workout.advance_exercise();

        assert_eq!(workout.current_exercise(), 1);
        assert_eq!(workout.viewing_exercise(), 2);
    }

    #[test]
    fn test_advance_past_last_exercise_is_rejected() {
        let mut workout = OngoingWorkout::new(1);

        workout.advance_exercise();

        assert_eq!(workout.current_exercise(), 0);
    }

    #[test]
    fn test_minimized_flag_does_not_affect_navigation() {
        let mut workout = OngoingWorkout::new(2);

        workout.toggle_minimized();

        assert!(workout.is_minimized());
        assert!(workout.can_view_next());

        workout.toggle_minimized();
        assert!(!workout.is_minimized());
    }

    #[test]
    fn test_rest_timer() {
        let mut workout = OngoingWorkout::new(2);
        workout.start_rest(domain::Time::new(90).unwrap(), now());

        assert_eq!(workout.rest_remaining(now()), Some(90));
        assert_eq!(
            workout.rest_remaining(now() + Duration::seconds(30)),
            Some(60)
        );
        assert_eq!(
            workout.rest_remaining(now() + Duration::seconds(120)),
            Some(0)
        );
    }

    #[test]
    fn test_rest_timer_pause_and_resume() {
        let mut workout = OngoingWorkout::new(2);
        workout.start_rest(domain::Time::new(90).unwrap(), now());

        workout.pause_rest(now() + Duration::seconds(30));
        assert_eq!(workout.rest_timer(), RestTimer::Paused { remaining: 60 });
        assert_eq!(
            workout.rest_remaining(now() + Duration::seconds(999)),
            Some(60)
        );

        workout.resume_rest(now() + Duration::seconds(40));
        assert_eq!(
            workout.rest_remaining(now() + Duration::seconds(40)),
            Some(60)
        );
    }

    #[test]
    fn test_advance_clears_rest_timer() {
        let mut workout = OngoingWorkout::new(2);
        workout.start_rest(domain::Time::new(90).unwrap(), now());

        workout.advance_exercise();

        assert_eq!(workout.rest_timer(), RestTimer::Unset);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut workout = OngoingWorkout::new(3);
        workout.view_next();
        workout.start_rest(domain::Time::new(60).unwrap(), now());

        let serialized = serde_json::to_string(&workout).unwrap();
        let deserialized: OngoingWorkout = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, workout);
    }
}
