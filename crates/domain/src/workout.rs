use chrono::{DateTime, Days, TimeZone, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{DeleteError, Name, ReadError, WriteError};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn add_workout(&self, workout: Workout) -> Result<Workout, WriteError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    async fn clear_workouts(&self) -> Result<(), DeleteError>;

    async fn get_workout_stats<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Result<WorkoutStats, ReadError> {
        Ok(workout_stats(&self.get_workouts().await?, now))
    }
}

/// Stored workout history, newest first.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn add_workout(&self, workout: Workout) -> Result<Workout, WriteError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    async fn clear_workouts(&self) -> Result<(), DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date: DateTime<Utc>,
    pub goals: String,
    pub equipment: String,
    pub fitness_level: String,
    pub duration_minutes: u32,
    pub plan: String,
    pub completed_seconds: u32,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
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

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

impl std::str::FromStr for WorkoutID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl std::fmt::Display for WorkoutID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub total_minutes: u32,
    pub this_week: usize,
    pub streak: u32,
}

/// Summarize a workout history ordered newest first.
///
/// Calendar days are taken in the time zone of `now`. The streak counts
/// leading entries whose distance in days from today equals the number of
/// entries counted so far.
#[must_use]
pub fn workout_stats<Tz: TimeZone>(workouts: &[Workout], now: &DateTime<Tz>) -> WorkoutStats {
    let zone = now.timezone();
    let today = now.date_naive();
    let week_start = today.checked_sub_days(Days::new(7)).unwrap_or(today);
    let day = |workout: &Workout| workout.date.with_timezone(&zone).date_naive();

    let mut streak = 0;
    for workout in workouts {
        let days = (today - day(workout)).num_days();
        if days == i64::from(streak) {
            streak += 1;
        } else {
            break;
        }
    }

    WorkoutStats {
        total_workouts: workouts.len(),
        total_minutes: workouts.iter().map(|w| w.duration_minutes).sum(),
        this_week: workouts
            .iter()
            .filter(|w| day(w) > week_start)
            .count(),
        streak,
    }
}

/// Format a duration in seconds as `MM:SS`.
#[must_use]
pub fn format_elapsed(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Result<Option<Profile>, ReadError>;
    async fn replace_profile(&self, profile: Profile) -> Result<Profile, WriteError>;
    async fn delete_profile(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<Option<Profile>, ReadError>;
    async fn write_profile(&self, profile: Profile) -> Result<Profile, WriteError>;
    async fn clear_profile(&self) -> Result<(), DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: Name,
    pub age: String,
    pub weight: String,
    pub height: String,
    pub goal: String,
}
