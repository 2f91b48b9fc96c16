use log::{debug, error};

use crate::{
    DeleteError, Profile, ProfileRepository, ProfileService, ReadError, Workout, WorkoutID,
    WorkoutRepository, WorkoutService, WriteError,
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
                $error::Storage(crate::StorageError::NoDataDirectory) => {
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

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn add_workout(&self, workout: Workout) -> Result<Workout, WriteError> {
        log_on_error!(
            self.repository.add_workout(workout),
            WriteError,
            "add",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }

    async fn clear_workouts(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.clear_workouts(),
            DeleteError,
            "clear",
            "workouts"
        )
    }
}

impl<R: ProfileRepository> ProfileService for Service<R> {
    async fn get_profile(&self) -> Result<Option<Profile>, ReadError> {
        log_on_error!(self.repository.read_profile(), ReadError, "get", "profile")
    }

    async fn replace_profile(&self, profile: Profile) -> Result<Profile, WriteError> {
        log_on_error!(
            self.repository.write_profile(profile),
            WriteError,
            "replace",
            "profile"
        )
    }

    async fn delete_profile(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.clear_profile(),
            DeleteError,
            "delete",
            "profile"
        )
    }
}
