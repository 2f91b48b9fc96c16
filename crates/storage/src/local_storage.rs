use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use formcoach_domain as domain;
use log::debug;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Key-value store keeping one JSON file per key in a data directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
pub enum Key {
    #[strum(serialize = "userProfile")]
    UserProfile,
    #[strum(serialize = "workoutHistory")]
    WorkoutHistory,
    #[strum(serialize = "log")]
    Log,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path(&self, key: Key) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_ref()))
    }

    /// Read the value stored under `key`, or `None` if nothing is stored.
    pub fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, domain::StorageError> {
        let content = match fs::read_to_string(self.path(key)) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|err| {
                debug!("failed to parse {}: {err}", key.as_ref());
                domain::StorageError::Corrupt(key.as_ref().to_string())
            })
    }

    pub fn set<T: Serialize>(&self, key: Key, value: &T) -> Result<(), domain::StorageError> {
        let content = serde_json::to_string(value)
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?;
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    pub fn remove(&self, key: Key) -> Result<(), domain::StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn read_history(&self) -> Result<Vec<Workout>, domain::StorageError> {
        Ok(self.get(Key::WorkoutHistory)?.unwrap_or_default())
    }
}

impl domain::WorkoutRepository for LocalStorage {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .read_history()?
            .into_iter()
            .map(domain::Workout::from)
            .collect())
    }

    async fn add_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::WriteError> {
        let mut history = self.read_history()?;
        history.insert(0, Workout::from(&workout));
        self.set(Key::WorkoutHistory, &history)?;
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let mut history = self.read_history()?;
        let len = history.len();
        history.retain(|w| w.id != *id);
        if history.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        self.set(Key::WorkoutHistory, &history)?;
        Ok(id)
    }

    async fn clear_workouts(&self) -> Result<(), domain::DeleteError> {
        Ok(self.remove(Key::WorkoutHistory)?)
    }
}

impl domain::ProfileRepository for LocalStorage {
    async fn read_profile(&self) -> Result<Option<domain::Profile>, domain::ReadError> {
        match self.get::<Profile>(Key::UserProfile)? {
            Some(profile) => Ok(Some(
                domain::Profile::try_from(profile).map_err(|err| {
                    domain::ReadError::Other(Box::new(err))
                })?,
            )),
            None => Ok(None),
        }
    }

    async fn write_profile(
        &self,
        profile: domain::Profile,
    ) -> Result<domain::Profile, domain::WriteError> {
        self.set(Key::UserProfile, &Profile::from(&profile))?;
        Ok(profile)
    }

    async fn clear_profile(&self) -> Result<(), domain::DeleteError> {
        Ok(self.remove(Key::UserProfile)?)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub fitness_level: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub workout: String,
    #[serde(default)]
    pub completed_time: u32,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            goals: value.goals.clone(),
            equipment: value.equipment.clone(),
            fitness_level: value.fitness_level.clone(),
            duration: value.duration_minutes,
            workout: value.plan.clone(),
            completed_time: value.completed_seconds,
        }
    }
}

impl From<Workout> for domain::Workout {
    fn from(value: Workout) -> Self {
        Self {
            id: value.id.into(),
            date: value.date,
            goals: value.goals,
            equipment: value.equipment,
            fitness_level: value.fitness_level,
            duration_minutes: value.duration,
            plan: value.workout,
            completed_seconds: value.completed_time,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub goal: String,
}

impl From<&domain::Profile> for Profile {
    fn from(value: &domain::Profile) -> Self {
        Self {
            name: value.name.to_string(),
            age: value.age.clone(),
            weight: value.weight.clone(),
            height: value.height.clone(),
            goal: value.goal.clone(),
        }
    }
}

impl TryFrom<Profile> for domain::Profile {
    type Error = domain::NameError;

    fn try_from(value: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            age: value.age,
            weight: value.weight,
            height: value.height,
            goal: value.goal,
        })
    }
}
