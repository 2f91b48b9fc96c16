#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod assistant;
pub mod catalog;
pub mod category;
pub mod error;
pub mod exercise;
pub mod form_analysis;
pub mod keyword;
pub mod loader;
pub mod name;
pub mod search;
pub mod service;
pub mod workout;

pub use assistant::{Coach, GenerateError, TextGenerator, WorkoutRequest};
pub use catalog::{Catalog, CatalogReport, CatalogStats};
pub use category::Category;
pub use error::{DeleteError, ReadError, StorageError, WriteError};
pub use exercise::{Difficulty, EnrichedRecord, ExerciseID, ExerciseRecord};
pub use form_analysis::{
    AnalysisError, Biomechanics, Finding, FormAnalysis, PoseAnalyzer, PoseResponse,
    PoseServiceError, ScoreBand, Severity, VideoRef,
};
pub use name::{Name, NameError};
pub use search::{DEFAULT_SEARCH_LIMIT, SearchHit};
pub use service::Service;
pub use workout::{
    Profile, ProfileRepository, ProfileService, Workout, WorkoutID, WorkoutRepository,
    WorkoutService, WorkoutStats,
};
