#![warn(clippy::pedantic)]

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use formcoach_domain::{
    Name, NameError, Profile, ProfileService, Service, Workout, WorkoutID, WorkoutService,
    assistant::assistant_prompt,
};
use formcoach_storage::{LocalStorage, read_catalog};

mod log;
mod output;
mod settings;

use crate::log::Repository;
use settings::{CONFIG_ENV, Settings};

#[derive(Parser)]
#[command(name = "formcoach")]
#[command(about = "Exercise catalog search and workout history", long_about = None)]
struct Cli {
    /// Path to config JSON
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Path to the exercise catalog CSV
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory of the local data store
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search exercises by relevance
    Search {
        query: Vec<String>,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List exercises of a category
    Category { label: Vec<String> },
    /// List exercises using the given equipment
    Equipment { term: Vec<String> },
    /// List exercises targeting the given body part
    BodyPart { term: Vec<String> },
    /// List all categories
    Categories,
    /// Show catalog statistics
    Stats,
    /// Show a summary of the catalog content
    Report,
    /// Print the assistant prompt for a question
    Prompt { query: Vec<String> },
    /// Show workout history and statistics
    History,
    /// Record a completed workout
    AddWorkout {
        #[arg(long)]
        goals: String,
        #[arg(long, default_value = "")]
        equipment: String,
        #[arg(long, default_value = "Beginner")]
        fitness_level: String,
        /// Planned duration in minutes
        #[arg(long)]
        duration: u32,
        /// Time actually spent, in seconds
        #[arg(long, default_value_t = 0)]
        completed: u32,
        /// File containing the workout plan
        #[arg(long)]
        plan: Option<PathBuf>,
    },
    /// Delete a workout from the history
    DeleteWorkout { id: String },
    /// Delete the whole workout history
    ClearHistory,
    /// Show or update the user profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        height: Option<String>,
        #[arg(long)]
        goal: Option<String>,
    },
    /// Show recent log messages
    Log,
}

#[tokio::main(flavor = "current_thread")]
#[allow(clippy::too_many_lines)]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        settings.catalog_path = catalog;
    }
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }

    let storage = LocalStorage::new(&settings.data_dir);
    let stored_log = Arc::new(log::StoredLog::new(storage.clone()));
    init_logging(stored_log.clone(), cli.verbose)?;

    let service = Service::new(storage);

    match cli.command {
        Commands::Search { query, limit } => {
            let catalog = read_catalog(&settings.catalog_path);
            let query = query.join(" ");
            let limit = limit.unwrap_or(settings.search_limit);
            print!(
                "{}",
                output::search_hits(&query, &catalog.search_scored(&query, limit))
            );
        }
        Commands::Category { label } => {
            let catalog = read_catalog(&settings.catalog_path);
            print!("{}", output::records(&catalog.by_category(&label.join(" "))));
        }
        Commands::Equipment { term } => {
            let catalog = read_catalog(&settings.catalog_path);
            print!("{}", output::records(&catalog.by_equipment(&term.join(" "))));
        }
        Commands::BodyPart { term } => {
            let catalog = read_catalog(&settings.catalog_path);
            print!("{}", output::records(&catalog.by_body_part(&term.join(" "))));
        }
        Commands::Categories => {
            print!("{}", output::list(&read_catalog(&settings.catalog_path).categories()));
        }
        Commands::Stats => println!("{}", read_catalog(&settings.catalog_path).stats()),
        Commands::Report => print!("{}", read_catalog(&settings.catalog_path).report()),
        Commands::Prompt { query } => {
            let catalog = read_catalog(&settings.catalog_path);
            println!(
                "{}",
                assistant_prompt(&settings.system_prompt(), &catalog, &query.join(" "))
            );
        }
        Commands::History => {
            let workouts = service.get_workouts().await.map_err(failed)?;
            let stats = service
                .get_workout_stats(&Local::now())
                .await
                .map_err(failed)?;
            print!("{}", output::history(&workouts, &stats));
        }
        Commands::AddWorkout {
            goals,
            equipment,
            fitness_level,
            duration,
            completed,
            plan,
        } => {
            let plan = match plan {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read plan {}", path.display()))?,
                None => String::new(),
            };
            let workout = service
                .add_workout(Workout {
                    id: WorkoutID::new(),
                    date: Utc::now(),
                    goals,
                    equipment,
                    fitness_level,
                    duration_minutes: duration,
                    plan,
                    completed_seconds: completed,
                })
                .await
                .map_err(failed)?;
            println!("Workout {} saved.", workout.id);
        }
        Commands::DeleteWorkout { id } => {
            let id = id
                .parse::<WorkoutID>()
                .with_context(|| format!("invalid workout id: {id}"))?;
            service.delete_workout(id).await.map_err(failed)?;
            println!("Workout deleted.");
        }
        Commands::ClearHistory => {
            service.clear_workouts().await.map_err(failed)?;
            println!("Workout history cleared.");
        }
        Commands::Profile {
            name,
            age,
            weight,
            height,
            goal,
        } => {
            let current = service.get_profile().await.map_err(failed)?;
            if name.is_none()
                && age.is_none()
                && weight.is_none()
                && height.is_none()
                && goal.is_none()
            {
                print!("{}", output::profile(current.as_ref()));
                return Ok(());
            }

            let name = match (name, &current) {
                (Some(name), _) => Name::new(&name)?,
                (None, Some(current)) => current.name.clone(),
                (None, None) => bail!("{}", NameError::Empty),
            };
            let field = |value: Option<String>, current: Option<&String>| {
                value.or_else(|| current.cloned()).unwrap_or_default()
            };
            let profile = Profile {
                name,
                age: field(age, current.as_ref().map(|p| &p.age)),
                weight: field(weight, current.as_ref().map(|p| &p.weight)),
                height: field(height, current.as_ref().map(|p| &p.height)),
                goal: field(goal, current.as_ref().map(|p| &p.goal)),
            };
            let profile = service.replace_profile(profile).await.map_err(failed)?;
            print!("{}", output::profile(Some(&profile)));
        }
        Commands::Log => {
            print!("{}", output::log_entries(&stored_log.read_entries()?));
        }
    }

    Ok(())
}

fn init_logging(repository: Arc<dyn Repository>, verbose: bool) -> Result<()> {
    let level = if verbose {
        ::log::LevelFilter::Debug
    } else {
        ::log::LevelFilter::Info
    };
    log::init(repository, level).map_err(|err| anyhow!("failed to initialize logger: {err}"))
}

fn failed(err: impl std::fmt::Display) -> anyhow::Error {
    anyhow!("{err}")
}
