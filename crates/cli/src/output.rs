use std::fmt::Write;

use chrono::Local;
use formcoach_domain::{
    EnrichedRecord, Profile, SearchHit, Workout, WorkoutStats, workout::format_elapsed,
};

use crate::log::Entry;

#[must_use]
pub fn search_hits(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No exercises found for \"{query}\".\n");
    }

    let mut out = String::new();
    for (i, hit) in hits.iter().enumerate() {
        let _ = writeln!(out, "{}. {}  [score {}]", i + 1, record_line(hit.record), hit.score);
    }
    out
}

#[must_use]
pub fn records(records: &[&EnrichedRecord]) -> String {
    if records.is_empty() {
        return "No exercises found.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "- {}", record_line(record));
    }
    let _ = writeln!(out, "\n{} exercises", records.len());
    out
}

fn record_line(record: &EnrichedRecord) -> String {
    let rating = record
        .rating
        .map_or_else(|| "N/A".to_string(), |rating| format!("{rating:.1}"));
    format!(
        "{} (#{}) | {} | {} | {} | {} | rating {rating}",
        record.title, record.id, record.category, record.body_part, record.equipment, record.level
    )
}

#[must_use]
pub fn list(items: &[&str]) -> String {
    items.iter().fold(String::new(), |mut out, item| {
        let _ = writeln!(out, "{item}");
        out
    })
}

#[must_use]
pub fn history(workouts: &[Workout], stats: &WorkoutStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total workouts: {}", stats.total_workouts);
    let _ = writeln!(out, "Total minutes:  {}", stats.total_minutes);
    let _ = writeln!(out, "This week:      {}", stats.this_week);
    let _ = writeln!(out, "Current streak: {}", stats.streak);

    if workouts.is_empty() {
        let _ = writeln!(out, "\nNo workouts yet.");
        return out;
    }

    let _ = writeln!(out);
    for workout in workouts {
        let _ = writeln!(
            out,
            "{}  {}  {} min  completed {}  {} ({}, {})",
            workout.id,
            workout.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            workout.duration_minutes,
            format_elapsed(workout.completed_seconds),
            workout.goals,
            workout.fitness_level,
            workout.equipment,
        );
    }
    out
}

#[must_use]
pub fn profile(profile: Option<&Profile>) -> String {
    let Some(profile) = profile else {
        return "No profile saved.\n".to_string();
    };

    let or_dash = |value: &str| if value.is_empty() { "-".to_string() } else { value.to_string() };
    format!(
        "Name:   {}\nAge:    {}\nWeight: {}\nHeight: {}\nGoal:   {}\n",
        profile.name,
        or_dash(&profile.age),
        or_dash(&profile.weight),
        or_dash(&profile.height),
        or_dash(&profile.goal),
    )
}

#[must_use]
pub fn log_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    entries.into_iter().fold(String::new(), |mut out, entry| {
        let _ = writeln!(out, "{} {:5} {}", entry.time, entry.level, entry.message);
        out
    })
}

#[cfg(test)]
mod tests {
    use formcoach_domain::{Catalog, Name};
    use pretty_assertions::assert_eq;

    use super::*;

    const SOURCE: &str = "\
,Title,Desc,Type,BodyPart,Equipment,Level,Rating,RatingDesc
0,Barbell Squat,,Strength,Quadriceps,Barbell,Intermediate,9.0,
1,Plank,,Strength,Abdominals,Body Only,Beginner,,
";

    #[test]
    fn test_search_hits() {
        let catalog = Catalog::parse(SOURCE);
        assert_eq!(
            search_hits("squat", &catalog.search_scored("squat", 8)),
            "1. Barbell Squat (#0) | Squats | Quadriceps | Barbell | Intermediate | rating 9.0  [score 37]\n"
        );
        assert_eq!(
            search_hits("zzz", &[]),
            "No exercises found for \"zzz\".\n"
        );
    }

    #[test]
    fn test_records() {
        let catalog = Catalog::parse(SOURCE);
        assert_eq!(
            records(&catalog.by_body_part("abdominal")),
            "- Plank (#1) | Plank Variations | Abdominals | Body Only | Beginner | rating N/A\n\n1 exercises\n"
        );
        assert_eq!(records(&[]), "No exercises found.\n");
    }

    #[test]
    fn test_history_empty() {
        assert_eq!(
            history(&[], &WorkoutStats::default()),
            "Total workouts: 0\nTotal minutes:  0\nThis week:      0\nCurrent streak: 0\n\nNo workouts yet.\n"
        );
    }

    #[test]
    fn test_profile() {
        let p = Profile {
            name: Name::new("Alice").unwrap(),
            age: "31".to_string(),
            weight: String::new(),
            height: String::new(),
            goal: "Run a 10k".to_string(),
        };
        assert_eq!(
            profile(Some(&p)),
            "Name:   Alice\nAge:    31\nWeight: -\nHeight: -\nGoal:   Run a 10k\n"
        );
        assert_eq!(profile(None), "No profile saved.\n");
    }

    #[test]
    fn test_list() {
        assert_eq!(list(&["Squats", "Plank Variations"]), "Squats\nPlank Variations\n");
    }
}
