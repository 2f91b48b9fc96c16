use log::error;

use crate::{Catalog, search::SearchHit};

pub const ASSISTANT_CONTEXT_LIMIT: usize = 6;

pub const NO_EXERCISES_FOUND: &str = "No specific exercises found in the database for this query.";
pub const WORKOUT_FAILED: &str = "Failed to generate workout. Please try again.";
pub const ANSWER_FAILED: &str =
    "Sorry, I couldn't generate a response. Please check your API key and try again.";
pub const FALLBACK_MOTIVATION: &str = "💪 Keep pushing! Every workout counts!";
pub const FALLBACK_TIP: &str = "💡 Stay hydrated! Drink water before, during, and after your workout.";

/// A remote generative-text model.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("missing API key")]
    MissingApiKey,
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRequest {
    pub goals: String,
    pub equipment: String,
    pub fitness_level: String,
    pub duration_minutes: u32,
}

/// Format search hits as a numbered list for inclusion in a prompt.
#[must_use]
pub fn format_exercise_context(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_EXERCISES_FOUND.to_string();
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let r = hit.record;
            let rating = r
                .rating
                .map_or_else(|| "N/A".to_string(), |rating| rating.to_string());
            let description = if r.description.is_empty() {
                "No description available"
            } else {
                r.description.as_str()
            };
            format!(
                "{}. **{}**\n   - Type: {}\n   - Body Part: {}\n   - Equipment: {}\n   - Level: {}\n   - Rating: {rating}\n   - Category: {}\n   - Description: {description}",
                i + 1,
                r.title,
                r.kind,
                r.body_part,
                r.equipment,
                r.level,
                r.category,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the assistant prompt for a user query, grounded on matching catalog exercises.
#[must_use]
pub fn assistant_prompt(system_prompt: &str, catalog: &Catalog, query: &str) -> String {
    let context = format_exercise_context(&catalog.search_scored(query, ASSISTANT_CONTEXT_LIMIT));

    format!(
        "{system_prompt}

EXERCISE DATABASE CONTEXT:
The following exercises from our comprehensive fitness database are relevant to the user's query:

{context}

USER QUERY: {query}

Please provide a helpful response that:
1. Uses information from the exercise database when relevant
2. Combines your AI knowledge with the specific exercise details provided
3. Gives practical, actionable fitness advice
4. Mentions specific exercises by name when appropriate
5. Considers the user's fitness level and available equipment if mentioned

Response:"
    )
}

#[must_use]
pub fn workout_plan_prompt(request: &WorkoutRequest) -> String {
    format!(
        "Generate a personalized workout plan with the following details:

Goals: {}
Available Equipment: {}
Fitness Level: {}
Workout Duration: {} minutes

Please provide:
1. A warm-up routine (5 minutes)
2. Main workout exercises with sets, reps, and rest periods
3. Cool-down routine (5 minutes)
4. Tips for proper form

Format the response in a clear, structured way with emojis. Make it motivating and suitable for the specified fitness level.",
        request.goals, request.equipment, request.fitness_level, request.duration_minutes
    )
}

#[must_use]
pub fn motivation_prompt(workout_count: usize) -> String {
    format!(
        "Generate a short, motivational fitness message for someone who has completed {workout_count} workouts. Make it encouraging, energetic, and include an emoji. Keep it to 1-2 sentences."
    )
}

#[must_use]
pub fn workout_tip_prompt() -> String {
    "Generate a quick, practical fitness tip for beginners or intermediate fitness enthusiasts. Keep it to 1-2 sentences with an emoji.".to_string()
}

/// Coaching features on top of a text generator.
pub struct Coach<G> {
    generator: G,
}

impl<G: TextGenerator> Coach<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn generate_workout(&self, request: &WorkoutRequest) -> Result<String, GenerateError> {
        self.generator
            .generate(&workout_plan_prompt(request))
            .await
            .map_err(|err| {
                error!("failed to generate workout: {err}");
                GenerateError::Failed(WORKOUT_FAILED.to_string())
            })
    }

    pub async fn motivational_message(&self, workout_count: usize) -> String {
        self.generate_or(&motivation_prompt(workout_count), FALLBACK_MOTIVATION, "motivational message")
            .await
    }

    pub async fn workout_tip(&self) -> String {
        self.generate_or(&workout_tip_prompt(), FALLBACK_TIP, "workout tip")
            .await
    }

    pub async fn answer(&self, system_prompt: &str, catalog: &Catalog, query: &str) -> String {
        self.generate_or(
            &assistant_prompt(system_prompt, catalog, query),
            ANSWER_FAILED,
            "response",
        )
        .await
    }

    async fn generate_or(&self, prompt: &str, fallback: &str, what: &str) -> String {
        match self.generator.generate(prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!("failed to generate {what}: {err}");
                fallback.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    const SOURCE: &str = "\
,Title,Desc,Type,BodyPart,Equipment,Level,Rating,RatingDesc
0,Dumbbell Flyes,Open the arms wide.,Strength,Chest,Dumbbell,Intermediate,8.5,
1,Push Up,,Strength,Chest,Body Only,Beginner,,
";

    struct Echo {
        prompts: RefCell<Vec<String>>,
    }

    impl TextGenerator for Echo {
        async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok(format!("echo: {}", prompt.len()))
        }
    }

    struct Failing;

    impl TextGenerator for Failing {
        async fn generate(&self, _: &str) -> Result<String, GenerateError> {
            Err(GenerateError::MissingApiKey)
        }
    }

    fn request() -> WorkoutRequest {
        WorkoutRequest {
            goals: "Build strength".to_string(),
            equipment: "Dumbbells".to_string(),
            fitness_level: "Beginner".to_string(),
            duration_minutes: 30,
        }
    }

    #[test]
    fn test_format_exercise_context() {
        let catalog = Catalog::parse(SOURCE);
        assert_eq!(
            format_exercise_context(&catalog.search_scored("chest", 6)),
            "1. **Dumbbell Flyes**
   - Type: Strength
   - Body Part: Chest
   - Equipment: Dumbbell
   - Level: Intermediate
   - Rating: 8.5
   - Category: Flyes
   - Description: Open the arms wide.

2. **Push Up**
   - Type: Strength
   - Body Part: Chest
   - Equipment: Body Only
   - Level: Beginner
   - Rating: N/A
   - Category: Push-ups
   - Description: No description available"
        );
    }

    #[test]
    fn test_format_exercise_context_empty() {
        assert_eq!(format_exercise_context(&[]), NO_EXERCISES_FOUND);
    }

    #[test]
    fn test_assistant_prompt() {
        let catalog = Catalog::parse(SOURCE);
        let prompt = assistant_prompt("You are a coach.", &catalog, "push up");
        assert!(prompt.starts_with("You are a coach.\n\nEXERCISE DATABASE CONTEXT:"));
        assert!(prompt.contains("1. **Push Up**"));
        assert!(prompt.contains("USER QUERY: push up\n"));
        assert!(prompt.ends_with("Response:"));
    }

    #[test]
    fn test_workout_plan_prompt() {
        let prompt = workout_plan_prompt(&request());
        assert!(prompt.contains("Goals: Build strength\n"));
        assert!(prompt.contains("Available Equipment: Dumbbells\n"));
        assert!(prompt.contains("Fitness Level: Beginner\n"));
        assert!(prompt.contains("Workout Duration: 30 minutes\n"));
    }

    #[test]
    fn test_motivation_prompt() {
        assert!(motivation_prompt(12).contains("completed 12 workouts"));
    }

    #[tokio::test]
    async fn test_coach() {
        let coach = Coach::new(Echo {
            prompts: RefCell::new(vec![]),
        });
        let catalog = Catalog::parse(SOURCE);

        assert!(coach.generate_workout(&request()).await.is_ok());
        assert!(coach.motivational_message(3).await.starts_with("echo: "));
        assert!(coach.workout_tip().await.starts_with("echo: "));
        assert!(coach.answer("", &catalog, "flyes").await.starts_with("echo: "));

        let prompts = coach.generator.prompts.borrow();
        assert_eq!(prompts.len(), 4);
        assert_eq!(prompts[0], workout_plan_prompt(&request()));
        assert_eq!(prompts[1], motivation_prompt(3));
        assert_eq!(prompts[2], workout_tip_prompt());
        assert!(prompts[3].contains("**Dumbbell Flyes**"));
    }

    #[tokio::test]
    async fn test_coach_fallbacks() {
        let coach = Coach::new(Failing);
        let catalog = Catalog::default();

        assert_eq!(
            coach.generate_workout(&request()).await,
            Err(GenerateError::Failed(WORKOUT_FAILED.to_string()))
        );
        assert_eq!(coach.motivational_message(3).await, FALLBACK_MOTIVATION);
        assert_eq!(coach.workout_tip().await, FALLBACK_TIP);
        assert_eq!(coach.answer("", &catalog, "squat").await, ANSWER_FAILED);
    }
}
