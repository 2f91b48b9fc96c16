use derive_more::Display;

use crate::ExerciseRecord;

#[derive(Display, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Category(&'static str);

impl Category {
    pub const GENERAL_FITNESS: Category = Category("General Fitness");

    #[must_use]
    pub fn label(self) -> &'static str {
        self.0
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl PartialEq<str> for Category {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Category {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Lowercased fields a rule is evaluated against.
struct Fields {
    title: String,
    description: String,
    equipment: String,
    body_part: String,
}

struct Rule {
    matches: fn(&Fields) -> bool,
    category: Category,
}

macro_rules! rule {
    ($label:literal, |$f:ident| $predicate:expr) => {
        Rule {
            matches: |$f: &Fields| $predicate,
            category: Category($label),
        }
    };
}

/// Categorization rules in priority order.
///
/// Movement patterns come first, followed by equipment and body part
/// fallbacks. Reordering the table changes the result for titles matching
/// several patterns.
const RULES: &[Rule] = &[
    // Movement patterns
    rule!("Plank Variations", |f| f.title.contains("plank")),
    rule!("Crunches", |f| f.title.contains("crunch")),
    rule!("Push-ups", |f| f.title.contains("push") && f.title.contains("up")),
    rule!("Squats", |f| f.title.contains("squat")),
    rule!("Deadlifts", |f| f.title.contains("deadlift")),
    rule!("Shoulder Press", |f| f.title.contains("press")
        && f.body_part.contains("shoulder")),
    rule!("Bicep Curls", |f| f.title.contains("curl")
        && f.body_part.contains("bicep")),
    rule!("Rowing", |f| f.title.contains("row")),
    rule!("Pull-ups", |f| f.title.contains("pull") && f.title.contains("up")),
    rule!("Rotational", |f| f.title.contains("twist")
        || f.description.contains("oblique")),
    rule!("Roll Outs", |f| f.title.contains("roll")),
    rule!("Flyes", |f| f.title.contains("fly") || f.title.contains("flye")),
    rule!("Lunges", |f| f.title.contains("lunge")),
    // Equipment
    rule!("Cable Exercises", |f| f.equipment.contains("cable")),
    rule!("Dumbbell Exercises", |f| f.equipment.contains("dumbbell")),
    rule!("Barbell Exercises", |f| f.equipment.contains("barbell")),
    rule!("Kettlebell Exercises", |f| f.equipment.contains("kettlebell")),
    rule!("Resistance Band Exercises", |f| f.equipment.contains("band")),
    rule!("Bodyweight Exercises", |f| f.equipment.contains("body only")),
    // Body parts
    rule!("Chest Exercises", |f| f.body_part.contains("chest")),
    rule!("Back Exercises", |f| f.body_part.contains("back")),
    rule!("Shoulder Exercises", |f| f.body_part.contains("shoulder")),
    rule!("Arm Exercises", |f| f.body_part.contains("arm")
        || f.body_part.contains("bicep")
        || f.body_part.contains("tricep")),
    rule!("Leg Exercises", |f| f.body_part.contains("leg")
        || f.body_part.contains("quad")
        || f.body_part.contains("hamstring")),
    rule!("Core Exercises", |f| f.body_part.contains("abdominal")
        || f.body_part.contains("core")),
];

/// Assign exactly one category to a record.
///
/// The first matching rule of [`RULES`] wins. Records matching no rule are
/// assigned [`Category::GENERAL_FITNESS`].
#[must_use]
pub fn categorize(record: &ExerciseRecord) -> Category {
    let fields = Fields {
        title: record.title.to_lowercase(),
        description: record.description.to_lowercase(),
        equipment: record.equipment.to_lowercase(),
        body_part: record.body_part.to_lowercase(),
    };

    RULES
        .iter()
        .find(|rule| (rule.matches)(&fields))
        .map_or(Category::GENERAL_FITNESS, |rule| rule.category)
}

/// All labels [`categorize`] can return, in rule order.
pub fn all() -> impl Iterator<Item = Category> {
    RULES
        .iter()
        .map(|rule| rule.category)
        .chain(std::iter::once(Category::GENERAL_FITNESS))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn record(title: &str, equipment: &str, body_part: &str) -> ExerciseRecord {
        ExerciseRecord {
            equipment: equipment.to_string(),
            body_part: body_part.to_string(),
            ..ExerciseRecord::new(0, title)
        }
    }

    #[rstest]
    #[case::movement_before_equipment("Barbell Squat", "Barbell", "Legs", "Squats")]
    #[case::equipment_before_body_part("Lat Pulldown", "Cable", "Back", "Cable Exercises")]
    #[case::plank("Side Plank", "Body Only", "Abdominals", "Plank Variations")]
    #[case::crunch("Cable Crunch", "Cable", "Abdominals", "Crunches")]
    #[case::push_up("Push-Up", "Body Only", "Chest", "Push-ups")]
    #[case::squat_before_row("Squat to Row", "Bands", "Legs", "Squats")]
    #[case::deadlift("Romanian Deadlift", "Barbell", "Hamstrings", "Deadlifts")]
    #[case::shoulder_press("Seated Dumbbell Press", "Dumbbell", "Shoulders", "Shoulder Press")]
    #[case::press_without_shoulders("Bench Press", "Barbell", "Chest", "Barbell Exercises")]
    #[case::bicep_curl("Hammer Curl", "Dumbbell", "Biceps", "Bicep Curls")]
    #[case::curl_without_biceps("Leg Curl", "Machine", "Hamstrings", "Leg Exercises")]
    #[case::row("Bent Over Row", "Barbell", "Middle Back", "Rowing")]
    #[case::pull_up("Wide-Grip Pull Up", "Body Only", "Lats", "Pull-ups")]
    #[case::push_up_before_pull_up("Push Pull Up", "Body Only", "Lats", "Push-ups")]
    #[case::twist("Russian Twist", "Medicine Ball", "Abdominals", "Rotational")]
    #[case::roll_out("Ab Roller", "Other", "Abdominals", "Roll Outs")]
    #[case::fly("Dumbbell Flyes", "Dumbbell", "Chest", "Flyes")]
    #[case::lunge("Walking Lunge", "Dumbbell", "Quadriceps", "Lunges")]
    #[case::kettlebell("Kettlebell Swing", "Kettlebells", "Glutes", "Kettlebell Exercises")]
    #[case::band("Band Good Morning", "Bands", "Hamstrings", "Resistance Band Exercises")]
    #[case::body_only("Mountain Climber", "Body Only", "Abdominals", "Bodyweight Exercises")]
    #[case::chest("Chest Dip", "Machine", "Chest", "Chest Exercises")]
    #[case::back("Hyperextension", "Machine", "Lower Back", "Back Exercises")]
    #[case::shoulders("Face Pull", "Machine", "Shoulders", "Shoulder Exercises")]
    #[case::arms("Dip Machine", "Machine", "Triceps", "Arm Exercises")]
    #[case::legs("Leg Extension", "Machine", "Quadriceps", "Leg Exercises")]
    #[case::core("Hanging Leg Raise", "Other", "Abdominals", "Core Exercises")]
    #[case::general("Jumping Jacks", "Other", "Cardio", "General Fitness")]
    fn test_categorize(
        #[case] title: &str,
        #[case] equipment: &str,
        #[case] body_part: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(categorize(&record(title, equipment, body_part)).label(), expected);
    }

    #[test]
    fn test_categorize_oblique_description() {
        let record = ExerciseRecord {
            description: "Works the Obliques hard.".to_string(),
            equipment: "Cable".to_string(),
            ..ExerciseRecord::new(0, "Woodchopper")
        };
        assert_eq!(categorize(&record).label(), "Rotational");
    }

    #[test]
    fn test_categorize_is_idempotent() {
        let record = record("Incline Dumbbell Press", "Dumbbell", "Chest");
        assert_eq!(categorize(&record), categorize(&record));
    }

    #[test]
    fn test_all_labels_unique() {
        let labels = all().collect::<Vec<_>>();
        assert_eq!(labels.len(), labels.iter().collect::<HashSet<_>>().len());
        assert_eq!(labels.last(), Some(&Category::GENERAL_FITNESS));
    }
}
