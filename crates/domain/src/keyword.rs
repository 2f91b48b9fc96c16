use std::collections::BTreeSet;

use crate::{Difficulty, ExerciseRecord};

/// Words that carry no meaning for matching, ignored in descriptions and queries.
pub const STOP_WORDS: &[&str] = &[
    // Generic fitness boilerplate
    "exercise",
    "exercises",
    "movement",
    "muscle",
    "muscles",
    "often",
    "performed",
    "popular",
    "reps",
    "targeting",
    "time",
    "usually",
    "variation",
    // Function words
    "about",
    "also",
    "been",
    "each",
    "from",
    "have",
    "into",
    "keep",
    "more",
    "over",
    "should",
    "some",
    "that",
    "their",
    "then",
    "there",
    "these",
    "they",
    "this",
    "those",
    "well",
    "when",
    "which",
    "while",
    "will",
    "with",
    "your",
];

const EQUIPMENT_SYNONYMS: &[(&str, &[&str])] = &[
    ("bands", &["band", "resistance", "elastic", "tube"]),
    ("barbell", &["bar", "weight", "bb", "olympic"]),
    ("dumbbell", &["weight", "db", "dumbell", "freeweight"]),
    ("kettlebells", &["kettlebell", "kb", "bell"]),
    ("cable", &["machine", "pulley", "cables"]),
    ("body only", &["bodyweight", "calisthenics", "noequipment", "bw"]),
    ("e-z curl bar", &["ez", "ezbar", "curl", "curlbar"]),
    ("medicine ball", &["medball", "med", "ball"]),
    ("foam roll", &["roller", "foam", "mobility"]),
    ("other", &["misc", "equipment"]),
];

const BODY_PART_SYNONYMS: &[(&str, &[&str])] = &[
    ("abdominals", &["abs", "core", "stomach", "midsection"]),
    ("biceps", &["bis", "arms", "bicep"]),
    ("triceps", &["tris", "arms", "tricep"]),
    ("chest", &["pecs", "pectorals", "breast"]),
    ("shoulders", &["delts", "deltoids", "shoulder"]),
    ("back", &["lats", "latissimus", "rhomboids", "traps"]),
    ("legs", &["quads", "quadriceps", "hamstrings", "glutes", "calves"]),
    ("forearms", &["forearm", "wrists", "grip"]),
    ("cardio", &["cardiovascular", "aerobic", "endurance"]),
];

const STRENGTH_SYNONYMS: &[&str] = &["resistance", "weights", "lifting"];

#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Derive the keyword set of a record.
///
/// The result is the union of title and description tokens and the synonym
/// expansions of equipment, body part, level and type. All keywords are
/// lowercase and non-empty.
#[must_use]
pub fn synthesize(record: &ExerciseRecord) -> BTreeSet<String> {
    let mut keywords = BTreeSet::new();

    keywords.extend(title_tokens(&record.title));
    keywords.extend(description_tokens(&record.description));
    keywords.extend(expand(&record.equipment, EQUIPMENT_SYNONYMS, true));
    keywords.extend(expand(&record.body_part, BODY_PART_SYNONYMS, false));
    keywords.extend(level_keywords(&record.level));
    keywords.extend(kind_keywords(&record.kind));

    keywords.retain(|k| !k.is_empty());
    keywords
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn strip_non_word(value: &str) -> String {
    value.chars().filter(|c| is_word_char(*c)).collect()
}

fn title_tokens(title: &str) -> impl Iterator<Item = String> + '_ {
    title
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|token| token.chars().count() > 2)
        .map(|token| strip_non_word(&token.to_lowercase()))
}

fn description_tokens(description: &str) -> Vec<String> {
    description
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|word| word.chars().count() > 3 && !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

/// Add the normalized value and the synonyms of every table entry it contains.
///
/// With `depunctuated_match` set, table keys and the value are compared with
/// all non-word characters removed, so that e.g. "E-Z Curl Bar" and
/// "body-only" still hit their entries.
fn expand(value: &str, table: &[(&str, &[&str])], depunctuated_match: bool) -> Vec<String> {
    let lower = value.to_lowercase();
    let normalized = strip_non_word(&lower);
    let haystack = if depunctuated_match {
        &normalized
    } else {
        &lower
    };

    let mut keywords = vec![normalized.clone()];
    for (key, synonyms) in table {
        let needle = if depunctuated_match {
            strip_non_word(key)
        } else {
            (*key).to_string()
        };
        if haystack.contains(&needle) {
            keywords.extend(synonyms.iter().map(|s| (*s).to_string()));
        }
    }
    keywords
}

fn level_keywords(level: &str) -> Vec<String> {
    let lower = level.trim().to_lowercase();
    let mut keywords = vec![];
    if let Ok(difficulty) = lower.parse::<Difficulty>() {
        keywords.extend(difficulty.synonyms().iter().map(|s| (*s).to_string()));
    }
    keywords.push(lower);
    keywords
}

fn kind_keywords(kind: &str) -> Vec<String> {
    let lower = kind.to_lowercase();
    let mut keywords = vec![];
    if lower == "strength" {
        keywords.extend(STRENGTH_SYNONYMS.iter().map(|s| (*s).to_string()));
    }
    keywords.push(lower);
    keywords
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn keywords(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_synthesize_dumbbell() {
        let record = ExerciseRecord {
            equipment: "Dumbbell".to_string(),
            ..ExerciseRecord::new(0, "")
        };
        let result = synthesize(&record);
        for keyword in ["dumbbell", "weight", "db", "dumbell", "freeweight"] {
            assert!(result.contains(keyword), "missing {keyword}");
        }
    }

    #[test]
    fn test_synthesize() {
        let record = ExerciseRecord {
            description: "A popular movement targeting the glutes, performed with a barbell."
                .to_string(),
            kind: "Strength".to_string(),
            body_part: "Glutes".to_string(),
            equipment: "Barbell".to_string(),
            level: "Intermediate".to_string(),
            ..ExerciseRecord::new(0, "Hip Thrust-Up")
        };
        assert_eq!(
            synthesize(&record),
            keywords(&[
                "bar",
                "barbell",
                "bb",
                "glutes",
                "hip",
                "intermediate",
                "lifting",
                "medium",
                "moderate",
                "olympic",
                "resistance",
                "standard",
                "strength",
                "thrust",
                "weight",
                "weights",
            ])
        );
    }

    #[rstest]
    #[case("Barbell Full Squat", &["barbell", "full", "squat"])]
    #[case("Ab_Roller-Up", &["roller"])]
    #[case("Farmer's Walk", &["farmers", "walk"])]
    #[case("T-Bar Row", &["bar", "row"])]
    fn test_title_tokens(#[case] title: &str, #[case] expected: &[&str]) {
        assert_eq!(
            title_tokens(title).collect::<BTreeSet<_>>(),
            keywords(expected)
        );
    }

    #[test]
    fn test_description_tokens_skip_stop_words() {
        assert_eq!(
            description_tokens("This exercise is usually performed with heavy kettlebells!")
                .into_iter()
                .collect::<BTreeSet<_>>(),
            keywords(&["heavy", "kettlebells"])
        );
    }

    #[rstest]
    #[case::multi_word("Body Only", &["bodyonly", "bodyweight", "calisthenics", "noequipment", "bw"])]
    #[case::hyphenated("E-Z Curl Bar", &["ezcurlbar", "ez", "ezbar", "curl", "curlbar"])]
    #[case::variant_spelling("Body-Only", &["bodyonly", "bodyweight", "calisthenics", "noequipment", "bw"])]
    #[case::no_entry("Machine", &["machine"])]
    #[case::other("Other", &["other", "misc", "equipment"])]
    fn test_expand_equipment(#[case] equipment: &str, #[case] expected: &[&str]) {
        assert_eq!(
            expand(equipment, EQUIPMENT_SYNONYMS, true)
                .into_iter()
                .collect::<BTreeSet<_>>(),
            keywords(expected)
        );
    }

    #[rstest]
    #[case("Abdominals", &["abdominals", "abs", "core", "stomach", "midsection"])]
    #[case("Middle Back", &["middleback", "lats", "latissimus", "rhomboids", "traps"])]
    #[case("Lower Legs", &["lowerlegs", "quads", "quadriceps", "hamstrings", "glutes", "calves"])]
    #[case("Forearms", &["forearms", "forearm", "wrists", "grip"])]
    fn test_expand_body_part(#[case] body_part: &str, #[case] expected: &[&str]) {
        let result = expand(body_part, BODY_PART_SYNONYMS, false)
            .into_iter()
            .collect::<BTreeSet<_>>();
        for keyword in expected {
            assert!(result.contains(*keyword), "missing {keyword}");
        }
    }

    #[rstest]
    #[case("Beginner", &["beginner", "easy", "basic", "starter", "novice"])]
    #[case("Advanced", &["advanced", "hard", "difficult", "expert", "pro"])]
    #[case("Elite", &["elite"])]
    fn test_level_keywords(#[case] level: &str, #[case] expected: &[&str]) {
        assert_eq!(
            level_keywords(level).into_iter().collect::<BTreeSet<_>>(),
            keywords(expected)
        );
    }

    #[rstest]
    #[case("Strength", &["strength", "resistance", "weights", "lifting"])]
    #[case("Cardio", &["cardio"])]
    fn test_kind_keywords(#[case] kind: &str, #[case] expected: &[&str]) {
        assert_eq!(
            kind_keywords(kind).into_iter().collect::<BTreeSet<_>>(),
            keywords(expected)
        );
    }

    #[test]
    fn test_synthesize_is_idempotent() {
        let record = ExerciseRecord {
            description: "Hold a rigid line from head to heels.".to_string(),
            body_part: "Abdominals".to_string(),
            ..ExerciseRecord::new(1, "Front Plank")
        };
        assert_eq!(synthesize(&record), synthesize(&record));
    }
}
