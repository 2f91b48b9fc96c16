use std::collections::HashSet;

use log::debug;

use crate::{
    ExerciseID, ExerciseRecord,
    exercise::{DEFAULT_BODY_PART, DEFAULT_EQUIPMENT, DEFAULT_KIND, DEFAULT_LEVEL},
};

/// Minimum number of fields of a usable row.
pub const MIN_FIELDS: usize = 8;

/// Parse catalog source text into exercise records.
///
/// The first line is a header and is ignored. Rows with fewer than
/// [`MIN_FIELDS`] fields are skipped. Records are returned in source order.
///
/// Ids are unique. A duplicate id is replaced by the row position, or by the
/// next id above all ids seen so far if the position is taken as well.
#[must_use]
pub fn load(source: &str) -> Vec<ExerciseRecord> {
    let mut records = vec![];
    let mut ids = HashSet::new();
    let mut next_free = 0_u32;

    for (position, line) in source.lines().skip(1).enumerate() {
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let position = u32::try_from(position).unwrap_or(u32::MAX);
        let Some(mut record) = parse_row(line, position) else {
            debug!("skipped malformed catalog row {}", position + 1);
            continue;
        };

        if ids.contains(&record.id) {
            let mut fallback = ExerciseID::from(position);
            if ids.contains(&fallback) {
                fallback = ExerciseID::from(next_free);
            }
            debug!(
                "replaced duplicate id {} of catalog row {} by {fallback}",
                record.id,
                position + 1
            );
            record.id = fallback;
        }

        next_free = next_free.max(record.id.saturating_add(1));
        ids.insert(record.id);
        records.push(record);
    }

    records
}

/// Parse a single data row, returning `None` if it has too few fields.
#[must_use]
pub fn parse_row(line: &str, position: u32) -> Option<ExerciseRecord> {
    let fields = split_fields(line);

    if fields.len() < MIN_FIELDS {
        return None;
    }

    let field = |index: usize| fields.get(index).map(|f| clean(f)).unwrap_or_default();
    let or_default = |value: String, default: &str| {
        if value.is_empty() {
            default.to_string()
        } else {
            value
        }
    };

    Some(ExerciseRecord {
        id: parse_id(&field(0)).unwrap_or(position).into(),
        title: or_default(field(1), &format!("Exercise {position}")),
        description: field(2),
        kind: or_default(field(3), DEFAULT_KIND),
        body_part: or_default(field(4), DEFAULT_BODY_PART),
        equipment: or_default(field(5), DEFAULT_EQUIPMENT),
        level: or_default(field(6), DEFAULT_LEVEL),
        rating: parse_rating(&field(7)),
        rating_description: field(8),
    })
}

/// Split a row on commas outside of quoted segments.
///
/// Quote characters delimit segments and are not part of the field; a
/// doubled quote inside a quoted segment yields a literal quote.
#[must_use]
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

fn clean(field: &str) -> String {
    let trimmed = field.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

fn parse_id(value: &str) -> Option<u32> {
    let digits = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>();
    digits.parse().ok()
}

fn parse_rating(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|rating| rating.is_finite() && *rating != 0.0)
}
