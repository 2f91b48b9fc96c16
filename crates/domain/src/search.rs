use crate::{EnrichedRecord, keyword};

pub const DEFAULT_SEARCH_LIMIT: usize = 8;

const TITLE_WEIGHT: u32 = 20;
const DESCRIPTION_WEIGHT: u32 = 15;
const EQUIPMENT_WEIGHT: u32 = 18;
const BODY_PART_WEIGHT: u32 = 18;
const KIND_WEIGHT: u32 = 15;
const KEYWORD_WEIGHT: u32 = 12;
const LEVEL_WEIGHT: u32 = 10;
const PARTIAL_KEYWORD_WEIGHT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub record: &'a EnrichedRecord,
    pub score: u32,
}

/// Split a query into lowercase terms, dropping stop words.
#[must_use]
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|term| !keyword::is_stop_word(term))
        .map(str::to_string)
        .collect()
}

/// Relevance of a record for the given query terms.
#[must_use]
pub fn score(record: &EnrichedRecord, terms: &[String]) -> u32 {
    let title = record.title.to_lowercase();
    let description = record.description.to_lowercase();
    let equipment = record.equipment.to_lowercase();
    let body_part = record.body_part.to_lowercase();
    let kind = record.kind.to_lowercase();
    let level = record.level.to_lowercase();

    let mut score = 0;

    for term in terms {
        let term = term.as_str();

        if title.contains(term) {
            score += TITLE_WEIGHT;
        }
        if description.contains(term) {
            score += DESCRIPTION_WEIGHT;
        }
        if equipment == term {
            score += EQUIPMENT_WEIGHT;
        }
        if body_part == term {
            score += BODY_PART_WEIGHT;
        }
        if kind == term {
            score += KIND_WEIGHT;
        }
        if record.keywords.contains(term) {
            score += KEYWORD_WEIGHT;
        }
        if level == term {
            score += LEVEL_WEIGHT;
        }

        for keyword in &record.keywords {
            if keyword.contains(term) || term.contains(keyword.as_str()) {
                score += PARTIAL_KEYWORD_WEIGHT;
            }
        }
    }

    score
}

/// Rank records by relevance for a free-text query.
///
/// Records without any match are omitted. Results are ordered by descending
/// score; records with equal scores keep their relative input order.
#[must_use]
pub fn search_scored<'a>(
    query: &str,
    records: impl IntoIterator<Item = &'a EnrichedRecord>,
    limit: usize,
) -> Vec<SearchHit<'a>> {
    let terms = query_terms(query);

    if terms.is_empty() {
        return vec![];
    }

    let mut hits = records
        .into_iter()
        .map(|record| SearchHit {
            record,
            score: score(record, &terms),
        })
        .filter(|hit| hit.score > 0)
        .collect::<Vec<_>>();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}

#[must_use]
pub fn search<'a>(
    query: &str,
    records: impl IntoIterator<Item = &'a EnrichedRecord>,
    limit: usize,
) -> Vec<&'a EnrichedRecord> {
    search_scored(query, records, limit)
        .into_iter()
        .map(|hit| hit.record)
        .collect()
}
