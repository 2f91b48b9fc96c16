use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use crate::{
    EnrichedRecord, ExerciseID, ExerciseRecord,
    search::{self, SearchHit},
};

/// The enriched exercise catalog.
///
/// A catalog is built once and only read afterwards. Records keep the order
/// of the source they were loaded from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<EnrichedRecord>,
}

impl Catalog {
    #[must_use]
    pub fn new(records: Vec<ExerciseRecord>) -> Self {
        Self {
            records: records.into_iter().map(EnrichedRecord::new).collect(),
        }
    }

    /// Parse catalog source text and enrich every record.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self::new(crate::loader::load(source))
    }

    #[must_use]
    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ExerciseID) -> Option<&EnrichedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&EnrichedRecord> {
        search::search(query, &self.records, limit)
    }

    #[must_use]
    pub fn search_scored(&self, query: &str, limit: usize) -> Vec<SearchHit<'_>> {
        search::search_scored(query, &self.records, limit)
    }

    /// Unranked matches of any query term in keywords, title or description.
    #[must_use]
    pub fn keyword_matches(&self, query: &str) -> Vec<&EnrichedRecord> {
        let terms = search::query_terms(query);
        self.records
            .iter()
            .filter(|r| {
                let title = r.title.to_lowercase();
                let description = r.description.to_lowercase();
                terms.iter().any(|term| {
                    r.keywords.iter().any(|k| k.contains(term.as_str()))
                        || title.contains(term.as_str())
                        || description.contains(term.as_str())
                })
            })
            .collect()
    }

    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&EnrichedRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    #[must_use]
    pub fn by_equipment(&self, equipment: &str) -> Vec<&EnrichedRecord> {
        let equipment = equipment.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.equipment.to_lowercase().contains(&equipment))
            .collect()
    }

    #[must_use]
    pub fn by_body_part(&self, body_part: &str) -> Vec<&EnrichedRecord> {
        let body_part = body_part.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.body_part.to_lowercase().contains(&body_part))
            .collect()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.category.label()))
    }

    /// Distinct equipment values in order of first appearance.
    #[must_use]
    pub fn equipment(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.equipment.as_str()))
    }

    /// Distinct body parts in order of first appearance.
    #[must_use]
    pub fn body_parts(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.body_part.as_str()))
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total: self.records.len(),
            ..CatalogStats::default()
        };
        let mut rating_sum = 0.0;
        let mut rating_count = 0;

        for record in &self.records {
            *stats.by_equipment.entry(record.equipment.clone()).or_default() += 1;
            *stats.by_level.entry(record.level.clone()).or_default() += 1;
            *stats.by_kind.entry(record.kind.clone()).or_default() += 1;
            *stats.by_body_part.entry(record.body_part.clone()).or_default() += 1;
            *stats
                .by_category
                .entry(record.category.label().to_string())
                .or_default() += 1;

            if let Some(rating) = record.rating.filter(|r| *r > 0.0) {
                rating_sum += rating;
                rating_count += 1;
            }
        }

        if rating_count > 0 {
            #[allow(clippy::cast_precision_loss)]
            let count = rating_count as f32;
            stats.avg_rating = Some(rating_sum / count);
        }

        stats
    }

    #[must_use]
    pub fn report(&self) -> CatalogReport<'_> {
        CatalogReport { catalog: self }
    }
}

impl From<Vec<EnrichedRecord>> for Catalog {
    fn from(records: Vec<EnrichedRecord>) -> Self {
        Self { records }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CatalogStats {
    pub total: usize,
    pub by_equipment: BTreeMap<String, usize>,
    pub by_level: BTreeMap<String, usize>,
    pub by_kind: BTreeMap<String, usize>,
    pub by_body_part: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub avg_rating: Option<f32>,
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Exercises: {}", self.total)?;
        writeln!(f, "Equipment Types: {}", join_keys(&self.by_equipment))?;
        writeln!(f, "Difficulty Levels: {}", join_keys(&self.by_level))?;
        writeln!(f, "Exercise Types: {}", join_keys(&self.by_kind))?;
        match self.avg_rating {
            Some(rating) => write!(f, "Average Rating: {rating:.2}"),
            None => write!(f, "Average Rating: N/A"),
        }
    }
}

fn join_keys(map: &BTreeMap<String, usize>) -> String {
    map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Human-readable summary of the catalog content.
pub struct CatalogReport<'a> {
    catalog: &'a Catalog,
}

impl fmt::Display for CatalogReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let records = self.catalog.records();
        let count = |predicate: &dyn Fn(&EnrichedRecord) -> bool| {
            records.iter().filter(|r| predicate(*r)).count()
        };

        writeln!(f, "Total Exercises: {}", records.len())?;

        writeln!(f, "\nCategories:")?;
        for category in self.catalog.categories() {
            let n = count(&|r| r.category == category);
            writeln!(f, "  {category}: {n} exercises")?;
        }

        writeln!(f, "\nEquipment Types:")?;
        for equipment in self.catalog.equipment() {
            let n = count(&|r| r.equipment == equipment);
            writeln!(f, "  {equipment}: {n} exercises")?;
        }

        writeln!(f, "\nBody Parts:")?;
        for body_part in self.catalog.body_parts() {
            let n = count(&|r| r.body_part == body_part);
            writeln!(f, "  {body_part}: {n} exercises")?;
        }

        writeln!(f, "\nSamples:")?;
        let middle = records.len() / 2;
        let samples = [
            ("First", &records[..records.len().min(3)]),
            (
                "Middle",
                &records[middle.saturating_sub(1)..(middle + 2).min(records.len())],
            ),
            ("Last", &records[records.len().saturating_sub(3)..]),
        ];
        for (name, sample) in samples {
            let entries = sample
                .iter()
                .map(|r| format!("{}: {}", r.id, r.title))
                .collect::<Vec<_>>();
            writeln!(f, "  {name}: {}", entries.join(", "))?;
        }

        Ok(())
    }
}
