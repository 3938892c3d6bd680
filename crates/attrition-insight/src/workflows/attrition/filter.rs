use super::domain::{EnrichedRecord, Gender};
use serde::{Deserialize, Serialize};

/// User-selected slice of the dataset. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub department: Option<String>,
    pub gender: Option<Gender>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, enriched: &EnrichedRecord) -> bool {
        let record = &enriched.record;
        self.department
            .as_deref()
            .map_or(true, |department| record.department == department)
            && self.gender.map_or(true, |gender| record.gender == gender)
            && self
                .from_year
                .map_or(true, |year| record.departure_year >= year)
            && self.to_year.map_or(true, |year| record.departure_year <= year)
    }

    pub fn apply(&self, records: Vec<EnrichedRecord>) -> Vec<EnrichedRecord> {
        if self.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}
