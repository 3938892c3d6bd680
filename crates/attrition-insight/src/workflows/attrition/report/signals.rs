use super::super::domain::{EnrichedRecord, Gender};
use super::super::policy::AttritionPolicy;
use super::breakdown::frequency_table;
use super::summary::percentage;
use std::collections::{BTreeMap, HashMap};

/// Aggregates shared by the insight and recommendation rules.
pub(crate) struct AttritionSignals {
    pub total: usize,
    pub male_pct: f64,
    pub female_pct: f64,
    pub dominant_reason: Option<(String, f64)>,
    pub top_department: Option<String>,
    pub yearly_counts: BTreeMap<i32, usize>,
    pub youth_pct: f64,
    pub short_tenure_pct: f64,
}

pub(crate) fn collect_signals(
    records: &[EnrichedRecord],
    policy: &AttritionPolicy,
) -> AttritionSignals {
    let total = records.len();
    let mut male = 0;
    let mut female = 0;
    let mut youth = 0;
    let mut short_tenure = 0;
    let mut reason_counts: HashMap<&str, usize> = HashMap::new();
    let mut yearly_counts: BTreeMap<i32, usize> = BTreeMap::new();

    for enriched in records {
        let record = &enriched.record;
        match record.gender {
            Gender::Male => male += 1,
            Gender::Female => female += 1,
        }
        if record.age < policy.youth_age {
            youth += 1;
        }
        if record.tenure_years < policy.short_tenure_years {
            short_tenure += 1;
        }
        *reason_counts.entry(record.reason.as_str()).or_default() += 1;
        *yearly_counts.entry(record.departure_year).or_default() += 1;
    }

    let dominant_reason = dominant(&reason_counts)
        .map(|(reason, count)| (reason.to_string(), percentage(count, total)));

    let top_department = frequency_table(records.iter().map(|r| r.record.department.as_str()))
        .into_iter()
        .next()
        .map(|entry| entry.label);

    AttritionSignals {
        total,
        male_pct: percentage(male, total),
        female_pct: percentage(female, total),
        dominant_reason,
        top_department,
        yearly_counts,
        youth_pct: percentage(youth, total),
        short_tenure_pct: percentage(short_tenure, total),
    }
}

// Highest count wins; equal counts resolve to the lexicographically smallest value.
fn dominant<'a>(counts: &HashMap<&'a str, usize>) -> Option<(&'a str, usize)> {
    counts
        .iter()
        .map(|(value, count)| (*value, *count))
        .fold(None, |best, candidate| match best {
            None => Some(candidate),
            Some(current) => {
                if candidate.1 > current.1 || (candidate.1 == current.1 && candidate.0 < current.0)
                {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        })
}
