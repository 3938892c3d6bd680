//! Departure analytics: banding, statistics, insights and recommendations.
//!
//! Every stage is a pure function of the records handed to it, so a report
//! can be rebuilt from scratch whenever the dataset or the filter changes.

mod categorize;
pub mod domain;
pub mod export;
mod filter;
pub mod policy;
pub mod report;

pub use categorize::categorize;
pub use filter::RecordFilter;
pub use policy::{AttritionPolicy, PolicyError, ReasonPlaybook};
pub use report::{
    generate_insights, generate_recommendations, summarize, AttritionReport, Breakdown, Insight,
    InsightKind, InsightSeverity, SummaryStatistics, Tiered,
};

use domain::DepartureRecord;

/// Runs the whole pipeline over `records`.
pub fn analyze(records: &[DepartureRecord], policy: &AttritionPolicy) -> AttritionReport {
    analyze_filtered(records, &RecordFilter::default(), policy)
}

/// Runs the pipeline over the records selected by `filter`.
pub fn analyze_filtered(
    records: &[DepartureRecord],
    filter: &RecordFilter,
    policy: &AttritionPolicy,
) -> AttritionReport {
    let enriched = filter.apply(categorize(records));

    let summary = summarize(&enriched, policy);
    let insights = generate_insights(&enriched, policy);
    let recommendations = generate_recommendations(&enriched, policy);
    let breakdown = Breakdown::from_records(&enriched);

    tracing::info!(
        source_records = records.len(),
        selected_records = enriched.len(),
        insights = insights.len(),
        recommendations = recommendations.len(),
        "attrition report built"
    );

    AttritionReport {
        records: enriched,
        summary,
        insights,
        recommendations,
        breakdown,
    }
}
