mod breakdown;
mod insights;
mod recommendations;
mod signals;
mod summary;
pub mod views;

pub use breakdown::{
    department_reasons, BandCount, Breakdown, DepartmentGenderRow, DepartmentProfile,
    FrequencyEntry, GenderCounts, ReasonGenderRow, SalaryReasonRow, TenureGenderRow,
    YearGenderRow,
};
pub use insights::generate_insights;
pub use recommendations::generate_recommendations;
pub use summary::{summarize, SummaryStatistics};
pub use views::{AttritionReport, Insight, InsightKind, InsightSeverity, Tiered};
