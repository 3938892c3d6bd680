use super::super::domain::EnrichedRecord;
use super::breakdown::Breakdown;
use super::summary::SummaryStatistics;
use serde::Serialize;
use std::fmt;

/// The rule that produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    MaleSkew,
    FemaleSkew,
    DominantReason,
    UpwardTrend,
    DownwardTrend,
    TopDepartment,
    YouthAttrition,
    ShortTenure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    Critical,
    Warning,
    Trend,
    Informational,
}

impl InsightSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Trend => "Trend",
            Self::Informational => "Info",
        }
    }

    pub const fn is_warning(self) -> bool {
        matches!(self, Self::Critical | Self::Warning)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: InsightSeverity,
    pub message: String,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// An ordered list split at `len / 2` into an immediate and a strategic half.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tiered<T> {
    pub immediate: Vec<T>,
    pub strategic: Vec<T>,
}

impl<T: Clone> Tiered<T> {
    pub fn split(items: &[T]) -> Self {
        let (immediate, strategic) = items.split_at(items.len() / 2);
        Self {
            immediate: immediate.to_vec(),
            strategic: strategic.to_vec(),
        }
    }
}

/// Everything the presentation layer reads for one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct AttritionReport {
    pub records: Vec<EnrichedRecord>,
    pub summary: SummaryStatistics,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
    pub breakdown: Breakdown,
}

impl AttritionReport {
    pub fn insight_tiers(&self) -> Tiered<Insight> {
        Tiered::split(&self.insights)
    }

    pub fn recommendation_tiers(&self) -> Tiered<String> {
        Tiered::split(&self.recommendations)
    }

    pub fn insight_messages(&self) -> Vec<&str> {
        self.insights
            .iter()
            .map(|insight| insight.message.as_str())
            .collect()
    }
}
