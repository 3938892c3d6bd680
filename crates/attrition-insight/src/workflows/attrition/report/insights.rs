use super::super::domain::EnrichedRecord;
use super::super::policy::AttritionPolicy;
use super::signals::{collect_signals, AttritionSignals};
use super::views::{Insight, InsightKind, InsightSeverity};

/// Evaluates the insight rules in priority order.
///
/// Each rule appends at most one insight. An empty record set produces no
/// insights at all.
pub fn generate_insights(records: &[EnrichedRecord], policy: &AttritionPolicy) -> Vec<Insight> {
    if records.is_empty() {
        return Vec::new();
    }

    let signals = collect_signals(records, policy);
    let mut insights = Vec::new();

    if let Some(insight) = gender_skew(&signals, policy) {
        insights.push(insight);
    }

    if let Some((reason, share)) = &signals.dominant_reason {
        insights.push(Insight {
            kind: InsightKind::DominantReason,
            severity: InsightSeverity::Informational,
            message: format!("Most common departure reason: {reason} ({share:.1}%)"),
        });
    }

    if let Some(insight) = yearly_trend(&signals, policy) {
        insights.push(insight);
    }

    if let Some(department) = &signals.top_department {
        insights.push(Insight {
            kind: InsightKind::TopDepartment,
            severity: InsightSeverity::Informational,
            message: format!("Highest attrition department: {department}"),
        });
    }

    if signals.youth_pct > policy.youth_share_pct {
        insights.push(Insight {
            kind: InsightKind::YouthAttrition,
            severity: InsightSeverity::Warning,
            message: format!(
                "High share of employees under {} leaving ({:.1}%)",
                policy.youth_age, signals.youth_pct
            ),
        });
    }

    if signals.short_tenure_pct > policy.short_tenure_share_pct {
        insights.push(Insight {
            kind: InsightKind::ShortTenure,
            severity: InsightSeverity::Informational,
            message: format!(
                "{:.1}% of departing employees served less than {} years",
                signals.short_tenure_pct, policy.short_tenure_years
            ),
        });
    }

    tracing::debug!(
        records = signals.total,
        fired = insights.len(),
        "generated attrition insights"
    );
    insights
}

fn gender_skew(signals: &AttritionSignals, policy: &AttritionPolicy) -> Option<Insight> {
    if signals.male_pct > policy.male_skew_pct {
        Some(Insight {
            kind: InsightKind::MaleSkew,
            severity: InsightSeverity::Critical,
            message: format!("High male attrition rate ({:.1}%)", signals.male_pct),
        })
    } else if signals.female_pct > policy.female_skew_pct {
        Some(Insight {
            kind: InsightKind::FemaleSkew,
            severity: InsightSeverity::Warning,
            message: format!(
                "Female attrition is higher than expected ({:.1}%)",
                signals.female_pct
            ),
        })
    } else {
        None
    }
}

// Compares the mean departures of the most recent window against all years
// before it. Needs at least one year outside the window.
fn yearly_trend(signals: &AttritionSignals, policy: &AttritionPolicy) -> Option<Insight> {
    let counts: Vec<f64> = signals
        .yearly_counts
        .values()
        .map(|count| *count as f64)
        .collect();
    if counts.len() < 2 || counts.len() <= policy.trend_recent_years {
        return None;
    }

    let (earlier, recent) = counts.split_at(counts.len() - policy.trend_recent_years);
    let recent_mean = mean(recent);
    let earlier_mean = mean(earlier);

    if recent_mean > earlier_mean * policy.trend_upward_ratio {
        Some(Insight {
            kind: InsightKind::UpwardTrend,
            severity: InsightSeverity::Trend,
            message: "Clear upward trend in departures over recent years".to_string(),
        })
    } else if recent_mean < earlier_mean * policy.trend_downward_ratio {
        Some(Insight {
            kind: InsightKind::DownwardTrend,
            severity: InsightSeverity::Trend,
            message: "Noticeable decline in departures recently".to_string(),
        })
    } else {
        None
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
