use crate::infra::{load_dataset, load_policy, select_source, LoadedDataset};
use attrition_insight::config::AppConfig;
use attrition_insight::error::AppError;
use attrition_insight::telemetry;
use attrition_insight::workflows::attrition::domain::Gender;
use attrition_insight::workflows::attrition::export::{
    recommendations_text, statistics_csv, write_records_csv,
};
use attrition_insight::workflows::attrition::report::{
    department_reasons, Breakdown, FrequencyEntry,
};
use attrition_insight::workflows::attrition::{
    analyze_filtered, AttritionPolicy, AttritionReport, Insight, RecordFilter,
    SummaryStatistics, Tiered,
};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

const DRILL_DOWN_LIMIT: usize = 5;
const TOP_REASONS_SHOWN: usize = 5;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SourceArgs {
    /// Departure CSV to analyze (defaults to ATTRITION_DATASET or the sample generator)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Seed for the sample generator
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of generated sample records
    #[arg(long)]
    pub(crate) sample_size: Option<usize>,
    /// JSON file overriding rule thresholds and action catalogs
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterArgs {
    /// Only include departures from this department
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Only include departures of this gender (male/female)
    #[arg(long, value_parser = crate::infra::parse_gender)]
    pub(crate) gender: Option<Gender>,
    /// First departure year to include
    #[arg(long)]
    pub(crate) from_year: Option<i32>,
    /// Last departure year to include
    #[arg(long)]
    pub(crate) to_year: Option<i32>,
}

impl FilterArgs {
    pub(crate) fn into_filter(self) -> RecordFilter {
        RecordFilter {
            department: self.department,
            gender: self.gender,
            from_year: self.from_year,
            to_year: self.to_year,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportKind {
    /// Enriched dataset with band columns
    Data,
    /// Single-row summary statistics
    Statistics,
    /// Numbered recommendation list
    Recommendations,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[arg(value_enum)]
    pub(crate) kind: ExportKind,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DataSourceKind {
    Configured,
    Upload,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DataSourceView {
    pub(crate) kind: DataSourceKind,
    pub(crate) description: String,
    pub(crate) total_records: usize,
}

/// JSON shape shared by `report --json` and the HTTP report endpoints.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReportResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) data_source: DataSourceView,
    pub(crate) filter: RecordFilter,
    pub(crate) summary: SummaryStatistics,
    pub(crate) insights: Tiered<Insight>,
    pub(crate) recommendations: Tiered<String>,
    pub(crate) breakdown: Breakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) department_reasons: Option<Vec<FrequencyEntry>>,
}

impl ReportResponse {
    pub(crate) fn build(
        report: AttritionReport,
        data_source: DataSourceView,
        filter: RecordFilter,
    ) -> Self {
        let insights = report.insight_tiers();
        let recommendations = report.recommendation_tiers();
        let department_reasons = filter.department.as_deref().map(|department| {
            department_reasons(&report.records, department, DRILL_DOWN_LIMIT)
        });

        Self {
            generated_at: Utc::now(),
            data_source,
            filter,
            summary: report.summary,
            insights,
            recommendations,
            breakdown: report.breakdown,
            department_reasons,
        }
    }
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        source,
        filter,
        json,
    } = args;

    let (dataset, policy) = prepare(source)?;
    let filter = filter.into_filter();
    let report = analyze_filtered(&dataset.records, &filter, &policy);

    if json {
        let data_source = DataSourceView {
            kind: DataSourceKind::Configured,
            description: dataset.description.clone(),
            total_records: dataset.records.len(),
        };
        let response = ReportResponse::build(report, data_source, filter);
        println!("{}", render_json(&response)?);
    } else {
        render_report(&report, &dataset, &filter);
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        kind,
        output,
        source,
        filter,
    } = args;

    let (dataset, policy) = prepare(source)?;
    let report = analyze_filtered(&dataset.records, &filter.into_filter(), &policy);

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    match kind {
        ExportKind::Data => write_records_csv(&report.records, &mut writer)?,
        ExportKind::Statistics => writer.write_all(statistics_csv(&report.summary)?.as_bytes())?,
        ExportKind::Recommendations => {
            writeln!(writer, "{}", recommendations_text(&report.recommendations))?
        }
    }
    writer.flush()?;

    if let Some(path) = output {
        tracing::info!(?kind, path = %path.display(), "export written");
    }
    Ok(())
}

pub(crate) fn render_json(response: &ReportResponse) -> Result<String, AppError> {
    serde_json::to_string_pretty(response).map_err(|err| AppError::Io(io::Error::other(err)))
}

fn prepare(source: SourceArgs) -> Result<(LoadedDataset, AttritionPolicy), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let analysis = config.analysis;
    let dataset_path = source.csv.or(analysis.dataset_path);
    let policy_path = source.policy.or(analysis.policy_path);
    let data_source = select_source(
        dataset_path,
        source.seed.unwrap_or(analysis.sample_seed),
        source.sample_size.unwrap_or(analysis.sample_size),
    );

    let dataset = load_dataset(data_source.as_ref())?;
    let policy = load_policy(policy_path.as_deref())?;
    Ok((dataset, policy))
}

pub(crate) fn render_report(
    report: &AttritionReport,
    dataset: &LoadedDataset,
    filter: &RecordFilter,
) {
    println!("Employee attrition report");
    println!(
        "Data source: {} ({} records loaded)",
        dataset.description,
        dataset.records.len()
    );
    println!("Filter: {}", describe_filter(filter));

    let summary = &report.summary;
    if summary.total == 0 {
        println!("\nNo departures match the selection.");
        return;
    }

    println!("\nSummary");
    println!(
        "- Departures: {} ({} male {:.1}% | {} female {:.1}%)",
        summary.total, summary.male_count, summary.male_pct, summary.female_count, summary.female_pct
    );
    println!(
        "- Mean age {:.1} | mean tenure {:.1} years | mean monthly salary {:.0}",
        summary.mean_age, summary.mean_tenure_years, summary.mean_monthly_salary
    );
    println!(
        "- Years {} | {} distinct reasons | {} departments",
        summary.years_range(),
        summary.distinct_reasons,
        summary.distinct_departments
    );
    println!(
        "- Estimated retention: {:.1}%",
        summary.estimated_retention_pct
    );

    let (warnings, observations) = partition_insights(&report.insights);
    for (heading, insights) in [("Warnings", warnings), ("Observations", observations)] {
        if insights.is_empty() {
            continue;
        }
        println!("\n{heading}");
        for insight in insights {
            println!("- [{}] {}", insight.severity.label(), insight.message);
        }
    }

    let tiers = report.recommendation_tiers();
    let mut position = 0;
    for (heading, actions) in [
        ("Immediate actions", &tiers.immediate),
        ("Strategic initiatives", &tiers.strategic),
    ] {
        if actions.is_empty() {
            continue;
        }
        println!("\n{heading}");
        for action in actions {
            position += 1;
            println!("{position}. {action}");
        }
    }

    println!("\nTop departure reasons");
    for entry in report.breakdown.reasons.iter().take(TOP_REASONS_SHOWN) {
        println!("- {}: {} ({:.1}%)", entry.label, entry.count, entry.share_pct);
    }

    if let Some(department) = filter.department.as_deref() {
        println!("\nReasons within {department}");
        for entry in department_reasons(&report.records, department, DRILL_DOWN_LIMIT) {
            println!("- {}: {} ({:.1}%)", entry.label, entry.count, entry.share_pct);
        }
    }
}

// Critical and warning insights first; both halves keep rule order.
fn partition_insights(insights: &[Insight]) -> (Vec<&Insight>, Vec<&Insight>) {
    insights
        .iter()
        .partition(|insight| insight.severity.is_warning())
}

fn describe_filter(filter: &RecordFilter) -> String {
    if filter.is_empty() {
        return "none".to_string();
    }

    let mut parts = Vec::new();
    if let Some(department) = &filter.department {
        parts.push(format!("department={department}"));
    }
    if let Some(gender) = filter.gender {
        parts.push(format!("gender={gender}"));
    }
    if let Some(year) = filter.from_year {
        parts.push(format!("from={year}"));
    }
    if let Some(year) = filter.to_year {
        parts.push(format!("to={year}"));
    }
    parts.join(", ")
}
