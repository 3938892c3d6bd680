use attrition_insight::config::AnalysisConfig;
use attrition_insight::error::AppError;
use attrition_insight::workflows::attrition::domain::{DepartureRecord, Gender};
use attrition_insight::workflows::attrition::AttritionPolicy;
use attrition_insight::workflows::dataset::{
    self, CsvDepartureSource, DepartureSource, SampleDataSource,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dataset: Arc<LoadedDataset>,
    pub(crate) policy: Arc<AttritionPolicy>,
}

/// Records loaded once at startup together with a human-readable origin.
#[derive(Debug, Clone)]
pub(crate) struct LoadedDataset {
    pub(crate) description: String,
    pub(crate) records: Vec<DepartureRecord>,
}

/// CSV when a path is configured, otherwise the seeded sample generator.
pub(crate) fn select_source(
    dataset_path: Option<PathBuf>,
    seed: u64,
    size: usize,
) -> Box<dyn DepartureSource> {
    match dataset_path {
        Some(path) => Box::new(CsvDepartureSource::new(path)),
        None => Box::new(SampleDataSource::new(seed, size)),
    }
}

pub(crate) fn load_dataset(source: &dyn DepartureSource) -> Result<LoadedDataset, AppError> {
    let records = source.load()?;
    let description = source.describe();
    tracing::info!(source = %description, records = records.len(), "departure dataset loaded");
    Ok(LoadedDataset {
        description,
        records,
    })
}

pub(crate) fn load_configured_dataset(
    analysis: &AnalysisConfig,
) -> Result<LoadedDataset, AppError> {
    let source = select_source(
        analysis.dataset_path.clone(),
        analysis.sample_seed,
        analysis.sample_size,
    );
    load_dataset(source.as_ref())
}

pub(crate) fn load_policy(path: Option<&Path>) -> Result<AttritionPolicy, AppError> {
    match path {
        Some(path) => {
            let policy = AttritionPolicy::from_path(path)?;
            tracing::info!(path = %path.display(), "attrition policy loaded");
            Ok(policy)
        }
        None => Ok(AttritionPolicy::default()),
    }
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    dataset::parse_gender(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as a gender (male or female)"))
}
