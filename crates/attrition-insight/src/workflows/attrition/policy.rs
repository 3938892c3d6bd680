use super::domain::{REASON_ANOTHER_JOB, REASON_INADEQUATE_SALARY, REASON_POOR_ENVIRONMENT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds and action catalogs driving the insight and recommendation rules.
///
/// Percentages are expressed on a 0-100 scale. Every field has a default, so a
/// policy file only needs to list the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttritionPolicy {
    pub male_skew_pct: f64,
    pub female_skew_pct: f64,
    pub youth_age: u8,
    pub youth_share_pct: f64,
    pub short_tenure_years: f64,
    pub short_tenure_share_pct: f64,
    pub trend_recent_years: usize,
    pub trend_upward_ratio: f64,
    pub trend_downward_ratio: f64,
    /// Headcount still employed, used only for the retention estimate.
    pub assumed_active_headcount: usize,
    pub reason_playbooks: Vec<ReasonPlaybook>,
    pub short_tenure_actions: Vec<String>,
    pub male_focus_action: String,
    pub work_life_balance_action: String,
    /// `{department}` is replaced with the department name.
    pub department_action_template: String,
}

/// Actions recommended when a given reason is the dominant one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonPlaybook {
    pub reason: String,
    pub actions: Vec<String>,
}

impl ReasonPlaybook {
    fn new(reason: &str, actions: [&str; 2]) -> Self {
        Self {
            reason: reason.to_string(),
            actions: actions.iter().map(|action| action.to_string()).collect(),
        }
    }
}

impl Default for AttritionPolicy {
    fn default() -> Self {
        Self {
            male_skew_pct: 65.0,
            female_skew_pct: 50.0,
            youth_age: 30,
            youth_share_pct: 40.0,
            short_tenure_years: 2.0,
            short_tenure_share_pct: 30.0,
            trend_recent_years: 3,
            trend_upward_ratio: 1.2,
            trend_downward_ratio: 0.8,
            assumed_active_headcount: 5000,
            reason_playbooks: vec![
                ReasonPlaybook::new(
                    REASON_ANOTHER_JOB,
                    [
                        "Improve the benefits and compensation package to retain talent",
                        "Build retention programs for high-performing employees",
                    ],
                ),
                ReasonPlaybook::new(
                    REASON_INADEQUATE_SALARY,
                    [
                        "Review the salary structure and benchmark it against the market",
                        "Run a comprehensive compensation study",
                    ],
                ),
                ReasonPlaybook::new(
                    REASON_POOR_ENVIRONMENT,
                    [
                        "Improve the work environment and organizational culture",
                        "Strengthen communication between management and employees",
                    ],
                ),
            ],
            short_tenure_actions: vec![
                "Develop stronger onboarding programs for new hires".to_string(),
                "Review the recruitment and selection process".to_string(),
            ],
            male_focus_action: "Focus on the needs of male employees".to_string(),
            work_life_balance_action: "Develop programs that support work-life balance"
                .to_string(),
            department_action_template: "Give special attention to the {department} department"
                .to_string(),
        }
    }
}

impl AttritionPolicy {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn playbook_for(&self, reason: &str) -> Option<&ReasonPlaybook> {
        self.reason_playbooks
            .iter()
            .find(|playbook| playbook.reason == reason)
    }

    pub fn department_action(&self, department: &str) -> String {
        self.department_action_template
            .replace("{department}", department)
    }

    fn validate(&self) -> Result<(), PolicyError> {
        if self.trend_recent_years == 0 {
            return Err(PolicyError::Invalid(
                "trend_recent_years must be at least 1".to_string(),
            ));
        }

        let shares = [
            ("male_skew_pct", self.male_skew_pct),
            ("female_skew_pct", self.female_skew_pct),
            ("youth_share_pct", self.youth_share_pct),
            ("short_tenure_share_pct", self.short_tenure_share_pct),
        ];
        for (name, value) in shares {
            if !(0.0..=100.0).contains(&value) {
                return Err(PolicyError::Invalid(format!(
                    "{name} must be between 0 and 100, got {value}"
                )));
            }
        }

        if self.trend_downward_ratio > self.trend_upward_ratio {
            return Err(PolicyError::Invalid(
                "trend_downward_ratio must not exceed trend_upward_ratio".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
    #[error("policy file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid policy: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_playbooks_cover_the_three_named_reasons() {
        let policy = AttritionPolicy::default();
        for reason in [
            REASON_ANOTHER_JOB,
            REASON_INADEQUATE_SALARY,
            REASON_POOR_ENVIRONMENT,
        ] {
            let playbook = policy.playbook_for(reason).expect("playbook present");
            assert_eq!(playbook.actions.len(), 2);
        }
        assert!(policy.playbook_for("relocation").is_none());
    }

    #[test]
    fn partial_json_overrides_only_listed_fields() {
        let policy = AttritionPolicy::from_json(r#"{ "male_skew_pct": 70.0, "youth_age": 28 }"#)
            .expect("policy parses");

        assert_eq!(policy.male_skew_pct, 70.0);
        assert_eq!(policy.youth_age, 28);
        assert_eq!(policy.female_skew_pct, 50.0);
        assert_eq!(policy.reason_playbooks.len(), 3);
    }

    #[test]
    fn rejects_out_of_range_shares() {
        let error = AttritionPolicy::from_json(r#"{ "youth_share_pct": 140.0 }"#)
            .expect_err("share above 100 rejected");
        assert!(matches!(error, PolicyError::Invalid(message) if message.contains("youth_share_pct")));
    }

    #[test]
    fn rejects_zero_recent_window() {
        let error = AttritionPolicy::from_json(r#"{ "trend_recent_years": 0 }"#)
            .expect_err("empty window rejected");
        assert!(matches!(error, PolicyError::Invalid(_)));
    }

    #[test]
    fn department_action_fills_the_template() {
        let policy = AttritionPolicy::default();
        assert_eq!(
            policy.department_action("Sales"),
            "Give special attention to the Sales department"
        );
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let error = AttritionPolicy::from_path("./does-not-exist.json").expect_err("io error");
        assert!(matches!(error, PolicyError::Io(_)));
    }
}
