use super::super::domain::EnrichedRecord;
use super::super::policy::AttritionPolicy;
use super::signals::collect_signals;

/// Maps the dominant reason and secondary signals onto the policy's action catalog.
pub fn generate_recommendations(
    records: &[EnrichedRecord],
    policy: &AttritionPolicy,
) -> Vec<String> {
    if records.is_empty() {
        return Vec::new();
    }

    let signals = collect_signals(records, policy);
    let mut recommendations = Vec::new();

    if let Some((reason, _)) = &signals.dominant_reason {
        if let Some(playbook) = policy.playbook_for(reason) {
            recommendations.extend(playbook.actions.iter().cloned());
        }
    }

    if signals.short_tenure_pct > policy.short_tenure_share_pct {
        recommendations.extend(policy.short_tenure_actions.iter().cloned());
    }

    if signals.male_pct > policy.male_skew_pct {
        recommendations.push(policy.male_focus_action.clone());
    } else {
        recommendations.push(policy.work_life_balance_action.clone());
    }

    if let Some(department) = &signals.top_department {
        recommendations.push(policy.department_action(department));
    }

    tracing::debug!(
        records = signals.total,
        actions = recommendations.len(),
        "generated attrition recommendations"
    );
    recommendations
}
