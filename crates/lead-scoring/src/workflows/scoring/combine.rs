use super::domain::Intent;

/// Final score: rule component plus the intent layer. Labels outside the
/// expected set are credited at Medium's value rather than rejected, so a
/// model drifting to lowercase or novel labels degrades gracefully. No
/// upper clamp is applied.
pub(crate) fn combine(rule_score: u8, intent_label: &str) -> u16 {
    u16::from(rule_score) + intent_points(intent_label)
}

fn intent_points(label: &str) -> u16 {
    Intent::from_label(label)
        .unwrap_or(Intent::Medium)
        .points()
}
