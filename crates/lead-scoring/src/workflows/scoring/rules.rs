use super::domain::{Lead, Offer};

/// Upper bound of the deterministic component: 20 seniority + 20 industry
/// + 10 completeness.
pub const RULE_SCORE_MAX: u8 = 50;

const SENIOR_DECISION_MAKERS: [&str; 5] = ["head", "director", "vp", "founder", "ceo"];
const MID_TIER_ROLES: [&str; 3] = ["manager", "lead", "specialist"];
const PROFILE_FIELDS: [&str; 6] = [
    "name",
    "role",
    "company",
    "industry",
    "location",
    "linkedin_bio",
];

/// Deterministic heuristic score in `[0, RULE_SCORE_MAX]`. Pure; missing
/// fields are treated as empty and never fail the computation.
pub fn rule_score(lead: &Lead, offer: &Offer) -> u8 {
    seniority_points(lead) + industry_points(lead, offer) + completeness_points(lead)
}

/// Highest matching tier wins; a role like "Lead Director" earns the
/// decision-maker tier once, not both.
fn seniority_points(lead: &Lead) -> u8 {
    let role = lead.field("role").to_lowercase();
    if SENIOR_DECISION_MAKERS
        .iter()
        .any(|keyword| role.contains(keyword))
    {
        20
    } else if MID_TIER_ROLES.iter().any(|keyword| role.contains(keyword)) {
        10
    } else {
        0
    }
}

/// Industry fit against the offer's first ideal use case only. A full
/// substring match outranks a single-word overlap.
fn industry_points(lead: &Lead, offer: &Offer) -> u8 {
    let Some(use_case) = offer.primary_use_case() else {
        return 0;
    };

    let industry = lead.field("industry").to_lowercase();
    let use_case = use_case.to_lowercase();

    if industry.contains(&use_case) {
        20
    } else if use_case
        .split_whitespace()
        .any(|word| industry.contains(word))
    {
        10
    } else {
        0
    }
}

/// All-or-nothing bonus for a fully filled-in prospect profile.
fn completeness_points(lead: &Lead) -> u8 {
    if PROFILE_FIELDS.iter().all(|field| lead.is_filled(field)) {
        10
    } else {
        0
    }
}
