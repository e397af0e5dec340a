//! Relationship text → [`Role`] classification.

use crate::core::Role;

type Rule = (fn(&str) -> bool, Role);

/// Ordered, first match wins. Predicates receive the lowercased relationship text.
///
/// CEO is tested before CFO, CFO before the generic C-level shape, and all of those
/// before Director, so "Chief Executive Officer and Director" is a CEO.
pub const ROLE_RULES: &[Rule] = &[
    (is_ceo, Role::Ceo),
    (is_cfo, Role::Cfo),
    (is_other_c_level, Role::OtherCLevel),
    (is_director, Role::Director),
    (is_president, Role::President),
    (is_ten_percent_owner, Role::TenPercentOwner),
    (is_executive_vp, Role::ExecutiveVp),
];

/// Classify a free-text relationship. Pure and deterministic.
pub fn classify(relationship: &str) -> Role {
    let lc = relationship.to_lowercase();
    ROLE_RULES
        .iter()
        .find(|(matches, _)| matches(&lc))
        .map_or(Role::Other, |(_, role)| *role)
}

fn is_ceo(s: &str) -> bool {
    s.contains("ceo") || s.contains("chief executive officer")
}

fn is_cfo(s: &str) -> bool {
    s.contains("cfo") || s.contains("chief financial officer")
}

/// "chief" anywhere, or a leading word shaped like `c…o` (COO, CTO, CMO, Controller).
fn is_other_c_level(s: &str) -> bool {
    if s.contains("chief") {
        return true;
    }
    let word: String = s
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    word.starts_with('c') && word.chars().skip(2).any(|c| c == 'o')
}

fn is_director(s: &str) -> bool {
    s.contains("director")
}

/// Senior VP titles that end in "president"; those belong to the Executive/Senior VP rule.
const SENIOR_VP_PREFIXES: &[&str] = &["executive vice ", "senior vice ", "sr. vice ", "sr vice "];

/// "president", including plain and group vice presidents, but not the senior VP titles.
fn is_president(s: &str) -> bool {
    s.match_indices("president").any(|(i, _)| {
        let before = &s[..i];
        !SENIOR_VP_PREFIXES.iter().any(|p| before.ends_with(p))
    })
}

fn is_ten_percent_owner(s: &str) -> bool {
    s.contains("10%")
}

fn is_executive_vp(s: &str) -> bool {
    s.contains("evp")
        || s.contains("svp")
        || s.contains("executive vice president")
        || s.contains("senior vice president")
        || s.contains("sr. vice president")
        || s.contains("sr vice president")
        || s.contains("executive vp")
        || s.contains("exec vp")
        || s.contains("sr. vp")
}
