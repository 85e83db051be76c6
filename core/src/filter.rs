//! Ignore-list filtering of correction matches.

use ahash::AHashSet;

use crate::correction::Match;
use crate::ignore::IgnoreRule;

/// Drop every match whose rule id or category id appears in the ignore list.
///
/// Ignore entries are matched by id alone; whether the user ignored a rule
/// or a whole category, the stored id is compared against both fields of
/// each match. Pure function: the result replaces the session's match list
/// wholesale after every fetch.
pub fn filter_matches(matches: &[Match], ignore_rules: &[IgnoreRule]) -> Vec<Match> {
    if ignore_rules.is_empty() {
        return matches.to_vec();
    }

    let ignored: AHashSet<&str> = ignore_rules.iter().map(|r| r.id.as_str()).collect();

    matches
        .iter()
        .filter(|m| {
            !ignored.contains(m.rule.id.as_str()) && !ignored.contains(m.rule.category.id.as_str())
        })
        .cloned()
        .collect()
}
