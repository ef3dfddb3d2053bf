//! Keyword triage of free-text symptoms.

pub mod patterns;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use sleuth_core::models::{Category, SymptomHints, SymptomProfile};

/// Score each well-known category by keyword matches and pull entity hints
/// (namespace, node, deployment, service) out of the text.
pub fn triage(description: &str) -> SymptomProfile {
    let mut category_scores = BTreeMap::new();
    for pattern in patterns::all_patterns() {
        let Some(regex) = pattern.regex.as_ref() else {
            continue;
        };
        let hits = regex.find_iter(description).count() as u32;
        if hits > 0 {
            category_scores.insert(Category::new(pattern.category), hits);
        }
    }

    SymptomProfile {
        category_scores,
        hints: SymptomHints {
            namespace: capture(&patterns::RE_NAMESPACE_HINT, description),
            node: capture(&patterns::RE_NODE_HINT, description),
            deployment: capture(&patterns::RE_DEPLOYMENT_HINT, description),
            service: capture(&patterns::RE_SERVICE_HINT, description),
        },
    }
}

/// Words that follow "node"/"service" in prose without naming anything.
const NOT_A_NAME: &[&str] = &[
    "a", "an", "and", "are", "has", "have", "in", "is", "not", "of", "on", "the", "was", "were",
];

fn capture(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<String> {
    let regex = pattern.as_ref()?;
    regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .find(|name| !NOT_A_NAME.contains(&name.as_str()))
}
