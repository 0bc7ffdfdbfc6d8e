// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A candidate class that is probably a misspelling of a missing reference class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenameHint {
    pub missing: String,
    pub added: String,
    /// Normalized similarity in `0.0..=1.0`.
    pub similarity: f64,
    pub message: String,
}

impl RenameHint {
    fn new(missing: &str, added: &str, similarity: f64) -> Self {
        Self {
            missing: missing.to_owned(),
            added: added.to_owned(),
            similarity,
            message: format!("Did you mean {missing} instead of {added}?"),
        }
    }
}

fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    rapidfuzz::fuzz::ratio(a.chars(), b.chars())
}

/// Pairs each missing class with its most similar added class.
///
/// Pairing is greedy in `missing` order and each added name is used at most once. Pairs below
/// `min_similarity` are dropped.
pub fn rename_hints(missing: &[String], added: &[String], min_similarity: f64) -> Vec<RenameHint> {
    let mut used = vec![false; added.len()];
    let mut hints = Vec::new();

    for missing_name in missing {
        let mut best: Option<(usize, f64)> = None;
        for (idx, added_name) in added.iter().enumerate() {
            if used[idx] {
                continue;
            }
            let score = similarity(missing_name, added_name);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((idx, score));
            }
        }

        let Some((idx, score)) = best else {
            continue;
        };
        if score >= min_similarity {
            used[idx] = true;
            hints.push(RenameHint::new(missing_name, &added[idx], score));
        }
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::rename_hints;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn pairs_plural_typo_with_missing_class() {
        let hints = rename_hints(&names(&["Dog", "Cat"]), &names(&["Dogs", "Cats"]), 0.75);

        assert_eq!(hints.len(), 2);
        assert_eq!((hints[0].missing.as_str(), hints[0].added.as_str()), ("Dog", "Dogs"));
        assert_eq!((hints[1].missing.as_str(), hints[1].added.as_str()), ("Cat", "Cats"));
        assert_eq!(hints[0].message, "Did you mean Dog instead of Dogs?");
        assert!(hints[0].similarity >= 0.75 && hints[0].similarity <= 1.0);
    }

    #[test]
    fn capitalization_only_changes_are_a_perfect_match() {
        let hints = rename_hints(&names(&["Animal"]), &names(&["animal"]), 0.75);
        assert_eq!(hints.len(), 1);
        assert!((hints[0].similarity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unrelated_names_produce_no_hint() {
        assert!(rename_hints(&names(&["Dog"]), &names(&["Bird"]), 0.75).is_empty());
        assert!(rename_hints(&names(&["Dog"]), &[], 0.75).is_empty());
    }

    #[test]
    fn each_added_class_is_used_once() {
        let hints = rename_hints(&names(&["Dog", "Dogg"]), &names(&["Dogs"]), 0.5);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].missing, "Dog");
    }
}
