// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Line-level attribution of differences to the candidate source.
//!
//! Matching is purely textual: a line belongs to a difference when it contains the names the
//! record carries. The first matching record (in report order) wins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::diff::{DiffReport, Difference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HighlightCategory {
    /// Something the candidate should contain near this line.
    Missing,
    /// This line holds something that should not be there, or is wrong.
    Unexpected,
}

impl HighlightCategory {
    pub fn gutter(&self) -> char {
        match self {
            Self::Missing => '?',
            Self::Unexpected => '!',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightedLine {
    /// 1-based.
    pub line_no: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<HighlightCategory>,
    /// Index into [`DiffReport::differences`] of the record that matched this line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<usize>,
}

fn category_of(difference: &Difference) -> HighlightCategory {
    if difference.kind().is_missing() {
        HighlightCategory::Missing
    } else {
        HighlightCategory::Unexpected
    }
}

fn line_matches(line: &str, enclosing_class: Option<&str>, difference: &Difference) -> bool {
    match difference {
        Difference::Error { .. } => false,
        Difference::ClassesMissing { classes, .. } | Difference::ClassesAdded { classes, .. } => {
            classes.iter().any(|name| line.contains(name.as_str()))
        }
        Difference::PropertiesMissing { class_name, .. }
        | Difference::MethodsMissing { class_name, .. } => line.contains(class_name.as_str()),
        Difference::PropertyChanged { class_name, property_name, .. } => {
            line.contains(property_name.as_str())
                && (line.contains(class_name.as_str())
                    || enclosing_class == Some(class_name.as_str()))
        }
        Difference::RelationshipsMissing { relationships, .. }
        | Difference::RelationshipsAdded { relationships, .. } => relationships
            .iter()
            .any(|rel| line.contains(rel.from()) && line.contains(rel.to())),
    }
}

/// Name of the class whose `{` body this line opens, if the body stays open past the line.
fn opened_class_body(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("class")?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    let open = rest.find('{')?;
    if rest[open..].contains('}') {
        return None;
    }
    let name = rest[..open].trim();
    let name = name.split('~').next().unwrap_or(name).trim();
    (!name.is_empty()).then_some(name)
}

/// Attribute each line of `candidate` to at most one difference of `report`.
///
/// Lines inside a `class Name { ... }` body also match `property_changed` records of that
/// class by property name alone, since member lines rarely repeat the class name.
pub fn highlight_lines(candidate: &str, report: &DiffReport) -> Vec<HighlightedLine> {
    let mut lines = Vec::new();
    let mut enclosing_class: Option<&str> = None;

    for (idx, line) in candidate.lines().enumerate() {
        let opened = opened_class_body(line);
        let scope = opened.or(enclosing_class);

        let matched = report
            .differences
            .iter()
            .enumerate()
            .find(|(_, difference)| line_matches(line, scope, difference));

        lines.push(HighlightedLine {
            line_no: idx + 1,
            text: line.to_owned(),
            category: matched.map(|(_, difference)| category_of(difference)),
            difference: matched.map(|(index, _)| index),
        });

        if opened.is_some() {
            enclosing_class = opened;
        } else if line.contains('}') {
            enclosing_class = None;
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::{highlight_lines, opened_class_body, HighlightCategory, HighlightedLine};
    use crate::diff::{compare_sources, DiffReport};

    const SOLUTION: &str = "classDiagram
    class Animal {
        +name: String
        +makeSound()
    }
    class Dog
    class Cat
    Animal <|-- Dog
    Animal <|-- Cat";

    fn flagged(lines: &[HighlightedLine]) -> Vec<(usize, HighlightCategory)> {
        lines
            .iter()
            .filter_map(|line| line.category.map(|category| (line.line_no, category)))
            .collect()
    }

    #[test]
    fn identical_report_flags_nothing() {
        let lines = highlight_lines(SOLUTION, &DiffReport::identical());
        assert_eq!(lines.len(), 9);
        assert!(flagged(&lines).is_empty());
    }

    #[test]
    fn changed_property_inside_body_is_unexpected() {
        let candidate = SOLUTION.replace("+name: String", "+name: int");
        let report = compare_sources(SOLUTION, &candidate);

        let lines = highlight_lines(&candidate, &report);

        assert_eq!(flagged(&lines), vec![(3, HighlightCategory::Unexpected)]);
        assert_eq!(lines[2].difference, Some(0));
    }

    #[test]
    fn missing_relationship_and_added_class_are_distinguished() {
        let candidate = "classDiagram
    class Animal {
        +name: String
        +makeSound()
    }
    class Dog
    class Cat
    class Bird
    Animal <|-- Cat
    Bird --> Cat";
        let report = compare_sources(SOLUTION, candidate);

        let lines = highlight_lines(candidate, &report);

        assert_eq!(
            flagged(&lines),
            vec![
                (8, HighlightCategory::Unexpected),
                (10, HighlightCategory::Unexpected),
            ]
        );
    }

    #[test]
    fn lines_naming_both_endpoints_of_a_missing_relationship_are_missing() {
        let candidate = SOLUTION.replace("Animal <|-- Dog", "Dog --> Animal");
        let report = compare_sources(SOLUTION, &candidate);

        let lines = highlight_lines(&candidate, &report);

        assert_eq!(flagged(&lines), vec![(8, HighlightCategory::Missing)]);
    }

    #[test]
    fn error_records_never_match() {
        let lines = highlight_lines("class A", &compare_sources("", "class A"));
        assert!(flagged(&lines).is_empty());
    }

    #[test]
    fn detects_open_class_bodies() {
        assert_eq!(opened_class_body("  class Animal {"), Some("Animal"));
        assert_eq!(opened_class_body("class Box~T~ {"), Some("Box"));
        assert_eq!(opened_class_body("class Animal { +a: int }"), None);
        assert_eq!(opened_class_body("class Animal"), None);
        assert_eq!(opened_class_body("classDiagram {"), None);
    }
}
