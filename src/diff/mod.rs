// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Semantic comparison of a reference class diagram against a candidate.
//!
//! The differ is reference-centric for members: extra properties or methods on the candidate
//! side are never reported, while extra classes and relationships are.

pub mod hints;

use std::fmt;

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::format::mermaid::parse_class_diagram;
use crate::model::{ClassDiagramModel, ClassEntity, Property, Relationship};

pub use hints::{rename_hints, RenameHint};

/// Message of the single record produced for blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "one or both codes are empty";

/// Default similarity threshold for rename hints.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiffReport {
    pub identical: bool,
    pub differences: Vec<Difference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<RenameHint>,
}

impl DiffReport {
    pub fn identical() -> Self {
        Self { identical: true, differences: Vec::new(), hints: Vec::new() }
    }

    pub fn from_differences(differences: Vec<Difference>) -> Self {
        Self { identical: differences.is_empty(), differences, hints: Vec::new() }
    }

    pub fn empty_input() -> Self {
        Self {
            identical: false,
            differences: vec![Difference::Error { message: EMPTY_INPUT_MESSAGE.to_owned() }],
            hints: Vec::new(),
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.differences.iter().map(Difference::message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    Error,
    ClassesMissing,
    ClassesAdded,
    PropertiesMissing,
    MethodsMissing,
    PropertyChanged,
    RelationshipsMissing,
    RelationshipsAdded,
}

impl DifferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::ClassesMissing => "classes_missing",
            Self::ClassesAdded => "classes_added",
            Self::PropertiesMissing => "properties_missing",
            Self::MethodsMissing => "methods_missing",
            Self::PropertyChanged => "property_changed",
            Self::RelationshipsMissing => "relationships_missing",
            Self::RelationshipsAdded => "relationships_added",
        }
    }

    /// Kinds describing something the candidate should contain but does not.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::ClassesMissing
                | Self::PropertiesMissing
                | Self::MethodsMissing
                | Self::RelationshipsMissing
        )
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified discrepancy between reference and candidate.
///
/// Each variant carries a ready-to-display `message` plus the names a caller needs to find the
/// affected lines in the candidate source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Difference {
    Error {
        message: String,
    },
    ClassesMissing {
        classes: Vec<String>,
        message: String,
    },
    ClassesAdded {
        classes: Vec<String>,
        message: String,
    },
    PropertiesMissing {
        class_name: String,
        properties: Vec<Property>,
        message: String,
    },
    MethodsMissing {
        class_name: String,
        methods: Vec<String>,
        message: String,
    },
    PropertyChanged {
        class_name: String,
        property_name: String,
        old_type: String,
        new_type: String,
        message: String,
    },
    RelationshipsMissing {
        relationships: Vec<Relationship>,
        message: String,
    },
    RelationshipsAdded {
        relationships: Vec<Relationship>,
        message: String,
    },
}

impl Difference {
    pub fn classes_missing(classes: Vec<String>) -> Self {
        let message = format!("Classes missing in user code: {}", classes.join(", "));
        Self::ClassesMissing { classes, message }
    }

    pub fn classes_added(classes: Vec<String>) -> Self {
        let message = format!("Extra classes in user code: {}", classes.join(", "));
        Self::ClassesAdded { classes, message }
    }

    pub fn properties_missing(class_name: impl Into<String>, properties: Vec<Property>) -> Self {
        let class_name = class_name.into();
        let listed = properties.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        let message = format!("Properties missing in class {class_name}: {listed}");
        Self::PropertiesMissing { class_name, properties, message }
    }

    pub fn methods_missing(class_name: impl Into<String>, methods: Vec<String>) -> Self {
        let class_name = class_name.into();
        let message = format!("Methods missing in class {class_name}: {}", methods.join(", "));
        Self::MethodsMissing { class_name, methods, message }
    }

    pub fn property_changed(
        class_name: impl Into<String>,
        property_name: impl Into<String>,
        old_type: impl Into<String>,
        new_type: impl Into<String>,
    ) -> Self {
        let class_name = class_name.into();
        let property_name = property_name.into();
        let old_type = old_type.into();
        let new_type = new_type.into();
        let message = format!(
            "Property {property_name} in class {class_name} changed from {old_type} to {new_type}"
        );
        Self::PropertyChanged { class_name, property_name, old_type, new_type, message }
    }

    pub fn relationships_missing(relationships: Vec<Relationship>) -> Self {
        let message =
            format!("Relationships missing in user code: {}", join_relationships(&relationships));
        Self::RelationshipsMissing { relationships, message }
    }

    pub fn relationships_added(relationships: Vec<Relationship>) -> Self {
        let message =
            format!("Extra relationships in user code: {}", join_relationships(&relationships));
        Self::RelationshipsAdded { relationships, message }
    }

    pub fn kind(&self) -> DifferenceKind {
        match self {
            Self::Error { .. } => DifferenceKind::Error,
            Self::ClassesMissing { .. } => DifferenceKind::ClassesMissing,
            Self::ClassesAdded { .. } => DifferenceKind::ClassesAdded,
            Self::PropertiesMissing { .. } => DifferenceKind::PropertiesMissing,
            Self::MethodsMissing { .. } => DifferenceKind::MethodsMissing,
            Self::PropertyChanged { .. } => DifferenceKind::PropertyChanged,
            Self::RelationshipsMissing { .. } => DifferenceKind::RelationshipsMissing,
            Self::RelationshipsAdded { .. } => DifferenceKind::RelationshipsAdded,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Error { message }
            | Self::ClassesMissing { message, .. }
            | Self::ClassesAdded { message, .. }
            | Self::PropertiesMissing { message, .. }
            | Self::MethodsMissing { message, .. }
            | Self::PropertyChanged { message, .. }
            | Self::RelationshipsMissing { message, .. }
            | Self::RelationshipsAdded { message, .. } => message,
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

fn join_relationships(relationships: &[Relationship]) -> String {
    relationships.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Knobs for [`compare_sources_with`] and [`diff_models_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    pub rename_hints: bool,
    pub min_similarity: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self { rename_hints: true, min_similarity: DEFAULT_MIN_SIMILARITY }
    }
}

/// Class names of `classes` absent from `other`, first occurrence only.
fn classes_absent_from(classes: &[ClassEntity], other: &ClassDiagramModel) -> Vec<String> {
    let mut names = Vec::<String>::new();
    for class in classes {
        if !other.has_class(class.name()) && !names.iter().any(|name| name == class.name()) {
            names.push(class.name().to_owned());
        }
    }
    names
}

fn relationships_absent_from(
    relationships: &[Relationship],
    other: &ClassDiagramModel,
) -> Vec<Relationship> {
    let mut absent = Vec::<Relationship>::new();
    for relationship in relationships {
        if !other.contains_relationship(relationship)
            && !absent.iter().any(|seen| seen.same_link(relationship))
        {
            absent.push(relationship.clone());
        }
    }
    absent
}

fn diff_members(reference: &ClassEntity, candidate: &ClassEntity, out: &mut Vec<Difference>) {
    let missing_properties = reference
        .properties()
        .iter()
        .filter(|property| !candidate.has_property(property.name()))
        // A token read as a property on one side and a method on the other is not "missing".
        .filter(|property| !candidate.has_method(property.name()))
        .cloned()
        .collect::<Vec<_>>();
    if !missing_properties.is_empty() {
        out.push(Difference::properties_missing(reference.name(), missing_properties));
    }

    let missing_methods = reference
        .methods()
        .iter()
        .filter(|method| !candidate.has_method(method))
        .cloned()
        .collect::<Vec<_>>();
    if !missing_methods.is_empty() {
        out.push(Difference::methods_missing(reference.name(), missing_methods));
    }

    for property in reference.properties() {
        let Some(changed) = candidate.property(property.name()) else {
            continue;
        };
        if changed.ty() != property.ty() {
            out.push(Difference::property_changed(
                reference.name(),
                property.name(),
                property.ty(),
                changed.ty(),
            ));
        }
    }
}

/// Compare two extracted models. Rename hints use [`CompareOptions::default`].
pub fn diff_models(reference: &ClassDiagramModel, candidate: &ClassDiagramModel) -> DiffReport {
    diff_models_with(reference, candidate, &CompareOptions::default())
}

/// Compare two extracted models.
///
/// Records are emitted in a fixed order: missing classes, added classes, then per common class
/// (reference order) missing properties, missing methods and changed property types, and
/// finally missing and added relationships.
pub fn diff_models_with(
    reference: &ClassDiagramModel,
    candidate: &ClassDiagramModel,
    options: &CompareOptions,
) -> DiffReport {
    let mut differences = Vec::<Difference>::new();

    let missing_classes = classes_absent_from(reference.classes(), candidate);
    let added_classes = classes_absent_from(candidate.classes(), reference);
    if !missing_classes.is_empty() {
        differences.push(Difference::classes_missing(missing_classes.clone()));
    }
    if !added_classes.is_empty() {
        differences.push(Difference::classes_added(added_classes.clone()));
    }

    let mut compared = Vec::<&str>::new();
    for class in reference.classes() {
        if compared.contains(&class.name()) {
            continue;
        }
        compared.push(class.name());
        if let Some(other) = candidate.class(class.name()) {
            diff_members(class, other, &mut differences);
        }
    }

    let missing_relationships =
        relationships_absent_from(reference.relationships(), candidate);
    if !missing_relationships.is_empty() {
        differences.push(Difference::relationships_missing(missing_relationships));
    }
    let added_relationships = relationships_absent_from(candidate.relationships(), reference);
    if !added_relationships.is_empty() {
        differences.push(Difference::relationships_added(added_relationships));
    }

    debug!(differences = differences.len(); "compared class diagram models");

    let mut report = DiffReport::from_differences(differences);
    if options.rename_hints {
        report.hints = rename_hints(&missing_classes, &added_classes, options.min_similarity);
    }
    report
}

/// Compare two raw `classDiagram` sources. Rename hints use [`CompareOptions::default`].
pub fn compare_sources(reference: &str, candidate: &str) -> DiffReport {
    compare_sources_with(reference, candidate, &CompareOptions::default())
}

/// Compare two raw `classDiagram` sources.
///
/// Blank input on either side short-circuits to a single `error` record. Sources that are
/// equal after trimming are identical without being parsed, even if they are not valid
/// diagrams.
pub fn compare_sources_with(
    reference: &str,
    candidate: &str,
    options: &CompareOptions,
) -> DiffReport {
    let reference = reference.trim();
    let candidate = candidate.trim();

    if reference.is_empty() || candidate.is_empty() {
        debug!("refusing to compare empty diagram source");
        return DiffReport::empty_input();
    }

    if reference == candidate {
        debug!("diagram sources are textually identical");
        return DiffReport::identical();
    }

    let reference = parse_class_diagram(reference);
    let candidate = parse_class_diagram(candidate);
    diff_models_with(&reference, &candidate, options)
}
