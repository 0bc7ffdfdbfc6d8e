// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Property type used when the notation does not declare one.
pub const UNTYPED_PROPERTY: &str = "any";

/// Structural model of one `classDiagram` source.
///
/// Both sequences keep source order. Order carries no meaning for diffing but keeps reports
/// stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClassDiagramModel {
    classes: Vec<ClassEntity>,
    relationships: Vec<Relationship>,
}

impl ClassDiagramModel {
    pub fn new(classes: Vec<ClassEntity>, relationships: Vec<Relationship>) -> Self {
        Self { classes, relationships }
    }

    pub fn classes(&self) -> &[ClassEntity] {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut Vec<ClassEntity> {
        &mut self.classes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn relationships_mut(&mut self) -> &mut Vec<Relationship> {
        &mut self.relationships
    }

    /// First class declared under `name` (exact, case-sensitive).
    pub fn class(&self, name: &str) -> Option<&ClassEntity> {
        self.classes.iter().find(|class| class.name() == name)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class(name).is_some()
    }

    pub fn contains_relationship(&self, relationship: &Relationship) -> bool {
        self.relationships.iter().any(|candidate| candidate.same_link(relationship))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.relationships.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassEntity {
    name: String,
    properties: Vec<Property>,
    methods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<String>,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn new_with(
        name: impl Into<String>,
        properties: Vec<Property>,
        methods: Vec<String>,
    ) -> Self {
        Self { name: name.into(), properties, methods, annotations: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Vec<Property> {
        &mut self.properties
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut Vec<String> {
        &mut self.methods
    }

    /// Stereotypes such as `interface` (from `<<interface>>`). Not compared by the differ.
    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut Vec<String> {
        &mut self.annotations
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name() == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|method| method == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Property {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, UNTYPED_PROPERTY)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Relationship {
    from: String,
    to: String,
    #[serde(rename = "type")]
    marker: String,
    #[serde(default)]
    label: String,
}

impl Relationship {
    pub fn new(from: impl Into<String>, marker: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into(), marker: marker.into(), label: String::new() }
    }

    pub fn new_with(
        from: impl Into<String>,
        marker: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self { from: from.into(), to: to.into(), marker: marker.into(), label: label.into() }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Empty when the source carries no `: label` suffix.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> Option<RelationKind> {
        RelationKind::from_marker(&self.marker)
    }

    /// Identity used for diffing: `(from, to, marker)`; the label is ignored.
    pub fn same_link(&self, other: &Relationship) -> bool {
        self.from == other.from && self.to == other.to && self.marker == other.marker
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.marker, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Association,
    Inheritance,
    Composition,
    Aggregation,
    Dependency,
    Link,
    Realization,
}

impl RelationKind {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "-->" | "<--" => Some(Self::Association),
            "<|--" | "--|>" => Some(Self::Inheritance),
            "*--" | "--*" => Some(Self::Composition),
            "o--" | "--o" => Some(Self::Aggregation),
            "..>" | "<.." => Some(Self::Dependency),
            "--" | ".." => Some(Self::Link),
            "<|.." | "..|>" => Some(Self::Realization),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Association => "association",
            Self::Inheritance => "inheritance",
            Self::Composition => "composition",
            Self::Aggregation => "aggregation",
            Self::Dependency => "dependency",
            Self::Link => "link",
            Self::Realization => "realization",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassDiagramModel, ClassEntity, Property, RelationKind, Relationship};

    #[test]
    fn class_entity_lookups_are_case_sensitive() {
        let class = ClassEntity::new_with(
            "Animal",
            vec![Property::new("name", "String"), Property::untyped("age")],
            vec!["makeSound".to_owned()],
        );

        assert_eq!(class.property("name").map(Property::ty), Some("String"));
        assert_eq!(class.property("age").map(Property::ty), Some("any"));
        assert!(class.property("Name").is_none());
        assert!(class.has_method("makeSound"));
        assert!(!class.has_method("makesound"));
    }

    #[test]
    fn relationship_identity_ignores_label() {
        let labelled = Relationship::new_with("Animal", "<|--", "Dog", "is a");
        let bare = Relationship::new("Animal", "<|--", "Dog");
        let reversed = Relationship::new("Dog", "<|--", "Animal");

        assert!(labelled.same_link(&bare));
        assert_ne!(labelled, bare);
        assert!(!reversed.same_link(&bare));

        let model = ClassDiagramModel::new(Vec::new(), vec![labelled]);
        assert!(model.contains_relationship(&bare));
        assert!(!model.contains_relationship(&reversed));
    }

    #[test]
    fn relation_kind_maps_both_marker_directions() {
        assert_eq!(RelationKind::from_marker("<|--"), Some(RelationKind::Inheritance));
        assert_eq!(RelationKind::from_marker("--|>"), Some(RelationKind::Inheritance));
        assert_eq!(RelationKind::from_marker("..|>"), Some(RelationKind::Realization));
        assert_eq!(RelationKind::from_marker("--"), Some(RelationKind::Link));
        assert_eq!(RelationKind::from_marker("==>"), None);
        assert_eq!(Relationship::new("A", "--o", "B").kind(), Some(RelationKind::Aggregation));
    }

    #[test]
    fn property_serializes_type_field() {
        let json = serde_json::to_value(Property::new("name", "String")).expect("serialize");
        assert_eq!(json, serde_json::json!({ "name": "name", "type": "String" }));

        let json = serde_json::to_value(Relationship::new("Animal", "<|--", "Dog"))
            .expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "from": "Animal", "to": "Dog", "type": "<|--", "label": "" })
        );
    }
}
