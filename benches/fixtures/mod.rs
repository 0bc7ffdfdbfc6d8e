// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use classdiff::model::{ClassDiagramModel, ClassEntity, Property, Relationship};
use classdiff::DiffReport;

const MARKERS: [&str; 6] = ["<|--", "*--", "o--", "-->", "..>", "..|>"];
const TYPES: [&str; 4] = ["String", "int", "bool", "List~String~"];

pub fn checksum_model(model: &ClassDiagramModel) -> u64 {
    let mut acc = 0u64;
    for class in model.classes() {
        acc = acc.wrapping_mul(131).wrapping_add(class.name().len() as u64);
        for property in class.properties() {
            acc = acc
                .wrapping_mul(131)
                .wrapping_add((property.name().len() + property.ty().len()) as u64);
        }
        acc = acc.wrapping_mul(131).wrapping_add(class.methods().len() as u64);
    }
    for relationship in model.relationships() {
        acc = acc.wrapping_mul(131).wrapping_add(relationship.marker().len() as u64);
    }
    acc
}

pub fn checksum_report(report: &DiffReport) -> u64 {
    report.differences.iter().fold(report.identical as u64, |acc, difference| {
        acc.wrapping_mul(131).wrapping_add(difference.message().len() as u64)
    })
}

pub mod class {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        pub classes: usize,
        pub members: usize,
        pub relationships: usize,
    }

    impl Params {
        pub const fn new(classes: usize, members: usize, relationships: usize) -> Self {
            Self { classes, members, relationships }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        Medium,
        LargeWide,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Medium => "medium",
                Self::LargeWide => "large_wide",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(8, 4, 10),
                Self::Medium => Params::new(40, 8, 60),
                Self::LargeWide => Params::new(200, 24, 400),
            }
        }
    }

    fn class_name(idx: usize) -> String {
        format!("Class{idx:04}")
    }

    pub fn diagram(params: Params) -> ClassDiagramModel {
        assert!(params.classes >= 2, "classes must be >= 2");

        let mut model = ClassDiagramModel::default();
        for idx in 0..params.classes {
            let properties = (0..params.members)
                .map(|member| Property::new(format!("field{member:02}"), TYPES[member % TYPES.len()]))
                .collect();
            let methods = (0..params.members / 2).map(|member| format!("op{member:02}")).collect();
            model.classes_mut().push(ClassEntity::new_with(class_name(idx), properties, methods));
        }

        for idx in 0..params.relationships {
            let from = class_name(idx % params.classes);
            let to = class_name((idx * 7 + 1) % params.classes);
            model.relationships_mut().push(Relationship::new(from, MARKERS[idx % MARKERS.len()], to));
        }

        model
    }

    /// Candidate-side variant: every fifth class renamed, every third property retyped, every
    /// fourth relationship dropped.
    pub fn candidate(params: Params) -> ClassDiagramModel {
        let reference = diagram(params);
        let classes = reference
            .classes()
            .iter()
            .enumerate()
            .map(|(idx, class)| {
                let name = if idx % 5 == 4 {
                    format!("{}s", class.name())
                } else {
                    class.name().to_owned()
                };
                let properties = class
                    .properties()
                    .iter()
                    .enumerate()
                    .map(|(member, property)| {
                        if member % 3 == 2 {
                            Property::new(property.name(), "Object")
                        } else {
                            property.clone()
                        }
                    })
                    .collect();
                ClassEntity::new_with(name, properties, class.methods().to_vec())
            })
            .collect();
        let relationships = reference
            .relationships()
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx % 4 != 3)
            .map(|(_, relationship)| relationship.clone())
            .collect();
        ClassDiagramModel::new(classes, relationships)
    }

    pub fn fixture(case: Case) -> ClassDiagramModel {
        diagram(case.params())
    }
}
