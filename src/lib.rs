// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! classdiff — semantic comparison of Mermaid `classDiagram` sources.
//!
//! A reference diagram and a candidate diagram are reduced to a structural model (classes,
//! typed properties, methods, relationships) and compared into an ordered list of difference
//! records.

pub mod config;
pub mod diff;
pub mod error;
pub mod format;
pub mod model;
pub mod render;

pub use diff::{
    compare_sources, compare_sources_with, diff_models, diff_models_with, CompareOptions,
    DiffReport, Difference, DifferenceKind, RenameHint,
};
pub use error::{ClassDiffError, ConfigError};
pub use format::mermaid::{export_class_diagram, parse_class_diagram};
pub use model::{ClassDiagramModel, ClassEntity, Property, RelationKind, Relationship};
