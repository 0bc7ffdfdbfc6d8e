// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A class diagram is reduced to classes (with typed properties and method names) and the
//! relationships between them.

pub mod class_ast;

pub use class_ast::{
    ClassDiagramModel, ClassEntity, Property, RelationKind, Relationship, UNTYPED_PROPERTY,
};
