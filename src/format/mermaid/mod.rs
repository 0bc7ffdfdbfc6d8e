// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid-ish reading and writing of `classDiagram` sources.

pub mod class_diagram;

pub use class_diagram::{export_class_diagram, parse_class_diagram, RELATION_MARKERS};
