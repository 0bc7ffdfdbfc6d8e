// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation of diff reports.
//!
//! [`highlight`] attributes candidate lines to difference records; [`text`] turns reports and
//! highlighted listings into terminal output with optional ANSI color.

pub mod highlight;
pub mod text;

pub use highlight::{highlight_lines, HighlightCategory, HighlightedLine};
pub use text::{render_highlighted, render_report_text};
