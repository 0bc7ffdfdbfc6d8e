// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use crossterm::style::{style, Stylize};

use super::highlight::{HighlightCategory, HighlightedLine};
use crate::diff::DiffReport;

fn paint(text: &str, category: Option<HighlightCategory>, color: bool) -> String {
    match (category, color) {
        (Some(HighlightCategory::Missing), true) => style(text).yellow().to_string(),
        (Some(HighlightCategory::Unexpected), true) => style(text).red().to_string(),
        _ => text.to_owned(),
    }
}

/// Annotated listing of the candidate: a gutter mark (`?` missing, `!` unexpected), the line
/// number and the line itself.
pub fn render_highlighted(lines: &[HighlightedLine], color: bool) -> String {
    let width = lines.last().map(|line| line.line_no.to_string().len()).unwrap_or(1);
    let mut out = String::new();
    for line in lines {
        let gutter = line.category.map(|category| category.gutter()).unwrap_or(' ');
        let text = paint(&line.text, line.category, color);
        let _ = writeln!(out, "{gutter} {:>width$} | {text}", line.line_no);
    }
    out
}

/// Human-readable report: verdict, one bullet per difference, then rename hints.
pub fn render_report_text(report: &DiffReport, color: bool) -> String {
    if report.identical {
        return paint_verdict("identical", color);
    }

    let mut out = paint_verdict(
        &format!("{} difference(s)", report.differences.len()),
        color,
    );
    for difference in &report.differences {
        let category = if difference.kind().is_missing() {
            HighlightCategory::Missing
        } else {
            HighlightCategory::Unexpected
        };
        let _ = writeln!(out, "  - {}", paint(difference.message(), Some(category), color));
    }
    for hint in &report.hints {
        let _ = writeln!(out, "  hint: {}", hint.message);
    }
    out
}

fn paint_verdict(verdict: &str, color: bool) -> String {
    if color {
        format!("{}\n", style(verdict).bold())
    } else {
        format!("{verdict}\n")
    }
}
