// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of classdiff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::OnceLock;

use log::{debug, trace};
use regex::Regex;

use crate::model::{ClassDiagramModel, ClassEntity, Property, Relationship, UNTYPED_PROPERTY};

/// Relation markers, longest first so `<|--` wins over `--`.
pub const RELATION_MARKERS: [&str; 14] = [
    "<|--", "--|>", "<|..", "..|>", "*--", "--*", "o--", "--o", "-->", "<--", "..>", "<..", "--",
    "..",
];

fn class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\bclass[ \t]+(\w+)(?:~[^~\n]*~)?(?:\s*\{([^}]*)\})?").expect("valid class regex")
    })
}

fn standalone_annotation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*<<[ \t]*(\w+)[ \t]*>>[ \t]+(\w+)[ \t]*$")
            .expect("valid annotation regex")
    })
}

fn stereotype_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<<[ \t]*([^<>\n]+?)[ \t]*>>").expect("valid stereotype regex"))
}

fn method_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+)[ \t]*\(").expect("valid method regex"))
}

/// A type token: `int`, `int[]`, `List~String~`, `Map~String, List~int~~`.
const TYPE_PATTERN: &str = r"\w[\w<>\[\]]*(?:~[^~\n]*~[\w<>\[\]]*)*";

fn property_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            &format!(
                r"^(?:[+\-#~][ \t]*)?(?:(?P<lead>{TYPE_PATTERN})[ \t]+)?(?P<name>\w+)(?:[ \t]*:[ \t]*(?P<ty>{TYPE_PATTERN}))?[ \t]*[$*]?$"
            ),
        )
        .expect("valid property regex")
    })
}

fn relationship_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let markers =
            RELATION_MARKERS.iter().map(|marker| regex::escape(marker)).collect::<Vec<_>>().join("|");
        let pattern = format!(
            r#"(\w+)[ \t]*(?:"[^"\n]*"[ \t]*)?({markers})[ \t]*(?:"[^"\n]*"[ \t]*)?(\w+)(?:[ \t]*:[ \t]*([^\n]*))?"#
        );
        Regex::new(&pattern).expect("valid relationship regex")
    })
}

fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("%%")
}

/// Blanks out `%%` comment lines while keeping line numbering intact.
fn strip_comments(input: &str) -> Cow<'_, str> {
    if !input.lines().any(|line| is_comment_line(line.trim_start())) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    for (idx, line) in input.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        if !is_comment_line(line.trim_start()) {
            out.push_str(line);
        }
    }
    Cow::Owned(out)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Splits a class body into member entries: one per line, and per `,`/`;` outside parentheses
/// and `~...~` generics.
fn split_member_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut generics = 0usize;
    let mut start = 0usize;
    let mut prev: Option<char> = None;
    let mut chars = body.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            // `Name~` opens a generic argument list; any other `~` closes one. A leading `~`
            // is package visibility.
            '~' => {
                let after_word = prev.is_some_and(is_word_char);
                let before_word = chars.peek().is_some_and(|&(_, next)| is_word_char(next));
                if after_word && before_word {
                    generics += 1;
                } else {
                    generics = generics.saturating_sub(1);
                }
            }
            '\n' => {
                depth = 0;
                generics = 0;
                entries.push(&body[start..idx]);
                start = idx + 1;
            }
            ',' | ';' if depth == 0 && generics == 0 => {
                entries.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
        prev = Some(ch);
    }
    entries.push(&body[start..]);

    entries
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && !is_comment_line(entry))
        .collect()
}

fn parse_class_body(class: &mut ClassEntity, body: &str) {
    let mut members = Vec::<String>::new();
    for entry in split_member_entries(body) {
        let mut stripped = String::new();
        let mut last = 0usize;
        for caps in stereotype_regex().captures_iter(entry) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            class.annotations_mut().push(name.as_str().to_owned());
            stripped.push_str(&entry[last..whole.start()]);
            last = whole.end();
        }
        stripped.push_str(&entry[last..]);

        let stripped = stripped.trim();
        if !stripped.is_empty() {
            members.push(stripped.to_owned());
        }
    }

    // Methods first: their names must never surface as properties.
    let mut method_names = BTreeSet::<String>::new();
    let mut property_entries = Vec::<&str>::new();
    for entry in &members {
        // One method per entry: the first `name(`; arguments may nest further calls.
        match method_regex().captures(entry).and_then(|caps| caps.get(1)) {
            Some(name) => {
                let name = name.as_str().to_owned();
                method_names.insert(name.clone());
                class.methods_mut().push(name);
            }
            None => property_entries.push(entry),
        }
    }

    for entry in property_entries {
        let Some(caps) = property_regex().captures(entry) else {
            trace!(class = class.name(), entry = entry; "skipping unrecognized member entry");
            continue;
        };
        let Some(name) = caps.name("name").map(|m| m.as_str()) else {
            continue;
        };
        if method_names.contains(name) {
            continue;
        }

        let ty = caps
            .name("ty")
            .or_else(|| caps.name("lead"))
            .map(|m| m.as_str())
            .unwrap_or(UNTYPED_PROPERTY);
        class.properties_mut().push(Property::new(name, ty));
    }
}

/// Folds a repeated declaration of the same class into the first one.
fn merge_class(existing: &mut ClassEntity, other: ClassEntity) {
    for method in other.methods() {
        if !existing.has_method(method) {
            existing.methods_mut().push(method.clone());
        }
        existing.properties_mut().retain(|property| property.name() != method.as_str());
    }
    for property in other.properties() {
        if !existing.has_property(property.name()) && !existing.has_method(property.name()) {
            existing.properties_mut().push(property.clone());
        }
    }
    for annotation in other.annotations() {
        if !existing.annotations().contains(annotation) {
            existing.annotations_mut().push(annotation.clone());
        }
    }
}

fn parse_classes(input: &str) -> Vec<ClassEntity> {
    let mut classes = Vec::<ClassEntity>::new();
    for caps in class_regex().captures_iter(input) {
        let Some(name) = caps.get(1) else {
            continue;
        };

        let mut class = ClassEntity::new(name.as_str());
        if let Some(body) = caps.get(2) {
            parse_class_body(&mut class, body.as_str());
        }

        match classes.iter_mut().find(|existing| existing.name() == class.name()) {
            Some(existing) => merge_class(existing, class),
            None => classes.push(class),
        }
    }

    for caps in standalone_annotation_regex().captures_iter(input) {
        let (Some(annotation), Some(name)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if let Some(class) = classes.iter_mut().find(|class| class.name() == name.as_str()) {
            class.annotations_mut().push(annotation.as_str().to_owned());
        }
    }

    classes
}

fn parse_relationships(input: &str) -> Vec<Relationship> {
    relationship_regex()
        .captures_iter(input)
        .filter_map(|caps| {
            let from = caps.get(1)?.as_str();
            let marker = caps.get(2)?.as_str();
            let to = caps.get(3)?.as_str();
            let label = caps.get(4).map(|m| m.as_str().trim()).unwrap_or_default();
            Some(Relationship::new_with(from, marker, to, label))
        })
        .collect()
}

/// Blanks relationship labels so label text such as `: class member` never reads as a
/// declaration.
fn strip_relationship_labels(input: &str) -> Cow<'_, str> {
    let labels = relationship_regex()
        .captures_iter(input)
        .filter_map(|caps| caps.get(4))
        .filter(|label| !label.as_str().trim().is_empty())
        .map(|label| label.range())
        .collect::<Vec<_>>();
    if labels.is_empty() {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut last = 0usize;
    for range in labels {
        out.push_str(&input[last..range.start]);
        out.extend(std::iter::repeat(' ').take(input[range.clone()].chars().count()));
        last = range.end;
    }
    out.push_str(&input[last..]);
    Cow::Owned(out)
}

/// Extract the structural model of a Mermaid `classDiagram` source.
///
/// This is a best-effort reader, not a validating parser: it never fails. Anything it cannot
/// recognize is skipped, so broken or half-written input yields a partial (possibly empty)
/// model.
///
/// Recognized:
/// - `class <Name>` with an optional `{ ... }` body (one brace level; `~T~` generics ignored)
/// - body members, one per line or separated by `,`/`;`:
///   - methods: `[vis]name(args)[ [:]ReturnType]`, captured by name only
///   - properties: `[vis]name[: Type]` or `[vis]Type name`, typed `any` when untyped
///   - stereotypes `<<interface>>` (also as a standalone `<<interface>> Name` line)
/// - relationships `A <marker> B[ : label]` anywhere in the source, with optional quoted
///   cardinalities around the marker; label text never declares classes
/// - `%%` comment lines are ignored; the `classDiagram` header needs no special handling
pub fn parse_class_diagram(input: &str) -> ClassDiagramModel {
    let source = strip_comments(input);
    let classes = parse_classes(&strip_relationship_labels(&source));
    let relationships = parse_relationships(&source);

    debug!(
        classes = classes.len(),
        relationships = relationships.len();
        "extracted class diagram model"
    );

    ClassDiagramModel::new(classes, relationships)
}

/// Render a model back to `classDiagram` source.
///
/// Properties are written as `+name: Type` (untyped ones as `+name`), methods as `+name()`.
pub fn export_class_diagram(model: &ClassDiagramModel) -> String {
    let mut out = String::from("classDiagram\n");

    for class in model.classes() {
        let has_body = !class.properties().is_empty()
            || !class.methods().is_empty()
            || !class.annotations().is_empty();
        if !has_body {
            let _ = writeln!(out, "    class {}", class.name());
            continue;
        }

        let _ = writeln!(out, "    class {} {{", class.name());
        for annotation in class.annotations() {
            let _ = writeln!(out, "        <<{annotation}>>");
        }
        for property in class.properties() {
            if property.ty() == UNTYPED_PROPERTY {
                let _ = writeln!(out, "        +{}", property.name());
            } else {
                let _ = writeln!(out, "        +{}: {}", property.name(), property.ty());
            }
        }
        for method in class.methods() {
            let _ = writeln!(out, "        +{method}()");
        }
        out.push_str("    }\n");
    }

    for relationship in model.relationships() {
        if relationship.label().is_empty() {
            let _ = writeln!(out, "    {relationship}");
        } else {
            let _ = writeln!(out, "    {relationship} : {}", relationship.label());
        }
    }

    out
}
