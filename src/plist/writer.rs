//! Serializer following Xcode's descriptor conventions.
//!
//! Entries render in model order. The object table is the only special
//! case: runs of records sharing an `isa` are wrapped in the familiar
//! `/* Begin ... section */` markers, and the two record kinds Xcode keeps
//! on one line stay on one line.

use super::value::{Atom, Dict, Entry, Value};

/// Record kinds Xcode prints as single-line dictionaries.
const INLINE_ISAS: &[&str] = &["PBXBuildFile", "PBXFileReference"];

pub fn render(root: &Dict) -> String {
    let mut out = String::from("// !$*UTF8*$!\n{\n");
    for entry in root.entries() {
        if entry.key.text == "objects" {
            if let Value::Dict(objects) = &entry.value {
                render_objects(&mut out, objects);
                continue;
            }
        }
        render_entry(&mut out, entry, 1);
    }
    out.push_str("}\n");
    out
}

fn render_objects(out: &mut String, objects: &Dict) {
    indent(out, 1);
    out.push_str("objects = {\n");

    let mut current_isa: Option<&str> = None;
    for entry in objects.entries() {
        let isa = record_isa(entry);
        if current_isa != Some(isa) {
            if let Some(previous) = current_isa {
                section_end(out, previous);
            }
            section_begin(out, isa);
            current_isa = Some(isa);
        }

        indent(out, 2);
        render_atom(out, &entry.key);
        out.push_str(" = ");
        match &entry.value {
            Value::Dict(record) if INLINE_ISAS.contains(&isa) => render_inline_dict(out, record),
            value => render_value(out, value, 2),
        }
        out.push_str(";\n");
    }
    if let Some(previous) = current_isa {
        section_end(out, previous);
    }

    indent(out, 1);
    out.push_str("};\n");
}

fn record_isa(entry: &Entry) -> &str {
    entry
        .value
        .as_dict()
        .and_then(|d| d.get_str("isa"))
        .unwrap_or("")
}

fn section_begin(out: &mut String, isa: &str) {
    out.push_str("\n/* Begin ");
    out.push_str(isa);
    out.push_str(" section */\n");
}

fn section_end(out: &mut String, isa: &str) {
    out.push_str("/* End ");
    out.push_str(isa);
    out.push_str(" section */\n");
}

fn render_entry(out: &mut String, entry: &Entry, depth: usize) {
    indent(out, depth);
    render_atom(out, &entry.key);
    out.push_str(" = ");
    render_value(out, &entry.value, depth);
    out.push_str(";\n");
}

fn render_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Atom(atom) => render_atom(out, atom),
        Value::Array(items) => {
            out.push_str("(\n");
            for item in items {
                indent(out, depth + 1);
                render_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push(')');
        }
        Value::Dict(dict) => {
            out.push_str("{\n");
            for entry in dict.entries() {
                render_entry(out, entry, depth + 1);
            }
            indent(out, depth);
            out.push('}');
        }
    }
}

fn render_inline_dict(out: &mut String, dict: &Dict) {
    out.push('{');
    for entry in dict.entries() {
        render_atom(out, &entry.key);
        out.push_str(" = ");
        match &entry.value {
            Value::Dict(nested) => render_inline_dict(out, nested),
            Value::Array(items) => {
                out.push('(');
                for item in items {
                    render_value(out, item, 0);
                    out.push_str(", ");
                }
                out.push(')');
            }
            Value::Atom(atom) => render_atom(out, atom),
        }
        out.push_str("; ");
    }
    out.push('}');
}

fn render_atom(out: &mut String, atom: &Atom) {
    render_string(out, &atom.text);
    if let Some(annotation) = &atom.annotation {
        out.push_str(" /* ");
        out.push_str(annotation);
        out.push_str(" */");
    }
}

fn render_string(out: &mut String, text: &str) {
    if !needs_quoting(text) {
        out.push_str(text);
        return;
    }
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Xcode leaves a string bare only when it is a non-empty run of
/// alphanumerics, `_`, `.` and `/`; anything else is quoted.
fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || !text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/'))
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}
