//! Settings-form sanitizer
//!
//! [`sanitize`] is a total function from an untrusted form submission to a
//! fully valid [`Settings`]. Malformed fields never produce an error; they
//! degrade to their default value and are reported as [`InputIssue`]s.

use super::{EditorRestrictions, RestrictionKey, Settings};
use crate::rbac::{RoleId, ADMINISTRATOR_ROLE};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref OCTET_RE: Regex = Regex::new(r"%[a-fA-F0-9]{2}").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// A form field that was dropped or degraded during sanitization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputIssue {
    pub field: String,
    pub reason: String,
}

impl InputIssue {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { field: field.into(), reason: reason.into() }
    }
}

impl std::fmt::Display for InputIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Sanitizer output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub settings: Settings,
    pub issues: Vec<InputIssue>,
}

/// Sanitize a raw settings-form submission
///
/// `editable_roles` is the host's set of roles an administrator may target.
/// The administrator role is excluded even if the host lists it.
pub fn sanitize(raw: &Value, editable_roles: &BTreeSet<RoleId>) -> Sanitized {
    let mut issues = Vec::new();
    let empty = serde_json::Map::new();
    let input = match raw.as_object() {
        Some(object) => object,
        None => {
            issues.push(InputIssue::new("form", "submission is not an object"));
            &empty
        }
    };

    // Unchecked checkboxes are simply absent
    let enabled = input.get("enabled").is_some_and(is_truthy);

    let target_roles = sanitize_target_roles(input.get("target_roles"), editable_roles, &mut issues);

    let protected_plugins = sanitize_list(
        input.get("protected_plugins"),
        "protected_plugins",
        &mut issues,
        |item| vec![sanitize_text(item)],
    );

    let protected_patterns = match input.get("protected_patterns") {
        Some(Value::String(text)) => split_patterns(text),
        other => sanitize_list(other, "protected_patterns", &mut issues, split_patterns),
    };

    let editor_restrictions =
        sanitize_editor_restrictions(input.get("editor_restrictions"), &mut issues);

    let custom_css = match input.get("custom_css") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(css)) => sanitize_textarea(css),
        Some(_) => {
            issues.push(InputIssue::new("custom_css", "not text"));
            String::new()
        }
    };

    for issue in &issues {
        log::debug!("Sanitizer degraded field {}", issue);
    }

    Sanitized {
        settings: Settings {
            enabled,
            target_roles,
            protected_plugins,
            protected_patterns,
            editor_restrictions,
            custom_css,
        },
        issues,
    }
}

/// Checkbox semantics: present and not an explicit "off" value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn sanitize_target_roles(
    value: Option<&Value>,
    editable_roles: &BTreeSet<RoleId>,
    issues: &mut Vec<InputIssue>,
) -> Vec<RoleId> {
    let candidates =
        sanitize_list(value, "target_roles", issues, |item| vec![sanitize_text(item)]);

    candidates
        .into_iter()
        .filter(|role| {
            if role == ADMINISTRATOR_ROLE {
                issues.push(InputIssue::new("target_roles", "administrator cannot be targeted"));
                false
            } else if !editable_roles.contains(role) {
                issues.push(InputIssue::new("target_roles", format!("unknown role '{}'", role)));
                false
            } else {
                true
            }
        })
        .collect()
}

/// Sanitize a list field: string items are mapped through `map`, empty
/// results and duplicates are dropped, first occurrence wins
fn sanitize_list<F>(
    value: Option<&Value>,
    field: &str,
    issues: &mut Vec<InputIssue>,
    map: F,
) -> Vec<String>
where
    F: Fn(&str) -> Vec<String>,
{
    let items = match value {
        None | Some(Value::Null) => return vec![],
        Some(Value::Array(items)) => items,
        Some(_) => {
            issues.push(InputIssue::new(field, "not a list"));
            return vec![];
        }
    };

    let mut seen = BTreeSet::new();
    let mut list = Vec::with_capacity(items.len());
    for item in items {
        let Some(text) = item.as_str() else {
            issues.push(InputIssue::new(field, "non-text entry dropped"));
            continue;
        };
        for entry in map(text) {
            if !entry.is_empty() && seen.insert(entry.clone()) {
                list.push(entry);
            }
        }
    }
    list
}

/// Split the comma-separated patterns field
fn split_patterns(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    text.split(',')
        .map(sanitize_text)
        .filter(|pattern| !pattern.is_empty() && seen.insert(pattern.clone()))
        .collect()
}

fn sanitize_editor_restrictions(
    value: Option<&Value>,
    issues: &mut Vec<InputIssue>,
) -> EditorRestrictions {
    let mut restrictions = EditorRestrictions::none();

    match value {
        None | Some(Value::Null) => {}
        Some(Value::Object(flags)) => {
            for key in RestrictionKey::ALL {
                restrictions.set(key, flags.get(key.as_str()).is_some_and(is_truthy));
            }
            for name in flags.keys() {
                if RestrictionKey::from_name(name).is_none() {
                    issues.push(InputIssue::new(
                        "editor_restrictions",
                        format!("unknown key '{}' dropped", name),
                    ));
                }
            }
        }
        Some(_) => issues.push(InputIssue::new("editor_restrictions", "not a map")),
    }

    restrictions.show_drag_handles = true;
    restrictions
}

/// Single-line text sanitizer
///
/// Strips markup tags and percent-encoded octets, collapses all whitespace
/// (line breaks and tabs included) to single spaces and trims. Applied until
/// the text stops changing, so it is idempotent.
pub fn sanitize_text(text: &str) -> String {
    to_fixpoint(text, |current| {
        let stripped = strip_markup(current);
        WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
    })
}

/// Multi-line text sanitizer; like [`sanitize_text`] but keeps line breaks
/// and inner spacing
pub fn sanitize_textarea(text: &str) -> String {
    to_fixpoint(text, |current| strip_markup(current).trim().to_string())
}

fn strip_markup(text: &str) -> String {
    let without_tags = TAG_RE.replace_all(text, "");
    OCTET_RE.replace_all(&without_tags, "").into_owned()
}

fn to_fixpoint(text: &str, pass: impl Fn(&str) -> String) -> String {
    let mut current = text.to_string();
    loop {
        let next = pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
