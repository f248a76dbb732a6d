use std::collections::HashSet;

use tracing::warn;

use crate::model::{EMPTY_VALUE, FlatEntry, Namespace, Node, SheetTable, Tree, WorkbookData};

/// Header of the key column.
pub const KEY_COLUMN: &str = "Key";
/// Separator joining nested keys into one path.
pub const KEY_SEPARATOR: char = '.';

const MAX_SHEET_NAME_LEN: usize = 31;

/// Flattens `tree` into one entry per leaf, in tree order.
///
/// A string leaf whose value is one of `special_strings` is emitted with its
/// own key as the value, and `null` leaves are emitted as [`EMPTY_VALUE`].
pub fn flatten(tree: &Tree, special_strings: &[String]) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    flatten_into(tree, special_strings, None, &mut entries);
    entries
}

fn flatten_into(
    tree: &Tree,
    special_strings: &[String],
    prefix: Option<&str>,
    entries: &mut Vec<FlatEntry>,
) {
    for (key, node) in tree.iter() {
        let path = join_key(prefix, key);
        match node {
            Node::Branch(child) => flatten_into(child, special_strings, Some(&path), entries),
            Node::Leaf(value) if special_strings.contains(value) => {
                entries.push(FlatEntry::new(path, key));
            }
            Node::Leaf(value) => {
                if value.is_empty() {
                    warn!(
                        key = %path,
                        "empty value is written as a blank cell; keys after it are lost when the sheet is read back"
                    );
                }
                entries.push(FlatEntry::new(path, value.as_str()));
            }
            Node::Scalar(value) => entries.push(FlatEntry::new(path, value.to_string())),
            Node::Null => entries.push(FlatEntry::new(path, EMPTY_VALUE)),
        }
    }
}

fn join_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(parent) => format!("{parent}{KEY_SEPARATOR}{key}"),
        None => key.to_string(),
    }
}

/// Rebuilds a nested tree from dot-joined entries. Intermediate levels are
/// created on demand and a repeated key keeps the last value.
pub fn unflatten<'a, I>(entries: I) -> Tree
where
    I: IntoIterator<Item = &'a FlatEntry>,
{
    let mut root = Tree::new();
    for entry in entries {
        let mut segments: Vec<&str> = entry.key.split(KEY_SEPARATOR).collect();
        let leaf_key = segments.pop().unwrap_or_default();

        let mut level = &mut root;
        for segment in segments {
            level = level.branch_mut(segment);
        }
        level.insert(leaf_key, Node::leaf(entry.value.clone()));
    }
    root
}

/// Lays out one sheet per namespace with a `Key` column followed by one
/// column per language. Every language column receives the same values.
pub fn build_workbook(
    namespaces: &[Namespace],
    languages: &[String],
    special_strings: &[String],
) -> WorkbookData {
    let mut sheet_names = SheetNameRegistry::default();

    let mut columns = Vec::with_capacity(languages.len() + 1);
    columns.push(KEY_COLUMN.to_string());
    columns.extend(languages.iter().cloned());

    let tables = namespaces
        .iter()
        .map(|namespace| {
            let rows = flatten(&namespace.tree, special_strings)
                .into_iter()
                .map(|entry| {
                    let mut cells = Vec::with_capacity(columns.len());
                    cells.push(entry.key);
                    cells.extend(std::iter::repeat_n(entry.value, languages.len()));
                    cells
                })
                .collect();

            SheetTable {
                sheet_name: sheet_names.assign(&namespace.name),
                columns: columns.clone(),
                rows,
            }
        })
        .collect();

    WorkbookData { tables }
}

#[derive(Debug, Default)]
struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        if self.used.insert(base.to_lowercase()) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let prefix = truncate_chars(&base, MAX_SHEET_NAME_LEN - suffix.len());
            let candidate = format!("{prefix}{suffix}");
            if self.used.insert(candidate.to_lowercase()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Excel rejects some characters in sheet names and compares them
/// case-insensitively.
fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        return "Sheet".to_string();
    }

    truncate_chars(sanitized, MAX_SHEET_NAME_LEN)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
