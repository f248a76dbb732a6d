use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Placeholder written for `null` leaves.
pub const EMPTY_VALUE: &str = "-";

/// A node of a translation tree: either a scalar leaf or a nested level.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// String translation value.
    Leaf(String),
    /// Number or boolean, kept as its JSON value.
    Scalar(Value),
    /// Explicit JSON `null`.
    Null,
    /// Nested mapping.
    Branch(Tree),
}

/// Ordered mapping of keys to nodes. Keys are unique within one level and
/// iteration follows insertion order. Equality is order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: IndexMap<String, Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Inserts or replaces the node stored under `key`. A replaced key keeps
    /// its original position.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        self.entries.insert(key.into(), node);
    }

    /// Returns the nested level stored under `key`, creating it when absent.
    /// A leaf stored under `key` is replaced by an empty level.
    pub fn branch_mut(&mut self, key: &str) -> &mut Tree {
        let node = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Node::Branch(Tree::new()));
        if !matches!(node, Node::Branch(_)) {
            *node = Node::Branch(Tree::new());
        }

        match node {
            Node::Branch(tree) => tree,
            _ => unreachable!("entry was just turned into a branch"),
        }
    }

    /// Builds a tree from a parsed JSON value. Returns `None` when the value
    /// is not an object.
    pub fn from_json(value: &Value) -> Option<Tree> {
        match value {
            Value::Object(map) => Some(
                map.iter()
                    .map(|(key, value)| (key.clone(), Node::from_json(value)))
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl FromIterator<(String, Node)> for Tree {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Node {
    pub fn leaf(value: impl Into<String>) -> Self {
        Node::Leaf(value.into())
    }

    /// Arrays become branches keyed by element index.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::String(text) => Node::Leaf(text.clone()),
            Value::Bool(_) | Value::Number(_) => Node::Scalar(value.clone()),
            Value::Array(items) => Node::Branch(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), Node::from_json(item)))
                    .collect(),
            ),
            Value::Object(_) => Node::Branch(Tree::from_json(value).unwrap_or_default()),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(text) => serializer.serialize_str(text),
            Node::Scalar(value) => value.serialize(serializer),
            Node::Null => serializer.serialize_unit(),
            Node::Branch(tree) => tree.serialize(serializer),
        }
    }
}

/// One leaf of a translation tree: its dot-joined key path and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub key: String,
    pub value: String,
}

impl FlatEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single translation file: its namespace name and parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub name: String,
    pub tree: Tree,
}

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Represents all tables required to materialise the Excel workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    pub tables: Vec<SheetTable>,
}

/// Flat entries read from one language column of one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetColumn {
    pub language: String,
    pub entries: Vec<FlatEntry>,
}

/// Everything read from one sheet, column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTranslations {
    pub sheet_name: String,
    pub columns: Vec<SheetColumn>,
}

/// All namespaces of one language, rebuilt from a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageBundle {
    pub language: String,
    pub namespaces: Vec<Namespace>,
}
