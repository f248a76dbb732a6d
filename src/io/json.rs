use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ToolError};
use crate::model::{Namespace, Tree};

/// Reads a translation file. The namespace name is the file name up to its
/// first `.`.
pub fn read_namespace(path: &Path) -> Result<Namespace> {
    let source = fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&source)?;
    let tree = Tree::from_json(&json).ok_or_else(|| ToolError::InvalidTree {
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), keys = tree.len(), "read translation file");

    Ok(Namespace {
        name: namespace_name(path),
        tree,
    })
}

/// Writes `tree` as pretty-printed JSON with two-space indentation.
pub fn write_tree(path: &Path, tree: &Tree) -> Result<()> {
    let json_string = serde_json::to_string_pretty(tree)?;
    fs::write(path, json_string)?;
    Ok(())
}

pub fn namespace_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_name.split('.').next().unwrap_or_default().to_string()
}
