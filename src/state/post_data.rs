//! Form-post view of a grid.
//!
//! A grid posts one `(name, value)` pair per editor, named
//! `<prefix>[<row id>][<column key>]`. Expanding those names yields a nested
//! tree wrapped in whatever namespace the prefix carries, so the part that
//! belongs to a grid is found by descending its logical key path.

use serde_json::{Map, Value};

use crate::state::grid::{CellKind, EditableGrid};

pub type PostPairs = Vec<(String, String)>;

/// Splits a grid DOM id such as `fields-prices-rows` into its key path.
pub fn input_path(dom_id: &str) -> Vec<String> {
    dom_id
        .split('-')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn post_data(grid: &EditableGrid) -> PostPairs {
    let mut pairs = Vec::new();
    for row in grid.rows() {
        for column in grid.columns() {
            let value = row.value(&column.key);
            // Unchecked checkboxes are not posted.
            if column.kind == CellKind::Checkbox && value.is_empty() {
                continue;
            }
            pairs.push((
                format!("{}[{}][{}]", grid.name_prefix(), row.id, column.key),
                value.to_string(),
            ));
        }
    }
    pairs
}

/// Expands bracketed names into a nested object. `[]` appends under the next
/// numeric key of its parent.
pub fn expand_post_array(pairs: &[(String, String)]) -> Map<String, Value> {
    let mut root = Map::new();
    for (name, value) in pairs {
        let keys = split_name(name);
        insert_path(&mut root, &keys, value);
    }
    root
}

/// Descends `path`; an empty tree or a missing key yields an empty object.
pub fn extract_subtree(tree: &Map<String, Value>, path: &[String]) -> Map<String, Value> {
    let mut node = tree;
    for key in path {
        match node.get(key) {
            Some(Value::Object(child)) => node = child,
            _ => return Map::new(),
        }
    }
    node.clone()
}

fn split_name(name: &str) -> Vec<Option<String>> {
    let Some(open) = name.find('[') else {
        return vec![Some(name.to_string())];
    };

    let mut keys = vec![Some(name[..open].to_string())];
    let mut rest = &name[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            keys.push(Some(stripped.to_string()));
            return keys;
        };
        let key = &stripped[..close];
        keys.push((!key.is_empty()).then(|| key.to_string()));
        rest = &stripped[close + 1..];
    }
    keys
}

fn insert_path(node: &mut Map<String, Value>, keys: &[Option<String>], value: &str) {
    let Some((first, rest)) = keys.split_first() else {
        return;
    };
    let key = first.clone().unwrap_or_else(|| node.len().to_string());

    if rest.is_empty() {
        node.insert(key, Value::String(value.to_string()));
        return;
    }

    let child = node
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !child.is_object() {
        *child = Value::Object(Map::new());
    }
    if let Value::Object(child) = child {
        insert_path(child, rest, value);
    }
}
