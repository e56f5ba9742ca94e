use indextree::NodeId;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::error::FsError;
use crate::node::Node;
use crate::tree::Tree;

const INDENT: &[u8] = b"    ";

/// Serializes a directory as a nested object: subdirectories become objects,
/// files become their content string. Keys are written in sorted order.
pub struct TreeView<'a> {
    tree: &'a Tree,
    dir: NodeId,
}

impl<'a> TreeView<'a> {
    pub fn new(tree: &'a Tree, dir: NodeId) -> Self {
        Self { tree, dir }
    }
}

impl Serialize for TreeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries = self.tree.entries(self.dir).map_err(S::Error::custom)?;
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, id) in entries {
            match self.tree.node(id).map_err(S::Error::custom)? {
                Node::File(f) => map.serialize_entry(&name, f.content())?,
                Node::Directory(_) => {
                    map.serialize_entry(&name, &TreeView::new(self.tree, id))?
                }
            }
        }
        map.end()
    }
}

pub fn to_value(tree: &Tree, dir: NodeId) -> Result<serde_json::Value, FsError> {
    Ok(serde_json::to_value(TreeView::new(tree, dir))?)
}

/// The export document: 4-space indentation and a trailing newline.
pub fn to_pretty_json(tree: &Tree, dir: NodeId) -> Result<String, FsError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    TreeView::new(tree, dir).serialize(&mut ser)?;
    buf.push(b'\n');
    String::from_utf8(buf)
        .map_err(|e| FsError::InvalidOperation(format!("Export is not UTF-8: {}", e)))
}
