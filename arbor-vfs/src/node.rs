use std::collections::HashMap;

use indextree::NodeId;

/// Variant tag of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// A leaf holding a text buffer.
#[derive(Debug, Clone, Default)]
pub struct File {
    name: String,
    content: String,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Byte length of the content.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Write one line. Overwrite clears the buffer first.
    pub fn write(&mut self, message: &str, append: bool) {
        if !append {
            self.content.clear();
        }
        self.content.push_str(message);
        self.content.push('\n');
    }
}

/// An interior node. `children` is the name index over the node's arena
/// children; the two are only changed together by `Tree::attach`/`Tree::detach`.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    name: String,
    pub(crate) children: HashMap<String, NodeId>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    File(File),
    Directory(Directory),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Directory(d) => d.name(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File(_) => NodeKind::File,
            Self::Directory(_) => NodeKind::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Self::File(f) => Some(f),
            Self::Directory(_) => None,
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut File> {
        match self {
            Self::File(f) => Some(f),
            Self::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Self::Directory(d) => Some(d),
            Self::File(_) => None,
        }
    }

    pub(crate) fn as_directory_mut(&mut self) -> Option<&mut Directory> {
        match self {
            Self::Directory(d) => Some(d),
            Self::File(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_replaces_and_terminates_line() {
        let mut f = File::new("notes");
        f.write("old", false);
        f.write("hello", false);
        assert_eq!(f.content(), "hello\n");
        assert_eq!(f.size(), 6);
    }

    #[test]
    fn append_keeps_previous_lines() {
        let mut f = File::new("log");
        f.write("one", true);
        f.write("two", true);
        assert_eq!(f.content(), "one\ntwo\n");
    }

    #[test]
    fn variant_queries() {
        let file = Node::File(File::new("f"));
        let dir = Node::Directory(Directory::new("d"));
        assert_eq!(file.kind(), NodeKind::File);
        assert_eq!(dir.kind(), NodeKind::Directory);
        assert!(file.as_directory().is_none());
        assert_eq!(dir.as_directory().map(Directory::name), Some("d"));
        assert!(dir.is_directory());
    }
}
