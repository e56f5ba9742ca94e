// ---------------------------------------------------------------------------
// Directory tree — arena of nodes with name-indexed directories
// ---------------------------------------------------------------------------
//
// The arena owns every node. A directory reaches its children through its
// name index; a child reaches its parent through the arena link, which never
// owns anything. `attach` and `detach` are the only places either side of the
// relation changes.
// ---------------------------------------------------------------------------

use indextree::{Arena, NodeId};

use crate::error::FsError;
use crate::node::{Directory, File, Node, NodeKind};
use crate::path::{join_absolute, validate_name};

pub struct Tree {
	arena: Arena<Node>,
	root: NodeId,
}

impl Default for Tree {
	fn default() -> Self {
		Self::new()
	}
}

impl Tree {
	// -- Constructor ------------------------------------------------------

	pub fn new() -> Self {
		let mut arena = Arena::new();
		let root = arena.new_node(Node::Directory(Directory::new("")));
		Self { arena, root }
	}

	pub fn root(&self) -> NodeId {
		self.root
	}

	// -- Lookup -----------------------------------------------------------

	pub fn node(&self, id: NodeId) -> Result<&Node, FsError> {
		match self.arena.get(id) {
			Some(n) if !n.is_removed() => Ok(n.get()),
			_ => Err(Self::missing(id)),
		}
	}

	fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, FsError> {
		match self.arena.get_mut(id) {
			Some(n) if !n.is_removed() => Ok(n.get_mut()),
			_ => Err(Self::missing(id)),
		}
	}

	fn missing(id: NodeId) -> FsError {
		FsError::InvalidOperation(format!("Internal error: missing node {:?}", id))
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.arena.get(id).and_then(|n| n.parent())
	}

	pub fn name(&self, id: NodeId) -> Result<&str, FsError> {
		Ok(self.node(id)?.name())
	}

	pub fn kind(&self, id: NodeId) -> Result<NodeKind, FsError> {
		Ok(self.node(id)?.kind())
	}

	/// Borrow `id` as a directory, failing with `InvalidPath` otherwise.
	pub fn directory(&self, id: NodeId) -> Result<&Directory, FsError> {
		let node = self.node(id)?;
		node.as_directory()
			.ok_or_else(|| FsError::InvalidPath(format!("{} is not a directory", node.name())))
	}

	/// Borrow `id` as a file, failing with `InvalidPath` otherwise.
	pub fn file(&self, id: NodeId) -> Result<&File, FsError> {
		let node = self.node(id)?;
		node.as_file()
			.ok_or_else(|| FsError::InvalidPath(format!("{} is not a file", node.name())))
	}

	pub fn file_mut(&mut self, id: NodeId) -> Result<&mut File, FsError> {
		let node = self.node_mut(id)?;
		if node.is_directory() {
			return Err(FsError::InvalidPath(format!("{} is not a file", node.name())));
		}
		node.as_file_mut().ok_or_else(|| Self::missing(id))
	}

	fn directory_mut(&mut self, id: NodeId) -> Result<&mut Directory, FsError> {
		let node = self.node_mut(id)?;
		if !node.is_directory() {
			return Err(FsError::InvalidPath(format!("{} is not a directory", node.name())));
		}
		node.as_directory_mut().ok_or_else(|| Self::missing(id))
	}

	pub fn child(&self, dir: NodeId, name: &str) -> Result<Option<NodeId>, FsError> {
		Ok(self.directory(dir)?.child(name))
	}

	/// File bytes, or the number of nodes below a directory.
	pub fn size(&self, id: NodeId) -> Result<usize, FsError> {
		match self.node(id)? {
			Node::File(f) => Ok(f.size()),
			Node::Directory(_) => Ok(id.descendants(&self.arena).count() - 1),
		}
	}

	/// True when `ancestor` is `node` itself or lies on its parent chain.
	pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
		node.ancestors(&self.arena).any(|a| a == ancestor)
	}

	pub fn full_path(&self, id: NodeId) -> Result<String, FsError> {
		let mut names = Vec::new();
		for ancestor in id.ancestors(&self.arena) {
			let name = self.name(ancestor)?;
			if !name.is_empty() {
				names.push(name);
			}
		}
		names.reverse();
		Ok(join_absolute(&names))
	}

	pub fn list_children(&self, dir: NodeId) -> Result<Vec<String>, FsError> {
		Ok(self.directory(dir)?.names().map(str::to_string).collect())
	}

	/// Direct children as `(name, id)` pairs.
	pub fn entries(&self, dir: NodeId) -> Result<Vec<(String, NodeId)>, FsError> {
		Ok(self
			.directory(dir)?
			.children
			.iter()
			.map(|(name, id)| (name.clone(), *id))
			.collect())
	}

	// -- Directory operations ---------------------------------------------

	pub fn create_subdirectory(&mut self, dir: NodeId, name: &str) -> Result<NodeId, FsError> {
		validate_name(name)?;
		if let Some(existing) = self.child(dir, name)? {
			return Err(match self.kind(existing)? {
				NodeKind::Directory => FsError::DirectoryAlreadyExists(name.to_string()),
				NodeKind::File => FsError::FileAlreadyExists(name.to_string()),
			});
		}
		let id = self.arena.new_node(Node::Directory(Directory::new(name)));
		self.attach(dir, id)?;
		Ok(id)
	}

	pub fn remove_empty_subdirectory(&mut self, dir: NodeId, name: &str) -> Result<(), FsError> {
		let id = self.existing_subdirectory(dir, name)?;
		if self.size(id)? > 0 {
			return Err(FsError::DirectoryNotEmpty(name.to_string()));
		}
		self.remove(id)
	}

	pub fn remove_subdirectory_recursive(
		&mut self,
		dir: NodeId,
		name: &str,
	) -> Result<(), FsError> {
		let id = self.existing_subdirectory(dir, name)?;
		self.remove(id)
	}

	pub fn remove_file(&mut self, dir: NodeId, name: &str) -> Result<(), FsError> {
		let id = self
			.child(dir, name)?
			.ok_or_else(|| FsError::FileDoesNotExist(name.to_string()))?;
		if self.kind(id)? != NodeKind::File {
			return Err(FsError::InvalidOperation(format!(
				"Target is not a file: {}",
				name
			)));
		}
		self.remove(id)
	}

	/// Create an empty file, or leave an existing one untouched.
	pub fn create_or_touch_file(&mut self, dir: NodeId, name: &str) -> Result<NodeId, FsError> {
		validate_name(name)?;
		if let Some(existing) = self.child(dir, name)? {
			if self.kind(existing)? == NodeKind::Directory {
				return Err(FsError::InvalidOperation(format!(
					"Directory with name: {} already exists",
					name
				)));
			}
			return Ok(existing);
		}
		let id = self.arena.new_node(Node::File(File::new(name)));
		self.attach(dir, id)?;
		Ok(id)
	}

	fn existing_subdirectory(&self, dir: NodeId, name: &str) -> Result<NodeId, FsError> {
		let id = self
			.child(dir, name)?
			.ok_or_else(|| FsError::DirectoryDoesNotExist(name.to_string()))?;
		if self.kind(id)? != NodeKind::Directory {
			return Err(FsError::InvalidOperation(format!(
				"Target is not a directory: {}",
				name
			)));
		}
		Ok(id)
	}

	// -- Linking primitives -----------------------------------------------

	/// Link a parentless node under `dir`.
	pub(crate) fn attach(&mut self, dir: NodeId, child: NodeId) -> Result<(), FsError> {
		if self.parent(child).is_some() {
			return Err(FsError::InvalidOperation(
				"Internal error: node is still attached".to_string(),
			));
		}
		let name = self.name(child)?.to_string();
		if self.directory(dir)?.contains(&name) {
			return Err(FsError::InvalidOperation(format!(
				"Child already exists: {}",
				name
			)));
		}
		dir.checked_append(child, &mut self.arena)
			.map_err(|e| FsError::InvalidOperation(format!("Cannot attach {}: {}", name, e)))?;
		self.directory_mut(dir)?.children.insert(name, child);
		Ok(())
	}

	/// Unlink `child` from its parent without releasing it.
	pub(crate) fn detach(&mut self, child: NodeId) -> Result<(), FsError> {
		let parent = self.parent(child).ok_or_else(|| {
			FsError::InvalidOperation("Cannot detach the root directory".to_string())
		})?;
		let name = self.name(child)?.to_string();
		self.directory_mut(parent)?.children.remove(&name);
		child.detach(&mut self.arena);
		Ok(())
	}

	/// Detach `id` and release its whole subtree.
	fn remove(&mut self, id: NodeId) -> Result<(), FsError> {
		self.detach(id)?;
		id.remove_subtree(&mut self.arena);
		Ok(())
	}

	// -- Copy ---------------------------------------------------------------

	/// Rebuild `src` (and everything below it) as fresh nodes under `dst`.
	pub fn deep_copy(&mut self, src: NodeId, dst: NodeId) -> Result<NodeId, FsError> {
		let copy = match self.node(src)? {
			Node::File(f) => Node::File(f.clone()),
			Node::Directory(d) => Node::Directory(Directory::new(d.name())),
		};
		let is_dir = copy.is_directory();
		let id = self.arena.new_node(copy);
		self.attach(dst, id)?;

		if is_dir {
			for (_, child) in self.entries(src)? {
				self.deep_copy(child, id)?;
			}
		}
		Ok(id)
	}
}
