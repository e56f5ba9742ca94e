// ---------------------------------------------------------------------------
// FileSystem — owns the tree and the working directory
// ---------------------------------------------------------------------------
//
// Every public method is either a pure query or a single mutation that runs
// all of its checks before touching the tree, so a returned error always
// leaves the tree as it was.
// ---------------------------------------------------------------------------

use indextree::NodeId;

use crate::error::FsError;
use crate::export;
use crate::node::NodeKind;
use crate::path::{parse_path, Anchor, PathPrefix};
use crate::search::Matcher;
use crate::tree::Tree;

/// What a copy/move source path resolved to.
#[derive(Debug, Clone, Copy)]
enum Source {
	File(NodeId),
	Directory(NodeId),
}

pub struct FileSystem {
	tree: Tree,
	cwd: NodeId,
}

impl Default for FileSystem {
	fn default() -> Self {
		Self::new()
	}
}

impl FileSystem {
	pub fn new() -> Self {
		let tree = Tree::new();
		let cwd = tree.root();
		Self { tree, cwd }
	}

	pub fn cwd(&self) -> NodeId {
		self.cwd
	}

	// -- Resolution helpers -----------------------------------------------

	/// Starting directory for `prefix`: root, or cwd lifted by `ups` levels.
	/// Lifting stops at the root.
	fn start(&self, prefix: &PathPrefix) -> NodeId {
		if prefix.anchor == Anchor::Root {
			return self.tree.root();
		}
		let mut node = self.cwd;
		for _ in 0..prefix.ups {
			match self.tree.parent(node) {
				Some(parent) => node = parent,
				None => break,
			}
		}
		node
	}

	/// Walk `path` through directories only. `missing` builds the error for
	/// an absent segment; a file in the way is always `InvalidPath`.
	fn walk_directories(
		&self,
		path: &str,
		missing: impl Fn(&str) -> FsError,
	) -> Result<NodeId, FsError> {
		let prefix = parse_path(path)?;
		let mut node = self.start(&prefix);
		for segment in &prefix.segments {
			let child = self.tree.child(node, segment)?.ok_or_else(|| missing(segment))?;
			if self.tree.kind(child)? != NodeKind::Directory {
				return Err(FsError::InvalidPath(format!("{} is not a directory", segment)));
			}
			node = child;
		}
		Ok(node)
	}

	/// Resolve `path` to a directory, the way `cd` and `ls` do.
	fn navigate(&self, path: &str) -> Result<NodeId, FsError> {
		self.walk_directories(path, |s| FsError::DirectoryDoesNotExist(s.to_string()))
	}

	fn navigate_or_cwd(&self, path: &str) -> Result<NodeId, FsError> {
		if path.is_empty() {
			Ok(self.cwd)
		} else {
			self.navigate(path)
		}
	}

	fn resolve_source(&self, path: &str, recursive: bool) -> Result<Source, FsError> {
		let prefix = parse_path(path)?;
		let mut node = self.start(&prefix);
		let mut file = None;

		for (i, segment) in prefix.segments.iter().enumerate() {
			let child = self
				.tree
				.child(node, segment)?
				.ok_or_else(|| FsError::InvalidPath(segment.clone()))?;
			if self.tree.kind(child)? == NodeKind::File {
				if i != prefix.segments.len() - 1 {
					return Err(FsError::InvalidOperation(
						"File cannot contain a directory".to_string(),
					));
				}
				file = Some(child);
				break;
			}
			node = child;
		}

		match file {
			Some(_) if recursive => Err(FsError::InvalidOperation(
				"Cannot recursively copy/move a file".to_string(),
			)),
			None if !recursive => Err(FsError::InvalidOperation(
				"Cannot non-recursively copy/move a directory".to_string(),
			)),
			Some(file) => Ok(Source::File(file)),
			None => Ok(Source::Directory(node)),
		}
	}

	fn resolve_destination(&self, path: &str) -> Result<NodeId, FsError> {
		self.walk_directories(path, |s| FsError::InvalidPath(s.to_string()))
	}

	fn validate_directory_transfer(&self, src: NodeId, dst: NodeId) -> Result<(), FsError> {
		if src == dst {
			return Err(FsError::InvalidOperation(
				"Cannot copy a directory into itself".to_string(),
			));
		}
		if src == self.tree.root() {
			return Err(FsError::InvalidOperation(
				"Cannot copy the root directory".to_string(),
			));
		}
		if self.tree.is_ancestor(src, dst) {
			return Err(FsError::InvalidOperation(
				"Cannot copy a directory into its own subdirectory".to_string(),
			));
		}
		self.ensure_name_free(src, dst)
	}

	fn ensure_name_free(&self, node: NodeId, dst: NodeId) -> Result<(), FsError> {
		let name = self.tree.name(node)?;
		if self.tree.directory(dst)?.contains(name) {
			return Err(FsError::InvalidOperation(
				"Destination already contains a directory/file with the same name".to_string(),
			));
		}
		Ok(())
	}

	// -- Navigation -------------------------------------------------------

	pub fn pwd(&self) -> Result<String, FsError> {
		self.tree.full_path(self.cwd)
	}

	/// Name of the working directory; empty at the root.
	pub fn cwd_name(&self) -> &str {
		self.tree.name(self.cwd).unwrap_or_default()
	}

	pub fn cd(&mut self, path: &str) -> Result<(), FsError> {
		let target = self.navigate(path)?;
		self.cwd = target;
		tracing::debug!(path, "changed directory");
		Ok(())
	}

	/// Child names of `path` (or of the cwd when `path` is empty), unordered.
	pub fn ls(&self, path: &str) -> Result<Vec<String>, FsError> {
		let dir = self.navigate_or_cwd(path)?;
		self.tree.list_children(dir)
	}

	// -- Entries in the working directory ---------------------------------

	pub fn mkdir(&mut self, name: &str) -> Result<(), FsError> {
		self.tree.create_subdirectory(self.cwd, name)?;
		tracing::debug!(name, "created directory");
		Ok(())
	}

	pub fn rmdir(&mut self, name: &str, recursive: bool) -> Result<(), FsError> {
		if recursive {
			self.tree.remove_subdirectory_recursive(self.cwd, name)?;
		} else {
			self.tree.remove_empty_subdirectory(self.cwd, name)?;
		}
		tracing::debug!(name, recursive, "removed directory");
		Ok(())
	}

	pub fn rm(&mut self, name: &str) -> Result<(), FsError> {
		self.tree.remove_file(self.cwd, name)?;
		tracing::debug!(name, "removed file");
		Ok(())
	}

	pub fn touch(&mut self, name: &str) -> Result<(), FsError> {
		self.tree.create_or_touch_file(self.cwd, name)?;
		Ok(())
	}

	/// Write `message` plus a newline to `name`, creating the file if needed.
	pub fn write_file(&mut self, name: &str, message: &str, append: bool) -> Result<(), FsError> {
		let id = match self.tree.child(self.cwd, name)? {
			Some(id) => id,
			None => self.tree.create_or_touch_file(self.cwd, name)?,
		};
		self.tree.file_mut(id)?.write(message, append);
		tracing::debug!(name, append, bytes = message.len() + 1, "wrote file");
		Ok(())
	}

	pub fn read_file(&self, name: &str) -> Result<String, FsError> {
		let id = self
			.tree
			.child(self.cwd, name)?
			.ok_or_else(|| FsError::FileDoesNotExist(name.to_string()))?;
		Ok(self.tree.file(id)?.content().to_string())
	}

	// -- Search -----------------------------------------------------------

	/// Files under `path` whose content contains `pattern`.
	///
	/// Non-recursive search reports bare file names of direct children.
	/// Recursive search reports `/`-joined paths that start with the searched
	/// directory's own name. `None` means nothing matched.
	pub fn grep(
		&self,
		path: &str,
		pattern: &str,
		recursive: bool,
	) -> Result<Option<Vec<String>>, FsError> {
		let dir = self.navigate_or_cwd(path)?;
		let matcher = Matcher::new(pattern);
		let mut results = Vec::new();

		if recursive {
			let mut trail = Vec::new();
			self.grep_tree(dir, &matcher, &mut trail, &mut results)?;
		} else {
			for (name, id) in self.tree.entries(dir)? {
				if let Some(file) = self.tree.node(id)?.as_file() {
					if matcher.is_match(file.content()) {
						results.push(name);
					}
				}
			}
		}

		if results.is_empty() {
			return Ok(None);
		}
		results.sort();
		Ok(Some(results))
	}

	fn grep_tree(
		&self,
		dir: NodeId,
		matcher: &Matcher,
		trail: &mut Vec<String>,
		results: &mut Vec<String>,
	) -> Result<(), FsError> {
		let name = self.tree.name(dir)?;
		let pushed = !name.is_empty();
		if pushed {
			trail.push(name.to_string());
		}

		for (child_name, id) in self.tree.entries(dir)? {
			match self.tree.kind(id)? {
				NodeKind::File => {
					if matcher.is_match(self.tree.file(id)?.content()) {
						let mut parts = trail.clone();
						parts.push(child_name);
						results.push(parts.join("/"));
					}
				}
				NodeKind::Directory => self.grep_tree(id, matcher, trail, results)?,
			}
		}

		if pushed {
			trail.pop();
		}
		Ok(())
	}

	// -- Copy / move ------------------------------------------------------

	pub fn cp(&mut self, src: &str, dst: &str, recursive: bool) -> Result<(), FsError> {
		let source = self.resolve_source(src, recursive)?;
		let target = self.resolve_destination(dst)?;

		let node = match source {
			Source::File(node) => {
				self.ensure_name_free(node, target)?;
				node
			}
			Source::Directory(node) => {
				self.validate_directory_transfer(node, target)?;
				node
			}
		};
		self.tree.deep_copy(node, target)?;
		tracing::debug!(src, dst, recursive, "copied");
		Ok(())
	}

	pub fn mv(&mut self, src: &str, dst: &str, recursive: bool) -> Result<(), FsError> {
		let source = self.resolve_source(src, recursive)?;
		let target = self.resolve_destination(dst)?;

		let node = match source {
			Source::File(node) => {
				self.ensure_name_free(node, target)?;
				node
			}
			Source::Directory(node) => {
				self.validate_directory_transfer(node, target)?;
				node
			}
		};
		self.tree.detach(node)?;
		self.tree.attach(target, node)?;
		tracing::debug!(src, dst, recursive, "moved");
		Ok(())
	}

	// -- Export -----------------------------------------------------------

	pub fn export_tree(&self, path: &str) -> Result<serde_json::Value, FsError> {
		let dir = self.navigate_or_cwd(path)?;
		export::to_value(&self.tree, dir)
	}

	/// The export document for `path`, ready to be written out.
	pub fn export_json(&self, path: &str) -> Result<String, FsError> {
		let dir = self.navigate_or_cwd(path)?;
		export::to_pretty_json(&self.tree, dir)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sorted(mut v: Vec<String>) -> Vec<String> {
		v.sort();
		v
	}

	#[test]
	fn starts_at_root() {
		let fs = FileSystem::new();
		assert_eq!(fs.pwd().unwrap(), "/");
		assert_eq!(fs.cwd_name(), "");
	}

	#[test]
	fn cd_and_pwd() {
		let mut fs = FileSystem::new();
		fs.mkdir("a").unwrap();
		fs.cd("a").unwrap();
		fs.mkdir("b").unwrap();
		fs.cd("b").unwrap();
		assert_eq!(fs.pwd().unwrap(), "/a/b");
		assert_eq!(fs.cwd_name(), "b");

		fs.cd("..").unwrap();
		assert_eq!(fs.pwd().unwrap(), "/a");
		fs.cd("/a/b").unwrap();
		assert_eq!(fs.pwd().unwrap(), "/a/b");
		fs.cd("../../..").unwrap();
		assert_eq!(fs.pwd().unwrap(), "/");
	}

	#[test]
	fn cd_errors() {
		let mut fs = FileSystem::new();
		fs.touch("f").unwrap();
		assert!(matches!(fs.cd("nope").unwrap_err(), FsError::DirectoryDoesNotExist(_)));
		assert!(matches!(fs.cd("f").unwrap_err(), FsError::InvalidPath(_)));
		assert!(matches!(fs.cd("").unwrap_err(), FsError::InvalidPath(_)));
		assert_eq!(fs.pwd().unwrap(), "/");
	}

	#[test]
	fn dotted_paths_reach_same_directory() {
		let mut fs = FileSystem::new();
		fs.mkdir("a").unwrap();
		fs.cd("a").unwrap();
		fs.mkdir("b").unwrap();
		fs.cd("/").unwrap();

		fs.cd("./a/./b").unwrap();
		let first = fs.cwd();
		fs.cd("/").unwrap();
		fs.cd("a/b").unwrap();
		assert_eq!(fs.cwd(), first);
	}

	#[test]
	fn ls_defaults_to_cwd() {
		let mut fs = FileSystem::new();
		fs.mkdir("d").unwrap();
		fs.touch("f").unwrap();
		assert_eq!(sorted(fs.ls("").unwrap()), vec!["d", "f"]);
		assert!(fs.ls("d").unwrap().is_empty());
	}

	#[test]
	fn mkdir_only_creates_direct_children() {
		let mut fs = FileSystem::new();
		fs.mkdir("a").unwrap();
		assert!(matches!(fs.mkdir("a/b").unwrap_err(), FsError::InvalidName(_)));
	}

	#[test]
	fn write_and_read() {
		let mut fs = FileSystem::new();
		fs.write_file("f", "hello", false).unwrap();
		fs.write_file("f", "world", true).unwrap();
		assert_eq!(fs.read_file("f").unwrap(), "hello\nworld\n");
		fs.write_file("f", "reset", false).unwrap();
		assert_eq!(fs.read_file("f").unwrap(), "reset\n");
	}

	#[test]
	fn file_ops_reject_directories() {
		let mut fs = FileSystem::new();
		fs.mkdir("d").unwrap();
		assert!(matches!(fs.write_file("d", "x", false).unwrap_err(), FsError::InvalidPath(_)));
		assert!(matches!(fs.read_file("d").unwrap_err(), FsError::InvalidPath(_)));
		assert!(matches!(fs.read_file("missing").unwrap_err(), FsError::FileDoesNotExist(_)));
	}

	#[test]
	fn grep_flat_and_recursive() {
		let mut fs = FileSystem::new();
		fs.write_file("top", "needle", false).unwrap();
		fs.mkdir("x").unwrap();
		fs.cd("x").unwrap();
		fs.mkdir("y").unwrap();
		fs.cd("y").unwrap();
		fs.write_file("f.txt", "...needle...", false).unwrap();
		fs.write_file("g.txt", "hay", false).unwrap();
		fs.cd("/").unwrap();

		assert_eq!(fs.grep("/", "needle", false).unwrap(), Some(vec!["top".to_string()]));
		assert_eq!(
			fs.grep("/", "needle", true).unwrap(),
			Some(vec!["top".to_string(), "x/y/f.txt".to_string()])
		);
		assert_eq!(
			fs.grep("x", "needle", true).unwrap(),
			Some(vec!["x/y/f.txt".to_string()])
		);
		assert_eq!(fs.grep("x", "needle", false).unwrap(), None);
		assert_eq!(fs.grep("/", "absent", true).unwrap(), None);
	}

	#[test]
	fn cp_file_keeps_source() {
		let mut fs = FileSystem::new();
		fs.mkdir("dst").unwrap();
		fs.write_file("f", "data", false).unwrap();
		fs.cp("f", "dst", false).unwrap();

		assert_eq!(fs.read_file("f").unwrap(), "data\n");
		fs.cd("dst").unwrap();
		assert_eq!(fs.read_file("f").unwrap(), "data\n");
	}

	#[test]
	fn cp_flag_must_match_kind() {
		let mut fs = FileSystem::new();
		fs.mkdir("d").unwrap();
		fs.touch("f").unwrap();
		assert!(matches!(fs.cp("f", "d", true).unwrap_err(), FsError::InvalidOperation(_)));
		assert!(matches!(fs.cp("d", "/", false).unwrap_err(), FsError::InvalidOperation(_)));
	}

	#[test]
	fn mv_directory_relinks_and_keeps_cwd() {
		let mut fs = FileSystem::new();
		fs.mkdir("a").unwrap();
		fs.mkdir("b").unwrap();
		fs.cd("a").unwrap();
		fs.mkdir("inner").unwrap();
		fs.cd("inner").unwrap();
		let inner = fs.cwd();

		fs.mv("/a", "/b", true).unwrap();
		assert_eq!(fs.cwd(), inner);
		assert_eq!(fs.pwd().unwrap(), "/b/a/inner");
	}

	#[test]
	fn transfer_into_self_is_rejected() {
		let mut fs = FileSystem::new();
		fs.mkdir("a").unwrap();
		fs.cd("a").unwrap();
		fs.mkdir("sub").unwrap();
		fs.cd("/").unwrap();

		for (src, dst) in [("a", "a"), ("a", "a/sub"), ("/", "a")] {
			assert!(matches!(fs.cp(src, dst, true).unwrap_err(), FsError::InvalidOperation(_)));
			assert!(matches!(fs.mv(src, dst, true).unwrap_err(), FsError::InvalidOperation(_)));
		}
		assert_eq!(fs.ls("a").unwrap(), vec!["sub"]);
	}

	#[test]
	fn export_from_subdirectory() {
		let mut fs = FileSystem::new();
		fs.mkdir("d").unwrap();
		fs.cd("d").unwrap();
		fs.write_file("f", "x", false).unwrap();
		fs.cd("/").unwrap();
		assert_eq!(fs.export_tree("d").unwrap(), serde_json::json!({ "f": "x\n" }));
		assert_eq!(fs.export_json("").unwrap(), "{\n    \"d\": {\n        \"f\": \"x\\n\"\n    }\n}\n");
	}
}
