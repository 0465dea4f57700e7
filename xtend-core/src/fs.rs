//! Filesystem access used by metadata discovery and the generators.
//!
//! Generators never touch `std::fs` directly: they go through a
//! [`Filesystem`] so tests can run against [`MemoryFs`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// The filesystem primitives needed by a generation run.
pub trait Filesystem {
    /// `true` if `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// `true` if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the regular files directly inside `dir`, sorted.
    ///
    /// Returns `Ok(None)` when `dir` does not exist. Any other failure is
    /// propagated.
    fn list_files(&self, dir: &Path) -> io::Result<Option<Vec<String>>>;

    /// Like [`list_files`](Self::list_files) but descends into
    /// subdirectories. Names are relative to `dir`, sorted.
    fn list_files_recursive(&self, dir: &Path) -> io::Result<Option<Vec<PathBuf>>>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write `contents` to `path`. The parent directory must exist.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Copy `from` to `to` byte-for-byte. The parent of `to` must exist.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> io::Result<Option<Vec<String>>> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Non UTF-8 names can never match a skeleton suffix.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(Some(names))
    }

    fn list_files_recursive(&self, dir: &Path) -> io::Result<Option<Vec<PathBuf>>> {
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut files = Vec::new();
        let mut stack = vec![dir.to_path_buf()];
        while let Some(current) = stack.pop() {
            for entry in std::fs::read_dir(&current)? {
                let entry = entry?;
                let file_type = entry.file_type()?;
                let path = entry.path();
                if file_type.is_dir() {
                    stack.push(path);
                } else if file_type.is_file() {
                    if let Ok(relative) = path.strip_prefix(dir) {
                        files.push(relative.to_path_buf());
                    }
                }
            }
        }
        files.sort();
        Ok(Some(files))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::copy(from, to).map(|_| ())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// An in-memory filesystem tree.
///
/// Mirrors the `std::fs` rules the generators depend on: writing into a
/// missing directory fails with `NotFound`.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.insert_dirs(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.into()));
    }

    /// Add a directory and all of its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.insert_dirs(path.as_ref());
    }

    /// The contents of a file as UTF-8, if it exists.
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Paths of every file in the tree, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.nodes
            .borrow()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn insert_dirs(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.is_dir(parent),
            _ => true,
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}: no such file or directory", path.display()),
        )
    }
}

impl Filesystem for MemoryFs {
    fn is_file(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(path), Some(Node::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(path), Some(Node::Dir))
    }

    fn list_files(&self, dir: &Path) -> io::Result<Option<Vec<String>>> {
        if !self.is_dir(dir) {
            return Ok(None);
        }
        let names = self
            .nodes
            .borrow()
            .iter()
            .filter(|(path, node)| matches!(node, Node::File(_)) && path.parent() == Some(dir))
            .filter_map(|(path, _)| path.file_name()?.to_str().map(str::to_string))
            .collect();
        Ok(Some(names))
    }

    fn list_files_recursive(&self, dir: &Path) -> io::Result<Option<Vec<PathBuf>>> {
        if !self.is_dir(dir) {
            return Ok(None);
        }
        let files = self
            .nodes
            .borrow()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .filter_map(|(path, _)| path.strip_prefix(dir).ok().map(Path::to_path_buf))
            .collect();
        Ok(Some(files))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.nodes.borrow().get(path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            _ => Err(Self::not_found(path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if !self.parent_exists(path) {
            return Err(Self::not_found(path));
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.to_vec()));
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        let bytes = self.read(from)?;
        self.write(to, &bytes)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.insert_dirs(path);
        Ok(())
    }
}
