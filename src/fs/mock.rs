// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(BTreeSet<String>), // child names
    /// Symbolic link; the target is already resolved against the link's
    /// parent directory.
    Link(PathBuf),
}

/// Hop limit when following links, like the kernel's ELOOP.
const MAX_LINK_HOPS: usize = 40;

/// In-memory filesystem rooted at `"."`.
///
/// Paths are normalised (`./foo` and `foo` are the same entry) and parent
/// directories are created implicitly. Every `read_dir` call is recorded so
/// tests can assert that a walk never listed a pruned directory.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, MockEntry>>>,
    listed: Arc<Mutex<Vec<PathBuf>>>,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &Path) -> PathBuf {
    let norm: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if norm.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        norm
    }
}

/// Join `target` onto `base` lexically, resolving `..` without touching
/// the tree.
fn lexical_join(base: &Path, target: &Path) -> PathBuf {
    let mut out = normalize(base);
    for comp in target.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out = parent_of(&out).unwrap_or_else(|| PathBuf::from("."));
            }
            other => out = normalize(&out.join(other)),
        }
    }
    out
}

fn parent_of(path: &Path) -> Option<PathBuf> {
    if path == Path::new(".") {
        return None;
    }
    Some(normalize(path.parent().unwrap_or(Path::new("."))))
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PathBuf::from("."), MockEntry::Dir(BTreeSet::new()));

        Self {
            entries: Arc::new(Mutex::new(entries)),
            listed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.clone(), MockEntry::File(content.into()));
        Self::link_to_parent(&mut entries, &path);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut entries = self.entries.lock().unwrap();
        Self::ensure_dir(&mut entries, &path);
    }

    /// Add a symbolic link at `path`. A relative `target` is taken relative
    /// to the directory containing the link.
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let parent = parent_of(&path).unwrap_or_else(|| PathBuf::from("."));
        let target = lexical_join(&parent, target.as_ref());
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.clone(), MockEntry::Link(target));
        Self::link_to_parent(&mut entries, &path);
    }

    /// Directories passed to `read_dir`, in call order.
    pub fn listed_dirs(&self) -> Vec<PathBuf> {
        self.listed.lock().unwrap().clone()
    }

    pub fn clear_listed(&self) {
        self.listed.lock().unwrap().clear();
    }

    fn ensure_dir(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        if entries.contains_key(path) {
            return;
        }
        entries.insert(path.to_path_buf(), MockEntry::Dir(BTreeSet::new()));
        Self::link_to_parent(entries, path);
    }

    fn link_to_parent(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        let Some(parent) = parent_of(path) else {
            return;
        };
        Self::ensure_dir(entries, &parent);
        if let (Some(MockEntry::Dir(children)), Some(name)) =
            (entries.get_mut(&parent), path.file_name())
        {
            children.insert(name.to_string_lossy().into_owned());
        }
    }

    /// The non-link entry `path` ends up at, if any.
    fn resolve<'a>(
        entries: &'a BTreeMap<PathBuf, MockEntry>,
        path: &Path,
    ) -> Option<&'a MockEntry> {
        let mut key = normalize(path);
        for _ in 0..MAX_LINK_HOPS {
            match entries.get(&key)? {
                MockEntry::Link(target) => key = target.clone(),
                entry => return Some(entry),
            }
        }
        None
    }

    fn unlink_from_parent(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
        if let (Some(parent), Some(name)) = (parent_of(path), path.file_name()) {
            if let Some(MockEntry::Dir(children)) = entries.get_mut(&parent) {
                children.remove(&*name.to_string_lossy());
            }
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let entries = self.entries.lock().unwrap();
        match Self::resolve(&entries, path) {
            Some(MockEntry::File(content)) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(_) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        Self::resolve(&entries, path).is_some()
    }

    fn is_file(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(Self::resolve(&entries, path), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(Self::resolve(&entries, path), Some(MockEntry::Dir(_)))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(entries.get(&normalize(path)), Some(MockEntry::Link(_)))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let key = normalize(path);
        self.listed.lock().unwrap().push(key.clone());

        let entries = self.entries.lock().unwrap();
        match Self::resolve(&entries, &key) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let key = normalize(path);
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&key) {
            Some(MockEntry::File(_)) | Some(MockEntry::Link(_)) => {
                entries.remove(&key);
                Self::unlink_from_parent(&mut entries, &key);
                Ok(())
            }
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let key = normalize(path);
        let mut entries = self.entries.lock().unwrap();
        if !matches!(entries.get(&key), Some(MockEntry::Dir(_))) {
            return Err(anyhow!("Not a directory or not found: {:?}", path));
        }
        entries.retain(|p, _| !p.starts_with(&key));
        Self::unlink_from_parent(&mut entries, &key);
        Ok(())
    }
}
