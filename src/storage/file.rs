use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Context, Result};

use super::OverrideStore;
use crate::types::{Override, OverrideRecord, Overrides, RepoId};

/// Overrides kept in one pretty-printed JSON document.
///
/// Each call reads the whole document from disk. Mutations hold a write lock
/// across the read-modify-write cycle and replace the document by renaming a
/// fully written temp file over it.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty document if none exists.
    pub fn init(&self) -> Result<()> {
        let _guard = self.write_guard()?;
        if self.path.exists() {
            // Refuse to start on a document we could not write back.
            self.read_document()?;
            return Ok(());
        }
        log::info!("📄 Creating empty override document {}", self.path.display());
        self.write_document(&Overrides::new())
    }

    pub fn reset_all(&self) -> Result<()> {
        let _guard = self.write_guard()?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, ()>> {
        self.lock
            .read()
            .map_err(|_| anyhow!("override document lock poisoned"))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, ()>> {
        self.lock
            .write()
            .map_err(|_| anyhow!("override document lock poisoned"))
    }

    fn read_document(&self) -> Result<Overrides> {
        match fs::read_to_string(&self.path) {
            Ok(s) => serde_json::from_str(&s)
                .with_context(|| format!("parsing override document {}", self.path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Overrides::new()),
            Err(e) => {
                Err(e).with_context(|| format!("reading override document {}", self.path.display()))
            }
        }
    }

    fn write_document(&self, doc: &Overrides) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

        let body = serde_json::to_string_pretty(doc)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(body.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .with_context(|| format!("replacing override document {}", self.path.display()))?;
        Ok(())
    }
}

impl OverrideStore for JsonFileStore {
    fn get(&self, id: &RepoId) -> Result<Override> {
        let _guard = self.read_guard()?;
        let mut doc = self.read_document()?;
        Ok(doc.remove(id).into())
    }

    fn put(&self, id: &RepoId, text: &str) -> Result<OverrideRecord> {
        let _guard = self.write_guard()?;
        let mut doc = self.read_document()?;
        let record = OverrideRecord::now(text);
        doc.insert(id.clone(), record.clone());
        self.write_document(&doc)?;
        log::debug!("override stored for repository {}", id);
        Ok(record)
    }

    fn delete(&self, id: &RepoId) -> Result<()> {
        let _guard = self.write_guard()?;
        let mut doc = self.read_document()?;
        if doc.remove(id).is_none() {
            return Ok(());
        }
        self.write_document(&doc)?;
        log::debug!("override removed for repository {}", id);
        Ok(())
    }

    fn all(&self) -> Result<Overrides> {
        let _guard = self.read_guard()?;
        self.read_document()
    }
}
