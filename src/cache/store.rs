//! Bounded environment cache backed by the index file.

use anyhow::Context;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::entry::CacheEntry;
use super::index::{index_file_name, parse_index, render_index};
use crate::error::{Result, ScriptEnvError};
use crate::spec::DependencySpec;

/// Default number of environments kept.
pub const DEFAULT_CAPACITY: usize = 5;

/// LRU collection of built environments under one cache root.
///
/// Entries are ordered least recently used first. Every mutation is
/// flushed to the index before returning.
#[derive(Debug)]
pub struct EnvironmentCache {
    root: PathBuf,
    capacity: usize,
    entries: Vec<CacheEntry>,
}

impl EnvironmentCache {
    /// Load the cache index under `root`.
    ///
    /// A missing or unreadable index yields an empty cache. If the index
    /// holds more entries than `capacity` (the capacity was lowered), the
    /// oldest surplus environments are evicted.
    pub fn load(root: impl Into<PathBuf>, capacity: usize) -> Result<Self> {
        let mut cache = Self::read(root, capacity)?;

        if cache.entries.len() > cache.capacity {
            while cache.entries.len() > cache.capacity {
                cache.evict_oldest();
            }
            cache.persist()?;
        }

        Ok(cache)
    }

    /// Read the cache index without evicting anything.
    ///
    /// Surplus entries beyond `capacity` are kept, for read-only views.
    pub fn read(root: impl Into<PathBuf>, capacity: usize) -> Result<Self> {
        let root = root.into();
        let capacity = capacity.max(1);
        let index_path = root.join(index_file_name());

        let entries = match fs::read_to_string(&index_path) {
            Ok(content) => parse_index(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!("Ignoring unreadable cache index {:?}: {}", index_path, e);
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Loaded {} cache entries from {:?}", entries.len(), index_path);

        Ok(Self {
            root,
            capacity,
            entries,
        })
    }

    /// Cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(index_file_name())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries, least recently used first.
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry built for exactly `spec`.
    pub fn find(&self, spec: &DependencySpec) -> Option<&CacheEntry> {
        self.entries.iter().find(|entry| &entry.spec == spec)
    }

    /// Mark the entry for `spec` most recently used and persist.
    ///
    /// Returns `None` when nothing matches.
    pub fn promote(&mut self, spec: &DependencySpec) -> Result<Option<&CacheEntry>> {
        let Some(position) = self.entries.iter().position(|entry| &entry.spec == spec) else {
            return Ok(None);
        };

        let entry = self.entries.remove(position);
        self.entries.push(entry);
        self.persist()?;

        Ok(self.entries.last())
    }

    /// Add a freshly built environment as most recently used.
    ///
    /// Evicts the least recently used environment first when full, and
    /// returns it.
    pub fn insert(&mut self, entry: CacheEntry) -> Result<Option<CacheEntry>> {
        let mut evicted = None;
        while self.entries.len() >= self.capacity {
            evicted = self.evict_oldest();
        }

        tracing::debug!("Caching environment {:?}", entry.location);
        self.entries.push(entry);
        self.persist()?;

        Ok(evicted)
    }

    /// Drop the least recently used entry and delete its directory.
    ///
    /// A failed delete is logged; the entry is dropped regardless.
    fn evict_oldest(&mut self) -> Option<CacheEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let entry = self.entries.remove(0);

        tracing::info!("Evicting cached environment {:?}", entry.location);
        if let Err(e) = fs::remove_dir_all(&entry.location) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("Failed to delete environment {:?}: {}", entry.location, e);
            }
        }

        Some(entry)
    }

    fn is_indexed(&self, dir: &Path) -> bool {
        self.entries.iter().any(|entry| entry.location == dir)
    }

    /// Rewrite the index file.
    pub fn persist(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))?;
        atomic_write(&self.index_path(), render_index(&self.entries).as_bytes())?;
        Ok(())
    }

    /// First free `env_NN` directory under the root.
    ///
    /// A slot is free when nothing exists there and no entry points at it,
    /// even one whose directory was deleted. Directories orphaned by failed
    /// builds still occupy a slot, so twice the capacity is searched before
    /// giving up.
    pub fn next_environment_dir(&self) -> Result<PathBuf> {
        (1..=self.capacity * 2)
            .map(|n| self.root.join(format!("env_{:02}", n)))
            .find(|dir| !dir.exists() && !self.is_indexed(dir))
            .ok_or_else(|| ScriptEnvError::CacheExhausted {
                root: self.root.clone(),
            })
    }
}

/// Delete the whole cache root.
///
/// Returns `false` when there was nothing to delete.
pub fn clear_cache(root: &Path) -> Result<bool> {
    match fs::remove_dir_all(root) {
        Ok(()) => {
            tracing::info!("Cleared environment cache {:?}", root);
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("Failed to clear cache {:?}", root))
            .into()),
    }
}

/// Write via a temporary sibling file and rename over the target.
fn atomic_write(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;
        file.sync_all().context("Failed to sync file")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
