//! Process-lifetime cache of parsed templates.
//!
//! Parsing is the expensive half of rendering, so parsed instruction streams
//! are retained per `(document type, resource path, content checksum)` key.
//! The checksum covers the template bytes, so editing a template on disk
//! produces a fresh key instead of serving stale output. Inserts are
//! idempotent (re-parsing yields an identical stream), so a plain mutex-backed
//! insert-if-absent map is sufficient.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use reportsmith_config::DocumentType;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::template::{Template, TemplateError};

pub type Checksum = [u8; 32];

/// Compute the cache checksum for template content.
pub fn content_checksum(source: &str) -> Checksum {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.finalize().into()
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct CatalogKey {
    kind: DocumentType,
    path: String,
    checksum: Checksum,
}

/// Injectable template cache. Construct one per process (or per test) and
/// pass it to every render.
#[derive(Debug, Default)]
pub struct TemplateCatalog {
    entries: Mutex<HashMap<CatalogKey, Arc<Template>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed template for `(kind, path, source)`, parsing and
    /// caching it on first use.
    pub fn parse_cached(
        &self,
        kind: DocumentType,
        path: &str,
        source: &str,
    ) -> Result<Arc<Template>, TemplateError> {
        let key = CatalogKey {
            kind,
            path: path.to_string(),
            checksum: content_checksum(source),
        };

        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(template) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(kind = %kind, path, "template cache hit");
            return Ok(Arc::clone(template));
        }

        let template = Arc::new(Template::parse(path, source)?);
        entries.insert(key, Arc::clone(&template));
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(kind = %kind, path, "template cache miss, parsed");
        Ok(template)
    }

    /// Number of lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups that required a parse.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached entry and reset the counters.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
