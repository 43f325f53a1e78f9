use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;

use crate::font::glyph::{FontdueFace, GlyphFace};
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::style::spec::DEFAULT_FONT_ID;

/// Shared, sized font face.
pub type FontHandle = Arc<dyn GlyphFace>;

/// Smallest pixel size the cache will load.
pub const MIN_FONT_PX: u32 = 12;
/// Largest pixel size the cache will load.
pub const MAX_FONT_PX: u32 = 500;
/// Default number of `(font, size)` entries kept alive.
pub const DEFAULT_FONT_CACHE_CAPACITY: usize = 30;

const CAPACITY_ENV: &str = "CAPTIONFX_FONT_CACHE_CAPACITY";
const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// Clamp a requested pixel size into the cacheable range.
pub fn clamp_font_size(size_px: u32) -> u32 {
    size_px.clamp(MIN_FONT_PX, MAX_FONT_PX)
}

/// Resolves a font id into a face at a given pixel size.
pub trait FontSource: Send + Sync {
    /// Load `font_id` at `size_px`, falling back to a default face when the source has one.
    fn load(&self, font_id: &str, size_px: u32) -> CaptionResult<FontHandle>;
}

/// Font cache options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontCacheOpts {
    /// Maximum number of live entries (at least 1).
    pub capacity: usize,
}

impl Default for FontCacheOpts {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_FONT_CACHE_CAPACITY,
        }
    }
}

impl FontCacheOpts {
    /// Defaults, with the capacity overridable through `CAPTIONFX_FONT_CACHE_CAPACITY`.
    pub fn from_env() -> Self {
        let capacity = parse_capacity(std::env::var(CAPACITY_ENV).ok().as_deref())
            .unwrap_or(DEFAULT_FONT_CACHE_CAPACITY);
        Self { capacity }
    }
}

fn parse_capacity(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct FontKey {
    font_id: String,
    size_px: u32,
}

/// Bounded least-recently-used cache of `(font id, pixel size) -> face`.
///
/// The cache is an ordinary value: give each concurrent job its own, or wrap a shared one in a
/// mutex.
pub struct FontCache {
    source: Box<dyn FontSource>,
    entries: HashMap<FontKey, FontHandle>,
    lru: VecDeque<FontKey>,
    capacity: usize,
}

impl FontCache {
    /// Cache over `source` using [`FontCacheOpts::from_env`].
    pub fn new(source: impl FontSource + 'static) -> Self {
        Self::with_opts(source, FontCacheOpts::from_env())
    }

    /// Cache over `source` with explicit options.
    pub fn with_opts(source: impl FontSource + 'static, opts: FontCacheOpts) -> Self {
        Self {
            source: Box::new(source),
            entries: HashMap::new(),
            lru: VecDeque::new(),
            capacity: opts.capacity.max(1),
        }
    }

    /// Fetch a face, loading it on a miss. `size_px` is clamped into `[12, 500]` first.
    pub fn get(&mut self, font_id: &str, size_px: u32) -> CaptionResult<FontHandle> {
        let key = FontKey {
            font_id: font_id.to_owned(),
            size_px: clamp_font_size(size_px),
        };
        if let Some(face) = self.entries.get(&key).cloned() {
            self.touch(&key);
            return Ok(face);
        }

        let face = self.source.load(&key.font_id, key.size_px)?;
        self.insert(key, face.clone());
        Ok(face)
    }

    /// Return `true` when the clamped key is cached.
    pub fn contains(&self, font_id: &str, size_px: u32) -> bool {
        self.entries.contains_key(&FontKey {
            font_id: font_id.to_owned(),
            size_px: clamp_font_size(size_px),
        })
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every cached face.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    fn insert(&mut self, key: FontKey, face: FontHandle) {
        while self.entries.len() >= self.capacity {
            let Some(old) = self.lru.pop_front() else {
                break;
            };
            tracing::debug!(font_id = %old.font_id, size_px = old.size_px, "font cache evict");
            self.entries.remove(&old);
        }
        self.entries.insert(key.clone(), face);
        self.touch(&key);
    }

    fn touch(&mut self, key: &FontKey) {
        if let Some(pos) = self.lru.iter().position(|k| k == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key.clone());
    }
}

impl std::fmt::Debug for FontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// [`FontSource`] reading `{id}.ttf`, `{id}.otf` or `{id}.ttc` from a directory.
#[derive(Clone, Debug)]
pub struct FontDirectory {
    root: PathBuf,
    default_font: String,
}

impl FontDirectory {
    /// Source rooted at `root`, falling back to the `default` font id.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_font: DEFAULT_FONT_ID.to_owned(),
        }
    }

    /// Use `font_id` as the fallback face.
    pub fn with_default_font(mut self, font_id: impl Into<String>) -> Self {
        self.default_font = font_id.into();
        self
    }

    /// First existing `{font_id}.{ttf,otf,ttc}` in the directory.
    pub fn font_path(&self, font_id: &str) -> Option<PathBuf> {
        if font_id.is_empty() || font_id.contains(['/', '\\']) {
            return None;
        }
        FONT_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{font_id}.{ext}")))
            .find(|p| p.is_file())
    }

    /// Sorted ids (file stems) of every font file in the directory.
    pub fn available_fonts(&self) -> CaptionResult<Vec<String>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(dir = %self.root.display(), "font directory missing");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("read font directory '{}'", self.root.display()))
                    .into());
            }
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| anyhow::anyhow!("read font directory entry: {e}"))?
                .path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if !is_font || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_owned());
            }
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

impl FontSource for FontDirectory {
    fn load(&self, font_id: &str, size_px: u32) -> CaptionResult<FontHandle> {
        let path = match self.font_path(font_id) {
            Some(p) => p,
            None => {
                let p = self
                    .font_path(&self.default_font)
                    .ok_or_else(|| CaptionError::font_not_found(font_id))?;
                tracing::warn!(
                    font_id,
                    fallback = %self.default_font,
                    "font not found, using default"
                );
                p
            }
        };

        let bytes = std::fs::read(&path).map_err(|e| {
            CaptionError::font_load(format!("read '{}': {e}", path.display()))
        })?;
        let face = FontdueFace::from_bytes(bytes, size_px as f32)?;
        tracing::debug!(font_id, size_px, path = %path.display(), "font loaded");
        Ok(Arc::new(face))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/font/cache.rs"]
mod tests;
