//! Bounded cache of open chromosome [`Reader`]s.
//!
//! Mirrors `Reader.ch_readers`/`Reader.get_ch_reader` in the reference
//! implementation, generalized from a never-evicting classmethod dict to a
//! cache bounded to the current chromosome and its immediate neighbors in
//! traversal order (spec.md §5) — a session can visit every chromosome over
//! its lifetime, and holding all 25 open at once would multiply the
//! per-chromosome memory cost for no benefit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use core_format::chromosome;
use core_reader::{Reader, ReaderOpenError};

pub struct ReaderCache {
    base_dir: PathBuf,
    readers: HashMap<String, Reader>,
}

impl ReaderCache {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        ReaderCache {
            base_dir: base_dir.as_ref().to_path_buf(),
            readers: HashMap::new(),
        }
    }

    /// Open (if not already cached) and return the reader for `chromosome`,
    /// evicting any cached reader outside the resulting `{prev, current,
    /// next}` window.
    pub fn get_or_open(&mut self, chromosome: &str) -> Result<&mut Reader, ReaderOpenError> {
        if !self.readers.contains_key(chromosome) {
            let reader = Reader::open(chromosome, &self.base_dir)?;
            self.readers.insert(chromosome.to_string(), reader);
            self.evict_around(chromosome);
        }
        Ok(self.readers.get_mut(chromosome).expect("just inserted"))
    }

    /// Chromosome size, without disturbing any cursor state.
    pub fn ch_size(&mut self, chromosome: &str) -> Result<u32, ReaderOpenError> {
        Ok(self.get_or_open(chromosome)?.ch_size())
    }

    fn evict_around(&mut self, current: &str) {
        let mut keep = vec![current.to_string()];
        if let Some(prev) = chromosome::prev(current) {
            keep.push(prev.to_string());
        }
        if let Some(next) = chromosome::next(current) {
            keep.push(next.to_string());
        }
        let before = self.readers.len();
        self.readers.retain(|name, _| keep.contains(name));
        if self.readers.len() != before {
            tracing::debug!(target: "view", kept = ?keep, "evicted chromosome readers outside neighbor window");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sequence(dir: &Path, chromosome: &str, size: u32) {
        let mut bytes = size.to_le_bytes().to_vec();
        bytes.extend(std::iter::repeat(0u8).take(size.div_ceil(4) as usize));
        std::fs::write(dir.join(format!("{chromosome}.bin")), bytes).unwrap();
    }

    #[test]
    fn evicts_readers_outside_neighbor_window() {
        let dir = tempfile::tempdir().unwrap();
        for ch in ["1", "2", "3", "4", "5"] {
            write_sequence(dir.path(), ch, 8);
        }
        let mut cache = ReaderCache::new(dir.path());
        cache.get_or_open("1").unwrap();
        cache.get_or_open("2").unwrap();
        cache.get_or_open("3").unwrap();
        cache.get_or_open("5").unwrap();

        // window around "5" is {"4", "5"} (no "6" on disk, but that's fine:
        // eviction only filters what's already cached); "1"-"3" must be gone.
        assert!(!cache.readers.contains_key("1"));
        assert!(!cache.readers.contains_key("2"));
        assert!(!cache.readers.contains_key("3"));
        assert!(cache.readers.contains_key("5"));
    }

    #[test]
    fn reopening_a_cached_chromosome_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        write_sequence(dir.path(), "1", 8);
        let mut cache = ReaderCache::new(dir.path());
        cache.get_or_open("1").unwrap().jump_to(4);
        assert_eq!(cache.get_or_open("1").unwrap().pos(), 4);
    }
}
