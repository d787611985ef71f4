//! Hit/miss accounting shared by the frame and texture caches.

/// Running statistics for a grow-only cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute a new entry.
    pub misses: u64,
}

impl CacheStats {
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups served from the cache, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f32 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    /// One-line summary for logs.
    pub fn summary(&self, name: &str, entries: usize) -> String {
        format!(
            "{}: {} entries, {:.1}% hit rate ({} hits, {} misses)",
            name,
            entries,
            self.hit_rate() * 100.0,
            self.hits,
            self.misses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let mut stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.record_miss();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.lookups(), 4);
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(
            stats.summary("TextureCache", 1),
            "TextureCache: 1 entries, 75.0% hit rate (3 hits, 1 misses)"
        );
    }
}
