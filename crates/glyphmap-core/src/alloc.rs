//! Hash collections used by every cache in the workspace.
//!
//! Caches key on strings or packed integers and are hit on every frame.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_string_keys() {
        let mut map: HashMap<String, u32> = HashMap::new();
        map.insert("0023 0057 normal normal normal 10px monospace".to_owned(), 1);
        assert_eq!(
            map.get("0023 0057 normal normal normal 10px monospace"),
            Some(&1)
        );
    }

    #[test]
    fn test_hashset_packed_keys() {
        let mut set = HashSet::new();
        set.insert((5u64 << 32) | 7);
        assert!(set.contains(&((5u64 << 32) | 7)));
        assert!(!set.contains(&((7u64 << 32) | 5)));
    }
}
