//! Specialized collection types

pub use slotmap::{Key, KeyData, SlotMap};

/// Stable numeric form of a slot map key, as sent over the wire
pub fn key_to_u64<K: Key>(key: K) -> u64 {
    key.data().as_ffi()
}

/// Rebuild a key from [`key_to_u64`] output
///
/// The key may be stale; lookups with it simply miss.
pub fn key_from_u64<K: Key>(value: u64) -> K {
    KeyData::from_ffi(value).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    slotmap::new_key_type! {
        struct TestKey;
    }

    #[test]
    fn test_key_round_trip() {
        let mut map: SlotMap<TestKey, &str> = SlotMap::with_key();
        let a = map.insert("a");
        map.remove(a);
        let b = map.insert("b");

        let restored: TestKey = key_from_u64(key_to_u64(b));
        assert_eq!(restored, b);
        assert_eq!(map.get(restored), Some(&"b"));

        let stale: TestKey = key_from_u64(key_to_u64(a));
        assert!(map.get(stale).is_none());
    }
}
