//! Shard assignment.

use std::num::NonZeroUsize;

use crate::{GroupIdentity, OrderingKey};

/// Maps a key to a shard index in `0..shards`.
///
/// Only the group identity is hashed, so every record of a group lands on
/// the same shard. The hash is BLAKE3 over the rendered identity, which is
/// stable across runs, processes and platforms.
#[must_use]
pub fn partition(key: &OrderingKey, shards: NonZeroUsize) -> usize {
    partition_identity(key.group_identity(), shards)
}

/// Maps a group identity to a shard index in `0..shards`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn partition_identity(identity: &GroupIdentity, shards: NonZeroUsize) -> usize {
    let hash = blake3::hash(identity.as_str().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    (u64::from_le_bytes(prefix) % shards.get() as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsfold_types::Columns;

    fn key(symbol: &str, period: &str, sort_value: f64) -> OrderingKey {
        OrderingKey::new(
            GroupIdentity::new("", symbol, period).unwrap(),
            sort_value,
            Columns::ALL,
        )
    }

    #[test]
    fn test_single_shard() {
        let one = NonZeroUsize::new(1).unwrap();
        assert_eq!(partition(&key("SPX", "2015-01", 1.0), one), 0);
    }

    #[test]
    fn test_sort_value_does_not_affect_shard() {
        let shards = NonZeroUsize::new(7).unwrap();
        let a = key("SPX", "2015-01", 1.0);
        let b = key("SPX", "2015-01", 9_999.0);
        assert_eq!(partition(&a, shards), partition(&b, shards));
    }

    #[test]
    fn test_groups_spread_over_shards() {
        let shards = NonZeroUsize::new(4).unwrap();
        let mut seen = [false; 4];
        for month in 1..=48 {
            let k = key("SPX", &format!("{}-{:02}", 2000 + month / 12, month % 12 + 1), 0.0);
            seen[partition(&k, shards)] = true;
        }
        assert!(seen.iter().all(|used| *used));
    }
}
