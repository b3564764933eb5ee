//! Partitioned append locks
//!
//! A fixed array of `parking_lot::Mutex<()>`. The partition for a stream is
//! chosen by xxh3 over the stream key, so the mapping is stable for the
//! lifetime of the table and across processes.
//!
//! One partition degenerates to a single store-wide exclusive section.

use parking_lot::{Mutex, MutexGuard};
use streamvault_core::{LockPolicy, StreamKey};
use xxhash_rust::xxh3::xxh3_64;

/// Fixed set of append locks keyed by stream hash.
pub struct PartitionedLocks {
    partitions: Box<[Mutex<()>]>,
}

impl PartitionedLocks {
    /// Create a table with `partitions` locks (at least one).
    pub fn new(partitions: usize) -> Self {
        let partitions = (0..partitions.max(1)).map(|_| Mutex::new(())).collect();
        Self { partitions }
    }

    /// Create a table sized for a lock policy.
    pub fn for_policy(policy: LockPolicy) -> Self {
        Self::new(policy.partitions())
    }

    /// Number of partitions.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Always false; a table has at least one partition.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Partition index for a key.
    #[inline]
    pub fn partition_of(&self, key: &StreamKey) -> usize {
        (xxh3_64(&key.hash_bytes()) % self.partitions.len() as u64) as usize
    }

    /// Acquire the append lock covering `key`.
    #[inline]
    pub fn lock(&self, key: &StreamKey) -> MutexGuard<'_, ()> {
        self.partitions[self.partition_of(key)].lock()
    }
}

impl std::fmt::Debug for PartitionedLocks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionedLocks")
            .field("partitions", &self.len())
            .finish()
    }
}
