use core::hash::BuildHasher;
use core::hash::Hash;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;

use dashmap::DashMap;
use indexmap::IndexMap;

use crate::error::Error;
use crate::hash_code::HashCode;
use crate::hash_table::ChainedHashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used by the reference maps.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else {
        /// Hasher builder used by the reference maps.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    }
}

/// The interface workloads use to drive a key-value container.
///
/// Implemented by [`ChainedHashTable`] and by the reference maps it is
/// benchmarked against, so record loading, the salary rule and the timing
/// harness run unchanged on every container.
///
/// # Examples
///
/// ```rust
/// use chain_hash::ChainedHashTable;
/// use chain_hash::store::KeyValueStore;
///
/// fn fill(store: &mut dyn KeyValueStore<u32, u32>) {
///     for k in 0..10 {
///         store.put(k, k * k);
///     }
/// }
///
/// let mut table = ChainedHashTable::new();
/// fill(&mut table);
/// assert_eq!(KeyValueStore::get(&table, &3), Some(9));
/// ```
pub trait KeyValueStore<K, V> {
    /// Short display name used in reports.
    fn name(&self) -> &'static str;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: K, value: V);

    /// Returns a copy of the value stored under `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// Returns the number of resident keys.
    fn len(&self) -> usize;

    /// Returns `true` if no key is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of every resident key, in no particular order.
    fn keys(&self) -> Vec<K>;
}

impl<K, V> KeyValueStore<K, V> for ChainedHashTable<K, V>
where
    K: HashCode + Eq + Clone,
    V: Clone,
{
    fn name(&self) -> &'static str {
        "ChainedHashTable"
    }

    fn put(&mut self, key: K, value: V) {
        ChainedHashTable::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        ChainedHashTable::get(self, key).cloned()
    }

    fn len(&self) -> usize {
        ChainedHashTable::len(self)
    }

    fn keys(&self) -> Vec<K> {
        ChainedHashTable::keys(self).cloned().collect()
    }
}

impl<K, V, S> KeyValueStore<K, V> for HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn name(&self) -> &'static str {
        "HashMap"
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        HashMap::get(self, key).cloned()
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn keys(&self) -> Vec<K> {
        HashMap::keys(self).cloned().collect()
    }
}

impl<K, V, S> KeyValueStore<K, V> for IndexMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn name(&self) -> &'static str {
        "IndexMap"
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        IndexMap::get(self, key).cloned()
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn keys(&self) -> Vec<K> {
        IndexMap::keys(self).cloned().collect()
    }
}

impl<K, V, S> KeyValueStore<K, V> for DashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn name(&self) -> &'static str {
        "DashMap"
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        DashMap::get(self, key).map(|entry| entry.value().clone())
    }

    fn len(&self) -> usize {
        DashMap::len(self)
    }

    fn keys(&self) -> Vec<K> {
        self.iter().map(|entry| entry.key().clone()).collect()
    }
}

/// Every call takes the lock, even through `&mut self`, so the cost of
/// synchronization shows up in timings. A poisoned lock is recovered: the map
/// holds plain data and is never left half-updated by `put`.
impl<K, V, S> KeyValueStore<K, V> for Mutex<HashMap<K, V, S>>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn name(&self) -> &'static str {
        "Mutex<HashMap>"
    }

    fn put(&mut self, key: K, value: V) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn len(&self) -> usize {
        self.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn keys(&self) -> Vec<K> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

/// The containers a workload can run against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// [`ChainedHashTable`]
    ChainedHashTable,

    /// [`std::collections::HashMap`], unordered
    HashMap,

    /// [`indexmap::IndexMap`], insertion-ordered
    IndexMap,

    /// [`dashmap::DashMap`], concurrent
    DashMap,

    /// [`std::collections::HashMap`] behind a [`Mutex`]
    MutexHashMap,
}

impl StoreKind {
    /// Every store, reference maps first and the chained table last.
    pub const ALL: [StoreKind; 5] = [
        StoreKind::HashMap,
        StoreKind::IndexMap,
        StoreKind::DashMap,
        StoreKind::MutexHashMap,
        StoreKind::ChainedHashTable,
    ];

    /// Display name, matching [`KeyValueStore::name`].
    pub fn name(self) -> &'static str {
        match self {
            Self::ChainedHashTable => "ChainedHashTable",
            Self::HashMap => "HashMap",
            Self::IndexMap => "IndexMap",
            Self::DashMap => "DashMap",
            Self::MutexHashMap => "Mutex<HashMap>",
        }
    }

    /// Creates an empty store of this kind.
    pub fn build<K, V>(self) -> Box<dyn KeyValueStore<K, V>>
    where
        K: HashCode + Hash + Eq + Clone + 'static,
        V: Clone + 'static,
    {
        match self {
            Self::ChainedHashTable => Box::new(ChainedHashTable::<K, V>::new()),
            Self::HashMap => Box::new(HashMap::<K, V, DefaultHashBuilder>::default()),
            Self::IndexMap => Box::new(IndexMap::<K, V, DefaultHashBuilder>::default()),
            Self::DashMap => Box::new(DashMap::<K, V, DefaultHashBuilder>::default()),
            Self::MutexHashMap => Box::new(Mutex::new(
                HashMap::<K, V, DefaultHashBuilder>::default(),
            )),
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StoreKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chainedhashtable" | "chained" => Ok(Self::ChainedHashTable),
            "hashmap" => Ok(Self::HashMap),
            "indexmap" => Ok(Self::IndexMap),
            "dashmap" => Ok(Self::DashMap),
            "mutex<hashmap>" | "mutex" => Ok(Self::MutexHashMap),
            _ => Err(Error::UnknownStore(s.to_string())),
        }
    }
}
