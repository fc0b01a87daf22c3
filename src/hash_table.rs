//! A fixed-capacity hash table with separate chaining.
//!
//! See [`ChainedHashTable`] for the table itself and [`bucket_index`] for how
//! keys are placed.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::hash_code::HashCode;

/// Number of buckets in every [`ChainedHashTable`].
///
/// This is fixed at 2^16 for the lifetime of a table. It must stay a power of
/// two, since [`bucket_index`] masks with `CAPACITY - 1`.
pub const CAPACITY: usize = 1 << 16;

const INDEX_MASK: u32 = (CAPACITY - 1) as u32;

/// Computes the bucket a key lives in.
///
/// The key's [`HashCode`] is folded (`h ^ (h >> 16)`) before being masked to
/// the capacity, so the high half of the code still influences which bucket is
/// chosen. The null key (`None`) has code 0 and always maps to bucket 0.
///
/// # Examples
///
/// ```rust
/// use chain_hash::hash_table::bucket_index;
///
/// assert_eq!(bucket_index(&None::<u32>), 0);
/// assert_eq!(bucket_index(&5u32), 5);
/// // 0x0001_0005 folds to 0x0004 before masking.
/// assert_eq!(bucket_index(&0x0001_0005u32), 4);
/// ```
#[inline(always)]
pub fn bucket_index<Q: HashCode + ?Sized>(key: &Q) -> usize {
    let h = key.hash_code();
    ((h ^ (h >> 16)) & INDEX_MASK) as usize
}

struct Node<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

fn empty_buckets<K, V>() -> Box<[Link<K, V>]> {
    core::iter::repeat_with(|| None).take(CAPACITY).collect()
}

/// Chain length statistics for a [`ChainedHashTable`].
///
/// Only compiled with the `stats` feature (and in tests).
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStats {
    /// Number of entries in the table
    pub entries: usize,
    /// Number of buckets, always [`CAPACITY`]
    pub buckets: usize,
    /// Number of buckets with a non-empty chain
    pub occupied_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Mean length over non-empty chains
    pub mean_chain_len: f64,
    /// Load factor (entries / buckets)
    pub load_factor: f64,
}

#[cfg(any(test, feature = "stats"))]
impl ChainStats {
    /// Pretty-print the chain statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Chained Hash Table Statistics ===");
        println!(
            "Population: {} entries in {} buckets ({:.2}% load factor)",
            self.entries,
            self.buckets,
            self.load_factor * 100.0
        );
        println!(
            "Bucket Usage: {}/{} ({:.2}% occupied)",
            self.occupied_buckets,
            self.buckets,
            if self.buckets == 0 {
                0.0
            } else {
                self.occupied_buckets as f64 / self.buckets as f64 * 100.0
            }
        );
        println!(
            "Chains: longest {}, mean {:.2}",
            self.longest_chain, self.mean_chain_len
        );
    }
}

/// A fixed-capacity hash table using separate chaining.
///
/// `ChainedHashTable<K, V>` keeps exactly [`CAPACITY`] buckets, each the head
/// of a singly linked chain of entries. The table never resizes and has no
/// deletion: entries live until the whole table is dropped. Keys are placed
/// with [`bucket_index`], so a key always resolves to the same chain.
///
/// New keys are inserted at the head of their chain. Storing an existing key
/// again overwrites its value in place without allocating.
///
/// ## Performance Characteristics
///
/// - `put` and `get` cost O(chain length). With a well-distributed
///   [`HashCode`] and fewer entries than buckets that is O(1) expected.
/// - A degenerate [`HashCode`] (for example a constant) places every entry in
///   one chain and makes every operation O(n). This is slow, never incorrect.
/// - **Memory**: `CAPACITY` pointer-sized bucket heads up front, plus one heap
///   node per entry holding the key, the value and a link.
///
/// ## Example
///
/// ```rust
/// use chain_hash::ChainedHashTable;
///
/// let mut salaries = ChainedHashTable::new();
/// salaries.put("EMP00001".to_string(), 4_250.0);
/// salaries.put("EMP00002".to_string(), 12_800.0);
///
/// assert_eq!(salaries.get("EMP00001"), Some(&4_250.0));
/// assert_eq!(salaries.get("EMP99999"), None);
/// ```
pub struct ChainedHashTable<K, V> {
    buckets: Box<[Link<K, V>]>,
    len: usize,
}

impl<K, V> ChainedHashTable<K, V> {
    /// Creates an empty table with [`CAPACITY`] buckets.
    pub fn new() -> Self {
        Self {
            buckets: empty_buckets(),
            len: 0,
        }
    }

    /// Returns the number of buckets, which is always [`CAPACITY`].
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of entries in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table = ChainedHashTable::new();
    /// table.put(1u32, "a");
    /// table.put(1u32, "b");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over all entries.
    ///
    /// Entries are visited bucket by bucket and, within a bucket, from the
    /// chain head. That order is not part of the table's contract.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            node: None,
            remaining: self.len,
        }
    }

    /// Returns an iterator over all entries with mutable access to values.
    ///
    /// Keys stay immutable. Ordering is the same as [`iter`](Self::iter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table = ChainedHashTable::new();
    /// table.put("a", 1);
    /// table.put("b", 2);
    ///
    /// for (_, value) in table.iter_mut() {
    ///     *value *= 10;
    /// }
    ///
    /// assert_eq!(table.get("a"), Some(&10));
    /// assert_eq!(table.get("b"), Some(&20));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            node: None,
            remaining: self.len,
        }
    }

    /// Returns an iterator over all keys.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over all values.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over mutable references to all values.
    pub fn values_mut(&mut self) -> impl ExactSizeIterator<Item = &mut V> {
        self.iter_mut().map(|(_, value)| value)
    }

    /// Returns the length of every chain, indexed by bucket.
    ///
    /// Requires the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|head| Chain { next: head.as_deref() }.count())
            .collect()
    }

    /// Returns the length of the longest chain.
    ///
    /// Requires the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn max_chain_len(&self) -> usize {
        self.chain_lengths().into_iter().max().unwrap_or(0)
    }

    /// Computes a histogram of chain lengths.
    ///
    /// Index `n` of the result holds the number of buckets whose chain has
    /// exactly `n` entries. Requires the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let lengths = self.chain_lengths();
        let longest = lengths.iter().copied().max().unwrap_or(0);
        let mut hist = alloc::vec![0usize; longest + 1];
        for len in lengths {
            hist[len] += 1;
        }
        hist
    }

    /// Returns summary statistics over all chains.
    ///
    /// Requires the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn stats(&self) -> ChainStats {
        let lengths = self.chain_lengths();
        let occupied_buckets = lengths.iter().filter(|&&len| len > 0).count();
        let longest_chain = lengths.iter().copied().max().unwrap_or(0);

        ChainStats {
            entries: self.len,
            buckets: self.buckets.len(),
            occupied_buckets,
            longest_chain,
            mean_chain_len: if occupied_buckets == 0 {
                0.0
            } else {
                self.len as f64 / occupied_buckets as f64
            },
            load_factor: self.len as f64 / self.buckets.len() as f64,
        }
    }

    /// Pretty-prints the chain length histogram using stdout.
    ///
    /// Requires the `stats` and `std` features.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let hist = self.chain_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if self.len == 0 || max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("chain histogram ({} entries):", self.len);
        for (len, &count) in hist.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let width = (count * max_bar).div_ceil(max);
            println!("{len:>4} | {:<max_bar$} {count}", "#".repeat(width));
        }
    }
}

impl<K, V> ChainedHashTable<K, V>
where
    K: HashCode + Eq,
{
    /// Stores `value` under `key`.
    ///
    /// If the key is already present its value is overwritten in place and the
    /// chain is left unchanged. Otherwise a new entry becomes the head of the
    /// key's chain. Never fails: chains grow without bound and the null key
    /// (`None`) is routed to bucket 0 like any other key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table = ChainedHashTable::new();
    /// table.put(Some("alice"), 1);
    /// table.put(None, 2);
    /// table.put(Some("alice"), 3);
    ///
    /// assert_eq!(table.get(&Some("alice")), Some(&3));
    /// assert_eq!(table.get(&None::<&str>), Some(&2));
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn put(&mut self, key: K, value: V) {
        let slot = &mut self.buckets[bucket_index(&key)];

        let mut current = slot.as_deref_mut();
        while let Some(node) = current {
            if node.key == key {
                node.value = value;
                return;
            }
            current = node.next.as_deref_mut();
        }

        let next = slot.take();
        *slot = Some(Box::new(Node { key, value, next }));
        self.len += 1;
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// Returns `None` when the key is absent. A stored value that itself
    /// represents "nothing" (such as `None` in a table of `Option<V>`) comes
    /// back as `Some(&None)`, so the two cases never overlap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::ChainedHashTable;
    /// #
    /// let mut table: ChainedHashTable<u32, Option<f64>> = ChainedHashTable::new();
    /// table.put(1, None);
    ///
    /// assert_eq!(table.get(&1), Some(&None));
    /// assert_eq!(table.get(&2), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: HashCode + Eq + ?Sized,
    {
        let mut current = self.buckets[bucket_index(key)].as_deref();
        while let Some(node) = current {
            if node.key.borrow() == key {
                return Some(&node.value);
            }
            current = node.next.as_deref();
        }
        None
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: HashCode + Eq + ?Sized,
    {
        let mut current = self.buckets[bucket_index(key)].as_deref_mut();
        while let Some(node) = current {
            if node.key.borrow() == key {
                return Some(&mut node.value);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    /// Returns `true` if the table holds an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: HashCode + Eq + ?Sized,
    {
        self.get(key).is_some()
    }
}

impl<K, V> Default for ChainedHashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for ChainedHashTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Clone for ChainedHashTable<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut buckets = empty_buckets();
        let mut chain = Vec::new();

        for (slot, source) in buckets.iter_mut().zip(self.buckets.iter()) {
            chain.extend(Chain {
                next: source.as_deref(),
            });

            // Rebuild from the tail so the clone keeps the original chain order.
            let mut head = None;
            for node in chain.drain(..).rev() {
                head = Some(Box::new(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    next: head,
                }));
            }
            *slot = head;
        }

        Self {
            buckets,
            len: self.len,
        }
    }
}

impl<K, V> Drop for ChainedHashTable<K, V> {
    fn drop(&mut self) {
        // Unlink nodes one at a time; the default recursive drop can overflow
        // the stack on a single very long chain.
        for slot in self.buckets.iter_mut() {
            let mut current = slot.take();
            while let Some(mut node) = current {
                current = node.next.take();
            }
        }
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashTable<K, V>
where
    K: HashCode + Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashTable<K, V>
where
    K: HashCode + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, K, V> IntoIterator for &'a ChainedHashTable<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut ChainedHashTable<K, V> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Walks a single chain from its head.
struct Chain<'a, K, V> {
    next: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node)
    }
}

/// An iterator over the entries of a [`ChainedHashTable`].
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Link<K, V>>,
    node: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            if self.remaining == 0 {
                return None;
            }
            self.node = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`ChainedHashTable`].
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Link<K, V>>,
    node: Option<&'a mut Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node.take() {
                let Node { key, value, next } = node;
                self.node = next.as_deref_mut();
                self.remaining -= 1;
                return Some((&*key, value));
            }
            if self.remaining == 0 {
                return None;
            }
            self.node = self.buckets.next()?.as_deref_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}
