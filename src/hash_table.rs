//! The bucket-chained table at the core of the crate.
//!
//! Layout: a fixed number of buckets chosen at construction, each holding a
//! growable chain of `(masked hash, value)` entries. An element belongs to
//! bucket `masked_hash % bucket_count` and chains keep insertion order.
//!
//! Membership is decided by the masked hash alone. Two values whose masked
//! hashes are equal are the same member, whether or not the policy considers
//! them equal; the second one is rejected by [`HashBucketTable::add`].

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::policy::DefaultPolicy;
use crate::policy::KeyPolicy;
use crate::primes::get_prime;

/// Clears the sign bit so a hash can be reduced modulo the bucket count
/// without sign issues.
const LEFT_31_BITS_MASK: u32 = 0x7FFF_FFFF;

/// Smallest bucket array a table is built with.
pub const MIN_BUCKETS: usize = 4;

/// Errors reported by [`HashBucketTable`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// An argument was out of the accepted range.
    InvalidArgument {
        /// Which argument was rejected.
        what: &'static str,
    },
}

impl core::fmt::Display for SetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SetError::InvalidArgument { what } => write!(f, "invalid argument: {what}"),
        }
    }
}

impl core::error::Error for SetError {}

#[derive(Clone, Debug)]
struct Entry<T> {
    hash: u32,
    value: T,
}

#[derive(Clone, Debug)]
struct Bucket<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Bucket<T> {
    const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, hash: u32) -> Option<usize> {
        self.entries.iter().position(|entry| entry.hash == hash)
    }

    /// Appends `entry`, stepping the chain capacity to the next prime when
    /// the chain is full. An untouched bucket has capacity 0 and bootstraps
    /// through the same step.
    fn push(&mut self, index: usize, entry: Entry<T>) {
        let capacity = self.entries.capacity();
        if self.entries.len() == capacity {
            let target = get_prime(capacity + 1);
            log::trace!("bucket {index}: growing chain capacity {capacity} -> {target}");
            self.entries.reserve_exact(target - self.entries.len());
        }
        self.entries.push(entry);
    }
}

/// A set keyed by the masked hash of a [`KeyPolicy`].
///
/// `HashBucketTable<T, P>` keeps at most one element per masked hash. The
/// bucket array length is fixed when the table is built (at least
/// [`MIN_BUCKETS`]); only the chains inside each bucket grow, in prime-sized
/// steps.
///
/// Iteration visits buckets in array order and each chain in insertion
/// order. Every live element is visited exactly once; no other ordering is
/// promised across different bucket counts or policies.
///
/// ## Example
///
/// ```rust
/// use chained_set::HashBucketTable;
///
/// let mut table: HashBucketTable<&str> = HashBucketTable::with_capacity(16);
/// assert!(table.add("north"));
/// assert!(table.add("south"));
/// assert!(!table.add("north"));
///
/// assert_eq!(table.len(), 2);
/// assert!(table.contains(&"south"));
/// assert!(table.remove(&"south"));
/// assert!(!table.contains(&"south"));
/// ```
#[derive(Clone)]
pub struct HashBucketTable<T, P = DefaultPolicy> {
    // Length is fixed at construction and never zero.
    buckets: Vec<Bucket<T>>,
    count: usize,
    policy: P,
}

impl<T, P> Debug for HashBucketTable<T, P>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, P> HashBucketTable<T, P> {
    /// Creates an empty table with [`MIN_BUCKETS`] buckets.
    pub fn with_policy(policy: P) -> Self {
        Self::with_capacity_and_policy(0, policy)
    }

    /// Creates an empty table with `capacity` buckets.
    ///
    /// The bucket count stays fixed for the life of the table. Values below
    /// [`MIN_BUCKETS`] are raised to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    /// use chained_set::policy::DefaultPolicy;
    ///
    /// let table: HashBucketTable<u32> =
    ///     HashBucketTable::with_capacity_and_policy(0, DefaultPolicy::default());
    /// assert_eq!(table.bucket_count(), 4);
    /// ```
    pub fn with_capacity_and_policy(capacity: usize, policy: P) -> Self {
        let capacity = capacity.max(MIN_BUCKETS);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Bucket::new);
        Self {
            buckets,
            count: 0,
            policy,
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of buckets, fixed at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the policy this table was built with.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Removes every element. Chain allocations are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let mut table: HashBucketTable<u8> = [1, 2, 3].into_iter().collect();
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert!(!table.contains(&1));
    /// ```
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.entries.clear();
        }
        self.count = 0;
    }

    /// Returns an iterator over the elements in bucket order, then chain
    /// order.
    ///
    /// The iterator is [`Clone`], so a partially consumed walk can be
    /// restarted from a saved copy.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: self.buckets.iter(),
            entries: Default::default(),
            remaining: self.count,
        }
    }

    /// Removes every element for which `predicate` returns `true` and
    /// returns how many were removed.
    ///
    /// The predicate sees each live element exactly once, regardless of how
    /// many removals happen during the walk.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let mut table: HashBucketTable<u32> = (0..10).collect();
    /// assert_eq!(table.remove_where(|&x| x % 2 == 0), 5);
    /// assert_eq!(table.len(), 5);
    /// assert!(table.iter().all(|x| x % 2 == 1));
    /// ```
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        for bucket in self.buckets.iter_mut() {
            let before = bucket.entries.len();
            bucket.entries.retain(|entry| !predicate(&entry.value));
            removed += before - bucket.entries.len();
        }
        self.count -= removed;
        removed
    }

    /// Writes the elements, in iteration order, into `destination` starting
    /// at `start`. Copying stops silently when `destination` is full.
    ///
    /// Returns the number of elements written.
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidArgument`] if `start` is past the end of
    /// `destination`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let table: HashBucketTable<u32> = (1..=3).collect();
    /// let mut out = [0u32; 4];
    /// assert_eq!(table.copy_to(&mut out, 2), Ok(2));
    /// assert_eq!(&out[..2], &[0, 0]);
    /// assert!(table.copy_to(&mut out, 5).is_err());
    /// ```
    pub fn copy_to(&self, destination: &mut [T], start: usize) -> Result<usize, SetError>
    where
        T: Clone,
    {
        if start > destination.len() {
            return Err(SetError::InvalidArgument {
                what: "start index is past the end of the destination",
            });
        }

        let mut written = 0;
        for (slot, value) in destination[start..].iter_mut().zip(self.iter()) {
            *slot = value.clone();
            written += 1;
        }
        Ok(written)
    }

    #[inline]
    fn bucket_index(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn find_entry(&self, hash: u32) -> Option<&Entry<T>> {
        let bucket = &self.buckets[self.bucket_index(hash)];
        bucket.position(hash).map(|i| &bucket.entries[i])
    }
}

impl<T, P> HashBucketTable<T, P>
where
    P: KeyPolicy<T>,
{
    /// Builds a table from `iter`, sizing the bucket array to half the
    /// iterator's lower size bound (at least [`MIN_BUCKETS`]).
    pub fn from_iter_with_policy<I>(iter: I, policy: P) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut table = Self::with_capacity_and_policy(lower / 2, policy);
        for value in iter {
            table.add(value);
        }
        table
    }

    /// Returns the policy hash of `item` with the sign bit of its low 32
    /// bits cleared. This is the key the table stores and compares.
    pub fn masked_hash(&self, item: &T) -> u32 {
        (self.policy.hash(item) as u32) & LEFT_31_BITS_MASK
    }

    /// Adds `item` to the table.
    ///
    /// Returns `false` without inserting if an element with the same masked
    /// hash is already present, even if the two values differ.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let mut table: HashBucketTable<i32> = HashBucketTable::new();
    /// assert!(table.add(37));
    /// assert!(!table.add(37));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn add(&mut self, item: T) -> bool {
        let hash = self.masked_hash(&item);
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];

        if let Some(existing) = bucket.position(hash) {
            if !self.policy.equal(&bucket.entries[existing].value, &item) {
                log::debug!(
                    "masked hash {hash:#010x} collided in bucket {index}; rejecting distinct value as duplicate"
                );
            }
            return false;
        }

        bucket.push(index, Entry { hash, value: item });
        self.count += 1;
        true
    }

    /// Removes the element keyed like `item`. Returns whether one was
    /// present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let mut table: HashBucketTable<i32> = HashBucketTable::new();
    /// table.add(1);
    /// assert!(table.remove(&1));
    /// assert!(!table.remove(&1));
    /// ```
    pub fn remove(&mut self, item: &T) -> bool {
        self.take(item).is_some()
    }

    /// Removes and returns the element keyed like `item`, if any.
    ///
    /// The returned value is the stored one, which may differ from `item`
    /// when the two only share a masked hash.
    pub fn take(&mut self, item: &T) -> Option<T> {
        let hash = self.masked_hash(item);
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];
        let position = bucket.position(hash)?;
        let entry = bucket.entries.remove(position);
        self.count -= 1;
        Some(entry.value)
    }

    /// Returns `true` if an element keyed like `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.find_entry(self.masked_hash(item)).is_some()
    }

    /// Returns the stored element keyed like `item`, if any.
    ///
    /// Under [`ByKind`](crate::policy::ByKind) this looks up the registered
    /// element of the same kind.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.find_entry(self.masked_hash(item))
            .map(|entry| &entry.value)
    }
}

impl<T, P> HashBucketTable<T, P>
where
    P: KeyPolicy<T> + Default,
{
    /// Creates an empty table with the default policy and [`MIN_BUCKETS`]
    /// buckets.
    pub fn new() -> Self {
        Self::with_policy(P::default())
    }

    /// Creates an empty table with the default policy and `capacity`
    /// buckets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_policy(capacity, P::default())
    }
}

impl<T, P> Default for HashBucketTable<T, P>
where
    P: KeyPolicy<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> FromIterator<T> for HashBucketTable<T, P>
where
    P: KeyPolicy<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with_policy(iter, P::default())
    }
}

impl<T, P> Extend<T> for HashBucketTable<T, P>
where
    P: KeyPolicy<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

/// An iterator over the elements of a [`HashBucketTable`].
pub struct Iter<'a, T> {
    buckets: core::slice::Iter<'a, Bucket<T>>,
    entries: core::slice::Iter<'a, Entry<T>>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            entries: self.entries.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                self.remaining -= 1;
                return Some(&entry.value);
            }
            self.entries = self.buckets.next()?.entries.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A consuming iterator over the elements of a [`HashBucketTable`].
pub struct IntoIter<T> {
    buckets: alloc::vec::IntoIter<Bucket<T>>,
    entries: alloc::vec::IntoIter<Entry<T>>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                self.remaining -= 1;
                return Some(entry.value);
            }
            self.entries = self.buckets.next()?.entries.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T, P> IntoIterator for HashBucketTable<T, P> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            entries: Vec::new().into_iter(),
            remaining: self.count,
        }
    }
}

impl<'a, T, P> IntoIterator for &'a HashBucketTable<T, P> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Occupancy statistics for a table's buckets.
///
/// Requires the `stats` feature.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct BucketStats {
    /// Number of elements in the table
    pub len: usize,
    /// Number of buckets
    pub buckets: usize,
    /// Buckets holding at least one element
    pub occupied_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Sum of allocated chain capacities, in entries
    pub allocated_entries: usize,
    /// `chain_histogram[n]` is the number of buckets whose chain holds
    /// exactly `n` elements
    pub chain_histogram: Vec<usize>,
}

#[cfg(feature = "stats")]
impl BucketStats {
    /// Mean chain length over occupied buckets.
    pub fn mean_occupied_chain(&self) -> f64 {
        if self.occupied_buckets == 0 {
            0.0
        } else {
            self.len as f64 / self.occupied_buckets as f64
        }
    }

    /// Pretty-print the statistics and the chain-length histogram.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Bucket Statistics ===");
        println!(
            "Population: {} in {}/{} occupied buckets ({:.2} per occupied bucket)",
            self.len,
            self.occupied_buckets,
            self.buckets,
            self.mean_occupied_chain()
        );
        println!(
            "Chains: longest {}, {} entries allocated ({} unused)",
            self.longest_chain,
            self.allocated_entries,
            self.allocated_entries - self.len
        );

        let max = self.chain_histogram.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let ch = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            bar.extend(ch);
            bar
        };

        println!("chain histogram ({} buckets):", self.buckets);
        for (length, &count) in self.chain_histogram.iter().enumerate() {
            println!("{:>3} | {} ({})", length, make_bar(count), count);
        }
    }
}

#[cfg(feature = "stats")]
impl<T, P> HashBucketTable<T, P> {
    /// Returns occupancy statistics for the bucket array.
    pub fn bucket_stats(&self) -> BucketStats {
        let longest_chain = self
            .buckets
            .iter()
            .map(|bucket| bucket.entries.len())
            .max()
            .unwrap_or(0);
        let mut chain_histogram = alloc::vec![0usize; longest_chain + 1];
        let mut occupied_buckets = 0;
        let mut allocated_entries = 0;

        for bucket in self.buckets.iter() {
            let length = bucket.entries.len();
            chain_histogram[length] += 1;
            if length > 0 {
                occupied_buckets += 1;
            }
            allocated_entries += bucket.entries.capacity();
        }

        BucketStats {
            len: self.count,
            buckets: self.buckets.len(),
            occupied_buckets,
            longest_chain,
            allocated_entries,
            chain_histogram,
        }
    }
}
