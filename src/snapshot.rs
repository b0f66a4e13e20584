//! Flattening a table to a linear sequence and rebuilding it.
//!
//! The persisted form of a [`HashBucketTable`] is the ordered sequence of its
//! elements. [`flatten`] produces it and [`rebuild`] replays it through
//! [`HashBucketTable::add`]. A sequence edited outside the table can contain
//! two elements with the same key; rebuild keeps the slot by adding a
//! `T::default()` placeholder in place of the rejected element rather than
//! dropping it silently.
//!
//! [`SerializableSet`] pairs a table with its persisted backing sequence,
//! for hosts that save and load through explicit calls.

use alloc::vec::Vec;
use core::ops::Deref;
use core::ops::DerefMut;

use crate::hash_table::HashBucketTable;
use crate::policy::DefaultPolicy;
use crate::policy::KeyPolicy;

/// Returns the elements of `table` in iteration order.
///
/// # Examples
///
/// ```rust
/// use chained_set::HashBucketTable;
/// use chained_set::snapshot::flatten;
///
/// let table: HashBucketTable<u32> = (0..5).collect();
/// let flat = flatten(&table);
/// assert_eq!(flat.len(), 5);
/// ```
pub fn flatten<T, P>(table: &HashBucketTable<T, P>) -> Vec<T>
where
    T: Clone,
{
    table.iter().cloned().collect()
}

/// Outcome of a [`rebuild`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Elements read from the sequence
    pub seen: usize,
    /// Elements added as themselves
    pub inserted: usize,
    /// Duplicates replaced by a default placeholder that was added
    pub placeholders: usize,
    /// Duplicates whose placeholder was itself already present
    pub dropped: usize,
}

impl RebuildReport {
    /// Returns `true` if every element went in as itself.
    pub fn is_lossless(&self) -> bool {
        self.inserted == self.seen
    }
}

/// Clears `table` and adds each element of `sequence` in order.
///
/// An element whose key is already present is replaced by `T::default()`.
/// If the placeholder's key is present too, the slot is dropped and counted
/// in [`RebuildReport::dropped`].
///
/// # Examples
///
/// ```rust
/// use chained_set::HashBucketTable;
/// use chained_set::snapshot::rebuild;
///
/// let mut table: HashBucketTable<u32> = HashBucketTable::new();
/// let report = rebuild(&mut table, [4, 7, 4]);
///
/// assert_eq!(report.seen, 3);
/// assert_eq!(report.placeholders, 1);
/// assert!(table.contains(&0));
/// assert_eq!(table.len(), 3);
/// ```
pub fn rebuild<T, P, I>(table: &mut HashBucketTable<T, P>, sequence: I) -> RebuildReport
where
    T: Default,
    P: KeyPolicy<T>,
    I: IntoIterator<Item = T>,
{
    table.clear();

    let mut report = RebuildReport::default();
    for value in sequence {
        report.seen += 1;
        if table.add(value) {
            report.inserted += 1;
            continue;
        }

        log::warn!(
            "element {} of the snapshot duplicates an existing key; substituting a default placeholder",
            report.seen - 1
        );
        if table.add(T::default()) {
            report.placeholders += 1;
        } else {
            report.dropped += 1;
        }
    }
    report
}

/// A table together with the sequence it is persisted as.
///
/// `values` is the backing sequence a host saves and loads. It is only
/// written by [`before_save`](SerializableSet::before_save) and only read by
/// [`after_load`](SerializableSet::after_load), so after a load it keeps the
/// exact length that was stored even when some of its elements collapsed
/// into one key.
///
/// The set dereferences to its table for every other operation.
///
/// # Examples
///
/// ```rust
/// use chained_set::snapshot::SerializableSet;
///
/// let mut set: SerializableSet<u32> = SerializableSet::new();
/// set.add(3);
/// set.add(5);
/// set.before_save();
/// assert_eq!(set.values().len(), 2);
///
/// let loaded: SerializableSet<u32> = SerializableSet::from_values(vec![3, 5, 5], Default::default());
/// assert_eq!(loaded.backing_len(), 3);
/// assert_eq!(loaded.len(), 3); // 3, 5 and the placeholder 0
/// ```
#[derive(Clone, Debug)]
pub struct SerializableSet<T, P = DefaultPolicy> {
    table: HashBucketTable<T, P>,
    values: Vec<T>,
}

impl<T, P> SerializableSet<T, P>
where
    P: KeyPolicy<T> + Default,
{
    /// Creates an empty set with the default policy.
    pub fn new() -> Self {
        Self::with_policy(P::default())
    }
}

impl<T, P> Default for SerializableSet<T, P>
where
    P: KeyPolicy<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> SerializableSet<T, P>
where
    P: KeyPolicy<T>,
{
    /// Creates an empty set using `policy`.
    pub fn with_policy(policy: P) -> Self {
        Self {
            table: HashBucketTable::with_policy(policy),
            values: Vec::new(),
        }
    }

    /// Wraps an existing table. The backing sequence starts empty.
    pub fn from_table(table: HashBucketTable<T, P>) -> Self {
        Self {
            table,
            values: Vec::new(),
        }
    }

    /// Loads a set from a persisted sequence.
    ///
    /// The table is rebuilt from `values` and `values` is kept as the
    /// backing sequence.
    pub fn from_values(values: Vec<T>, policy: P) -> Self
    where
        T: Clone + Default,
    {
        let mut set = Self {
            table: HashBucketTable::with_capacity_and_policy(values.len() / 2, policy),
            values,
        };
        set.after_load();
        set
    }

    /// Refreshes the backing sequence from the table. Call before saving.
    pub fn before_save(&mut self)
    where
        T: Clone,
    {
        self.values = flatten(&self.table);
    }

    /// Rebuilds the table from the backing sequence. Call after loading.
    pub fn after_load(&mut self) -> RebuildReport
    where
        T: Clone + Default,
    {
        rebuild(&mut self.table, self.values.iter().cloned())
    }

    /// Returns the backing sequence as last saved or loaded.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the length of the backing sequence.
    pub fn backing_len(&self) -> usize {
        self.values.len()
    }

    /// Returns the table.
    pub fn table(&self) -> &HashBucketTable<T, P> {
        &self.table
    }

    /// Unwraps the set into its table, discarding the backing sequence.
    pub fn into_table(self) -> HashBucketTable<T, P> {
        self.table
    }
}

impl<T, P> Deref for SerializableSet<T, P> {
    type Target = HashBucketTable<T, P>;

    fn deref(&self) -> &Self::Target {
        &self.table
    }
}

impl<T, P> DerefMut for SerializableSet<T, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.table
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use alloc::vec::Vec;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serialize;
    use serde::Serializer;
    use serde::ser::SerializeSeq;

    use super::SerializableSet;
    use crate::policy::KeyPolicy;

    impl<T, P> Serialize for SerializableSet<T, P>
    where
        T: Serialize,
    {
        /// Writes the table's current elements, not the stale backing
        /// sequence.
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.table.len()))?;
            for value in self.table.iter() {
                seq.serialize_element(value)?;
            }
            seq.end()
        }
    }

    impl<'de, T, P> Deserialize<'de> for SerializableSet<T, P>
    where
        T: Deserialize<'de> + Clone + Default,
        P: KeyPolicy<T> + Default,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let values = Vec::<T>::deserialize(deserializer)?;
            Ok(SerializableSet::from_values(values, P::default()))
        }
    }
}
