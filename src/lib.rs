#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// The bucket-chained table.
///
/// This module provides [`HashBucketTable`], its iterators, and the error
/// type for its fallible operations.
pub mod hash_table;

/// Set-algebra operations on [`HashBucketTable`].
///
/// Union, difference, intersection and their predicates, all evaluated
/// against the masked-hash key space rather than value equality.
pub mod hash_set;

pub mod policy;
pub mod primes;
pub mod snapshot;
pub mod unbounded;

pub use hash_table::HashBucketTable;
pub use hash_table::SetError;
pub use policy::ByKind;
pub use policy::DefaultPolicy;
pub use policy::KeyPolicy;
pub use policy::Nullable;
pub use snapshot::SerializableSet;
