//! Hash and equality policies that decide key identity for a table.
//!
//! A [`HashBucketTable`](crate::HashBucketTable) is fixed to one policy for
//! its whole lifetime. Two policies ship with the crate:
//!
//! - [`DefaultPolicy`] hashes the element itself through a [`BuildHasher`].
//! - [`ByKind`] hashes only the element's runtime kind, so a table holds at
//!   most one element per kind.
//!
//! [`Nullable`] lifts either of them to `Option<T>` elements.

use core::any::Any;
use core::any::TypeId;
use core::hash::BuildHasher;
use core::hash::Hash;

use alloc::boxed::Box;
use alloc::rc::Rc;
#[cfg(target_has_atomic = "ptr")]
use alloc::sync::Arc;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hash builder used when no other is supplied.
        ///
        /// Seeded with a fixed value so that a snapshot rebuilt in another
        /// process lands its elements in the same buckets.
        pub type DefaultHashBuilder = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        /// Hash builder used when no other is supplied.
        pub type DefaultHashBuilder =
            core::hash::BuildHasherDefault<std::collections::hash_map::DefaultHasher>;
    } else {
        /// Hash builder used when no other is supplied.
        #[allow(deprecated)]
        pub type DefaultHashBuilder = core::hash::BuildHasherDefault<core::hash::SipHasher>;
    }
}

/// Hash returned by [`ByKind`] for an absent value.
pub const ABSENT_KIND_HASH: u64 = 2;

/// Hash returned by [`Nullable`] for `None`.
pub const ABSENT_VALUE_HASH: u64 = 0;

/// A pluggable hash/equality strategy.
///
/// The table only ever compares the (masked) output of [`hash`]; two
/// elements whose hashes collide are the same member. [`equal`] is consulted
/// for diagnostics, to tell a true duplicate apart from a collision.
///
/// [`hash`]: KeyPolicy::hash
/// [`equal`]: KeyPolicy::equal
pub trait KeyPolicy<T: ?Sized> {
    /// Hashes `item`. The table clears the sign bit of the low 32 bits.
    fn hash(&self, item: &T) -> u64;

    /// Returns `true` if `a` and `b` are the same key under this policy.
    fn equal(&self, a: &T, b: &T) -> bool;
}

/// Hashes elements by value through a [`BuildHasher`].
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "std")]
/// # {
/// use std::hash::RandomState;
///
/// use chained_set::HashBucketTable;
/// use chained_set::policy::DefaultPolicy;
///
/// let policy = DefaultPolicy::with_hasher(RandomState::new());
/// let mut table = HashBucketTable::with_policy(policy);
/// assert!(table.add("alpha"));
/// assert!(!table.add("alpha"));
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefaultPolicy<S = DefaultHashBuilder> {
    hash_builder: S,
}

impl<S> DefaultPolicy<S> {
    /// Creates a policy hashing with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the hash builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<T, S> KeyPolicy<T> for DefaultPolicy<S>
where
    T: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    fn hash(&self, item: &T) -> u64 {
        self.hash_builder.hash_one(item)
    }

    fn equal(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Elements that can report their concrete kind at runtime.
///
/// For an enum the natural kind is its discriminant:
///
/// ```rust
/// use core::mem::Discriminant;
///
/// use chained_set::policy::RuntimeKind;
///
/// enum Strategy {
///     Greedy(u32),
///     Random { seed: u64 },
/// }
///
/// impl RuntimeKind for Strategy {
///     type Kind = Discriminant<Strategy>;
///
///     fn kind(&self) -> Option<Self::Kind> {
///         Some(core::mem::discriminant(self))
///     }
/// }
/// ```
pub trait RuntimeKind {
    /// Identifier shared by every value of the same kind.
    type Kind: Hash + Eq;

    /// Returns the kind of `self`, or `None` for an absent value.
    fn kind(&self) -> Option<Self::Kind>;
}

macro_rules! impl_runtime_kind_for_any {
    ($($(#[$attr:meta])* $ptr:ty),* $(,)?) => {$(
        $(#[$attr])*
        impl RuntimeKind for $ptr {
            type Kind = TypeId;

            fn kind(&self) -> Option<TypeId> {
                Some((**self).type_id())
            }
        }
    )*};
}

// Rc and Arc are the clonable handles, so a set keyed by kind can be
// flattened and saved.
impl_runtime_kind_for_any!(
    Box<dyn Any>,
    Rc<dyn Any>,
    #[cfg(target_has_atomic = "ptr")]
    Arc<dyn Any>,
);

impl<T: RuntimeKind> RuntimeKind for Option<T> {
    type Kind = T::Kind;

    fn kind(&self) -> Option<T::Kind> {
        self.as_ref().and_then(RuntimeKind::kind)
    }
}

/// Buckets elements purely by their runtime kind.
///
/// Every value of one kind is the same key, so a table using this policy
/// keeps one slot per concrete kind. Absent values hash to
/// [`ABSENT_KIND_HASH`].
///
/// [`RuntimeKind`] is provided for `Box`, `Rc` and `Arc` of `dyn Any`. Use
/// `Rc` or `Arc` when the set has to be flattened, since that needs `Clone`.
///
/// # Examples
///
/// ```rust
/// use core::any::Any;
///
/// use chained_set::HashBucketTable;
/// use chained_set::policy::ByKind;
///
/// let mut table: HashBucketTable<Box<dyn Any>, ByKind> = HashBucketTable::new();
/// assert!(table.add(Box::new(1u32)));
/// assert!(!table.add(Box::new(2u32)));
/// assert!(table.add(Box::new("text")));
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ByKind<S = DefaultHashBuilder> {
    hash_builder: S,
}

impl<S> ByKind<S> {
    /// Creates a policy hashing kinds with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self { hash_builder }
    }
}

impl<T, S> KeyPolicy<T> for ByKind<S>
where
    T: ?Sized + RuntimeKind,
    S: BuildHasher,
{
    fn hash(&self, item: &T) -> u64 {
        match item.kind() {
            Some(kind) => self.hash_builder.hash_one(kind),
            None => ABSENT_KIND_HASH,
        }
    }

    fn equal(&self, a: &T, b: &T) -> bool {
        a.kind() == b.kind()
    }
}

/// Lifts a policy over `T` to `Option<T>`.
///
/// `None` hashes to [`ABSENT_VALUE_HASH`] and `Some(value)` is hashed by the
/// inner policy, so `None` shares a key with any value whose masked hash is
/// zero.
///
/// # Examples
///
/// ```rust
/// use chained_set::HashBucketTable;
/// use chained_set::policy::DefaultPolicy;
/// use chained_set::policy::Nullable;
///
/// let mut table: HashBucketTable<Option<u32>, Nullable<DefaultPolicy>> =
///     HashBucketTable::new();
/// assert!(table.add(None));
/// assert!(!table.add(None));
/// assert!(table.add(Some(4)));
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Nullable<P> {
    inner: P,
}

impl<P> Nullable<P> {
    /// Wraps `inner`.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Returns the wrapped policy.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<T, P> KeyPolicy<Option<T>> for Nullable<P>
where
    P: KeyPolicy<T>,
{
    fn hash(&self, item: &Option<T>) -> u64 {
        match item {
            Some(value) => self.inner.hash(value),
            None => ABSENT_VALUE_HASH,
        }
    }

    fn equal(&self, a: &Option<T>, b: &Option<T>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.inner.equal(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}
