use crate::hash_table::HashBucketTable;
use crate::policy::KeyPolicy;

impl<T, P> PartialEq for HashBucketTable<T, P>
where
    P: KeyPolicy<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.set_equals(other)
    }
}

impl<T, P> Eq for HashBucketTable<T, P> where P: KeyPolicy<T> {}

impl<T, P> HashBucketTable<T, P>
where
    P: KeyPolicy<T>,
{
    /// Adds every element of `other` to `self`.
    ///
    /// Elements whose masked hash is already present in `self` are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let mut a: HashBucketTable<i32> = [1, 2].into_iter().collect();
    /// let b: HashBucketTable<i32> = [2, 3].into_iter().collect();
    ///
    /// a.union_with(&b);
    /// assert_eq!(a.len(), 3);
    /// ```
    pub fn union_with<Q>(&mut self, other: &HashBucketTable<T, Q>)
    where
        T: Clone,
        Q: KeyPolicy<T>,
    {
        for value in other.iter() {
            self.add(value.clone());
        }
    }

    /// Removes from `self` every element keyed like an element of `other`.
    ///
    /// A table cannot be borrowed as its own `other` here; use
    /// [`clear`](HashBucketTable::clear) for the self-difference.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let mut a: HashBucketTable<i32> = [1, 2, 3].into_iter().collect();
    /// let b: HashBucketTable<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// a.except_with(&b);
    /// assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1]);
    /// ```
    pub fn except_with<Q>(&mut self, other: &HashBucketTable<T, Q>)
    where
        Q: KeyPolicy<T>,
    {
        if self.is_empty() {
            return;
        }
        for value in other.iter() {
            self.remove(value);
        }
    }

    /// Keeps only the elements of `self` that `other` contains.
    ///
    /// Membership in `other` is decided by `other`'s own policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let mut a: HashBucketTable<i32> = [1, 2, 3].into_iter().collect();
    /// let b: HashBucketTable<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// a.intersect_with(&b);
    /// assert_eq!(a.len(), 2);
    /// assert!(a.contains(&2) && a.contains(&3));
    /// ```
    pub fn intersect_with<Q>(&mut self, other: &HashBucketTable<T, Q>)
    where
        Q: KeyPolicy<T>,
    {
        if self.is_empty() {
            return;
        }
        self.remove_where(|value| !other.contains(value));
    }

    /// Removes from `self` every element whose key also appears in `other`.
    ///
    /// First every element of `other` is removed from `self` by `self`'s
    /// policy, then any survivor that `other` still reports as contained
    /// (by `other`'s policy) is removed too. What remains are the elements
    /// of `self` whose key is in `self` alone; `other` is left untouched and
    /// its own unique elements are not copied over.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let mut a: HashBucketTable<i32> = [1, 2].into_iter().collect();
    /// let b: HashBucketTable<i32> = [2, 3].into_iter().collect();
    ///
    /// a.symmetric_except_with(&b);
    /// assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1]);
    /// assert_eq!(b.len(), 2);
    /// ```
    pub fn symmetric_except_with<Q>(&mut self, other: &HashBucketTable<T, Q>)
    where
        Q: KeyPolicy<T>,
    {
        for value in other.iter() {
            self.remove(value);
        }
        self.remove_where(|value| other.contains(value));
    }

    /// Returns `true` if every element of `self` is contained in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let a: HashBucketTable<i32> = [1, 2].into_iter().collect();
    /// let b: HashBucketTable<i32> = [1, 2, 3].into_iter().collect();
    ///
    /// assert!(a.is_subset_of(&b));
    /// assert!(!b.is_subset_of(&a));
    /// assert!(a.is_subset_of(&a));
    /// ```
    pub fn is_subset_of<Q>(&self, other: &HashBucketTable<T, Q>) -> bool
    where
        Q: KeyPolicy<T>,
    {
        self.iter().all(|value| other.contains(value))
    }

    /// Returns `true` if `self` is a subset of `other` and the two differ in
    /// element count.
    pub fn is_proper_subset_of<Q>(&self, other: &HashBucketTable<T, Q>) -> bool
    where
        Q: KeyPolicy<T>,
    {
        self.len() != other.len() && self.is_subset_of(other)
    }

    /// Returns `true` if every element of `other` is contained in `self`.
    pub fn is_superset_of<Q>(&self, other: &HashBucketTable<T, Q>) -> bool
    where
        Q: KeyPolicy<T>,
    {
        other.iter().all(|value| self.contains(value))
    }

    /// Returns `true` if `self` is a superset of `other` and the two differ
    /// in element count.
    pub fn is_proper_superset_of<Q>(&self, other: &HashBucketTable<T, Q>) -> bool
    where
        Q: KeyPolicy<T>,
    {
        self.len() != other.len() && self.is_superset_of(other)
    }

    /// Returns `true` if `self` contains at least one element of `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chained_set::HashBucketTable;
    ///
    /// let a: HashBucketTable<i32> = [1, 2].into_iter().collect();
    /// let b: HashBucketTable<i32> = [2, 3].into_iter().collect();
    /// let c: HashBucketTable<i32> = [4].into_iter().collect();
    ///
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// ```
    pub fn overlaps<Q>(&self, other: &HashBucketTable<T, Q>) -> bool
    where
        Q: KeyPolicy<T>,
    {
        if self.is_empty() {
            return false;
        }
        other.iter().any(|value| self.contains(value))
    }

    /// Returns `true` if `self` contains every element of `other` and both
    /// hold the same number of elements.
    pub fn set_equals<Q>(&self, other: &HashBucketTable<T, Q>) -> bool
    where
        Q: KeyPolicy<T>,
    {
        self.len() == other.len() && other.iter().all(|value| self.contains(value))
    }
}
