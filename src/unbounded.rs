//! Non-negative scalars that can also be "unlimited".
//!
//! [`Unbounded<N>`] is either a finite value or [`Unbounded::Unlimited`].
//! Unlimited dominates every comparison and absorbs addition. Multiplying by
//! zero always yields a finite zero, and subtracting unlimited leaves zero.
//! Finite subtraction saturates at zero so the value never goes negative.

use core::cmp::Ordering;
use core::fmt;
use core::ops::Add;
use core::ops::Mul;
use core::ops::Sub;

/// Scalars usable inside [`Unbounded`].
pub trait Scalar: Copy + PartialOrd + fmt::Display {
    /// The additive identity.
    const ZERO: Self;
    /// The value reported for `Unlimited` by [`Unbounded::to_saturated`].
    const MAX: Self;

    /// `self + rhs`, clamped to [`Scalar::MAX`].
    fn saturating_add(self, rhs: Self) -> Self;
    /// `self - rhs`, clamped to [`Scalar::ZERO`].
    fn saturating_sub(self, rhs: Self) -> Self;
    /// `self * factor`, clamped to [`Scalar::MAX`].
    fn scale(self, factor: u32) -> Self;
}

macro_rules! impl_scalar_int {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0;
            const MAX: Self = <$t>::MAX;

            fn saturating_add(self, rhs: Self) -> Self {
                <$t>::saturating_add(self, rhs)
            }

            fn saturating_sub(self, rhs: Self) -> Self {
                <$t>::saturating_sub(self, rhs)
            }

            fn scale(self, factor: u32) -> Self {
                self.saturating_mul(factor as $t)
            }
        }
    )*};
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const MAX: Self = <$t>::MAX;

            fn saturating_add(self, rhs: Self) -> Self {
                (self + rhs).min(<$t>::MAX)
            }

            fn saturating_sub(self, rhs: Self) -> Self {
                (self - rhs).max(0.0)
            }

            fn scale(self, factor: u32) -> Self {
                (self * factor as $t).min(<$t>::MAX)
            }
        }
    )*};
}

impl_scalar_int!(u32, u64);
impl_scalar_float!(f32, f64);

/// A non-negative scalar or an explicit unlimited state.
///
/// # Examples
///
/// ```rust
/// use chained_set::unbounded::Unbounded;
///
/// let limit = Unbounded::Finite(10u32);
/// assert!(Unbounded::Unlimited > limit);
/// assert_eq!(limit + Unbounded::Unlimited, Unbounded::Unlimited);
/// assert_eq!(limit - Unbounded::Unlimited, Unbounded::Finite(0));
/// assert_eq!(Unbounded::<u32>::Unlimited * 0, Unbounded::Finite(0));
/// assert_eq!(Unbounded::<u32>::Unlimited.to_string(), "unlimited");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unbounded<N> {
    /// A finite value.
    Finite(N),
    /// Larger than every finite value.
    Unlimited,
}

impl<N: Scalar> Unbounded<N> {
    /// The finite zero.
    pub const ZERO: Self = Unbounded::Finite(N::ZERO);

    /// Returns `true` for [`Unbounded::Unlimited`].
    #[inline]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Unbounded::Unlimited)
    }

    /// Returns the finite value, if any.
    pub fn finite(self) -> Option<N> {
        match self {
            Unbounded::Finite(value) => Some(value),
            Unbounded::Unlimited => None,
        }
    }

    /// Returns the finite value, or [`Scalar::MAX`] when unlimited.
    pub fn to_saturated(self) -> N {
        self.finite().unwrap_or(N::MAX)
    }
}

impl<N: Scalar> Default for Unbounded<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<N: Scalar> From<N> for Unbounded<N> {
    fn from(value: N) -> Self {
        Unbounded::Finite(value)
    }
}

impl<N: Scalar> PartialOrd for Unbounded<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Unbounded::Unlimited, Unbounded::Unlimited) => Some(Ordering::Equal),
            (Unbounded::Unlimited, Unbounded::Finite(_)) => Some(Ordering::Greater),
            (Unbounded::Finite(_), Unbounded::Unlimited) => Some(Ordering::Less),
            (Unbounded::Finite(a), Unbounded::Finite(b)) => a.partial_cmp(b),
        }
    }
}

impl<N: Scalar> Add for Unbounded<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Unbounded::Finite(a), Unbounded::Finite(b)) => Unbounded::Finite(a.saturating_add(b)),
            _ => Unbounded::Unlimited,
        }
    }
}

impl<N: Scalar> Sub for Unbounded<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Unbounded::Unlimited, _) => Unbounded::Unlimited,
            (Unbounded::Finite(_), Unbounded::Unlimited) => Self::ZERO,
            (Unbounded::Finite(a), Unbounded::Finite(b)) => Unbounded::Finite(a.saturating_sub(b)),
        }
    }
}

impl<N: Scalar> Mul<u32> for Unbounded<N> {
    type Output = Self;

    fn mul(self, factor: u32) -> Self {
        match self {
            _ if factor == 0 => Self::ZERO,
            Unbounded::Unlimited => Unbounded::Unlimited,
            Unbounded::Finite(value) => Unbounded::Finite(value.scale(factor)),
        }
    }
}

impl<N: Scalar> Mul<Unbounded<N>> for u32 {
    type Output = Unbounded<N>;

    fn mul(self, rhs: Unbounded<N>) -> Unbounded<N> {
        rhs * self
    }
}

impl<N: Scalar> fmt::Display for Unbounded<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unbounded::Finite(value) => fmt::Display::fmt(value, f),
            Unbounded::Unlimited => f.write_str("unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    type Count = Unbounded<u32>;
    type Amount = Unbounded<f32>;

    #[test]
    fn test_unlimited_dominates_comparisons() {
        assert!(Count::Unlimited > Count::Finite(u32::MAX));
        assert!(Count::Finite(0) < Count::Unlimited);
        assert!(Count::Finite(3) < Count::Finite(4));
        assert_eq!(
            Count::Unlimited.partial_cmp(&Count::Unlimited),
            Some(Ordering::Equal)
        );
        assert_ne!(Count::Unlimited, Count::ZERO);
    }

    #[test]
    fn test_unlimited_absorbs_addition() {
        assert_eq!(Count::Finite(2) + Count::Finite(3), Count::Finite(5));
        assert_eq!(Count::Finite(2) + Count::Unlimited, Count::Unlimited);
        assert_eq!(Count::Unlimited + Count::Finite(2), Count::Unlimited);
        assert_eq!(Count::Finite(u32::MAX) + Count::Finite(1), Count::Finite(u32::MAX));
    }

    #[test]
    fn test_subtraction_rules() {
        assert_eq!(Count::Unlimited - Count::Finite(9), Count::Unlimited);
        assert_eq!(Count::Unlimited - Count::Unlimited, Count::Unlimited);
        assert_eq!(Count::Finite(9) - Count::Unlimited, Count::ZERO);
        assert_eq!(Count::Finite(9) - Count::Finite(4), Count::Finite(5));
        assert_eq!(Count::Finite(4) - Count::Finite(9), Count::ZERO);
        assert_eq!(Amount::Finite(1.5) - Amount::Finite(2.0), Amount::ZERO);
    }

    #[test]
    fn test_multiplication_rules() {
        assert_eq!(Count::Unlimited * 0, Count::ZERO);
        assert_eq!(0u32 * Count::Unlimited, Count::ZERO);
        assert_eq!(Count::Unlimited * 3, Count::Unlimited);
        assert_eq!(Count::Finite(7) * 3, Count::Finite(21));
        assert_eq!(2u32 * Amount::Finite(1.25), Amount::Finite(2.5));
    }

    #[test]
    fn test_conversions_and_display() {
        assert_eq!(Count::from(4).finite(), Some(4));
        assert_eq!(Count::Unlimited.finite(), None);
        assert_eq!(Count::Unlimited.to_saturated(), u32::MAX);
        assert_eq!(Amount::Unlimited.to_saturated(), f32::MAX);
        assert_eq!(Count::default(), Count::ZERO);
        assert!(Count::Unlimited.is_unlimited());

        assert_eq!(Count::Finite(12).to_string(), "12");
        assert_eq!(Amount::Unlimited.to_string(), "unlimited");
    }
}
