//! Prime sizes used to step bucket capacities.
//!
//! Growing a bucket to a prime capacity rather than doubling it spreads
//! allocation sizes out and keeps chains from settling on the same
//! power-of-two boundaries.

/// Ascending table of primes, each roughly double the one before it.
///
/// Requests past the last entry fall back to trial division.
pub const PRIMES: [usize; 20] = [
    3, 7, 17, 37, 89, 197, 431, 919, 1931, 4049, 8419, 17519, 36353, 75431, 156437, 324449,
    672827, 1395263, 2893249, 5999471,
];

/// Returns the smallest prime that is at least `min`.
///
/// Values covered by [`PRIMES`] return the first table entry `>= min`, which
/// is not necessarily the closest prime. Larger values are found by checking
/// odd candidates upward.
///
/// # Examples
///
/// ```rust
/// use chained_set::primes::get_prime;
///
/// assert_eq!(get_prime(0), 3);
/// assert_eq!(get_prime(4), 7);
/// assert_eq!(get_prime(7), 7);
/// assert_eq!(get_prime(6_000_000), 6_000_011);
/// ```
pub fn get_prime(min: usize) -> usize {
    if let Some(&prime) = PRIMES.iter().find(|&&prime| prime >= min) {
        return prime;
    }

    let mut candidate = min | 1;
    while candidate < usize::MAX {
        if is_prime(candidate) {
            return candidate;
        }
        candidate += 2;
    }
    min
}

/// Returns `true` if `candidate` is prime.
///
/// Trial division by odd divisors up to the square root. The bound is
/// checked with `divisor * divisor` so no floating point is needed.
pub fn is_prime(candidate: usize) -> bool {
    if candidate & 1 == 0 {
        return candidate == 2;
    }
    if candidate < 3 {
        return false;
    }

    let mut divisor = 3usize;
    while let Some(square) = divisor.checked_mul(divisor) {
        if square > candidate {
            break;
        }
        if candidate % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries_are_prime_and_ascending() {
        for window in PRIMES.windows(2) {
            assert!(window[0] < window[1]);
        }
        for prime in PRIMES {
            assert!(is_prime(prime), "{prime} should be prime");
        }
    }

    #[test]
    fn test_small_primes() {
        let expected = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
        let found: alloc::vec::Vec<usize> = (0..=37).filter(|&n| is_prime(n)).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_composites_are_rejected() {
        for n in [0, 1, 4, 9, 15, 21, 25, 49, 91, 5_999_473, 1_000_000] {
            assert!(!is_prime(n), "{n} should not be prime");
        }
    }

    #[test]
    fn test_get_prime_uses_table() {
        assert_eq!(get_prime(0), 3);
        assert_eq!(get_prime(3), 3);
        assert_eq!(get_prime(4), 7);
        assert_eq!(get_prime(18), 37);
        assert_eq!(get_prime(5_999_471), 5_999_471);
    }

    #[test]
    fn test_get_prime_beyond_table() {
        let prime = get_prime(5_999_472);
        assert!(prime >= 5_999_472);
        assert!(is_prime(prime));
        for n in 5_999_472..prime {
            assert!(!is_prime(n));
        }
    }

    #[test]
    fn test_get_prime_strictly_grows_from_a_full_bucket() {
        let mut capacity = 0;
        for _ in 0..PRIMES.len() {
            let next = get_prime(capacity + 1);
            assert!(next > capacity);
            capacity = next;
        }
        assert_eq!(capacity, 5_999_471);
    }
}
