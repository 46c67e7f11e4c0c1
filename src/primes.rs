//! Primality helpers used to size the bucket array.

/// Returns whether `n` is prime.
///
/// Trial division by 2 and 3, then by the `6k - 1` / `6k + 1` candidates
/// while the candidate squared does not exceed `n`.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 || n == 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut k: usize = 6;
    // (k - 1)^2 <= n, written to stay clear of overflow near usize::MAX.
    while k - 1 <= n / (k - 1) {
        if n % (k - 1) == 0 || n % (k + 1) == 0 {
            return false;
        }
        k += 6;
    }
    true
}

/// Returns the smallest prime strictly greater than `n`.
pub fn find_next_prime(n: usize) -> usize {
    let mut candidate = n + 1;
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}
