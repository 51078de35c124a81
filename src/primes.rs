//! Prime-number utilities
//!
//! Deliberately trivial: the level generator only needs a supply of small
//! primes and composites for sphere labels, and `factorize` feeds debug
//! output when a composite sphere is popped.

/// Sieve of Eratosthenes: all primes strictly below `limit`.
pub fn primes_below(limit: u32) -> Vec<u32> {
    if limit < 3 {
        return Vec::new();
    }
    let limit = limit as usize;
    let mut composite = vec![false; limit];
    let mut primes = Vec::new();
    for n in 2..limit {
        if composite[n] {
            continue;
        }
        primes.push(n as u32);
        let mut multiple = n * n;
        while multiple < limit {
            composite[multiple] = true;
            multiple += n;
        }
    }
    primes
}

/// Trial-division primality test.
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Distinct prime factors of `n`, ascending. Empty for `n < 2`.
pub fn factorize(mut n: u32) -> Vec<u32> {
    let mut factors = Vec::new();
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            factors.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primes_below() {
        assert_eq!(primes_below(2), vec![]);
        assert_eq!(primes_below(20), vec![2, 3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(primes_below(100).len(), 25);
    }

    #[test]
    fn test_is_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(97));
        assert!(!is_prime(91)); // 7 * 13
    }

    #[test]
    fn test_factorize() {
        assert_eq!(factorize(1), vec![]);
        assert_eq!(factorize(12), vec![2, 3]);
        assert_eq!(factorize(97), vec![97]);
        assert_eq!(factorize(360), vec![2, 3, 5]);
    }

    #[test]
    fn test_sieve_agrees_with_trial_division() {
        let sieved = primes_below(500);
        for n in 0..500 {
            assert_eq!(sieved.contains(&n), is_prime(n), "mismatch at {n}");
        }
    }
}
