//! Number utilities behind the `fibonacci`, `prime`, `hcf` and `lcm` keys.
//!
//! Everything here is pure. Domain checks (negative counts, empty lists,
//! all-zero LCM operands) happen in the dispatcher; the only failure left
//! is overflow of the `u64` result type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("fibonacci term {0} does not fit in u64")]
    FibonacciOverflow(u64),

    #[error("lcm of {0} and {1} does not fit in u64")]
    LcmOverflow(u64, u64),
}

/// The first `n + 1` Fibonacci terms, starting `0, 1, 1, 2, ...`.
pub fn fibonacci(n: u64) -> Result<Vec<u64>, MathError> {
    let mut terms: Vec<u64> = vec![0];
    if n == 0 {
        return Ok(terms);
    }
    terms.push(1);

    for i in 2..=n {
        let len = terms.len();
        let next = terms[len - 1]
            .checked_add(terms[len - 2])
            .ok_or(MathError::FibonacciOverflow(i))?;
        terms.push(next);
    }

    Ok(terms)
}

/// Bases that make Miller-Rabin exact for every 64-bit input.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// True iff `x > 1` and no integer in `[2, floor(sqrt(x))]` divides `x`.
///
/// Deterministic Miller-Rabin, so the cost stays logarithmic across the
/// whole `i64` range.
pub fn is_prime(x: i64) -> bool {
    if x <= 1 {
        return false;
    }
    let n = x as u64;
    for p in WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    'witness: for a in WITNESSES {
        let mut y = pow_mod(a, d, n);
        if y == 1 || y == n - 1 {
            continue;
        }
        for _ in 1..s {
            y = mul_mod(y, y, n);
            if y == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Greatest common divisor of every element; `None` for an empty slice.
pub fn hcf(values: &[i64]) -> Option<u64> {
    values
        .iter()
        .map(|v| v.unsigned_abs())
        .reduce(gcd)
}

pub fn lcm(a: u64, b: u64) -> Result<u64, MathError> {
    let divisor = gcd(a, b);
    if divisor == 0 {
        return Ok(0);
    }
    (a / divisor)
        .checked_mul(b)
        .ok_or(MathError::LcmOverflow(a, b))
}

/// Least common multiple of every element; `Ok(None)` for an empty slice.
pub fn lcm_of_list(values: &[i64]) -> Result<Option<u64>, MathError> {
    let mut iter = values.iter().map(|v| v.unsigned_abs());
    let Some(first) = iter.next() else {
        return Ok(None);
    };
    iter.try_fold(first, lcm).map(Some)
}
