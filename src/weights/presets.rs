//! Built-in weighting schemes.
//!
//! These are the schemes historically shipped in the coefficients file, and
//! can be generated without one.

use super::{WeightSchemes, Weights};
use crate::Position;

/// Arithmetic decay: `(max_len + 1 - i) / max_len` for `i` in `1..=max_len`.
pub fn arithmetic(max_len: Position) -> Weights {
    let n = f64::from(max_len);
    (1..=max_len)
        .map(|i| (i, (n + 1.0 - f64::from(i)) / n))
        .collect()
}

/// Inverse of the position: `1 / i`.
pub fn inverse(max_len: Position) -> Weights {
    (1..=max_len).map(|i| (i, 1.0 / f64::from(i))).collect()
}

/// First `k` positions weighted `1.0`, others unset.
pub fn first(k: Position) -> Weights {
    Weights::uniform(k)
}

/// First `k` positions with arithmetic decay `(k - i + 1) / k`.
pub fn first_arithmetic(k: Position) -> Weights {
    let n = f64::from(k);
    (1..=k).map(|i| (i, (n - f64::from(i) + 1.0) / n)).collect()
}

/// All built-in schemes, in their canonical order.
pub fn builtin(max_len: Position) -> WeightSchemes {
    let mut schemes = WeightSchemes::new();
    schemes.push("arithmetique", arithmetic(max_len));
    schemes.push("inverse", inverse(max_len));
    schemes.push("pos_1", first(1));
    schemes.push("pos_3", first(3));
    schemes.push("pos_6", first(6));
    schemes.push("pos_3_arith", first_arithmetic(3));
    schemes.push("pos_6_arith", first_arithmetic(6));
    schemes
}
