//! Exact rational scalars.

use num_integer::Integer;
use num_rational::Ratio;

/// Exact rational scalar used for all lattice coordinates.
///
/// Inner products of weights have denominators dividing a small multiple of
/// the determinant of the Cartan matrix, so 64-bit parts are plenty.
pub type Rational = Ratio<i64>;

/// Constructs an integral [`Rational`].
pub fn int(n: i64) -> Rational {
    Rational::from_integer(n)
}

/// Constructs the [`Rational`] `numer / denom`.
///
/// # Panics
///
/// Panics if `denom` is zero.
pub fn frac(numer: i64, denom: i64) -> Rational {
    Rational::new(numer, denom)
}

/// Returns the least common multiple of the denominators of `values`, which
/// is the smallest positive integer that makes all of them integral when
/// multiplied.
pub fn common_denominator<'a>(values: impl IntoIterator<Item = &'a Rational>) -> i64 {
    values
        .into_iter()
        .fold(1, |acc, r| acc.lcm(r.denom()))
}
