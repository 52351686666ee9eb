//! Exact non-negative rationals for resistances and costs

use crate::error::SearchError;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Exact rational in reduced form with a positive denominator.
///
/// Backed by arbitrary-precision integers so deep trees never overflow.
/// Ordering is the numeric ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ratio(BigRational);

impl Ratio {
    /// Build `numer / denom`; `None` when the denominator is zero
    pub fn new(numer: u64, denom: u64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        Some(Ratio(BigRational::new(
            BigInt::from(numer),
            BigInt::from(denom),
        )))
    }

    pub fn from_integer(value: u64) -> Self {
        Ratio(BigRational::from_integer(BigInt::from(value)))
    }

    pub fn zero() -> Self {
        Ratio(BigRational::zero())
    }

    pub fn one() -> Self {
        Ratio(BigRational::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parallel combination `a·b / (a + b)`.
    ///
    /// Two zero resistances in parallel stay zero.
    pub fn parallel(&self, other: &Ratio) -> Ratio {
        let sum = &self.0 + &other.0;
        if sum.is_zero() {
            return Ratio::zero();
        }
        Ratio(&self.0 * &other.0 / sum)
    }

    /// Target-relative distance `|self - target| / target`.
    ///
    /// A zero target degrades to the absolute distance.
    pub fn distance_to(&self, target: &Ratio) -> Ratio {
        let diff = (&self.0 - &target.0).abs();
        if target.0.is_zero() {
            Ratio(diff)
        } else {
            Ratio(diff / &target.0)
        }
    }

    /// Lossy conversion for display
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Scale by `10^exponent`
    pub fn scaled_by_decade(&self, exponent: u32) -> Ratio {
        Ratio(&self.0 * BigRational::from_integer(BigInt::from(10u32).pow(exponent)))
    }
}

impl Add for Ratio {
    type Output = Ratio;

    fn add(self, rhs: Ratio) -> Ratio {
        Ratio(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Ratio> for &'a Ratio {
    type Output = Ratio;

    fn add(self, rhs: &'a Ratio) -> Ratio {
        Ratio(&self.0 + &rhs.0)
    }
}

impl Sum for Ratio {
    fn sum<I: Iterator<Item = Ratio>>(iter: I) -> Ratio {
        iter.fold(Ratio::zero(), |acc, r| acc + r)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_digits(s: &str, input: &str) -> Result<BigInt, SearchError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SearchError::ArgParse(format!(
            "'{}' is not a non-negative rational (expected p, p/q or a decimal)",
            input
        )));
    }
    s.parse::<BigInt>()
        .map_err(|e| SearchError::ArgParse(format!("'{}': {}", input, e)))
}

impl FromStr for Ratio {
    type Err = SearchError;

    /// Accepts `p`, `p/q` and decimals such as `2.5`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((numer, denom)) = trimmed.split_once('/') {
            let numer = parse_digits(numer.trim(), s)?;
            let denom = parse_digits(denom.trim(), s)?;
            if denom.is_zero() {
                return Err(SearchError::ArgParse(format!(
                    "'{}' has a zero denominator",
                    s
                )));
            }
            return Ok(Ratio(BigRational::new(numer, denom)));
        }
        if let Some((whole, frac)) = trimmed.split_once('.') {
            let whole = if whole.is_empty() {
                BigInt::zero()
            } else {
                parse_digits(whole, s)?
            };
            let frac_value = parse_digits(frac, s)?;
            let scale = BigInt::from(10u32).pow(frac.len() as u32);
            let numer = whole * &scale + frac_value;
            return Ok(Ratio(BigRational::new(numer, scale)));
        }
        Ok(Ratio(BigRational::from_integer(parse_digits(trimmed, s)?)))
    }
}
