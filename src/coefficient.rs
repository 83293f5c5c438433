use crate::error::{GroebnerError, Result};
use ark_ff::{Field, Fp, FpConfig};
use num_bigint::BigInt;
use num_rational::BigRational;
use std::fmt::{Debug, Display};

/// Arithmetic contract of the coefficient domain.
///
/// The basis computation never touches coefficients other than through this
/// trait. Every operation may fail, and a failure aborts the computation.
pub trait Coefficient: Clone + Debug + Display + PartialEq + Send + Sync {
    fn zero() -> Self;

    fn one() -> Self;

    fn is_zero(&self) -> bool;

    fn try_add(&self, rhs: &Self) -> Result<Self>;

    fn try_sub(&self, rhs: &Self) -> Result<Self>;

    fn try_mul(&self, rhs: &Self) -> Result<Self>;

    fn try_div(&self, rhs: &Self) -> Result<Self>;

    fn try_pow(&self, exp: u32) -> Result<Self>;

    fn try_neg(&self) -> Result<Self> {
        Self::zero().try_sub(self)
    }

    /// Brings the value into the canonical form the domain uses for zero tests.
    fn simplify(&self) -> Result<Self> {
        Ok(self.clone())
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Looser symbolic equivalence. Domains with a canonical form fall back
    /// to exact equality.
    fn equivalent(&self, other: &Self) -> bool {
        self.equals(other)
    }

    fn is_one(&self) -> bool {
        self.equivalent(&Self::one())
    }
}

impl Coefficient for BigRational {
    fn zero() -> Self {
        <BigRational as num_traits::Zero>::zero()
    }

    fn one() -> Self {
        <BigRational as num_traits::One>::one()
    }

    fn is_zero(&self) -> bool {
        num_traits::Zero::is_zero(self)
    }

    fn try_add(&self, rhs: &Self) -> Result<Self> {
        Ok(self + rhs)
    }

    fn try_sub(&self, rhs: &Self) -> Result<Self> {
        Ok(self - rhs)
    }

    fn try_mul(&self, rhs: &Self) -> Result<Self> {
        Ok(self * rhs)
    }

    fn try_div(&self, rhs: &Self) -> Result<Self> {
        if num_traits::Zero::is_zero(rhs) {
            return Err(GroebnerError::arithmetic(
                "div",
                format!("{} / 0 is undefined", self),
            ));
        }
        Ok(self / rhs)
    }

    fn try_pow(&self, exp: u32) -> Result<Self> {
        Ok(num_traits::pow(self.clone(), exp as usize))
    }

    fn try_neg(&self) -> Result<Self> {
        Ok(-self)
    }

    fn simplify(&self) -> Result<Self> {
        if num_traits::Zero::is_zero(self.denom()) {
            return Err(GroebnerError::arithmetic(
                "simplify",
                "rational with zero denominator",
            ));
        }
        Ok(BigRational::new(self.numer().clone(), self.denom().clone()))
    }
}

/// Shorthand for the rational `numer / denom`.
///
/// # Panics
///
/// Panics when `denom` is zero. Use [`try_rational`] for untrusted input.
pub fn rational(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Like [`rational`], but a zero denominator is an error.
pub fn try_rational(numer: i64, denom: i64) -> Result<BigRational> {
    if denom == 0 {
        return Err(GroebnerError::arithmetic(
            "rational",
            format!("{} / 0 is undefined", numer),
        ));
    }
    Ok(rational(numer, denom))
}

impl<P: FpConfig<N>, const N: usize> Coefficient for Fp<P, N> {
    fn zero() -> Self {
        <Self as ark_ff::Zero>::zero()
    }

    fn one() -> Self {
        <Self as ark_ff::One>::one()
    }

    fn is_zero(&self) -> bool {
        ark_ff::Zero::is_zero(self)
    }

    fn try_add(&self, rhs: &Self) -> Result<Self> {
        Ok(*self + rhs)
    }

    fn try_sub(&self, rhs: &Self) -> Result<Self> {
        Ok(*self - rhs)
    }

    fn try_mul(&self, rhs: &Self) -> Result<Self> {
        Ok(*self * rhs)
    }

    fn try_div(&self, rhs: &Self) -> Result<Self> {
        rhs.inverse()
            .map(|inv| *self * inv)
            .ok_or_else(|| GroebnerError::arithmetic("div", format!("{} has no inverse", rhs)))
    }

    fn try_pow(&self, exp: u32) -> Result<Self> {
        Ok(Field::pow(self, [exp as u64]))
    }

    fn try_neg(&self) -> Result<Self> {
        Ok(-*self)
    }
}
