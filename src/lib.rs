#![allow(clippy::new_ret_no_self)]
#![allow(clippy::needless_return)]
#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]

#[macro_use]
mod log;

pub mod buchberger;
pub mod coefficient;
pub mod context;
pub mod error;
pub mod groebner;
pub mod poly;

pub use crate::{
    buchberger::Buchberger,
    coefficient::{rational, try_rational, Coefficient},
    context::IdealContext,
    error::{GroebnerError, ParseTermOrderError, Result},
    groebner::{
        groebner_basis, ideal_contains, is_groebner_basis, is_reduced_basis, minimize_basis,
        normalize_basis,
    },
    poly::{
        monomial::{Monomial, TermOrder},
        polynomial::MultiPolynomial,
    },
};
use ark_ff::fields::{Fp64, MontBackend, MontConfig};
use num_rational::BigRational;

#[derive(MontConfig)]
#[modulus = "18446744073709551557"]
#[generator = "2"]
pub struct FqConfig18446744073709551557;

/// Largest 64-bit prime field.
pub type GF = Fp64<MontBackend<FqConfig18446744073709551557, 1>>;

pub type RationalPolynomial = MultiPolynomial<BigRational>;
pub type GFPolynomial = MultiPolynomial<GF>;
