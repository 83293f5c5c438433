use crate::{
    coefficient::Coefficient,
    context::IdealContext,
    error::{GroebnerError, ParseTermOrderError, Result},
};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Term orders over exponent vectors of equal length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TermOrder {
    #[default]
    Lex,
    DegLex,
    RevLex,
    DegRevLex,
}

impl TermOrder {
    pub fn compare(&self, lhs: &[u16], rhs: &[u16]) -> Ordering {
        match self {
            TermOrder::Lex => compare_lex_order(lhs, rhs),
            TermOrder::DegLex => total_degree(lhs)
                .cmp(&total_degree(rhs))
                .then_with(|| compare_lex_order(lhs, rhs)),
            TermOrder::RevLex => compare_rev_lex_order(lhs, rhs),
            TermOrder::DegRevLex => total_degree(lhs)
                .cmp(&total_degree(rhs))
                .then_with(|| compare_rev_lex_order(lhs, rhs)),
        }
    }

    /// RevLex alone is not a well-ordering, reduction under it may not stop.
    pub fn is_well_ordering(&self) -> bool {
        !matches!(self, TermOrder::RevLex)
    }
}

fn total_degree(exponents: &[u16]) -> u32 {
    exponents.iter().map(|&e| e as u32).sum()
}

fn add_exponents(l: u16, r: u16) -> Result<u16> {
    l.checked_add(r).ok_or_else(|| {
        GroebnerError::arithmetic("exponent", format!("{} + {} overflows u16", l, r))
    })
}

fn padded<'a>(lhs: &'a [u16], rhs: &'a [u16]) -> impl DoubleEndedIterator<Item = (u16, u16)> + 'a {
    let n = lhs.len().max(rhs.len());
    (0..n).map(move |i| {
        (
            lhs.get(i).copied().unwrap_or(0),
            rhs.get(i).copied().unwrap_or(0),
        )
    })
}

fn compare_lex_order(lhs: &[u16], rhs: &[u16]) -> Ordering {
    padded(lhs, rhs)
        .find_map(|(l, r)| {
            let ord = l.cmp(&r);
            ord.is_ne().then_some(ord)
        })
        .unwrap_or(Ordering::Equal)
}

/// Scans from the last variable down; a larger exponent there makes the
/// term smaller.
fn compare_rev_lex_order(lhs: &[u16], rhs: &[u16]) -> Ordering {
    padded(lhs, rhs)
        .rev()
        .find_map(|(l, r)| {
            let ord = r.cmp(&l);
            ord.is_ne().then_some(ord)
        })
        .unwrap_or(Ordering::Equal)
}

impl FromStr for TermOrder {
    type Err = ParseTermOrderError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "lex" => Ok(TermOrder::Lex),
            "deglex" | "grlex" => Ok(TermOrder::DegLex),
            "revlex" => Ok(TermOrder::RevLex),
            "degrevlex" | "grevlex" => Ok(TermOrder::DegRevLex),
            _ => Err(ParseTermOrderError(s.to_owned())),
        }
    }
}

impl fmt::Display for TermOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TermOrder::Lex => "lex",
            TermOrder::DegLex => "deglex",
            TermOrder::RevLex => "revlex",
            TermOrder::DegRevLex => "degrevlex",
        };
        f.write_str(name)
    }
}

/// A coefficient times a power product, `exponents[i]` being the power of
/// the context's `i`-th variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Monomial<C: Coefficient> {
    coefficient: C,
    exponents: Vec<u16>,
}

impl<C: Coefficient> Monomial<C> {
    /// Exponent vectors of the wrong length are truncated or zero-padded.
    pub fn new(ctx: &IdealContext, coefficient: C, exponents: Vec<u16>) -> Self {
        Self {
            coefficient,
            exponents: ctx.fit_exponents(exponents),
        }
    }

    /// Builds from sparse `(variable index, power)` pairs, summing repeats.
    /// Indices outside the context are ignored; a summed power above
    /// `u16::MAX` is an error.
    pub fn from_powers(
        ctx: &IdealContext,
        coefficient: C,
        powers: &[(usize, u16)],
    ) -> Result<Self> {
        let mut exponents = vec![0u16; ctx.num_of_vars()];
        for &(var, pow) in powers {
            if let Some(e) = exponents.get_mut(var) {
                *e = add_exponents(*e, pow)?;
            }
        }
        Ok(Self {
            coefficient,
            exponents,
        })
    }

    pub fn constant(ctx: &IdealContext, coefficient: C) -> Self {
        Self {
            coefficient,
            exponents: vec![0; ctx.num_of_vars()],
        }
    }

    pub fn coefficient(&self) -> &C {
        &self.coefficient
    }

    pub fn exponents(&self) -> &[u16] {
        &self.exponents
    }

    pub fn degree(&self) -> u32 {
        total_degree(&self.exponents)
    }

    pub fn is_constant(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Same exponents and equivalent coefficients.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.same_exponents(other) && self.coefficient.equivalent(&other.coefficient)
    }

    pub fn same_exponents(&self, other: &Self) -> bool {
        padded(&self.exponents, &other.exponents).all(|(l, r)| l == r)
    }

    pub(crate) fn with_coefficient(&self, coefficient: C) -> Self {
        Self {
            coefficient,
            exponents: self.exponents.clone(),
        }
    }

    pub fn negate(&self) -> Result<Self> {
        Ok(self.with_coefficient(self.coefficient.try_neg()?))
    }

    pub fn multiply(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            coefficient: self.coefficient.try_mul(&other.coefficient)?.simplify()?,
            exponents: padded(&self.exponents, &other.exponents)
                .map(|(l, r)| add_exponents(l, r))
                .collect::<Result<_>>()?,
        })
    }

    pub fn is_divisible_by(&self, other: &Self) -> bool {
        padded(&self.exponents, &other.exponents).all(|(l, r)| r <= l)
    }

    /// Callers check `is_divisible_by` first; exponents that would go
    /// negative are clamped at zero.
    pub fn divide_by(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            coefficient: self.coefficient.try_div(&other.coefficient)?.simplify()?,
            exponents: padded(&self.exponents, &other.exponents)
                .map(|(l, r)| l.saturating_sub(r))
                .collect(),
        })
    }

    /// `None` when `other` does not divide `self`.
    pub fn try_divide_by(&self, other: &Self) -> Result<Option<Self>> {
        if self.is_divisible_by(other) {
            self.divide_by(other).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Componentwise maximum of the exponents, with unit coefficient.
    pub fn lcm(&self, other: &Self) -> Self {
        Self {
            coefficient: C::one(),
            exponents: padded(&self.exponents, &other.exponents)
                .map(|(l, r)| l.max(r))
                .collect(),
        }
    }

    /// Replaces the variable `name` by `value`, folding `value^e` into the
    /// coefficient. Unknown names leave the monomial unchanged.
    pub fn substitute_variable(&self, ctx: &IdealContext, name: &str, value: &C) -> Result<Self> {
        let Some(var) = ctx.index_of(name) else {
            return Ok(self.clone());
        };
        let exp = self.exponents.get(var).copied().unwrap_or(0);
        if exp == 0 {
            return Ok(self.clone());
        }
        let mut exponents = self.exponents.clone();
        exponents[var] = 0;
        Ok(Self {
            coefficient: self
                .coefficient
                .try_mul(&value.try_pow(exp as u32)?)?
                .simplify()?,
            exponents,
        })
    }

    /// Renders as `c*x^2*y`, omitting a unit coefficient.
    pub fn to_expression(&self, ctx: &IdealContext) -> String {
        let powers: Vec<String> = self
            .exponents
            .iter()
            .enumerate()
            .filter(|&(_, &e)| e > 0)
            .map(|(v, &e)| {
                let name = ctx
                    .variables()
                    .get(v)
                    .cloned()
                    .unwrap_or_else(|| format!("x_{}", v));
                match e {
                    1 => name,
                    _ => format!("{}^{}", name, e),
                }
            })
            .collect();
        if powers.is_empty() {
            return self.coefficient.to_string();
        }
        let product = powers.join("*");
        let minus_one = C::one().try_neg().ok();
        if self.coefficient.is_one() {
            product
        } else if minus_one.map_or(false, |n| self.coefficient.equivalent(&n)) {
            format!("-{}", product)
        } else {
            format!("{}*{}", self.coefficient, product)
        }
    }
}
