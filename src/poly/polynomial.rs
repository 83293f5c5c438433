use crate::{
    coefficient::Coefficient, context::IdealContext, error::Result, poly::monomial::Monomial,
};
use derivative::Derivative;
use std::cmp::Ordering;

/// Sparse multivariate polynomial stored as a plain sequence of monomials.
///
/// `add` and `sub` merge like terms, but nothing forces one monomial per
/// exponent vector: [`MultiPolynomial::new`] keeps its input as given.
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = ""),
    Default(bound = "")
)]
pub struct MultiPolynomial<C: Coefficient> {
    pub(crate) terms: Vec<Monomial<C>>,
}

impl<C: Coefficient> MultiPolynomial<C> {
    pub fn new(terms: Vec<Monomial<C>>) -> Self {
        Self { terms }
    }

    /// Builds from `(coefficient, exponents)` pairs, merging like terms.
    pub fn from_terms(ctx: &IdealContext, terms: &[(C, Vec<u16>)]) -> Result<Self> {
        terms
            .iter()
            .try_fold(Self::zero(), |acc, (c, exponents)| {
                acc.add(&Self::new(vec![Monomial::new(ctx, c.clone(), exponents.clone())]))
            })
            .map(Self::clear_zero)
    }

    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn constant(ctx: &IdealContext, c: C) -> Self {
        Self::new(vec![Monomial::constant(ctx, c)]).clear_zero()
    }

    pub fn terms(&self) -> &[Monomial<C>] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<Monomial<C>> {
        self.terms
    }

    /// Drops monomials whose coefficient is zero.
    pub fn clear_zero(mut self) -> Self {
        self.terms.retain(|m| !m.coefficient().is_zero());
        self
    }

    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(|m| m.coefficient().is_zero())
    }

    /// Adds `m` into the first term with the same exponents, or appends it.
    fn absorb(terms: &mut Vec<Monomial<C>>, m: Monomial<C>) -> Result<()> {
        match terms.iter_mut().find(|t| t.same_exponents(&m)) {
            Some(t) => {
                let c = t.coefficient().try_add(m.coefficient())?.simplify()?;
                *t = t.with_coefficient(c);
            },
            None => terms.push(m),
        }
        Ok(())
    }

    /// Like terms are folded together on both sides, so the result holds one
    /// monomial per exponent vector even when the inputs do not.
    fn merge(&self, other: &Self, subtract: bool) -> Result<Self> {
        let mut terms = Vec::with_capacity(self.terms.len() + other.terms.len());
        for m in &self.terms {
            Self::absorb(&mut terms, m.clone())?;
        }
        for o in &other.terms {
            Self::absorb(&mut terms, if subtract { o.negate()? } else { o.clone() })?;
        }
        Ok(Self { terms }.clear_zero())
    }

    /// One nonzero monomial per exponent vector, in first-occurrence order.
    pub fn merge_like_terms(&self) -> Result<Self> {
        self.merge(&Self::zero(), false)
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.merge(other, false)
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.merge(other, true)
    }

    pub fn negate(&self) -> Result<Self> {
        Ok(Self {
            terms: self
                .terms
                .iter()
                .map(Monomial::negate)
                .collect::<Result<_>>()?,
        })
    }

    pub fn multiply_by_monomial(&self, m: &Monomial<C>) -> Result<Self> {
        Ok(Self {
            terms: self
                .terms
                .iter()
                .map(|t| t.multiply(m))
                .collect::<Result<_>>()?,
        })
    }

    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.terms.iter().try_fold(Self::zero(), |acc, m| {
            acc.add(&other.multiply_by_monomial(m)?.clear_zero())
        })
    }

    /// Maximal nonzero monomial under the context's order. Among equal
    /// exponent vectors the first one wins.
    pub fn leading_monomial(&self, ctx: &IdealContext) -> Option<&Monomial<C>> {
        self.terms
            .iter()
            .filter(|m| !m.coefficient().is_zero())
            .fold(None, |best, m| match best {
                Some(b) if ctx.compare(m.exponents(), b.exponents()) != Ordering::Greater => {
                    Some(b)
                },
                _ => Some(m),
            })
    }

    pub fn leading_coefficient(&self, ctx: &IdealContext) -> Option<&C> {
        self.leading_monomial(ctx).map(Monomial::coefficient)
    }

    /// Scales so the leading coefficient becomes one. The zero polynomial is
    /// returned as is.
    pub fn normalize(&self, ctx: &IdealContext) -> Result<Self> {
        let merged = self.merge_like_terms()?;
        let Some(lc) = merged.leading_coefficient(ctx) else {
            return Ok(merged);
        };
        let terms = merged
            .terms
            .iter()
            .map(|m| Ok(m.with_coefficient(m.coefficient().try_div(lc)?.simplify()?)))
            .collect::<Result<_>>()?;
        Ok(Self { terms })
    }

    /// Leading coefficient of the merged polynomial is one. False when like
    /// terms cannot be merged.
    pub fn is_monic(&self, ctx: &IdealContext) -> bool {
        self.merge_like_terms()
            .map_or(false, |f| f.leading_coefficient(ctx).map_or(false, C::is_one))
    }

    /// Total degree, zero for the zero polynomial.
    pub fn degree(&self) -> u32 {
        self.terms
            .iter()
            .filter(|m| !m.coefficient().is_zero())
            .map(Monomial::degree)
            .max()
            .unwrap_or(0)
    }

    /// Highest power of `name`, `None` if the context has no such variable.
    pub fn degree_in(&self, ctx: &IdealContext, name: &str) -> Option<u16> {
        let var = ctx.index_of(name)?;
        Some(
            self.terms
                .iter()
                .filter(|m| !m.coefficient().is_zero())
                .map(|m| m.exponents().get(var).copied().unwrap_or(0))
                .max()
                .unwrap_or(0),
        )
    }

    pub fn substitute_variable(&self, ctx: &IdealContext, name: &str, value: &C) -> Result<Self> {
        self.terms.iter().try_fold(Self::zero(), |acc, m| {
            acc.add(&Self::new(vec![m.substitute_variable(ctx, name, value)?]))
        })
    }

    /// Same polynomial after merging like terms on both sides, coefficients
    /// compared by equivalence. False when either side fails to merge.
    pub fn equivalent(&self, other: &Self) -> bool {
        let (Ok(lhs), Ok(rhs)) = (self.merge_like_terms(), other.merge_like_terms()) else {
            return false;
        };
        let mut unmatched: Vec<&Monomial<C>> = rhs.terms.iter().collect();
        for m in &lhs.terms {
            match unmatched.iter().position(|o| m.equivalent(o)) {
                Some(k) => {
                    unmatched.swap_remove(k);
                },
                None => return false,
            }
        }
        unmatched.is_empty()
    }

    /// Renders the nonzero terms from the leading one down, e.g. `x^2 - 3*y + 1`.
    pub fn to_expression(&self, ctx: &IdealContext) -> String {
        let mut terms: Vec<&Monomial<C>> = self
            .terms
            .iter()
            .filter(|m| !m.coefficient().is_zero())
            .collect();
        if terms.is_empty() {
            return "0".to_owned();
        }
        terms.sort_by(|a, b| ctx.compare(b.exponents(), a.exponents()));

        let mut out = terms[0].to_expression(ctx);
        for m in &terms[1..] {
            let rendered = m.to_expression(ctx);
            match rendered.strip_prefix('-') {
                Some(rest) => {
                    out.push_str(" - ");
                    out.push_str(rest);
                },
                None => {
                    out.push_str(" + ");
                    out.push_str(&rendered);
                },
            }
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::all)]
mod tests {
    use ark_ff::UniformRand;
    use ark_std::test_rng;
    use ark_test_curves::bls12_381::Fr;
    use num_rational::BigRational;
    use rand::Rng;

    use crate::{coefficient::rational, poly::monomial::TermOrder, testing::q};

    use super::*;

    /// Generate random `l`-variate polynomial of maximum individual degree `d`
    fn rand_poly<R: Rng>(ctx: &IdealContext, d: u16, rng: &mut R) -> MultiPolynomial<Fr> {
        let l = ctx.num_of_vars();
        let num_terms = rng.gen_range(1..30);
        let mut random_terms = vec![(Fr::rand(rng), vec![0; l])];
        for _ in 1..num_terms {
            let term: Vec<u16> = (0..l)
                .map(|_| {
                    if rng.gen_bool(0.5) {
                        rng.gen_range(1..(d + 1))
                    } else {
                        0
                    }
                })
                .collect();
            random_terms.push((Fr::rand(rng), term));
        }
        MultiPolynomial::from_terms(ctx, &random_terms).unwrap()
    }

    fn rand_monomial<R: Rng>(ctx: &IdealContext, d: u16, rng: &mut R) -> Monomial<Fr> {
        let term: Vec<u16> = (0..ctx.num_of_vars())
            .map(|_| rng.gen_range(0..(d + 1)))
            .collect();
        Monomial::new(ctx, Fr::rand(rng), term)
    }

    #[test]
    fn add_polynomials() {
        let rng = &mut test_rng();
        let ctx = IdealContext::new(TermOrder::DegRevLex, ["a", "b", "c", "d"]);
        for _ in 0..50 {
            let p1 = rand_poly(&ctx, 5, rng);
            let p2 = rand_poly(&ctx, 5, rng);
            let res1 = p1.add(&p2).unwrap();
            let res2 = p2.add(&p1).unwrap();
            assert!(res1.equivalent(&res2));
            assert!(res2.sub(&res1).unwrap().is_zero());
        }
    }

    #[test]
    fn sub_polynomials() {
        let rng = &mut test_rng();
        let ctx = IdealContext::new(TermOrder::Lex, ["a", "b", "c"]);
        for _ in 0..50 {
            let p1 = rand_poly(&ctx, 5, rng);
            let p2 = rand_poly(&ctx, 5, rng);
            let res1 = p1.sub(&p2).unwrap();
            let res2 = p2.sub(&p1).unwrap();
            assert!(res1.equivalent(&res2.negate().unwrap()));
            assert!(res1.add(&p2).unwrap().equivalent(&p1));
        }
    }

    #[test]
    fn mul_monomial() {
        let rng = &mut test_rng();
        let ctx = IdealContext::new(TermOrder::DegLex, ["a", "b", "c"]);
        for _ in 0..50 {
            let p = rand_poly(&ctx, 5, rng);
            let t = rand_monomial(&ctx, 5, rng);
            let res1 = p.multiply_by_monomial(&t).unwrap();
            let res2 = p
                .terms()
                .iter()
                .map(|tt| {
                    MultiPolynomial::new(vec![tt.clone()])
                        .multiply_by_monomial(&t)
                        .unwrap()
                })
                .reduce(|a, b| a.add(&b).unwrap())
                .unwrap();
            assert!(res1.equivalent(&res2));
        }
    }

    #[test]
    fn mul_is_commutative() {
        let rng = &mut test_rng();
        let ctx = IdealContext::new(TermOrder::DegRevLex, ["a", "b"]);
        for _ in 0..20 {
            let p1 = rand_poly(&ctx, 3, rng);
            let p2 = rand_poly(&ctx, 3, rng);
            let lhs = p1.multiply(&p2).unwrap();
            let rhs = p2.multiply(&p1).unwrap();
            assert!(lhs.sub(&rhs).unwrap().is_zero());
            assert_eq!(lhs.degree(), p1.degree() + p2.degree());
        }
    }

    #[test]
    fn add_drops_cancelled_terms() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let f = q(&ctx, &[(1, [2, 0]), (-1, [0, 1])]);
        let g = q(&ctx, &[(1, [0, 1]), (3, [0, 0])]);
        let sum = f.add(&g).unwrap();
        assert_eq!(sum.terms().len(), 2);
        assert!(sum.equivalent(&q(&ctx, &[(1, [2, 0]), (3, [0, 0])])));
        assert!(f.sub(&f).unwrap().terms().is_empty());
    }

    #[test]
    fn leading_monomial_prefers_first_occurrence() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let f = MultiPolynomial::new(vec![
            Monomial::new(&ctx, rational(1, 1), vec![0, 3]),
            Monomial::new(&ctx, rational(2, 1), vec![1, 0]),
            Monomial::new(&ctx, rational(5, 1), vec![1, 0]),
        ]);
        let lm = f.leading_monomial(&ctx).unwrap();
        assert_eq!(lm.exponents(), &[1, 0]);
        assert_eq!(lm.coefficient(), &rational(2, 1));

        let ctx = ctx.with_order(TermOrder::DegLex);
        assert_eq!(f.leading_monomial(&ctx).unwrap().exponents(), &[0, 3]);
        assert!(MultiPolynomial::<BigRational>::zero()
            .leading_monomial(&ctx)
            .is_none());
    }

    #[test]
    fn normalize_makes_monic() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let f = q(&ctx, &[(4, [1, 1]), (2, [0, 0])]);
        let g = f.normalize(&ctx).unwrap();
        assert!(g.is_monic(&ctx));
        assert!(g.equivalent(&MultiPolynomial::from_terms(
            &ctx,
            &[(rational(1, 1), vec![1, 1]), (rational(1, 2), vec![0, 0])]
        )
        .unwrap()));
        assert!(MultiPolynomial::<BigRational>::zero()
            .normalize(&ctx)
            .unwrap()
            .is_zero());
    }

    #[test]
    fn degree_queries() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let f = q(&ctx, &[(1, [2, 1]), (1, [0, 4]), (-7, [0, 0])]);
        assert_eq!(f.degree(), 4);
        assert_eq!(f.degree_in(&ctx, "x"), Some(2));
        assert_eq!(f.degree_in(&ctx, "y"), Some(4));
        assert_eq!(f.degree_in(&ctx, "z"), None);
    }

    #[test]
    fn substitute_merges_like_terms() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        // x*y + x with y = -1 collapses to zero.
        let f = q(&ctx, &[(1, [1, 1]), (1, [1, 0])]);
        let g = f.substitute_variable(&ctx, "y", &rational(-1, 1)).unwrap();
        assert!(g.is_zero());
        let h = f.substitute_variable(&ctx, "x", &rational(2, 1)).unwrap();
        assert!(h.equivalent(&q(&ctx, &[(2, [0, 1]), (2, [0, 0])])));
    }

    #[test]
    fn to_expression_orders_terms() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let f = q(&ctx, &[(-1, [0, 0]), (-3, [0, 1]), (1, [2, 0])]);
        assert_eq!(f.to_expression(&ctx), "x^2 - 3*y - 1");
        assert_eq!(MultiPolynomial::<BigRational>::zero().to_expression(&ctx), "0");
    }

    fn dup(ctx: &IdealContext, terms: &[(i64, [u16; 2])]) -> MultiPolynomial<BigRational> {
        MultiPolynomial::new(
            terms
                .iter()
                .map(|(c, e)| Monomial::new(ctx, rational(*c, 1), e.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn merge_like_terms_folds_duplicates() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let f = dup(&ctx, &[(1, [1, 0]), (1, [0, 1]), (1, [1, 0]), (-1, [0, 1])]);
        let merged = f.merge_like_terms().unwrap();
        assert_eq!(merged.terms().len(), 1);
        assert_eq!(merged.terms()[0], Monomial::new(&ctx, rational(2, 1), vec![1, 0]));
    }

    #[test]
    fn add_and_sub_fold_duplicate_exponents() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let two_x = dup(&ctx, &[(1, [1, 0]), (1, [1, 0])]);
        let sum = two_x.add(&q(&ctx, &[(1, [0, 1])])).unwrap();
        assert_eq!(sum.terms().len(), 2);
        assert!(sum.equivalent(&q(&ctx, &[(2, [1, 0]), (1, [0, 1])])));

        let diff = two_x.sub(&q(&ctx, &[(2, [1, 0])])).unwrap();
        assert!(diff.terms().is_empty());
        let diff = q(&ctx, &[(2, [1, 0])]).sub(&two_x).unwrap();
        assert!(diff.terms().is_empty());
    }

    #[test]
    fn equivalence_respects_multiplicity() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let x_plus_x = dup(&ctx, &[(1, [1, 0]), (1, [1, 0])]);
        let x_plus_y = q(&ctx, &[(1, [1, 0]), (1, [0, 1])]);
        assert!(!x_plus_x.equivalent(&x_plus_y));
        assert!(!x_plus_y.equivalent(&x_plus_x));
        assert!(x_plus_x.equivalent(&q(&ctx, &[(2, [1, 0])])));
        assert!(q(&ctx, &[(2, [1, 0])]).equivalent(&x_plus_x));
        assert!(dup(&ctx, &[(1, [1, 0]), (-1, [1, 0])]).equivalent(&MultiPolynomial::zero()));
        assert!(!x_plus_y.equivalent(&q(&ctx, &[(1, [1, 0])])));
    }

    #[test]
    fn monic_check_merges_like_terms() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let two_x = dup(&ctx, &[(1, [1, 0]), (1, [1, 0])]);
        assert!(!two_x.is_monic(&ctx));
        let monic = two_x.normalize(&ctx).unwrap();
        assert!(monic.is_monic(&ctx));
        assert_eq!(monic.to_expression(&ctx), "x");
    }

    #[test]
    fn to_expression_omits_unit_on_negative_terms() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        assert_eq!(q(&ctx, &[(1, [1, 0]), (-1, [0, 1])]).to_expression(&ctx), "x - y");
        assert_eq!(q(&ctx, &[(-1, [1, 0]), (1, [0, 1])]).to_expression(&ctx), "-x + y");
    }
}
