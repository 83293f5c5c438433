use crate::{
    coefficient::Coefficient, context::IdealContext, error::Result,
    poly::polynomial::MultiPolynomial,
};
use hashbrown::HashSet;

/// State of one Buchberger run: the growing basis and the pairs whose
/// S-polynomial is known to reduce to zero.
///
/// Pairs are handled one at a time. A nonzero remainder is appended and the
/// next [`Buchberger::step`] scans again from the first pair; resolved pairs
/// are remembered across scans so they are never recomputed.
#[derive(Debug)]
pub struct Buchberger<'a, C: Coefficient> {
    ctx: &'a IdealContext,
    basis: Vec<MultiPolynomial<C>>,
    resolved: HashSet<(usize, usize)>,
}

impl<'a, C: Coefficient> Buchberger<'a, C> {
    /// Like terms are merged, zero generators dropped and the rest made monic
    /// before any pair is indexed.
    pub fn new(ctx: &'a IdealContext, generators: &[MultiPolynomial<C>]) -> Result<Self> {
        let mut basis = Vec::with_capacity(generators.len());
        for f in generators {
            let f = f.merge_like_terms()?;
            if !f.is_zero() {
                basis.push(f.normalize(ctx)?);
            }
        }

        Ok(Self {
            ctx,
            basis,
            resolved: HashSet::new(),
        })
    }

    pub fn basis(&self) -> &[MultiPolynomial<C>] {
        &self.basis
    }

    pub fn resolved_pairs(&self) -> &HashSet<(usize, usize)> {
        &self.resolved
    }

    pub fn into_basis(self) -> Vec<MultiPolynomial<C>> {
        self.basis
    }

    /// Scans pairs `(i, j)`, `i < j`, in index order. Returns `true` after
    /// appending the first nonzero reduced S-polynomial, `false` once every
    /// pair reduces to zero.
    pub fn step(&mut self) -> Result<bool> {
        let n = self.basis.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.resolved.contains(&(i, j)) {
                    continue;
                }

                let remainder = self.basis[i]
                    .s_polynomial(self.ctx, &self.basis[j])?
                    .normal_form(self.ctx, &self.basis)?;

                if remainder.is_zero() {
                    self.resolved.insert((i, j));
                } else {
                    let remainder = remainder.normalize(self.ctx)?;
                    progress!(
                        "Buchberger pair ({}, {}) adds {} with basis.len(): {}",
                        i,
                        j,
                        remainder.to_expression(self.ctx),
                        n + 1
                    );
                    self.basis.push(remainder);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Steps until a scan adds nothing. There is no iteration cap.
    pub fn run(mut self) -> Result<Vec<MultiPolynomial<C>>> {
        progress!(
            "Buchberger start with basis.len(): {}, order: {}",
            self.basis.len(),
            self.ctx.order()
        );
        while self.step()? {}
        progress!(
            "Buchberger end with basis.len(): {}, resolved pairs: {}",
            self.basis.len(),
            self.resolved.len()
        );
        Ok(self.basis)
    }
}

#[cfg(test)]
#[allow(clippy::all)]
mod tests {
    use super::*;
    use crate::{
        coefficient::rational,
        groebner::is_groebner_basis,
        poly::monomial::{Monomial, TermOrder},
        testing::q,
    };

    #[test]
    fn test_independent_variables_reach_fixpoint_at_once() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let mut run = Buchberger::new(&ctx, &[q(&ctx, &[(1, [1, 0])]), q(&ctx, &[(1, [0, 1])])])
            .unwrap();
        assert!(!run.step().unwrap());
        assert_eq!(run.basis().len(), 2);
        assert!(run.resolved_pairs().contains(&(0, 1)));
    }

    #[test]
    fn test_step_appends_one_polynomial_at_a_time() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let generators = vec![
            q(&ctx, &[(1, [2, 0]), (-1, [0, 1])]),
            q(&ctx, &[(1, [1, 1]), (-1, [0, 0])]),
        ];
        let mut run = Buchberger::new(&ctx, &generators).unwrap();

        assert!(run.step().unwrap());
        assert_eq!(run.basis().len(), 3);
        // S(x^2 - y, x*y - 1) = x - y^2 is already reduced.
        assert!(run.basis()[2].equivalent(&q(&ctx, &[(1, [1, 0]), (-1, [0, 2])])));
        assert!(run.resolved_pairs().is_empty());

        while run.step().unwrap() {}
        assert!(run.resolved_pairs().contains(&(0, 1)));
        assert!(is_groebner_basis(&ctx, run.basis()).unwrap());
    }

    #[test]
    fn test_zero_generators_are_dropped() {
        let ctx = IdealContext::new(TermOrder::DegLex, ["x", "y"]);
        let run = Buchberger::new(
            &ctx,
            &[
                MultiPolynomial::zero(),
                q(&ctx, &[(2, [1, 0])]),
                q(&ctx, &[(0, [0, 1])]),
            ],
        )
        .unwrap();
        assert_eq!(run.basis().len(), 1);
        assert!(run.basis()[0].is_monic(&ctx));
    }

    #[test]
    fn test_buchberger_given_case_1() {
        let ctx = IdealContext::new(TermOrder::DegRevLex, ["x", "y", "z"]);
        let generators = vec![
            q(&ctx, &[(1, [0, 3, 0]), (1, [2, 0, 0])]),
            q(&ctx, &[(1, [2, 1, 0]), (1, [2, 0, 0])]),
            q(&ctx, &[(1, [3, 0, 0]), (-1, [2, 0, 0])]),
            q(&ctx, &[(1, [0, 0, 4]), (-1, [2, 0, 0]), (-1, [0, 1, 0])]),
        ];
        let basis = Buchberger::new(&ctx, &generators).unwrap().run().unwrap();
        assert!(basis.len() >= generators.len());
        assert!(is_groebner_basis(&ctx, &basis).unwrap());
    }

    #[test]
    fn test_generators_have_like_terms_merged() {
        let ctx = IdealContext::new(TermOrder::Lex, ["x", "y"]);
        let x = |c: i64| Monomial::new(&ctx, rational(c, 1), vec![1, 0]);
        let y = |c: i64| Monomial::new(&ctx, rational(c, 1), vec![0, 1]);
        let run = Buchberger::new(
            &ctx,
            &[
                MultiPolynomial::new(vec![y(1), y(-1)]),
                MultiPolynomial::new(vec![x(1), x(1)]),
            ],
        )
        .unwrap();
        assert_eq!(run.basis().len(), 1);
        assert_eq!(run.basis()[0].terms(), &[x(1)]);
        assert!(run.run().is_ok());
    }
}
