use crate::{
    coefficient::Coefficient,
    context::IdealContext,
    error::Result,
    poly::{monomial::Monomial, polynomial::MultiPolynomial},
};

impl<C: Coefficient> MultiPolynomial<C> {
    /// Full reduction by a single divisor: while any term is divisible by the
    /// leading monomial of `g`, cancel it. Every term is reduced, not only
    /// the leading one. Both sides have their like terms merged first.
    pub fn reduce(&self, ctx: &IdealContext, g: &Self) -> Result<Self> {
        let mut remainder = self.merge_like_terms()?;
        let g = g.merge_like_terms()?;
        let Some(lt) = g.leading_monomial(ctx) else {
            return Ok(remainder);
        };

        while let Some(m) = remainder
            .terms
            .iter()
            .find(|m| m.is_divisible_by(lt))
            .cloned()
        {
            let t = m.divide_by(lt)?;
            remainder = remainder.sub(&g.multiply_by_monomial(&t)?)?;
        }

        Ok(remainder)
    }

    /// Reduces by each divisor once, in order. A later divisor may bring back
    /// a term an earlier one could reduce; use [`Self::normal_form`] when
    /// that matters.
    pub fn reduce_by_each(&self, ctx: &IdealContext, gs: &[Self]) -> Result<Self> {
        gs.iter()
            .try_fold(self.merge_like_terms()?, |f, g| f.reduce(ctx, g))
    }

    /// Remainder after exhaustive reduction: no term is divisible by the
    /// leading monomial of any divisor. Zero divisors are skipped.
    pub fn normal_form(&self, ctx: &IdealContext, gs: &[Self]) -> Result<Self> {
        let gs = gs
            .iter()
            .map(Self::merge_like_terms)
            .collect::<Result<Vec<_>>>()?;
        let leads: Vec<(&Self, &Monomial<C>)> = gs
            .iter()
            .filter_map(|g| g.leading_monomial(ctx).map(|lt| (g, lt)))
            .collect();
        let mut remainder = self.merge_like_terms()?;

        loop {
            let step = remainder.terms.iter().find_map(|m| {
                leads
                    .iter()
                    .find(|(_, lt)| m.is_divisible_by(lt))
                    .map(|(g, lt)| (m.clone(), *g, *lt))
            });
            let Some((m, g, lt)) = step else {
                break;
            };
            let t = m.divide_by(lt)?;
            remainder = remainder.sub(&g.multiply_by_monomial(&t)?)?;
        }

        Ok(remainder)
    }

    /// `S(f, g) = f * (L / lt(f)) - g * (L / lt(g))` with `L` the lcm of the
    /// leading monomials. Zero when either side is zero.
    pub fn s_polynomial(&self, ctx: &IdealContext, other: &Self) -> Result<Self> {
        let (f, g) = (self.merge_like_terms()?, other.merge_like_terms()?);
        let (Some(lt_f), Some(lt_g)) = (f.leading_monomial(ctx), g.leading_monomial(ctx)) else {
            return Ok(Self::zero());
        };

        // Compute the least common multiple of the leading monomials
        let lcm = lt_f.lcm(lt_g);
        let t_f = lcm.divide_by(lt_f)?;
        let t_g = lcm.divide_by(lt_g)?;

        f.multiply_by_monomial(&t_f)?
            .sub(&g.multiply_by_monomial(&t_g)?)
    }

    /// Classical division: returns `(q, r)` with `self = sum(q[i] * gs[i]) + r`
    /// and no term of `r` divisible by any leading monomial of `gs`.
    pub fn div_mod_polys(&self, ctx: &IdealContext, gs: &[Self]) -> Result<(Vec<Self>, Self)> {
        let gs = gs
            .iter()
            .map(Self::merge_like_terms)
            .collect::<Result<Vec<_>>>()?;
        let mut qs = vec![Self::zero(); gs.len()];
        let mut remainder = Self::zero();
        let mut p = self.merge_like_terms()?;

        while let Some(lt_p) = p.leading_monomial(ctx).cloned() {
            let divisor = gs.iter().enumerate().find_map(|(i, g)| {
                g.leading_monomial(ctx)
                    .filter(|lt_g| lt_p.is_divisible_by(lt_g))
                    .map(|lt_g| (i, g, lt_g))
            });

            match divisor {
                Some((i, g, lt_g)) => {
                    let t = lt_p.divide_by(lt_g)?;
                    p = p.sub(&g.multiply_by_monomial(&t)?)?;
                    qs[i] = qs[i].add(&Self::new(vec![t]))?;
                },
                None => {
                    let lead = Self::new(vec![lt_p]);
                    p = p.sub(&lead)?;
                    remainder = remainder.add(&lead)?;
                },
            }
        }

        Ok((qs, remainder))
    }
}
