use crate::{
    buchberger::Buchberger,
    coefficient::Coefficient,
    context::IdealContext,
    error::Result,
    poly::{monomial::Monomial, polynomial::MultiPolynomial},
};
use rayon::prelude::*;

/// Reduced Groebner basis of the ideal generated by `generators`: Buchberger
/// fixpoint, then minimization, then normalization.
///
/// An empty generator list gives an empty basis. Any coefficient failure
/// aborts the whole computation.
pub fn groebner_basis<C: Coefficient>(
    ctx: &IdealContext,
    generators: &[MultiPolynomial<C>],
) -> Result<Vec<MultiPolynomial<C>>> {
    let basis = Buchberger::new(ctx, generators)?.run()?;
    let basis = minimize_basis(ctx, &basis)?;
    normalize_basis(ctx, &basis)
}

/// Check whether given basis is groebner basis
pub fn is_groebner_basis<C: Coefficient>(
    ctx: &IdealContext,
    ideal: &[MultiPolynomial<C>],
) -> Result<bool> {
    let n = ideal.len();
    let remainders_vanish = (0..n)
        .into_par_iter()
        .flat_map(|i| ((i + 1)..n).into_par_iter().map(move |j| (i, j)))
        .map(|(i, j)| {
            ideal[i]
                .s_polynomial(ctx, &ideal[j])?
                .normal_form(ctx, ideal)
                .map(|r| r.is_zero())
        })
        .collect::<Result<Vec<bool>>>()?;
    Ok(remainders_vanish.into_iter().all(|z| z))
}

/// Drops generators whose leading monomial is divisible by another
/// generator's, then interreduces the survivors against each other.
///
/// Among generators sharing a leading monomial the earliest one survives;
/// otherwise the outcome does not depend on the input order. Survivors are
/// reduced against the other survivors as they were before this pass.
pub fn minimize_basis<C: Coefficient>(
    ctx: &IdealContext,
    basis: &[MultiPolynomial<C>],
) -> Result<Vec<MultiPolynomial<C>>> {
    progress!("Minimize start with basis.len(): {}", basis.len());

    let basis = basis
        .iter()
        .map(MultiPolynomial::merge_like_terms)
        .collect::<Result<Vec<_>>>()?;
    let leads: Vec<(&MultiPolynomial<C>, &Monomial<C>)> = basis
        .iter()
        .filter_map(|f| f.leading_monomial(ctx).map(|lt| (f, lt)))
        .collect();

    let survivors: Vec<MultiPolynomial<C>> = leads
        .iter()
        .enumerate()
        .filter(|(i, (_, lt_i))| {
            !leads.iter().enumerate().any(|(j, (_, lt_j))| {
                j != *i
                    && lt_i.is_divisible_by(lt_j)
                    && (j < *i || !lt_i.same_exponents(lt_j))
            })
        })
        .map(|(_, (f, _))| (*f).clone())
        .collect();

    let reduced = (0..survivors.len())
        .map(|i| {
            let others: Vec<MultiPolynomial<C>> = survivors
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, g)| g.clone())
                .collect();
            survivors[i].normal_form(ctx, &others)
        })
        .collect::<Result<Vec<_>>>()?;

    progress!("Minimize end with basis.len(): {}", reduced.len());
    Ok(reduced)
}

/// Makes every generator monic.
pub fn normalize_basis<C: Coefficient>(
    ctx: &IdealContext,
    basis: &[MultiPolynomial<C>],
) -> Result<Vec<MultiPolynomial<C>>> {
    basis.iter().map(|f| f.normalize(ctx)).collect()
}

/// Monic, and no term of a generator is divisible by the leading monomial of
/// another generator.
pub fn is_reduced_basis<C: Coefficient>(
    ctx: &IdealContext,
    basis: &[MultiPolynomial<C>],
) -> bool {
    basis.iter().enumerate().all(|(i, f)| {
        f.is_monic(ctx)
            && basis.iter().enumerate().all(|(j, g)| {
                i == j
                    || g.leading_monomial(ctx).map_or(true, |lt_g| {
                        f.terms()
                            .iter()
                            .filter(|m| !m.coefficient().is_zero())
                            .all(|m| !m.is_divisible_by(lt_g))
                    })
            })
    })
}

/// Ideal membership test against a Groebner basis.
pub fn ideal_contains<C: Coefficient>(
    ctx: &IdealContext,
    basis: &[MultiPolynomial<C>],
    f: &MultiPolynomial<C>,
) -> Result<bool> {
    Ok(f.normal_form(ctx, basis)?.is_zero())
}
