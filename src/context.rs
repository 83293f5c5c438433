use crate::poly::monomial::TermOrder;
use hashbrown::HashMap;
use std::cmp::Ordering;

/// Configuration of one ideal computation: the term order and the variable
/// list fixing what each exponent slot means.
///
/// Every monomial built for a computation must use the same context. It is
/// never mutated after construction, so independent computations can run
/// side by side with their own contexts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdealContext {
    order: TermOrder,
    variables: Vec<String>,
    indices: HashMap<String, usize>,
}

impl IdealContext {
    pub fn new<I, S>(order: TermOrder, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variables: Vec<String> = variables.into_iter().map(Into::into).collect();
        let mut indices = HashMap::with_capacity(variables.len());
        for (i, name) in variables.iter().enumerate() {
            // First occurrence owns the slot.
            indices.entry(name.clone()).or_insert(i);
        }
        Self {
            order,
            variables,
            indices,
        }
    }

    pub fn order(&self) -> TermOrder {
        self.order
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn num_of_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Same variables under another order.
    pub fn with_order(&self, order: TermOrder) -> Self {
        Self {
            order,
            ..self.clone()
        }
    }

    #[inline]
    pub fn compare(&self, lhs: &[u16], rhs: &[u16]) -> Ordering {
        self.order.compare(lhs, rhs)
    }

    /// Truncates or zero-pads `exponents` to the number of variables.
    pub fn fit_exponents(&self, mut exponents: Vec<u16>) -> Vec<u16> {
        exponents.resize(self.num_of_vars(), 0);
        exponents
    }
}
