pub mod monomial;
pub mod polynomial;
pub mod reduction;
