/*!
The query front end: a [Formula] AST, its ENNF normaliser, and the final tri-valued evaluation
against a [Setups](crate::db::setups::Setups) ranking.
*/

mod ennf;
mod eval;
mod formula;

pub use ennf::normalize;
pub use eval::evaluate;
pub use formula::Formula;
