/*!
The abstract elements of a setup: [Sort]s and [Term]s, [Atom]s and [Literal]s, [Ewff] guards, and
[Clause]s built from them.

Everything in this module is inert data plus the operations described on it in the library's
top-level documentation; the decision procedure built on top of these structures lives in
[crate::db] (the [Setup](crate::db::setup::Setup) and [Setups](crate::db::setups::Setups)) and
[crate::query] (grounding and normalisation of formulas into clauses).
*/

pub mod term;
pub use term::{Name, Sort, Term, TermFactory, Var};

pub mod atom;
pub use atom::{Atom, PredId};

pub mod literal;
pub use literal::Literal;

pub mod ewff;
pub use ewff::Ewff;

pub mod clause;
pub use clause::Clause;

pub mod substitution;
pub use substitution::Substitution;
