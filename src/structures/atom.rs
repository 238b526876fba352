/*!
Ground/non-ground predicate applications carrying an action prefix.

An [Atom] is the unsigned core of a [Literal](super::literal::Literal): a primitive term
(`lhs`, a predicate applied to names/variables) set equal to a name or variable (`rhs`), evaluated
in a situation given by an ordered sequence of action names (the action prefix).
*/

use super::term::Term;

/// Identifies a predicate symbol. `SF` and `POSS` are ordinary predicate ids, distinguished from
/// user predicates only by being the well-known ids the [Grounder](crate::grounder::Grounder) and
/// [Context](crate::context::Context) look for --- not by string-matching, per the original
/// source's treatment of sensing/executability as regular predicates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct PredId(pub u32);

/// The action prefix a literal or clause is evaluated under: an ordered sequence of action names,
/// outermost action first (z̄ = ⟨a₁,…,aₘ⟩).
pub type ActionPrefix = Vec<Term>;

/// A ground/non-ground predicate application, carrying its action prefix.
///
/// `lhs` is expected to be primitive (a function of names/variables); `rhs` is a name or
/// variable. This invariant ("quasi-primitive") is enforced by
/// [Literal::new](super::literal::Literal::new), not by `Atom` itself, mirroring the source's
/// separation of `Atom` (storage) from `Literal` (construction + validation).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Atom {
    pub action_prefix: ActionPrefix,
    pub lhs: Term,
    pub rhs: Term,
}

impl Atom {
    pub fn new(action_prefix: ActionPrefix, lhs: Term, rhs: Term) -> Self {
        Atom {
            action_prefix,
            lhs,
            rhs,
        }
    }

    /// Extends the action prefix at the front, used when grounding a boxed axiom into a specific
    /// situation (§4.1 `prepend-actions`).
    pub fn prepend_actions(&mut self, z: &[Term]) {
        let mut new_prefix = z.to_vec();
        new_prefix.extend(self.action_prefix.iter().copied());
        self.action_prefix = new_prefix;
    }
}
