/*!
A finite set of literals together with an [Ewff] guard.

The empty clause denotes `⊥`. A clause whose guard is [Ewff::True] and whose literals are all
ground and primitive is *primitive* in the sense of the original source: exactly the clauses a
[Setup](crate::db::setup::Setup) stores once grounding and model-enumeration are done (the guard,
having been checked true for the enumerated model, is simply dropped).
*/

mod resolution;
mod subsumption;
mod pel;

pub use pel::pel;

use std::cmp::Ordering;

use crate::structures::atom::Atom;
use crate::structures::ewff::Ewff;
use crate::structures::literal::Literal;
use crate::structures::term::TermFactory;
use crate::types::err::ErrorKind;

/// A clause: a set of literals (duplicates collapsed) plus a guard.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
    guard: Ewff,
}

impl Clause {
    /// Builds a clause from a literal set and guard, deduplicating literals.
    pub fn new(mut literals: Vec<Literal>, guard: Ewff) -> Clause {
        literals.dedup();
        Clause { literals, guard }
    }

    /// The empty clause, `⊥`.
    pub fn empty() -> Clause {
        Clause {
            literals: Vec::new(),
            guard: Ewff::True,
        }
    }

    /// A unit clause containing exactly `l`, with a trivial guard.
    pub fn unit(l: Literal) -> Clause {
        Clause {
            literals: vec![l],
            guard: Ewff::True,
        }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn guard(&self) -> &Ewff {
        &self.guard
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn is_valid_guard(&self) -> bool {
        matches!(self.guard, Ewff::True)
    }

    /// True iff the guard is trivial, all literals are ground, and all literals are primitive ---
    /// exactly the shape a [Setup](crate::db::setup::Setup) requires of inserted clauses.
    pub fn primitive(&self, factory: &TermFactory) -> bool {
        self.is_valid_guard()
            && self
                .literals
                .iter()
                .all(|l| l.is_ground(factory) && l.is_primitive(factory))
    }

    /// True iff the clause contains two literals that unify to the same atom with opposite sign.
    pub fn tautologous(&self, factory: &TermFactory) -> bool {
        for i in 0..self.literals.len() {
            for j in (i + 1)..self.literals.len() {
                let a = &self.literals[i];
                let b = &self.literals[j];
                if a.sign() == b.sign() {
                    continue;
                }
                if factory
                    .unify(a.lhs(), b.lhs(), &Default::default())
                    .map(|theta| factory.unify(a.rhs(), b.rhs(), &theta))
                    .is_some_and(|r| r.is_some())
                {
                    return true;
                }
            }
        }
        false
    }

    /// Applies a substitution to every literal and the guard. The caller should drop the result
    /// if [Clause::guard] becomes [Ewff::False] (the guarded clause is then vacuously valid).
    pub fn substitute(
        &self,
        factory: &mut TermFactory,
        theta: &crate::structures::substitution::Substitution,
    ) -> Clause {
        let literals = self
            .literals
            .iter()
            .map(|l| l.substitute(factory, theta))
            .collect();
        let guard = self.guard.substitute(factory, theta);
        Clause { literals, guard }
    }

    /// Extends the action prefix of every literal at the front (used to instantiate a boxed axiom
    /// into a specific situation).
    pub fn prepend_actions(&self, z: &[crate::structures::term::Term]) -> Clause {
        Clause {
            literals: self.literals.iter().map(|l| l.prepend_actions(z)).collect(),
            guard: self.guard.clone(),
        }
    }

    /// Binary resolution: given `l` in `self` and `l'` in `other` with `l = flip(l')` after
    /// unification, returns the resolvent. Fails when no unifier exists, the combined guard
    /// simplifies to [Ewff::False], or the resolvent is tautologous.
    pub fn resolve(
        &self,
        other: &Clause,
        l: usize,
        l_other: usize,
        factory: &mut TermFactory,
    ) -> Result<Clause, ErrorKind> {
        resolution::resolve(self, other, l, l_other, factory)
    }

    /// True iff `self` subsumes `d`: some substitution maps `self`'s literals into (a subset of)
    /// `d`'s literals and `d`'s guard implies `self`'s guard under that substitution.
    pub fn subsumes(&self, d: &Clause, factory: &TermFactory) -> bool {
        subsumption::subsumes(self, d, factory)
    }

    /// The atoms a splitter could usefully case-split on to help prove `goal` by resolution
    /// against `self` --- see [pel].
    pub fn pel(&self, goal: &Clause, factory: &TermFactory) -> Vec<Atom> {
        pel::pel(std::slice::from_ref(self), goal, factory)
    }

    /// A canonical ordering key: `(length, lexicographic literal order)`. Every [Setup] operation
    /// preserves this order among its stored clauses.
    pub fn cmp_in(&self, other: &Clause, factory: &TermFactory) -> Ordering {
        self.literals
            .len()
            .cmp(&other.literals.len())
            .then_with(|| {
                for (a, b) in self.literals.iter().zip(other.literals.iter()) {
                    let c = a.cmp_in(b, factory);
                    if c != Ordering::Equal {
                        return c;
                    }
                }
                Ordering::Equal
            })
    }
}
