/*!
Literals: `t1 = t2` or `t1 != t2`, quasi-primitive, carrying an action prefix.
*/

use std::cmp::Ordering;

use crate::types::err::{ErrorKind, LiteralError};

use super::atom::{ActionPrefix, Atom};
use super::ewff::Ewff;
use super::substitution::Substitution;
use super::term::{Term, TermFactory};

/// A literal: an [Atom] together with a polarity.
///
/// Construction enforces the quasi-primitive invariant from the spec: after normalisation, `lhs`
/// must be primitive (a function of names/variables of non-rigid sort) and `rhs` must be a name or
/// variable.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Literal {
    atom: Atom,
    sign: bool,
}

impl Literal {
    /// Builds a literal, checking the quasi-primitive invariant.
    pub fn new(
        factory: &TermFactory,
        action_prefix: ActionPrefix,
        sign: bool,
        lhs: Term,
        rhs: Term,
    ) -> Result<Self, ErrorKind> {
        if !factory.is_function(lhs) {
            return Err(LiteralError::NotQuasiPrimitive.into());
        }
        if !(factory.is_name(rhs) || factory.is_variable(rhs)) {
            return Err(LiteralError::NotQuasiPrimitive.into());
        }
        Ok(Literal {
            atom: Atom::new(action_prefix, lhs, rhs),
            sign,
        })
    }

    /// Builds a literal, flattening nested function applications among `lhs`'s arguments into
    /// fresh variables guarded by equality rather than rejecting them outright (`SPEC_FULL.md`
    /// §4.11). An argument that is already a name or variable is left alone; an argument that is
    /// itself a function application is replaced by a fresh variable of the same sort, and
    /// `Eq(fresh, original)` is conjoined onto the returned guard. Used by clause construction for
    /// literals whose arguments weren't already quasi-primitive.
    pub fn flatten(
        factory: &mut TermFactory,
        action_prefix: ActionPrefix,
        sign: bool,
        lhs: Term,
        rhs: Term,
    ) -> Result<(Self, Ewff), ErrorKind> {
        if !factory.is_function(lhs) {
            return Err(LiteralError::NotQuasiPrimitive.into());
        }
        let fun = factory.fun_sym(lhs).expect("is_function implies a function symbol");
        let args = factory.args(lhs).to_vec();
        let mut guard = Ewff::True;
        let mut flat_args = Vec::with_capacity(args.len());
        for arg in args {
            if factory.is_name(arg) || factory.is_variable(arg) {
                flat_args.push(arg);
            } else {
                let fresh = factory.create_var(factory.sort(arg));
                guard = guard.and(Ewff::Eq(fresh, arg));
                flat_args.push(fresh);
            }
        }
        let flat_lhs = factory.apply(fun, flat_args)?;
        let literal = Literal::new(factory, action_prefix, sign, flat_lhs, rhs)?;
        Ok((literal, guard))
    }

    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn lhs(&self) -> Term {
        self.atom.lhs
    }

    pub fn rhs(&self) -> Term {
        self.atom.rhs
    }

    pub fn action_prefix(&self) -> &[Term] {
        &self.atom.action_prefix
    }

    pub fn atom(&self) -> &Atom {
        &self.atom
    }

    /// Toggles polarity. Idempotent when applied twice.
    pub fn flip(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            sign: !self.sign,
        }
    }

    /// Returns the positive form of this literal (same atom, sign true).
    pub fn positive(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            sign: true,
        }
    }

    /// True iff this and `other` are complementary: same atom, opposite sign.
    pub fn complementary(&self, other: &Literal) -> bool {
        self.atom == other.atom && self.sign != other.sign
    }

    /// Extends the action prefix at the front.
    pub fn prepend_actions(&self, z: &[Term]) -> Literal {
        let mut atom = self.atom.clone();
        atom.prepend_actions(z);
        Literal {
            atom,
            sign: self.sign,
        }
    }

    /// Applies a substitution to both sides and the action prefix.
    pub fn substitute(&self, factory: &mut TermFactory, theta: &Substitution) -> Literal {
        let lhs = factory.substitute(self.atom.lhs, theta);
        let rhs = factory.substitute(self.atom.rhs, theta);
        let action_prefix = self
            .atom
            .action_prefix
            .iter()
            .map(|a| factory.substitute(*a, theta))
            .collect();
        Literal {
            atom: Atom::new(action_prefix, lhs, rhs),
            sign: self.sign,
        }
    }

    /// True iff ground (no variables in lhs, rhs, or action prefix).
    pub fn is_ground(&self, factory: &TermFactory) -> bool {
        factory.is_ground(self.atom.lhs)
            && factory.is_ground(self.atom.rhs)
            && self.atom.action_prefix.iter().all(|a| factory.is_ground(*a))
    }

    /// True iff `lhs` is primitive (function of names only).
    pub fn is_primitive(&self, factory: &TermFactory) -> bool {
        factory.is_primitive(self.atom.lhs)
    }

    /// Lexicographic comparator on (predicate symbol, sign, action prefix, args). Load-bearing for
    /// clause and setup canonicalisation --- the ordering is total and deterministic for a fixed
    /// factory, since symbol ids are assigned in creation order and never reused.
    pub fn cmp_in(&self, other: &Literal, factory: &TermFactory) -> Ordering {
        // the head of `lhs` determines the predicate; we order by the raw function-symbol id as a
        // stable proxy for "predicate symbol" since distinct predicates intern to distinct ids.
        factory
            .data_fun_id(self.lhs())
            .cmp(&factory.data_fun_id(other.lhs()))
            .then_with(|| self.sign.cmp(&other.sign).reverse())
            .then_with(|| self.atom.action_prefix.cmp(&other.atom.action_prefix))
            .then_with(|| factory.args(self.lhs()).cmp(factory.args(other.lhs())))
            .then_with(|| self.atom.rhs.cmp(&other.atom.rhs))
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} actions]{}({:?} {} {:?})",
            self.atom.action_prefix.len(),
            if self.sign { "" } else { "¬" },
            self.atom.lhs,
            if self.sign { "=" } else { "≠" },
            self.atom.rhs
        )
    }
}
