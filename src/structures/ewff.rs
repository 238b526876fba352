/*!
Equality/inequality/sort well-formed formulas: the guard language of a universal clause.

Built from term (in)equalities, sort-membership tests, negation, and disjunction (conjunction is
expressed via nested `And`, matching the original source's `Ewff` combinators rather than the
distilled spec's "conjunction of atomic guards" shorthand --- see `SPEC_FULL.md` §4.11).
*/

use super::substitution::Substitution;
use super::term::{Sort, Term, TermFactory};

/// A guard formula over terms.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Ewff {
    True,
    False,
    Eq(Term, Term),
    Neq(Term, Term),
    SortMember(Term, Sort),
    Neg(Box<Ewff>),
    And(Box<Ewff>, Box<Ewff>),
    Or(Box<Ewff>, Box<Ewff>),
}

impl Ewff {
    pub fn and(self, other: Ewff) -> Ewff {
        match (&self, &other) {
            (Ewff::True, _) => other,
            (_, Ewff::True) => self,
            (Ewff::False, _) | (_, Ewff::False) => Ewff::False,
            _ => Ewff::And(Box::new(self), Box::new(other)),
        }
    }

    pub fn or(self, other: Ewff) -> Ewff {
        match (&self, &other) {
            (Ewff::False, _) => other,
            (_, Ewff::False) => self,
            (Ewff::True, _) | (_, Ewff::True) => Ewff::True,
            _ => Ewff::Or(Box::new(self), Box::new(other)),
        }
    }

    pub fn neg(self) -> Ewff {
        match self {
            Ewff::True => Ewff::False,
            Ewff::False => Ewff::True,
            Ewff::Neg(inner) => *inner,
            other => Ewff::Neg(Box::new(other)),
        }
    }

    /// All variables occurring free in the guard.
    pub fn variables(&self, factory: &TermFactory, out: &mut Vec<Term>) {
        match self {
            Ewff::True | Ewff::False => {}
            Ewff::Eq(a, b) | Ewff::Neq(a, b) => {
                factory.variables_in(*a, out);
                factory.variables_in(*b, out);
            }
            Ewff::SortMember(t, _) => factory.variables_in(*t, out),
            Ewff::Neg(inner) => inner.variables(factory, out),
            Ewff::And(l, r) | Ewff::Or(l, r) => {
                l.variables(factory, out);
                r.variables(factory, out);
            }
        }
    }

    /// Evaluates the guard under a total variable assignment (theta must bind every free
    /// variable).
    pub fn eval(&self, factory: &TermFactory, theta: &Substitution) -> bool {
        match self {
            Ewff::True => true,
            Ewff::False => false,
            // `unify` resolves both sides through `theta` and compares structurally, so this is
            // correct for compound terms too (e.g. a flattened literal's `Eq(fresh_var, f(x))`
            // guard), not just the bare-variable case a direct `theta.get` lookup would catch.
            Ewff::Eq(a, b) => factory.unify(*a, *b, theta).is_some(),
            Ewff::Neq(a, b) => !Ewff::Eq(*a, *b).eval(factory, theta),
            Ewff::SortMember(t, sort) => {
                let t = theta.get(*t).unwrap_or(*t);
                factory.sort(t) == *sort
            }
            Ewff::Neg(inner) => !inner.eval(factory, theta),
            Ewff::And(l, r) => l.eval(factory, theta) && r.eval(factory, theta),
            Ewff::Or(l, r) => l.eval(factory, theta) || r.eval(factory, theta),
        }
    }

    /// Returns the residual guard after substituting, collapsing ground (in)equalities to
    /// `True`/`False`. An `Ewff::False` residual signals the guarded clause is vacuously valid and
    /// should be dropped by the caller.
    pub fn substitute(&self, factory: &mut TermFactory, theta: &Substitution) -> Ewff {
        match self {
            Ewff::True => Ewff::True,
            Ewff::False => Ewff::False,
            Ewff::Eq(a, b) => {
                let a = factory.substitute(*a, theta);
                let b = factory.substitute(*b, theta);
                if factory.is_ground(a) && factory.is_ground(b) {
                    if a == b {
                        Ewff::True
                    } else {
                        Ewff::False
                    }
                } else {
                    Ewff::Eq(a, b)
                }
            }
            Ewff::Neq(a, b) => Ewff::Eq(*a, *b).substitute(factory, theta).neg(),
            Ewff::SortMember(t, sort) => {
                let t = factory.substitute(*t, theta);
                if factory.is_ground(t) {
                    if factory.sort(t) == *sort {
                        Ewff::True
                    } else {
                        Ewff::False
                    }
                } else {
                    Ewff::SortMember(t, *sort)
                }
            }
            Ewff::Neg(inner) => inner.substitute(factory, theta).neg(),
            Ewff::And(l, r) => l.substitute(factory, theta).and(r.substitute(factory, theta)),
            Ewff::Or(l, r) => l.substitute(factory, theta).or(r.substitute(factory, theta)),
        }
    }

    /// Enumerates every variable assignment over `hplus` (names of matching sort) making the
    /// guard true. A lazy iterator stack is used rather than materialising the full cross-product
    /// of names per variable (the "coroutine-style enumeration" design note).
    pub fn models<'a>(
        &'a self,
        factory: &'a TermFactory,
        variables: &'a [Term],
        hplus: &'a [Term],
    ) -> EwffModels<'a> {
        EwffModels::new(self, factory, variables, hplus)
    }
}

/// Lazy iterator over satisfying assignments of an [Ewff] over a finite name universe.
///
/// Advances one variable at a time, like a odometer: `cursor[i]` indexes into the names of
/// matching sort available for `variables[i]`, backtracking (incrementing the next cursor up) when
/// a variable's candidates are exhausted.
pub struct EwffModels<'a> {
    guard: &'a Ewff,
    factory: &'a TermFactory,
    variables: &'a [Term],
    // per-variable candidate name lists (restricted to the variable's sort)
    candidates: Vec<Vec<Term>>,
    cursor: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl<'a> EwffModels<'a> {
    fn new(guard: &'a Ewff, factory: &'a TermFactory, variables: &'a [Term], hplus: &'a [Term]) -> Self {
        let candidates: Vec<Vec<Term>> = variables
            .iter()
            .map(|v| {
                let sort = factory.sort(*v);
                hplus
                    .iter()
                    .copied()
                    .filter(|n| factory.sort(*n) == sort)
                    .collect::<Vec<_>>()
            })
            .collect();
        let exhausted = candidates.iter().any(|c| c.is_empty()) && !variables.is_empty();
        let cursor = vec![0; variables.len()];
        EwffModels {
            guard,
            factory,
            variables,
            candidates,
            cursor,
            started: false,
            exhausted,
        }
    }

    fn current_assignment(&self) -> Substitution {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, self.candidates[i][self.cursor[i]]))
            .collect()
    }

    /// Advances the odometer to the next combination; returns false once exhausted.
    fn advance(&mut self) -> bool {
        if self.variables.is_empty() {
            return false;
        }
        let mut i = self.cursor.len();
        loop {
            if i == 0 {
                return false;
            }
            i -= 1;
            self.cursor[i] += 1;
            if self.cursor[i] < self.candidates[i].len() {
                return true;
            }
            self.cursor[i] = 0;
        }
    }
}

impl<'a> Iterator for EwffModels<'a> {
    type Item = Substitution;

    fn next(&mut self) -> Option<Substitution> {
        if self.exhausted {
            return None;
        }
        if self.variables.is_empty() {
            if self.started {
                return None;
            }
            self.started = true;
            let empty = Substitution::new();
            return if self.guard.eval(self.factory, &empty) {
                Some(empty)
            } else {
                None
            };
        }
        loop {
            if self.started {
                if !self.advance() {
                    self.exhausted = true;
                    return None;
                }
            }
            self.started = true;
            let theta = self.current_assignment();
            if self.guard.eval(self.factory, &theta) {
                return Some(theta);
            }
        }
    }
}
