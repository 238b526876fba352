use crate::structures::ewff::Ewff;
use crate::structures::substitution::Substitution;
use crate::structures::term::TermFactory;
use crate::types::err::{ClauseError, ErrorKind};

use super::Clause;

pub(super) fn resolve(
    c: &Clause,
    d: &Clause,
    l: usize,
    l_other: usize,
    factory: &mut TermFactory,
) -> Result<Clause, ErrorKind> {
    let a = &c.literals[l];
    let b = &d.literals[l_other];

    if a.sign() == b.sign() {
        return Err(ClauseError::UnificationFailed.into());
    }

    let theta = factory
        .unify(a.lhs(), b.lhs(), &Substitution::new())
        .and_then(|t| factory.unify(a.rhs(), b.rhs(), &t))
        .ok_or(ClauseError::UnificationFailed)?;

    let mut literals: Vec<_> = c
        .literals
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != l)
        .map(|(_, lit)| lit.substitute(factory, &theta))
        .collect();
    literals.extend(
        d.literals
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != l_other)
            .map(|(_, lit)| lit.substitute(factory, &theta)),
    );

    let guard = c
        .guard
        .substitute(factory, &theta)
        .and(d.guard.substitute(factory, &theta));
    if matches!(guard, Ewff::False) {
        return Err(ClauseError::GuardUnsatisfiable.into());
    }

    let resolvent = Clause::new(literals, guard);
    if resolvent.tautologous(factory) {
        return Err(ClauseError::Tautologous.into());
    }
    Ok(resolvent)
}
