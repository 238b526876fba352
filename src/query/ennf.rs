/*!
ENNF (Extended Negation Normal Form) transformation: pushes actions inward to literal action
prefixes, pushes negation inward to literals, grounds quantifiers over H+, simplifies ground
(in)equalities, and optionally distributes disjunction over conjunction into CNF.

Knowledge and belief atoms are opaque to the action- and negation-pushing passes beyond this
normalisation step (per the design notes): their own body is itself fully normalised, but a `K`/`B`
node is never split apart or commuted past by an enclosing action or negation the way an ordinary
junction or literal is. The one exception, a deliberate resolution of an "ambiguous source
behaviour" design note, is that an enclosing action prefix *is* carried into a nested `K`/`B` body
--- the situation a nested knowledge/belief check is evaluated in must still reflect the actions
performed to reach it.
*/

use crate::misc::log::targets;
use crate::structures::substitution::Substitution;
use crate::structures::term::{Term, TermFactory};
use crate::types::err::{ErrorKind, QueryError};

use super::formula::Formula;

/// Runs the full ENNF pipeline: push actions, push negation, ground quantifiers over `hplus`,
/// simplify, and (if `cnf`) distribute disjunction over conjunction.
pub fn normalize(
    formula: &Formula,
    factory: &mut TermFactory,
    hplus: &[Term],
    cnf: bool,
) -> Result<Formula, ErrorKind> {
    log::trace!(target: targets::NORMALISE, "normalising query over {} H+ names", hplus.len());
    let actioned = push_actions(formula, &[]);
    let negated = push_negation(&actioned);
    let grounded = ground_quantifiers(&negated, factory, hplus)?;
    let simplified = simplify(&grounded, factory);
    check_ground(&simplified, factory)?;
    if cnf {
        log::trace!(target: targets::NORMALISE, "distributing to CNF");
        Ok(distribute(simplified))
    } else {
        Ok(simplified)
    }
}

fn push_actions(formula: &Formula, pending: &[Term]) -> Formula {
    match formula {
        Formula::True | Formula::False => formula.clone(),
        Formula::Eq(a, b) => Formula::Eq(*a, *b),
        Formula::Neq(a, b) => Formula::Neq(*a, *b),
        Formula::Lit(l) => Formula::Lit(l.prepend_actions(pending)),
        Formula::Not(inner) => Formula::Not(Box::new(push_actions(inner, pending))),
        Formula::And(l, r) => Formula::And(
            Box::new(push_actions(l, pending)),
            Box::new(push_actions(r, pending)),
        ),
        Formula::Or(l, r) => Formula::Or(
            Box::new(push_actions(l, pending)),
            Box::new(push_actions(r, pending)),
        ),
        Formula::Exists(x, body) => Formula::Exists(*x, Box::new(push_actions(body, pending))),
        Formula::Forall(x, body) => Formula::Forall(*x, Box::new(push_actions(body, pending))),
        Formula::Action(a, body) => {
            let mut next = pending.to_vec();
            next.push(*a);
            push_actions(body, &next)
        }
        Formula::Knowledge(k, body) => Formula::Knowledge(*k, Box::new(push_actions(body, pending))),
        Formula::Belief(k, body) => Formula::Belief(*k, Box::new(push_actions(body, pending))),
    }
}

fn push_negation(formula: &Formula) -> Formula {
    match formula {
        Formula::Not(inner) => negate(inner),
        Formula::True | Formula::False | Formula::Eq(..) | Formula::Neq(..) | Formula::Lit(_) => {
            formula.clone()
        }
        Formula::And(l, r) => Formula::And(Box::new(push_negation(l)), Box::new(push_negation(r))),
        Formula::Or(l, r) => Formula::Or(Box::new(push_negation(l)), Box::new(push_negation(r))),
        Formula::Exists(x, body) => Formula::Exists(*x, Box::new(push_negation(body))),
        Formula::Forall(x, body) => Formula::Forall(*x, Box::new(push_negation(body))),
        Formula::Action(a, body) => Formula::Action(*a, Box::new(push_negation(body))),
        Formula::Knowledge(k, body) => Formula::Knowledge(*k, Box::new(push_negation(body))),
        Formula::Belief(k, body) => Formula::Belief(*k, Box::new(push_negation(body))),
    }
}

/// Pushes a negation already known to wrap `formula` one level further in.
fn negate(formula: &Formula) -> Formula {
    match formula {
        Formula::True => Formula::False,
        Formula::False => Formula::True,
        Formula::Eq(a, b) => Formula::Neq(*a, *b),
        Formula::Neq(a, b) => Formula::Eq(*a, *b),
        Formula::Lit(l) => Formula::Lit(l.flip()),
        Formula::Not(inner) => push_negation(inner),
        Formula::And(l, r) => Formula::Or(Box::new(negate(l)), Box::new(negate(r))),
        Formula::Or(l, r) => Formula::And(Box::new(negate(l)), Box::new(negate(r))),
        Formula::Exists(x, body) => Formula::Forall(*x, Box::new(negate(body))),
        Formula::Forall(x, body) => Formula::Exists(*x, Box::new(negate(body))),
        Formula::Action(a, body) => Formula::Action(*a, Box::new(negate(body))),
        // K/B atoms are opaque to negation: only their own body is renormalised.
        Formula::Knowledge(k, body) => Formula::Not(Box::new(Formula::Knowledge(*k, Box::new(push_negation(body))))),
        Formula::Belief(k, body) => Formula::Not(Box::new(Formula::Belief(*k, Box::new(push_negation(body))))),
    }
}

fn ground_quantifiers(
    formula: &Formula,
    factory: &mut TermFactory,
    hplus: &[Term],
) -> Result<Formula, ErrorKind> {
    match formula {
        Formula::True | Formula::False | Formula::Eq(..) | Formula::Neq(..) | Formula::Lit(_) => {
            Ok(formula.clone())
        }
        Formula::Not(inner) => Ok(Formula::Not(Box::new(ground_quantifiers(inner, factory, hplus)?))),
        Formula::And(l, r) => Ok(Formula::And(
            Box::new(ground_quantifiers(l, factory, hplus)?),
            Box::new(ground_quantifiers(r, factory, hplus)?),
        )),
        Formula::Or(l, r) => Ok(Formula::Or(
            Box::new(ground_quantifiers(l, factory, hplus)?),
            Box::new(ground_quantifiers(r, factory, hplus)?),
        )),
        Formula::Exists(x, body) => {
            let sort = factory.sort(*x);
            let mut out = Formula::False;
            for n in hplus.iter().filter(|n| factory.sort(**n) == sort) {
                let theta: Substitution = std::iter::once((*x, *n)).collect();
                let instance = substitute_formula(body, factory, &theta);
                let instance = ground_quantifiers(&instance, factory, hplus)?;
                out = out.or(instance);
            }
            Ok(out)
        }
        Formula::Forall(x, body) => {
            let sort = factory.sort(*x);
            let mut out = Formula::True;
            for n in hplus.iter().filter(|n| factory.sort(**n) == sort) {
                let theta: Substitution = std::iter::once((*x, *n)).collect();
                let instance = substitute_formula(body, factory, &theta);
                let instance = ground_quantifiers(&instance, factory, hplus)?;
                out = out.and(instance);
            }
            Ok(out)
        }
        Formula::Action(a, body) => Ok(Formula::Action(*a, Box::new(ground_quantifiers(body, factory, hplus)?))),
        Formula::Knowledge(k, body) => Ok(Formula::Knowledge(*k, Box::new(ground_quantifiers(body, factory, hplus)?))),
        Formula::Belief(k, body) => Ok(Formula::Belief(*k, Box::new(ground_quantifiers(body, factory, hplus)?))),
    }
}

fn substitute_formula(formula: &Formula, factory: &mut TermFactory, theta: &Substitution) -> Formula {
    match formula {
        Formula::True | Formula::False => formula.clone(),
        Formula::Eq(a, b) => Formula::Eq(factory.substitute(*a, theta), factory.substitute(*b, theta)),
        Formula::Neq(a, b) => Formula::Neq(factory.substitute(*a, theta), factory.substitute(*b, theta)),
        Formula::Lit(l) => Formula::Lit(l.substitute(factory, theta)),
        Formula::Not(inner) => Formula::Not(Box::new(substitute_formula(inner, factory, theta))),
        Formula::And(l, r) => Formula::And(
            Box::new(substitute_formula(l, factory, theta)),
            Box::new(substitute_formula(r, factory, theta)),
        ),
        Formula::Or(l, r) => Formula::Or(
            Box::new(substitute_formula(l, factory, theta)),
            Box::new(substitute_formula(r, factory, theta)),
        ),
        Formula::Exists(x, body) => Formula::Exists(*x, Box::new(substitute_formula(body, factory, theta))),
        Formula::Forall(x, body) => Formula::Forall(*x, Box::new(substitute_formula(body, factory, theta))),
        Formula::Action(a, body) => {
            Formula::Action(factory.substitute(*a, theta), Box::new(substitute_formula(body, factory, theta)))
        }
        Formula::Knowledge(k, body) => Formula::Knowledge(*k, Box::new(substitute_formula(body, factory, theta))),
        Formula::Belief(k, body) => Formula::Belief(*k, Box::new(substitute_formula(body, factory, theta))),
    }
}

fn simplify(formula: &Formula, factory: &TermFactory) -> Formula {
    match formula {
        Formula::True | Formula::False => formula.clone(),
        Formula::Eq(a, b) => {
            if factory.is_ground(*a) && factory.is_ground(*b) {
                if a == b {
                    Formula::True
                } else {
                    Formula::False
                }
            } else {
                formula.clone()
            }
        }
        Formula::Neq(a, b) => match simplify(&Formula::Eq(*a, *b), factory) {
            Formula::True => Formula::False,
            Formula::False => Formula::True,
            other => Formula::Not(Box::new(other)),
        },
        Formula::Lit(_) => formula.clone(),
        Formula::Not(inner) => match simplify(inner, factory) {
            Formula::True => Formula::False,
            Formula::False => Formula::True,
            other => Formula::Not(Box::new(other)),
        },
        Formula::And(l, r) => match (simplify(l, factory), simplify(r, factory)) {
            (Formula::False, _) | (_, Formula::False) => Formula::False,
            (Formula::True, other) | (other, Formula::True) => other,
            (a, b) => Formula::And(Box::new(a), Box::new(b)),
        },
        Formula::Or(l, r) => match (simplify(l, factory), simplify(r, factory)) {
            (Formula::True, _) | (_, Formula::True) => Formula::True,
            (Formula::False, other) | (other, Formula::False) => other,
            (a, b) => Formula::Or(Box::new(a), Box::new(b)),
        },
        // grounding eliminates these in ordinary use; kept structural if ever reached directly.
        Formula::Exists(x, body) => Formula::Exists(*x, Box::new(simplify(body, factory))),
        Formula::Forall(x, body) => Formula::Forall(*x, Box::new(simplify(body, factory))),
        Formula::Action(a, body) => Formula::Action(*a, Box::new(simplify(body, factory))),
        Formula::Knowledge(k, body) => Formula::Knowledge(*k, Box::new(simplify(body, factory))),
        Formula::Belief(k, body) => Formula::Belief(*k, Box::new(simplify(body, factory))),
    }
}

/// Distributes `∨` over `∧`, treating `K`/`B` atoms as opaque literals.
fn distribute(formula: Formula) -> Formula {
    match formula {
        Formula::And(l, r) => Formula::And(Box::new(distribute(*l)), Box::new(distribute(*r))),
        Formula::Or(l, r) => {
            let dl = distribute(*l);
            let dr = distribute(*r);
            match (dl, dr) {
                (Formula::And(a, b), other) => distribute(Formula::And(
                    Box::new(Formula::Or(a, Box::new(other.clone()))),
                    Box::new(Formula::Or(b, Box::new(other))),
                )),
                (other, Formula::And(a, b)) => distribute(Formula::And(
                    Box::new(Formula::Or(Box::new(other.clone()), a)),
                    Box::new(Formula::Or(Box::new(other), b)),
                )),
                (a, b) => Formula::Or(Box::new(a), Box::new(b)),
            }
        }
        other => other,
    }
}

/// After grounding, every term reachable outside a `K`/`B` body must be ground: any remaining
/// variable means the original query had a variable not bound by any quantifier.
fn check_ground(formula: &Formula, factory: &TermFactory) -> Result<(), ErrorKind> {
    match formula {
        Formula::True | Formula::False => Ok(()),
        Formula::Eq(a, b) | Formula::Neq(a, b) => {
            if factory.is_ground(*a) && factory.is_ground(*b) {
                Ok(())
            } else {
                Err(QueryError::FreeVariable.into())
            }
        }
        Formula::Lit(l) => {
            if l.is_ground(factory) {
                Ok(())
            } else {
                Err(QueryError::FreeVariable.into())
            }
        }
        Formula::Not(inner) => check_ground(inner, factory),
        Formula::And(l, r) | Formula::Or(l, r) => {
            check_ground(l, factory)?;
            check_ground(r, factory)
        }
        Formula::Exists(_, body) | Formula::Forall(_, body) => check_ground(body, factory),
        Formula::Action(_, body) => check_ground(body, factory),
        Formula::Knowledge(_, body) | Formula::Belief(_, body) => check_ground(body, factory),
    }
}
