/*!
Evaluates a normalised [Formula] to a tri-valued [Entailment], routing objective literals and
junctions through [Setups] entailment and treating `K`/`B` atoms as the boundary between the
query language and the setup-level reasoning they are handed to as black boxes.
*/

use crate::db::setups::Setups;
use crate::reports::Entailment;
use crate::structures::clause::Clause;
use crate::structures::term::TermFactory;
use crate::types::err::ErrorKind;

use super::formula::Formula;

/// Evaluates `formula` (already normalised by [super::normalize]) against `setups` at default
/// split depth `k`. `Knowledge`/`Belief` nodes carry their own depth and override `k` for their
/// body.
pub fn evaluate(
    formula: &Formula,
    setups: &Setups,
    factory: &TermFactory,
    k: u32,
) -> Result<Entailment, ErrorKind> {
    match formula {
        Formula::True => Ok(Entailment::Yes),
        Formula::False => Ok(Entailment::No),
        Formula::Eq(a, b) => Ok(if a == b { Entailment::Yes } else { Entailment::No }),
        Formula::Neq(a, b) => Ok(if a != b { Entailment::Yes } else { Entailment::No }),
        Formula::Lit(l) => {
            let clause = Clause::unit(l.clone());
            if setups.entails(&clause, k, factory)? {
                return Ok(Entailment::Yes);
            }
            let negated = Clause::unit(l.flip());
            if setups.entails(&negated, k, factory)? {
                return Ok(Entailment::No);
            }
            Ok(Entailment::Unknown)
        }
        Formula::Not(inner) => Ok(match evaluate(inner, setups, factory, k)? {
            Entailment::Yes => Entailment::No,
            Entailment::No => Entailment::Yes,
            Entailment::Unknown => Entailment::Unknown,
        }),
        Formula::And(l, r) => {
            let lv = evaluate(l, setups, factory, k)?;
            if lv == Entailment::No {
                return Ok(Entailment::No);
            }
            let rv = evaluate(r, setups, factory, k)?;
            Ok(match (lv, rv) {
                (Entailment::Yes, Entailment::Yes) => Entailment::Yes,
                (_, Entailment::No) | (Entailment::No, _) => Entailment::No,
                _ => Entailment::Unknown,
            })
        }
        Formula::Or(l, r) => {
            let lv = evaluate(l, setups, factory, k)?;
            if lv == Entailment::Yes {
                return Ok(Entailment::Yes);
            }
            let rv = evaluate(r, setups, factory, k)?;
            Ok(match (lv, rv) {
                (Entailment::No, Entailment::No) => Entailment::No,
                (Entailment::Yes, _) | (_, Entailment::Yes) => Entailment::Yes,
                _ => Entailment::Unknown,
            })
        }
        Formula::Exists(..) | Formula::Forall(..) | Formula::Action(..) => {
            // eliminated by normalisation; reaching here means evaluate() was called on a
            // formula that was never passed through `normalize`.
            Err(crate::types::err::QueryError::FreeVariable.into())
        }
        Formula::Knowledge(depth, body) => {
            let root = &setups.levels()[0];
            evaluate_against_setup(body, root, setups, factory, *depth)
        }
        Formula::Belief(depth, body) => evaluate(body, setups, factory, *depth),
    }
}

/// Evaluates `formula` against a single setup (used for the `K` operator, which bypasses belief
/// ranking entirely).
fn evaluate_against_setup(
    formula: &Formula,
    setup: &std::rc::Rc<crate::db::setup::Setup>,
    setups: &Setups,
    factory: &TermFactory,
    k: u32,
) -> Result<Entailment, ErrorKind> {
    match formula {
        Formula::True => Ok(Entailment::Yes),
        Formula::False => Ok(Entailment::No),
        Formula::Eq(a, b) => Ok(if a == b { Entailment::Yes } else { Entailment::No }),
        Formula::Neq(a, b) => Ok(if a != b { Entailment::Yes } else { Entailment::No }),
        Formula::Lit(l) => {
            let clause = Clause::unit(l.clone());
            if setup.entails(&clause, k, factory, setups.policy())? {
                return Ok(Entailment::Yes);
            }
            let negated = Clause::unit(l.flip());
            if setup.entails(&negated, k, factory, setups.policy())? {
                return Ok(Entailment::No);
            }
            Ok(Entailment::Unknown)
        }
        Formula::Not(inner) => Ok(match evaluate_against_setup(inner, setup, setups, factory, k)? {
            Entailment::Yes => Entailment::No,
            Entailment::No => Entailment::Yes,
            Entailment::Unknown => Entailment::Unknown,
        }),
        Formula::And(l, r) => {
            let lv = evaluate_against_setup(l, setup, setups, factory, k)?;
            let rv = evaluate_against_setup(r, setup, setups, factory, k)?;
            Ok(match (lv, rv) {
                (Entailment::Yes, Entailment::Yes) => Entailment::Yes,
                (Entailment::No, _) | (_, Entailment::No) => Entailment::No,
                _ => Entailment::Unknown,
            })
        }
        Formula::Or(l, r) => {
            let lv = evaluate_against_setup(l, setup, setups, factory, k)?;
            let rv = evaluate_against_setup(r, setup, setups, factory, k)?;
            Ok(match (lv, rv) {
                (Entailment::No, Entailment::No) => Entailment::No,
                (Entailment::Yes, _) | (_, Entailment::Yes) => Entailment::Yes,
                _ => Entailment::Unknown,
            })
        }
        Formula::Exists(..) | Formula::Forall(..) | Formula::Action(..) => {
            Err(crate::types::err::QueryError::FreeVariable.into())
        }
        Formula::Knowledge(depth, body) => evaluate_against_setup(body, setup, setups, factory, *depth),
        Formula::Belief(depth, body) => evaluate(body, setups, factory, *depth),
    }
}
