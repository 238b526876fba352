use crate::structures::ewff::Ewff;
use crate::structures::literal::Literal;
use crate::structures::substitution::Substitution;
use crate::structures::term::TermFactory;

use super::Clause;

/// Backtracking search for a substitution mapping every literal of `c` into a distinct literal of
/// `d`, such that `d`'s guard is compatible with `c`'s guard under that substitution.
///
/// For the ground, trivially-guarded clauses a [Setup](crate::db::setup::Setup) actually stores,
/// this reduces to direct set containment, since ground terms only unify with themselves.
pub(super) fn subsumes(c: &Clause, d: &Clause, factory: &TermFactory) -> bool {
    let used = vec![false; d.literals.len()];
    backtrack(&c.literals, 0, &d.literals, used, Substitution::new(), factory).is_some_and(
        |theta| {
            // `substitute` only needs `&mut` to intern newly-built terms; for a guard-compatibility
            // check we only care about the `True`/`False` collapse, so a throwaway clone avoids
            // requiring `subsumes` (used from read-heavy minimisation paths) to take `&mut`.
            let mut scratch = factory.clone();
            let residual = c.guard.substitute(&mut scratch, &theta);
            !matches!(residual, Ewff::False)
        },
    )
}

fn backtrack(
    remaining: &[Literal],
    idx: usize,
    pool: &[Literal],
    used: Vec<bool>,
    theta: Substitution,
    factory: &TermFactory,
) -> Option<Substitution> {
    if idx == remaining.len() {
        return Some(theta);
    }
    let lit = &remaining[idx];
    for (j, cand) in pool.iter().enumerate() {
        if used[j] || lit.sign() != cand.sign() {
            continue;
        }
        if lit.action_prefix().len() != cand.action_prefix().len() {
            continue;
        }
        let Some(mut extended) = factory.unify(lit.lhs(), cand.lhs(), &theta) else {
            continue;
        };
        let Some(extended2) = factory.unify(lit.rhs(), cand.rhs(), &extended) else {
            continue;
        };
        extended = extended2;
        let mut ok = true;
        for (pa, pb) in lit.action_prefix().iter().zip(cand.action_prefix().iter()) {
            match factory.unify(*pa, *pb, &extended) {
                Some(t) => extended = t,
                None => {
                    ok = false;
                    break;
                }
            }
        }
        if !ok {
            continue;
        }
        let mut used2 = used.clone();
        used2[j] = true;
        if let Some(result) = backtrack(remaining, idx + 1, pool, used2, extended, factory) {
            return Some(result);
        }
    }
    None
}

#[cfg(test)]
mod subsumption_tests {
    use super::*;
    use crate::structures::term::TermFactory;

    #[test]
    fn shorter_clause_subsumes_superset_but_not_conversely() {
        let mut factory = TermFactory::new();
        let bool_sort = factory.create_sort(false);
        let t = factory.create_name(bool_sort);
        let p_fun = factory.create_fun(bool_sort, 0);
        let q_fun = factory.create_fun(bool_sort, 0);
        let p = factory.apply(p_fun, vec![]).unwrap();
        let q = factory.apply(q_fun, vec![]).unwrap();

        let lit_p = Literal::new(&factory, vec![], true, p, t).unwrap();
        let lit_q = Literal::new(&factory, vec![], true, q, t).unwrap();

        let unit = Clause::unit(lit_p.clone());
        let pair = Clause::new(vec![lit_p, lit_q], Ewff::True);

        assert!(unit.subsumes(&pair, &factory));
        assert!(!pair.subsumes(&unit, &factory));
    }

    #[test]
    fn opposite_sign_does_not_subsume() {
        let mut factory = TermFactory::new();
        let bool_sort = factory.create_sort(false);
        let t = factory.create_name(bool_sort);
        let p_fun = factory.create_fun(bool_sort, 0);
        let p = factory.apply(p_fun, vec![]).unwrap();

        let pos = Clause::unit(Literal::new(&factory, vec![], true, p, t).unwrap());
        let neg = Clause::unit(Literal::new(&factory, vec![], false, p, t).unwrap());

        assert!(!pos.subsumes(&neg, &factory));
    }
}
