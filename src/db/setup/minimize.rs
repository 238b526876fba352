/*!
Bringing a [Setup] to fixpoint: subsumption-minimisation interleaved with unit propagation, as in
the original source's `Setup::Minimize` / `Setup::PropagateUnits`.
*/

use crate::structures::clause::Clause;
use crate::structures::term::TermFactory;

use super::Setup;

impl Setup {
    /// Runs subsumption-minimisation and unit propagation to a joint fixpoint. Both steps are
    /// monotonic (clauses are only disabled, or added and then possibly themselves disabled by a
    /// later round), so the loop always terminates.
    pub(super) fn close(&mut self, factory: &TermFactory) {
        for i in self.first()..self.last() {
            self.update_occurrences(i, factory);
        }
        loop {
            let before_len = self.clauses.len();
            let before_disabled = self.disabled.len();
            self.remove_subsumed(factory);
            self.propagate_units(factory);
            if self.clauses.len() == before_len && self.disabled.len() == before_disabled {
                break;
            }
        }
    }

    /// Disables every clause that is properly subsumed by a shorter (or, for ties, lexicographically
    /// earlier-indexed) clause also present in the setup.
    fn remove_subsumed(&mut self, factory: &TermFactory) {
        let indices = self.clause_indices(factory);
        for &i in &indices {
            if self.is_disabled(i) {
                continue;
            }
            let ci = self.clause(i).clone();
            for &j in &indices {
                if i == j || self.is_disabled(j) {
                    continue;
                }
                let cj = self.clause(j).clone();
                let strictly_shorter = ci.literals().len() < cj.literals().len();
                let tie_break = ci.literals().len() == cj.literals().len() && i < j;
                if (strictly_shorter || tie_break) && ci.subsumes(&cj, factory) {
                    log::trace!(
                        target: crate::misc::log::targets::SUBSUMPTION,
                        "clause {i} subsumes clause {j}, disabling {j}"
                    );
                    self.disable(j);
                }
            }
        }
    }

    /// One pass of unit propagation: clauses satisfied by a live unit are disabled outright;
    /// clauses containing a literal falsified by a live unit are replaced by the reduced clause
    /// (added locally, with the original disabled). Runs to a fixpoint.
    pub(super) fn propagate_units(&mut self, factory: &TermFactory) {
        loop {
            let units: Vec<_> = self
                .unit_indices(factory)
                .iter()
                .map(|&i| self.clause(i).literals()[0].clone())
                .collect();
            if units.is_empty() {
                return;
            }
            log::trace!(
                target: crate::misc::log::targets::PROPAGATION,
                "propagating {} unit literal(s)",
                units.len()
            );
            let mut changed = false;
            for i in self.clause_indices(factory) {
                if self.is_disabled(i) {
                    continue;
                }
                let c = self.clause(i).clone();
                if c.is_unit() {
                    continue;
                }
                if c.literals().iter().any(|l| units.contains(l)) {
                    self.disable(i);
                    changed = true;
                    continue;
                }
                let reduced: Vec<_> = c
                    .literals()
                    .iter()
                    .filter(|l| !units.iter().any(|u| l.complementary(u)))
                    .cloned()
                    .collect();
                if reduced.len() != c.literals().len() {
                    self.disable(i);
                    let new_clause = Clause::new(reduced, c.guard().clone());
                    self.add_local(new_clause, factory);
                    changed = true;
                }
            }
            if !changed {
                return;
            }
        }
    }

    /// Appends a clause at this setup's own level and indexes it, without touching `sealed`.
    pub(super) fn add_local(&mut self, c: Clause, factory: &TermFactory) -> usize {
        let idx = self.last();
        self.clauses.push(c);
        self.update_occurrences(idx, factory);
        idx
    }
}

#[cfg(test)]
mod minimize_tests {
    use super::*;
    use crate::structures::ewff::Ewff;
    use crate::structures::literal::Literal;
    use crate::structures::term::TermFactory;

    fn prop_atom(factory: &mut TermFactory, sort: crate::structures::term::Sort) -> crate::structures::term::Term {
        let f = factory.create_fun(sort, 0);
        factory.apply(f, vec![]).unwrap()
    }

    #[test]
    fn propagate_units_chains_to_fixpoint() {
        let mut factory = TermFactory::new();
        let sort = factory.create_sort(false);
        let t = factory.create_name(sort);
        let p = prop_atom(&mut factory, sort);
        let q = prop_atom(&mut factory, sort);
        let r = prop_atom(&mut factory, sort);

        let mut setup = Setup::new_root();
        setup.add_clause(Clause::unit(Literal::new(&factory, vec![], true, p, t).unwrap())).unwrap();
        setup
            .add_clause(Clause::new(
                vec![
                    Literal::new(&factory, vec![], false, p, t).unwrap(),
                    Literal::new(&factory, vec![], true, q, t).unwrap(),
                ],
                Ewff::True,
            ))
            .unwrap();
        setup
            .add_clause(Clause::new(
                vec![
                    Literal::new(&factory, vec![], false, q, t).unwrap(),
                    Literal::new(&factory, vec![], true, r, t).unwrap(),
                ],
                Ewff::True,
            ))
            .unwrap();

        setup.init(&factory);

        let r_unit = Clause::unit(Literal::new(&factory, vec![], true, r, t).unwrap());
        assert!(setup.subsumes(&r_unit, &factory));
    }

    #[test]
    fn close_is_idempotent() {
        let mut factory = TermFactory::new();
        let sort = factory.create_sort(false);
        let t = factory.create_name(sort);
        let p = prop_atom(&mut factory, sort);

        let mut setup = Setup::new_root();
        let lit = Literal::new(&factory, vec![], true, p, t).unwrap();
        setup.add_clause(Clause::unit(lit.clone())).unwrap();
        setup.add_clause(Clause::new(vec![lit.clone(), lit], Ewff::True)).unwrap();

        setup.init(&factory);
        let after_init = setup.clause_indices(&factory);

        setup.close(&factory);
        let after_second_close = setup.clause_indices(&factory);

        assert_eq!(after_init, after_second_close);
        assert_eq!(after_init.len(), 1);
    }
}
