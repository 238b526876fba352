/*!
A plausibility-ranked sequence of [Setup]s built from belief conditionals, after the original
source's `Setups`/`BeliefConditional` pair and the "Theorem-7 style" level-assignment construction:
conditionals start at the most plausible level and migrate downward (less plausible) only once the
level they currently occupy entails their triggering condition.
*/

use std::rc::Rc;

use crate::structures::clause::Clause;
use crate::structures::term::TermFactory;
use crate::types::err::ErrorKind;

use super::setup::{Setup, SplitPolicy};

/// A conditional belief `neg_phi ⇒ psi`, checked at split depth `k`. Read as: once a level of the
/// ranking believes `phi` refuted (entails `neg_phi`), the conditional no longer constrains that
/// level and migrates to the next, less plausible one.
#[derive(Clone)]
pub struct BeliefConditional {
    neg_phi: Clause,
    psi: Clause,
    k: u32,
    level: usize,
}

impl BeliefConditional {
    pub fn new(neg_phi: Clause, psi: Clause, k: u32) -> Self {
        BeliefConditional { neg_phi, psi, k, level: 0 }
    }

    pub fn neg_phi(&self) -> &Clause {
        &self.neg_phi
    }

    pub fn psi(&self) -> &Clause {
        &self.psi
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    /// The disjunctive clause `neg_phi ∨ psi` inserted into the level this conditional currently
    /// occupies.
    fn disjunction(&self) -> Clause {
        let mut literals = self.neg_phi.literals().to_vec();
        literals.extend(self.psi.literals().iter().cloned());
        Clause::new(literals, self.neg_phi.guard().clone().and(self.psi.guard().clone()))
    }
}

/// A ranked stack of setups, most plausible first, plus the belief conditionals used to build every
/// level beyond the root.
pub struct Setups {
    base: Rc<Setup>,
    levels: Vec<Rc<Setup>>,
    beliefs: Vec<BeliefConditional>,
    policy: SplitPolicy,
}

impl Setups {
    /// Starts a ranking from a single (already sealed) root setup, with no belief conditionals yet
    /// propagated: `levels()` is just `[root]` until [Setups::propagate] runs.
    pub fn new(root: Rc<Setup>) -> Self {
        Setups {
            levels: vec![Rc::clone(&root)],
            base: root,
            beliefs: Vec::new(),
            policy: SplitPolicy::none(),
        }
    }

    pub fn with_policy(root: Rc<Setup>, policy: SplitPolicy) -> Self {
        Setups {
            levels: vec![Rc::clone(&root)],
            base: root,
            beliefs: Vec::new(),
            policy,
        }
    }

    pub fn levels(&self) -> &[Rc<Setup>] {
        &self.levels
    }

    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    pub fn add_belief_conditional(&mut self, neg_phi: Clause, psi: Clause, k: u32) {
        self.beliefs.push(BeliefConditional::new(neg_phi, psi, k));
    }

    /// Rebuilds the full ranking from the registered belief conditionals, starting every
    /// conditional back at level 0.
    ///
    /// Builds levels one at a time: `s_p` is a child of `s_{p-1}` (or the base setup, for `p = 0`)
    /// with the disjunctive clause of every conditional still assigned to level `p` inserted, then
    /// minimised and unit-propagated. Any conditional whose `s_p` now entails its `neg_phi` migrates
    /// to level `p+1`; once a round produces no migrations, the ranking is stable and construction
    /// stops.
    ///
    /// Entailment only grows as levels chain deeper (a child setup never forgets what its parent
    /// entailed), so a conditional whose `neg_phi` is already settled by an ancestor migrates again
    /// every round forever rather than stabilising on its own. Such a conditional's placement is
    /// moot --- its `neg_phi` holds everywhere below the level that first settled it, so the
    /// disjunction it contributes is vacuous at every level it could occupy. Rounds are capped at
    /// one per conditional, which is enough for every conditional to have migrated at least once if
    /// it is ever going to; anything still migrating after that is left at its current level.
    pub fn propagate(&mut self, factory: &TermFactory) -> Result<(), ErrorKind> {
        for bc in &mut self.beliefs {
            bc.level = 0;
        }
        self.levels.clear();
        self.levels.push(Rc::clone(&self.base));

        let max_rounds = self.beliefs.len();
        let mut p = 0usize;
        while p < max_rounds {
            let at_p: Vec<usize> = self
                .beliefs
                .iter()
                .enumerate()
                .filter(|(_, bc)| bc.level == p)
                .map(|(i, _)| i)
                .collect();
            if at_p.is_empty() {
                break;
            }

            let parent = if p == 0 { Rc::clone(&self.base) } else { Rc::clone(&self.levels[p]) };
            let mut sp = Setup::child(&parent)?;
            for &i in &at_p {
                sp.add_clause(self.beliefs[i].disjunction())?;
            }
            sp.init(factory);
            let sp_rc = Rc::new(sp);
            self.levels.push(Rc::clone(&sp_rc));

            let mut migrated = false;
            for &i in &at_p {
                let bc = &self.beliefs[i];
                if p + 1 < max_rounds && sp_rc.entails(&bc.neg_phi, bc.k, factory, &self.policy)? {
                    log::trace!(
                        target: crate::misc::log::targets::BELIEF,
                        "conditional {i} migrates from level {p} to level {}",
                        p + 1
                    );
                    self.beliefs[i].level = p + 1;
                    migrated = true;
                }
            }
            if !migrated {
                break;
            }
            p += 1;
        }
        Ok(())
    }

    /// True iff the most plausible level is inconsistent at depth `k`.
    pub fn inconsistent(&self, k: u32, factory: &TermFactory) -> Result<bool, ErrorKind> {
        self.levels[0].inconsistent(k, factory, &self.policy)
    }

    /// Entailment routing: the lowest (most plausible) level not itself inconsistent at `k`
    /// answers the query. If every level is inconsistent at `k`, the query trivially holds (ex
    /// falso).
    pub fn entails(&self, c: &Clause, k: u32, factory: &TermFactory) -> Result<bool, ErrorKind> {
        for level in &self.levels {
            if level.inconsistent(k, factory, &self.policy)? {
                continue;
            }
            return level.entails(c, k, factory, &self.policy);
        }
        Ok(true)
    }

    /// Conditional belief `phi ⇒ psi` (given as `neg_phi`, `psi`): true iff some level entails
    /// `neg_phi ∨ psi` at `k` without yet entailing `neg_phi` at `k` --- i.e. some level still
    /// considers `phi` open and, conditional on it, believes `psi`.
    pub fn entails_conditional(
        &self,
        neg_phi: &Clause,
        psi: &Clause,
        k: u32,
        factory: &TermFactory,
    ) -> Result<bool, ErrorKind> {
        let mut literals = neg_phi.literals().to_vec();
        literals.extend(psi.literals().iter().cloned());
        let disjunction = Clause::new(literals, neg_phi.guard().clone().and(psi.guard().clone()));

        for level in &self.levels {
            if level.entails(neg_phi, k, factory, &self.policy)? {
                continue;
            }
            if level.entails(&disjunction, k, factory, &self.policy)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
