/*!
`k`-inconsistency and entailment by case-splitting: the heart of the limited-belief reasoning
procedure. A setup is `0`-inconsistent iff it already contains the empty clause; it is
`k`-inconsistent (`k > 0`) iff some eligible atom's positive and negative extensions are both
`(k-1)`-inconsistent. An eligible atom is a PEL candidate for refuting the whole setup, gated by the
configured [SplitPolicy].
*/

use std::rc::Rc;

use crate::structures::clause::{pel, Clause};
use crate::structures::literal::Literal;
use crate::structures::term::TermFactory;
use crate::types::err::ErrorKind;

use super::{Setup, SplitPolicy};

impl Setup {
    /// True iff this setup is inconsistent at depth `k`: the empty clause is derivable by at most
    /// `k` nested case splits over [SplitPolicy]-eligible atoms.
    pub fn inconsistent(
        self: &Rc<Setup>,
        k: u32,
        factory: &TermFactory,
        policy: &SplitPolicy,
    ) -> Result<bool, ErrorKind> {
        if let Some(cached) = self.inconsistency_cache.borrow().get(&k) {
            return Ok(*cached);
        }
        let result = self.inconsistent_uncached(k, factory, policy)?;
        self.inconsistency_cache.borrow_mut().insert(k, result);
        Ok(result)
    }

    fn inconsistent_uncached(
        self: &Rc<Setup>,
        k: u32,
        factory: &TermFactory,
        policy: &SplitPolicy,
    ) -> Result<bool, ErrorKind> {
        if self.contains_empty() {
            return Ok(true);
        }
        if k == 0 {
            return Ok(false);
        }
        let clauses = self.clauses(factory);
        let goal = Clause::empty();
        let candidates = pel(&clauses, &goal, factory);
        for atom in candidates {
            if !policy.allows(&atom, k - 1, factory) {
                continue;
            }
            let pos = Literal::new(factory, atom.action_prefix.clone(), true, atom.lhs, atom.rhs)?;
            let neg = pos.flip();

            let mut pos_setup = Setup::child(self)?;
            pos_setup.add_clause(Clause::unit(pos))?;
            pos_setup.init(factory);
            let pos_rc = Rc::new(pos_setup);
            if !pos_rc.inconsistent(k - 1, factory, policy)? {
                continue;
            }

            let mut neg_setup = Setup::child(self)?;
            neg_setup.add_clause(Clause::unit(neg))?;
            neg_setup.init(factory);
            let neg_rc = Rc::new(neg_setup);
            if neg_rc.inconsistent(k - 1, factory, policy)? {
                log::trace!(
                    target: crate::misc::log::targets::SPLIT,
                    "split at depth {k} closed both branches"
                );
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True iff this setup entails the (disjunctive) clause `c` at depth `k`: `self` is already
    /// inconsistent (ex falso), some stored clause subsumes `c` outright, or (at `k >= 1`) some
    /// eligible atom's positive and negative extensions both entail `c` at `k-1`.
    pub fn entails(
        self: &Rc<Setup>,
        c: &Clause,
        k: u32,
        factory: &TermFactory,
        policy: &SplitPolicy,
    ) -> Result<bool, ErrorKind> {
        if self.inconsistent(k, factory, policy)? {
            return Ok(true);
        }
        if self.subsumes(c, factory) {
            return Ok(true);
        }
        if k == 0 {
            return Ok(false);
        }
        let clauses = self.clauses(factory);
        let candidates = pel(&clauses, c, factory);
        for atom in candidates {
            if !policy.allows(&atom, k - 1, factory) {
                continue;
            }
            let pos = Literal::new(factory, atom.action_prefix.clone(), true, atom.lhs, atom.rhs)?;
            let neg = pos.flip();

            let mut pos_setup = Setup::child(self)?;
            pos_setup.add_clause(Clause::unit(pos))?;
            pos_setup.init(factory);
            if !Rc::new(pos_setup).entails(c, k - 1, factory, policy)? {
                continue;
            }

            let mut neg_setup = Setup::child(self)?;
            neg_setup.add_clause(Clause::unit(neg))?;
            neg_setup.init(factory);
            if Rc::new(neg_setup).entails(c, k - 1, factory, policy)? {
                log::trace!(
                    target: crate::misc::log::targets::SPLIT,
                    "entailment split at depth {k} closed both branches"
                );
                return Ok(true);
            }
        }
        Ok(false)
    }
}
