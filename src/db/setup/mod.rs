/*!
A [Setup]: an ordered, minimised, unit-propagated set of ground clauses.

Setups are immutable after [Setup::init] is called: further clauses are only ever added to a
*child* setup obtained via [Setup::child], which records its parent by reference and only the
delta (locally added clauses, locally disabled parent clauses) --- lookups walk from child to
root. This is what makes splitting during entailment cheap: a split never copies or mutates the
setup the caller is holding.
*/

mod grounding;
mod minimize;
mod split;
mod split_policy;

pub(crate) use grounding::ground_axioms;
pub use split_policy::SplitPolicy;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::structures::clause::Clause;
use crate::structures::term::{Term, TermFactory};
use crate::types::err::{ErrorKind, SetupError};

/// A ground clause database, linked to an optional parent for cheap copy-on-split.
pub struct Setup {
    parent: Option<Rc<Setup>>,
    first: usize,
    clauses: Vec<Clause>,
    /// Clauses disabled *as observed from this setup*; may name indices belonging to an ancestor.
    disabled: std::collections::HashSet<usize>,
    /// term -> global indices of clauses added *at this level* that mention the term as some
    /// literal's primitive left-hand side.
    occurs: HashMap<Term, Vec<usize>>,
    sealed: bool,
    inconsistency_cache: RefCell<HashMap<u32, bool>>,
}

impl Setup {
    /// A fresh, empty root setup.
    pub fn new_root() -> Setup {
        Setup {
            parent: None,
            first: 0,
            clauses: Vec::new(),
            disabled: Default::default(),
            occurs: HashMap::new(),
            sealed: false,
            inconsistency_cache: RefCell::new(HashMap::new()),
        }
    }

    /// A child setup recording `parent` by reference. `parent` must already be sealed.
    pub fn child(parent: &Rc<Setup>) -> Result<Setup, ErrorKind> {
        if !parent.sealed {
            return Err(SetupError::ParentNotSealed.into());
        }
        Ok(Setup {
            parent: Some(Rc::clone(parent)),
            first: parent.last(),
            clauses: Vec::new(),
            disabled: Default::default(),
            occurs: HashMap::new(),
            sealed: false,
            inconsistency_cache: RefCell::new(HashMap::new()),
        })
    }

    /// Adds a ground clause prior to [Setup::init]. The clause must be primitive (ground, trivial
    /// guard).
    pub fn add_clause(&mut self, c: Clause) -> Result<usize, ErrorKind> {
        if self.sealed {
            return Err(SetupError::AlreadySealed.into());
        }
        let idx = self.last();
        self.clauses.push(c);
        Ok(idx)
    }

    /// Runs the setup to fixpoint (occurrence index, subsumption-minimisation, unit propagation)
    /// and seals it.
    pub fn init(&mut self, factory: &TermFactory) {
        self.close(factory);
        self.sealed = true;
    }

    /// Trusts, without proof, that the setup is consistent up to depth `k`. Logged at `info` level
    /// since it is the one place the engine accepts an un-derived fact.
    pub fn guarantee_consistency(&self, k: u32) {
        log::info!(
            target: crate::misc::log::targets::SPLIT,
            "consistency guaranteed up to depth {k} without proof"
        );
        let mut cache = self.inconsistency_cache.borrow_mut();
        for depth in 0..=k {
            cache.insert(depth, false);
        }
    }

    pub fn sealed(&self) -> bool {
        self.sealed
    }

    fn root(&self) -> &Setup {
        match &self.parent {
            Some(p) => p.root(),
            None => self,
        }
    }

    fn first(&self) -> usize {
        self.first
    }

    fn last(&self) -> usize {
        self.first + self.clauses.len()
    }

    /// The clause at global index `i`. Panics if `i` is out of range (callers only ever obtain
    /// indices from this setup's own iterators).
    pub fn clause(&self, i: usize) -> &Clause {
        if i >= self.first {
            &self.clauses[i - self.first]
        } else {
            self.parent.as_ref().expect("index below first but no parent").clause(i)
        }
    }

    fn is_disabled(&self, i: usize) -> bool {
        if self.disabled.contains(&i) {
            return true;
        }
        match &self.parent {
            Some(p) => p.is_disabled(i),
            None => false,
        }
    }

    fn disable(&mut self, i: usize) {
        self.disabled.insert(i);
    }

    /// All enabled clause indices visible from this setup, in the canonical `(length,
    /// lexicographic)` order of §5 (ties broken by ascending index, which is insertion order ---
    /// the order the minimisation tie-break in [minimize](super::minimize) reasons about).
    pub fn clause_indices(&self, factory: &TermFactory) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.last()).filter(|i| !self.is_disabled(*i)).collect();
        indices.sort_by(|&i, &j| self.clause(i).cmp_in(self.clause(j), factory).then(i.cmp(&j)));
        indices
    }

    /// Materialised clones of every enabled clause visible from this setup, in canonical order.
    pub fn clauses(&self, factory: &TermFactory) -> Vec<Clause> {
        self.clause_indices(factory).iter().map(|i| self.clause(*i).clone()).collect()
    }

    /// Unit clause indices visible from this setup, in canonical order.
    pub fn unit_indices(&self, factory: &TermFactory) -> Vec<usize> {
        self.clause_indices(factory)
            .into_iter()
            .filter(|i| self.clause(*i).is_unit())
            .collect()
    }

    /// Indices of enabled clauses whose literal set mentions `term` as some literal's
    /// left-hand side.
    pub fn clauses_with(&self, term: Term) -> Vec<usize> {
        let mut v: Vec<usize> = self.occurs.get(&term).cloned().unwrap_or_default();
        if let Some(p) = &self.parent {
            v.extend(p.clauses_with(term));
        }
        v.retain(|i| !self.is_disabled(*i));
        v
    }

    /// True iff the empty clause (`⊥`) is present anywhere in this setup or an ancestor.
    pub fn contains_empty(&self) -> bool {
        (0..self.last()).filter(|i| !self.is_disabled(*i)).any(|i| self.clause(i).is_empty())
    }

    /// True iff some clause in the setup subsumes `c` (a sound, incomplete approximation of
    /// entailment on its own --- see [Setup::entails] for the full split-k procedure).
    pub fn subsumes(&self, c: &Clause, factory: &TermFactory) -> bool {
        if c.is_empty() {
            return self.contains_empty();
        }
        let mut candidates: Vec<usize> = Vec::new();
        for lit in c.literals() {
            candidates.extend(self.clauses_with(lit.lhs()));
        }
        candidates.sort_unstable();
        candidates.dedup();
        candidates.iter().any(|i| self.clause(*i).subsumes(c, factory))
    }

    fn update_occurrences(&mut self, i: usize, factory: &TermFactory) {
        let _ = factory;
        for lit in self.clause(i).literals().to_vec() {
            let entry = self.occurs.entry(lit.lhs()).or_default();
            if entry.last() != Some(&i) {
                entry.push(i);
            }
        }
    }
}
