/*!
Computes H+, the finite Herbrand universe used to ground a query.

H+ is the union of:
- every standard name occurring in the axioms relevant to the query,
- every standard name occurring in the query itself,
- per sort, one fresh placeholder name for each variable of that sort occurring in any clause or
  the query (so that, in the worst case, every variable can be bound to a name distinct from every
  other name already in play).
*/

use std::collections::HashMap;

use crate::misc::log::targets;
use crate::structures::clause::Clause;
use crate::structures::term::{Sort, Term, TermFactory};

/// Computes (or extends) H+ for a set of axiom clauses and a query.
#[derive(Default)]
pub struct Grounder {
    hplus: Vec<Term>,
}

impl Grounder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hplus(&self) -> &[Term] {
        &self.hplus
    }

    /// Recomputes H+ from scratch given the current axioms and query context. Idempotent: calling
    /// this twice with the same inputs produces the same H+ (the same fresh placeholders, since
    /// the factory only appends and placeholder creation is deterministic in call order).
    ///
    /// `query_vars` are variables occurring in the query itself (e.g. under a quantifier) that
    /// aren't already accounted for by `axioms`: a query that needs more distinct names of some
    /// sort than any axiom alone required must still grow that sort's per-sort placeholder budget.
    pub fn compute(
        &mut self,
        factory: &mut TermFactory,
        axioms: &[Clause],
        query_names: &[Term],
        query_vars: &[Term],
    ) {
        log::trace!(target: targets::GROUNDING, "computing H+ over {} axioms", axioms.len());

        let mut names: Vec<Term> = Vec::new();
        let mut push_unique = |t: Term, names: &mut Vec<Term>| {
            if !names.contains(&t) {
                names.push(t);
            }
        };

        for n in query_names {
            push_unique(*n, &mut names);
        }
        for clause in axioms {
            for lit in clause.literals() {
                collect_names(factory, lit.lhs(), &mut names);
                collect_names(factory, lit.rhs(), &mut names);
                for a in lit.action_prefix() {
                    collect_names(factory, *a, &mut names);
                }
            }
        }

        let mut max_vars_per_sort: HashMap<Sort, usize> = HashMap::new();
        let mut count_for = |vars: &[Term], factory: &TermFactory, max_vars_per_sort: &mut HashMap<Sort, usize>| {
            let mut local: HashMap<Sort, usize> = HashMap::new();
            for v in vars {
                *local.entry(factory.sort(*v)).or_insert(0) += 1;
            }
            for (sort, count) in local {
                let slot = max_vars_per_sort.entry(sort).or_insert(0);
                if count > *slot {
                    *slot = count;
                }
            }
        };

        let mut names_vars = Vec::new();
        for n in query_names {
            factory.variables_in(*n, &mut names_vars);
        }
        count_for(&names_vars, factory, &mut max_vars_per_sort);
        count_for(query_vars, factory, &mut max_vars_per_sort);

        for clause in axioms {
            let mut vars = Vec::new();
            for lit in clause.literals() {
                factory.variables_in(lit.lhs(), &mut vars);
                factory.variables_in(lit.rhs(), &mut vars);
            }
            clause.guard().variables(factory, &mut vars);
            count_for(&vars, factory, &mut max_vars_per_sort);
        }

        for (sort, count) in max_vars_per_sort {
            for _ in 0..count {
                let placeholder = factory.fresh_placeholder(sort);
                push_unique(placeholder, &mut names);
            }
        }

        log::trace!(target: targets::GROUNDING, "H+ has {} names", names.len());
        self.hplus = names;
    }
}

pub(crate) fn collect_names(factory: &TermFactory, t: Term, out: &mut Vec<Term>) {
    if factory.is_name(t) {
        if !out.contains(&t) {
            out.push(t);
        }
        for a in factory.args(t) {
            collect_names(factory, *a, out);
        }
    } else if factory.is_function(t) {
        for a in factory.args(t) {
            collect_names(factory, *a, out);
        }
    }
}
