use std::rc::Rc;

use crate::config::Config;
use crate::db::setup::{ground_axioms, Setup, SplitPolicy};
use crate::db::setups::Setups;
use crate::grounder::Grounder;
use crate::misc::log::targets;
use crate::query::{self, Formula};
use crate::reports::Entailment;
use crate::structures::clause::Clause;
use crate::structures::ewff::Ewff;
use crate::structures::literal::Literal;
use crate::structures::term::{FunSym, Sort, Term, TermFactory};
use crate::types::err::{ErrorKind, LiteralError, QueryError, TermError};

use super::ContextState;

/// A reasoning context: a term factory, a basic action theory under construction, and --- once
/// [Context::init] runs --- a sealed root setup and a belief ranking ready to answer queries.
pub struct Context {
    factory: TermFactory,
    config: Config,
    grounder: Grounder,

    bool_sort: Sort,
    true_name: Term,
    false_name: Term,
    sf_fun: Option<FunSym>,

    static_clauses: Vec<Clause>,
    boxed_clauses: Vec<Clause>,
    belief_conditionals: Vec<(Clause, Clause, u32)>,

    /// `Z` from §4.4.1, as last supplied to [Context::init]; replayed by [Context::reground].
    query_action_sequences: Vec<Vec<Term>>,
    /// Every sensing result recorded so far, replayed in order by [Context::reground].
    sensing_log: Vec<(Vec<Term>, Term, bool)>,
    /// Names mentioned by queries decided so far that weren't already part of `query_action_sequences`.
    extra_query_names: Vec<Term>,
    /// Variables a query itself introduced (e.g. under a quantifier) that axioms alone never needed.
    extra_query_vars: Vec<Term>,

    root: Option<Rc<Setup>>,
    setups: Option<Setups>,
    state: ContextState,
}

impl Context {
    /// Creates a context from some given configuration. A two-valued `bool` sort is registered up
    /// front (`true`/`false`), since sensing outcomes and many BATs need it regardless of whether
    /// the caller ever calls [Context::declare_sensing_function].
    pub fn from_config(config: Config) -> Self {
        let mut factory = TermFactory::new();
        let bool_sort = factory.create_sort(false);
        let true_name = factory.create_name(bool_sort);
        let false_name = factory.create_name(bool_sort);
        Context {
            factory,
            config,
            grounder: Grounder::new(),
            bool_sort,
            true_name,
            false_name,
            sf_fun: None,
            static_clauses: Vec::new(),
            boxed_clauses: Vec::new(),
            belief_conditionals: Vec::new(),
            query_action_sequences: Vec::new(),
            sensing_log: Vec::new(),
            extra_query_names: Vec::new(),
            extra_query_vars: Vec::new(),
            root: None,
            setups: None,
            state: ContextState::Building,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &ContextState {
        &self.state
    }

    pub fn bool_sort(&self) -> Sort {
        self.bool_sort
    }

    pub fn true_name(&self) -> Term {
        self.true_name
    }

    pub fn false_name(&self) -> Term {
        self.false_name
    }

    // --- factory passthroughs -------------------------------------------------------------

    pub fn create_sort(&mut self, rigid: bool) -> Sort {
        self.factory.create_sort(rigid)
    }

    pub fn create_name(&mut self, sort: Sort) -> Result<Term, ErrorKind> {
        if !self.factory.contains_sort(sort) {
            return Err(TermError::UnknownSort.into());
        }
        Ok(self.factory.create_name(sort))
    }

    pub fn create_var(&mut self, sort: Sort) -> Result<Term, ErrorKind> {
        if !self.factory.contains_sort(sort) {
            return Err(TermError::UnknownSort.into());
        }
        Ok(self.factory.create_var(sort))
    }

    pub fn create_fun(&mut self, sort: Sort, arity: usize) -> Result<FunSym, ErrorKind> {
        if !self.factory.contains_sort(sort) {
            return Err(TermError::UnknownSort.into());
        }
        Ok(self.factory.create_fun(sort, arity))
    }

    pub fn apply(&mut self, f: FunSym, args: Vec<Term>) -> Result<Term, ErrorKind> {
        self.factory.apply(f, args)
    }

    /// Builds a literal from this context's own factory.
    pub fn literal(
        &self,
        action_prefix: Vec<Term>,
        sign: bool,
        lhs: Term,
        rhs: Term,
    ) -> Result<Literal, ErrorKind> {
        Literal::new(&self.factory, action_prefix, sign, lhs, rhs)
    }

    /// Builds a literal the way [Context::literal] does, but flattens any nested function
    /// application among `lhs`'s arguments into a fresh variable first (`SPEC_FULL.md` §4.11),
    /// returning the extra equality guard the caller must `and` into the clause's own guard.
    pub fn literal_flatten(
        &mut self,
        action_prefix: Vec<Term>,
        sign: bool,
        lhs: Term,
        rhs: Term,
    ) -> Result<(Literal, Ewff), ErrorKind> {
        Literal::flatten(&mut self.factory, action_prefix, sign, lhs, rhs)
    }

    /// Declares which function symbol denotes `SF` (the sensing-result predicate), and under which
    /// parity convention it may be split during entailment (§4.4.3). Required before
    /// [Context::add_sensing_result] is used.
    pub fn declare_sensing_function(&mut self, f: FunSym) {
        self.sf_fun = Some(f);
    }

    fn split_policy(&self) -> SplitPolicy {
        match self.sf_fun {
            Some(f) => SplitPolicy::with_sf(f, self.config.sf_split_parity),
            None => SplitPolicy::none(),
        }
    }

    // --- basic action theory ingestion ---------------------------------------------------

    /// Registers a static universal clause (holds in the initial situation only).
    pub fn add_static_clause(&mut self, literals: Vec<Literal>, guard: Ewff) -> Result<(), ErrorKind> {
        self.require_building()?;
        self.static_clauses.push(Clause::new(literals, guard));
        Ok(())
    }

    /// Registers a boxed universal clause (holds in every reachable situation).
    pub fn add_boxed_clause(&mut self, literals: Vec<Literal>, guard: Ewff) -> Result<(), ErrorKind> {
        self.require_building()?;
        self.boxed_clauses.push(Clause::new(literals, guard));
        Ok(())
    }

    /// Registers a conditional belief `neg_phi ⇒ psi`, checked at split depth `k`.
    pub fn add_belief_conditional(&mut self, neg_phi: Clause, psi: Clause, k: u32) -> Result<(), ErrorKind> {
        self.require_building()?;
        self.belief_conditionals.push((neg_phi, psi, k));
        Ok(())
    }

    fn require_building(&self) -> Result<(), ErrorKind> {
        match self.state {
            ContextState::Building => Ok(()),
            ContextState::Ready => Err(ErrorKind::State),
        }
    }

    fn require_ready(&self) -> Result<(), ErrorKind> {
        match self.state {
            ContextState::Ready => Ok(()),
            ContextState::Building => Err(ErrorKind::State),
        }
    }

    // --- setup lifecycle -------------------------------------------------------------------

    /// Grounds, minimises, and seals the root setup, then runs belief-conditional propagation.
    ///
    /// `query_action_sequences` is `Z` from §4.4.1: boxed clauses are instantiated once per prefix
    /// of each sequence here, so the situations a query will actually be asked about must be
    /// supplied up front. Later queries that mention names or variable budgets this didn't cover
    /// are still handled correctly: [Context::entails], [Context::entails_conditional], and
    /// [Context::decide] extend H+ and reground on demand (§2).
    pub fn init(&mut self, query_action_sequences: &[Vec<Term>]) -> Result<(), ErrorKind> {
        self.require_building()?;
        self.query_action_sequences = query_action_sequences.to_vec();
        self.reground()?;
        self.state = ContextState::Ready;
        Ok(())
    }

    /// Recomputes H+ from the current axioms, the action sequences supplied to [Context::init],
    /// and any extra names/variables a later query has since introduced, then rebuilds the root
    /// setup (static clauses, boxed-clause instances over every action prefix, and every sensing
    /// result recorded so far, replayed in order) and the belief ranking on top of it.
    fn reground(&mut self) -> Result<(), ErrorKind> {
        let mut query_names: Vec<Term> = self.query_action_sequences.iter().flatten().copied().collect();
        for n in &self.extra_query_names {
            if !query_names.contains(n) {
                query_names.push(*n);
            }
        }

        let mut hplus_axioms = self.static_clauses.clone();
        hplus_axioms.extend(self.boxed_clauses.iter().cloned());
        self.grounder
            .compute(&mut self.factory, &hplus_axioms, &query_names, &self.extra_query_vars);
        let hplus = self.grounder.hplus().to_vec();

        let prefixes = prefixes_of(&self.query_action_sequences);

        let mut all_axioms = self.static_clauses.clone();
        for clause in &self.boxed_clauses {
            for prefix in &prefixes {
                all_axioms.push(clause.prepend_actions(prefix));
            }
        }
        for (action_prefix, action, sensed) in &self.sensing_log {
            let sf_fun = self.sf_fun.ok_or(ErrorKind::State)?;
            let lhs = self.factory.apply(sf_fun, vec![*action])?;
            let rhs = if *sensed { self.true_name } else { self.false_name };
            let lit = Literal::new(&self.factory, action_prefix.clone(), true, lhs, rhs)?;
            all_axioms.push(Clause::unit(lit));
        }

        let root = ground_axioms(&mut self.factory, &all_axioms, &hplus)?;

        log::trace!(
            target: targets::GROUNDING,
            "root setup (re)grounded with {} clauses over {} boxed prefixes and {} sensing result(s)",
            root.clauses(&self.factory).len(),
            prefixes.len(),
            self.sensing_log.len()
        );

        let root_rc = Rc::new(root);
        self.root = Some(Rc::clone(&root_rc));

        let mut setups = Setups::with_policy(root_rc, self.split_policy());
        for (neg_phi, psi, k) in &self.belief_conditionals {
            setups.add_belief_conditional(neg_phi.clone(), psi.clone(), *k);
        }
        setups.propagate(&self.factory)?;
        self.setups = Some(setups);
        Ok(())
    }

    /// Appends a sensing outcome `[z]SF(a) = r` (or, if `!sensed`, its negation) to the sensing
    /// log and reruns [Context::reground] so the new fact, and any name it introduces, is
    /// reflected in both H+ and the root setup.
    pub fn add_sensing_result(
        &mut self,
        action_prefix: Vec<Term>,
        action: Term,
        sensed: bool,
    ) -> Result<(), ErrorKind> {
        self.require_ready()?;
        let sf_fun = self.sf_fun.ok_or(ErrorKind::State)?;
        let lhs = self.factory.apply(sf_fun, vec![action])?;
        if !self.factory.is_primitive(lhs) {
            return Err(LiteralError::SensingOnNonPrimitiveAction.into());
        }
        let rhs = if sensed { self.true_name } else { self.false_name };
        // validated eagerly so a malformed action prefix is rejected before it enters the log
        Literal::new(&self.factory, action_prefix.clone(), true, lhs, rhs)?;

        self.sensing_log.push((action_prefix, action, sensed));
        self.reground()
    }

    /// Asserts, without proof, that the root setup is consistent up to depth `k`.
    pub fn guarantee_consistency(&self, k: u32) -> Result<(), ErrorKind> {
        self.require_ready()?;
        self.root.as_ref().expect("Ready implies root is set").guarantee_consistency(k);
        Ok(())
    }

    // --- entailment --------------------------------------------------------------------------

    /// `k`-inconsistency of the most plausible level. Takes no query argument, so unlike
    /// [Context::entails]/[Context::decide] it never needs to extend H+.
    pub fn inconsistent(&self, k: u32) -> Result<bool, ErrorKind> {
        self.require_ready()?;
        self.setups.as_ref().expect("Ready implies setups is set").inconsistent(k, &self.factory)
    }

    /// `entails(clause, k)` from §6: routed through the belief ranking. Re-extends H+ and
    /// regrounds first if `c` mentions a name not yet covered (§2's "per-query updates to H+").
    pub fn entails(&mut self, c: &Clause, k: u32) -> Result<bool, ErrorKind> {
        self.require_ready()?;
        self.validate_clause(c)?;
        if self.note_query_clause(c) {
            self.reground()?;
        }
        self.setups.as_ref().expect("Ready implies setups is set").entails(c, k, &self.factory)
    }

    /// Conditional belief `phi ⇒ psi`, given as its negation `neg_phi`. Re-extends H+ and
    /// regrounds first if either clause mentions a name not yet covered.
    pub fn entails_conditional(&mut self, neg_phi: &Clause, psi: &Clause, k: u32) -> Result<bool, ErrorKind> {
        self.require_ready()?;
        self.validate_clause(neg_phi)?;
        self.validate_clause(psi)?;
        let dirty_phi = self.note_query_clause(neg_phi);
        let dirty_psi = self.note_query_clause(psi);
        if dirty_phi || dirty_psi {
            self.reground()?;
        }
        self.setups
            .as_ref()
            .expect("Ready implies setups is set")
            .entails_conditional(neg_phi, psi, k, &self.factory)
    }

    /// `entails(formula, k)` from §6: normalises `formula` (ENNF, grounded over H+) and evaluates
    /// it against the belief ranking, returning a tri-valued [Entailment]. Re-extends H+ and
    /// regrounds first if `formula` mentions a name, or needs a larger per-sort variable budget
    /// (e.g. a fresh quantifier), not yet covered.
    pub fn decide(&mut self, formula: &Formula, k: u32) -> Result<Entailment, ErrorKind> {
        self.require_ready()?;
        self.validate_formula(formula)?;
        if self.note_query_formula(formula) {
            self.reground()?;
        }
        let hplus = self.grounder.hplus().to_vec();
        let normalised = query::normalize(formula, &mut self.factory, &hplus, self.config.cnf)?;
        query::evaluate(
            &normalised,
            self.setups.as_ref().expect("Ready implies setups is set"),
            &self.factory,
            k,
        )
    }

    // --- query validation and H+ bookkeeping ------------------------------------------------

    /// Checks that every term a query clause mentions was actually interned by this context's own
    /// factory, rejecting a foreign `Term` (e.g. one obtained from a different `Context`) rather
    /// than risking an out-of-bounds lookup or a silently wrong comparison.
    fn validate_clause(&self, c: &Clause) -> Result<(), ErrorKind> {
        for lit in c.literals() {
            self.validate_terms(&[lit.lhs(), lit.rhs()])?;
            self.validate_terms(lit.action_prefix())?;
        }
        let mut guard_terms = Vec::new();
        ewff_term_refs(c.guard(), &mut guard_terms);
        self.validate_terms(&guard_terms)
    }

    fn validate_formula(&self, formula: &Formula) -> Result<(), ErrorKind> {
        match formula {
            Formula::True | Formula::False => Ok(()),
            Formula::Eq(a, b) | Formula::Neq(a, b) => self.validate_terms(&[*a, *b]),
            Formula::Lit(l) => {
                self.validate_terms(&[l.lhs(), l.rhs()])?;
                self.validate_terms(l.action_prefix())
            }
            Formula::Not(inner) => self.validate_formula(inner),
            Formula::And(l, r) | Formula::Or(l, r) => {
                self.validate_formula(l)?;
                self.validate_formula(r)
            }
            Formula::Exists(x, body) | Formula::Forall(x, body) => {
                self.validate_terms(&[*x])?;
                self.validate_formula(body)
            }
            Formula::Action(a, body) => {
                self.validate_terms(&[*a])?;
                self.validate_formula(body)
            }
            Formula::Knowledge(_, body) | Formula::Belief(_, body) => self.validate_formula(body),
        }
    }

    fn validate_terms(&self, terms: &[Term]) -> Result<(), ErrorKind> {
        for t in terms {
            if !self.factory.contains_term(*t) {
                return Err(QueryError::UnknownSymbol.into());
            }
        }
        Ok(())
    }

    /// Records the names and variables a query clause introduces; returns true if anything new was
    /// added (signalling that [Context::reground] is needed before deciding this query).
    fn note_query_clause(&mut self, c: &Clause) -> bool {
        let mut names = Vec::new();
        let mut vars = Vec::new();
        for lit in c.literals() {
            query_context(&self.factory, lit.lhs(), &mut names, &mut vars);
            query_context(&self.factory, lit.rhs(), &mut names, &mut vars);
            for a in lit.action_prefix() {
                query_context(&self.factory, *a, &mut names, &mut vars);
            }
        }
        let mut guard_terms = Vec::new();
        ewff_term_refs(c.guard(), &mut guard_terms);
        for t in guard_terms {
            query_context(&self.factory, t, &mut names, &mut vars);
        }
        self.extend_query_context(names, vars)
    }

    fn note_query_formula(&mut self, formula: &Formula) -> bool {
        let mut names = Vec::new();
        let mut vars = Vec::new();
        formula_context(&self.factory, formula, &mut names, &mut vars);
        self.extend_query_context(names, vars)
    }

    fn extend_query_context(&mut self, names: Vec<Term>, vars: Vec<Term>) -> bool {
        let mut dirty = false;
        for n in names {
            if !self.grounder.hplus().contains(&n) && !self.extra_query_names.contains(&n) {
                self.extra_query_names.push(n);
                dirty = true;
            }
        }
        for v in vars {
            if !self.extra_query_vars.contains(&v) {
                self.extra_query_vars.push(v);
                dirty = true;
            }
        }
        dirty
    }
}

/// Collects the names and free variables directly reachable from `t` (recursing into function and
/// complex-name arguments) into `names`/`vars`.
fn query_context(factory: &TermFactory, t: Term, names: &mut Vec<Term>, vars: &mut Vec<Term>) {
    if factory.is_variable(t) {
        if !vars.contains(&t) {
            vars.push(t);
        }
    } else if factory.is_name(t) {
        if !names.contains(&t) {
            names.push(t);
        }
        for a in factory.args(t) {
            query_context(factory, *a, names, vars);
        }
    } else if factory.is_function(t) {
        for a in factory.args(t) {
            query_context(factory, *a, names, vars);
        }
    }
}

fn formula_context(factory: &TermFactory, formula: &Formula, names: &mut Vec<Term>, vars: &mut Vec<Term>) {
    match formula {
        Formula::True | Formula::False => {}
        Formula::Eq(a, b) | Formula::Neq(a, b) => {
            query_context(factory, *a, names, vars);
            query_context(factory, *b, names, vars);
        }
        Formula::Lit(l) => {
            query_context(factory, l.lhs(), names, vars);
            query_context(factory, l.rhs(), names, vars);
            for a in l.action_prefix() {
                query_context(factory, *a, names, vars);
            }
        }
        Formula::Not(inner) => formula_context(factory, inner, names, vars),
        Formula::And(l, r) | Formula::Or(l, r) => {
            formula_context(factory, l, names, vars);
            formula_context(factory, r, names, vars);
        }
        Formula::Exists(x, body) | Formula::Forall(x, body) => {
            query_context(factory, *x, names, vars);
            formula_context(factory, body, names, vars);
        }
        Formula::Action(a, body) => {
            query_context(factory, *a, names, vars);
            formula_context(factory, body, names, vars);
        }
        Formula::Knowledge(_, body) | Formula::Belief(_, body) => formula_context(factory, body, names, vars),
    }
}

/// Every term a guard directly mentions, for use with [query_context]; does not recurse through
/// `query_context` itself since that depends on whether each term turns out to be a name/variable.
fn ewff_term_refs(e: &Ewff, out: &mut Vec<Term>) {
    match e {
        Ewff::True | Ewff::False => {}
        Ewff::Eq(a, b) | Ewff::Neq(a, b) => {
            out.push(*a);
            out.push(*b);
        }
        Ewff::SortMember(t, _) => out.push(*t),
        Ewff::Neg(inner) => ewff_term_refs(inner, out),
        Ewff::And(l, r) | Ewff::Or(l, r) => {
            ewff_term_refs(l, out);
            ewff_term_refs(r, out);
        }
    }
}

/// Every prefix (including the empty one and the full sequence) of every action sequence in `z`,
/// deduplicated.
fn prefixes_of(z: &[Vec<Term>]) -> Vec<Vec<Term>> {
    let mut out: Vec<Vec<Term>> = vec![Vec::new()];
    for sequence in z {
        for len in 0..=sequence.len() {
            let prefix = sequence[..len].to_vec();
            if !out.contains(&prefix) {
                out.push(prefix);
            }
        }
    }
    out
}
