/*!
Sorts, variables, standard names, and function symbols, interned through a [TermFactory].

A [Term] is a lightweight, `Copy` handle into the factory that created it; the factory owns the
actual structure (which kind of term it is, its sort, and --- for function applications and
complex names --- its arguments). This is the hash-consing scheme sketched under "Global/singleton
symbol factories" in the design notes: a single factory is threaded by reference into every setup
and clause built from it, and term identity is decided by the factory, not by structural
comparison at each use site.
*/

use std::collections::HashMap;

use crate::types::err::{ErrorKind, TermError};

/// An opaque sort identifier. Equality is identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Sort(pub(crate) u32);

/// A variable symbol, always of some fixed [Sort].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Var(pub(crate) u32);

/// A standard name symbol. Names of arity zero denote themselves; names of arity greater than
/// zero are only permitted for [rigid](Sort) sorts, where they co-designate a complex name built
/// from other names.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Name(pub(crate) u32);

/// A function symbol of a fixed arity and result sort.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct FunSym(pub(crate) u32);

/// An interned term handle. Copy, and cheap to compare: two terms built from the same factory are
/// equal iff they have the same id, which holds iff they are structurally equal (hash-consing
/// guarantees this).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Term(pub(crate) u32);

#[derive(Clone, Copy, Debug)]
struct SortInfo {
    rigid: bool,
}

#[derive(Clone, Debug)]
struct VarInfo {
    sort: Sort,
}

#[derive(Clone, Debug)]
struct NameInfo {
    sort: Sort,
    arity: usize,
}

#[derive(Clone, Debug)]
struct FunInfo {
    sort: Sort,
    arity: usize,
}

/// The structural content of an interned [Term].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum TermData {
    Variable(Var),
    /// A name application. `args` is empty for a plain standard name.
    NameApp(Name, Vec<Term>),
    /// A function application. Never empty-args --- arity-zero functions are just names.
    FunApp(FunSym, Vec<Term>),
}

/// Interns sorts, variables, names, and function symbols, and hash-conses the terms built from
/// them.
///
/// A single `TermFactory` is shared (by reference) across every [Setup](crate::db::setup::Setup)
/// and [Setups](crate::db::setups::Setups) built against the same knowledge base: symbol creation
/// only ever appends, so ids remain stable for the life of the factory.
#[derive(Default, Clone)]
pub struct TermFactory {
    sorts: Vec<SortInfo>,
    vars: Vec<VarInfo>,
    names: Vec<NameInfo>,
    funs: Vec<FunInfo>,

    terms: Vec<TermData>,
    intern: HashMap<TermData, Term>,

    /// Counter used to mint fresh placeholder names per sort (for grounding, see
    /// [Grounder](crate::grounder::Grounder)). Not used for ordinary `create_name` calls, which
    /// always mint a fresh symbol.
    fresh_counters: HashMap<Sort, u32>,
}

impl TermFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new sort. `rigid` sorts permit names of arity greater than zero.
    pub fn create_sort(&mut self, rigid: bool) -> Sort {
        let id = Sort(self.sorts.len() as u32);
        self.sorts.push(SortInfo { rigid });
        id
    }

    pub fn is_rigid(&self, sort: Sort) -> bool {
        self.sorts[sort.0 as usize].rigid
    }

    /// Creates a fresh variable of the given sort.
    pub fn create_var(&mut self, sort: Sort) -> Term {
        let v = Var(self.vars.len() as u32);
        self.vars.push(VarInfo { sort });
        self.intern_term(TermData::Variable(v))
    }

    /// Creates a fresh, arity-zero standard name of the given sort.
    pub fn create_name(&mut self, sort: Sort) -> Term {
        let n = Name(self.names.len() as u32);
        self.names.push(NameInfo { sort, arity: 0 });
        self.intern_term(TermData::NameApp(n, Vec::new()))
    }

    /// Creates a fresh, per-sort placeholder name distinct from every name returned so far for
    /// that sort. Used by the [Grounder](crate::grounder::Grounder) to pad H+ with enough names to
    /// cover every variable that might need to be bound.
    pub fn fresh_placeholder(&mut self, sort: Sort) -> Term {
        let _ = self.fresh_counters.entry(sort).or_insert(0);
        self.create_name(sort)
    }

    /// Creates a fresh function symbol of the given result sort and arity. Use [TermFactory::apply]
    /// to build a term from it.
    pub fn create_fun(&mut self, sort: Sort, arity: usize) -> FunSym {
        let f = FunSym(self.funs.len() as u32);
        self.funs.push(FunInfo { sort, arity });
        f
    }

    /// Creates a complex name: a name of arity greater than zero, co-designating the given
    /// arguments. Only permitted for rigid sorts.
    pub fn create_complex_name(
        &mut self,
        sort: Sort,
        arity: usize,
        args: Vec<Term>,
    ) -> Result<Term, ErrorKind> {
        if !self.is_rigid(sort) {
            return Err(TermError::RigidArityViolation.into());
        }
        if args.len() != arity {
            return Err(TermError::ArityMismatch.into());
        }
        let n = Name(self.names.len() as u32);
        self.names.push(NameInfo { sort, arity });
        Ok(self.intern_term(TermData::NameApp(n, args)))
    }

    /// Applies a function symbol to arguments, building (or retrieving) the interned term.
    pub fn apply(&mut self, f: FunSym, args: Vec<Term>) -> Result<Term, ErrorKind> {
        let info = &self.funs[f.0 as usize];
        if info.arity != args.len() {
            return Err(TermError::ArityMismatch.into());
        }
        Ok(self.intern_term(TermData::FunApp(f, args)))
    }

    fn intern_term(&mut self, data: TermData) -> Term {
        if let Some(t) = self.intern.get(&data) {
            return *t;
        }
        let id = Term(self.terms.len() as u32);
        self.terms.push(data.clone());
        self.intern.insert(data, id);
        id
    }

    pub(crate) fn data(&self, t: Term) -> &TermData {
        &self.terms[t.0 as usize]
    }

    /// The sort of a term.
    pub fn sort(&self, t: Term) -> Sort {
        match self.data(t) {
            TermData::Variable(v) => self.vars[v.0 as usize].sort,
            TermData::NameApp(n, _) => self.names[n.0 as usize].sort,
            TermData::FunApp(f, _) => self.funs[f.0 as usize].sort,
        }
    }

    /// True iff the term contains no variable.
    pub fn is_ground(&self, t: Term) -> bool {
        match self.data(t) {
            TermData::Variable(_) => false,
            TermData::NameApp(_, args) => args.iter().all(|a| self.is_ground(*a)),
            TermData::FunApp(_, args) => args.iter().all(|a| self.is_ground(*a)),
        }
    }

    /// True iff the term is a function applied only to names (possibly zero of them).
    pub fn is_primitive(&self, t: Term) -> bool {
        match self.data(t) {
            TermData::FunApp(_, args) => args.iter().all(|a| self.is_name(*a)),
            _ => false,
        }
    }

    pub fn is_name(&self, t: Term) -> bool {
        matches!(self.data(t), TermData::NameApp(..))
    }

    pub fn is_variable(&self, t: Term) -> bool {
        matches!(self.data(t), TermData::Variable(_))
    }

    pub fn is_function(&self, t: Term) -> bool {
        matches!(self.data(t), TermData::FunApp(..))
    }

    /// The underlying function symbol id of a function-application term, used as a stable,
    /// total-order proxy for "which predicate" when comparing literals. Panics if `t` is not a
    /// function application (callers only use this on literal left-hand sides, which are always
    /// function applications by construction).
    pub(crate) fn data_fun_id(&self, t: Term) -> u32 {
        match self.data(t) {
            TermData::FunApp(f, _) => f.0,
            _ => u32::MAX,
        }
    }

    /// True iff `t` is a function application headed by `f`.
    pub fn is_headed_by(&self, t: Term, f: FunSym) -> bool {
        matches!(self.data(t), TermData::FunApp(g, _) if *g == f)
    }

    /// The function symbol of a function-application term, or `None` otherwise.
    pub fn fun_sym(&self, t: Term) -> Option<FunSym> {
        match self.data(t) {
            TermData::FunApp(f, _) => Some(*f),
            _ => None,
        }
    }

    /// Number of sorts declared so far. Used to check that a [Sort] value actually belongs to this
    /// factory rather than one created by a different `TermFactory` instance.
    pub fn sort_count(&self) -> usize {
        self.sorts.len()
    }

    /// Number of distinct terms interned so far. Used to check that a [Term] value actually
    /// belongs to this factory.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// True iff `t` was interned by this factory.
    pub fn contains_term(&self, t: Term) -> bool {
        (t.0 as usize) < self.term_count()
    }

    /// True iff `sort` was declared by this factory.
    pub fn contains_sort(&self, sort: Sort) -> bool {
        (sort.0 as usize) < self.sort_count()
    }

    /// Direct subterm arguments, empty for variables and plain names.
    pub fn args(&self, t: Term) -> &[Term] {
        match self.data(t) {
            TermData::Variable(_) => &[],
            TermData::NameApp(_, args) => args,
            TermData::FunApp(_, args) => args,
        }
    }

    /// All variables occurring in a term, in first-occurrence order, without duplicates.
    pub fn variables_in(&self, t: Term, out: &mut Vec<Term>) {
        match self.data(t) {
            TermData::Variable(_) => {
                if !out.contains(&t) {
                    out.push(t);
                }
            }
            TermData::NameApp(_, args) | TermData::FunApp(_, args) => {
                for a in args {
                    self.variables_in(*a, out);
                }
            }
        }
    }

    /// Computes a most general unifier of `a` and `b`, extending `theta`. Fails (returns `None`)
    /// if the head symbols disagree, arities disagree, or the unifier would require binding a
    /// variable already bound to something incompatible.
    ///
    /// Variables never occur inside other terms in this language (terms are either variables,
    /// names, or functions applied to names/variables of a finite Herbrand universe), so the
    /// classical occurs-check degenerates to a direct identity/consistency check.
    pub fn unify(
        &self,
        a: Term,
        b: Term,
        theta: &super::substitution::Substitution,
    ) -> Option<super::substitution::Substitution> {
        let mut out = theta.clone();
        if self.unify_into(a, b, &mut out) {
            Some(out)
        } else {
            None
        }
    }

    fn unify_into(&self, a: Term, b: Term, theta: &mut super::substitution::Substitution) -> bool {
        let ra = self.resolve(a, theta);
        let rb = self.resolve(b, theta);
        if ra == rb {
            return true;
        }
        match (self.is_variable(ra), self.is_variable(rb)) {
            (true, _) => {
                theta.bind(ra, rb);
                true
            }
            (_, true) => {
                theta.bind(rb, ra);
                true
            }
            _ => match (self.data(ra), self.data(rb)) {
                (TermData::FunApp(fa, aargs), TermData::FunApp(fb, bargs)) => {
                    if fa != fb || aargs.len() != bargs.len() {
                        return false;
                    }
                    let (aargs, bargs) = (aargs.clone(), bargs.clone());
                    aargs
                        .iter()
                        .zip(bargs.iter())
                        .all(|(x, y)| self.unify_into(*x, *y, theta))
                }
                (TermData::NameApp(na, aargs), TermData::NameApp(nb, bargs)) => {
                    if na != nb || aargs.len() != bargs.len() {
                        return false;
                    }
                    let (aargs, bargs) = (aargs.clone(), bargs.clone());
                    aargs
                        .iter()
                        .zip(bargs.iter())
                        .all(|(x, y)| self.unify_into(*x, *y, theta))
                }
                _ => false,
            },
        }
    }

    /// Follows `t` through `theta` until reaching a term the substitution does not rebind.
    /// Variables never occur inside other terms, so a single lookup (no recursive walking into
    /// subterms) suffices to reach a fixpoint.
    fn resolve(&self, t: Term, theta: &super::substitution::Substitution) -> Term {
        let mut current = t;
        let mut seen = 0;
        while self.is_variable(current) {
            match theta.get(current) {
                Some(next) if next != current => {
                    current = next;
                    seen += 1;
                    if seen > self.vars.len() + 1 {
                        break;
                    }
                }
                _ => break,
            }
        }
        current
    }

    /// Applies a substitution to a term, rebuilding (and re-interning) it bottom-up. Variables
    /// absent from the substitution are left unchanged.
    pub fn substitute(&mut self, t: Term, theta: &super::substitution::Substitution) -> Term {
        match self.data(t).clone() {
            TermData::Variable(_) => theta.get(t).unwrap_or(t),
            TermData::NameApp(n, args) => {
                if args.is_empty() {
                    return t;
                }
                let new_args: Vec<Term> = args.iter().map(|a| self.substitute(*a, theta)).collect();
                if new_args == args {
                    t
                } else {
                    self.intern_term(TermData::NameApp(n, new_args))
                }
            }
            TermData::FunApp(f, args) => {
                let new_args: Vec<Term> = args.iter().map(|a| self.substitute(*a, theta)).collect();
                if new_args == args {
                    t
                } else {
                    self.intern_term(TermData::FunApp(f, new_args))
                }
            }
        }
    }
}
