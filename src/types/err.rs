/*!
Error types used in the library.

Mirrors the shape-error taxonomy of the spec's error handling design: a union of small, matchable
enums, one per sub-concern, each convertible into the top-level [ErrorKind] via `From`. Nothing
here is raised for "ordinary" outcomes --- budget exhaustion surfaces as
[Entailment::Unknown](crate::reports::Entailment), not as an error, and a detected inconsistency is
latched in a setup rather than returned as an `Err`.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error constructing or applying a term, name, or function symbol.
    Term(TermError),

    /// An error constructing a literal.
    Literal(LiteralError),

    /// An error manipulating a clause.
    Clause(ClauseError),

    /// An error in a query formula.
    Query(QueryError),

    /// An error in the setup lifecycle.
    Setup(SetupError),

    /// The attempted operation is invalid given the current lifecycle state of the context.
    State,
}

/// Errors constructing or applying terms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TermError {
    /// A sort id was not recognised by the factory.
    UnknownSort,

    /// A function or complex name was applied to the wrong number of arguments.
    ArityMismatch,

    /// A name of arity greater than zero was requested for a non-rigid sort.
    RigidArityViolation,
}

impl From<TermError> for ErrorKind {
    fn from(e: TermError) -> Self {
        ErrorKind::Term(e)
    }
}

/// Errors constructing literals.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LiteralError {
    /// The left-hand side is not a function of names/variables after flattening.
    NotPrimitive,

    /// The literal is not quasi-primitive (lhs not a function, or rhs not a name/variable).
    NotQuasiPrimitive,

    /// An `SF` literal was requested for an action term that is not primitive.
    SensingOnNonPrimitiveAction,
}

impl From<LiteralError> for ErrorKind {
    fn from(e: LiteralError) -> Self {
        ErrorKind::Literal(e)
    }
}

/// Errors manipulating clauses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseError {
    /// No unifier exists between the two literals offered for resolution.
    UnificationFailed,

    /// The guards of the two clauses being resolved are jointly unsatisfiable.
    GuardUnsatisfiable,

    /// The resolvent would be tautologous (not an error in the usual sense --- callers are
    /// expected to treat this as "no resolvent produced").
    Tautologous,
}

impl From<ClauseError> for ErrorKind {
    fn from(e: ClauseError) -> Self {
        ErrorKind::Clause(e)
    }
}

/// Errors in query formulas.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QueryError {
    /// The query contains a variable not bound by any quantifier.
    FreeVariable,

    /// The query refers to a symbol unknown to the factory.
    UnknownSymbol,
}

impl From<QueryError> for ErrorKind {
    fn from(e: QueryError) -> Self {
        ErrorKind::Query(e)
    }
}

/// Errors in the setup lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetupError {
    /// `AddClause` was called after `Init`.
    AlreadySealed,

    /// A child setup was constructed from a parent that has not yet been sealed.
    ParentNotSealed,
}

impl From<SetupError> for ErrorKind {
    fn from(e: SetupError) -> Self {
        ErrorKind::Setup(e)
    }
}
