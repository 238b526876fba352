/*!
The query formula AST: uniform recursion over `{Eq, Lit, Junction, Quantifier, Action, Knowledge,
Belief}`, matching the design note on deep inheritance of formula variants --- a single tagged sum
type rather than a class hierarchy, walked by structural matches in [super::ennf] and
[super::eval].
*/

use crate::structures::literal::Literal;
use crate::structures::term::Term;

/// A query formula.
#[derive(Clone, Debug)]
pub enum Formula {
    /// The trivially true formula, introduced by simplification and by grounding an existential
    /// over an empty candidate set's dual (a universal with no instances).
    True,

    /// The trivially false formula, introduced by simplification and by grounding an existential
    /// with no matching names in H+.
    False,

    /// `t1 = t2`.
    Eq(Term, Term),

    /// `t1 != t2`.
    Neq(Term, Term),

    /// A quasi-primitive literal, already carrying its own action prefix.
    Lit(Literal),

    /// `¬φ`.
    Not(Box<Formula>),

    /// `φ ∧ ψ`.
    And(Box<Formula>, Box<Formula>),

    /// `φ ∨ ψ`.
    Or(Box<Formula>, Box<Formula>),

    /// `∃x. φ`.
    Exists(Term, Box<Formula>),

    /// `∀x. φ`.
    Forall(Term, Box<Formula>),

    /// `[a]φ`: φ evaluated one action later, in the situation reached by performing `a`.
    Action(Term, Box<Formula>),

    /// `K_k φ`: the agent knows φ, checked against the root (most plausible, unconditional) setup
    /// at split depth `k`.
    Knowledge(u32, Box<Formula>),

    /// `B_k φ`: the agent believes φ, checked against the full plausibility ranking at split depth
    /// `k`.
    Belief(u32, Box<Formula>),
}

impl Formula {
    pub fn not(self) -> Formula {
        Formula::Not(Box::new(self))
    }

    pub fn and(self, other: Formula) -> Formula {
        Formula::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Formula) -> Formula {
        Formula::Or(Box::new(self), Box::new(other))
    }
}
