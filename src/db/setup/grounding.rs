/*!
Builds an initial [Setup] from a set of (possibly non-ground, guarded) axiom clauses: every
variable is bound, one satisfying assignment of its guard at a time, to names drawn from H+, and
the resulting ground, tautology-free, primitive instances are inserted.
*/

use crate::structures::clause::Clause;
use crate::structures::term::{Term, TermFactory};
use crate::types::err::{ErrorKind, LiteralError};

use super::Setup;

/// Grounds `axioms` over `hplus` and returns a sealed root [Setup] containing every non-tautologous
/// primitive instance.
pub(crate) fn ground_axioms(
    factory: &mut TermFactory,
    axioms: &[Clause],
    hplus: &[Term],
) -> Result<Setup, ErrorKind> {
    let mut setup = Setup::new_root();
    for clause in axioms {
        let mut vars = Vec::new();
        for lit in clause.literals() {
            factory.variables_in(lit.lhs(), &mut vars);
            factory.variables_in(lit.rhs(), &mut vars);
            for a in lit.action_prefix() {
                factory.variables_in(*a, &mut vars);
            }
        }
        clause.guard().variables(factory, &mut vars);

        let models: Vec<_> = {
            let factory_ro: &TermFactory = factory;
            clause.guard().models(factory_ro, &vars, hplus).collect()
        };
        for theta in models {
            let grounded = clause.substitute(factory, &theta);
            if grounded.tautologous(factory) {
                continue;
            }
            // every variable in `vars` was bound by `theta`, so a non-primitive literal here means
            // the axiom's lhs had a nested, unflattened function application, not an ordinary
            // grounding gap --- a caller error, not a model to silently skip.
            if !grounded.primitive(factory) {
                return Err(LiteralError::NotPrimitive.into());
            }
            setup.add_clause(grounded)?;
        }
    }
    setup.init(factory);
    Ok(setup)
}
