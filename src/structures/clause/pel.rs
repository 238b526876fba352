/*!
Possibly-Essential Literals: atoms whose truth a splitter may usefully case-split on.

An atom `a` is a PEL candidate for a `goal` clause with respect to a set of `clauses` if `a`
appears (positively or negatively) in `goal`, or appears in some clause that shares a literal with
`goal` (directly, or transitively through one step of resolution) --- the closure is bounded
because it only ever walks clauses reachable from `goal` by shared atoms, and the atom universe
itself is finite once grounded.
*/

use crate::structures::atom::Atom;
use crate::structures::term::TermFactory;

use super::Clause;

/// Collects PEL atoms for `goal` with respect to `clauses`.
///
/// When `goal` is the empty clause (proving `⊥`, i.e. inconsistency) there is no literal to seed
/// the shared-literal frontier with, so every atom occurring anywhere in `clauses` is taken to be
/// relevant --- any of them could in principle contribute to a derivation of a contradiction.
pub fn pel(clauses: &[Clause], goal: &Clause, factory: &TermFactory) -> Vec<Atom> {
    if goal.is_empty() {
        let mut atoms: Vec<Atom> = Vec::new();
        for clause in clauses {
            for lit in clause.literals() {
                let atom = lit.atom().clone();
                if !atoms.contains(&atom) {
                    atoms.push(atom);
                }
            }
        }
        let _ = factory;
        return atoms;
    }

    let mut relevant_atoms: Vec<Atom> = goal.literals().iter().map(|l| l.atom().clone()).collect();
    let mut frontier = relevant_atoms.clone();
    let mut visited_clauses: Vec<usize> = Vec::new();

    loop {
        let mut grew = false;
        for (idx, clause) in clauses.iter().enumerate() {
            if visited_clauses.contains(&idx) {
                continue;
            }
            let shares = clause
                .literals()
                .iter()
                .any(|l| frontier.iter().any(|a| *a == *l.atom()));
            if !shares {
                continue;
            }
            visited_clauses.push(idx);
            for lit in clause.literals() {
                let atom = lit.atom().clone();
                if !relevant_atoms.contains(&atom) {
                    relevant_atoms.push(atom.clone());
                    grew = true;
                }
            }
        }
        if !grew {
            break;
        }
        frontier = relevant_atoms.clone();
    }

    let _ = factory;
    relevant_atoms
}
