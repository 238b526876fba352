/*!
Governs which atoms may be split on at a given recursion depth (§4.4.3's rule that an `SF` literal
may be split only at even steps, conventionally depth 0 or the deepest level).
*/

use crate::config::SfSplitParity;
use crate::structures::atom::Atom;
use crate::structures::term::{FunSym, TermFactory};

/// A split policy: which function symbol (if any) denotes `SF`, and which parity convention
/// restricts splitting on it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplitPolicy {
    pub sf_fun: Option<FunSym>,
    pub parity: SfSplitParity,
}

impl Default for SfSplitParity {
    fn default() -> Self {
        SfSplitParity::DeepestOnly
    }
}

impl SplitPolicy {
    pub fn none() -> Self {
        SplitPolicy {
            sf_fun: None,
            parity: SfSplitParity::DeepestOnly,
        }
    }

    pub fn with_sf(sf_fun: FunSym, parity: SfSplitParity) -> Self {
        SplitPolicy {
            sf_fun: Some(sf_fun),
            parity,
        }
    }

    /// True iff splitting on `atom` is permitted when `depth_remaining` further splits are still
    /// available.
    pub fn allows(&self, atom: &Atom, depth_remaining: u32, factory: &TermFactory) -> bool {
        let Some(sf) = self.sf_fun else {
            return true;
        };
        if !factory.is_headed_by(atom.lhs, sf) {
            return true;
        }
        match self.parity {
            SfSplitParity::EvenOnly => depth_remaining % 2 == 0,
            SfSplitParity::DeepestOnly => depth_remaining == 0,
        }
    }
}
