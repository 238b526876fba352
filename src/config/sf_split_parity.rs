/*!
Resolves the spec's "§4.4.3 an SF literal may be split only at even steps (conventionally depth 0
or the deepest level)" open question into a concrete, configurable rule. See `DESIGN.md` for the
recorded decision.
*/

/// Which split depths permit splitting on an `SF` atom.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SfSplitParity {
    /// `SF` atoms may only be split when the remaining budget is even.
    EvenOnly,

    /// `SF` atoms may only be split at the outermost call of the current `entails`/`inconsistent`
    /// recursion (the "deepest" level, in the sense of being furthest from the base case).
    DeepestOnly,
}
