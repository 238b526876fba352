/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library. No logging implementation is bundled;
callers plug in `env_logger` or similar, as with the `log` crate generally. Logging is diagnostic
only --- no decision the engine makes depends on whether logging is enabled.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [H+ computation](crate::grounder::Grounder) and Ewff model enumeration.
    pub const GROUNDING: &str = "grounding";

    /// Logs related to unit propagation in a [Setup](crate::db::setup::Setup).
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to subsumption-minimisation.
    pub const SUBSUMPTION: &str = "subsumption";

    /// Logs related to PEL computation and case-splitting.
    pub const SPLIT: &str = "split";

    /// Logs related to belief-conditional propagation and level migration.
    pub const BELIEF: &str = "belief";

    /// Logs related to ENNF/CNF query normalisation.
    pub const NORMALISE: &str = "normalise";
}
