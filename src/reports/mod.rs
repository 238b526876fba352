/*!
Reports returned by the entailment front end.
*/

/// A tri-valued entailment answer: `Yes`, `No`, or `Unknown` ("not provable within the given split
/// budget" --- not an error, see `types::err`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Entailment {
    /// The query is entailed at the given split depth.
    Yes,

    /// The query's negation is entailed at the given split depth (decided, not merely unproven).
    No,

    /// Neither the query nor its negation could be decided within the split budget.
    Unknown,
}

impl std::fmt::Display for Entailment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
