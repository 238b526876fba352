/*!
The ground clause databases: a single [Setup](setup::Setup) and the plausibility-ranked
[Setups](setups::Setups) built from belief conditionals.
*/

pub mod setup;
pub use setup::Setup;

pub mod setups;
pub use setups::Setups;
