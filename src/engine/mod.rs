pub mod ahsp;
pub mod assign;
pub mod derive;
pub mod edit;
pub mod location;
pub mod prune;
pub mod rab;

pub use ahsp::compose;
pub use assign::Assignments;
pub use location::{resolve, ResolvedFactors};
pub use prune::prune;
