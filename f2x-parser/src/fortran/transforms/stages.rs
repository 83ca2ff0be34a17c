//! Individual transformation stages
//!
//! Each stage implements `Runnable` and can be chained into a `Transform`.

pub mod assembly;
pub mod building;
pub mod filtering;
pub mod pruning;

pub use assembly::{Assemble, SplitStatements};
pub use building::BuildTree;
pub use filtering::FilterConditionals;
pub use pruning::Prune;
