//! Calling-list generation engine
//!
//! Features:
//! - Priority scoring (recency + specialty weights)
//! - Geographic partitioning (latitude round-robin)
//! - Greedy nearest-neighbor route sequencing
//! - List generation orchestrating the three
//!
//! Everything in this crate is a pure function of its inputs: no clocks,
//! no storage, no ambient state. The current time and all tuning come in
//! as parameters, so results are reproducible in tests.

pub mod generator;
pub mod partition;
pub mod route;
pub mod scorer;

pub use generator::CallingListGenerator;
pub use partition::partition;
pub use route::sequence;
pub use scorer::PriorityScorer;
