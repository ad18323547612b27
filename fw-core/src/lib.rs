//! Range-based firewall reachability verification engine.
//!
//! Given an ordered list of 5-tuple range rules (a firewall) and a property
//! (a header region plus an expected action), [`Engine::verify`] decides
//! whether every concrete packet matching the property's header set
//! receives the property's expected action, producing a concrete
//! counterexample [`Witness`] otherwise.
//!
//! The engine never enumerates individual packets: [`slicer`] decomposes
//! each dimension of the property's region into boundary-induced slices,
//! and [`evaluator`] walks the Cartesian product of those slices one
//! representative point at a time, keeping the reachable state space
//! proportional to rule overlap rather than to the 32-bit/16-bit integer
//! domains.

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod global;
pub mod range;
pub mod rule;
pub mod slicer;
pub mod store;
pub mod witness;

pub use engine::Engine;
pub use error::EngineError;
pub use evaluator::VerifyOutcome;
pub use range::Range;
pub use rule::{Action, Property, Rule, DIMENSIONS, DST_ADDR, DST_PORT, PROTO, SRC_ADDR, SRC_PORT};
pub use witness::Witness;
