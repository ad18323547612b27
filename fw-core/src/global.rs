//! Process-wide singleton wrapper around [`Engine`].
//!
//! The core design is an embedder-owned [`Engine`] value (§9 of the design
//! doc). This module layers the legacy free-function shape (`add`/`verify`/
//! `witness`/`clear`/`size`) on top of a single `Mutex`-serialized instance,
//! for host bindings that expect process-wide state rather than an owned
//! value.

use std::sync::{Mutex, OnceLock};

use crate::engine::Engine;
use crate::error::EngineError;
use crate::rule::{Property, Rule};
use crate::witness::Witness;

static ENGINE: OnceLock<Mutex<Engine>> = OnceLock::new();

fn engine() -> &'static Mutex<Engine> {
    ENGINE.get_or_init(|| Mutex::new(Engine::new()))
}

/// See [`Engine::add`]. Panics if the lock is poisoned by a prior panicking
/// call, matching the "undefined behavior under uncoordinated concurrent
/// mutation" contract in §5 of the design doc.
pub fn add(rule: Rule) -> Result<usize, EngineError> {
    engine().lock().unwrap().add(rule)
}

/// See [`Engine::verify`].
pub fn verify(property: &Property) -> bool {
    engine().lock().unwrap().verify(property)
}

/// See [`Engine::witness`].
pub fn witness() -> Witness {
    engine().lock().unwrap().witness()
}

/// See [`Engine::clear`].
pub fn clear() -> usize {
    engine().lock().unwrap().clear()
}

/// See [`Engine::size`].
pub fn size() -> usize {
    engine().lock().unwrap().size()
}
