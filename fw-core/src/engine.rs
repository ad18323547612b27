use slog::{debug, o, trace, Logger};

use crate::error::EngineError;
use crate::evaluator::{self, VerifyOutcome};
use crate::rule::{Property, Rule};
use crate::store::RuleStore;
use crate::witness::Witness;

/// An embedder-owned firewall reachability verifier.
///
/// Holds one firewall under construction plus the witness from the most
/// recent failing `verify`. `Engine` is `Send` but carries no internal
/// synchronization: concurrent mutation of the same instance from multiple
/// threads without external locking is undefined behavior (§5 of the design
/// doc). Use [`crate::global`] for the legacy process-wide, mutex-serialized
/// free-function shape.
pub struct Engine {
    store: RuleStore,
    witness: Witness,
    log: Logger,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an empty engine with logging discarded.
    pub fn new() -> Self {
        Self::with_logger(Logger::root(slog::Discard, o!()))
    }

    /// Creates an empty engine that logs rule rejection and verify outcomes
    /// through `log`.
    pub fn with_logger(log: Logger) -> Self {
        Self {
            store: RuleStore::new(),
            witness: Witness::zero(),
            log,
        }
    }

    /// Appends `rule` to the firewall. Returns the resulting size, or
    /// rejects the call (firewall left unchanged) if any dimension has
    /// `lo > hi` or the action code is outside `{0..4}`.
    pub fn add(&mut self, rule: Rule) -> Result<usize, EngineError> {
        match self.store.add(rule) {
            Ok(size) => {
                trace!(self.log, "rule added"; "size" => size);
                Ok(size)
            }
            Err(e) => {
                debug!(self.log, "rule rejected"; "error" => %e);
                Err(e)
            }
        }
    }

    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Empties the firewall and resets the witness to the zero 5-tuple,
    /// returning the pre-clear size.
    pub fn clear(&mut self) -> usize {
        let previous = self.store.clear();
        self.witness = Witness::zero();
        debug!(self.log, "firewall cleared"; "previous_size" => previous);
        previous
    }

    /// `true` iff every packet in `property`'s region receives `property`'s
    /// expected action. On `false`, the witness slot is updated; retrieve it
    /// with [`Engine::witness`].
    pub fn verify(&mut self, property: &Property) -> bool {
        match self.verify_cancellable(property, || false) {
            VerifyOutcome::Holds => true,
            VerifyOutcome::Fails { .. } => false,
            VerifyOutcome::Cancelled => {
                unreachable!("unconditional verify never cancels")
            }
        }
    }

    /// As [`Engine::verify`], but polls `should_cancel` between slice-tuples
    /// and returns [`VerifyOutcome::Cancelled`] (witness unchanged) if it
    /// ever returns `true`.
    pub fn verify_cancellable(
        &mut self,
        property: &Property,
        should_cancel: impl FnMut() -> bool,
    ) -> VerifyOutcome {
        trace!(self.log, "verify start"; "rules" => self.store.size());
        let outcome = evaluator::verify(&self.store, property, should_cancel);
        match outcome {
            VerifyOutcome::Holds => {
                debug!(self.log, "verify result"; "holds" => true);
            }
            VerifyOutcome::Fails { witness } => {
                debug!(self.log, "verify result";
                    "holds" => false, "witness" => ?witness.values);
                self.witness = witness;
            }
            VerifyOutcome::Cancelled => {
                debug!(self.log, "verify cancelled");
            }
        }
        outcome
    }

    /// The witness from the most recent failing `verify`, or the zero
    /// 5-tuple if there has been no failing `verify` since construction or
    /// the last `clear`.
    pub fn witness(&self) -> Witness {
        self.witness
    }

    pub fn rules(&self) -> &[Rule] {
        self.store.rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Range;
    use crate::rule::{Action, DIMENSIONS};

    fn rule(ranges: [(u32, u32); DIMENSIONS], action: Action) -> Rule {
        Rule::new(ranges.map(|(lo, hi)| Range::new(lo, hi)), action)
    }

    #[test]
    fn witness_is_zero_before_any_failure_test() {
        let engine = Engine::new();
        assert_eq!(engine.witness(), Witness::zero());
    }

    #[test]
    fn witness_resets_on_clear_test() {
        let mut engine = Engine::new();
        let prop = rule([(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)], Action::ACCEPT);
        assert!(!engine.verify(&prop));
        assert_ne!(engine.witness(), Witness::zero());

        engine.clear();
        assert_eq!(engine.witness(), Witness::zero());
    }

    #[test]
    fn scenario_s1_overlap_prefers_first_match_test() {
        let mut engine = Engine::new();
        engine
            .add(rule(
                [(10, 110), (90, 190), (0, 0), (0, 0), (0, 0)],
                Action::DROP,
            ))
            .unwrap();
        engine
            .add(rule(
                [(20, 120), (80, 180), (0, 0), (0, 0), (0, 0)],
                Action::ACCEPT,
            ))
            .unwrap();
        engine
            .add(rule(
                [(1, 200), (1, 200), (0, 0), (0, 0), (0, 0)],
                Action::DROP,
            ))
            .unwrap();

        let prop = rule(
            [(23, 87), (73, 177), (0, 0), (0, 0), (0, 0)],
            Action::DROP,
        );
        assert!(!engine.verify(&prop));
    }

    #[test]
    fn scenario_s2_property_inside_first_rule_holds_test() {
        let mut engine = Engine::new();
        engine
            .add(rule(
                [(10, 110), (90, 190), (0, 0), (0, 0), (0, 0)],
                Action::DROP,
            ))
            .unwrap();
        engine
            .add(rule(
                [(20, 120), (80, 180), (0, 0), (0, 0), (0, 0)],
                Action::ACCEPT,
            ))
            .unwrap();
        engine
            .add(rule(
                [(1, 200), (1, 200), (0, 0), (0, 0), (0, 0)],
                Action::DROP,
            ))
            .unwrap();

        let prop = rule(
            [(33, 87), (75, 79), (0, 0), (0, 0), (0, 0)],
            Action::DROP,
        );
        assert!(engine.verify(&prop));
    }

    #[test]
    fn scenario_s4_disjoint_rule_and_property_test() {
        let mut engine = Engine::new();
        engine
            .add(rule(
                [(0, 100), (0, u32::MAX), (0, u32::MAX), (0, u32::MAX), (0, 255)],
                Action::DROP,
            ))
            .unwrap();
        engine
            .add(rule(
                [
                    (0, u32::MAX),
                    (0, u32::MAX),
                    (0, u32::MAX),
                    (0, u32::MAX),
                    (0, 255),
                ],
                Action::ACCEPT,
            ))
            .unwrap();

        let prop = rule(
            [
                (200, 300),
                (0, u32::MAX),
                (0, u32::MAX),
                (0, u32::MAX),
                (0, 255),
            ],
            Action::ACCEPT,
        );
        assert!(engine.verify(&prop));
    }

    #[test]
    fn scenario_s5_add_clear_round_trip_test() {
        let mut engine = Engine::new();
        let r = rule([(0, 1), (0, 1), (0, 1), (0, 1), (0, 1)], Action::DROP);
        engine.add(r).unwrap();
        engine.add(r).unwrap();
        assert_eq!(engine.size(), 2);
        assert_eq!(engine.clear(), 2);
        assert_eq!(engine.size(), 0);
    }

    #[test]
    fn scenario_s6_determinism_across_instances_test() {
        let build = || {
            let mut engine = Engine::new();
            engine
                .add(rule(
                    [(10, 110), (90, 190), (0, 0), (0, 0), (0, 0)],
                    Action::DROP,
                ))
                .unwrap();
            engine
                .add(rule(
                    [(20, 120), (80, 180), (0, 0), (0, 0), (0, 0)],
                    Action::ACCEPT,
                ))
                .unwrap();
            engine
                .add(rule(
                    [(1, 200), (1, 200), (0, 0), (0, 0), (0, 0)],
                    Action::DROP,
                ))
                .unwrap();
            engine
        };

        let mut a = build();
        let mut b = build();
        let prop = rule(
            [(23, 87), (73, 177), (0, 0), (0, 0), (0, 0)],
            Action::DROP,
        );
        assert_eq!(a.verify(&prop), b.verify(&prop));
        assert_eq!(a.witness(), b.witness());
    }
}
