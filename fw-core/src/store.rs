use crate::error::EngineError;
use crate::rule::{Rule, DIMENSIONS};

/// Append-only, first-match-ordered sequence of rules.
///
/// Rules are never mutated or removed individually; `clear` is the only
/// destructive operation, and it empties the whole sequence.
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends `rule` to the tail of the store. Rejects the call without
    /// mutating the store if any dimension has `lo > hi` or the action code
    /// is outside `{0..4}`.
    pub fn add(&mut self, rule: Rule) -> Result<usize, EngineError> {
        for (dimension, range) in rule.ranges.iter().enumerate() {
            if !range.is_valid() {
                return Err(EngineError::InvalidRange {
                    dimension,
                    lo: range.lo,
                    hi: range.hi,
                });
            }
        }
        if !rule.action.is_valid() {
            return Err(EngineError::InvalidAction(rule.action.code()));
        }
        self.rules.push(rule);
        Ok(self.rules.len())
    }

    pub fn size(&self) -> usize {
        self.rules.len()
    }

    /// Empties the store, returning the size it had beforehand.
    pub fn clear(&mut self) -> usize {
        let previous = self.rules.len();
        self.rules.clear();
        previous
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule (in priority order) whose ranges fully cover every
    /// dimension of `slice_tuple`.
    pub fn first_match(
        &self,
        slice_tuple: &[crate::range::Range; DIMENSIONS],
    ) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.covers(slice_tuple))
    }
}
