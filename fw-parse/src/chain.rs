//! Extracting a single chain's rule list (plus its default policy) out of
//! an iptables-save-style dump.
//!
//! The file format interleaves three kinds of line:
//!
//! - `:CHAIN POLICY [pkts:bytes]`: declares a chain and its default policy.
//! - `-A CHAIN <options...> -j TARGET`: appends a rule to a chain.
//! - everything else (`*filter`, `COMMIT`, blank lines, comments starting
//!   with `#`) is ignored.

use fw_core::{Action, Rule};

use crate::error::ParseError;
use crate::rule::{parse_rule, rule_belongs_to_chain};

fn parse_default_policy(line: &str, chain: &str) -> Option<Action> {
    let rest = line.strip_prefix(':')?;
    let mut fields = rest.split_whitespace();
    let name = fields.next()?;
    if name != chain {
        return None;
    }
    let policy = fields.next()?;
    match policy {
        "DROP" => Some(Action::DROP),
        "ACCEPT" => Some(Action::ACCEPT),
        "REJECT" => Some(Action::REJECT),
        "QUEUE" => Some(Action::QUEUE),
        "RETURN" => Some(Action::RETURN),
        _ => None,
    }
}

/// Extracts every rule appended to `chain` in `content` (an iptables-save
/// style dump), in file order, followed by a [`Rule::catch_all`] rule built
/// from the chain's declared default policy.
///
/// This final catch-all rule is what makes the resulting firewall total: a
/// verifier can always find a matching rule for any packet, matching the
/// semantics of a real iptables chain falling through to its policy.
pub fn extract_chain_rules(content: &str, chain: &str) -> Result<Vec<Rule>, ParseError> {
    let mut rules = Vec::new();
    let mut policy: Option<Action> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('*') {
            continue;
        }
        if line == "COMMIT" {
            continue;
        }
        if line.starts_with(':') {
            if let Some(found) = parse_default_policy(line, chain) {
                policy = Some(found);
            }
            continue;
        }
        if !line.starts_with('-') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if !rule_belongs_to_chain(&tokens, chain) {
            continue;
        }
        rules.extend(parse_rule(line)?);
    }

    let policy = policy.ok_or_else(|| ParseError::MissingDefaultPolicy(chain.to_string()))?;
    rules.push(Rule::catch_all(policy));
    Ok(rules)
}
