use fw_core::{Action, Range, Rule};

use crate::address::parse_address_spec;
use crate::error::ParseError;
use crate::protocols;

const CHAINS: &[&str] = &["-A", "--append"];
const TARGETS: &[&str] = &["-j", "--jump"];
const DPORTS: &[&str] = &["--destination-port", "--dport", "--dports"];
const SPORTS: &[&str] = &["--sport", "--source-port", "--sports"];
const SADDRESSES: &[&str] = &["-s", "--source", "-src", "--src-range"];
const DADDRESSES: &[&str] = &["-d", "--destination", "-dst", "--dst-range"];
const PROTOCOL_OPTS: &[&str] = &["-p", "--protocol", "--protocols"];

fn is_one_of(token: &str, set: &[&str]) -> bool {
    set.contains(&token)
}

fn arg<'a>(tokens: &[&'a str], i: usize) -> Result<&'a str, ParseError> {
    tokens
        .get(i + 1)
        .copied()
        .ok_or_else(|| ParseError::MissingArgument {
            option: tokens[i].to_string(),
        })
}

/// `true` iff `tokens` carries `-A <chain>` or `--append <chain>` for the
/// given chain name.
pub fn rule_belongs_to_chain(tokens: &[&str], chain: &str) -> bool {
    tokens
        .windows(2)
        .any(|w| is_one_of(w[0], CHAINS) && w[1] == chain)
}

fn parse_port_spec(value: &str) -> Result<(u32, u32), ParseError> {
    if let Some((lo, hi)) = value.split_once(':') {
        let lo = lo
            .parse()
            .map_err(|_| ParseError::InvalidPort(value.to_string()))?;
        let hi = hi
            .parse()
            .map_err(|_| ParseError::InvalidPort(value.to_string()))?;
        Ok((lo, hi))
    } else {
        let port = value
            .parse()
            .map_err(|_| ParseError::InvalidPort(value.to_string()))?;
        Ok((port, port))
    }
}

fn parse_protocol_spec(value: &str) -> Result<(u32, u32), ParseError> {
    if value.eq_ignore_ascii_case("all") {
        return Ok((0, 255));
    }
    if let Ok(number) = value.parse::<u32>() {
        return Ok((number, number));
    }
    let code = protocols::lookup(value)
        .ok_or_else(|| ParseError::UnknownProtocol(value.to_string()))?;
    Ok((code as u32, code as u32))
}

fn parse_target(value: &str) -> Result<Action, ParseError> {
    if value.eq_ignore_ascii_case("DROP") {
        Ok(Action::DROP)
    } else if value.eq_ignore_ascii_case("ACCEPT") {
        Ok(Action::ACCEPT)
    } else if value.eq_ignore_ascii_case("REJECT") {
        Ok(Action::REJECT)
    } else if value.eq_ignore_ascii_case("QUEUE") {
        Ok(Action::QUEUE)
    } else if value.eq_ignore_ascii_case("RETURN") {
        Ok(Action::RETURN)
    } else {
        Err(ParseError::UnknownTarget(value.to_string()))
    }
}

/// A comma-separated port list (`"80,443"`) expands into one rule per value,
/// all other fields shared. Returns `None` when `value` has no comma, so the
/// caller can fall through to ordinary single-range parsing.
fn expand_comma_ports(
    tokens: &[&str],
    value_index: usize,
    value: &str,
) -> Result<Option<Vec<Rule>>, ParseError> {
    if !value.contains(',') {
        return Ok(None);
    }
    let mut expanded = Vec::new();
    for part in value.split(',') {
        let mut substituted = tokens.to_vec();
        substituted[value_index] = part;
        let line = substituted.join(" ");
        let mut rules = parse_rule(&line)?;
        expanded.push(rules.remove(0));
    }
    Ok(Some(expanded))
}

/// Parses a single iptables-style rule line (e.g. `-A INPUT -s 10.0.0.0/8
/// -p tcp --dport 80,443 -j DROP`) into one or more [`fw_core::Rule`]
/// values (more than one only when a comma-separated port list is present).
///
/// Options not recognized here (chain matching extensions, MAC filters, and
/// so on) are silently skipped, matching the original collaborator's scope.
pub fn parse_rule(line: &str) -> Result<Vec<Rule>, ParseError> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    let mut src_addr = (0u32, u32::MAX);
    let mut dst_addr = (0u32, u32::MAX);
    let mut src_port = (1u32, 65535u32);
    let mut dst_port = (1u32, 65535u32);
    let mut proto = (0u32, 255u32);
    let mut target: Option<Action> = None;

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];

        if is_one_of(token, DADDRESSES) {
            dst_addr = parse_address_spec(arg(&tokens, i)?)?;
            i += 2;
            continue;
        }
        if is_one_of(token, SADDRESSES) {
            src_addr = parse_address_spec(arg(&tokens, i)?)?;
            i += 2;
            continue;
        }
        if is_one_of(token, PROTOCOL_OPTS) {
            proto = parse_protocol_spec(arg(&tokens, i)?)?;
            i += 2;
            continue;
        }
        if is_one_of(token, DPORTS) {
            let value = arg(&tokens, i)?;
            if let Some(rules) = expand_comma_ports(&tokens, i + 1, value)? {
                return Ok(rules);
            }
            dst_port = parse_port_spec(value)?;
            i += 2;
            continue;
        }
        if is_one_of(token, SPORTS) {
            let value = arg(&tokens, i)?;
            if let Some(rules) = expand_comma_ports(&tokens, i + 1, value)? {
                return Ok(rules);
            }
            src_port = parse_port_spec(value)?;
            i += 2;
            continue;
        }
        if is_one_of(token, TARGETS) {
            target = Some(parse_target(arg(&tokens, i)?)?);
            i += 2;
            continue;
        }

        i += 1;
    }

    let action = target.ok_or_else(|| ParseError::MissingTarget(trimmed.to_string()))?;
    Ok(vec![Rule::new(
        [
            Range::new(src_addr.0, src_addr.1),
            Range::new(src_port.0, src_port.1),
            Range::new(dst_addr.0, dst_addr.1),
            Range::new(dst_port.0, dst_port.1),
            Range::new(proto.0, proto.1),
        ],
        action,
    )])
}
