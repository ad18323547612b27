//! Argument handling, file loading, and witness formatting for the
//! `fverify` binary.
//!
//! Mirrors the shape of the original collaborator's command line
//! (`fverify [policy] -file [filename]`): the chain's rules and default
//! policy are loaded from an iptables-save dump, and the property to check
//! is itself expressed in iptables rule syntax, reusing [`fw_parse::parse_rule`]
//! for both instead of hand-rolling a second flag grammar.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Colorize;
use fw_core::{Engine, Witness};
use slog::Logger;

/// Audit a firewall chain against a reachability property, iptables-rule
/// style.
///
/// Example: `fverify -A INPUT --file rules.txt -p tcp --dport 22 -j DROP`
/// asks whether every TCP packet addressed to port 22 is dropped by the
/// `INPUT` chain.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Opts {
    /// Chain to check (e.g. INPUT, OUTPUT, FORWARD).
    #[arg(short = 'A', long = "append")]
    pub chain: String,

    /// Expected target for the property (DROP/ACCEPT/REJECT/QUEUE/RETURN).
    #[arg(short = 'j', long = "jump")]
    pub jump: String,

    /// iptables-save dump to load the chain's rules from.
    #[arg(long = "file", alias = "infile")]
    pub file: PathBuf,

    /// Source address or subnet, e.g. `10.0.0.0/8`.
    #[arg(short = 's', long = "source")]
    pub source: Option<String>,

    /// Destination address or subnet.
    #[arg(short = 'd', long = "destination")]
    pub destination: Option<String>,

    /// Protocol name or number, or `all`.
    #[arg(short = 'p', long = "protocol", alias = "protocols")]
    pub protocol: Option<String>,

    /// Source port, port range, or comma list.
    #[arg(long = "sport", alias = "source-port", alias = "sports")]
    pub sport: Option<String>,

    /// Destination port, port range, or comma list.
    #[arg(long = "dport", alias = "destination-port", alias = "dports")]
    pub dport: Option<String>,

    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Opts {
    /// Reassembles the property as an iptables rule line, so the same
    /// [`fw_parse::parse_rule`] grammar used for the rule file governs the
    /// property's syntax too.
    fn property_line(&self) -> String {
        let mut parts = vec!["-A".to_string(), self.chain.clone()];
        if let Some(s) = &self.source {
            parts.push("-s".to_string());
            parts.push(s.clone());
        }
        if let Some(d) = &self.destination {
            parts.push("-d".to_string());
            parts.push(d.clone());
        }
        if let Some(p) = &self.protocol {
            parts.push("-p".to_string());
            parts.push(p.clone());
        }
        if let Some(sp) = &self.sport {
            parts.push("--sport".to_string());
            parts.push(sp.clone());
        }
        if let Some(dp) = &self.dport {
            parts.push("--dport".to_string());
            parts.push(dp.clone());
        }
        parts.push("-j".to_string());
        parts.push(self.jump.clone());
        parts.join(" ")
    }
}

/// Builds a `slog-term` + `slog-async` drain, optionally gated by
/// `RUST_LOG` via `slog-envlogger`, at the verbosity `-v` implies.
pub fn build_logger(verbose: u8) -> Logger {
    use slog::Drain;

    let min_level = match verbose {
        0 => slog::Level::Info,
        1 => slog::Level::Debug,
        _ => slog::Level::Trace,
    };

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_envlogger::new(drain);
    let drain = drain.filter_level(min_level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, slog::o!())
}

fn format_address(value: u32) -> String {
    std::net::Ipv4Addr::from(value).to_string()
}

/// Renders a witness as `src_ip:src_port -> dst_ip:dst_port protocol=N`.
pub fn format_witness(witness: &Witness) -> String {
    format!(
        "{}:{} \u{2192} {}:{} protocol={}",
        format_address(witness.src_addr()),
        witness.src_port(),
        format_address(witness.dst_addr()),
        witness.dst_port(),
        witness.proto(),
    )
}

/// The exit code this run should terminate with, per §7 of the design
/// document: 0 pass, 1 fail, 2 usage/parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passes,
    Fails(Witness),
}

/// Loads the chain, appends a default-policy catch-all, and checks the
/// property derived from `opts` against it.
///
/// Returns `Err` for anything that should be reported on stderr and exit
/// with code 2 (missing file, malformed rule syntax, unknown target/
/// protocol); a `Verdict::Fails` is a successful run that found a
/// counterexample, distinct from a run that could not even be evaluated.
pub fn run(opts: &Opts, log: &Logger) -> Result<Verdict> {
    let contents = fs::read_to_string(&opts.file)
        .with_context(|| format!("reading rule file {}", opts.file.display()))?;

    let rules = fw_parse::extract_chain_rules(&contents, &opts.chain)
        .map_err(|e| anyhow!("parsing chain {:?}: {e}", opts.chain))?;

    let mut engine = Engine::with_logger(log.clone());
    for rule in rules {
        engine
            .add(rule)
            .map_err(|e| anyhow!("loading chain {:?}: {e}", opts.chain))?;
    }
    slog::debug!(log, "chain loaded"; "chain" => &opts.chain, "rules" => engine.size());

    let properties = fw_parse::parse_rule(&opts.property_line())
        .map_err(|e| anyhow!("parsing property: {e}"))?;

    for property in &properties {
        if !engine.verify(property) {
            return Ok(Verdict::Fails(engine.witness()));
        }
    }
    Ok(Verdict::Passes)
}

/// Prints `verdict` the way the legacy collaborator's CLI did and returns
/// the process exit code.
pub fn report(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Passes => {
            println!("{}", "--> Property passes!".green());
            0
        }
        Verdict::Fails(witness) => {
            println!("--> Witness found: {}", format_witness(&witness).red());
            1
        }
    }
}
