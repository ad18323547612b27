use thiserror::Error;

/// Parse failures never abort the process; callers (principally `fw-cli`)
/// decide how to report them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("rule has no -j/--jump target: {0:?}")]
    MissingTarget(String),

    #[error(
        "unknown target {0:?} (expected DROP/ACCEPT/REJECT/QUEUE/RETURN, case-insensitive)"
    )]
    UnknownTarget(String),

    #[error("invalid IPv4 address or range {0:?}")]
    InvalidAddress(String),

    #[error("invalid port specification {0:?}")]
    InvalidPort(String),

    #[error("unknown protocol {0:?}")]
    UnknownProtocol(String),

    #[error("option {option} requires an argument")]
    MissingArgument { option: String },

    #[error("no default policy found for chain {0:?}")]
    MissingDefaultPolicy(String),
}
