use std::fmt;

/// Errors raised by relation construction, adjacency building and ranking.
///
/// Every variant is detected before any rank round runs, so a failed call
/// never leaves a partially-updated rank vector behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    /// Node count is zero or above the supported capacity (`None` = unbounded).
    #[error(
        "invalid node count {n} (must be at least 1{})",
        .max.map(|m| format!(" and at most {m}")).unwrap_or_default()
    )]
    InvalidSize { n: usize, max: Option<usize> },

    /// Node count passed by the caller disagrees with the input structure.
    #[error("node count mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A relation row has the wrong number of columns.
    #[error("relation row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A relation entry is neither 0 nor 1.
    #[error("relation entry ({row}, {col}) is {value}, expected 0 or 1")]
    MalformedRelation { row: usize, col: usize, value: i64 },

    /// An edge endpoint lies outside `0..n`.
    #[error("node {node} is out of range for a graph of {n} nodes")]
    NodeOutOfRange { node: usize, n: usize },

    /// Damping factor outside the open interval (0, 1).
    #[error("damping factor {0} is outside (0, 1)")]
    InvalidDamping(f64),

    /// Convergence tolerance that is not finite and positive.
    #[error("convergence tolerance {0} must be finite and positive")]
    InvalidTolerance(f64),
}

impl RankError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidSize { .. } => ErrorCode::InvalidSize,
            Self::SizeMismatch { .. } => ErrorCode::SizeMismatch,
            Self::NotSquare { .. } => ErrorCode::NotSquare,
            Self::MalformedRelation { .. } => ErrorCode::MalformedRelation,
            Self::NodeOutOfRange { .. } => ErrorCode::NodeOutOfRange,
            Self::InvalidDamping(_) => ErrorCode::InvalidDamping,
            Self::InvalidTolerance(_) => ErrorCode::InvalidTolerance,
        }
    }
}

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidSize,
    SizeMismatch,
    NotSquare,
    MalformedRelation,
    NodeOutOfRange,
    InvalidDamping,
    InvalidTolerance,
    InputParseError,
    ConfigParseError,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidSize => "E1001",
            Self::SizeMismatch => "E1002",
            Self::NotSquare => "E1003",
            Self::MalformedRelation => "E1004",
            Self::NodeOutOfRange => "E1005",
            Self::InvalidDamping => "E2001",
            Self::InvalidTolerance => "E2002",
            Self::InputParseError => "E3001",
            Self::ConfigParseError => "E3002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidSize => "Invalid node count",
            Self::SizeMismatch => "Node count mismatch",
            Self::NotSquare => "Link relation is not square",
            Self::MalformedRelation => "Malformed link relation entry",
            Self::NodeOutOfRange => "Node index out of range",
            Self::InvalidDamping => "Invalid damping factor",
            Self::InvalidTolerance => "Invalid convergence tolerance",
            Self::InputParseError => "Link data parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidSize => Some(
                "Provide at least one page; raise `max_nodes` or use an edge list for larger graphs.",
            ),
            Self::SizeMismatch => None,
            Self::NotSquare => Some("Every matrix row must have one entry per page."),
            Self::MalformedRelation => Some("Matrix entries must be 0 (no link) or 1 (link)."),
            Self::NodeOutOfRange => None,
            Self::InvalidDamping => Some("Use a damping factor such as 0.85."),
            Self::InvalidTolerance => Some("Use a small positive tolerance such as 1e-6."),
            Self::InputParseError => Some("Check the input file format (JSON matrix or edge list)."),
            Self::ConfigParseError => Some("Fix syntax in .linkrank/config.toml and retry."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
