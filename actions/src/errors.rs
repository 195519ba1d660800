// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Errors of the action grammar.
//!
//! Parsing fails with one of three classes of error: a [`SyntaxError`] when the text is not an
//! action at all, a [`ValidationError`] when a recognized action has a bad argument, and a
//! [`LearnError`] when a clause of a `learn(...)` body is rejected.  Rendering fails only with a
//! [`MarshalError`], for values built in code which break an invariant.

use matches::MatchError;
use net::addr_parse_error::AddrParseError;
use net::eth::mac::MacFromStringError;
use net::num::ParseUintError;
use thiserror::Error;

/// The text is not a well-formed action or action list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unmatched ')' at offset {offset} in '{input}'")]
    UnmatchedClose { input: String, offset: usize },
    #[error("{depth} unclosed '(' in '{input}'")]
    UnclosedOpen { input: String, depth: usize },
    #[error("empty action list")]
    EmptyActionList,
    #[error("unrecognized action '{0}'")]
    UnknownAction(String),
    #[error("malformed field reference '{0}': expected SRC->DST")]
    MalformedFieldRef(String),
    #[error("'{0}' is not a single action")]
    NotSingleAction(String),
}

/// A recognized action whose arguments fail a format or range check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{action}: empty argument in '{token}'")]
    EmptyArgument { action: &'static str, token: String },
    #[error("{action}: '{argument}' has a top-level ',' or unbalanced parentheses")]
    Delimiters {
        action: &'static str,
        argument: String,
    },
    #[error("{action}: {source}")]
    Mac {
        action: &'static str,
        #[source]
        source: MacFromStringError,
    },
    #[error("{action}: {source}")]
    Address {
        action: &'static str,
        #[source]
        source: AddrParseError,
    },
    #[error("{action}: {source}")]
    Number {
        action: &'static str,
        #[source]
        source: ParseUintError,
    },
    #[error("output: '{0}' is neither a port number nor a field reference")]
    OutputTarget(String),
    #[error("resubmit: expected (PORT,TABLE), got '({0})'")]
    ResubmitArguments(String),
    #[error("resubmit: port and table must not both be empty, got '({0})'")]
    ResubmitTarget(String),
    #[error("conjunction: expected (ID,K/N), got '({0})'")]
    ConjunctionArguments(String),
    #[error("conjunction: clause {clause}/{clauses} is out of range")]
    ConjunctionClause { clause: u8, clauses: u8 },
    #[error("learn: nested learn actions are not supported")]
    NestedLearn,
}

/// A clause of a `learn(...)` body which is neither an option, a match nor an action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LearnError {
    #[error("learn: {0}")]
    Body(#[from] SyntaxError),
    #[error("learn: invalid value for {key}: {source}")]
    Option {
        key: String,
        #[source]
        source: ParseUintError,
    },
    #[error("learn: bad match clause '{clause}': {source}")]
    Match {
        clause: String,
        #[source]
        source: MatchError,
    },
    #[error("learn: bad clause '{clause}': {source}")]
    Clause {
        clause: String,
        #[source]
        source: Box<ActionError>,
    },
    #[error("learn: nested learn actions are not supported: '{0}'")]
    Nested(String),
}

/// A value which cannot be rendered because it breaks an invariant of its action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot marshal {action}: {source}")]
pub struct MarshalError {
    pub action: &'static str,
    #[source]
    pub source: ValidationError,
}

/// Any error of this crate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Learn(#[from] LearnError),
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

/// The class of an [`ActionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Syntax,
    Validation,
    Learn,
    Marshal,
}

impl ActionError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::Syntax(_) => ErrorKind::Syntax,
            ActionError::Validation(_) => ErrorKind::Validation,
            ActionError::Learn(_) => ErrorKind::Learn,
            ActionError::Marshal(_) => ErrorKind::Marshal,
        }
    }
}
