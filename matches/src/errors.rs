// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Errors which may occur while parsing a match clause.

use crate::matches::MatchKey;
use net::addr_parse_error::AddrParseError;
use net::eth::mac::MacFromStringError;
use net::num::ParseUintError;
use thiserror::Error;

/// The reasons a `key=value` match clause may be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("unrecognized match key '{0}'")]
    UnknownKey(String),
    #[error("match clause '{0}' is not of the form key=value")]
    NotKeyValue(String),
    #[error("bad value for {key}: {source}")]
    Number {
        key: MatchKey,
        #[source]
        source: ParseUintError,
    },
    #[error("bad value for {key}: {source}")]
    Mac {
        key: MatchKey,
        #[source]
        source: MacFromStringError,
    },
    #[error("bad value for {key}: {source}")]
    Address {
        key: MatchKey,
        #[source]
        source: AddrParseError,
    },
    #[error("bad value for {key}: invalid prefix '{value}'")]
    Prefix { key: MatchKey, value: String },
}
