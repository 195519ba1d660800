// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Flow match predicates.
//!
//! A [`Match`] is one `key=value` clause of a flow entry's match (e.g. `dl_type=0x0800` or
//! `tp_src=80`).  This crate only implements what the action grammar needs to embed matches in
//! a learned flow: recognizing match keys, parsing one clause and rendering it back.

mod errors;
mod matches;
mod parse;

pub use errors::MatchError;
pub use matches::{Match, MatchKey};
pub use parse::{is_match_key, parse_match_clause};

use tracectl::{LevelFilter, trace_target};

trace_target!("flow-match", LevelFilter::INFO, &["flowctl"]);
