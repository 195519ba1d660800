// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)] // Validation logic should always be strictly safe
#![deny(missing_docs, clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Value types which appear as arguments in flow matches and flow actions.
//!
//! Everything in this crate is parsed from, and rendered back to, the textual form used by
//! switch flow tables (`de:ad:be:ef:00:01`, `0x0800`, `192.168.1.1`, ...).

pub mod addr_parse_error;
pub mod eth;
pub mod ipv4;
pub mod num;
