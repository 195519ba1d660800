// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Errors which may occur when parsing a network address.

use std::net::Ipv6Addr;

/// An error which may occur when parsing a network address.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddrParseError {
    /// An IPv6 address was parsed where only IPv4 is allowed
    #[error("IPv6 address not allowed: {0}")]
    Ipv6NotAllowed(Ipv6Addr),
    /// An error occurred in the `std::net` parser while parsing an address
    #[error("invalid address '{value}': {source}")]
    StdAddrParseError {
        /// The text which failed to parse
        value: String,
        /// The underlying parser error
        source: std::net::AddrParseError,
    },
}
