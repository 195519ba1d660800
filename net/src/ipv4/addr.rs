// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! IPv4 address parsing.

use crate::addr_parse_error::AddrParseError;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Parse a dotted-quad [`Ipv4Addr`].
///
/// # Errors
///
/// Returns [`AddrParseError::Ipv6NotAllowed`] if the text is a valid IPv6 address, and
/// [`AddrParseError::StdAddrParseError`] if it is not an address at all.
pub fn parse_ipv4(value: &str) -> Result<Ipv4Addr, AddrParseError> {
    match IpAddr::from_str(value) {
        Ok(IpAddr::V4(ip)) => Ok(ip),
        Ok(IpAddr::V6(ip)) => Err(AddrParseError::Ipv6NotAllowed(ip)),
        Err(source) => Err(AddrParseError::StdAddrParseError {
            value: value.to_string(),
            source,
        }),
    }
}
