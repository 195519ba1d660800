// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Parsing of `key=value` match clauses.

use crate::errors::MatchError;
use crate::matches::{Match, MatchKey};
use ipnet::Ipv4Net;
use net::eth::ethtype::EthType;
use net::eth::mac::Mac;
use net::ipv4::parse_ipv4;
use net::num::{Uint, parse_uint};
use std::str::FromStr;
use tracing::trace;

/// Returns true iff `key` is a match key known to this crate.
#[must_use]
pub fn is_match_key(key: &str) -> bool {
    MatchKey::from_str(key).is_ok()
}

fn number<T: Uint>(key: MatchKey, value: &str) -> Result<T, MatchError> {
    parse_uint(value).map_err(|source| MatchError::Number { key, source })
}

fn mac(key: MatchKey, value: &str) -> Result<Mac, MatchError> {
    Mac::from_str(value).map_err(|source| MatchError::Mac { key, source })
}

fn network(key: MatchKey, value: &str) -> Result<Ipv4Net, MatchError> {
    if value.contains('/') {
        Ipv4Net::from_str(value).map_err(|_| MatchError::Prefix {
            key,
            value: value.to_string(),
        })
    } else {
        parse_ipv4(value)
            .map(Ipv4Net::from)
            .map_err(|source| MatchError::Address { key, source })
    }
}

// `port` or `port/mask`
fn port(key: MatchKey, value: &str) -> Result<(u16, Option<u16>), MatchError> {
    match value.split_once('/') {
        Some((port, mask)) => Ok((number(key, port)?, Some(number(key, mask)?))),
        None => Ok((number(key, value)?, None)),
    }
}

/// Parse the value of a match clause whose key is `key`.
///
/// # Errors
///
/// Returns [`MatchError::UnknownKey`] if `key` is not a match key, or a value error if `value`
/// does not fit the key.
pub fn parse_match_clause(key: &str, value: &str) -> Result<Match, MatchError> {
    let key = MatchKey::from_str(key).map_err(|_| MatchError::UnknownKey(key.to_string()))?;
    trace!("match clause {key}={value}");
    let parsed = match key {
        MatchKey::InPort => Match::InPort(number(key, value)?),
        MatchKey::DlSrc => Match::DataLinkSource(mac(key, value)?),
        MatchKey::DlDst => Match::DataLinkDestination(mac(key, value)?),
        MatchKey::DlType => Match::DataLinkType(EthType::new(number(key, value)?)),
        MatchKey::DlVlan => Match::DataLinkVlan(number(key, value)?),
        MatchKey::NwSrc => Match::NetworkSource(network(key, value)?),
        MatchKey::NwDst => Match::NetworkDestination(network(key, value)?),
        MatchKey::NwProto => Match::NetworkProtocol(number(key, value)?),
        MatchKey::NwTos => Match::NetworkTos(number(key, value)?),
        MatchKey::TpSrc => match port(key, value)? {
            (port, None) => Match::TransportSourcePort(port),
            (port, Some(mask)) => Match::TransportSourceMaskedPort(port, mask),
        },
        MatchKey::TpDst => match port(key, value)? {
            (port, None) => Match::TransportDestinationPort(port),
            (port, Some(mask)) => Match::TransportDestinationMaskedPort(port, mask),
        },
        MatchKey::IcmpType => Match::IcmpType(number(key, value)?),
        MatchKey::IcmpCode => Match::IcmpCode(number(key, value)?),
        MatchKey::ArpOp => Match::ArpOperation(number(key, value)?),
        MatchKey::TunId => Match::TunnelId(number(key, value)?),
    };
    Ok(parsed)
}

impl FromStr for Match {
    type Err = MatchError;

    fn from_str(clause: &str) -> Result<Self, Self::Err> {
        let (key, value) = clause
            .split_once('=')
            .ok_or_else(|| MatchError::NotKeyValue(clause.to_string()))?;
        parse_match_clause(key, value)
    }
}
