// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The [`Match`] value type and its canonical text form.

use ipnet::Ipv4Net;
use net::eth::ethtype::EthType;
use net::eth::mac::Mac;
use std::fmt::Display;

/// The keys this crate recognizes on the left hand side of a `key=value` match clause.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::IntoStaticStr,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum MatchKey {
    InPort,
    DlSrc,
    DlDst,
    DlType,
    DlVlan,
    NwSrc,
    NwDst,
    NwProto,
    NwTos,
    TpSrc,
    TpDst,
    IcmpType,
    IcmpCode,
    ArpOp,
    TunId,
}

/// A single match predicate of a flow entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Match {
    /// `in_port=N`
    InPort(u32),
    /// `dl_src=MAC`
    DataLinkSource(Mac),
    /// `dl_dst=MAC`
    DataLinkDestination(Mac),
    /// `dl_type=0xNNNN`
    DataLinkType(EthType),
    /// `dl_vlan=N`
    DataLinkVlan(u16),
    /// `nw_src=ADDR` or `nw_src=ADDR/LEN`
    NetworkSource(Ipv4Net),
    /// `nw_dst=ADDR` or `nw_dst=ADDR/LEN`
    NetworkDestination(Ipv4Net),
    /// `nw_proto=N`
    NetworkProtocol(u8),
    /// `nw_tos=N`
    NetworkTos(u8),
    /// `tp_src=N`
    TransportSourcePort(u16),
    /// `tp_src=0xPORT/0xMASK`
    TransportSourceMaskedPort(u16, u16),
    /// `tp_dst=N`
    TransportDestinationPort(u16),
    /// `tp_dst=0xPORT/0xMASK`
    TransportDestinationMaskedPort(u16, u16),
    /// `icmp_type=N`
    IcmpType(u8),
    /// `icmp_code=N`
    IcmpCode(u8),
    /// `arp_op=N`
    ArpOperation(u16),
    /// `tun_id=0xN`
    TunnelId(u64),
}

impl Match {
    /// The key this match renders with.
    #[must_use]
    pub fn key(&self) -> MatchKey {
        match self {
            Match::InPort(_) => MatchKey::InPort,
            Match::DataLinkSource(_) => MatchKey::DlSrc,
            Match::DataLinkDestination(_) => MatchKey::DlDst,
            Match::DataLinkType(_) => MatchKey::DlType,
            Match::DataLinkVlan(_) => MatchKey::DlVlan,
            Match::NetworkSource(_) => MatchKey::NwSrc,
            Match::NetworkDestination(_) => MatchKey::NwDst,
            Match::NetworkProtocol(_) => MatchKey::NwProto,
            Match::NetworkTos(_) => MatchKey::NwTos,
            Match::TransportSourcePort(_) | Match::TransportSourceMaskedPort(..) => MatchKey::TpSrc,
            Match::TransportDestinationPort(_) | Match::TransportDestinationMaskedPort(..) => {
                MatchKey::TpDst
            }
            Match::IcmpType(_) => MatchKey::IcmpType,
            Match::IcmpCode(_) => MatchKey::IcmpCode,
            Match::ArpOperation(_) => MatchKey::ArpOp,
            Match::TunnelId(_) => MatchKey::TunId,
        }
    }
}

// host routes render without their prefix length
fn fmt_net(f: &mut std::fmt::Formatter<'_>, net: &Ipv4Net) -> std::fmt::Result {
    if net.prefix_len() == net.max_prefix_len() {
        write!(f, "{}", net.addr())
    } else {
        write!(f, "{net}")
    }
}

impl Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=", self.key())?;
        match self {
            Match::InPort(port) => write!(f, "{port}"),
            Match::DataLinkSource(mac) | Match::DataLinkDestination(mac) => write!(f, "{mac}"),
            Match::DataLinkType(eth_type) => write!(f, "{eth_type}"),
            Match::DataLinkVlan(vid) => write!(f, "{vid}"),
            Match::NetworkSource(net) | Match::NetworkDestination(net) => fmt_net(f, net),
            Match::NetworkProtocol(v)
            | Match::NetworkTos(v)
            | Match::IcmpType(v)
            | Match::IcmpCode(v) => write!(f, "{v}"),
            Match::TransportSourcePort(port) | Match::TransportDestinationPort(port) => {
                write!(f, "{port}")
            }
            Match::TransportSourceMaskedPort(port, mask)
            | Match::TransportDestinationMaskedPort(port, mask) => {
                write!(f, "0x{port:04x}/0x{mask:04x}")
            }
            Match::ArpOperation(op) => write!(f, "{op}"),
            Match::TunnelId(id) => write!(f, "{id:#x}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Match, MatchKey};
    use ipnet::Ipv4Net;
    use net::eth::ethtype::EthType;
    use net::eth::mac::Mac;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    #[test]
    fn keys_are_snake_case() {
        assert_eq!(MatchKey::DlType.to_string(), "dl_type");
        assert_eq!(MatchKey::from_str("nw_proto").unwrap(), MatchKey::NwProto);
        assert_eq!(MatchKey::from_str("icmp_code").unwrap(), MatchKey::IcmpCode);
        assert!(MatchKey::from_str("DL_TYPE").is_err());
        assert!(MatchKey::from_str("table").is_err());
    }

    #[test]
    fn render() {
        let cases = [
            (Match::DataLinkType(EthType::IPV4), "dl_type=0x0800"),
            (Match::NetworkProtocol(6), "nw_proto=6"),
            (Match::TransportSourcePort(80), "tp_src=80"),
            (
                Match::TransportDestinationMaskedPort(0x50, 0xfff0),
                "tp_dst=0x0050/0xfff0",
            ),
            (
                Match::DataLinkSource(Mac([0xde, 0xad, 0xbe, 0xef, 0, 1])),
                "dl_src=de:ad:be:ef:00:01",
            ),
            (
                Match::NetworkSource(Ipv4Net::from(Ipv4Addr::new(10, 0, 0, 1))),
                "nw_src=10.0.0.1",
            ),
            (
                Match::NetworkDestination(Ipv4Net::new(Ipv4Addr::new(10, 0, 0, 0), 8).unwrap()),
                "nw_dst=10.0.0.0/8",
            ),
            (Match::TunnelId(0xbeef), "tun_id=0xbeef"),
            (Match::InPort(3), "in_port=3"),
        ];
        for (m, text) in cases {
            assert_eq!(m.to_string(), text);
        }
    }
}
