// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The [`Action`] value type and its canonical text form.

use crate::errors::ValidationError;
use crate::learn::LearnedFlow;
use crate::tokenizer::tokenize;
use net::eth::mac::Mac;
use std::fmt::Display;
use std::net::Ipv4Addr;

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// One instruction of a flow entry's action list.
///
/// Each variant carries exactly what is needed to render it back to text.  Field references
/// (`NXM_OF_ETH_DST[]`, `reg0[0..15]`, `ct_mark`, ...) are kept as opaque text.
///
/// The variants are public so values can be matched on; building them through the validating
/// constructors (e.g. [`Action::resubmit`]) guarantees that [`Action::marshal`] succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// `drop`
    Drop,
    /// `flood`
    Flood,
    /// `in_port`
    InPort,
    /// `local`
    Local,
    /// `normal`
    Normal,
    /// `strip_vlan`
    StripVlan,
    /// `ct(ARGS)`, with the argument list kept verbatim
    ConnectionTracking(String),
    /// `mod_dl_dst:MAC`
    ModDataLinkDestination(Mac),
    /// `mod_dl_src:MAC`
    ModDataLinkSource(Mac),
    /// `mod_nw_dst:IPV4`
    ModNetworkDestination(Ipv4Addr),
    /// `mod_nw_src:IPV4`
    ModNetworkSource(Ipv4Addr),
    /// `mod_tp_dst:PORT`
    ModTransportDestinationPort(u16),
    /// `mod_tp_src:PORT`
    ModTransportSourcePort(u16),
    /// `mod_vlan_vid:VID`
    ModVlanVid(u16),
    /// `output:PORT`
    Output(u32),
    /// `output:FIELD[]`
    OutputField(String),
    /// `resubmit:PORT`
    ResubmitPort(u32),
    /// `resubmit(PORT,TABLE)`, where zero renders as an empty argument
    Resubmit { port: u32, table: u8 },
    /// `load:SRC->DST`
    Load { src: String, dst: String },
    /// `move:SRC->DST`
    Move { src: String, dst: String },
    /// `set_field:VALUE->DST`
    SetField { value: String, dst: String },
    /// `set_tunnel:0xID`
    SetTunnel(u64),
    /// `conjunction(ID,K/N)`
    Conjunction { id: u32, clause: u8, clauses: u8 },
    /// `learn(...)`
    Learn(Box<LearnedFlow>),
}

/// Returns true iff `value` is a field reference with a bit range: `NAME[]`, `NAME[N]` or
/// `NAME[N..M]`.
#[must_use]
pub fn is_field_reference(value: &str) -> bool {
    let Some((name, range)) = value
        .strip_suffix(']')
        .and_then(|value| value.rsplit_once('['))
    else {
        return false;
    };
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    let range_ok = match range.split_once("..") {
        Some((low, high)) => !low.is_empty() && !high.is_empty() && digits(low) && digits(high),
        None => digits(range),
    };
    let name_ok = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    name_ok && range_ok
}

// One top-level token of the list grammar, so rendering keeps the action in one piece
fn operand(action: &'static str, value: &str) -> Result<(), ValidationError> {
    match tokenize(value).as_deref() {
        Ok([single]) if *single == value => Ok(()),
        _ => Err(ValidationError::Delimiters {
            action,
            argument: value.to_string(),
        }),
    }
}

impl Action {
    /// The keyword of the action, as it appears in text.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Drop => "drop",
            Action::Flood => "flood",
            Action::InPort => "in_port",
            Action::Local => "local",
            Action::Normal => "normal",
            Action::StripVlan => "strip_vlan",
            Action::ConnectionTracking(_) => "ct",
            Action::ModDataLinkDestination(_) => "mod_dl_dst",
            Action::ModDataLinkSource(_) => "mod_dl_src",
            Action::ModNetworkDestination(_) => "mod_nw_dst",
            Action::ModNetworkSource(_) => "mod_nw_src",
            Action::ModTransportDestinationPort(_) => "mod_tp_dst",
            Action::ModTransportSourcePort(_) => "mod_tp_src",
            Action::ModVlanVid(_) => "mod_vlan_vid",
            Action::Output(_) | Action::OutputField(_) => "output",
            Action::ResubmitPort(_) | Action::Resubmit { .. } => "resubmit",
            Action::Load { .. } => "load",
            Action::Move { .. } => "move",
            Action::SetField { .. } => "set_field",
            Action::SetTunnel(_) => "set_tunnel",
            Action::Conjunction { .. } => "conjunction",
            Action::Learn(_) => "learn",
        }
    }

    fn checked(self) -> Result<Action, ValidationError> {
        self.validate()?;
        Ok(self)
    }

    /// Build a `ct(...)` action.
    ///
    /// # Errors
    ///
    /// The argument list must not be empty and its parentheses must balance.
    pub fn connection_tracking(args: impl Into<String>) -> Result<Action, ValidationError> {
        Action::ConnectionTracking(args.into()).checked()
    }

    /// Build a `resubmit(PORT,TABLE)` action.
    ///
    /// # Errors
    ///
    /// Port and table must not both be zero.
    pub fn resubmit(port: u32, table: u8) -> Result<Action, ValidationError> {
        Action::Resubmit { port, table }.checked()
    }

    /// Build an `output:FIELD` action.
    ///
    /// # Errors
    ///
    /// `field` must be a field reference (see [`is_field_reference`]).
    pub fn output_field(field: impl Into<String>) -> Result<Action, ValidationError> {
        Action::OutputField(field.into()).checked()
    }

    /// Build a `load:SRC->DST` action.
    ///
    /// # Errors
    ///
    /// Neither side may be empty, and each must be a single token of an action list.
    pub fn load(src: impl Into<String>, dst: impl Into<String>) -> Result<Action, ValidationError> {
        Action::Load {
            src: src.into(),
            dst: dst.into(),
        }
        .checked()
    }

    /// Build a `move:SRC->DST` action.
    ///
    /// # Errors
    ///
    /// Neither side may be empty, and each must be a single token of an action list.
    pub fn move_field(
        src: impl Into<String>,
        dst: impl Into<String>,
    ) -> Result<Action, ValidationError> {
        Action::Move {
            src: src.into(),
            dst: dst.into(),
        }
        .checked()
    }

    /// Build a `set_field:VALUE->DST` action.
    ///
    /// # Errors
    ///
    /// Neither side may be empty, and each must be a single token of an action list.
    pub fn set_field(
        value: impl Into<String>,
        dst: impl Into<String>,
    ) -> Result<Action, ValidationError> {
        Action::SetField {
            value: value.into(),
            dst: dst.into(),
        }
        .checked()
    }

    /// Build a `conjunction(ID,K/N)` action.
    ///
    /// # Errors
    ///
    /// `clause` and `clauses` must be positive and `clause` must not exceed `clauses`.
    pub fn conjunction(id: u32, clause: u8, clauses: u8) -> Result<Action, ValidationError> {
        Action::Conjunction {
            id,
            clause,
            clauses,
        }
        .checked()
    }

    /// Build a `learn(...)` action.
    #[must_use]
    pub fn learn(flow: LearnedFlow) -> Action {
        Action::Learn(Box::new(flow))
    }

    fn operands(&self, left: &str, right: &str) -> Result<(), ValidationError> {
        if left.is_empty() || right.is_empty() {
            return Err(ValidationError::EmptyArgument {
                action: self.name(),
                token: self.to_string(),
            });
        }
        operand(self.name(), left)?;
        operand(self.name(), right)
    }

    /// Check the invariants the validating constructors enforce.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] the matching constructor would have returned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Action::ConnectionTracking(args) if args.is_empty() => {
                Err(ValidationError::EmptyArgument {
                    action: "ct",
                    token: self.to_string(),
                })
            }
            // the arguments are a list of their own, only their parentheses must balance
            Action::ConnectionTracking(args) => match tokenize(args) {
                Ok(_) => Ok(()),
                Err(_) => Err(ValidationError::Delimiters {
                    action: "ct",
                    argument: args.clone(),
                }),
            },
            Action::OutputField(field) => {
                if is_field_reference(field) {
                    Ok(())
                } else {
                    Err(ValidationError::OutputTarget(field.clone()))
                }
            }
            Action::Resubmit { port: 0, table: 0 } => {
                Err(ValidationError::ResubmitTarget("0,0".to_string()))
            }
            Action::Load { src, dst } | Action::Move { src, dst } => self.operands(src, dst),
            Action::SetField { value, dst } => self.operands(value, dst),
            Action::Conjunction {
                clause, clauses, ..
            } if *clause == 0 || clause > clauses => Err(ValidationError::ConjunctionClause {
                clause: *clause,
                clauses: *clauses,
            }),
            Action::Learn(flow) => flow.validate(),
            _ => Ok(()),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Drop
            | Action::Flood
            | Action::InPort
            | Action::Local
            | Action::Normal
            | Action::StripVlan => write!(f, "{}", self.name()),
            Action::ConnectionTracking(args) => write!(f, "ct({args})"),
            Action::ModDataLinkDestination(mac) | Action::ModDataLinkSource(mac) => {
                write!(f, "{}:{mac}", self.name())
            }
            Action::ModNetworkDestination(ip) | Action::ModNetworkSource(ip) => {
                write!(f, "{}:{ip}", self.name())
            }
            Action::ModTransportDestinationPort(port) | Action::ModTransportSourcePort(port) => {
                write!(f, "{}:{port}", self.name())
            }
            Action::ModVlanVid(vid) => write!(f, "mod_vlan_vid:{vid}"),
            Action::Output(port) => write!(f, "output:{port}"),
            Action::OutputField(field) => write!(f, "output:{field}"),
            Action::ResubmitPort(port) => write!(f, "resubmit:{port}"),
            Action::Resubmit { port, table } => {
                f.write_str("resubmit(")?;
                if *port != 0 {
                    write!(f, "{port}")?;
                }
                f.write_str(",")?;
                if *table != 0 {
                    write!(f, "{table}")?;
                }
                f.write_str(")")
            }
            Action::Load { src, dst } | Action::Move { src, dst } => {
                write!(f, "{}:{src}->{dst}", self.name())
            }
            Action::SetField { value, dst } => write!(f, "set_field:{value}->{dst}"),
            Action::SetTunnel(id) => write!(f, "set_tunnel:{id:#x}"),
            Action::Conjunction {
                id,
                clause,
                clauses,
            } => write!(f, "conjunction({id},{clause}/{clauses})"),
            Action::Learn(flow) => write!(f, "{flow}"),
        }
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use super::Action;
    use bolero::{Driver, ValueGenerator};
    use net::eth::mac::Mac;
    use std::net::Ipv4Addr;
    use std::ops::Bound;

    const FIELDS: &[&str] = &[
        "NXM_OF_ETH_DST[]",
        "NXM_OF_IN_PORT[]",
        "NXM_NX_REG0[0..15]",
        "NXM_OF_VLAN_TCI[0..11]",
        "reg1[3]",
    ];
    const VALUES: &[&str] = &["0x2", "192.168.1.1", "1", "NXM_OF_ARP_SPA[]"];
    const CT_ARGS: &[&str] = &[
        "commit",
        "commit,zone=1",
        "table=0",
        "commit,exec(set_field:1->ct_label,set_field:1->ct_mark)",
    ];

    fn pick<D: Driver>(u: &mut D, from: &[&str]) -> Option<String> {
        let index = u.gen_usize(Bound::Included(&0), Bound::Excluded(&from.len()))?;
        Some(from[index].to_string())
    }

    /// Generate valid [`Action`]s other than `learn`, in the canonical form the parser produces.
    pub struct ActionGenerator;
    impl ValueGenerator for ActionGenerator {
        type Output = Action;

        fn generate<D: Driver>(&self, u: &mut D) -> Option<Self::Output> {
            let action = match u.gen_u8(Bound::Included(&0), Bound::Excluded(&23))? {
                0 => Action::Drop,
                1 => Action::Flood,
                2 => Action::InPort,
                3 => Action::Local,
                4 => Action::Normal,
                5 => Action::StripVlan,
                6 => Action::ConnectionTracking(pick(u, CT_ARGS)?),
                7 => Action::ModDataLinkDestination(u.produce::<Mac>()?),
                8 => Action::ModDataLinkSource(u.produce::<Mac>()?),
                9 => Action::ModNetworkDestination(Ipv4Addr::from(u.produce::<[u8; 4]>()?)),
                10 => Action::ModNetworkSource(Ipv4Addr::from(u.produce::<[u8; 4]>()?)),
                11 => Action::ModTransportDestinationPort(u.produce()?),
                12 => Action::ModTransportSourcePort(u.produce()?),
                13 => Action::ModVlanVid(u.produce()?),
                14 => Action::Output(u.produce()?),
                15 => Action::OutputField(pick(u, FIELDS)?),
                16 => Action::ResubmitPort(u.produce()?),
                17 => {
                    let port: u32 = u.produce()?;
                    let table: u8 = u.produce()?;
                    Action::Resubmit {
                        port,
                        table: if port == 0 && table == 0 { 1 } else { table },
                    }
                }
                18 => Action::Load {
                    src: pick(u, VALUES)?,
                    dst: pick(u, FIELDS)?,
                },
                19 => Action::Move {
                    src: pick(u, FIELDS)?,
                    dst: pick(u, FIELDS)?,
                },
                20 => Action::SetField {
                    value: pick(u, VALUES)?,
                    dst: pick(u, FIELDS)?,
                },
                21 => Action::SetTunnel(u.produce()?),
                _ => {
                    let clauses = u.gen_u8(Bound::Included(&1), Bound::Included(&u8::MAX))?;
                    let clause = u.gen_u8(Bound::Included(&1), Bound::Included(&clauses))?;
                    Action::Conjunction {
                        id: u.produce()?,
                        clause,
                        clauses,
                    }
                }
            };
            Some(action)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Action, is_field_reference};
    use crate::errors::ValidationError;
    use net::eth::mac::Mac;
    use std::net::Ipv4Addr;

    #[test]
    fn field_references() {
        for field in ["NXM_OF_IN_PORT[]", "reg0[0..15]", "NXM_NX_REG1[3]", "a[]"] {
            assert!(is_field_reference(field), "{field}");
        }
        for other in [
            "1", "foo", "[]", "reg0[", "reg0[0..]", "reg0[..1]", "reg0[a]", "", "a,b[]", "f(x)[]",
        ] {
            assert!(!is_field_reference(other), "{other}");
        }
    }

    #[test]
    fn render() {
        let cases = [
            (Action::StripVlan, "strip_vlan"),
            (
                Action::ModDataLinkDestination(Mac([0x00, 0x24, 0xfd, 0x4f, 0x0a, 0x26])),
                "mod_dl_dst:00:24:fd:4f:0a:26",
            ),
            (
                Action::ModNetworkSource(Ipv4Addr::new(172, 16, 222, 254)),
                "mod_nw_src:172.16.222.254",
            ),
            (Action::ModTransportDestinationPort(65535), "mod_tp_dst:65535"),
            (Action::Output(1), "output:1"),
            (Action::ResubmitPort(4), "resubmit:4"),
            (Action::Resubmit { port: 1, table: 0 }, "resubmit(1,)"),
            (Action::Resubmit { port: 0, table: 25 }, "resubmit(,25)"),
            (Action::Resubmit { port: 1, table: 2 }, "resubmit(1,2)"),
            (Action::SetTunnel(0xabc), "set_tunnel:0xabc"),
            (
                Action::Conjunction {
                    id: 123,
                    clause: 1,
                    clauses: 2,
                },
                "conjunction(123,1/2)",
            ),
        ];
        for (action, text) in cases {
            assert_eq!(action.to_string(), text);
        }
    }

    #[test]
    fn constructors_validate() {
        assert_eq!(
            Action::connection_tracking(""),
            Err(ValidationError::EmptyArgument {
                action: "ct",
                token: "ct()".to_string()
            })
        );
        assert_eq!(
            Action::resubmit(0, 0),
            Err(ValidationError::ResubmitTarget("0,0".to_string()))
        );
        assert_eq!(
            Action::conjunction(1, 3, 2),
            Err(ValidationError::ConjunctionClause {
                clause: 3,
                clauses: 2
            })
        );
        assert!(Action::conjunction(1, 0, 2).is_err());
        assert_eq!(
            Action::load("", "NXM_OF_ARP_OP[]"),
            Err(ValidationError::EmptyArgument {
                action: "load",
                token: "load:->NXM_OF_ARP_OP[]".to_string()
            })
        );
        assert!(Action::move_field("NXM_OF_ARP_SPA[]", "").is_err());
        assert!(Action::set_field("", "arp_spa").is_err());
        assert!(Action::output_field("foo").is_err());

        assert_eq!(
            Action::load("0x2", "NXM_OF_ARP_OP[]"),
            Ok(Action::Load {
                src: "0x2".to_string(),
                dst: "NXM_OF_ARP_OP[]".to_string()
            })
        );
        assert_eq!(
            Action::conjunction(123, 2, 2),
            Ok(Action::Conjunction {
                id: 123,
                clause: 2,
                clauses: 2
            })
        );
        assert!(Action::connection_tracking("commit,exec(set_field:1->ct_mark)").is_ok());
    }

    #[test]
    fn operands_stay_one_token() {
        assert_eq!(
            Action::load("a,drop", "reg0[]"),
            Err(ValidationError::Delimiters {
                action: "load",
                argument: "a,drop".to_string()
            })
        );
        assert_eq!(
            Action::connection_tracking("a),drop,ct(b"),
            Err(ValidationError::Delimiters {
                action: "ct",
                argument: "a),drop,ct(b".to_string()
            })
        );
        assert!(Action::connection_tracking("commit,exec(").is_err());
        assert!(Action::move_field("reg0[]", "reg1[])").is_err());
        assert!(Action::set_field("1,", "reg0[]").is_err());
        assert!(Action::output_field("a,b[]").is_err());
        assert!(
            Action::Load {
                src: "1".to_string(),
                dst: "reg0[],flood".to_string()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn validate_catches_hand_built_values() {
        assert!(Action::Resubmit { port: 0, table: 0 }.validate().is_err());
        assert!(Action::ConnectionTracking(String::new()).validate().is_err());
        assert!(
            Action::Conjunction {
                id: 1,
                clause: 5,
                clauses: 4
            }
            .validate()
            .is_err()
        );
        assert!(Action::OutputField("1".to_string()).validate().is_err());
        assert!(Action::Drop.validate().is_ok());
    }
}
