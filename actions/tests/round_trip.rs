// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use flowctl_actions as actions;

use actions::{Action, ErrorKind, parse_action};
use pretty_assertions::assert_eq;

// canonical tokens render back byte for byte
const CANONICAL: &[&str] = &[
    "drop",
    "flood",
    "in_port",
    "local",
    "normal",
    "strip_vlan",
    "ct(commit)",
    "ct(commit,exec(set_field:1->ct_label,set_field:1->ct_mark))",
    "mod_dl_dst:de:ad:be:ef:de:ad",
    "mod_dl_src:de:ad:be:ef:de:ad",
    "mod_nw_dst:192.168.1.1",
    "mod_nw_src:192.168.1.1",
    "mod_tp_dst:65535",
    "mod_tp_src:65535",
    "mod_vlan_vid:10",
    "output:1",
    "output:NXM_NX_REG0[0..15]",
    "resubmit:4",
    "resubmit(1,)",
    "resubmit(,2)",
    "resubmit(1,2)",
    "resubmit(,25)",
    "load:0x2->NXM_OF_ARP_OP[]",
    "move:NXM_OF_ARP_SPA[]->NXM_OF_ARP_TPA[]",
    "set_field:192.168.1.1->arp_spa",
    "set_tunnel:0x2a",
    "conjunction(123,1/2)",
    "conjunction(123,2/2)",
    "learn(table=1,hard_timeout=60,cookie=0xbeef,delete_learned,nw_dst=10.0.0.0/8,drop)",
];

// (accepted input, canonical output)
const NORMALIZED: &[(&str, &str)] = &[
    ("LOCAL", "local"),
    ("NORMAL", "normal"),
    ("Drop", "drop"),
    ("mod_dl_dst:DE:AD:BE:EF:DE:AD", "mod_dl_dst:de:ad:be:ef:de:ad"),
    ("mod_tp_dst:0x50", "mod_tp_dst:80"),
    ("set_tunnel:42", "set_tunnel:0x2a"),
    ("resubmit(0,3)", "resubmit(,3)"),
    ("learn(dl_type=2048,table=3)", "learn(table=3,dl_type=0x0800)"),
];

const INVALID: &[(&str, ErrorKind)] = &[
    ("foo", ErrorKind::Syntax),
    ("ct(a),drop,ct(b)", ErrorKind::Syntax),
    ("ct(a))", ErrorKind::Syntax),
    ("drop,", ErrorKind::Syntax),
    ("conjunxxxxx(123,3/2)", ErrorKind::Syntax),
    ("load:->NXM_OF_ARP_OP[]", ErrorKind::Syntax),
    ("load:0x2->", ErrorKind::Syntax),
    ("move:->NXM_OF_ARP_OP[]", ErrorKind::Syntax),
    ("move:NXM_OF_ARP_SPA[]->", ErrorKind::Syntax),
    ("set_field:->arp_spa", ErrorKind::Syntax),
    ("set_field:192.168.1.1->", ErrorKind::Syntax),
    ("ct()", ErrorKind::Validation),
    ("mod_dl_dst:foo", ErrorKind::Validation),
    ("mod_nw_dst:foo", ErrorKind::Validation),
    ("mod_nw_dst:2001:db8::1", ErrorKind::Validation),
    ("mod_nw_src:2001:db8::1", ErrorKind::Validation),
    ("mod_tp_dst:foo", ErrorKind::Validation),
    ("mod_tp_dst:-1", ErrorKind::Validation),
    ("mod_tp_dst:65536", ErrorKind::Validation),
    ("mod_tp_src:65536", ErrorKind::Validation),
    ("mod_vlan_vid:foo", ErrorKind::Validation),
    ("output:foo", ErrorKind::Validation),
    ("resubmit(foo,)", ErrorKind::Validation),
    ("resubmit(,bar)", ErrorKind::Validation),
    ("resubmit(foo,bar)", ErrorKind::Validation),
    ("conjunction(123,3/2)", ErrorKind::Validation),
    ("learn(table=300)", ErrorKind::Learn),
];

#[test]
fn canonical_tokens_round_trip() {
    for token in CANONICAL {
        let action = parse_action(token).unwrap();
        assert_eq!(action.marshal().unwrap(), *token);
    }
}

#[test]
fn accepted_tokens_normalize() {
    for (token, canonical) in NORMALIZED {
        let action = parse_action(token).unwrap();
        let text = action.marshal().unwrap();
        assert_eq!(text, *canonical, "{token}");
        assert_eq!(parse_action(&text).unwrap(), action, "{token}");
    }
}

#[test]
fn invalid_tokens() {
    for (token, kind) in INVALID {
        let err = parse_action(token).unwrap_err();
        assert_eq!(err.kind(), *kind, "{token}: {err}");
    }
}

#[test]
fn from_str() {
    let action: Action = "resubmit:4".parse().unwrap();
    assert_eq!(action, Action::ResubmitPort(4));
    let list: actions::ActionList = "drop,NORMAL".parse().unwrap();
    assert_eq!(list.to_string(), "drop,normal");
}
