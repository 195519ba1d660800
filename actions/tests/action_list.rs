// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use flowctl_actions as actions;

use actions::{
    Action, ActionError, ErrorKind, LearnError, SyntaxError, ValidationError, marshal_actions,
    parse_action, parse_action_list, tokenize,
};
use matches::Match;
use net::eth::ethtype::EthType;
use net::eth::mac::Mac;
use pretty_assertions::assert_eq;
use std::net::Ipv4Addr;

const LEARN: &str = "learn(table=10,priority=10000,in_port=1,dl_type=0x0800,nw_proto=6,tp_src=80,\
                     load:NXM_OF_ETH_DST[]->NXM_OF_ETH_SRC[],\
                     load:NXM_OF_ETH_SRC[]->NXM_OF_ETH_DST[],\
                     load:NXM_OF_IP_DST[]->NXM_OF_IP_SRC[],\
                     load:NXM_OF_TCP_DST[]->NXM_OF_TCP_SRC[],\
                     output:NXM_OF_IN_PORT[])";

fn load(src: &str, dst: &str) -> Action {
    Action::Load {
        src: src.to_string(),
        dst: dst.to_string(),
    }
}

#[test]
fn tokenizer_keeps_nested_parentheses() {
    assert_eq!(
        tokenize("strip_vlan,resubmit(,1)").unwrap(),
        ["strip_vlan", "resubmit(,1)"]
    );
    let tokens = tokenize(
        "strip_vlan,resubmit(,1),ct(commit,exec(set_field:1->ct_label,set_field:1->ct_mark))",
    )
    .unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(
        tokens[2],
        "ct(commit,exec(set_field:1->ct_label,set_field:1->ct_mark))"
    );
}

#[test]
fn unclosed_list_fails() {
    let err = parse_action_list("strip_vlan,resubmit(").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(matches!(
        err,
        ActionError::Syntax(SyntaxError::UnclosedOpen { depth: 1, .. })
    ));
}

#[test]
fn learn_flow() {
    let Action::Learn(flow) = parse_action(LEARN).unwrap() else {
        panic!("not a learn action");
    };
    assert_eq!(flow.table(), Some(10));
    assert_eq!(flow.priority(), Some(10000));
    assert_eq!(flow.in_port(), Some(1));
    assert_eq!(
        flow.matches(),
        [
            Match::DataLinkType(EthType::IPV4),
            Match::NetworkProtocol(6),
            Match::TransportSourcePort(80),
        ]
    );
    assert_eq!(
        flow.actions(),
        [
            load("NXM_OF_ETH_DST[]", "NXM_OF_ETH_SRC[]"),
            load("NXM_OF_ETH_SRC[]", "NXM_OF_ETH_DST[]"),
            load("NXM_OF_IP_DST[]", "NXM_OF_IP_SRC[]"),
            load("NXM_OF_TCP_DST[]", "NXM_OF_TCP_SRC[]"),
            Action::OutputField("NXM_OF_IN_PORT[]".to_string()),
        ]
    );
    assert_eq!(Action::Learn(flow).marshal().unwrap(), LEARN);
}

#[test]
fn list_with_learn() {
    let text = format!(
        "{LEARN},mod_dl_dst:00:24:fd:4f:0a:26,mod_nw_dst:172.16.222.254,mod_tp_dst:80,output:1"
    );
    let list = parse_action_list(&text).unwrap();
    assert_eq!(
        list.raw(),
        [
            LEARN,
            "mod_dl_dst:00:24:fd:4f:0a:26",
            "mod_nw_dst:172.16.222.254",
            "mod_tp_dst:80",
            "output:1",
        ]
    );
    assert_eq!(
        list.actions()[1..],
        [
            Action::ModDataLinkDestination(Mac([0x00, 0x24, 0xfd, 0x4f, 0x0a, 0x26])),
            Action::ModNetworkDestination(Ipv4Addr::new(172, 16, 222, 254)),
            Action::ModTransportDestinationPort(80),
            Action::Output(1),
        ]
    );
    assert_eq!(marshal_actions(list.actions()).unwrap(), list.raw());
    assert_eq!(list.to_string(), text);
}

#[test]
fn first_error_wins() {
    let err = parse_action_list("drop,mod_tp_dst:65536,foo").unwrap_err();
    assert!(matches!(
        err,
        ActionError::Validation(ValidationError::Number {
            action: "mod_tp_dst",
            ..
        })
    ));
}

#[test]
fn learn_body_errors() {
    let err = parse_action("learn(table=10,bogus)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Learn);
    assert!(matches!(
        err,
        ActionError::Learn(LearnError::Clause { ref clause, .. }) if clause == "bogus"
    ));
    let err = parse_action("learn(table=1,learn(table=2,drop))").unwrap_err();
    assert_eq!(
        err,
        ActionError::Learn(LearnError::Nested("learn(table=2,drop)".to_string()))
    );
    let err = parse_action("learn(in_port=x)").unwrap_err();
    assert!(err.to_string().contains("in_port"), "{err}");
}
