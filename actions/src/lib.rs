// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::module_name_repetitions)]

//! The action language of switch flow entries.
//!
//! A flow entry's actions are written as a comma separated list such as
//!
//! ```text
//! strip_vlan,mod_dl_dst:00:24:fd:4f:0a:26,resubmit(,1),learn(table=10,dl_type=0x0800,output:NXM_OF_IN_PORT[])
//! ```
//!
//! This crate turns such text into typed [`Action`] values and back:
//!
//! * [`tokenize`] splits a list on the commas which are not nested inside parentheses,
//! * [`parse_action`] turns one token into an [`Action`], recursing into `learn(...)` bodies,
//! * [`marshal_actions`] and [`marshal_action_list`] render actions to canonical text.
//!
//! ```
//! # use flowctl_actions::{Action, parse_action_list};
//! let list = parse_action_list("strip_vlan,resubmit(,1),NORMAL").unwrap();
//! assert_eq!(list.actions()[2], Action::Normal);
//! assert_eq!(list.to_string(), "strip_vlan,resubmit(,1),normal");
//! ```

mod action;
mod errors;
mod learn;
mod marshal;
mod parse;
mod tokenizer;

#[cfg(any(test, feature = "bolero"))]
pub use action::ActionGenerator;
#[cfg(any(test, feature = "bolero"))]
pub use learn::LearnGenerator;
pub use action::{Action, is_field_reference};
pub use errors::{
    ActionError, ErrorKind, LearnError, MarshalError, SyntaxError, ValidationError,
};
pub use learn::{LearnedFlow, LearnedFlowBuilder, LearnedFlowBuilderError, parse_learn};
pub use marshal::{marshal_action_list, marshal_actions};
pub use parse::{ActionList, parse_action, parse_action_list};
pub use tokenizer::tokenize;

use tracectl::{LevelFilter, trace_target};

trace_target!("flow-actions", LevelFilter::INFO, &["flowctl"]);
