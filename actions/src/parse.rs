// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Dispatch of tokens to action parsers.

use crate::action::{Action, is_field_reference};
use crate::errors::{ActionError, SyntaxError, ValidationError};
use crate::learn::parse_learn;
use crate::tokenizer::tokenize;
use net::eth::mac::Mac;
use net::ipv4::parse_ipv4;
use net::num::{ParseUintError, Uint, parse_uint};
use std::fmt::Display;
use std::net::Ipv4Addr;
use std::str::FromStr;
use tracing::{debug, trace};

fn number<T: Uint>(action: &'static str, value: &str) -> Result<T, ValidationError> {
    parse_uint(value).map_err(|source| ValidationError::Number { action, source })
}

fn bare(token: &str) -> Option<Action> {
    const BARE: [(&str, Action); 6] = [
        ("drop", Action::Drop),
        ("flood", Action::Flood),
        ("in_port", Action::InPort),
        ("local", Action::Local),
        ("normal", Action::Normal),
        ("strip_vlan", Action::StripVlan),
    ];
    BARE.into_iter()
        .find(|(name, _)| token.eq_ignore_ascii_case(name))
        .map(|(_, action)| action)
}

// `NAME(ARGS)`, where NAME is an identifier
fn call(token: &str) -> Option<(&str, &str)> {
    let (name, rest) = token.split_once('(')?;
    let args = rest.strip_suffix(')')?;
    let is_ident = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_ident.then_some((name, args))
}

fn parse_resubmit_call(args: &str) -> Result<Action, ValidationError> {
    let Some((port, table)) = args.split_once(',') else {
        return Err(ValidationError::ResubmitArguments(args.to_string()));
    };
    if table.contains(',') {
        return Err(ValidationError::ResubmitArguments(args.to_string()));
    }
    let port = if port.is_empty() {
        0
    } else {
        number("resubmit", port)?
    };
    let table = if table.is_empty() {
        0
    } else {
        number("resubmit", table)?
    };
    if port == 0 && table == 0 {
        return Err(ValidationError::ResubmitTarget(args.to_string()));
    }
    Action::resubmit(port, table)
}

fn parse_conjunction(args: &str) -> Result<Action, ValidationError> {
    let malformed = || ValidationError::ConjunctionArguments(args.to_string());
    let (id, clause) = args.split_once(',').ok_or_else(malformed)?;
    let (clause, clauses) = clause.split_once('/').ok_or_else(malformed)?;
    Action::conjunction(
        number("conjunction", id)?,
        number("conjunction", clause)?,
        number("conjunction", clauses)?,
    )
}

fn parse_call(token: &str, name: &str, args: &str) -> Result<Action, ActionError> {
    match name {
        "ct" => Ok(Action::connection_tracking(args)?),
        "resubmit" => Ok(parse_resubmit_call(args)?),
        "conjunction" => Ok(parse_conjunction(args)?),
        "learn" => parse_learn(args),
        _ => Err(SyntaxError::UnknownAction(token.to_string()).into()),
    }
}

fn parse_output(value: &str) -> Result<Action, ValidationError> {
    match parse_uint(value) {
        Ok(port) => Ok(Action::Output(port)),
        Err(source @ ParseUintError::OutOfRange { .. }) => Err(ValidationError::Number {
            action: "output",
            source,
        }),
        Err(_) if is_field_reference(value) => Ok(Action::OutputField(value.to_string())),
        Err(_) => Err(ValidationError::OutputTarget(value.to_string())),
    }
}

// `SRC->DST`, both sides non-empty
fn arrow<'a>(token: &str, value: &'a str) -> Result<(&'a str, &'a str), SyntaxError> {
    match value.split_once("->") {
        Some((src, dst)) if !src.is_empty() && !dst.is_empty() => Ok((src, dst)),
        _ => Err(SyntaxError::MalformedFieldRef(token.to_string())),
    }
}

fn mac(action: &'static str, value: &str) -> Result<Mac, ValidationError> {
    Mac::from_str(value).map_err(|source| ValidationError::Mac { action, source })
}

fn ip(action: &'static str, value: &str) -> Result<Ipv4Addr, ValidationError> {
    parse_ipv4(value).map_err(|source| ValidationError::Address { action, source })
}

fn parse_colon(token: &str, name: &str, value: &str) -> Result<Action, ActionError> {
    let action = match name {
        "mod_dl_dst" => Action::ModDataLinkDestination(mac("mod_dl_dst", value)?),
        "mod_dl_src" => Action::ModDataLinkSource(mac("mod_dl_src", value)?),
        "mod_nw_dst" => Action::ModNetworkDestination(ip("mod_nw_dst", value)?),
        "mod_nw_src" => Action::ModNetworkSource(ip("mod_nw_src", value)?),
        "mod_tp_dst" => Action::ModTransportDestinationPort(number("mod_tp_dst", value)?),
        "mod_tp_src" => Action::ModTransportSourcePort(number("mod_tp_src", value)?),
        "mod_vlan_vid" => Action::ModVlanVid(number("mod_vlan_vid", value)?),
        "output" => parse_output(value)?,
        "resubmit" => Action::ResubmitPort(number("resubmit", value)?),
        "load" => {
            let (src, dst) = arrow(token, value)?;
            Action::load(src, dst)?
        }
        "move" => {
            let (src, dst) = arrow(token, value)?;
            Action::move_field(src, dst)?
        }
        "set_field" => {
            let (value, dst) = arrow(token, value)?;
            Action::set_field(value, dst)?
        }
        "set_tunnel" => Action::SetTunnel(number("set_tunnel", value)?),
        _ => return Err(SyntaxError::UnknownAction(token.to_string()).into()),
    };
    Ok(action)
}

/// Parse a single action token.
///
/// `token` must be one top-level token as returned by [`tokenize`]: it is used as is, without
/// any trimming.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the token is not a recognized action or does not tokenize to
/// itself, a [`ValidationError`] if its arguments are rejected, or a
/// [`LearnError`](crate::LearnError) for a bad `learn(...)`.
pub fn parse_action(token: &str) -> Result<Action, ActionError> {
    trace!("parsing action token '{token}'");
    match tokenize(token)?.as_slice() {
        [] => return Err(SyntaxError::UnknownAction(token.to_string()).into()),
        [single] if *single == token => {}
        _ => return Err(SyntaxError::NotSingleAction(token.to_string()).into()),
    }
    if let Some(action) = bare(token) {
        return Ok(action);
    }
    if let Some((name, args)) = call(token) {
        return parse_call(token, name, args);
    }
    if let Some((name, value)) = token.split_once(':') {
        return parse_colon(token, name, value);
    }
    Err(SyntaxError::UnknownAction(token.to_string()).into())
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action(s)
    }
}

/// The actions of a flow entry, in order, along with the tokens they were parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionList {
    actions: Vec<Action>,
    raw: Vec<String>,
}

impl ActionList {
    /// The parsed actions, in input order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The tokens the actions were parsed from, verbatim.
    #[must_use]
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Action>, Vec<String>) {
        (self.actions, self.raw)
    }
}

impl Display for ActionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, action) in self.actions.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{action}")?;
        }
        Ok(())
    }
}

/// Parse a comma separated list of actions.
///
/// Parsing stops at the first token which fails; no partial list is returned.
///
/// # Errors
///
/// Returns [`SyntaxError::EmptyActionList`] if `text` holds no tokens, a tokenizer error if
/// parentheses are unbalanced, or the error of the first token which fails to parse.
pub fn parse_action_list(text: &str) -> Result<ActionList, ActionError> {
    debug!("parsing action list '{text}'");
    let tokens = tokenize(text).inspect_err(|e| debug!("rejected action list: {e}"))?;
    if tokens.is_empty() {
        return Err(SyntaxError::EmptyActionList.into());
    }
    debug!("parsing {} action tokens", tokens.len());
    let actions = tokens
        .iter()
        .map(|token| parse_action(token))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| debug!("rejected action list: {e}"))?;
    Ok(ActionList {
        actions,
        raw: tokens.into_iter().map(str::to_string).collect(),
    })
}

impl FromStr for ActionList {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action_list(s)
    }
}
