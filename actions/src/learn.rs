// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The body of a `learn(...)` action.
//!
//! A learn body is a comma separated list of clauses, each of which is either a scalar option
//! (`table=10`), the `delete_learned` flag, a match on the flow to install (`dl_type=0x0800`) or
//! an action of the flow to install (`output:NXM_OF_IN_PORT[]`).  Matches and actions keep the
//! order in which they were written.

use crate::action::Action;
use crate::errors::{ActionError, LearnError, ValidationError};
use crate::parse::parse_action;
use crate::tokenizer::tokenize;
use derive_builder::Builder;
use matches::{Match, is_match_key, parse_match_clause};
use net::num::{Uint, parse_uint};
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, trace};

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// The flow installed by a `learn(...)` action.
///
/// Values are built by parsing, or in code with [`LearnedFlowBuilder`]:
///
/// ```
/// # use flowctl_actions::{Action, LearnedFlowBuilder};
/// let flow = LearnedFlowBuilder::default()
///     .table(10)
///     .priority(100)
///     .add_action(Action::Output(1))
///     .build()
///     .unwrap();
/// assert_eq!(flow.to_string(), "learn(table=10,priority=100,output:1)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Builder)]
#[builder(default, build_fn(validate = "Self::reject_nested"))]
pub struct LearnedFlow {
    #[builder(setter(strip_option))]
    table: Option<u8>,
    #[builder(setter(strip_option))]
    priority: Option<u16>,
    #[builder(setter(strip_option))]
    in_port: Option<u32>,
    #[builder(setter(strip_option))]
    idle_timeout: Option<u16>,
    #[builder(setter(strip_option))]
    hard_timeout: Option<u16>,
    #[builder(setter(strip_option))]
    fin_idle_timeout: Option<u16>,
    #[builder(setter(strip_option))]
    fin_hard_timeout: Option<u16>,
    #[builder(setter(strip_option))]
    cookie: Option<u64>,
    #[builder(setter(strip_option))]
    limit: Option<u32>,
    delete_learned: bool,
    #[builder(setter(each(name = "add_match")))]
    matches: Vec<Match>,
    #[builder(setter(each(name = "add_action")))]
    actions: Vec<Action>,
}

impl LearnedFlowBuilder {
    fn reject_nested(&self) -> Result<(), String> {
        if self
            .actions
            .iter()
            .flatten()
            .any(|action| matches!(action, Action::Learn(_)))
        {
            return Err(ValidationError::NestedLearn.to_string());
        }
        Ok(())
    }
}

impl LearnedFlow {
    #[must_use]
    pub fn table(&self) -> Option<u8> {
        self.table
    }
    #[must_use]
    pub fn priority(&self) -> Option<u16> {
        self.priority
    }
    #[must_use]
    pub fn in_port(&self) -> Option<u32> {
        self.in_port
    }
    #[must_use]
    pub fn idle_timeout(&self) -> Option<u16> {
        self.idle_timeout
    }
    #[must_use]
    pub fn hard_timeout(&self) -> Option<u16> {
        self.hard_timeout
    }
    #[must_use]
    pub fn fin_idle_timeout(&self) -> Option<u16> {
        self.fin_idle_timeout
    }
    #[must_use]
    pub fn fin_hard_timeout(&self) -> Option<u16> {
        self.fin_hard_timeout
    }
    #[must_use]
    pub fn cookie(&self) -> Option<u64> {
        self.cookie
    }
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }
    #[must_use]
    pub fn delete_learned(&self) -> bool {
        self.delete_learned
    }
    /// The matches of the learned flow, in clause order.
    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }
    /// The actions of the learned flow, in clause order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Check that the learned actions are valid and contain no nested `learn`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NestedLearn`] or the first error of an embedded action.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for action in &self.actions {
            if let Action::Learn(_) = action {
                return Err(ValidationError::NestedLearn);
            }
            action.validate()?;
        }
        Ok(())
    }
}

/// The scalar `key=value` options of a learn body
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum LearnOption {
    Table,
    Priority,
    InPort,
    IdleTimeout,
    HardTimeout,
    FinIdleTimeout,
    FinHardTimeout,
    Cookie,
    Limit,
}

fn option_value<T: Uint>(option: LearnOption, value: &str) -> Result<T, LearnError> {
    parse_uint(value).map_err(|source| LearnError::Option {
        key: <&str>::from(option).to_string(),
        source,
    })
}

impl LearnedFlow {
    fn set_option(&mut self, option: LearnOption, value: &str) -> Result<(), LearnError> {
        match option {
            LearnOption::Table => self.table = Some(option_value(option, value)?),
            LearnOption::Priority => self.priority = Some(option_value(option, value)?),
            LearnOption::InPort => self.in_port = Some(option_value(option, value)?),
            LearnOption::IdleTimeout => self.idle_timeout = Some(option_value(option, value)?),
            LearnOption::HardTimeout => self.hard_timeout = Some(option_value(option, value)?),
            LearnOption::FinIdleTimeout => {
                self.fin_idle_timeout = Some(option_value(option, value)?);
            }
            LearnOption::FinHardTimeout => {
                self.fin_hard_timeout = Some(option_value(option, value)?);
            }
            LearnOption::Cookie => self.cookie = Some(option_value(option, value)?),
            LearnOption::Limit => self.limit = Some(option_value(option, value)?),
        }
        Ok(())
    }

    fn add_clause(&mut self, clause: &str) -> Result<(), LearnError> {
        if clause == "delete_learned" {
            self.delete_learned = true;
            return Ok(());
        }
        if let Some((key, value)) = clause.split_once('=') {
            if let Ok(option) = LearnOption::from_str(key) {
                return self.set_option(option, value);
            }
            if is_match_key(key) {
                let m = parse_match_clause(key, value).map_err(|source| LearnError::Match {
                    clause: clause.to_string(),
                    source,
                })?;
                self.matches.push(m);
                return Ok(());
            }
        }
        if clause.starts_with("learn(") {
            return Err(LearnError::Nested(clause.to_string()));
        }
        let action = parse_action(clause).map_err(|source| LearnError::Clause {
            clause: clause.to_string(),
            source: Box::new(source),
        })?;
        self.actions.push(action);
        Ok(())
    }
}

/// Parse the argument string of a `learn(...)` action.
///
/// # Errors
///
/// Returns a [`LearnError`] naming the first clause which is neither an option, a match nor an
/// action.
pub fn parse_learn(args: &str) -> Result<Action, ActionError> {
    let clauses = tokenize(args).map_err(LearnError::from)?;
    let mut flow = LearnedFlow::default();
    for clause in clauses {
        trace!("learn clause '{clause}'");
        flow.add_clause(clause)?;
    }
    debug!(
        "learned flow with {} matches and {} actions",
        flow.matches.len(),
        flow.actions.len()
    );
    Ok(Action::learn(flow))
}

impl Display for LearnedFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut clauses: Vec<String> = Vec::new();
        let scalars = [
            ("table", self.table.map(u64::from)),
            ("priority", self.priority.map(u64::from)),
            ("in_port", self.in_port.map(u64::from)),
            ("idle_timeout", self.idle_timeout.map(u64::from)),
            ("hard_timeout", self.hard_timeout.map(u64::from)),
            ("fin_idle_timeout", self.fin_idle_timeout.map(u64::from)),
            ("fin_hard_timeout", self.fin_hard_timeout.map(u64::from)),
        ];
        for (key, value) in scalars {
            if let Some(value) = value {
                clauses.push(format!("{key}={value}"));
            }
        }
        if let Some(cookie) = self.cookie {
            clauses.push(format!("cookie={cookie:#x}"));
        }
        if let Some(limit) = self.limit {
            clauses.push(format!("limit={limit}"));
        }
        if self.delete_learned {
            clauses.push("delete_learned".to_string());
        }
        clauses.extend(self.matches.iter().map(ToString::to_string));
        clauses.extend(self.actions.iter().map(ToString::to_string));
        write!(f, "learn({})", clauses.join(","))
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use super::LearnedFlow;
    use crate::action::{Action, ActionGenerator};
    use bolero::{Driver, ValueGenerator};
    use matches::Match;
    use net::eth::ethtype::EthType;
    use net::eth::mac::Mac;
    use std::ops::Bound;

    /// Generate `learn(...)` actions with any set of options, up to three layer 2 matches and up
    /// to three actions from [`ActionGenerator`].
    pub struct LearnGenerator;
    impl ValueGenerator for LearnGenerator {
        type Output = Action;

        fn generate<D: Driver>(&self, u: &mut D) -> Option<Self::Output> {
            let mut flow = LearnedFlow {
                table: u.produce()?,
                priority: u.produce()?,
                in_port: u.produce()?,
                idle_timeout: u.produce()?,
                hard_timeout: u.produce()?,
                fin_idle_timeout: u.produce()?,
                fin_hard_timeout: u.produce()?,
                cookie: u.produce()?,
                limit: u.produce()?,
                delete_learned: u.produce()?,
                ..LearnedFlow::default()
            };
            for _ in 0..u.gen_u8(Bound::Included(&0), Bound::Included(&3))? {
                let m = match u.gen_u8(Bound::Included(&0), Bound::Excluded(&3))? {
                    0 => Match::DataLinkSource(u.produce::<Mac>()?),
                    1 => Match::DataLinkDestination(u.produce::<Mac>()?),
                    _ => Match::DataLinkType(u.produce::<EthType>()?),
                };
                flow.matches.push(m);
            }
            for _ in 0..u.gen_u8(Bound::Included(&0), Bound::Included(&3))? {
                flow.actions.push(ActionGenerator.generate(u)?);
            }
            Some(Action::learn(flow))
        }
    }
}
