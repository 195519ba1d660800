// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Rendering of actions to their canonical text form.
//!
//! [`Display`](std::fmt::Display) renders any value; the functions here also check that the
//! value obeys the invariants of its action, so that their output always parses back.

use crate::action::Action;
use crate::errors::MarshalError;
use tracing::trace;

impl Action {
    /// Render the action to its canonical text form.
    ///
    /// # Errors
    ///
    /// Returns a [`MarshalError`] if the action breaks one of the invariants its validating
    /// constructor enforces.
    pub fn marshal(&self) -> Result<String, MarshalError> {
        self.validate().map_err(|source| MarshalError {
            action: self.name(),
            source,
        })?;
        Ok(self.to_string())
    }
}

/// Render each action to its canonical text form.
///
/// # Errors
///
/// Fails on the first action which cannot be marshaled.
pub fn marshal_actions(actions: &[Action]) -> Result<Vec<String>, MarshalError> {
    trace!("marshaling {} actions", actions.len());
    actions.iter().map(Action::marshal).collect()
}

/// Render a sequence of actions as one comma separated action list.
///
/// # Errors
///
/// Fails on the first action which cannot be marshaled.
pub fn marshal_action_list(actions: &[Action]) -> Result<String, MarshalError> {
    Ok(marshal_actions(actions)?.join(","))
}

#[cfg(test)]
mod test {
    use super::{marshal_action_list, marshal_actions};
    use crate::action::{Action, ActionGenerator};
    use crate::errors::{MarshalError, ValidationError};
    use crate::learn::LearnGenerator;
    use crate::parse::{parse_action, parse_action_list};

    #[test]
    fn marshal_checks_invariants() {
        assert_eq!(
            Action::Resubmit { port: 0, table: 0 }.marshal(),
            Err(MarshalError {
                action: "resubmit",
                source: ValidationError::ResubmitTarget("0,0".to_string())
            })
        );
        assert_eq!(
            Action::Conjunction {
                id: 7,
                clause: 0,
                clauses: 2
            }
            .marshal(),
            Err(MarshalError {
                action: "conjunction",
                source: ValidationError::ConjunctionClause {
                    clause: 0,
                    clauses: 2
                }
            })
        );
        assert_eq!(Action::Flood.marshal().unwrap(), "flood");
    }

    #[test]
    fn marshal_keeps_one_action_per_token() {
        let split = Action::ConnectionTracking("a),drop,ct(b".to_string());
        assert_eq!(
            split.marshal(),
            Err(MarshalError {
                action: "ct",
                source: ValidationError::Delimiters {
                    action: "ct",
                    argument: "a),drop,ct(b".to_string()
                }
            })
        );
        let load = Action::Load {
            src: "a,drop".to_string(),
            dst: "reg0[]".to_string(),
        };
        assert!(marshal_action_list(&[Action::Flood, load]).is_err());
        assert!(Action::OutputField("a,b[]".to_string()).marshal().is_err());
    }

    #[test]
    fn marshal_list() {
        let actions = [
            Action::StripVlan,
            Action::resubmit(0, 1).unwrap(),
            Action::Output(2),
        ];
        assert_eq!(
            marshal_actions(&actions).unwrap(),
            ["strip_vlan", "resubmit(,1)", "output:2"]
        );
        assert_eq!(
            marshal_action_list(&actions).unwrap(),
            "strip_vlan,resubmit(,1),output:2"
        );
        assert!(
            marshal_action_list(&[Action::Drop, Action::ConnectionTracking(String::new())])
                .is_err()
        );
        assert_eq!(marshal_action_list(&[]).unwrap(), "");
    }

    #[test]
    fn generated_actions_round_trip() {
        bolero::check!()
            .with_generator(ActionGenerator)
            .for_each(|action: &Action| {
                let text = action.marshal().unwrap();
                assert_eq!(parse_action(&text).unwrap(), *action, "{text}");
            });
    }

    #[test]
    fn generated_lists_round_trip() {
        bolero::check!()
            .with_generator((ActionGenerator, ActionGenerator, ActionGenerator))
            .for_each(|(a, b, c): &(Action, Action, Action)| {
                let actions = [a.clone(), b.clone(), c.clone()];
                let text = marshal_action_list(&actions).unwrap();
                let list = parse_action_list(&text).unwrap();
                assert_eq!(list.actions(), actions);
                assert_eq!(list.to_string(), text);
            });
    }

    #[test]
    fn generated_learns_round_trip() {
        bolero::check!()
            .with_generator(LearnGenerator)
            .for_each(|learn: &Action| {
                let text = learn.marshal().unwrap();
                assert_eq!(parse_action(&text).unwrap(), *learn, "{text}");
            });
    }

    #[test]
    fn generated_lists_with_learn_round_trip() {
        bolero::check!()
            .with_generator((ActionGenerator, LearnGenerator, ActionGenerator))
            .for_each(|(a, learn, b): &(Action, Action, Action)| {
                let actions = [a.clone(), learn.clone(), b.clone()];
                let text = marshal_action_list(&actions).unwrap();
                assert_eq!(parse_action_list(&text).unwrap().actions(), actions);
            });
    }
}
