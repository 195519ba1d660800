// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Normalization of action lists to their canonical text form.

use actions::{ActionError, marshal_action_list, parse_action_list};
use std::io::Write;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("action list is {len} bytes long, more than the maximum of {max}")]
    TooLong { len: usize, max: usize },
    #[error("'{input}': {source}")]
    Action {
        input: String,
        #[source]
        source: ActionError,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Settings which apply to every action list processed
#[derive(Debug, Clone, Copy)]
pub struct Processor {
    pub max_input_len: usize,
    pub tokens: bool,
}

impl Processor {
    /// Parse `input` and write its canonical form to `out`, followed by its tokens if requested.
    ///
    /// # Errors
    ///
    /// Fails if `input` is too long or is not a valid action list, or if `out` fails.
    pub fn process(&self, input: &str, out: &mut impl Write) -> Result<(), ProcessError> {
        if input.len() > self.max_input_len {
            return Err(ProcessError::TooLong {
                len: input.len(),
                max: self.max_input_len,
            });
        }
        let action_error = |source| ProcessError::Action {
            input: input.to_string(),
            source,
        };
        let list = parse_action_list(input).map_err(action_error)?;
        let canonical = marshal_action_list(list.actions())
            .map_err(|e| action_error(ActionError::from(e)))?;
        debug!("'{input}' -> '{canonical}'");
        writeln!(out, "{canonical}")?;
        if self.tokens {
            for token in list.raw() {
                writeln!(out, "  {token}")?;
            }
        }
        Ok(())
    }

    /// Process every input in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first input which fails.
    pub fn process_all<'a>(
        &self,
        inputs: impl IntoIterator<Item = &'a str>,
        out: &mut impl Write,
    ) -> Result<usize, ProcessError> {
        let mut count = 0;
        for input in inputs {
            self.process(input, out)?;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod test {
    use super::{ProcessError, Processor};
    use actions::ErrorKind;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    const PROCESSOR: Processor = Processor {
        max_input_len: 64,
        tokens: false,
    };

    fn output(processor: Processor, inputs: &[&str]) -> (Result<usize, ProcessError>, String) {
        let mut out = Vec::new();
        let result = processor.process_all(inputs.iter().copied(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    #[traced_test]
    fn canonical_output() {
        let (result, out) = output(PROCESSOR, &["NORMAL", "strip_vlan,resubmit(0,1)"]);
        assert_eq!(result.unwrap(), 2);
        assert_eq!(out, "normal\nstrip_vlan,resubmit(,1)\n");
        assert!(logs_contain("'NORMAL' -> 'normal'"));
    }

    #[test]
    fn tokens_output() {
        let processor = Processor {
            tokens: true,
            ..PROCESSOR
        };
        let (result, out) = output(processor, &["drop,ct(commit,zone=1)"]);
        assert_eq!(result.unwrap(), 1);
        assert_eq!(out, "drop,ct(commit,zone=1)\n  drop\n  ct(commit,zone=1)\n");
    }

    #[test]
    fn stops_at_first_failure() {
        let (result, out) = output(PROCESSOR, &["drop", "mod_tp_dst:65536", "flood"]);
        assert_eq!(out, "drop\n");
        let Err(ProcessError::Action { input, source }) = result else {
            panic!("unexpected {result:?}");
        };
        assert_eq!(input, "mod_tp_dst:65536");
        assert_eq!(source.kind(), ErrorKind::Validation);
    }

    #[test]
    fn input_length_guard() {
        let long = format!("drop{}", ",drop".repeat(20));
        let (result, out) = output(PROCESSOR, &[&long]);
        assert!(out.is_empty());
        assert!(matches!(
            result,
            Err(ProcessError::TooLong { len: 104, max: 64 })
        ));
    }
}
