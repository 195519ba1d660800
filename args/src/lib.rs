// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

pub use clap::Parser;
use std::io::BufRead;
use tracing::debug;

/// Default bound on the length of one action list, in bytes
pub const DEFAULT_MAX_INPUT_LEN: u32 = 65536;

/// Where the action lists to process come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource<'a> {
    /// Action lists given on the command line
    Args(&'a [String]),
    /// One action list per line of standard input
    Stdin,
}

#[derive(Parser, Debug)]
#[command(name = "flowctl")]
#[command(version)]
#[command(
    about = "Parse switch flow action lists and print them in canonical form",
    long_about = None
)]
#[allow(clippy::struct_excessive_bools)]
pub struct CmdArgs {
    #[arg(
        value_name = "ACTIONS",
        help = "Action lists to parse, e.g. 'strip_vlan,resubmit(,1)'. Read from stdin, one per line, if none is given"
    )]
    actions: Vec<String>,

    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_INPUT_LEN,
        value_parser = clap::value_parser!(u32).range(1..=1_048_576),
        help = "Reject action lists longer than this many bytes"
    )]
    max_input_len: u32,

    #[arg(
        long,
        default_value_t = false,
        help = "Also print the top-level tokens of each action list"
    )]
    tokens: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Show the available tracing tags and exit"
    )]
    show_tracing_tags: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Show configurable tracing targets and exit"
    )]
    show_tracing_targets: bool,

    #[arg(long, help = "generate tracing configuration as a string and exit")]
    tracing_config_generate: bool,

    #[arg(
        long,
        value_name = "tracing configuration",
        help = "Tracing config string as comma-separated sequence of tag=level, with level one in [off,error,warn,info,debug,trace].
Passing default=level sets the default log-level.
Passing all=level allows setting the log-level of all targets to level.
E.g. default=error,flowctl=debug will set the default target to error, but enable debug for the targets tagged flowctl"
    )]
    tracing: Option<String>,
}

impl CmdArgs {
    pub fn input(&self) -> InputSource<'_> {
        if self.actions.is_empty() {
            InputSource::Stdin
        } else {
            InputSource::Args(&self.actions)
        }
    }

    pub fn max_input_len(&self) -> usize {
        // lossless: bounded by the value parser
        self.max_input_len as usize
    }
    pub fn tokens(&self) -> bool {
        self.tokens
    }

    pub fn show_tracing_tags(&self) -> bool {
        self.show_tracing_tags
    }
    pub fn show_tracing_targets(&self) -> bool {
        self.show_tracing_targets
    }
    pub fn tracing_config_generate(&self) -> bool {
        self.tracing_config_generate
    }
    pub fn tracing(&self) -> Option<&String> {
        self.tracing.as_ref()
    }
}

/// Read the action lists of `reader`, one per line, skipping blank lines.
///
/// Lines are trimmed of surrounding whitespace, since action lists never start or end with
/// blanks.
///
/// # Errors
///
/// Fails if `reader` cannot be read.
pub fn read_action_lines(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    debug!("read {} action lists", lines.len());
    Ok(lines)
}
