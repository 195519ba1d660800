// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![deny(clippy::all, clippy::pedantic)]
#![deny(rustdoc::all)]
#![allow(rustdoc::missing_crate_level_docs)]

mod process;

use crate::process::Processor;

use args::{CmdArgs, InputSource, Parser, read_action_lines};
use tracectl::{get_trace_ctl, trace_target};
use tracing::{debug, error, level_filters::LevelFilter};

trace_target!("flowctl", LevelFilter::WARN, &["flowctl"]);
fn init_logging() {
    let tctl = get_trace_ctl();
    tctl.set_default_level(LevelFilter::WARN);
}

fn main() {
    /* parse cmd line args */
    let args = CmdArgs::parse();

    /* initialize logging */
    init_logging();
    if let Some(tracing) = args.tracing()
        && let Err(e) = get_trace_ctl().setup_from_string(tracing)
    {
        eprintln!("Invalid tracing configuration: {e}");
        std::process::exit(2);
    }
    if args.show_tracing_tags() {
        get_trace_ctl().dump_targets_by_tag();
        std::process::exit(0);
    }
    if args.show_tracing_targets() {
        get_trace_ctl().dump();
        std::process::exit(0);
    }
    if args.tracing_config_generate() {
        println!("{}", get_trace_ctl().as_config_string());
        std::process::exit(0);
    }

    let lines;
    let inputs: Vec<&str> = match args.input() {
        InputSource::Args(actions) => actions.iter().map(String::as_str).collect(),
        InputSource::Stdin => {
            lines = match read_action_lines(std::io::stdin().lock()) {
                Ok(lines) => lines,
                Err(e) => {
                    error!("Failed to read standard input: {e}");
                    std::process::exit(1);
                }
            };
            lines.iter().map(String::as_str).collect()
        }
    };

    let processor = Processor {
        max_input_len: args.max_input_len(),
        tokens: args.tokens(),
    };
    match processor.process_all(inputs, &mut std::io::stdout().lock()) {
        Ok(count) => debug!("normalized {count} action lists"),
        Err(e) => {
            eprintln!("flowctl: {e}");
            std::process::exit(1);
        }
    }
}
