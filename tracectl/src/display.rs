// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Display implementations

use crate::control::{TargetCfg, TargetCfgDb};
use std::fmt::Display;

macro_rules! TARGET_FMT {
    () => {
        "{:>32} │ {:>8} │ {}"
    };
}

impl Display for TargetCfg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            format_args!(TARGET_FMT!(), self.target, self.level, self.tags.join(","))
        )
    }
}

impl Display for TargetCfgDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:─^64}", " tracing targets ")?;
        writeln!(
            f,
            "{}",
            format_args!(TARGET_FMT!(), "TARGET", "LEVEL", "TAGS")
        )?;
        for target in self.targets.values() {
            writeln!(f, "{target}")?;
        }
        write!(
            f,
            "{}",
            format_args!(TARGET_FMT!(), "(default)", self.level, "--")
        )
    }
}

pub(crate) struct TargetCfgDbByTag<'a>(pub(crate) &'a TargetCfgDb);
impl Display for TargetCfgDbByTag<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:─^64}", " tracing targets by tag ")?;
        let db = self.0;
        for tag in db.tags.values() {
            writeln!(f, " {}:", tag.tag)?;
            let targets = db
                .targets
                .values()
                .filter(|target| tag.targets.contains(target.target));
            for target in targets {
                writeln!(f, "      {:<32} : {}", target.target, target.level)?;
            }
        }
        Ok(())
    }
}
