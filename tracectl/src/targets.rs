// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Automated, static registry of tracing targets across all linked crates

use crate::LevelFilter;
use linkme::distributed_slice;

/// A tracing target as declared by [`trace_target!`].
pub struct StaticTarget {
    pub(crate) target: &'static str,
    pub(crate) name: &'static str,
    pub(crate) level: LevelFilter,
    pub(crate) tags: &'static [&'static str],
}
impl StaticTarget {
    #[must_use]
    pub const fn new(
        target: &'static str,
        name: &'static str,
        level: LevelFilter,
        tags: &'static [&'static str],
    ) -> Self {
        Self {
            target,
            name,
            level,
            tags,
        }
    }
}

#[distributed_slice]
pub static TRACING_TARGETS: [StaticTarget];

#[macro_export]
/// Declare the tracing target of the calling module, with a name, a default level and tags.
///
/// The target is the module path of the caller, so a declaration at a crate root covers every
/// module of that crate.  Callers must depend on `linkme`.
macro_rules! trace_target {
    // The const scope lets the macro be invoked several times in one crate: each expansion gets
    // its own `TRACE_TGT` static.
    ($name:expr, $level:expr, $tags:expr) => {
        const _: () = {
            use linkme::distributed_slice;
            use $crate::targets::{StaticTarget, TRACING_TARGETS};

            #[distributed_slice(TRACING_TARGETS)]
            static TRACE_TGT: StaticTarget =
                StaticTarget::new(module_path!(), $name, $level, $tags);
        };
    };
}
