// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Tracing runtime control.

use ordermap::OrderMap;
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
#[allow(unused)]
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, Registry, filter::LevelFilter, prelude::*, reload};

use crate::{display::TargetCfgDbByTag, targets::TRACING_TARGETS, trace_target};

trace_target!("tracectl", LevelFilter::INFO, &[]);

/// Errors in a tracing configuration string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceCtlError {
    #[error("invalid tracing config item '{0}': it should be tag=loglevel")]
    Syntax(String),
    #[error("invalid level '{level}' for '{tag}'")]
    Level { tag: String, level: String },
}

/// The configuration of one tracing target
#[derive(Debug, Clone)]
pub struct TargetCfg {
    pub(crate) target: &'static str,
    pub(crate) name: &'static str,
    pub(crate) level: LevelFilter,
    pub(crate) tags: Vec<&'static str>,
}
impl TargetCfg {
    fn new(
        target: &'static str,
        name: &'static str,
        level: LevelFilter,
        tags: &'static [&'static str],
    ) -> Self {
        // a target can always be addressed by its name
        let mut tags = tags.to_vec();
        if !tags.contains(&name) {
            tags.push(name);
        }
        Self {
            target,
            name,
            level,
            tags,
        }
    }
}

/// A tag and the targets which carry it
#[derive(Debug, Clone)]
pub struct Tag {
    pub(crate) tag: &'static str,
    pub(crate) targets: HashSet<&'static str>,
}
impl Tag {
    fn new(tag: &'static str, target: &'static str) -> Self {
        let mut targets = HashSet::with_capacity(1);
        targets.insert(target);
        Self { tag, targets }
    }
}

#[derive(Debug)]
pub(crate) struct TargetCfgDb {
    pub(crate) level: LevelFilter,
    pub(crate) targets: OrderMap<&'static str, TargetCfg>,
    pub(crate) tags: OrderMap<&'static str, Tag>,
}

impl TargetCfgDb {
    fn new(level: LevelFilter) -> Self {
        let mut db = Self {
            level,
            targets: OrderMap::new(),
            tags: OrderMap::new(),
        };
        for target in TRACING_TARGETS {
            db.register(target.target, target.name, target.level, target.tags);
        }
        db
    }
    fn register(
        &mut self,
        target: &'static str,
        name: &'static str,
        level: LevelFilter,
        tags: &'static [&'static str],
    ) {
        let tconfig = TargetCfg::new(target, name, level, tags);
        let tags = tconfig.tags.clone();

        if let Some(exist) = self.targets.insert(target, tconfig) {
            warn!("Target {} has been multiply defined!", exist.target);
        }
        for tag in &tags {
            if let Some(tag) = self.tags.get_mut(tag) {
                tag.targets.insert(target);
            } else {
                self.tags.insert(tag, Tag::new(tag, target));
            }
        }
    }
    fn env_filter(&self) -> EnvFilter {
        let mut f = EnvFilter::new(self.level.to_string());
        for target in self.targets.values() {
            match format!("{}={}", target.target, target.level).parse() {
                Ok(directive) => f = f.add_directive(directive),
                Err(e) => warn!("Skipping target {}: {e}", target.target),
            }
        }
        f
    }
    /// A config string which reproduces the current levels, one item per target.
    pub(crate) fn as_config_string(&self) -> String {
        let mut out = format!("default={}", self.level);
        for target in self.targets.values() {
            out += format!(",{}={}", target.name, target.level).as_str();
        }
        out
    }
    fn tag_targets_mut(&mut self, tag: &str) -> Vec<&mut TargetCfg> {
        match self.tags.get(tag) {
            Some(tag) => self
                .targets
                .values_mut()
                .filter(|target| tag.targets.contains(target.target))
                .collect(),
            None => vec![],
        }
    }
}

/// Owner of the global subscriber and of the per-target levels
#[derive(Debug)]
pub struct TracingControl {
    db: Mutex<TargetCfgDb>,
    reload_filter: reload::Handle<EnvFilter, Registry>,
}

static TRACING_CTL: OnceLock<TracingControl> = OnceLock::new();

/// Get a reference to the static [`TracingControl`], initializing it if needed
pub fn get_trace_ctl() -> &'static TracingControl {
    TRACING_CTL.get_or_init(TracingControl::new)
}

impl TracingControl {
    fn new() -> Self {
        let db = TargetCfgDb::new(LevelFilter::INFO);
        let (filter, reload_filter) = reload::Layer::new(db.env_filter());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_line_number(true)
            .with_target(true)
            .with_thread_names(false)
            .with_level(true);

        if let Err(e) = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
        {
            // levels are still tracked but have no effect on someone else's subscriber
            eprintln!("tracing subscriber already installed: {e}");
        }

        Self {
            db: Mutex::new(db),
            reload_filter,
        }
    }
    fn db(&self) -> MutexGuard<'_, TargetCfgDb> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn reload(&self, filter: EnvFilter) {
        if let Err(e) = self.reload_filter.reload(filter) {
            error!("Failed to reload tracing filter: {e}");
        }
    }

    pub fn init() {
        get_trace_ctl();
    }
    pub fn set_tag_level(&self, tag: &str, level: LevelFilter) {
        let mut db = self.db();
        let mut changed = 0;
        for target in db.tag_targets_mut(tag) {
            if target.level != level {
                target.level = level;
                changed += 1;
            }
        }
        if changed > 0 {
            self.reload(db.env_filter());
        }
        debug!("Changed log level for tag '{tag}' to {level}. Targets changed: {changed}");
    }
    pub fn set_level_all(&self, level: LevelFilter) {
        let mut db = self.db();
        for target in db.targets.values_mut() {
            target.level = level;
        }
        self.reload(db.env_filter());
    }
    pub fn set_default_level(&self, level: LevelFilter) {
        let mut db = self.db();
        if db.level != level {
            db.level = level;
            self.reload(db.env_filter());
        }
    }
    #[must_use]
    pub fn get_default_level(&self) -> LevelFilter {
        self.db().level
    }

    /// Parse a string made of comma-separated tag=level, where level=off,error,warn,info,debug,trace
    fn parse_tracing_config(input: &str) -> Result<OrderMap<String, LevelFilter>, TraceCtlError> {
        let mut result = OrderMap::new();
        for item in input.split(',') {
            let item = item.trim();
            let (tag, level) = item
                .split_once('=')
                .ok_or_else(|| TraceCtlError::Syntax(item.to_string()))?;
            let level =
                LevelFilter::from_str(level.trim()).map_err(|_| TraceCtlError::Level {
                    tag: tag.trim().to_string(),
                    level: level.trim().to_string(),
                })?;
            result.insert(tag.trim().to_string(), level);
        }
        Ok(result)
    }

    /// Apply a tracing configuration string.
    ///
    /// `default=level` sets the default level, `all=level` sets every registered target, and
    /// any other `tag=level` sets the targets carrying that tag.  Items apply in that order, so
    /// `default=error,all=info,flow-actions=debug` leaves the action parser at debug.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if an item is not `tag=level` or names an unknown level.
    pub fn setup_from_string(&self, input: &str) -> Result<(), TraceCtlError> {
        let config = Self::parse_tracing_config(input)?;
        if let Some(level) = config.get("default") {
            self.set_default_level(*level);
        }
        if let Some(level) = config.get("all") {
            self.set_level_all(*level);
        }
        for (tag, level) in &config {
            self.set_tag_level(tag, *level);
        }
        Ok(())
    }

    pub fn get_tags(&self) -> impl Iterator<Item = Tag> {
        self.db().tags.clone().into_values()
    }
    pub fn get_target(&self, target: &str) -> Option<TargetCfg> {
        self.db().targets.get(target).cloned()
    }
    pub fn get_targets_by_tag(&self, tag: &str) -> impl Iterator<Item = TargetCfg> {
        let mut db = self.db();
        db.tag_targets_mut(tag)
            .into_iter()
            .map(|x| x.clone())
            .collect::<Vec<_>>()
            .into_iter()
    }
    pub fn dump_targets_by_tag(&self) {
        let db = self.db();
        println!("{}", TargetCfgDbByTag(&db));
    }
    pub fn dump(&self) {
        let db = self.db();
        println!("{db}");
    }
    #[must_use]
    pub fn as_config_string(&self) -> String {
        self.db().as_config_string()
    }
}
