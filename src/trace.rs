//! Hooks for watching the rewrite pipeline.
//!
//! The pipeline never logs on its own. Callers that want to see what happened
//! pass a [`PassObserver`]; [`Silent`] is used otherwise.

use std::collections::BTreeMap;
use std::fmt;

use crate::ast::Expression;

/// The rewrite passes, in the order the pipeline runs them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pass {
    ClauseFusion,
    Elaboration,
    GroupNesting,
    Reelaboration,
}

impl Pass {
    pub const ALL: [Pass; 4] = [
        Pass::ClauseFusion,
        Pass::Elaboration,
        Pass::GroupNesting,
        Pass::Reelaboration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pass::ClauseFusion => "clause-fusion",
            Pass::Elaboration => "elaboration",
            Pass::GroupNesting => "group-nesting",
            Pass::Reelaboration => "reelaboration",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait PassObserver {
    fn pass_started(&mut self, _pass: Pass) {}

    /// Called once for every successful application of a rewrite rule.
    fn rule_fired(&mut self, _rule: &'static str) {}

    fn pass_finished(&mut self, _pass: Pass, _expr: &Expression) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl PassObserver for Silent {}

/// Records a rendering of the tree after each pass and how often each rule
/// fired.
#[derive(Clone, Debug, Default)]
pub struct PassLog {
    pub snapshots: Vec<(Pass, String)>,
    pub rule_counts: BTreeMap<&'static str, usize>,
}

impl PassLog {
    pub fn new() -> Self {
        PassLog::default()
    }

    pub fn snapshot(&self, pass: Pass) -> Option<&str> {
        self.snapshots
            .iter()
            .find(|(p, _)| *p == pass)
            .map(|(_, text)| text.as_str())
    }

    pub fn count(&self, rule: &str) -> usize {
        self.rule_counts.get(rule).copied().unwrap_or(0)
    }
}

impl PassObserver for PassLog {
    fn rule_fired(&mut self, rule: &'static str) {
        *self.rule_counts.entry(rule).or_insert(0) += 1;
    }

    fn pass_finished(&mut self, pass: Pass, expr: &Expression) {
        self.snapshots.push((pass, expr.to_string()));
    }
}
