//! Headsign merge resolution.
//!
//! Trips of one route and direction often publish slightly different
//! destinations ("Bridge Term" on most trips, "Scotia Sq" on short turns).
//! A route+direction needs a single headsign, so each route carries curated
//! rules naming which variants collapse to which label. Variants no rule
//! covers are an error: silently picking one would show riders the wrong
//! destination.

mod error;
mod rules;

use std::collections::{BTreeSet, HashMap};

use tracing::trace;

use crate::domain::{Headsign, RouteId};
use crate::text::canonicalize;

pub use error::MergeError;
pub use rules::halifax_merge_rules;

/// One curated merge: any set of `inputs` resolves to `output`.
///
/// The output is always one of the inputs, so merging a merged headsign with
/// another variant of the same rule stays inside the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    /// Route this rule applies to
    pub route_id: RouteId,
    /// Optional name for the ambiguity, shown in diagnostics
    pub sub_key: Option<String>,
    /// Canonical labels accepted as inputs, including the output
    pub inputs: BTreeSet<String>,
    /// Canonical label the inputs resolve to
    pub output: String,
}

impl MergeRule {
    /// Creates a rule. Inputs and output are canonicalized, and the output is
    /// added to the inputs.
    pub fn new<I, S>(route_id: RouteId, inputs: I, output: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let output = canonicalize(output);
        let mut inputs: BTreeSet<String> = inputs
            .into_iter()
            .map(|s| canonicalize(s.as_ref()))
            .collect();
        inputs.insert(output.clone());
        Self {
            route_id,
            sub_key: None,
            inputs,
            output,
        }
    }

    /// Builder-style setter for the sub-key.
    pub fn with_sub_key(mut self, sub_key: impl Into<String>) -> Self {
        self.sub_key = Some(sub_key.into());
        self
    }

    /// Returns true if both labels are inputs of this rule.
    pub fn covers(&self, first: &str, second: &str) -> bool {
        self.inputs.contains(first) && self.inputs.contains(second)
    }

    fn describe(&self) -> String {
        match &self.sub_key {
            Some(key) => format!("{key} -> {}", self.output),
            None => self.output.clone(),
        }
    }
}

/// Merge rules grouped by route.
#[derive(Debug, Clone, Default)]
pub struct MergeTable {
    rules: HashMap<RouteId, Vec<MergeRule>>,
}

impl MergeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules registered for a route.
    pub fn rules_for(&self, route_id: RouteId) -> &[MergeRule] {
        self.rules.get(&route_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over every rule, in no particular order.
    pub fn rules(&self) -> impl Iterator<Item = &MergeRule> {
        self.rules.values().flatten()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve two headsigns of one route+direction to a single headsign.
    ///
    /// Identical headsigns resolve to themselves. Two text headsigns resolve
    /// to the output of the route's rule covering both. A cardinal headsign
    /// only merges with itself.
    ///
    /// ```
    /// use schedule_normalizer::domain::{Headsign, RouteId};
    /// use schedule_normalizer::merge::MergeTableBuilder;
    ///
    /// let table = MergeTableBuilder::new()
    ///     .rule(1, &["Bridge Term", "Scotia Sq"], "Bridge Term")
    ///     .build()
    ///     .unwrap();
    ///
    /// let merged = table
    ///     .resolve_merge(RouteId(1), &Headsign::text("Scotia Sq"), &Headsign::text("Bridge Term"))
    ///     .unwrap();
    /// assert_eq!(merged, Headsign::text("Bridge Term"));
    ///
    /// assert!(table
    ///     .resolve_merge(RouteId(2), &Headsign::text("Scotia Sq"), &Headsign::text("Bridge Term"))
    ///     .is_err());
    /// ```
    pub fn resolve_merge(
        &self,
        route_id: RouteId,
        first: &Headsign,
        second: &Headsign,
    ) -> Result<Headsign, MergeError> {
        if first == second {
            return Ok(first.clone());
        }
        let unexpected = || MergeError::UnexpectedMerge {
            route_id,
            first: first.clone(),
            second: second.clone(),
        };
        let (Some(a), Some(b)) = (first.as_text(), second.as_text()) else {
            return Err(unexpected());
        };
        let rule = self
            .rules_for(route_id)
            .iter()
            .find(|rule| rule.covers(a, b))
            .ok_or_else(unexpected)?;

        trace!(%route_id, first = a, second = b, rule = %rule.describe(), "merged headsigns");
        Ok(Headsign::text(rule.output.clone()))
    }

    /// Resolve every headsign variant of one route+direction to one headsign.
    ///
    /// Duplicates are skipped. Two or more distinct variants resolve to the
    /// output of the one rule whose inputs include all of them; a pair of
    /// rules chained through a shared input never combines. Returns `None`
    /// when there are no variants. Neither the result nor the error depends
    /// on the order of `variants`.
    pub fn resolve_variants<'a, I>(
        &self,
        route_id: RouteId,
        variants: I,
    ) -> Result<Option<Headsign>, MergeError>
    where
        I: IntoIterator<Item = &'a Headsign>,
    {
        let mut distinct: Vec<&Headsign> = Vec::new();
        for variant in variants {
            if !distinct.contains(&variant) {
                distinct.push(variant);
            }
        }
        distinct.sort_by_cached_key(|headsign| headsign.to_string());

        match distinct.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some((*only).clone())),
            [first, second] => self.resolve_merge(route_id, first, second).map(Some),
            [first, .., last] => {
                let labels: Option<Vec<&str>> = distinct.iter().map(|h| h.as_text()).collect();
                let rule = labels.and_then(|labels| {
                    self.rules_for(route_id)
                        .iter()
                        .find(|rule| labels.iter().all(|label| rule.inputs.contains(*label)))
                });
                match rule {
                    Some(rule) => {
                        trace!(%route_id, variants = distinct.len(), rule = %rule.describe(), "merged headsigns");
                        Ok(Some(Headsign::text(rule.output.clone())))
                    }
                    None => Err(self
                        .uncovered_pair(route_id, &distinct)
                        .unwrap_or_else(|| MergeError::UnexpectedMerge {
                            route_id,
                            first: (*first).clone(),
                            second: (*last).clone(),
                        })),
                }
            }
        }
    }

    /// The first pair of `variants` no single rule covers.
    fn uncovered_pair(&self, route_id: RouteId, variants: &[&Headsign]) -> Option<MergeError> {
        variants.iter().enumerate().find_map(|(i, first)| {
            variants[i + 1..]
                .iter()
                .find_map(|second| self.resolve_merge(route_id, first, second).err())
        })
    }
}

/// Builder for a validated [`MergeTable`].
#[derive(Debug, Default)]
pub struct MergeTableBuilder {
    rules: Vec<MergeRule>,
}

impl MergeTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for a route.
    pub fn rule(self, route_id: u64, inputs: &[&str], output: &str) -> Self {
        self.add(MergeRule::new(RouteId(route_id), inputs, output))
    }

    /// Add a rule with a sub-key naming the ambiguity.
    pub fn keyed_rule(self, route_id: u64, sub_key: &str, inputs: &[&str], output: &str) -> Self {
        self.add(MergeRule::new(RouteId(route_id), inputs, output).with_sub_key(sub_key))
    }

    /// Add a prepared rule.
    pub fn add(mut self, rule: MergeRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validate and build the table.
    ///
    /// Fails if a rule has a single input, or if two rules of the same route
    /// share two or more inputs.
    pub fn build(self) -> Result<MergeTable, MergeError> {
        let mut table = MergeTable::new();
        for rule in self.rules {
            if rule.inputs.len() < 2 {
                return Err(MergeError::EmptyRule {
                    route_id: rule.route_id,
                    output: rule.output,
                });
            }
            let existing = table.rules.entry(rule.route_id).or_default();
            for other in existing.iter() {
                let shared: Vec<String> = other.inputs.intersection(&rule.inputs).cloned().collect();
                if shared.len() >= 2 {
                    return Err(MergeError::OverlappingRules {
                        route_id: rule.route_id,
                        first: other.describe(),
                        second: rule.describe(),
                        shared,
                    });
                }
            }
            existing.push(rule);
        }
        Ok(table)
    }
}
