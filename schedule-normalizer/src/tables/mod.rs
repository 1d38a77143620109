//! Curated tables: merge rules, headsign overrides and split routes.
//!
//! The tables are data keyed by route id. The crate ships a built-in set for
//! Halifax Transit; a JSON file with the same content can replace it so the
//! tables can be reviewed and updated without touching code.

mod error;
mod file;

use std::path::Path;

use tracing::debug;

use crate::direction::{OverrideTable, halifax_overrides};
use crate::domain::DirectionId;
use crate::merge::{MergeRule, MergeTable, MergeTableBuilder, halifax_merge_rules};
use crate::split::{DirectionSpec, ReferenceSequence, SplitTable, halifax_splits};

pub use error::TableError;
pub use file::{MergeRuleEntry, OverrideEntry, SplitDirectionEntry, SplitEntry, TableFile};

/// Every curated table the normalizer consults.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub merge: MergeTable,
    pub overrides: OverrideTable,
    pub splits: SplitTable,
}

impl Tables {
    /// The built-in Halifax Transit tables.
    pub fn builtin() -> Result<Self, TableError> {
        Ok(Self {
            merge: halifax_merge_rules()?,
            overrides: halifax_overrides(),
            splits: halifax_splits()?,
        })
    }

    /// Parse and validate tables from JSON.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let file: TableFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Load and validate tables from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_json(&contents)?;
        debug!(
            path = %path.display(),
            merge_rules = tables.merge.len(),
            overrides = tables.overrides.len(),
            splits = tables.splits.len(),
            "loaded tables"
        );
        Ok(tables)
    }

    /// Validate a parsed table file.
    pub fn from_file(file: TableFile) -> Result<Self, TableError> {
        let merge = file
            .merge
            .into_iter()
            .fold(MergeTableBuilder::new(), |builder, entry| {
                let rule = MergeRule::new(entry.route_id, &entry.inputs, &entry.output);
                builder.add(match entry.sub_key {
                    Some(key) => rule.with_sub_key(key),
                    None => rule,
                })
            })
            .build()?;

        let mut overrides = OverrideTable::new();
        for entry in file.overrides {
            if overrides.get(entry.route_id, entry.direction_id).is_some() {
                return Err(TableError::DuplicateOverride {
                    route_id: entry.route_id,
                    direction: entry.direction_id,
                });
            }
            overrides.insert(entry.route_id, entry.direction_id, entry.headsign);
        }

        let mut splits = SplitTable::new();
        for entry in file.splits {
            let [zero, one] = entry.directions;
            let spec = DirectionSpec::new(
                entry.route_id,
                [zero.headsign, one.headsign],
                [
                    ReferenceSequence::new(zero.stops),
                    ReferenceSequence::new(one.stops),
                ],
            )?;
            splits.insert(spec)?;
        }

        Ok(Self {
            merge,
            overrides,
            splits,
        })
    }

    /// The table file describing these tables, sorted by route.
    pub fn to_file(&self) -> TableFile {
        let mut merge: Vec<MergeRuleEntry> = self
            .merge
            .rules()
            .map(|rule| MergeRuleEntry {
                route_id: rule.route_id,
                sub_key: rule.sub_key.clone(),
                inputs: rule.inputs.iter().cloned().collect(),
                output: rule.output.clone(),
            })
            .collect();
        merge.sort_by(|a, b| (a.route_id, &a.output).cmp(&(b.route_id, &b.output)));

        let mut overrides: Vec<OverrideEntry> = self
            .overrides
            .iter()
            .map(|(route_id, direction_id, headsign)| OverrideEntry {
                route_id,
                direction_id,
                headsign: headsign.clone(),
            })
            .collect();
        overrides.sort_by_key(|entry| (entry.route_id, entry.direction_id));

        let mut splits: Vec<SplitEntry> = self
            .splits
            .specs()
            .map(|spec| SplitEntry {
                route_id: spec.route_id(),
                directions: DirectionId::BOTH.map(|d| SplitDirectionEntry {
                    headsign: spec.headsign(d).clone(),
                    stops: spec.reference(d).tokens().to_vec(),
                }),
            })
            .collect();
        splits.sort_by_key(|entry| entry.route_id);

        TableFile {
            merge,
            overrides,
            splits,
        }
    }

    /// Pretty-printed JSON for these tables, loadable with [`Tables::from_json`].
    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::{Headsign, RouteId};
    use crate::merge::MergeError;
    use crate::split::SplitError;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "merge": [
            {"route_id": 1, "inputs": ["Bridge Terminal", "Scotia Square"], "output": "Bridge Terminal"}
        ],
        "overrides": [
            {"route_id": 89, "direction_id": 1, "headsign": {"text": "Cobequid Term"}},
            {"route_id": 7, "direction_id": 0, "headsign": {"cardinal": "EAST"}}
        ],
        "splits": [
            {
                "route_id": 100114,
                "directions": [
                    {"headsign": {"text": "Mumford Term"},
                     "stops": [{"stop_id": "8799", "kind": "shared"}, {"stop_id": "8370", "kind": "exclusive"}]},
                    {"headsign": {"text": "Cunard Jr High"},
                     "stops": [{"stop_id": "8640", "kind": "exclusive"}, {"stop_id": "8799", "kind": "shared"}]}
                ]
            }
        ]
    }"#;

    #[test]
    fn builtin_tables_are_valid() {
        let tables = Tables::builtin().unwrap();
        assert!(!tables.merge.is_empty());
        assert_eq!(tables.overrides.len(), 2);
        assert_eq!(tables.splits.len(), 1);
    }

    #[test]
    fn builtin_split_routes_have_no_merge_rules_or_overrides() {
        let tables = Tables::builtin().unwrap();
        for spec in tables.splits.specs() {
            assert!(tables.merge.rules_for(spec.route_id()).is_empty());
            for (route_id, _, _) in tables.overrides.iter() {
                assert_ne!(route_id, spec.route_id());
            }
        }
    }

    #[test]
    fn parse_sample() {
        let tables = Tables::from_json(SAMPLE).unwrap();
        let rule = &tables.merge.rules_for(RouteId(1))[0];
        assert_eq!(rule.output, "Bridge Term");
        assert!(rule.inputs.contains("Scotia Sq"));
        assert_eq!(
            tables.overrides.get(RouteId(89), DirectionId::ONE),
            Some(&Headsign::text("Cobequid Term"))
        );
        assert!(matches!(
            tables.overrides.get(RouteId(7), DirectionId::ZERO),
            Some(Headsign::Cardinal(_))
        ));
        assert!(tables.splits.contains(RouteId(100_114)));
    }

    #[test]
    fn missing_sections_are_empty() {
        let tables = Tables::from_json("{}").unwrap();
        assert!(tables.merge.is_empty());
        assert!(tables.overrides.is_empty());
        assert!(tables.splits.is_empty());
    }

    #[test]
    fn bad_direction_id_rejected() {
        let json = r#"{"overrides": [{"route_id": 1, "direction_id": 2, "headsign": {"text": "X"}}]}"#;
        assert!(matches!(Tables::from_json(json), Err(TableError::Json(_))));
    }

    #[test]
    fn duplicate_override_rejected() {
        let json = r#"{"overrides": [
            {"route_id": 1, "direction_id": 0, "headsign": {"text": "A"}},
            {"route_id": 1, "direction_id": 0, "headsign": {"text": "B"}}
        ]}"#;
        assert!(matches!(
            Tables::from_json(json),
            Err(TableError::DuplicateOverride { .. })
        ));
    }

    #[test]
    fn overlapping_merge_rules_rejected() {
        let json = r#"{"merge": [
            {"route_id": 2, "inputs": ["A", "B"], "output": "A"},
            {"route_id": 2, "inputs": ["A", "B", "C"], "output": "C"}
        ]}"#;
        assert!(matches!(
            Tables::from_json(json),
            Err(TableError::Merge(MergeError::OverlappingRules { .. }))
        ));
    }

    #[test]
    fn split_without_exclusive_rejected() {
        let json = r#"{"splits": [{"route_id": 89, "directions": [
            {"headsign": {"text": "Lacewood Term"}, "stops": [{"stop_id": "6297", "kind": "shared"}]},
            {"headsign": {"text": "Cobequid Term"}, "stops": [{"stop_id": "9102", "kind": "exclusive"}]}
        ]}]}"#;
        assert!(matches!(
            Tables::from_json(json),
            Err(TableError::Split(SplitError::NoExclusiveTokens { .. }))
        ));
    }

    #[test]
    fn split_exclusive_stop_shared_rejected() {
        let json = r#"{"splits": [{"route_id": 14, "directions": [
            {"headsign": {"text": "Mumford Term"}, "stops": [{"stop_id": "8370", "kind": "exclusive"}]},
            {"headsign": {"text": "Cunard Jr High"}, "stops": [
                {"stop_id": "8640", "kind": "exclusive"}, {"stop_id": "8370", "kind": "shared"}]}
        ]}]}"#;
        assert!(matches!(
            Tables::from_json(json),
            Err(TableError::Split(SplitError::ExclusiveStopShared { .. }))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let tables = Tables::load(file.path()).unwrap();
        assert_eq!(tables.merge.len(), 1);
        assert_eq!(tables.overrides.len(), 2);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = Tables::load(&path).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn builtin_tables_survive_export() {
        let builtin = Tables::builtin().unwrap();
        let reloaded = Tables::from_json(&builtin.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.merge.len(), builtin.merge.len());
        assert_eq!(reloaded.overrides.len(), builtin.overrides.len());
        assert_eq!(reloaded.splits.len(), builtin.splits.len());
    }
}
