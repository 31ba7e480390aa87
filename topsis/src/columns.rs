use log::debug;
use std::collections::HashMap;

use crate::config::*;

/// Case-insensitive lookup of column names.
///
/// Names are trimmed and lowercased once when the index is built. When two
/// columns collide, the leftmost one is kept.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl ColumnIndex {
    pub fn new(header: &[String]) -> ColumnIndex {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            positions.entry(normalize_name(name)).or_insert(idx);
        }
        ColumnIndex { positions }
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.positions.get(&normalize_name(name)).cloned()
    }

    /// Same as `lookup`, for optional column references.
    pub fn lookup_opt(&self, name: &Option<String>) -> Option<usize> {
        name.as_deref().and_then(|n| self.lookup(n))
    }
}

/// The columns found for one configured trait.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResolvedTrait {
    pub name: String,
    pub value_column: usize,
    pub weight_column: Option<usize>,
    pub direction_column: Option<usize>,
}

/// Finds the columns of every trait. Traits without a value column are dropped
/// with a warning; the order of the remaining traits is preserved.
pub fn resolve_traits(
    index: &ColumnIndex,
    traits: &[TraitSpec],
) -> (Vec<ResolvedTrait>, Vec<ScoringWarning>) {
    let mut resolved: Vec<ResolvedTrait> = Vec::new();
    let mut warnings: Vec<ScoringWarning> = Vec::new();
    for t in traits {
        match index.lookup(&t.value_column) {
            Some(value_column) => {
                let rt = ResolvedTrait {
                    name: t.name.clone(),
                    value_column,
                    weight_column: index.lookup_opt(&t.weight_column),
                    direction_column: index.lookup_opt(&t.direction_column),
                };
                debug!("resolve_traits: {:?}", rt);
                resolved.push(rt);
            }
            None => {
                warnings.push(ScoringWarning::MissingValueColumn {
                    name: t.name.clone(),
                    column: t.value_column.clone(),
                });
            }
        }
    }
    (resolved, warnings)
}
