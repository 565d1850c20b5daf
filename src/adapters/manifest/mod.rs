//! Regression-case manifest sampling.
//!
//! Picks a reproducible (seeded) sample of symbols per kind from a graph and expands
//! each one over every depth × include-implementation combination. The manifest is
//! consumed by an external regression harness; only the node schema is shared with it.

use crate::domain::index::GraphIndex;
use crate::domain::node::{Node, NodeKind, ValueKind};
use indexmap::IndexMap;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

pub const DEFAULT_COUNT: usize = 20;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SOT_ID: &str = "context-final";
pub const DEPTHS: [u32; 5] = [1, 2, 3, 4, 5];
pub const IMPL_OPTIONS: [bool; 2] = [false, true];

const MAX_SHORT_NAME: usize = 50;

/// A sampled symbol category
#[derive(Debug, Clone, Copy)]
pub struct SymbolGroup {
    pub name: &'static str,
    pub kind: NodeKind,
    pub value_kind: Option<ValueKind>,
}

impl SymbolGroup {
    fn matches(&self, node: &Node) -> bool {
        node.kind == self.kind
            && self.value_kind.is_none_or(|vk| node.value_kind == Some(vk))
            && node.file.is_some()
    }
}

pub const SYMBOL_GROUPS: [SymbolGroup; 6] = [
    SymbolGroup {
        name: "class",
        kind: NodeKind::Class,
        value_kind: None,
    },
    SymbolGroup {
        name: "interface",
        kind: NodeKind::Interface,
        value_kind: None,
    },
    SymbolGroup {
        name: "method",
        kind: NodeKind::Method,
        value_kind: None,
    },
    SymbolGroup {
        name: "property",
        kind: NodeKind::Property,
        value_kind: None,
    },
    SymbolGroup {
        name: "value-parameter",
        kind: NodeKind::Value,
        value_kind: Some(ValueKind::Parameter),
    },
    SymbolGroup {
        name: "value-local",
        kind: NodeKind::Value,
        value_kind: Some(ValueKind::Local),
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestCase {
    pub name: String,
    pub symbol: String,
    pub depth: u32,
    #[serde(rename = "impl")]
    pub include_impl: bool,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseManifest {
    pub sot_id: String,
    pub seed: u64,
    pub count_per_kind: usize,
    pub depths: Vec<u32>,
    pub summary: IndexMap<String, usize>,
    pub cases: Vec<ManifestCase>,
}

/// Seeded symbol sampler
pub struct ManifestSampler {
    seed: u64,
    count: usize,
}

impl Default for ManifestSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_COUNT)
    }
}

impl ManifestSampler {
    pub fn new(seed: u64, count: usize) -> Self {
        Self { seed, count }
    }

    /// Up to `count` symbols per group. Externals (no `file`) are skipped and symbols
    /// are de-duplicated by fqn, first occurrence wins.
    pub fn pick_symbols<'g>(&self, index: &'g GraphIndex) -> IndexMap<&'static str, Vec<&'g Node>> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut picked = IndexMap::new();

        for group in &SYMBOL_GROUPS {
            let mut seen_fqns: HashSet<&str> = HashSet::new();
            let candidates: Vec<&Node> = index
                .nodes()
                .filter(|n| group.matches(n))
                .filter(|n| n.fqn.as_deref().is_some_and(|fqn| seen_fqns.insert(fqn)))
                .collect();

            let n_pick = self.count.min(candidates.len());
            let mut selected: Vec<&Node> = candidates
                .choose_multiple(&mut rng, n_pick)
                .copied()
                .collect();
            // choose_multiple does not randomize order
            selected.shuffle(&mut rng);
            info!(
                group = group.name,
                picked = n_pick,
                available = candidates.len(),
                "Sampled symbols"
            );
            picked.insert(group.name, selected);
        }

        picked
    }

    pub fn build(&self, index: &GraphIndex, sot_id: &str) -> CaseManifest {
        let picked = self.pick_symbols(index);
        let cases = generate_cases(&picked);
        info!(
            cases = cases.len(),
            symbols = picked.values().map(Vec::len).sum::<usize>(),
            "Generated manifest"
        );

        CaseManifest {
            sot_id: sot_id.to_string(),
            seed: self.seed,
            count_per_kind: self.count,
            depths: DEPTHS.to_vec(),
            summary: picked
                .iter()
                .map(|(group, nodes)| (group.to_string(), nodes.len()))
                .collect(),
            cases,
        }
    }
}

/// Every picked symbol × depth × impl option, with unique case names.
pub fn generate_cases(picked: &IndexMap<&'static str, Vec<&Node>>) -> Vec<ManifestCase> {
    let mut cases = Vec::new();
    let mut used_names = HashSet::new();

    for (&group, nodes) in picked {
        for node in nodes {
            let fqn = node.fqn.as_deref().unwrap_or(node.id.as_str());
            for depth in DEPTHS {
                for include_impl in IMPL_OPTIONS {
                    cases.push(ManifestCase {
                        name: make_case_name(group, fqn, depth, include_impl, &mut used_names),
                        symbol: fqn.to_string(),
                        depth,
                        include_impl,
                        category: group.to_string(),
                    });
                }
            }
        }
    }
    cases
}

/// `<group>/<short>-d<depth>[-impl]`, suffixed `-2`, `-3`, ... on collision.
pub fn make_case_name(
    group: &str,
    fqn: &str,
    depth: u32,
    include_impl: bool,
    used_names: &mut HashSet<String>,
) -> String {
    let short: String = short_name(fqn).chars().take(MAX_SHORT_NAME).collect();

    let mut base = format!("{group}/{short}-d{depth}");
    if include_impl {
        base.push_str("-impl");
    }

    let mut name = base.clone();
    let mut counter = 2;
    while used_names.contains(&name) {
        name = format!("{base}-{counter}");
        counter += 1;
    }
    used_names.insert(name.clone());
    name
}

fn short_name(fqn: &str) -> String {
    let last = fqn.rsplit('\\').next().unwrap_or(fqn);
    last.replace("::", "-")
        .replace("()", "")
        .replace(".$", "-")
        .replace('.', "-")
        .replace('$', "")
        .replace('@', "at")
}
