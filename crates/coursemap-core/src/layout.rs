//! Deterministic dual layout: row-banded bands by module, and radial module clusters
//!
//! Both layouts depend only on each node's `module_num` and `base_id`. Modules are
//! placed by rank in ascending `module_num` order, not by numeric value, so gaps in
//! the numbering never leave empty bands or empty ring slots.

use crate::model::{LaidOutNode, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Canvas geometry shared by both layouts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    /// Big-circle radius as a fraction of `min(width, height)`.
    pub ring_ratio: f64,
    pub cluster_radius_min: f64,
    pub cluster_radius_max: f64,
    /// Cluster radius before clamping is `scale / sqrt(k + 1)` for a cluster of `k` nodes.
    pub cluster_radius_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            width: 1400.0,
            height: 1000.0,
            left: 120.0,
            right: 120.0,
            top: 90.0,
            bottom: 90.0,
            ring_ratio: 0.38,
            cluster_radius_min: 18.0,
            cluster_radius_max: 55.0,
            cluster_radius_scale: 210.0,
        }
    }
}

impl LayoutConfig {
    /// Radius of the circle on which cluster centres sit.
    pub fn big_radius(&self) -> f64 {
        self.width.min(self.height) * self.ring_ratio
    }

    /// Radius of a cluster holding `size` nodes.
    pub fn cluster_radius(&self, size: usize) -> f64 {
        (self.cluster_radius_scale / ((size + 1) as f64).sqrt())
            .min(self.cluster_radius_max)
            .max(self.cluster_radius_min)
    }
}

/// Both coordinate pairs computed for one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub sx: f64,
    pub sy: f64,
    pub rx: f64,
    pub ry: f64,
}

/// Compute placements for `nodes`. The result is aligned with the input slice.
pub fn compute_layout(nodes: &[Node], config: &LayoutConfig) -> Vec<Placement> {
    let mut placements = vec![Placement::default(); nodes.len()];

    // Module number -> input indices, sorted by base_id (stable on ties).
    let mut by_module: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, node) in nodes.iter().enumerate() {
        by_module.entry(node.module_num).or_default().push(i);
    }
    for members in by_module.values_mut() {
        members.sort_by(|&a, &b| nodes[a].base_id.cmp(&nodes[b].base_id));
    }

    let module_count = by_module.len();
    let row_count = module_count.max(2);
    let row_spacing = (config.height - config.top - config.bottom) / (row_count - 1) as f64;
    let total_width = config.width - config.left - config.right;

    let cx = config.width / 2.0;
    let cy = config.height / 2.0;
    let big_r = config.big_radius();

    for (rank, members) in by_module.values().enumerate() {
        // Row band: rank 0 sits on the bottom margin.
        let y = (config.height - config.bottom) - rank as f64 * row_spacing;
        let step = total_width / (members.len() + 1) as f64;
        for (i, &idx) in members.iter().enumerate() {
            placements[idx].sx = config.left + (i + 1) as f64 * step;
            placements[idx].sy = y;
        }

        // Radial cluster: clockwise from the top.
        let a0 = (2.0 * PI * rank as f64) / module_count as f64 - PI / 2.0;
        let mx = cx + big_r * a0.cos();
        let my = cy + big_r * a0.sin();
        let mini_r = config.cluster_radius(members.len());
        let k = members.len().max(1) as f64;
        for (i, &idx) in members.iter().enumerate() {
            let a = (2.0 * PI * i as f64) / k;
            placements[idx].rx = mx + mini_r * a.cos();
            placements[idx].ry = my + mini_r * a.sin();
        }
    }

    tracing::debug!(
        "Laid out {} nodes in {} module bands",
        nodes.len(),
        module_count
    );

    placements
}

/// Lay out `nodes`, returning new records with every coordinate pair attached.
/// `(x, y)` is the row-banded position.
pub fn layout_nodes(nodes: Vec<Node>, config: &LayoutConfig) -> Vec<LaidOutNode> {
    let placements = compute_layout(&nodes, config);
    nodes
        .into_iter()
        .zip(placements)
        .map(|(node, p)| LaidOutNode {
            node,
            sx: p.sx,
            sy: p.sy,
            x: p.sx,
            y: p.sy,
            rx: p.rx,
            ry: p.ry,
        })
        .collect()
}
