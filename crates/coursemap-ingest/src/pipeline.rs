//! The batch merge: load courses, register edges, scan annotations, lay out

use crate::config::{CourseSource, MergeConfig};
use crate::crosslinks::{read_annotation_dir, AnnotationTable, CrossLinkExtractor};
use crate::error::PipelineError;
use crate::source::{load_course_graph, BlockLocator};
use coursemap_core::{
    decorate_links, decorate_nodes, layout_nodes, EdgeRegistry, MergedGraph, NodePool, RawGraph,
};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// A loaded course document together with its merge settings.
#[derive(Debug, Clone)]
pub struct CourseGraph {
    pub tag: String,
    pub module_offset: i64,
    pub graph: RawGraph,
}

impl CourseGraph {
    pub fn new(source: &CourseSource, graph: RawGraph) -> Self {
        CourseGraph {
            tag: source.tag.clone(),
            module_offset: source.module_offset,
            graph,
        }
    }
}

/// Run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    pub node_count: usize,
    pub link_count: usize,
    /// Links whose endpoints belong to different courses.
    pub cross_course_count: usize,
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} links ({} cross-course)",
            self.node_count, self.link_count, self.cross_course_count
        )
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub graph: MergedGraph,
    pub report: MergeReport,
}

/// Merge already-loaded courses and annotation tables. Pure apart from logging.
pub fn assemble(
    courses: &[CourseGraph],
    tables: &[AnnotationTable],
    config: &MergeConfig,
) -> MergeOutcome {
    let mut pool = NodePool::new();
    for course in courses {
        let nodes = decorate_nodes(&course.graph.nodes, &course.tag, course.module_offset);
        let added = pool.extend(nodes);
        debug!("Course {}: {} nodes (offset {})", course.tag, added, course.module_offset);
    }

    // Internal links go in only after every course is pooled.
    let mut registry = EdgeRegistry::new();
    for course in courses {
        for link in decorate_links(&course.graph.links, &course.tag) {
            if !pool.contains(&link.source) || !pool.contains(&link.target) {
                warn!("Skipping link {} -> {}: endpoint not in any course", link.source, link.target);
                continue;
            }
            registry.insert(&link.source, &link.target, &link.tags);
        }
    }
    debug!("{} internal edges registered", registry.len());

    let extractor = CrossLinkExtractor::new(&config.annotations);
    let stats = extractor.extract_all(tables, &pool, &mut registry);
    debug!(
        "{} of {} edges came from {} annotation tables",
        stats.edges_created,
        registry.len(),
        stats.tables_used
    );

    let cross_course_count = registry
        .iter()
        .filter(|(s, t, _)| pool.course_of(s) != pool.course_of(t))
        .count();

    let report = MergeReport {
        node_count: pool.len(),
        link_count: registry.len(),
        cross_course_count,
    };

    let graph = MergedGraph {
        nodes: layout_nodes(pool.into_nodes(), &config.layout),
        links: registry.flatten(),
    };

    MergeOutcome { graph, report }
}

/// Load every input named by `config` (paths relative to `root`) and merge them.
///
/// A course document that cannot be read or has no valid embedded block aborts the run.
pub fn run(config: &MergeConfig, root: &Path) -> Result<MergeOutcome, PipelineError> {
    config.validate()?;

    let locator = BlockLocator::new(&config.block_id)?;
    let mut courses = Vec::with_capacity(config.courses.len());
    for source in &config.courses {
        let path = MergeConfig::resolve(root, &source.document);
        let graph = load_course_graph(&path, &locator)?;
        courses.push(CourseGraph::new(source, graph));
    }

    let annotation_dir = MergeConfig::resolve(root, &config.annotations.dir);
    let tables = read_annotation_dir(&annotation_dir, &config.annotations.pattern)?;

    let outcome = assemble(&courses, &tables, config);
    info!("Merged {}", outcome.report);
    Ok(outcome)
}
