//! Course namespacing for raw node and link lists

use crate::model::{Link, Node, RawLink, RawNode, RESERVED_FIELDS};

/// Global id of a course-local node id.
pub fn namespaced_id(course: &str, base_id: &str) -> String {
    format!("{}:{}", course, base_id)
}

/// Namespace every node of one course and shift its module number by `module_offset`.
///
/// A shifted module number that would overflow is clamped to the `i64` range.
pub fn decorate_nodes(raw: &[RawNode], course: &str, module_offset: i64) -> Vec<Node> {
    raw.iter()
        .map(|n| {
            let mut extra = n.extra.clone();
            for field in RESERVED_FIELDS {
                extra.remove(*field);
            }
            let module_num = n.module_num.checked_add(module_offset).unwrap_or_else(|| {
                tracing::warn!(
                    "Module number of {}:{} overflows with offset {}, clamping",
                    course,
                    n.id,
                    module_offset
                );
                n.module_num.saturating_add(module_offset)
            });
            Node {
                id: namespaced_id(course, &n.id),
                base_id: n.id.clone(),
                course: course.to_string(),
                module_num,
                course_module_num: n.module_num,
                module_title: format!("{} M{}: {}", course, n.module_num, n.module_title),
                extra,
            }
        })
        .collect()
}

/// Namespace both endpoints of every link. Tags are kept verbatim, missing tags become empty.
///
/// The result is not canonicalised; the edge registry sorts the pair on insertion.
pub fn decorate_links(raw: &[RawLink], course: &str) -> Vec<Link> {
    raw.iter()
        .map(|l| Link {
            source: namespaced_id(course, &l.source),
            target: namespaced_id(course, &l.target),
            tags: l.tags.clone().unwrap_or_default(),
        })
        .collect()
}
