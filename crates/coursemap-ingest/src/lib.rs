//! Course document loading, annotation scanning, and the merge pipeline

pub mod config;
pub mod error;
pub mod source;
pub mod table;
pub mod tokenizer;
pub mod crosslinks;
pub mod pipeline;


#[cfg(test)]
pub mod test_utils;

pub use config::{MergeConfig, CourseSource, AnnotationConfig};
pub use error::{SourceError, ConfigError, PipelineError};
pub use source::{BlockLocator, parse_document, load_course_graph};
pub use table::parse_table;
pub use tokenizer::connection_refs;
pub use crosslinks::{
    AnnotationTable, CrossLinkExtractor, ExtractionStats, CROSS_COURSE_TAG, file_matcher, read_annotation_dir,
};
pub use pipeline::{CourseGraph, MergeOutcome, MergeReport, assemble, run};
