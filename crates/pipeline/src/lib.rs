#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/karst/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::PipelineConfig;

mod pipeline;
pub use pipeline::FactorPipeline;

mod report;
pub use report::{ColumnReport, PipelineReport};

mod error;
pub use error::PipelineError;
