#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/karst/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cross_section;
pub use cross_section::{Ddof, ZScore, average_rank, median, std_dev};

mod clip;
pub use clip::{ClipBounds, MadClipper, mad_clip};

mod linalg;
pub use linalg::{matrix_rank, ols_residuals};

mod error;
pub use error::MathError;
