//! # karst
//!
//! Cross-sectional momentum factor construction.
//!
//! This crate provides a unified interface to the karst crates. Individual
//! components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Panel schema, naming and grouping types
//! - `traits`: Factor, transform and estimator traits
//! - `math`: Median, MAD clipping, z-scores, ranks and OLS
//! - `styles`: Momentum and size factors
//! - `model`: Per-date standardization and neutralization
//! - `utils`: Panel column helpers
//! - `pipeline`: End-to-end factor pipeline
//! - `cli`: The `karst` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use karst::pipeline::{FactorPipeline, PipelineConfig};
//!
//! let pipeline = FactorPipeline::new(PipelineConfig::default())?;
//! let (panel, report) = pipeline.run(panel)?;
//! println!("{report}");
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use karst_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use karst_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use karst_math as math;
#[cfg(feature = "styles")]
#[doc(inline)]
pub use karst_styles as styles;
#[cfg(feature = "model")]
#[doc(inline)]
pub use karst_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use karst_utils as utils;
#[cfg(feature = "pipeline")]
#[doc(inline)]
pub use karst_pipeline as pipeline;

// Only the binary uses these.
#[cfg(feature = "cli")]
use clap as _;
#[cfg(feature = "cli")]
use serde_json as _;
#[cfg(feature = "cli")]
use tracing as _;
#[cfg(feature = "cli")]
use tracing_subscriber as _;
