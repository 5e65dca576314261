#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/karst/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod factor;
pub use factor::{FactorColumns, StandardizeMethod, neutral_name};

mod group;
pub use group::{CrossSections, entity_runs};

mod outcome;
pub use outcome::{Coverage, FitOutcome, SkipReason};

mod schema;
pub use schema::{IndustrySource, PanelSchema};
