#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/karst/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod panel;
pub use panel::{
    attach_column, check_unique_observations, drop_existing, f64_values, key_values, sort_panel,
    validate_columns,
};

mod csv;
pub use csv::{read_panel_csv, write_panel_csv};

mod error;
pub use error::UtilsError;
