#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/karst/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod standardize;
pub use standardize::{
    CrossSectionalStandardizer, MedianStandardizer, RankStandardizer, StandardizeConfig,
    transform_by_date,
};

mod industry;
pub use industry::IndustryLabels;

mod design;
pub use design::{DesignMatrix, INTERCEPT, LOG_SIZE};

mod ols;
pub use ols::{OlsConfig, OlsResidualEstimator};

mod neutralize;
pub use neutralize::{DailyNeutralizer, NeutralizeConfig, NeutralizeInputs, Neutralized};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use karst_traits::{CrossSectionTransform, ResidualEstimator};

    pub use super::{
        CrossSectionalStandardizer, DailyNeutralizer, ModelError, NeutralizeConfig,
        StandardizeConfig,
    };
}
