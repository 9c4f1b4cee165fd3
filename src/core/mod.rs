mod charts;
mod engine;
mod error;
mod format;
mod types;

pub use charts::build_charts;
pub use engine::{compute, validate, validate_additional};
#[cfg(test)]
pub(crate) use engine::tests::sample_inputs;
pub use error::{InvalidInputError, InvalidProjectionError};
pub use format::format_amount;
pub use types::{
    AdditionalMetrics, Chart, ChartKind, GrowthModel, Inputs, MetricsDisplay,
    MAX_PROJECTION_YEARS, ProjectionAssumptions, RoiMetrics, RoiStatus,
};
