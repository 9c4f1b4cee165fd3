use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("inputs must be non-negative values: {field} is {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("number of people removed cannot be negative: got {0}")]
    NegativeHeadcount(i64),

    #[error("inputs must be finite numbers: {field} is not")]
    NonFinite { field: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidProjectionError {
    #[error("projection years must be between 1 and {max}: got {years}")]
    Years { years: u32, max: u32 },

    #[error("ROI step must be a finite number")]
    NonFiniteRoiStep,

    #[error("net benefit growth must be a finite rate above -100%: got {0}")]
    Growth(f64),
}
