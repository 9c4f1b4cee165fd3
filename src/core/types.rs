use serde::{Deserialize, Serialize};

use super::error::InvalidProjectionError;
use super::format::format_amount;

/// Longest projection horizon the chart series will cover.
pub const MAX_PROJECTION_YEARS: u32 = 30;

/// The thirteen figures a single ROI evaluation is computed from.
///
/// `people_removed` is signed so a negative headcount coming from a form or
/// a JSON payload reaches validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub revenue_increase: f64,
    pub cost_savings: f64,
    pub productivity_gains: f64,
    pub development_costs: f64,
    pub maintenance_costs: f64,
    pub training_costs: f64,
    pub licensing_costs: f64,
    pub cloud_costs: f64,
    pub support_ops_costs: f64,
    pub people_removed: i64,
    pub average_salary: f64,
    pub time_saved_hours: f64,
    pub hourly_rate: f64,
}

impl Inputs {
    /// Every floating point field paired with its name, in form order.
    pub fn amounts(&self) -> [(&'static str, f64); 12] {
        [
            ("revenue_increase", self.revenue_increase),
            ("cost_savings", self.cost_savings),
            ("productivity_gains", self.productivity_gains),
            ("development_costs", self.development_costs),
            ("maintenance_costs", self.maintenance_costs),
            ("training_costs", self.training_costs),
            ("licensing_costs", self.licensing_costs),
            ("cloud_costs", self.cloud_costs),
            ("support_ops_costs", self.support_ops_costs),
            ("average_salary", self.average_salary),
            ("time_saved_hours", self.time_saved_hours),
            ("hourly_rate", self.hourly_rate),
        ]
    }

    /// Revenue increase, cost savings and productivity gains.
    pub fn direct_revenue(&self) -> f64 {
        self.revenue_increase + self.cost_savings + self.productivity_gains
    }
}

/// Miscellaneous figures from the "Additional" form category. They are shown
/// alongside the results but do not take part in the ROI aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalMetrics {
    pub miscellaneous_costs: f64,
    pub miscellaneous_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiMetrics {
    pub total_benefits: f64,
    pub total_costs: f64,
    pub net_benefits: f64,
    pub roi_percent: f64,
    pub people_cost_reduction: f64,
    pub time_saved_value: f64,
}

impl RoiMetrics {
    /// Positive only when the ROI is above zero at the two decimals it is
    /// displayed with, so `0.001` reads as "0.00% (negative)".
    pub fn status(&self) -> RoiStatus {
        let shown = format!("{:.2}", self.roi_percent);
        if shown.parse::<f64>().is_ok_and(|roi| roi > 0.0) {
            RoiStatus::Positive
        } else {
            RoiStatus::Negative
        }
    }

    pub fn display(&self) -> MetricsDisplay {
        MetricsDisplay {
            total_benefits: format_amount(self.total_benefits),
            total_costs: format_amount(self.total_costs),
            net_benefits: format_amount(self.net_benefits),
            roi_percent: format_amount(self.roi_percent),
            people_cost_reduction: format_amount(self.people_cost_reduction),
            time_saved_value: format_amount(self.time_saved_value),
        }
    }
}

/// Human readable rendering of [`RoiMetrics`]; `roi_percent` carries no `%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDisplay {
    pub total_benefits: String,
    pub total_costs: String,
    pub net_benefits: String,
    pub roi_percent: String,
    pub people_cost_reduction: String,
    pub time_saved_value: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoiStatus {
    Positive,
    Negative,
}

impl RoiStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RoiStatus::Positive => "positive",
            RoiStatus::Negative => "negative",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthModel {
    /// `1 + year * rate`
    Linear,
    /// `(1 + rate) ^ year`
    Compounding,
}

/// Illustrative growth assumptions behind the projected chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionAssumptions {
    pub years: u32,
    /// Percentage points added to the ROI trend per projected year.
    pub roi_step_pp: f64,
    /// Net benefit growth per year as a fraction, e.g. 0.05.
    pub net_benefit_growth: f64,
    pub growth_model: GrowthModel,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        Self {
            years: 3,
            roi_step_pp: 10.0,
            net_benefit_growth: 0.05,
            growth_model: GrowthModel::Linear,
        }
    }
}

impl ProjectionAssumptions {
    pub fn validate(&self) -> Result<(), InvalidProjectionError> {
        if self.years == 0 || self.years > MAX_PROJECTION_YEARS {
            return Err(InvalidProjectionError::Years {
                years: self.years,
                max: MAX_PROJECTION_YEARS,
            });
        }
        if !self.roi_step_pp.is_finite() {
            return Err(InvalidProjectionError::NonFiniteRoiStep);
        }
        if !self.net_benefit_growth.is_finite() || self.net_benefit_growth <= -1.0 {
            return Err(InvalidProjectionError::Growth(self.net_benefit_growth));
        }
        Ok(())
    }

    /// Number of projected years, capped at [`MAX_PROJECTION_YEARS`].
    pub fn horizon(&self) -> u32 {
        self.years.min(MAX_PROJECTION_YEARS)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: &'static str,
    pub explanation: &'static str,
}
