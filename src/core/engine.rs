use super::error::InvalidInputError;
use super::types::{AdditionalMetrics, Inputs, RoiMetrics};

/// Aggregates benefits and costs into the ROI metrics.
///
/// Inputs are validated up front; no metric is produced when any field is
/// negative or not finite. Finite inputs whose sums or products overflow are
/// rejected the same way. ROI is defined as 0 when there are no costs.
pub fn compute(inputs: &Inputs) -> Result<RoiMetrics, InvalidInputError> {
    validate(inputs)?;

    let time_saved_value = inputs.time_saved_hours * inputs.hourly_rate;
    let people_cost_reduction = inputs.people_removed as f64 * inputs.average_salary;
    let total_benefits = inputs.revenue_increase
        + inputs.cost_savings
        + inputs.productivity_gains
        + time_saved_value
        + people_cost_reduction;

    let total_costs = total_costs(inputs);
    let net_benefits = total_benefits - total_costs;
    let roi_percent = roi_percent(net_benefits, total_costs);

    for (field, value) in [
        ("time_saved_value", time_saved_value),
        ("people_cost_reduction", people_cost_reduction),
        ("total_benefits", total_benefits),
        ("total_costs", total_costs),
        ("net_benefits", net_benefits),
        ("roi_percent", roi_percent),
    ] {
        if !value.is_finite() {
            return Err(InvalidInputError::NonFinite { field });
        }
    }

    log::debug!(
        "roi computed: benefits={total_benefits} costs={total_costs} net={net_benefits} roi={roi_percent}"
    );

    Ok(RoiMetrics {
        total_benefits,
        total_costs,
        net_benefits,
        roi_percent,
        people_cost_reduction,
        time_saved_value,
    })
}

pub fn validate(inputs: &Inputs) -> Result<(), InvalidInputError> {
    for (field, value) in inputs.amounts() {
        check_amount(field, value)?;
    }
    if inputs.people_removed < 0 {
        return Err(InvalidInputError::NegativeHeadcount(inputs.people_removed));
    }
    Ok(())
}

pub fn validate_additional(additional: &AdditionalMetrics) -> Result<(), InvalidInputError> {
    check_amount("miscellaneous_costs", additional.miscellaneous_costs)?;
    check_amount("miscellaneous_savings", additional.miscellaneous_savings)
}

fn check_amount(field: &'static str, value: f64) -> Result<(), InvalidInputError> {
    if !value.is_finite() {
        return Err(InvalidInputError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(InvalidInputError::Negative { field, value });
    }
    Ok(())
}

pub(crate) fn total_costs(inputs: &Inputs) -> f64 {
    inputs.development_costs
        + inputs.maintenance_costs
        + inputs.training_costs
        + inputs.licensing_costs
        + inputs.cloud_costs
        + inputs.support_ops_costs
}

pub(crate) fn roi_percent(net: f64, costs: f64) -> f64 {
    if costs != 0.0 {
        (net / costs) * 100.0
    } else {
        0.0
    }
}
