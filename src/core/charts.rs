use super::engine::{roi_percent, total_costs};
use super::types::{Chart, ChartKind, GrowthModel, Inputs, ProjectionAssumptions, RoiMetrics};

/// Derives the seven presentation series from raw inputs and metrics.
///
/// Nothing here feeds back into the aggregation; the projections are
/// illustrative and driven entirely by `assumptions`.
pub fn build_charts(
    inputs: &Inputs,
    metrics: &RoiMetrics,
    assumptions: &ProjectionAssumptions,
) -> Vec<Chart> {
    vec![
        revenue_components(inputs),
        cost_breakdown(inputs),
        benefits_vs_costs(metrics),
        reduction_vs_time_saved(metrics),
        roi_trend(inputs, assumptions),
        cumulative_savings(inputs, metrics),
        net_benefit_growth(metrics, assumptions),
    ]
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn year_labels(count: usize) -> Vec<String> {
    (1..=count).map(|year| format!("Year {year}")).collect()
}

fn revenue_components(inputs: &Inputs) -> Chart {
    Chart {
        id: "revenue-components",
        title: "Revenue Components",
        kind: ChartKind::Bar,
        x_label: "",
        y_label: "USD ($)",
        labels: labels(&["Revenue Increase", "Cost Savings", "Productivity Gains"]),
        values: vec![
            inputs.revenue_increase,
            inputs.cost_savings,
            inputs.productivity_gains,
        ],
        color: "steelblue",
        explanation: "How each revenue component contributes to total benefits, \
            showing where ROI improvement has the most potential.",
    }
}

fn cost_breakdown(inputs: &Inputs) -> Chart {
    Chart {
        id: "cost-breakdown",
        title: "Cost Breakdown",
        kind: ChartKind::Bar,
        x_label: "",
        y_label: "USD ($)",
        labels: labels(&[
            "Development",
            "Maintenance",
            "Training",
            "Licensing",
            "Cloud",
            "Support & Ops",
        ]),
        values: vec![
            inputs.development_costs,
            inputs.maintenance_costs,
            inputs.training_costs,
            inputs.licensing_costs,
            inputs.cloud_costs,
            inputs.support_ops_costs,
        ],
        color: "firebrick",
        explanation: "The cost distribution, identifying the major cost drivers \
            where optimization reduces total costs.",
    }
}

fn benefits_vs_costs(metrics: &RoiMetrics) -> Chart {
    Chart {
        id: "benefits-vs-costs",
        title: "Total Benefits vs Total Costs",
        kind: ChartKind::Bar,
        x_label: "",
        y_label: "USD ($)",
        labels: labels(&["Total Benefits", "Total Costs"]),
        values: vec![metrics.total_benefits, metrics.total_costs],
        color: "seagreen",
        explanation: "Total benefits against total costs, showing whether the \
            investment results in a net gain.",
    }
}

fn reduction_vs_time_saved(metrics: &RoiMetrics) -> Chart {
    Chart {
        id: "reduction-vs-time-saved",
        title: "Cost Reduction vs Time Saved Value",
        kind: ChartKind::Bar,
        x_label: "",
        y_label: "USD ($)",
        labels: labels(&["People Cost Reduction", "Time Saved Value"]),
        values: vec![metrics.people_cost_reduction, metrics.time_saved_value],
        color: "mediumpurple",
        explanation: "The value of reduced personnel costs and saved time.",
    }
}

/// ROI on direct revenue only, stepped up by a fixed number of percentage
/// points per year.
fn roi_trend(inputs: &Inputs, assumptions: &ProjectionAssumptions) -> Chart {
    let costs = total_costs(inputs);
    let base = roi_percent(inputs.direct_revenue() - costs, costs);
    let values = (1..=assumptions.horizon())
        .map(|year| base + f64::from(year) * assumptions.roi_step_pp)
        .collect::<Vec<_>>();

    Chart {
        id: "roi-trend",
        title: "ROI Trend Over Years",
        kind: ChartKind::Line,
        x_label: "Years",
        y_label: "ROI (%)",
        labels: year_labels(values.len()),
        values,
        color: "blue",
        explanation: "Projected ROI over the coming years, assuming consistent \
            revenue growth and cost optimization.",
    }
}

fn cumulative_savings(inputs: &Inputs, metrics: &RoiMetrics) -> Chart {
    let values = [
        inputs.cost_savings,
        inputs.productivity_gains,
        metrics.people_cost_reduction,
    ]
    .iter()
    .scan(0.0, |running, amount| {
        *running += amount;
        Some(*running)
    })
    .collect::<Vec<_>>();

    Chart {
        id: "cumulative-savings",
        title: "Cumulative Savings Over Time",
        kind: ChartKind::Line,
        x_label: "",
        y_label: "USD ($)",
        labels: year_labels(values.len()),
        values,
        color: "green",
        explanation: "The cumulative impact of the savings sources over time.",
    }
}

fn net_benefit_growth(metrics: &RoiMetrics, assumptions: &ProjectionAssumptions) -> Chart {
    let rate = assumptions.net_benefit_growth;
    let values = (1..=assumptions.horizon())
        .map(|year| {
            let factor = match assumptions.growth_model {
                GrowthModel::Linear => 1.0 + f64::from(year) * rate,
                GrowthModel::Compounding => (1.0 + rate).powi(year as i32),
            };
            metrics.net_benefits * factor
        })
        .collect::<Vec<_>>();

    Chart {
        id: "net-benefit-growth",
        title: "Net Benefits Over Time",
        kind: ChartKind::Line,
        x_label: "Years",
        y_label: "Net Benefits (USD)",
        labels: year_labels(values.len()),
        values,
        color: "red",
        explanation: "How net benefits are expected to grow over the projection \
            horizon.",
    }
}
