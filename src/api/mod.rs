use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use clap::Args;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::core::{
    AdditionalMetrics, Chart, GrowthModel, Inputs, MetricsDisplay, ProjectionAssumptions,
    RoiMetrics, RoiStatus, build_charts, compute, validate_additional,
};
use crate::report::{export_report, file_url, render_chart_svg, render_summary_html};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Args, Debug, Clone, PartialEq)]
pub struct InputArgs {
    #[arg(long, default_value_t = 100_000.0, help = "Increase in revenue due to AI adoption (USD)")]
    pub revenue_increase: f64,
    #[arg(long, default_value_t = 50_000.0, help = "Savings in operational costs (USD)")]
    pub cost_savings: f64,
    #[arg(
        long,
        default_value_t = 30_000.0,
        help = "Monetary value of productivity improvements (USD)"
    )]
    pub productivity_gains: f64,
    #[arg(long, default_value_t = 80_000.0, help = "Initial development costs (USD)")]
    pub development_costs: f64,
    #[arg(long, default_value_t = 20_000.0, help = "Ongoing maintenance costs (USD)")]
    pub maintenance_costs: f64,
    #[arg(long, default_value_t = 10_000.0, help = "Employee training costs (USD)")]
    pub training_costs: f64,
    #[arg(long, default_value_t = 15_000.0, help = "AI licensing costs (USD)")]
    pub licensing_costs: f64,
    #[arg(long, default_value_t = 20_000.0, help = "Cloud infrastructure costs (USD)")]
    pub cloud_costs: f64,
    #[arg(long, default_value_t = 10_000.0, help = "Support and operations costs (USD)")]
    pub support_ops_costs: f64,
    #[arg(long, default_value_t = 5, help = "Number of people removed from processes")]
    pub people_removed: i64,
    #[arg(
        long,
        default_value_t = 60_000.0,
        help = "Average annual salary of removed people (USD)"
    )]
    pub average_salary: f64,
    #[arg(long, default_value_t = 2_000.0, help = "Total hours saved annually")]
    pub time_saved_hours: f64,
    #[arg(long, default_value_t = 50.0, help = "Average hourly rate of employees (USD/hour)")]
    pub hourly_rate: f64,
    #[arg(
        long,
        default_value_t = 5_000.0,
        help = "Miscellaneous costs, reported but not part of the ROI"
    )]
    pub miscellaneous_costs: f64,
    #[arg(
        long,
        default_value_t = 3_000.0,
        help = "Miscellaneous savings, reported but not part of the ROI"
    )]
    pub miscellaneous_savings: f64,
}

impl Default for InputArgs {
    fn default() -> Self {
        Self {
            revenue_increase: 100_000.0,
            cost_savings: 50_000.0,
            productivity_gains: 30_000.0,
            development_costs: 80_000.0,
            maintenance_costs: 20_000.0,
            training_costs: 10_000.0,
            licensing_costs: 15_000.0,
            cloud_costs: 20_000.0,
            support_ops_costs: 10_000.0,
            people_removed: 5,
            average_salary: 60_000.0,
            time_saved_hours: 2_000.0,
            hourly_rate: 50.0,
            miscellaneous_costs: 5_000.0,
            miscellaneous_savings: 3_000.0,
        }
    }
}

impl InputArgs {
    pub fn inputs(&self) -> Inputs {
        Inputs {
            revenue_increase: self.revenue_increase,
            cost_savings: self.cost_savings,
            productivity_gains: self.productivity_gains,
            development_costs: self.development_costs,
            maintenance_costs: self.maintenance_costs,
            training_costs: self.training_costs,
            licensing_costs: self.licensing_costs,
            cloud_costs: self.cloud_costs,
            support_ops_costs: self.support_ops_costs,
            people_removed: self.people_removed,
            average_salary: self.average_salary,
            time_saved_hours: self.time_saved_hours,
            hourly_rate: self.hourly_rate,
        }
    }

    pub fn additional(&self) -> AdditionalMetrics {
        AdditionalMetrics {
            miscellaneous_costs: self.miscellaneous_costs,
            miscellaneous_savings: self.miscellaneous_savings,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RoiPayload {
    #[serde(deserialize_with = "present")]
    revenue_increase: Option<f64>,
    #[serde(deserialize_with = "present")]
    cost_savings: Option<f64>,
    #[serde(deserialize_with = "present")]
    productivity_gains: Option<f64>,

    #[serde(deserialize_with = "present")]
    development_costs: Option<f64>,
    #[serde(deserialize_with = "present")]
    maintenance_costs: Option<f64>,
    #[serde(deserialize_with = "present")]
    training_costs: Option<f64>,
    #[serde(deserialize_with = "present")]
    licensing_costs: Option<f64>,
    #[serde(deserialize_with = "present")]
    cloud_costs: Option<f64>,
    #[serde(deserialize_with = "present")]
    support_ops_costs: Option<f64>,

    #[serde(deserialize_with = "present")]
    people_removed: Option<i64>,
    #[serde(deserialize_with = "present")]
    average_salary: Option<f64>,

    #[serde(deserialize_with = "present")]
    time_saved_hours: Option<f64>,
    #[serde(deserialize_with = "present")]
    hourly_rate: Option<f64>,

    #[serde(deserialize_with = "present")]
    miscellaneous_costs: Option<f64>,
    #[serde(deserialize_with = "present")]
    miscellaneous_savings: Option<f64>,

    #[serde(deserialize_with = "present")]
    projection_years: Option<u32>,
    #[serde(deserialize_with = "present")]
    roi_step: Option<f64>,
    #[serde(deserialize_with = "present")]
    net_benefit_growth: Option<f64>,
    #[serde(deserialize_with = "present")]
    growth_model: Option<GrowthModel>,
}

/// A key that is sent must carry a value; only an absent key falls back to
/// the form default. `null` is rejected instead of being read as absent.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug)]
struct ApiRequest {
    args: InputArgs,
    projection: ProjectionAssumptions,
}

/// Result of one evaluation, shared by the HTTP handlers and the CLI.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub inputs: Inputs,
    pub additional: AdditionalMetrics,
    pub metrics: RoiMetrics,
    pub charts: Vec<Chart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartResponse {
    #[serde(flatten)]
    chart: Chart,
    svg: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoiResponse {
    metrics: RoiMetrics,
    display: MetricsDisplay,
    status: RoiStatus,
    additional: AdditionalMetrics,
    charts: Vec<ChartResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportResponse {
    path: String,
    url: String,
    html: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
struct AppState {
    projection: ProjectionAssumptions,
    report_dir: PathBuf,
}

/// Validates and evaluates one set of inputs.
pub fn evaluate(
    args: &InputArgs,
    projection: &ProjectionAssumptions,
) -> Result<Evaluation, String> {
    let inputs = args.inputs();
    let additional = args.additional();
    let metrics = compute(&inputs).map_err(|e| e.to_string())?;
    validate_additional(&additional).map_err(|e| e.to_string())?;
    let charts = build_charts(&inputs, &metrics, projection);
    Ok(Evaluation {
        inputs,
        additional,
        metrics,
        charts,
    })
}

pub async fn run_http_server(config: AppConfig, report_dir: PathBuf) -> std::io::Result<()> {
    let port = config.server.port;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = build_router(&config, report_dir);

    let listener = TcpListener::bind(addr).await?;
    log::info!("ROI calculator listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

fn build_router(config: &AppConfig, report_dir: PathBuf) -> Router {
    let state = AppState {
        projection: config.projection,
        report_dir,
    };
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/roi", get(roi_get_handler).post(roi_post_handler))
        .route("/api/report", post(report_post_handler))
        .fallback(not_found_handler)
        .with_state(state);

    if config.server.enable_cors {
        app.layer(middleware::map_response(allow_any_origin))
    } else {
        app
    }
}

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn roi_get_handler(
    State(state): State<AppState>,
    payload: Result<Query<RoiPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => roi_handler_impl(&state, payload),
        Err(rejection) => rejected_payload(rejection.body_text()),
    }
}

async fn roi_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<RoiPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => roi_handler_impl(&state, payload),
        Err(rejection) => rejected_payload(rejection.body_text()),
    }
}

fn rejected_payload(msg: String) -> Response {
    log::warn!("rejected ROI payload: {msg}");
    error_response(StatusCode::BAD_REQUEST, &msg)
}

fn roi_handler_impl(state: &AppState, payload: RoiPayload) -> Response {
    match evaluate_payload(state, payload) {
        Ok(evaluation) => json_response(StatusCode::OK, build_roi_response(evaluation)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn report_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<RoiPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return rejected_payload(rejection.body_text()),
    };
    let evaluation = match evaluate_payload(&state, payload) {
        Ok(evaluation) => evaluation,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let html = render_summary_html(
        &evaluation.metrics,
        &evaluation.additional,
        &evaluation.charts,
        Local::now().naive_local(),
    );
    match export_report(&html, &state.report_dir) {
        Ok(path) => json_response(
            StatusCode::OK,
            ReportResponse {
                url: file_url(&path),
                path: path.display().to_string(),
                html,
            },
        ),
        Err(e) => {
            log::error!("failed to export report: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to write report: {e}"),
            )
        }
    }
}

fn evaluate_payload(state: &AppState, payload: RoiPayload) -> Result<Evaluation, String> {
    let request = api_request_from_payload(payload, &state.projection)?;
    evaluate(&request.args, &request.projection).inspect_err(|msg| {
        log::warn!("rejected ROI inputs: {msg}");
    })
}

fn build_roi_response(evaluation: Evaluation) -> RoiResponse {
    let metrics = evaluation.metrics;
    RoiResponse {
        display: metrics.display(),
        status: metrics.status(),
        metrics,
        additional: evaluation.additional,
        charts: evaluation
            .charts
            .into_iter()
            .map(|chart| ChartResponse {
                svg: render_chart_svg(&chart),
                chart,
            })
            .collect(),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<RoiPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload, &ProjectionAssumptions::default())
}

fn api_request_from_payload(
    payload: RoiPayload,
    base_projection: &ProjectionAssumptions,
) -> Result<ApiRequest, String> {
    let mut args = InputArgs::default();
    let mut projection = *base_projection;

    if let Some(v) = payload.revenue_increase {
        args.revenue_increase = v;
    }
    if let Some(v) = payload.cost_savings {
        args.cost_savings = v;
    }
    if let Some(v) = payload.productivity_gains {
        args.productivity_gains = v;
    }

    if let Some(v) = payload.development_costs {
        args.development_costs = v;
    }
    if let Some(v) = payload.maintenance_costs {
        args.maintenance_costs = v;
    }
    if let Some(v) = payload.training_costs {
        args.training_costs = v;
    }
    if let Some(v) = payload.licensing_costs {
        args.licensing_costs = v;
    }
    if let Some(v) = payload.cloud_costs {
        args.cloud_costs = v;
    }
    if let Some(v) = payload.support_ops_costs {
        args.support_ops_costs = v;
    }

    if let Some(v) = payload.people_removed {
        args.people_removed = v;
    }
    if let Some(v) = payload.average_salary {
        args.average_salary = v;
    }

    if let Some(v) = payload.time_saved_hours {
        args.time_saved_hours = v;
    }
    if let Some(v) = payload.hourly_rate {
        args.hourly_rate = v;
    }

    if let Some(v) = payload.miscellaneous_costs {
        args.miscellaneous_costs = v;
    }
    if let Some(v) = payload.miscellaneous_savings {
        args.miscellaneous_savings = v;
    }

    if let Some(v) = payload.projection_years {
        projection.years = v;
    }
    if let Some(v) = payload.roi_step {
        projection.roi_step_pp = v;
    }
    if let Some(v) = payload.net_benefit_growth {
        projection.net_benefit_growth = v / 100.0;
    }
    if let Some(v) = payload.growth_model {
        projection.growth_model = v;
    }

    projection.validate().map_err(|e| e.to_string())?;
    Ok(ApiRequest { args, projection })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use clap::Parser;
    use tower::ServiceExt;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        args: InputArgs,
    }

    fn test_state() -> AppState {
        AppState {
            projection: ProjectionAssumptions::default(),
            report_dir: std::env::temp_dir()
                .join(format!("roi-api-test-{}", std::process::id())),
        }
    }

    #[test]
    fn cli_defaults_match_form_defaults() {
        let parsed = Harness::parse_from(["roi"]);
        assert_eq!(parsed.args, InputArgs::default());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let parsed = Harness::parse_from([
            "roi",
            "--revenue-increase",
            "250000",
            "--people-removed",
            "2",
            "--hourly-rate",
            "75.5",
        ]);
        assert_approx(parsed.args.revenue_increase, 250_000.0);
        assert_eq!(parsed.args.people_removed, 2);
        assert_approx(parsed.args.hourly_rate, 75.5);
        assert_approx(parsed.args.cost_savings, 50_000.0);
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "revenueIncrease": 120000,
          "costSavings": 40000,
          "productivityGains": 25000,
          "developmentCosts": 90000,
          "supportOpsCosts": 12000,
          "peopleRemoved": 3,
          "averageSalary": 70000,
          "timeSavedHours": 1500,
          "hourlyRate": 60,
          "miscellaneousCosts": 1000,
          "projectionYears": 5,
          "roiStep": 8,
          "netBenefitGrowth": 4,
          "growthModel": "compounding"
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let args = request.args;

        assert_approx(args.revenue_increase, 120_000.0);
        assert_approx(args.cost_savings, 40_000.0);
        assert_approx(args.productivity_gains, 25_000.0);
        assert_approx(args.development_costs, 90_000.0);
        assert_approx(args.maintenance_costs, 20_000.0);
        assert_approx(args.support_ops_costs, 12_000.0);
        assert_eq!(args.people_removed, 3);
        assert_approx(args.average_salary, 70_000.0);
        assert_approx(args.time_saved_hours, 1_500.0);
        assert_approx(args.hourly_rate, 60.0);
        assert_approx(args.miscellaneous_costs, 1_000.0);
        assert_approx(args.miscellaneous_savings, 3_000.0);
        assert_eq!(request.projection.years, 5);
        assert_approx(request.projection.roi_step_pp, 8.0);
        assert_approx(request.projection.net_benefit_growth, 0.04);
        assert_eq!(request.projection.growth_model, GrowthModel::Compounding);
    }

    #[test]
    fn empty_payload_uses_form_defaults() {
        let request = api_request_from_json("{}").expect("json should parse");
        assert_eq!(request.args, InputArgs::default());
        assert_eq!(request.projection, ProjectionAssumptions::default());
    }

    #[test]
    fn api_request_rejects_invalid_projection() {
        let err = api_request_from_json(r#"{ "projectionYears": 0 }"#)
            .expect_err("zero years must be rejected");
        assert!(err.contains("projection years"));

        let err = api_request_from_json(r#"{ "netBenefitGrowth": -100 }"#)
            .expect_err("-100% growth must be rejected");
        assert!(err.contains("net benefit growth"));
    }

    #[test]
    fn null_values_are_rejected_instead_of_defaulted() {
        let err = api_request_from_json(r#"{ "costSavings": null }"#)
            .expect_err("a cleared field must not fall back to the default");
        assert!(err.contains("Invalid API JSON payload"));

        let err = api_request_from_json(r#"{ "revenueIncrease": 1, "peopleRemoved": null }"#)
            .expect_err("null headcount must be rejected");
        assert!(err.contains("null"));

        let request = api_request_from_json(r#"{ "costSavings": 0 }"#).expect("zero is a value");
        assert_approx(request.args.cost_savings, 0.0);
    }

    #[test]
    fn evaluate_rejects_negative_headcount_and_rate() {
        let mut args = InputArgs::default();
        args.people_removed = -1;
        let err = evaluate(&args, &ProjectionAssumptions::default())
            .expect_err("negative headcount must fail");
        assert!(err.contains("people removed"));

        let mut args = InputArgs::default();
        args.hourly_rate = -5.0;
        let err = evaluate(&args, &ProjectionAssumptions::default())
            .expect_err("negative rate must fail");
        assert!(err.contains("hourly_rate"));
    }

    #[test]
    fn evaluate_rejects_negative_miscellaneous_amounts() {
        let mut args = InputArgs::default();
        args.miscellaneous_costs = -10.0;
        let err = evaluate(&args, &ProjectionAssumptions::default())
            .expect_err("negative misc costs must fail");
        assert!(err.contains("miscellaneous_costs"));
    }

    #[test]
    fn miscellaneous_amounts_do_not_change_roi() {
        let projection = ProjectionAssumptions::default();
        let baseline = evaluate(&InputArgs::default(), &projection).expect("valid");
        let mut args = InputArgs::default();
        args.miscellaneous_costs = 1_000_000.0;
        args.miscellaneous_savings = 0.0;
        let changed = evaluate(&args, &projection).expect("valid");
        assert_eq!(baseline.metrics, changed.metrics);
    }

    #[test]
    fn roi_response_serialization_contains_expected_fields() {
        let response = roi_handler_impl(&test_state(), RoiPayload::default());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );

        let evaluation = evaluate(&InputArgs::default(), &ProjectionAssumptions::default())
            .expect("valid inputs");
        let json = serde_json::to_string(&build_roi_response(evaluation))
            .expect("response should serialize");
        assert!(json.contains("\"metrics\""));
        assert!(json.contains("\"totalBenefits\":580000.0"));
        assert!(json.contains("\"roiPercent\":\"274.19\""));
        assert!(json.contains("\"status\":\"positive\""));
        assert!(json.contains("\"miscellaneousCosts\":5000.0"));
        assert!(json.contains("\"id\":\"roi-trend\""));
        assert!(json.contains("\"kind\":\"line\""));
        assert!(json.contains("\"svg\":\"<svg"));
    }

    #[test]
    fn invalid_payload_is_a_bad_request() {
        let payload = RoiPayload {
            hourly_rate: Some(-5.0),
            ..RoiPayload::default()
        };
        let response = roi_handler_impl(&test_state(), payload);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn report_handler_exports_summary_file() {
        let state = test_state();
        let report_dir = state.report_dir.clone();
        let response = report_post_handler(State(state), Ok(Json(RoiPayload::default()))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let path = report_dir.join(crate::report::REPORT_FILE_NAME);
        let html = std::fs::read_to_string(&path).expect("report should exist");
        assert!(html.contains("274.19% (positive)"));
        std::fs::remove_dir_all(&report_dir).expect("cleanup");
    }

    async fn send(config: &AppConfig, request: Request<Body>) -> Response {
        build_router(config, test_state().report_dir)
            .oneshot(request)
            .await
            .expect("router never fails")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    async fn error_message(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("JSON error body");
        body["error"]
            .as_str()
            .expect("error field should be a string")
            .to_string()
    }

    #[tokio::test]
    async fn malformed_bodies_are_json_bad_requests() {
        let config = AppConfig::default();
        let cases = [
            ("/api/roi", r#"{ "peopleRemoved": 1.5 }"#),
            ("/api/roi", "{not json"),
            ("/api/roi", r#"{ "hourlyRate": null }"#),
            ("/api/report", r#"{ "costSavings": "lots" }"#),
        ];
        for (uri, body) in cases {
            let response = send(&config, post_json(uri, body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri} {body}");
            assert_eq!(
                response.headers().get(header::CONTENT_TYPE),
                Some(&HeaderValue::from_static("application/json"))
            );
            assert_eq!(
                response.headers().get(header::CACHE_CONTROL),
                Some(&HeaderValue::from_static("no-store"))
            );
            assert!(!error_message(response).await.is_empty(), "{uri} {body}");
        }
    }

    #[tokio::test]
    async fn malformed_query_is_a_json_bad_request() {
        let config = AppConfig::default();
        let response = send(&config, get_request("/api/roi?hourlyRate=abc")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_message(response).await.contains("query"));

        let response = send(&config, get_request("/api/roi?hourlyRate=75&projectionYears=4")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_values_reach_the_error_contract() {
        let response = send(
            &AppConfig::default(),
            post_json("/api/roi", r#"{ "hourlyRate": -5 }"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_message(response).await.contains("hourly_rate"));
    }

    #[tokio::test]
    async fn unknown_route_is_a_json_not_found() {
        let response = send(&AppConfig::default(), get_request("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_message(response).await, "Not found");
    }

    #[tokio::test]
    async fn allow_origin_header_follows_cors_setting() {
        let mut config = AppConfig::default();
        let response = send(&config, get_request("/api/roi")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );

        config.server.enable_cors = true;
        for uri in ["/api/roi", "/", "/nope"] {
            let response = send(&config, get_request(uri)).await;
            assert_eq!(
                response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
                Some(&HeaderValue::from_static("*")),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn cors_layer_sets_allow_origin_header() {
        let response = allow_any_origin(StatusCode::OK.into_response()).await;
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
    }
}
