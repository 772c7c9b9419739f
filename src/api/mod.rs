use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use crate::core::{
    AffordabilityConfig, EngineError, ParameterSet, SimulationResult, evaluate_affordability,
    parameters_from_json, parameters_from_str, run_loaded_scenarios, run_simulation,
};

/// Largest share of the purchase price the non-amortizing first tranche may
/// cover when the quick-start form derives the mortgage split.
const FIRST_TRANCHE_MAX_LOAN_TO_VALUE: f64 = 2.0 / 3.0;

#[derive(Parser, Debug)]
#[command(
    name = "rent_or_buy",
    about = "Year-by-year projection of renting versus buying a home"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = "info", help = "Log level when RUST_LOG is unset")]
        log_level: String,
    },
    /// Run one projection and print the result as JSON
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[arg(
        long,
        help = "Parameter set JSON file in any supported schema version; defaults when omitted"
    )]
    pub params: Option<PathBuf>,
    #[arg(long, help = "Purchase price; re-derives the mortgage split")]
    pub purchase_price: Option<f64>,
    #[arg(long, help = "Equity brought in; re-derives the mortgage split")]
    pub equity: Option<f64>,
    #[arg(long, help = "Gross annual household income")]
    pub household_income: Option<f64>,
    #[arg(long, help = "Net monthly rent of the comparable rental")]
    pub net_rent: Option<f64>,
    #[arg(long, help = "Annual living expenses excluding housing")]
    pub living_expenses: Option<f64>,
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
    #[arg(long, default_value = "warn", help = "Log level when RUST_LOG is unset")]
    pub log_level: String,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            params: None,
            purchase_price: None,
            equity: None,
            household_income: None,
            net_rent: None,
            living_expenses: None,
            pretty: false,
            log_level: "warn".to_string(),
        }
    }
}

/// Quick-start facts, the only inputs the short form asks for.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickStartPayload {
    pub purchase_price: Option<f64>,
    pub equity: Option<f64>,
    pub household_income: Option<f64>,
    pub net_rent: Option<f64>,
    pub living_expenses: Option<f64>,
}

impl From<&SimulateArgs> for QuickStartPayload {
    fn from(args: &SimulateArgs) -> Self {
        Self {
            purchase_price: args.purchase_price,
            equity: args.equity,
            household_income: args.household_income,
            net_rent: args.net_rent,
            living_expenses: args.living_expenses,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<SimulationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Overlays quick-start values on `params`. A new price or equity re-derives
/// both tranches: the first covers up to two thirds of the price, the rest
/// goes to the amortizing second tranche.
pub fn apply_quick_start(params: &mut ParameterSet, payload: &QuickStartPayload) {
    if let Some(v) = payload.purchase_price {
        params.quick_start.purchase_price = v;
        params.purchase.purchase_price = v;
    }
    if let Some(v) = payload.equity {
        params.quick_start.equity = v;
        params.purchase.equity = v;
    }
    if let Some(v) = payload.household_income {
        params.quick_start.household_income = v;
    }
    if let Some(v) = payload.net_rent {
        params.rent.net_rent_monthly = v;
    }
    if let Some(v) = payload.living_expenses {
        params.quick_start.living_expenses = v;
    }

    if payload.purchase_price.is_some() || payload.equity.is_some() {
        let price = params.purchase.purchase_price;
        let total = (price - params.purchase.equity).max(0.0);
        let first = total.min(price * FIRST_TRANCHE_MAX_LOAN_TO_VALUE);
        params.mortgage.first_tranche.principal = first;
        params.mortgage.second_tranche.principal = total - first;
    }
}

pub fn params_from_quick_start(payload: &QuickStartPayload) -> ParameterSet {
    let mut params = ParameterSet::default();
    apply_quick_start(&mut params, payload);
    params
}

/// Body of the `simulate` subcommand: load, overlay, run, render.
pub fn run_simulate_command(args: &SimulateArgs) -> Result<String, String> {
    let mut params = match &args.params {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            parameters_from_str(&raw).map_err(|e| e.to_string())?
        }
        None => ParameterSet::default(),
    };
    apply_quick_start(&mut params, &QuickStartPayload::from(args));

    let result = run_simulation(&params).map_err(|e| e.to_string())?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    rendered.map_err(|e| format!("failed to serialize result: {e}"))
}

pub fn router() -> Router {
    Router::new()
        .route("/api/defaults", get(defaults_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .route("/api/affordability", post(affordability_handler))
        .route("/api/compare", post(compare_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "rent-or-buy HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/api/defaults");

    axum::serve(listener, router()).await
}

async fn defaults_handler() -> Response {
    json_response(StatusCode::OK, ParameterSet::default())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<QuickStartPayload>) -> Response {
    simulate_response(&params_from_quick_start(&payload))
}

async fn simulate_post_handler(Json(body): Json<Value>) -> Response {
    match parameters_from_json(body) {
        Ok(params) => simulate_response(&params),
        Err(err) => engine_error_response(err),
    }
}

async fn affordability_handler(Json(body): Json<Value>) -> Response {
    let result = parameters_from_json(body)
        .and_then(|params| evaluate_affordability(&params, &AffordabilityConfig::default()));
    match result {
        Ok(affordability) => json_response(StatusCode::OK, affordability),
        Err(err) => engine_error_response(err),
    }
}

async fn compare_handler(Json(bodies): Json<Vec<Value>>) -> Response {
    json_response(StatusCode::OK, compare_entries(bodies))
}

/// Each body is loaded and run on its own; a body that fails to load or
/// validate yields an error entry at its index.
fn compare_entries(bodies: Vec<Value>) -> Vec<CompareEntry> {
    let scenarios = bodies.into_iter().map(parameters_from_json).collect();
    run_loaded_scenarios(scenarios)
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(result) => CompareEntry {
                result: Some(result),
                error: None,
            },
            Err(err) => {
                tracing::warn!(index, error = %err, "rejected scenario in comparison");
                CompareEntry {
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect()
}

fn simulate_response(params: &ParameterSet) -> Response {
    match run_simulation(params) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(err) => engine_error_response(err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn engine_error_response(err: EngineError) -> Response {
    tracing::warn!(error = %err, "rejected parameter set");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SIMULATION_YEARS;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn payload_from_json(json: &str) -> QuickStartPayload {
        serde_json::from_str(json).expect("payload should parse")
    }

    #[test]
    fn quick_start_payload_parses_web_keys() {
        let payload = payload_from_json(
            r#"{
              "purchasePrice": 900000,
              "equity": 250000,
              "householdIncome": 180000,
              "netRent": 2800,
              "livingExpenses": 70000
            }"#,
        );
        let params = params_from_quick_start(&payload);

        assert_approx(params.purchase.purchase_price, 900_000.0);
        assert_approx(params.quick_start.purchase_price, 900_000.0);
        assert_approx(params.purchase.equity, 250_000.0);
        assert_approx(params.quick_start.household_income, 180_000.0);
        assert_approx(params.rent.net_rent_monthly, 2_800.0);
        assert_approx(params.quick_start.living_expenses, 70_000.0);
    }

    #[test]
    fn quick_start_splits_mortgage_at_two_thirds() {
        let payload = QuickStartPayload {
            purchase_price: Some(900_000.0),
            equity: Some(180_000.0),
            ..QuickStartPayload::default()
        };
        let params = params_from_quick_start(&payload);

        assert_approx(params.mortgage.first_tranche.principal, 600_000.0);
        assert_approx(params.mortgage.second_tranche.principal, 120_000.0);
    }

    #[test]
    fn quick_start_with_large_equity_needs_no_second_tranche() {
        let payload = QuickStartPayload {
            purchase_price: Some(600_000.0),
            equity: Some(300_000.0),
            ..QuickStartPayload::default()
        };
        let params = params_from_quick_start(&payload);

        assert_approx(params.mortgage.first_tranche.principal, 300_000.0);
        assert_eq!(params.mortgage.second_tranche.principal, 0.0);
    }

    #[test]
    fn empty_payload_keeps_defaults() {
        let params = params_from_quick_start(&QuickStartPayload::default());
        assert_eq!(params, ParameterSet::default());
    }

    #[test]
    fn simulate_command_emits_full_result() {
        let args = SimulateArgs {
            household_income: Some(200_000.0),
            ..SimulateArgs::default()
        };
        let json = run_simulate_command(&args).expect("defaults simulate");
        let result: SimulationResult = serde_json::from_str(&json).expect("result parses");

        assert_eq!(result.years.len(), SIMULATION_YEARS as usize + 1);
        assert_approx(result.affordability.monthly_income, 200_000.0 / 12.0);
    }

    #[test]
    fn simulate_command_reports_validation_failure() {
        let args = SimulateArgs {
            household_income: Some(0.0),
            ..SimulateArgs::default()
        };
        let err = run_simulate_command(&args).expect_err("zero income must fail");
        assert!(err.contains("quickStart.householdIncome"));
    }

    #[test]
    fn simulate_command_reports_missing_file() {
        let args = SimulateArgs {
            params: Some(PathBuf::from("/definitely/not/here.json")),
            ..SimulateArgs::default()
        };
        let err = run_simulate_command(&args).expect_err("missing file");
        assert!(err.contains("failed to read"));
    }

    #[test]
    fn simulation_result_serialization_contains_expected_fields() {
        let result = run_simulation(&ParameterSet::default()).expect("valid");
        let json = serde_json::to_string(&result).expect("result should serialize");

        for key in [
            "\"affordability\"",
            "\"utilizationPct\"",
            "\"isAffordable\"",
            "\"breakEvenYear\"",
            "\"wealthBreakEvenYear\"",
            "\"years\"",
            "\"cumulativeOwnershipCost\"",
            "\"netWealthBuy\"",
            "\"kpis\"",
            "\"equityYear10\"",
            "\"initialCashOutlay\"",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
    }

    fn body(params: &ParameterSet) -> Value {
        serde_json::to_value(params).expect("parameters serialize")
    }

    #[test]
    fn compare_entries_keep_errors_per_scenario() {
        let mut broken = ParameterSet::default();
        broken.mortgage.second_tranche_amortization_years = 0;
        let entries = compare_entries(vec![body(&ParameterSet::default()), body(&broken)]);

        assert!(entries[0].result.is_some());
        assert!(entries[0].error.is_none());
        assert!(entries[1].result.is_none());
        let message = entries[1].error.as_deref().unwrap_or_default();
        assert!(message.contains("secondTrancheAmortizationYears"));

        let json = serde_json::to_string(&entries).expect("entries serialize");
        assert!(json.contains("\"error\""));
    }

    #[test]
    fn compare_entries_keep_valid_results_beside_malformed_body() {
        let malformed = serde_json::json!({
            "schemaVersion": 2,
            "rent": { "netRentMonthly": "x" }
        });
        let entries = compare_entries(vec![body(&ParameterSet::default()), malformed]);

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].result,
            Some(run_simulation(&ParameterSet::default()).expect("valid"))
        );
        assert!(entries[1].result.is_none());
        let message = entries[1].error.as_deref().unwrap_or_default();
        assert!(message.starts_with("Malformed"), "{message}");
    }

    #[tokio::test]
    async fn compare_handler_answers_ok_with_mixed_scenarios() {
        let bodies = vec![body(&ParameterSet::default()), Value::String("nope".into())];
        let response = compare_handler(Json(bodies)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn default_simulate_args_match_cli_defaults() {
        let parsed = Cli::try_parse_from(["rent_or_buy", "simulate"]).expect("parses");
        let Command::Simulate(parsed) = parsed.command else {
            panic!("expected simulate");
        };
        let built = SimulateArgs::default();

        assert_eq!(built.log_level, parsed.log_level);
        assert_eq!(built.log_level, "warn");
        assert_eq!(built.pretty, parsed.pretty);
        assert!(built.params.is_none());
    }

    #[test]
    fn cli_parses_simulate_flags() {
        let cli = Cli::try_parse_from([
            "rent_or_buy",
            "simulate",
            "--purchase-price",
            "750000",
            "--net-rent",
            "2100",
            "--pretty",
        ])
        .expect("flags parse");

        match cli.command {
            Command::Simulate(args) => {
                assert_eq!(args.purchase_price, Some(750_000.0));
                assert_eq!(args.net_rent, Some(2_100.0));
                assert!(args.pretty);
                assert_eq!(args.log_level, "warn");
            }
            other => panic!("expected simulate, got {other:?}"),
        }
    }

    #[test]
    fn cli_serve_defaults_to_port_8080() {
        let cli = Cli::try_parse_from(["rent_or_buy", "serve"]).expect("parses");
        match cli.command {
            Command::Serve { port, log_level } => {
                assert_eq!(port, 8080);
                assert_eq!(log_level, "info");
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }
}
