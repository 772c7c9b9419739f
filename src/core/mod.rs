mod affordability;
mod batch;
mod break_even;
mod engine;
mod error;
mod maintenance;
mod migration;
mod summary;
mod types;
mod validate;

pub use affordability::{
    AffordabilityConfig, CALCULATORY_INTEREST_RATE_PCT, MAX_COST_TO_INCOME_PCT,
    evaluate_affordability,
};
pub use batch::{run_loaded_scenarios, run_scenarios};
pub use break_even::{BreakEven, cost_break_even_year, first_crossing, wealth_break_even_year};
pub use engine::{SimulationState, run_simulation, run_simulation_with, simulate_years, step};
pub use error::{EngineError, EngineResult};
pub use maintenance::{maintenance_cost, simple_maintenance_cost};
pub use migration::{parameters_from_json, parameters_from_str};
pub use summary::{baseline_record, build_kpis, closing_costs, initial_cash_outlay};
pub use types::{
    AffordabilityResult, CURRENT_SCHEMA_VERSION, KpiSummary, LocationQuality, MacroRates,
    MaintenanceMode, MaintenanceParams, MortgageParams, OwnershipCosts, ParameterSet,
    PurchaseParams, QuickStart, Renovation, RentParams, SIMULATION_YEARS, SimulationResult,
    TaxParams, Tranche, YearlyRecord,
};
pub use validate::validate;
