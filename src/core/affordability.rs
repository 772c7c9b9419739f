use super::engine::linear_amortization;
use super::error::EngineResult;
use super::maintenance::simple_maintenance_cost;
use super::types::{AffordabilityResult, ParameterSet};
use super::validate::validate;

/// Stress-test rate charged on the whole mortgage when judging
/// affordability. Unrelated to the contracted tranche rates.
pub const CALCULATORY_INTEREST_RATE_PCT: f64 = 5.0;

/// Maximum share of gross income that housing may take (the one-third rule).
pub const MAX_COST_TO_INCOME_PCT: f64 = 33.33;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityConfig {
    pub calculatory_interest_rate_pct: f64,
    pub max_cost_to_income_pct: f64,
}

impl Default for AffordabilityConfig {
    fn default() -> Self {
        Self {
            calculatory_interest_rate_pct: CALCULATORY_INTEREST_RATE_PCT,
            max_cost_to_income_pct: MAX_COST_TO_INCOME_PCT,
        }
    }
}

pub fn evaluate_affordability(
    params: &ParameterSet,
    config: &AffordabilityConfig,
) -> EngineResult<AffordabilityResult> {
    validate(params)?;
    Ok(assess(params, config))
}

/// Single-shot check on today's costs. Callers must have validated
/// `params`; income is assumed positive.
pub(crate) fn assess(params: &ParameterSet, config: &AffordabilityConfig) -> AffordabilityResult {
    let purchase_price = params.purchase.purchase_price;
    let ownership = &params.ownership;

    let calculatory_interest =
        params.mortgage.total_principal() * config.calculatory_interest_rate_pct / 100.0;
    let amortization = linear_amortization(&params.mortgage, 1);
    let running_costs = ownership.utilities_annual
        + ownership.insurance_annual
        + ownership.other_annual()
        + simple_maintenance_cost(&ownership.maintenance, purchase_price);

    let annual_cost = calculatory_interest + amortization + running_costs;
    let monthly_cost = annual_cost / 12.0;
    let monthly_income = params.quick_start.household_income / 12.0;
    let utilization_pct = monthly_cost / monthly_income * 100.0;

    AffordabilityResult {
        monthly_income,
        monthly_cost,
        required_monthly_income: monthly_cost / (config.max_cost_to_income_pct / 100.0),
        is_affordable: utilization_pct <= config.max_cost_to_income_pct,
        utilization_pct,
    }
}
