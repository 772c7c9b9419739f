use super::affordability::{AffordabilityConfig, assess};
use super::break_even::BreakEven;
use super::error::EngineResult;
use super::maintenance::maintenance_cost;
use super::summary::{aggregate, initial_cash_outlay};
use super::types::{
    MortgageParams, ParameterSet, SIMULATION_YEARS, SimulationResult, YearlyRecord,
};
use super::validate::validate;

/// Accumulators carried from one simulated year to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub mortgage_balance: f64,
    pub property_value: f64,
    pub cumulative_rent_cost: f64,
    pub cumulative_ownership_cost: f64,
    pub monthly_rent: f64,
    pub rent_cash: f64,
    pub buy_cash: f64,
}

impl SimulationState {
    /// State on the day of purchase. The renting household keeps the cash
    /// the buyer spends up front.
    pub fn initial(params: &ParameterSet) -> Self {
        Self {
            mortgage_balance: params.mortgage.total_principal(),
            property_value: params.purchase.purchase_price,
            cumulative_rent_cost: 0.0,
            cumulative_ownership_cost: 0.0,
            monthly_rent: params.rent.net_rent_monthly,
            rent_cash: initial_cash_outlay(&params.purchase),
            buy_cash: 0.0,
        }
    }
}

/// Weighted average of the contract rates, weighted by original principal,
/// as a fraction. It is charged on the whole remaining balance, so the
/// weighting does not shift once the second tranche is repaid.
pub(crate) fn blended_rate(mortgage: &MortgageParams) -> f64 {
    let total = mortgage.total_principal();
    if total <= 0.0 {
        return 0.0;
    }
    let weighted = mortgage.first_tranche.principal * mortgage.first_tranche.rate_pct
        + mortgage.second_tranche.principal * mortgage.second_tranche.rate_pct;
    weighted / total / 100.0
}

/// Only the second tranche amortizes, linearly, during its horizon.
pub(crate) fn linear_amortization(mortgage: &MortgageParams, year: u32) -> f64 {
    let principal = mortgage.second_tranche.principal;
    let years = mortgage.second_tranche_amortization_years;
    if principal > 0.0 && years > 0 && year <= years {
        principal / years as f64
    } else {
        0.0
    }
}

fn pct(value: f64) -> f64 {
    value / 100.0
}

/// Advances `state` by one year. Pure: the same inputs always produce the
/// same next state and record.
///
/// `params` must already have passed [`validate`]; non-finite or out-of-range
/// inputs propagate into the record unchecked. [`run_simulation`] validates
/// first.
pub fn step(
    state: &SimulationState,
    params: &ParameterSet,
    year: u32,
) -> (SimulationState, YearlyRecord) {
    let rates = &params.rates;
    let ownership = &params.ownership;
    let purchase_price = params.purchase.purchase_price;

    // Year 1 is priced in today's money.
    let inflation = (1.0 + pct(rates.inflation_pct)).powi(year as i32 - 1);

    let rent_cost = state.monthly_rent * 12.0;
    let rent_utilities = params.rent.utilities_monthly * 12.0 * inflation;
    let rent_insurance = params.rent.insurance_monthly * 12.0 * inflation;
    let total_rent_cost = rent_cost + rent_utilities + rent_insurance;
    let cumulative_rent_cost = state.cumulative_rent_cost + total_rent_cost;
    let monthly_rent = state.monthly_rent * (1.0 + pct(params.rent.annual_increase_pct));

    let mortgage_interest = state.mortgage_balance * blended_rate(&params.mortgage);
    let amortization = linear_amortization(&params.mortgage, year);
    let mortgage_balance = (state.mortgage_balance - amortization).max(0.0);

    let ownership_utilities = ownership.utilities_annual * inflation;
    let ownership_insurance = ownership.insurance_annual * inflation;
    let maintenance = maintenance_cost(&ownership.maintenance, purchase_price, year) * inflation;
    let other_ownership_costs = ownership.other_annual() * inflation;
    let total_ownership_cost = mortgage_interest
        + amortization
        + ownership_utilities
        + ownership_insurance
        + maintenance
        + other_ownership_costs;
    let cumulative_ownership_cost = state.cumulative_ownership_cost + total_ownership_cost;

    let marginal_rate = pct(params.tax.marginal_rate_pct);
    let tax_saving = if params.tax.interest_deductible {
        mortgage_interest * marginal_rate
    } else {
        0.0
    };
    let tax_cost = if params.tax.imputed_value_taxed {
        state.property_value * pct(params.tax.imputed_value_rate_pct) * marginal_rate
    } else {
        0.0
    };
    let net_tax_effect = tax_saving - tax_cost;

    // Equity for this year already reflects this year's appreciation.
    let property_value = state.property_value * (1.0 + pct(rates.appreciation_pct));
    let net_equity = property_value - mortgage_balance;

    let income = params.quick_start.household_income * inflation;
    let living_expenses = params.quick_start.living_expenses * inflation;
    let savings_rent = income - living_expenses - total_rent_cost;
    let savings_buy = income - living_expenses - total_ownership_cost + net_tax_effect;

    let investment_return = pct(rates.investment_return_pct);
    let rent_cash = grow_cash(state.rent_cash, rates.invest_leftover_rent, investment_return)
        + savings_rent;
    let buy_cash =
        grow_cash(state.buy_cash, rates.invest_leftover_buy, investment_return) + savings_buy;

    let record = YearlyRecord {
        year,
        rent_cost,
        rent_utilities,
        rent_insurance,
        total_rent_cost,
        cumulative_rent_cost,
        mortgage_interest,
        amortization,
        ownership_utilities,
        ownership_insurance,
        maintenance,
        other_ownership_costs,
        total_ownership_cost,
        cumulative_ownership_cost,
        tax_saving,
        tax_cost,
        net_tax_effect,
        property_value,
        mortgage_balance,
        net_equity,
        alternative_investment_value: alternative_investment_value(params, year),
        net_wealth_rent: rent_cash,
        net_wealth_buy: net_equity + buy_cash,
        income,
        living_expenses,
        savings_rent,
        savings_buy,
    };

    let next = SimulationState {
        mortgage_balance,
        property_value,
        cumulative_rent_cost,
        cumulative_ownership_cost,
        monthly_rent,
        rent_cash,
        buy_cash,
    };
    (next, record)
}

fn grow_cash(cash: f64, invest: bool, rate: f64) -> f64 {
    if invest && cash > 0.0 {
        cash * (1.0 + rate)
    } else {
        cash
    }
}

/// What the original equity would be worth had it been invested instead.
pub(crate) fn alternative_investment_value(params: &ParameterSet, year: u32) -> f64 {
    params.purchase.equity * (1.0 + pct(params.rates.investment_return_pct)).powi(year as i32)
}

/// Runs years 1..=SIMULATION_YEARS from `initial`, returning one record per
/// year. Break-even years are tracked inline with sticky flags.
///
/// Like [`step`], this expects validated `params`.
pub fn simulate_years(
    params: &ParameterSet,
    initial: SimulationState,
) -> (Vec<YearlyRecord>, BreakEven, BreakEven) {
    let mut records = Vec::with_capacity(SIMULATION_YEARS as usize);
    let mut cost_break_even = BreakEven::default();
    let mut wealth_break_even = BreakEven::default();

    let mut state = initial;
    for year in 1..=SIMULATION_YEARS {
        let (next, record) = step(&state, params, year);
        cost_break_even.observe(
            year,
            record.cumulative_ownership_cost < record.cumulative_rent_cost,
        );
        wealth_break_even.observe(year, record.net_wealth_buy > record.net_wealth_rent);
        records.push(record);
        state = next;
    }

    (records, cost_break_even, wealth_break_even)
}

pub fn run_simulation(params: &ParameterSet) -> EngineResult<SimulationResult> {
    run_simulation_with(params, &AffordabilityConfig::default())
}

pub fn run_simulation_with(
    params: &ParameterSet,
    config: &AffordabilityConfig,
) -> EngineResult<SimulationResult> {
    validate(params)?;

    let affordability = assess(params, config);
    let (years, cost_break_even, wealth_break_even) =
        simulate_years(params, SimulationState::initial(params));
    let result = aggregate(
        params,
        affordability,
        cost_break_even.year(),
        wealth_break_even.year(),
        years,
    );

    tracing::debug!(
        break_even_year = ?result.break_even_year,
        wealth_break_even_year = ?result.wealth_break_even_year,
        utilization_pct = result.affordability.utilization_pct,
        affordable = result.affordability.is_affordable,
        "simulation finished"
    );
    Ok(result)
}
