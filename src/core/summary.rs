use super::engine::{SimulationState, alternative_investment_value};
use super::types::{
    AffordabilityResult, KpiSummary, ParameterSet, PurchaseParams, SimulationResult, YearlyRecord,
};

/// Transaction fees plus the optional processing and valuation fees. The
/// only place closing costs are computed.
pub fn closing_costs(purchase: &PurchaseParams) -> f64 {
    let fee_pct =
        purchase.transfer_tax_pct + purchase.notary_fee_pct + purchase.land_registry_fee_pct;
    purchase.purchase_price * fee_pct / 100.0
        + purchase.mortgage_processing_fee.unwrap_or(0.0)
        + purchase.valuation_fee.unwrap_or(0.0)
}

pub fn initial_cash_outlay(purchase: &PurchaseParams) -> f64 {
    purchase.equity + closing_costs(purchase)
}

/// Year-0 record: no costs yet, wealth and property at their starting values.
pub fn baseline_record(params: &ParameterSet) -> YearlyRecord {
    let state = SimulationState::initial(params);
    let net_equity = state.property_value - state.mortgage_balance;

    YearlyRecord {
        year: 0,
        rent_cost: 0.0,
        rent_utilities: 0.0,
        rent_insurance: 0.0,
        total_rent_cost: 0.0,
        cumulative_rent_cost: 0.0,
        mortgage_interest: 0.0,
        amortization: 0.0,
        ownership_utilities: 0.0,
        ownership_insurance: 0.0,
        maintenance: 0.0,
        other_ownership_costs: 0.0,
        total_ownership_cost: 0.0,
        cumulative_ownership_cost: 0.0,
        tax_saving: 0.0,
        tax_cost: 0.0,
        net_tax_effect: 0.0,
        property_value: state.property_value,
        mortgage_balance: state.mortgage_balance,
        net_equity,
        alternative_investment_value: alternative_investment_value(params, 0),
        net_wealth_rent: state.rent_cash,
        net_wealth_buy: net_equity + state.buy_cash,
        income: 0.0,
        living_expenses: 0.0,
        savings_rent: 0.0,
        savings_buy: 0.0,
    }
}

pub fn build_kpis(params: &ParameterSet, years: &[YearlyRecord]) -> KpiSummary {
    let first_year_cost = years
        .iter()
        .find(|record| record.year == 1)
        .map(|record| record.total_ownership_cost)
        .unwrap_or(0.0);

    KpiSummary {
        monthly_rent: params.rent.net_rent_monthly,
        monthly_ownership_cost: first_year_cost / 12.0,
        total_mortgage: params.mortgage.total_principal(),
        closing_costs: closing_costs(&params.purchase),
        initial_cash_outlay: initial_cash_outlay(&params.purchase),
        equity_year_10: years.get(10).map(|record| record.net_equity),
        equity_year_20: years.get(20).map(|record| record.net_equity),
    }
}

/// Assembles the caller-facing result. `simulated` holds years 1.. only;
/// the baseline is prepended here so `years[i].year == i`.
pub fn aggregate(
    params: &ParameterSet,
    affordability: AffordabilityResult,
    break_even_year: Option<u32>,
    wealth_break_even_year: Option<u32>,
    simulated: Vec<YearlyRecord>,
) -> SimulationResult {
    let mut years = Vec::with_capacity(simulated.len() + 1);
    years.push(baseline_record(params));
    years.extend(simulated);

    let kpis = build_kpis(params, &years);
    SimulationResult {
        affordability,
        break_even_year,
        wealth_break_even_year,
        years,
        kpis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::run_simulation;
    use crate::core::types::SIMULATION_YEARS;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_params() -> ParameterSet {
        let mut params = ParameterSet::default();
        params.purchase.purchase_price = 1_000_000.0;
        params.purchase.equity = 200_000.0;
        params.purchase.transfer_tax_pct = 1.0;
        params.purchase.notary_fee_pct = 0.5;
        params.purchase.land_registry_fee_pct = 0.5;
        params.purchase.mortgage_processing_fee = Some(1_000.0);
        params.purchase.valuation_fee = Some(500.0);
        params
    }

    #[test]
    fn closing_costs_combine_percentages_and_fixed_fees() {
        let params = sample_params();
        assert_approx(closing_costs(&params.purchase), 20_000.0 + 1_500.0);
        assert_approx(initial_cash_outlay(&params.purchase), 221_500.0);
    }

    #[test]
    fn optional_fees_default_to_zero() {
        let mut params = sample_params();
        params.purchase.mortgage_processing_fee = None;
        params.purchase.valuation_fee = None;
        assert_approx(closing_costs(&params.purchase), 20_000.0);
    }

    #[test]
    fn baseline_has_no_costs_and_initial_wealth() {
        let params = sample_params();
        let baseline = baseline_record(&params);

        assert_eq!(baseline.year, 0);
        assert_eq!(baseline.cumulative_rent_cost, 0.0);
        assert_eq!(baseline.cumulative_ownership_cost, 0.0);
        assert_eq!(baseline.total_ownership_cost, 0.0);
        assert_approx(baseline.property_value, 1_000_000.0);
        assert_approx(baseline.mortgage_balance, 800_000.0);
        assert_approx(baseline.net_equity, 200_000.0);
        assert_approx(baseline.alternative_investment_value, 200_000.0);
        assert_approx(baseline.net_wealth_rent, 221_500.0);
        assert_approx(baseline.net_wealth_buy, 200_000.0);
    }

    #[test]
    fn baseline_and_simulation_start_from_the_same_cash() {
        let params = sample_params();
        let baseline = baseline_record(&params);
        let state = SimulationState::initial(&params);
        assert_eq!(baseline.net_wealth_rent.to_bits(), state.rent_cash.to_bits());
        assert_eq!(
            baseline.mortgage_balance.to_bits(),
            state.mortgage_balance.to_bits()
        );
    }

    #[test]
    fn kpis_read_first_year_and_equity_snapshots() {
        let params = sample_params();
        let result = run_simulation(&params).expect("valid");

        assert_eq!(result.years.len(), SIMULATION_YEARS as usize + 1);
        assert_approx(result.kpis.monthly_rent, params.rent.net_rent_monthly);
        assert_approx(
            result.kpis.monthly_ownership_cost,
            result.years[1].total_ownership_cost / 12.0,
        );
        assert_approx(result.kpis.total_mortgage, 800_000.0);
        assert_approx(result.kpis.initial_cash_outlay, 221_500.0);
        assert_eq!(result.kpis.equity_year_10, Some(result.years[10].net_equity));
        assert_eq!(result.kpis.equity_year_20, Some(result.years[20].net_equity));
    }

    #[test]
    fn kpis_tolerate_short_sequences() {
        let params = sample_params();
        let years = vec![baseline_record(&params)];
        let kpis = build_kpis(&params, &years);
        assert_eq!(kpis.equity_year_10, None);
        assert_eq!(kpis.equity_year_20, None);
        assert_eq!(kpis.monthly_ownership_cost, 0.0);
    }
}
