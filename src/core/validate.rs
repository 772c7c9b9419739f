use super::error::{EngineError, EngineResult};
use super::types::{MaintenanceMode, ParameterSet};

/// Checks a parameter set once, before the year loop. Every failure names
/// the offending field using its JSON path.
pub fn validate(params: &ParameterSet) -> EngineResult<()> {
    let income = params.quick_start.household_income;
    if !income.is_finite() || income <= 0.0 {
        return Err(EngineError::invalid(
            "quickStart.householdIncome",
            "must be > 0",
        ));
    }

    let mortgage = &params.mortgage;
    if mortgage.second_tranche.principal > 0.0 && mortgage.second_tranche_amortization_years == 0
    {
        return Err(EngineError::invalid(
            "mortgage.secondTrancheAmortizationYears",
            "must be > 0 when the second tranche is non-zero",
        ));
    }

    let ownership = &params.ownership;
    for (name, amount) in [
        ("purchase.purchasePrice", params.purchase.purchase_price),
        ("purchase.equity", params.purchase.equity),
        ("quickStart.livingExpenses", params.quick_start.living_expenses),
        ("mortgage.firstTranche.principal", mortgage.first_tranche.principal),
        ("mortgage.secondTranche.principal", mortgage.second_tranche.principal),
        ("rent.netRentMonthly", params.rent.net_rent_monthly),
        ("rent.utilitiesMonthly", params.rent.utilities_monthly),
        ("rent.insuranceMonthly", params.rent.insurance_monthly),
        ("ownership.utilitiesAnnual", ownership.utilities_annual),
        ("ownership.insuranceAnnual", ownership.insurance_annual),
        (
            "ownership.parkingAnnual",
            ownership.parking_annual.unwrap_or(0.0),
        ),
        (
            "ownership.condoFeesAnnual",
            ownership.condo_fees_annual.unwrap_or(0.0),
        ),
        (
            "ownership.renovationReserveAnnual",
            ownership.renovation_reserve_annual.unwrap_or(0.0),
        ),
        (
            "purchase.mortgageProcessingFee",
            params.purchase.mortgage_processing_fee.unwrap_or(0.0),
        ),
        (
            "purchase.valuationFee",
            params.purchase.valuation_fee.unwrap_or(0.0),
        ),
    ] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(EngineError::invalid(name, "must be >= 0"));
        }
    }

    for (name, rate) in [
        ("mortgage.firstTranche.ratePct", mortgage.first_tranche.rate_pct),
        ("mortgage.secondTranche.ratePct", mortgage.second_tranche.rate_pct),
        ("purchase.transferTaxPct", params.purchase.transfer_tax_pct),
        ("purchase.notaryFeePct", params.purchase.notary_fee_pct),
        ("purchase.landRegistryFeePct", params.purchase.land_registry_fee_pct),
        (
            "ownership.maintenance.simpleRatePct",
            ownership.maintenance.simple_rate_pct,
        ),
        ("tax.marginalRatePct", params.tax.marginal_rate_pct),
        ("tax.imputedValueRatePct", params.tax.imputed_value_rate_pct),
    ] {
        if !(0.0..=100.0).contains(&rate) {
            return Err(EngineError::invalid(name, "must be between 0 and 100"));
        }
    }

    for (name, rate) in [
        ("rent.annualIncreasePct", params.rent.annual_increase_pct),
        ("rates.appreciationPct", params.rates.appreciation_pct),
        ("rates.investmentReturnPct", params.rates.investment_return_pct),
        ("rates.inflationPct", params.rates.inflation_pct),
    ] {
        if !rate.is_finite() || rate <= -100.0 || rate > 100.0 {
            return Err(EngineError::invalid(name, "must be > -100 and <= 100"));
        }
    }

    if ownership.maintenance.mode == MaintenanceMode::Detailed {
        for (name, renovation) in ownership.maintenance.renovations() {
            if !renovation.amount.is_finite() || renovation.amount < 0.0 {
                return Err(EngineError::invalid(
                    format!("ownership.maintenance.{name}.amount"),
                    "must be >= 0",
                ));
            }
            if renovation.amount > 0.0 && renovation.first_year == 0 {
                return Err(EngineError::invalid(
                    format!("ownership.maintenance.{name}.firstYear"),
                    "must be >= 1",
                ));
            }
        }
    }

    Ok(())
}
