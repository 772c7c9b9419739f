use serde::{Deserialize, Serialize};

/// Schema version written by this build. Older shapes are upgraded in
/// `migration` before they reach the engine.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Number of simulated years after the baseline year 0.
pub const SIMULATION_YEARS: u32 = 50;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationQuality {
    Poor,
    #[default]
    Average,
    Good,
    Prime,
}

impl LocationQuality {
    /// Long-run appreciation assumption offered to the form when nothing
    /// more specific is known.
    pub fn suggested_appreciation_pct(self) -> f64 {
        match self {
            LocationQuality::Poor => 0.5,
            LocationQuality::Average => 1.5,
            LocationQuality::Good => 2.0,
            LocationQuality::Prime => 2.5,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceMode {
    #[default]
    Simple,
    Detailed,
}

/// Short-form household facts.
///
/// `purchase_price` and `equity` only mirror the form fields. The engine reads
/// [`PurchaseParams`]; the quick-start overlay keeps both in step, while a raw
/// parameter set that changes only these two mirrors leaves the projection
/// unchanged. Income and living expenses are read from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickStart {
    pub purchase_price: f64,
    pub equity: f64,
    pub household_income: f64,
    pub living_expenses: f64,
    pub location_quality: LocationQuality,
}

impl Default for QuickStart {
    fn default() -> Self {
        Self {
            purchase_price: 1_000_000.0,
            equity: 200_000.0,
            household_income: 150_000.0,
            living_expenses: 60_000.0,
            location_quality: LocationQuality::Average,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RentParams {
    pub net_rent_monthly: f64,
    pub utilities_monthly: f64,
    pub insurance_monthly: f64,
    pub annual_increase_pct: f64,
}

impl Default for RentParams {
    fn default() -> Self {
        Self {
            net_rent_monthly: 2_500.0,
            utilities_monthly: 250.0,
            insurance_monthly: 30.0,
            annual_increase_pct: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PurchaseParams {
    pub purchase_price: f64,
    pub equity: f64,
    pub transfer_tax_pct: f64,
    pub notary_fee_pct: f64,
    pub land_registry_fee_pct: f64,
    pub mortgage_processing_fee: Option<f64>,
    pub valuation_fee: Option<f64>,
}

impl Default for PurchaseParams {
    fn default() -> Self {
        Self {
            purchase_price: 1_000_000.0,
            equity: 200_000.0,
            transfer_tax_pct: 1.0,
            notary_fee_pct: 0.2,
            land_registry_fee_pct: 0.1,
            mortgage_processing_fee: None,
            valuation_fee: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tranche {
    pub principal: f64,
    pub rate_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MortgageParams {
    pub first_tranche: Tranche,
    pub second_tranche: Tranche,
    pub second_tranche_amortization_years: u32,
}

impl MortgageParams {
    pub fn total_principal(&self) -> f64 {
        self.first_tranche.principal + self.second_tranche.principal
    }
}

impl Default for MortgageParams {
    fn default() -> Self {
        Self {
            first_tranche: Tranche {
                principal: 650_000.0,
                rate_pct: 1.5,
            },
            second_tranche: Tranche {
                principal: 150_000.0,
                rate_pct: 1.5,
            },
            second_tranche_amortization_years: 15,
        }
    }
}

/// A recurring one-off renovation: `amount` falls due in `first_year` and
/// every `interval_years` after that. An interval of 0 means it happens once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Renovation {
    pub amount: f64,
    pub first_year: u32,
    pub interval_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaintenanceParams {
    pub mode: MaintenanceMode,
    pub simple_rate_pct: f64,
    pub roof: Renovation,
    pub facade: Renovation,
    pub heating: Renovation,
    pub kitchen_bath: Renovation,
}

impl MaintenanceParams {
    pub fn renovations(&self) -> [(&'static str, Renovation); 4] {
        [
            ("roof", self.roof),
            ("facade", self.facade),
            ("heating", self.heating),
            ("kitchenBath", self.kitchen_bath),
        ]
    }
}

impl Default for MaintenanceParams {
    fn default() -> Self {
        Self {
            mode: MaintenanceMode::Simple,
            simple_rate_pct: 1.0,
            roof: Renovation {
                amount: 40_000.0,
                first_year: 30,
                interval_years: 30,
            },
            facade: Renovation {
                amount: 30_000.0,
                first_year: 25,
                interval_years: 25,
            },
            heating: Renovation {
                amount: 25_000.0,
                first_year: 20,
                interval_years: 20,
            },
            kitchen_bath: Renovation {
                amount: 35_000.0,
                first_year: 15,
                interval_years: 20,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OwnershipCosts {
    pub utilities_annual: f64,
    pub insurance_annual: f64,
    pub maintenance: MaintenanceParams,
    pub parking_annual: Option<f64>,
    pub condo_fees_annual: Option<f64>,
    pub renovation_reserve_annual: Option<f64>,
}

impl OwnershipCosts {
    /// Parking, condo fees and renovation reserve, today's money.
    pub fn other_annual(&self) -> f64 {
        self.parking_annual.unwrap_or(0.0)
            + self.condo_fees_annual.unwrap_or(0.0)
            + self.renovation_reserve_annual.unwrap_or(0.0)
    }
}

impl Default for OwnershipCosts {
    fn default() -> Self {
        Self {
            utilities_annual: 3_000.0,
            insurance_annual: 800.0,
            maintenance: MaintenanceParams::default(),
            parking_annual: None,
            condo_fees_annual: None,
            renovation_reserve_annual: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxParams {
    pub marginal_rate_pct: f64,
    pub interest_deductible: bool,
    pub imputed_value_taxed: bool,
    pub imputed_value_rate_pct: f64,
}

impl Default for TaxParams {
    fn default() -> Self {
        Self {
            marginal_rate_pct: 30.0,
            interest_deductible: true,
            imputed_value_taxed: true,
            imputed_value_rate_pct: 3.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MacroRates {
    pub appreciation_pct: f64,
    pub investment_return_pct: f64,
    pub inflation_pct: f64,
    pub invest_leftover_rent: bool,
    pub invest_leftover_buy: bool,
}

impl Default for MacroRates {
    fn default() -> Self {
        Self {
            appreciation_pct: LocationQuality::Average.suggested_appreciation_pct(),
            investment_return_pct: 4.0,
            inflation_pct: 1.0,
            invest_leftover_rent: true,
            invest_leftover_buy: true,
        }
    }
}

/// Everything one projection run needs. Owned by the caller and never
/// mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterSet {
    pub schema_version: u32,
    pub quick_start: QuickStart,
    pub rent: RentParams,
    pub purchase: PurchaseParams,
    pub mortgage: MortgageParams,
    pub ownership: OwnershipCosts,
    pub tax: TaxParams,
    pub rates: MacroRates,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            quick_start: QuickStart::default(),
            rent: RentParams::default(),
            purchase: PurchaseParams::default(),
            mortgage: MortgageParams::default(),
            ownership: OwnershipCosts::default(),
            tax: TaxParams::default(),
            rates: MacroRates::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRecord {
    pub year: u32,

    pub rent_cost: f64,
    pub rent_utilities: f64,
    pub rent_insurance: f64,
    pub total_rent_cost: f64,
    pub cumulative_rent_cost: f64,

    pub mortgage_interest: f64,
    pub amortization: f64,
    pub ownership_utilities: f64,
    pub ownership_insurance: f64,
    pub maintenance: f64,
    pub other_ownership_costs: f64,
    pub total_ownership_cost: f64,
    pub cumulative_ownership_cost: f64,

    pub tax_saving: f64,
    pub tax_cost: f64,
    pub net_tax_effect: f64,

    pub property_value: f64,
    pub mortgage_balance: f64,
    pub net_equity: f64,
    pub alternative_investment_value: f64,
    pub net_wealth_rent: f64,
    pub net_wealth_buy: f64,

    pub income: f64,
    pub living_expenses: f64,
    pub savings_rent: f64,
    pub savings_buy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityResult {
    pub monthly_income: f64,
    pub monthly_cost: f64,
    pub required_monthly_income: f64,
    pub is_affordable: bool,
    pub utilization_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub monthly_rent: f64,
    pub monthly_ownership_cost: f64,
    pub total_mortgage: f64,
    pub closing_costs: f64,
    pub initial_cash_outlay: f64,
    pub equity_year_10: Option<f64>,
    pub equity_year_20: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub affordability: AffordabilityResult,
    pub break_even_year: Option<u32>,
    pub wealth_break_even_year: Option<u32>,
    pub years: Vec<YearlyRecord>,
    pub kpis: KpiSummary,
}
