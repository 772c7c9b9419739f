use super::types::{MaintenanceMode, MaintenanceParams, Renovation};

impl Renovation {
    pub fn is_due(&self, year: u32) -> bool {
        if year < self.first_year {
            return false;
        }
        match (year - self.first_year).checked_rem(self.interval_years) {
            Some(rest) => rest == 0,
            None => year == self.first_year,
        }
    }

    pub fn cost_in_year(&self, year: u32) -> f64 {
        if self.is_due(year) { self.amount } else { 0.0 }
    }
}

/// Upkeep for `year` in today's money. Exactly one strategy contributes,
/// selected by `params.mode`; inflation is applied by the caller.
pub fn maintenance_cost(params: &MaintenanceParams, purchase_price: f64, year: u32) -> f64 {
    match params.mode {
        MaintenanceMode::Simple => simple_maintenance_cost(params, purchase_price),
        MaintenanceMode::Detailed => params
            .renovations()
            .iter()
            .map(|(_, renovation)| renovation.cost_in_year(year))
            .sum(),
    }
}

/// Flat percentage of the purchase price. Also used by the affordability
/// check regardless of the configured mode.
pub fn simple_maintenance_cost(params: &MaintenanceParams, purchase_price: f64) -> f64 {
    purchase_price * params.simple_rate_pct / 100.0
}
