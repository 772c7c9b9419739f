use super::types::YearlyRecord;

/// First year a condition held. Set at most once; later observations never
/// move it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakEven {
    year: Option<u32>,
}

impl BreakEven {
    pub fn observe(&mut self, year: u32, crossed: bool) {
        if self.year.is_none() && crossed {
            self.year = Some(year);
        }
    }

    pub fn year(&self) -> Option<u32> {
        self.year
    }
}

/// First year in `points` (year, left, right) where `left < right`.
pub fn first_crossing<I>(points: I) -> Option<u32>
where
    I: IntoIterator<Item = (u32, f64, f64)>,
{
    let mut break_even = BreakEven::default();
    for (year, left, right) in points {
        break_even.observe(year, left < right);
        if break_even.year().is_some() {
            break;
        }
    }
    break_even.year()
}

/// First simulated year whose cumulative ownership cost is strictly below
/// cumulative rent. The year-0 baseline is never a candidate.
pub fn cost_break_even_year(records: &[YearlyRecord]) -> Option<u32> {
    first_crossing(
        records
            .iter()
            .filter(|record| record.year > 0)
            .map(|record| {
                (
                    record.year,
                    record.cumulative_ownership_cost,
                    record.cumulative_rent_cost,
                )
            }),
    )
}

/// First simulated year in which owning leaves strictly more net wealth
/// than renting.
pub fn wealth_break_even_year(records: &[YearlyRecord]) -> Option<u32> {
    first_crossing(
        records
            .iter()
            .filter(|record| record.year > 0)
            .map(|record| (record.year, record.net_wealth_rent, record.net_wealth_buy)),
    )
}
