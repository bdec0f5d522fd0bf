use crate::row::{Month, MonthRow};

// Exchange rate and loan principals. The primary loan is sanctioned in INR
// and converted once at a fixed approximate rate; no live rate lookup.
pub const USD_TO_INR: f64 = 83.0;
pub const PRIMARY_LOAN_INR: f64 = 4_700_000.0;
pub const PRIMARY_LOAN_USD: f64 = PRIMARY_LOAN_INR / USD_TO_INR;
pub const SECONDARY_LOAN_USD: f64 = 63_000.0;

// Yearly expenses in USD.
pub const YEARLY_TUITION: f64 = 34_011.0;
pub const YEARLY_ROOM_AND_BOARD: f64 = 12_431.0;
pub const YEARLY_HEALTH_INSURANCE: f64 = 1_916.0;
pub const YEARLY_MISCELLANEOUS: f64 = 2_470.0;
pub const YEARLY_TOTAL: f64 = 50_828.0;

// Tuition and insurance are billed per semester, two semesters a year.
pub const SEMESTER_FEE: f64 = YEARLY_TUITION / 2.0;
pub const SEMESTER_HEALTH_INSURANCE: f64 = YEARLY_HEALTH_INSURANCE / 2.0;

// Monthly living expense plan in USD.
pub const MONTHLY_RENT: f64 = 390.0;
pub const MONTHLY_UTILITIES: f64 = 70.0;
pub const MONTHLY_GROCERIES_MISC: f64 = 200.0;
pub const MONTHLY_LIVING_TOTAL: f64 = MONTHLY_RENT + MONTHLY_UTILITIES + MONTHLY_GROCERIES_MISC;

// Each semester's tuition + insurance is split between the two loans at a
// fixed ratio; the shares must sum to 1.
pub const PRIMARY_LOAN_SHARE: f64 = 0.545;
pub const SECONDARY_LOAN_SHARE: f64 = 0.455;

/// Monthly interest rate on the secondary loan's running balance (1.2%).
pub const MONTHLY_INTEREST_RATE: f64 = 0.012;

/// Cash on hand at the start of the study period.
pub const STARTING_BALANCE: f64 = 5_000.0;

// Study period: first of each month, both endpoints inclusive.
pub const PLAN_START: Month = Month { year: 2025, month: 8 };
pub const PLAN_END: Month = Month { year: 2027, month: 8 };

/// The four months on which semester charges are posted. All must fall
/// inside [PLAN_START, PLAN_END]; that is a configuration invariant, not a
/// runtime check.
pub const SEMESTER_START_MONTHS: [Month; 4] = [
    Month { year: 2025, month: 8 },
    Month { year: 2026, month: 1 },
    Month { year: 2026, month: 8 },
    Month { year: 2027, month: 1 },
];

/// Build the default budget table for the fixed study period.
///
/// Every month gets the fixed living expense and zero income; the four
/// semester-start months (matched by exact month+year identity) additionally
/// carry the semester fee, the insurance premium, and their split across the
/// two loans. All simulator-computed columns start at zero.
///
/// Deterministic: depends only on the constants above.
pub fn seed_table() -> Vec<MonthRow> {
    let mut rows = Vec::new();
    let mut month = PLAN_START;
    while month <= PLAN_END {
        rows.push(MonthRow::new(month, MONTHLY_LIVING_TOTAL));
        month = month.succ();
    }

    for row in rows.iter_mut() {
        if SEMESTER_START_MONTHS.contains(&row.month) {
            let charges = SEMESTER_FEE + SEMESTER_HEALTH_INSURANCE;
            row.semester_fee = SEMESTER_FEE;
            row.health_insurance = SEMESTER_HEALTH_INSURANCE;
            row.covered_by_primary = charges * PRIMARY_LOAN_SHARE;
            row.covered_by_secondary = charges * SECONDARY_LOAN_SHARE;
        }
    }

    rows
}
