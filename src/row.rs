use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Column headers of the annotated table, in display and export order.
///
/// The CSV/XLSX exporters and the grid page both rely on this order, so it is
/// defined once here next to the row type.
pub const COLUMNS: [&str; 11] = [
    "Month",
    "Living Expense ($)",
    "Income ($)",
    "Semester Fee ($)",
    "Health Insurance ($)",
    "Covered by Primary Loan ($)",
    "Covered by Secondary Loan ($)",
    "Living Borrowed from Secondary ($)",
    "Cumulative Secondary Borrowed ($)",
    "Interest on Secondary ($)",
    "Net Monthly Balance ($)",
];

/// A calendar month identity (year + month number, 1-12).
///
/// Derived `Ord` compares `(year, month)` lexicographically, which is
/// chronological order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Month { year, month }
    }

    /// Display label in `"Mon YYYY"` form, e.g. `Aug 2025`.
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format("%b %Y").to_string(),
            None => format!("{:02} {}", self.month, self.year),
        }
    }

    /// The following calendar month.
    pub fn succ(&self) -> Self {
        if self.month >= 12 {
            Month::new(self.year + 1, 1)
        } else {
            Month::new(self.year, self.month + 1)
        }
    }
}

/// One row of the budget table: a single calendar month.
///
/// `living_expense` and `income` are the user-editable cells. The semester
/// fee, insurance, and loan-split columns are seeded from the plan constants
/// and are non-zero only on semester-start months. The last four columns are
/// overwritten by the simulator on every recomputation and any values posted
/// for them by the grid are ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonthRow {
    pub month: Month,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub living_expense: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub income: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub semester_fee: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub health_insurance: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub covered_by_primary: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub covered_by_secondary: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub living_borrowed_from_secondary: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cumulative_secondary_borrowed: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub interest_on_secondary: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_monthly_balance: f64,
}

impl MonthRow {
    /// A fresh row with every column except `living_expense` at zero.
    pub fn new(month: Month, living_expense: f64) -> Self {
        MonthRow {
            month,
            living_expense,
            income: 0.0,
            semester_fee: 0.0,
            health_insurance: 0.0,
            covered_by_primary: 0.0,
            covered_by_secondary: 0.0,
            living_borrowed_from_secondary: 0.0,
            cumulative_secondary_borrowed: 0.0,
            interest_on_secondary: 0.0,
            net_monthly_balance: 0.0,
        }
    }

    /// The numeric columns in `COLUMNS` order (everything after "Month").
    pub fn values(&self) -> [f64; 10] {
        [
            self.living_expense,
            self.income,
            self.semester_fee,
            self.health_insurance,
            self.covered_by_primary,
            self.covered_by_secondary,
            self.living_borrowed_from_secondary,
            self.cumulative_secondary_borrowed,
            self.interest_on_secondary,
            self.net_monthly_balance,
        ]
    }
}

/// Grid cells arrive as whatever the browser had in them. Missing, null, or
/// unparseable values are coerced to 0 rather than rejected, matching the
/// seeded defaults.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}
