//! Scalar and month-bucketed summaries over loaded tables.

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::amount::parse_or_default;
use crate::dates::{self, MONTHS};
use crate::records::{RevenueRecord, SalesRecord, SupplyRecord};

/// Fixed partition point for the customer rate analysis.
pub const RATE_THRESHOLD: Decimal = dec!(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueSummary {
    pub total: Decimal,
    /// Customers with amount <= [`RATE_THRESHOLD`].
    pub at_or_below: usize,
    /// Customers with amount > [`RATE_THRESHOLD`].
    pub above: usize,
    pub minimum: Decimal,
    /// Share of the total contributed by the smallest amount, as a
    /// percentage rounded to 2 dp. Zero when the total is zero.
    pub minimum_impact_pct: Decimal,
    /// Rows whose amount text failed to parse and was coerced to zero.
    pub malformed_rows: usize,
}

pub fn revenue_summary(records: &[RevenueRecord]) -> RevenueSummary {
    let cells: Vec<_> = records.iter().map(|r| parse_or_default(&r.amount)).collect();
    let total: Decimal = cells.iter().map(|c| c.value).sum();
    let at_or_below = cells.iter().filter(|c| c.value <= RATE_THRESHOLD).count();
    let above = cells.len() - at_or_below;
    let minimum = cells.iter().map(|c| c.value).min().unwrap_or(Decimal::ZERO);
    let minimum_impact_pct = if total.is_zero() {
        Decimal::ZERO
    } else {
        (minimum / total * dec!(100)).round_dp(2)
    };
    RevenueSummary {
        total,
        at_or_below,
        above,
        minimum,
        minimum_impact_pct,
        malformed_rows: cells.iter().filter(|c| c.malformed).count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    pub total: Decimal,
    pub orders: usize,
    pub malformed_rows: usize,
}

pub fn sales_summary(records: &[SalesRecord]) -> SalesSummary {
    let cells: Vec<_> = records.iter().map(|r| parse_or_default(&r.amount)).collect();
    SalesSummary {
        total: cells.iter().map(|c| c.value).sum(),
        orders: records.len(),
        malformed_rows: cells.iter().filter(|c| c.malformed).count(),
    }
}

/// One row of the monthly supply-chain summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRow {
    pub month: &'static str,
    pub job_orders: usize,
    /// Mean requisition-to-order duration in days, 1 dp.
    /// `None` when the month has no valid rows.
    pub mean_duration_days: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplySummary {
    /// Always exactly 12 rows in calendar order, January first.
    pub months: Vec<MonthRow>,
    pub distinct_job_orders: usize,
    /// Mean duration across all valid rows, 1 dp.
    pub overall_mean_days: Option<Decimal>,
    /// Rows dropped from aggregation because a date failed to parse.
    /// They stay in the raw table display.
    pub skipped_rows: usize,
}

pub fn supply_summary(records: &[SupplyRecord]) -> SupplySummary {
    // (month index, job order, duration) for rows where both dates parse
    let mut valid = Vec::new();
    let mut skipped_rows = 0;
    for record in records {
        let pr = dates::parse_day_first(&record.requisition_date);
        let po = dates::parse_day_first(&record.order_date);
        match (pr, po) {
            (Ok(pr), Ok(po)) => {
                let duration = dates::duration_days(pr, po);
                let month = pr.month0() as usize;
                valid.push((month, record.job_order.as_str(), duration));
            }
            _ => {
                log::debug!(
                    "supply row '{}' excluded from aggregation: unparseable date",
                    record.job_order
                );
                skipped_rows += 1;
            }
        }
    }

    // Left-join against the fixed calendar so empty months still report.
    let months = MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let durations: Vec<i64> = valid
                .iter()
                .filter(|(m, _, _)| *m == i)
                .map(|(_, _, d)| *d)
                .collect();
            MonthRow {
                month,
                job_orders: durations.len(),
                mean_duration_days: mean_days(&durations),
            }
        })
        .collect();

    let mut job_orders: Vec<&str> = valid.iter().map(|(_, j, _)| *j).collect();
    job_orders.sort_unstable();
    job_orders.dedup();

    let all_durations: Vec<i64> = valid.iter().map(|(_, _, d)| *d).collect();

    SupplySummary {
        months,
        distinct_job_orders: job_orders.len(),
        overall_mean_days: mean_days(&all_durations),
        skipped_rows,
    }
}

fn mean_days(durations: &[i64]) -> Option<Decimal> {
    if durations.is_empty() {
        return None;
    }
    let sum: i64 = durations.iter().sum();
    Some((Decimal::from(sum) / Decimal::from(durations.len() as i64)).round_dp(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue(rows: &[(&str, &str, &str)]) -> Vec<RevenueRecord> {
        rows.iter()
            .map(|(date, customer, amount)| RevenueRecord {
                date: date.to_string(),
                customer: customer.to_string(),
                amount: amount.to_string(),
            })
            .collect()
    }

    fn supply(rows: &[(&str, &str, &str)]) -> Vec<SupplyRecord> {
        rows.iter()
            .map(|(job_order, pr, po)| SupplyRecord {
                job_order: job_order.to_string(),
                requisition_date: pr.to_string(),
                order_date: po.to_string(),
            })
            .collect()
    }

    #[test]
    fn revenue_totals_and_rate_partition() {
        let records = revenue(&[
            ("February", "Gasin", "200$"),
            ("February", "TCC", "900$"),
            ("February", "Kawa", "100$"),
        ]);
        let summary = revenue_summary(&records);
        assert_eq!(summary.total, dec!(1200));
        assert_eq!(summary.at_or_below, 2);
        assert_eq!(summary.above, 1);
        assert_eq!(summary.minimum, dec!(100));
        assert_eq!(summary.minimum_impact_pct, dec!(8.33));
        assert_eq!(summary.malformed_rows, 0);
    }

    #[test]
    fn minimum_impact_is_zero_on_zero_total() {
        let summary = revenue_summary(&[]);
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.minimum_impact_pct, Decimal::ZERO);

        // all-malformed rows coerce to zero total
        let records = revenue(&[("March", "Acme", "n/a")]);
        let summary = revenue_summary(&records);
        assert_eq!(summary.minimum_impact_pct, Decimal::ZERO);
        assert_eq!(summary.malformed_rows, 1);
    }

    #[test]
    fn malformed_amounts_count_as_zero_below_threshold() {
        let records = revenue(&[("April", "Acme", "oops"), ("April", "TCC", "900$")]);
        let summary = revenue_summary(&records);
        assert_eq!(summary.total, dec!(900));
        assert_eq!(summary.at_or_below, 1);
        assert_eq!(summary.above, 1);
        assert_eq!(summary.malformed_rows, 1);
    }

    #[test]
    fn sales_total() {
        let records = [
            SalesRecord {
                job_order: "JO-1".to_string(),
                customer: "Gasin".to_string(),
                amount: "150$".to_string(),
            },
            SalesRecord {
                job_order: "JO-2".to_string(),
                customer: "TCC".to_string(),
                amount: "850$".to_string(),
            },
        ];
        let summary = sales_summary(&records);
        assert_eq!(summary.total, dec!(1000));
        assert_eq!(summary.orders, 2);
    }

    #[test]
    fn monthly_summary_always_has_twelve_calendar_rows() {
        let records = supply(&[("JO-1", "05/01/2025", "20/01/2025")]);
        let summary = supply_summary(&records);
        assert_eq!(summary.months.len(), 12);
        assert_eq!(summary.months[0].month, "January");
        assert_eq!(summary.months[11].month, "December");
        assert_eq!(summary.months[0].job_orders, 1);
        assert_eq!(summary.months[0].mean_duration_days, Some(dec!(15.0)));
        // empty months report zero, not NaN
        assert_eq!(summary.months[1].job_orders, 0);
        assert_eq!(summary.months[1].mean_duration_days, None);
    }

    #[test]
    fn monthly_means_and_distinct_job_orders() {
        let records = supply(&[
            ("JO-1", "05/01/2025", "20/01/2025"), // 15 days
            ("JO-2", "10/01/2025", "20/01/2025"), // 10 days
            ("JO-2", "01/03/2025", "11/03/2025"), // duplicate job order, March
        ]);
        let summary = supply_summary(&records);
        assert_eq!(summary.months[0].job_orders, 2);
        assert_eq!(summary.months[0].mean_duration_days, Some(dec!(12.5)));
        assert_eq!(summary.months[2].job_orders, 1);
        assert_eq!(summary.distinct_job_orders, 2);
        assert_eq!(summary.overall_mean_days, Some(dec!(11.7)));
    }

    #[test]
    fn bad_dates_are_excluded_but_counted() {
        let records = supply(&[
            ("JO-1", "05/01/2025", "20/01/2025"),
            ("JO-2", "not a date", "20/01/2025"),
            ("JO-3", "01/13/2025", "20/01/2025"), // month 13 fails day-first parse
        ]);
        let summary = supply_summary(&records);
        assert_eq!(summary.months[0].job_orders, 1);
        assert_eq!(summary.skipped_rows, 2);
    }
}
