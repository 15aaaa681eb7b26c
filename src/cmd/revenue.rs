//! Revenue view - raw table plus totals and the customer rate analysis

use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::aggregate::{self, RATE_THRESHOLD};
use crate::amount::display_usd;
use crate::records::RevenueRecord;
use crate::store::Store;

#[derive(Args, Debug)]
pub struct RevenueCommand {
    /// CSV file containing revenue records (defaults to data/revenue.csv)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output raw rows as CSV instead of formatted tables
    #[arg(long)]
    csv: bool,
}

#[derive(Tabled)]
struct RevenueRow<'a> {
    #[tabled(rename = "DATE")]
    date: &'a str,
    #[tabled(rename = "Customer")]
    customer: &'a str,
    #[tabled(rename = "Amount")]
    amount: &'a str,
}

impl RevenueCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let store: Store<RevenueRecord> = Store::new(super::data_path::<RevenueRecord>(
            self.file.as_ref(),
        ));
        let records = store.load()?;

        if self.csv {
            return super::write_csv(&records);
        }

        println!();
        println!("REVENUE OVERVIEW ({})", store.path().display());
        println!();
        print_table(&records);
        print_summary(&records);
        Ok(())
    }
}

fn print_table(records: &[RevenueRecord]) {
    if records.is_empty() {
        println!("No revenue records yet");
        return;
    }
    let rows: Vec<_> = records
        .iter()
        .map(|r| RevenueRow {
            date: &r.date,
            customer: &r.customer,
            amount: &r.amount,
        })
        .collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

pub(crate) fn print_summary(records: &[RevenueRecord]) {
    let summary = aggregate::revenue_summary(records);

    println!();
    println!("Total Revenue: {}", display_usd(summary.total));
    println!();
    println!("CUSTOMER RATE ANALYSIS");
    println!("  Total Customers: {}", summary.at_or_below + summary.above);
    println!(
        "  Customers <= {}: {}",
        display_usd(RATE_THRESHOLD),
        summary.at_or_below
    );
    println!(
        "  Customers >  {}: {}",
        display_usd(RATE_THRESHOLD),
        summary.above
    );
    println!();
    println!("REVENUE IMPACT ANALYSIS");
    println!("  Minimum Revenue: {}", display_usd(summary.minimum));
    println!("  Share of Total:  {}%", summary.minimum_impact_pct);

    if summary.malformed_rows > 0 {
        log::warn!(
            "{} revenue row(s) had an unreadable amount",
            summary.malformed_rows
        );
        println!();
        println!(
            "Warning: {} row(s) had an unreadable amount and were counted as $0.00",
            summary.malformed_rows
        );
    }
    println!();
}
