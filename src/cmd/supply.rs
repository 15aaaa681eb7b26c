//! Supply chain view - raw table plus the monthly duration summary

use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::aggregate;
use crate::records::SupplyRecord;
use crate::store::Store;

#[derive(Args, Debug)]
pub struct SupplyCommand {
    /// CSV file containing supply chain records (defaults to data/supply_chain.csv)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output raw rows as CSV instead of formatted tables
    #[arg(long)]
    csv: bool,
}

#[derive(Tabled)]
struct SupplyRow<'a> {
    #[tabled(rename = "Job Order")]
    job_order: &'a str,
    #[tabled(rename = "PR")]
    requisition_date: &'a str,
    #[tabled(rename = "PO")]
    order_date: &'a str,
}

#[derive(Tabled)]
struct MonthlyRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Job Orders")]
    job_orders: usize,
    #[tabled(rename = "Avg Duration (days)")]
    mean_duration: String,
}

impl SupplyCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let store: Store<SupplyRecord> =
            Store::new(super::data_path::<SupplyRecord>(self.file.as_ref()));
        let records = store.load()?;

        if self.csv {
            return super::write_csv(&records);
        }

        println!();
        println!("SUPPLY CHAIN MONTHLY DASHBOARD ({})", store.path().display());
        println!();
        print_table(&records);
        print_summary(&records);
        Ok(())
    }
}

fn print_table(records: &[SupplyRecord]) {
    if records.is_empty() {
        println!("No supply chain records yet");
        return;
    }
    let rows: Vec<_> = records
        .iter()
        .map(|r| SupplyRow {
            job_order: &r.job_order,
            requisition_date: &r.requisition_date,
            order_date: &r.order_date,
        })
        .collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

pub(crate) fn print_summary(records: &[SupplyRecord]) {
    let summary = aggregate::supply_summary(records);

    println!();
    println!("Total Unique Job Orders: {}", summary.distinct_job_orders);
    match summary.overall_mean_days {
        Some(mean) => println!("Overall Average Duration: {} days", mean),
        None => println!("Overall Average Duration: no data"),
    }
    println!();

    // Calendar order, all 12 months, empty ones included.
    let rows: Vec<_> = summary
        .months
        .iter()
        .map(|m| MonthlyRow {
            month: m.month,
            job_orders: m.job_orders,
            mean_duration: m
                .mean_duration_days
                .map_or_else(|| "no data".to_string(), |d| d.to_string()),
        })
        .collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);

    if summary.skipped_rows > 0 {
        log::warn!(
            "{} supply chain row(s) had unreadable dates",
            summary.skipped_rows
        );
        println!(
            "Warning: {} row(s) had unreadable dates and were left out of the monthly summary",
            summary.skipped_rows
        );
    }
    println!();
}
