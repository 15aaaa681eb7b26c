//! Sales view - raw table plus order totals

use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::aggregate;
use crate::amount::display_usd;
use crate::records::SalesRecord;
use crate::store::Store;

#[derive(Args, Debug)]
pub struct SalesCommand {
    /// CSV file containing sales records (defaults to data/sales.csv)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output raw rows as CSV instead of formatted tables
    #[arg(long)]
    csv: bool,
}

#[derive(Tabled)]
struct SalesRow<'a> {
    #[tabled(rename = "Job Order")]
    job_order: &'a str,
    #[tabled(rename = "Customer")]
    customer: &'a str,
    #[tabled(rename = "Amount")]
    amount: &'a str,
}

impl SalesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let store: Store<SalesRecord> =
            Store::new(super::data_path::<SalesRecord>(self.file.as_ref()));
        let records = store.load()?;

        if self.csv {
            return super::write_csv(&records);
        }

        println!();
        println!("SALES OVERVIEW ({})", store.path().display());
        println!();
        print_table(&records);
        print_summary(&records);
        Ok(())
    }
}

fn print_table(records: &[SalesRecord]) {
    if records.is_empty() {
        println!("No sales records yet");
        return;
    }
    let rows: Vec<_> = records
        .iter()
        .map(|r| SalesRow {
            job_order: &r.job_order,
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

pub(crate) fn print_summary(records: &[SalesRecord]) {
    let summary = aggregate::sales_summary(records);

    println!();
    println!("Total Sales Amount: {}", display_usd(summary.total));
    println!("Orders: {}", summary.orders);

    if summary.malformed_rows > 0 {
        log::warn!(
            "{} sales row(s) had an unreadable amount",
            summary.malformed_rows
        );
        println!(
            "Warning: {} row(s) had an unreadable amount and were counted as $0.00",
            summary.malformed_rows
        );
    }
    println!();
}
