//! Add command - validated single-record entry per domain.
//!
//! Input is validated before anything touches the file: a malformed amount or
//! date aborts with no partial append. After a successful append the view
//! summary is recomputed from the file, so what gets printed always reflects
//! what was persisted.

use anyhow::Context;
use clap::{Args, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::amount::{parse_strict, to_amount_text};
use crate::dates;
use crate::mirror::MirrorConfig;
use crate::records::{
    require_non_empty, DomainRecord, RevenueRecord, SalesRecord, SupplyRecord,
};
use crate::store::Store;

#[derive(Args, Debug)]
pub struct AddCommand {
    #[command(subcommand)]
    domain: AddDomain,
}

#[derive(Subcommand, Debug)]
enum AddDomain {
    /// Append a revenue record
    Revenue(AddRevenue),
    /// Append a supply chain record
    Supply(AddSupply),
    /// Append a sales record
    Sales(AddSales),
}

#[derive(Args, Debug)]
struct AddRevenue {
    /// Reporting period label as shown in the DATE column (e.g. February)
    #[arg(short, long)]
    date: String,

    /// Customer name
    #[arg(short, long)]
    customer: String,

    /// Amount; must parse as a number (a trailing $ is fine)
    #[arg(short, long)]
    amount: String,

    /// CSV file containing revenue records (defaults to data/revenue.csv)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Push the updated file to the configured remote mirror
    #[arg(long)]
    mirror: bool,
}

#[derive(Args, Debug)]
struct AddSupply {
    /// Job order identifier
    #[arg(short, long)]
    job_order: String,

    /// Purchase requisition date, day-first (e.g. 5/1/2025)
    #[arg(short, long)]
    requisition: String,

    /// Purchase order date, day-first (e.g. 20/1/2025)
    #[arg(short, long)]
    order: String,

    /// CSV file containing supply chain records (defaults to data/supply_chain.csv)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Push the updated file to the configured remote mirror
    #[arg(long)]
    mirror: bool,
}

#[derive(Args, Debug)]
struct AddSales {
    /// Job order identifier
    #[arg(short, long)]
    job_order: String,

    /// Customer name
    #[arg(short, long)]
    customer: String,

    /// Amount; must parse as a number (a trailing $ is fine)
    #[arg(short, long)]
    amount: String,

    /// CSV file containing sales records (defaults to data/sales.csv)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Push the updated file to the configured remote mirror
    #[arg(long)]
    mirror: bool,
}

impl AddCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match &self.domain {
            AddDomain::Revenue(cmd) => cmd.exec(),
            AddDomain::Supply(cmd) => cmd.exec(),
            AddDomain::Sales(cmd) => cmd.exec(),
        }
    }
}

impl AddRevenue {
    fn exec(&self) -> anyhow::Result<()> {
        require_non_empty("date", &self.date)?;
        require_non_empty("customer", &self.customer)?;
        let amount = parse_strict(&self.amount)?;

        let record = RevenueRecord {
            date: self.date.trim().to_string(),
            customer: self.customer.trim().to_string(),
            amount: to_amount_text(amount),
        };
        let store = Store::new(super::data_path::<RevenueRecord>(self.file.as_ref()));
        store.append(&record)?;
        println!("Added revenue record for {}", record.customer);

        push_to_mirror(self.mirror, store.path(), RevenueRecord::DOMAIN);

        // Recompute from the file so the printed summary reflects the append.
        super::revenue::print_summary(&store.load()?);
        Ok(())
    }
}

impl AddSupply {
    fn exec(&self) -> anyhow::Result<()> {
        require_non_empty("job order", &self.job_order)?;
        let requisition = dates::parse_day_first(&self.requisition)?;
        let order = dates::parse_day_first(&self.order)?;

        let duration = dates::duration_days(requisition, order);
        if duration < 0 {
            log::warn!(
                "order date {} is before requisition date {} ({} days)",
                order,
                requisition,
                duration
            );
            println!("Warning: order date is before requisition date ({} days)", duration);
        }

        let record = SupplyRecord {
            job_order: self.job_order.trim().to_string(),
            requisition_date: requisition.format("%d/%m/%Y").to_string(),
            order_date: order.format("%d/%m/%Y").to_string(),
        };
        let store = Store::new(super::data_path::<SupplyRecord>(self.file.as_ref()));
        store.append(&record)?;
        println!(
            "Added supply chain record {} ({} days)",
            record.job_order, duration
        );

        push_to_mirror(self.mirror, store.path(), SupplyRecord::DOMAIN);

        super::supply::print_summary(&store.load()?);
        Ok(())
    }
}

impl AddSales {
    fn exec(&self) -> anyhow::Result<()> {
        require_non_empty("job order", &self.job_order)?;
        require_non_empty("customer", &self.customer)?;
        let amount = parse_strict(&self.amount)?;

        let record = SalesRecord {
            job_order: self.job_order.trim().to_string(),
            customer: self.customer.trim().to_string(),
            amount: to_amount_text(amount),
        };
        let store = Store::new(super::data_path::<SalesRecord>(self.file.as_ref()));
        store.append(&record)?;
        println!("Added sales record {}", record.job_order);

        push_to_mirror(self.mirror, store.path(), SalesRecord::DOMAIN);

        super::sales::print_summary(&store.load()?);
        Ok(())
    }
}

/// Mirror failure is a warning only: the local append already succeeded and
/// the local file is authoritative.
fn push_to_mirror(requested: bool, path: &Path, domain: &str) {
    if !requested {
        return;
    }
    let Some(config) = MirrorConfig::from_env() else {
        log::warn!("--mirror requested but mirror environment is not configured");
        println!(
            "Warning: --mirror requested but OPSBOARD_MIRROR_REPO / OPSBOARD_MIRROR_TOKEN are not set"
        );
        return;
    };

    let result = fs::read(path)
        .with_context(|| format!("failed to re-read {}", path.display()))
        .and_then(|bytes| {
            let remote_path = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("data.csv");
            let message = format!("opsboard: append {} record", domain);
            config.push(remote_path, &bytes, &message)
        });

    match result {
        Ok(()) => println!("Mirrored {} to {}", path.display(), config.repo),
        Err(e) => {
            log::warn!("mirror push failed: {:#}", e);
            println!("Warning: mirror push failed ({:#}); the local file was still updated", e);
        }
    }
}
