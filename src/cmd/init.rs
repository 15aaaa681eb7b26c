//! Init command - create any missing domain data files with their header rows

use clap::Args;
use std::path::PathBuf;

use crate::records::{DomainRecord, RevenueRecord, SalesRecord, SupplyRecord};
use crate::store::Store;

#[derive(Args, Debug)]
pub struct InitCommand {
    /// Directory for the data files (defaults to data/ or $OPSBOARD_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl InitCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dir = self
            .data_dir
            .clone()
            .unwrap_or_else(super::data_dir);

        self.init_one::<RevenueRecord>(&dir)?;
        self.init_one::<SupplyRecord>(&dir)?;
        self.init_one::<SalesRecord>(&dir)?;
        Ok(())
    }

    fn init_one<R: DomainRecord>(&self, dir: &std::path::Path) -> anyhow::Result<()> {
        let store: Store<R> = Store::new(dir.join(R::FILE_NAME));
        if store.init()? {
            println!("Created {}", store.path().display());
        } else {
            println!("{} already exists", store.path().display());
        }
        Ok(())
    }
}
