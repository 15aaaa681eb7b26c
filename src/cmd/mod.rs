pub mod add;
pub mod init;
pub mod revenue;
pub mod sales;
pub mod supply;

use std::io;
use std::path::PathBuf;

use crate::records::DomainRecord;

/// Resolve the file backing a domain: explicit `--file`, else
/// `$OPSBOARD_DATA_DIR/<name>.csv`, else `data/<name>.csv`.
pub(crate) fn data_path<R: DomainRecord>(file: Option<&PathBuf>) -> PathBuf {
    match file {
        Some(path) => path.clone(),
        None => data_dir().join(R::FILE_NAME),
    }
}

pub(crate) fn data_dir() -> PathBuf {
    std::env::var_os("OPSBOARD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Emit raw records as CSV on stdout (the `--csv` output mode).
pub(crate) fn write_csv<I, R>(records: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
{
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
