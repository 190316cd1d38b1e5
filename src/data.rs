use crate::config::InputConfig;
use crate::processor::ResultTable;
use crate::series::TemperatureSeries;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rmp_serde::encode;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Output file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    MsgPack,
}

impl ExportFormat {
    pub fn from_path(file: &Path) -> Result<Self> {
        let ext = file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("msgpack") => Ok(Self::MsgPack),
            _ => bail!("unsupported output extension in {file:?} (expected .csv or .msgpack)"),
        }
    }
}

/// Load a temperature series from a CSV file with a header row.
///
/// The date and temperature columns are located by header name; any other
/// column is ignored.
pub fn load_series<P: AsRef<Path>>(file: P, cfg: &InputConfig) -> Result<TemperatureSeries> {
    let file = file.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(file)
        .with_context(|| format!("failed to open {file:?}"))?;

    let headers = reader.headers().context("failed to read header")?.clone();
    let i_date = find_column(&headers, &cfg.date_column)?;
    let i_val = find_column(&headers, &cfg.value_column)?;

    let mut dates = Vec::new();
    let mut temperatures = Vec::new();
    for (i_rec, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read record {i_rec}"))?;

        let date_str = &record[i_date];
        let date = NaiveDate::parse_from_str(date_str, &cfg.date_format)
            .with_context(|| format!("invalid date {date_str:?} in record {i_rec}"))?;
        dates.push(date);

        let val_str = &record[i_val];
        let val: f64 = val_str
            .parse()
            .with_context(|| format!("invalid temperature {val_str:?} in record {i_rec}"))?;
        temperatures.push(val);
    }

    let series = TemperatureSeries::new(dates, temperatures).context("failed to build series")?;
    Ok(series)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    let mut matches = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header == name);
    let Some((i_col, _)) = matches.next() else {
        bail!("column {name:?} not found in header {headers:?}");
    };
    if matches.next().is_some() {
        bail!("column {name:?} appears more than once in header {headers:?}");
    }
    Ok(i_col)
}

/// Save a result table, in the format given by the file extension.
///
/// `.csv` files get a header row and empty cells for missing values;
/// `.msgpack` files hold the whole table, field names included.
pub fn save_table<P: AsRef<Path>>(table: &ResultTable, file: P) -> Result<()> {
    let file = file.as_ref();
    let format = ExportFormat::from_path(file)?;

    let handle = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(handle);

    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in &table.rows {
                csv_writer.serialize(row).context("failed to serialize row")?;
            }
            csv_writer.flush().context("failed to flush writer stream")?;
        }
        ExportFormat::MsgPack => {
            encode::write_named(&mut writer, table).context("failed to serialize table")?;
            writer.flush().context("failed to flush writer stream")?;
        }
    }

    Ok(())
}
