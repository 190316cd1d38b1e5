use crate::config::Config;
use crate::data::{load_series, save_table};
use crate::processor::Processor;
use crate::series::TemperatureSeries;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct Manager {
    input_file: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(input_file: P, config_file: Option<&Path>) -> Result<Self> {
        let input_file = input_file.as_ref().to_path_buf();

        let cfg = match config_file {
            Some(config_file) => Config::from_file(config_file)
                .with_context(|| format!("failed to load {config_file:?}"))?,
            None => Config::default(),
        };
        log::info!("{cfg:#?}");

        Ok(Self { input_file, cfg })
    }

    pub fn run_processing<P: AsRef<Path>>(&self, output_file: P) -> Result<()> {
        let output_file = output_file.as_ref();
        let series = self.load_series()?;

        let mut processor = Processor::new(&series);
        let table = processor
            .process_with_window(self.cfg.processing.window)
            .context("failed to process series")?;

        save_table(table, output_file)
            .with_context(|| format!("failed to save {output_file:?}"))?;
        log::info!("saved {} rows to {output_file:?}", table.rows.len());

        Ok(())
    }

    pub fn run_inspection(&self) -> Result<()> {
        let series = self.load_series()?;
        let window = self.cfg.processing.window;
        let mut processor = Processor::new(&series);

        let n_defined = processor
            .moving_average(window)
            .context("failed to compute moving average")?
            .iter()
            .flatten()
            .count();
        log::info!("moving average (window {window}) defined on {n_defined} rows");

        let max_jump = processor
            .differential()
            .context("failed to compute differential")?
            .iter()
            .flatten()
            .fold(0.0_f64, |max, diff| max.max(diff.abs()));
        log::info!("largest day-to-day change: {max_jump:.2}");

        let extrema = processor.extrema().context("failed to find extrema")?;
        log::info!(
            "{} local maxima, {} local minima",
            extrema.maxima.len(),
            extrema.minima.len()
        );

        match processor
            .autocorrelation(1)
            .context("failed to compute autocorrelation")?
        {
            Some(ac) => log::info!("lag-1 autocorrelation: {ac:.4}"),
            None => log::warn!("lag-1 autocorrelation undefined for a constant series"),
        }

        let mut decorrelation_lag = None;
        for (lag, ac) in processor.autocorrelations().enumerate() {
            let ac = ac.context("failed to compute autocorrelation")?;
            if ac.is_some_and(|ac| ac <= 0.0) {
                decorrelation_lag = Some(lag);
                break;
            }
        }
        match decorrelation_lag {
            Some(lag) => log::info!("autocorrelation first drops to zero or below at lag {lag}"),
            None => log::info!("autocorrelation stays positive at every lag"),
        }

        Ok(())
    }

    fn load_series(&self) -> Result<TemperatureSeries> {
        let series = load_series(&self.input_file, &self.cfg.input)
            .with_context(|| format!("failed to load {:?}", self.input_file))?;

        match (series.dates().first(), series.dates().last()) {
            (Some(first), Some(last)) => {
                log::info!("loaded {} rows from {first} to {last}", series.len())
            }
            _ => log::warn!("loaded an empty series from {:?}", self.input_file),
        }

        Ok(series)
    }
}
