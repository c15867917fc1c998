use chrono::prelude::*;
use log::{debug, error, info};
use std::path::Path;
pub mod chart;
pub mod compare;
pub mod error;
pub mod station;

use error::IngestError;
use station::StationFormat;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// One observation: temperature in degrees Celsius, pressure in hPa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub pressure: f64,
}

/// The time series of one station, stored column-wise.
/// Rows are only added through `push`, so the three columns stay aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    time: Vec<NaiveDateTime>,
    temperature: Vec<f64>,
    pressure: Vec<f64>,
}

impl Series {
    pub fn new(capacity: usize) -> Series {
        Series {
            time: Vec::with_capacity(capacity),
            temperature: Vec::with_capacity(capacity),
            pressure: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, reading: Reading) {
        self.time.push(reading.time);
        self.temperature.push(reading.temperature);
        self.pressure.push(reading.pressure);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    pub fn readings(&self) -> impl Iterator<Item = Reading> + '_ {
        self.time
            .iter()
            .zip(self.temperature.iter())
            .zip(self.pressure.iter())
            .map(|((&time, &temperature), &pressure)| Reading {
                time,
                temperature,
                pressure,
            })
    }

    /// Init a Series from a station log, skipping the header and every row
    /// that does not parse.
    /// A missing or unreadable file gives an empty Series, the error is only logged.
    pub fn from_csv<P: AsRef<Path>>(fin: P, format: &StationFormat) -> Series {
        match Series::try_from_csv(fin, format) {
            Ok(series) => series,
            Err(e) => {
                error!("{}: {}", format.name, e);
                Series::default()
            }
        }
    }

    /// Same as `from_csv`, but file-level failures are returned to the caller.
    pub fn try_from_csv<P: AsRef<Path>>(
        fin: P,
        format: &StationFormat,
    ) -> Result<Series, IngestError> {
        let fin = fin.as_ref();
        info!("{}: opening {}", format.name, fin.display());
        if !fin.is_file() {
            return Err(IngestError::Missing {
                path: fin.to_path_buf(),
            });
        }
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_path(fin)
            .map_err(|source| IngestError::Open {
                path: fin.to_path_buf(),
                source,
            })?;
        let mut series = Series::new(1000);
        let mut skipped = 0usize;
        for record in rdr.records() {
            let parsed = match record {
                Ok(r) => format.parse_record(&r),
                Err(e) => Err(error::RowError::Record(e.to_string())),
            };
            match parsed {
                Ok(reading) => series.push(reading),
                Err(_) => skipped += 1,
            }
        }
        debug!(
            "{}: read {} readings, skipped {} rows",
            format.name,
            series.len(),
            skipped
        );
        Ok(series)
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "datetime, temperature [C], pressure [hPa]")?;
        for r in self.readings() {
            writeln!(f, "{},{},{}", r.time, r.temperature, r.pressure)?
        }
        Ok(())
    }
}

/// None for an empty slice; NAN values are never picked up after the first element
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

pub fn suitable_xfmt(d: chrono::Duration) -> &'static str {
    if d > chrono::Duration::weeks(1) {
        "%y-%m-%d"
    } else if d > chrono::Duration::days(1) {
        "%m-%d %H"
    } else {
        "%d %H:%M"
    }
}
