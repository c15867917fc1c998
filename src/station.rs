use chrono::NaiveDateTime;
use csv::StringRecord;

use crate::error::RowError;
use crate::Reading;

pub const SOLA_DT_FORMAT: &str = "%d.%m.%Y %H:%M";
pub const LOCAL_DT_FORMAT: &str = "%m.%d.%Y %H:%M";

/// Column layout and unit conventions of one station's log file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationFormat {
    pub name: &'static str,
    pub time_column: usize,
    pub time_format: &'static str,
    pub temperature_column: usize,
    pub pressure_column: usize,
    /// multiplied into the parsed pressure to get the stored value
    pub pressure_factor: f64,
}

/// Met station export: day.month.year dates, pressure already in hPa.
pub const SOLA: StationFormat = StationFormat {
    name: "Sola",
    time_column: 2,
    time_format: SOLA_DT_FORMAT,
    temperature_column: 3,
    pressure_column: 4,
    pressure_factor: 1.,
};

/// Local logger export: month.day.year dates, pressure in bar.
///
/// NOTE: bar to hPa is a factor 1000, this log has always been scaled by 10
/// and the stored values keep that scaling.
pub const LOCAL: StationFormat = StationFormat {
    name: "Local",
    time_column: 0,
    time_format: LOCAL_DT_FORMAT,
    temperature_column: 4,
    pressure_column: 2,
    pressure_factor: 10.,
};

impl StationFormat {
    /// Parses one data row into a reading.
    /// The row is rejected as a whole if any of the three fields is unusable.
    pub fn parse_record(&self, record: &StringRecord) -> Result<Reading, RowError> {
        let temperature = parse_decimal(field(record, self.temperature_column)?)
            .ok_or_else(|| number_error(record, self.temperature_column))?;
        let pressure = parse_decimal(field(record, self.pressure_column)?)
            .ok_or_else(|| number_error(record, self.pressure_column))?;
        let time_str = field(record, self.time_column)?;
        let time = NaiveDateTime::parse_from_str(time_str, self.time_format).map_err(|_| {
            RowError::Datetime {
                column: self.time_column,
                value: time_str.to_string(),
                format: self.time_format,
            }
        })?;
        Ok(Reading {
            time,
            temperature,
            pressure: pressure * self.pressure_factor,
        })
    }
}

fn field(record: &StringRecord, column: usize) -> Result<&str, RowError> {
    record.get(column).ok_or(RowError::MissingColumn(column))
}

fn number_error(record: &StringRecord, column: usize) -> RowError {
    RowError::Number {
        column,
        value: record.get(column).unwrap_or_default().to_string(),
    }
}

/// parses a decimal written with a comma separator, e.g. "5,5" -> 5.5
pub fn parse_decimal(s: &str) -> Option<f64> {
    let v: f64 = s.trim().replace(',', ".").parse().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn decimal_with_comma() {
        assert_eq!(parse_decimal("5,5"), Some(5.5));
        assert_eq!(parse_decimal(" -3,25 "), Some(-3.25));
        assert_eq!(parse_decimal("1013"), Some(1013.));
        assert_eq!(parse_decimal("1,013,2"), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn sola_row() {
        let r = record(&["Sola", "SN50500", "05.10.2021 14:00", "5,5", "1012,3"]);
        let reading = SOLA.parse_record(&r).unwrap();
        assert_eq!(
            reading.time,
            NaiveDate::from_ymd_opt(2021, 10, 5)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap()
        );
        assert_eq!(reading.temperature, 5.5);
        assert!((reading.pressure - 1012.3).abs() < 1e-9);
    }

    #[test]
    fn local_row_scales_pressure_by_ten() {
        let r = record(&["10.05.2021 14:00", "0", "1,013", "x", "12,5"]);
        let reading = LOCAL.parse_record(&r).unwrap();
        assert_eq!(
            reading.time,
            NaiveDate::from_ymd_opt(2021, 10, 5)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap()
        );
        assert_eq!(reading.temperature, 12.5);
        assert!((reading.pressure - 10.13).abs() < 1e-9);
    }

    #[test]
    fn short_row_is_rejected() {
        let r = record(&["Sola", "SN50500", "05.10.2021 14:00", "5,5"]);
        assert_eq!(SOLA.parse_record(&r), Err(RowError::MissingColumn(4)));
    }

    #[test]
    fn bad_number_is_rejected() {
        let r = record(&["Sola", "SN50500", "05.10.2021 14:00", "-", "1012,3"]);
        assert_eq!(
            SOLA.parse_record(&r),
            Err(RowError::Number {
                column: 3,
                value: "-".to_string()
            })
        );
    }

    #[test]
    fn day_month_swap_is_rejected() {
        // 25 is not a valid month for the local format
        let r = record(&["25.10.2021 14:00", "0", "1,013", "x", "12,5"]);
        assert!(matches!(
            LOCAL.parse_record(&r),
            Err(RowError::Datetime { column: 0, .. })
        ));
    }
}
