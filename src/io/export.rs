//! CSV export of scenario calendars.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::plan::ScenarioReport;

/// Column header for calendar CSV export.
const HEADER: &str = "scenario,day,available,under_maintenance,window,\
                      production,price,maintenance_coeff,revenue,maintenance_cost";

/// Exports every report's calendar to one CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_calendar(reports: &[ScenarioReport], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_calendar_csv(reports, buf)
}

/// Writes one row per scenario and day, scenarios in report order.
///
/// The `window` column is empty on operating days. Output is deterministic
/// for identical reports.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_calendar_csv(reports: &[ScenarioReport], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for report in reports {
        for r in &report.calendar {
            wtr.write_record(&[
                report.name.clone(),
                r.day.to_string(),
                r.available.to_string(),
                r.under_maintenance.to_string(),
                r.window.map(|w| w.to_string()).unwrap_or_default(),
                format!("{:.4}", r.production),
                format!("{:.4}", r.price),
                format!("{:.4}", r.maintenance_coeff),
                format!("{:.2}", r.revenue),
                format!("{:.2}", r.maintenance_cost),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{DayForecast, DayRange, ForecastSet};
    use crate::model::PlantParams;
    use crate::plan::{Scenario, run_all};
    use crate::solver::MicroLpEngine;

    fn reports() -> Vec<ScenarioReport> {
        let forecast = ForecastSet::from_days(vec![
            DayForecast {
                production: 1.0,
                price: 10.0,
                maintenance_coeff: 1.0,
            };
            10
        ])
        .expect("forecast");
        let params = PlantParams {
            capacity: 20.0,
            fixed_cost: 500.0,
        };
        let scenarios = [
            Scenario::unconstrained("open"),
            Scenario {
                name: "closed".to_string(),
                blackouts: vec![DayRange::new(1, 10)],
            },
        ];
        run_all(&forecast, &scenarios, &params, &MicroLpEngine).expect("reports")
    }

    fn write(reports: &[ScenarioReport]) -> String {
        let mut buf = Vec::new();
        write_calendar_csv(reports, &mut buf).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn header_and_row_count() {
        let output = write(&reports());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "scenario,day,available,under_maintenance,window,\
             production,price,maintenance_coeff,revenue,maintenance_cost"
        );
        // 1 header + 2 scenarios x 10 days
        assert_eq!(lines.len(), 21);
    }

    #[test]
    fn maintenance_day_is_marked() {
        let output = write(&reports());
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().filter_map(Result::ok).collect();

        // open: single 5-day window starting on the last day
        let day10 = &rows[9];
        assert_eq!(&day10[0], "open");
        assert_eq!(&day10[3], "true");
        assert_eq!(&day10[4], "5-day");
        assert_eq!(&day10[8], "0.00");
        assert_eq!(&day10[9], "500.00");

        // closed: nothing scheduled
        assert!(rows[10..].iter().all(|r| &r[3] == "false" && r[4].is_empty()));
        assert!(rows[10..].iter().all(|r| &r[2] == "false"));
    }

    #[test]
    fn deterministic_output() {
        let r = reports();
        assert_eq!(write(&r), write(&r));
    }
}
