//! Export of the frequency table as CSV, JSON or a terminal table

use crate::error::Result;
use crate::stats::WindStats;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

/// Flat (direction, speed, frequency) record as consumed by charting tools
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRecord {
    pub direction: String,
    pub speed: String,
    pub frequency: Frequency,
}

/// Raw count, or a percentage when the table is normalized
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Frequency {
    Count(u64),
    Percent(f64),
}

impl Frequency {
    pub fn value(self) -> f64 {
        match self {
            Frequency::Count(count) => count as f64,
            Frequency::Percent(percent) => percent,
        }
    }
}

/// Tidy records of a statistics table, in table order
pub fn tidy_records(stats: &WindStats) -> Vec<TidyRecord> {
    stats
        .iter()
        .map(|row| TidyRecord {
            direction: row.direction.to_string(),
            speed: row.speed_label.clone(),
            frequency: if stats.is_normalized() {
                Frequency::Percent(row.frequency)
            } else {
                Frequency::Count(row.count)
            },
        })
        .collect()
}

/// Write `direction,speed,frequency` CSV
pub fn write_csv<W: Write>(stats: &WindStats, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for record in tidy_records(stats) {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// JSON array of tidy records
pub fn to_json(stats: &WindStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(&tidy_records(stats))?)
}

/// Terminal table: one row per compass point, one column per speed bin
pub fn render_table(stats: &WindStats) -> Table {
    let bins = stats.observed_speed_bins();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Direction".to_string()];
    header.extend(bins.iter().map(|b| b.label()));
    header.push("Total".to_string());
    table.set_header(header);

    let totals = stats.direction_totals();
    for direction in stats.directions() {
        let mut cells = vec![direction.to_string()];
        for bin in &bins {
            let value = stats
                .iter()
                .find(|r| r.direction == direction && r.speed_bin.index == bin.index)
                .map(|r| r.frequency)
                .unwrap_or(0.0);
            cells.push(format_frequency(value, stats.is_normalized()));
        }
        cells.push(format_frequency(
            totals[direction.index()],
            stats.is_normalized(),
        ));
        table.add_row(cells);
    }

    for column in table.column_iter_mut().skip(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn format_frequency(value: f64, normalized: bool) -> String {
    if normalized {
        format!("{:.2}", value)
    } else {
        format!("{}", value as u64)
    }
}
