//! Wind rose command line tool
//!
//! Reads a CSV of wind observations, prints or exports the frequency table
//! and renders the rose.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use windrose::report::{render_table, to_json, write_csv};
use windrose::{DIRECTION_COLUMN, SPEED_COLUMN, StatsEngine, WindDataset, WindRoseConfig};
use windrose_visualization::{ColorSpec, OutputMode, RenderOptions, RenderOutcome, WindRoseRenderer};

#[derive(Parser, Debug)]
#[command(name = "windrose-plot")]
#[command(about = "Wind speed and direction frequency rose from CSV observations")]
#[command(version)]
struct Args {
    /// CSV file with speed and direction columns
    input: PathBuf,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, env = "WINDROSE_CONFIG")]
    config: Option<PathBuf>,

    /// Column holding wind speed
    #[arg(long)]
    speed_column: Option<String>,

    /// Column holding wind direction in degrees
    #[arg(long)]
    direction_column: Option<String>,

    /// Number of speed bins
    #[arg(short, long)]
    bins: Option<usize>,

    /// Report raw counts instead of percentages
    #[arg(long)]
    counts: bool,

    /// Palette name or comma separated colors (#rrggbb, rgb(r,g,b))
    #[arg(long)]
    colors: Option<String>,

    /// Background template
    #[arg(long)]
    template: Option<String>,

    /// Keep the color sequence in its natural order
    #[arg(long)]
    no_reverse: bool,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// save, show or return
    #[arg(long, default_value = "save")]
    mode: String,

    /// Output file for save mode (.svg writes a bare SVG)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the frequency table
    #[arg(long)]
    table: bool,

    /// Write the frequency table as CSV
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Print the frequency table as JSON instead of rendering
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("windrose=info,windrose_visualization=info,windrose_plot=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let dataset = WindDataset::from_csv_path(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(
        "Loaded {} records from {}",
        dataset.len(),
        args.input.display()
    );

    let stats = StatsEngine::new(config.stats.clone())
        .compute(&dataset)
        .context("failed to compute wind statistics")?;
    info!(
        rows = stats.len(),
        total = stats.total_count(),
        dropped = stats.dropped(),
        "Computed wind statistics"
    );

    if args.table {
        println!("{}", render_table(&stats));
    }
    if let Some(path) = &args.export_csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_csv(&stats, file)?;
        info!("Wrote frequency table to {}", path.display());
    }
    if args.json {
        println!("{}", to_json(&stats)?);
        return Ok(());
    }

    let mode: OutputMode = args.mode.parse()?;
    let renderer = WindRoseRenderer::new(RenderOptions::from_settings(&config.render));
    let out_file = config.render.output.clone();
    match renderer.render(&stats, mode, out_file.as_deref())? {
        RenderOutcome::Saved(path) => println!("{}", path.display()),
        RenderOutcome::Shown(path) => println!("{}", path.display()),
        RenderOutcome::Figure(figure) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(figure.svg().as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Configuration file and environment, then command line overrides
fn load_config(args: &Args) -> Result<WindRoseConfig> {
    let mut config = WindRoseConfig::load(args.config.as_deref()).context("failed to load configuration")?;

    if let Some(name) = &args.speed_column {
        config
            .stats
            .column_mapping
            .insert(name.clone(), SPEED_COLUMN.to_string());
    }
    if let Some(name) = &args.direction_column {
        config
            .stats
            .column_mapping
            .insert(name.clone(), DIRECTION_COLUMN.to_string());
    }
    if let Some(bins) = args.bins {
        config.stats.bins = bins;
    }
    if args.counts {
        config.stats.normalized = false;
    }

    if let Some(colors) = &args.colors {
        match parse_color_arg(colors) {
            ColorSpec::Named(name) => {
                config.render.colors = name;
                config.render.custom_colors.clear();
            }
            ColorSpec::Custom(list) => config.render.custom_colors = list,
        }
    }
    if let Some(template) = &args.template {
        config.render.template = template.clone();
    }
    if args.no_reverse {
        config.render.colors_reversed = false;
    }
    if let Some(title) = &args.title {
        config.render.title = Some(title.clone());
    }
    if let Some(output) = &args.output {
        config.render.output = Some(output.clone());
    }

    Ok(config)
}

/// A palette name, or a comma separated color list when the argument looks like colors
fn parse_color_arg(arg: &str) -> ColorSpec {
    let arg = arg.trim();
    if !arg.starts_with('#') && !arg.to_ascii_lowercase().starts_with("rgb") {
        return ColorSpec::Named(arg.to_string());
    }

    // commas inside rgb(...) do not separate colors
    let mut colors = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in arg.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                colors.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        colors.push(current.trim().to_string());
    }
    ColorSpec::Custom(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_arg() {
        assert_eq!(parse_color_arg("Viridis"), ColorSpec::Named("Viridis".to_string()));
        assert_eq!(
            parse_color_arg("#ff0000, rgb(0, 128, 0),#00f"),
            ColorSpec::Custom(vec![
                "#ff0000".to_string(),
                "rgb(0, 128, 0)".to_string(),
                "#00f".to_string()
            ])
        );
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "windrose-plot",
            "data.csv",
            "--speed-column",
            "ws",
            "--bins",
            "4",
            "--counts",
            "--colors",
            "#000000,#ffffff",
            "--no-reverse",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.stats.bins, 4);
        assert!(!config.stats.normalized);
        assert_eq!(config.stats.column_mapping.get("ws").map(String::as_str), Some("speed"));
        assert_eq!(config.render.custom_colors.len(), 2);
        assert!(!config.render.colors_reversed);
    }
}
