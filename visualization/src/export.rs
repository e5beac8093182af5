//! Figure construction and output handling
//!
//! A [`WindRoseRenderer`] turns [`WindStats`] into a [`Figure`] (an SVG
//! document) and then saves it, shows it, or hands it back depending on the
//! [`OutputMode`].

use crate::chart::draw_rose;
use crate::data::RoseData;
use crate::errors::{Result, VisualizationError};
use crate::layouts::PolarLayout;
use crate::palettes::{ColorSpec, assign_colors};
use crate::styles::{RoseStyle, Template};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use windrose::config::DEFAULT_OUTPUT_FILE;
use windrose::report::tidy_records;
use windrose::{RenderSettings, WindStats};

/// What to do with a rendered figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write to the given path or `./windrose.html`
    #[default]
    Save,
    /// Write an HTML page to the temp directory and log its path.
    ///
    /// No browser or viewer is launched; open the page yourself.
    Show,
    /// Hand the figure back to the caller
    Return,
}

impl FromStr for OutputMode {
    type Err = VisualizationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "save" => Ok(OutputMode::Save),
            "show" => Ok(OutputMode::Show),
            "return" => Ok(OutputMode::Return),
            other => Err(VisualizationError::ConfigError {
                message: format!("unknown output mode '{}', expected save, show or return", other),
            }),
        }
    }
}

/// Result of [`WindRoseRenderer::render`]
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Saved(PathBuf),
    Shown(PathBuf),
    Figure(Figure),
}

/// A rendered wind rose
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    svg: String,
    title: Option<String>,
    background: RGBColor,
    /// Tidy table as JSON, embedded in the HTML page
    data_json: String,
}

impl Figure {
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Standalone HTML page with the SVG and the frequency table as JSON
    pub fn to_html(&self) -> String {
        let title = escape_html(self.title.as_deref().unwrap_or("Wind rose"));
        let RGBColor(r, g, b) = self.background;
        let mut html = String::with_capacity(self.svg.len() + self.data_json.len() + 512);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", title));
        html.push_str(&format!(
            "<style>body {{ margin: 0; background: #{:02x}{:02x}{:02x}; display: flex; justify-content: center; }}</style>\n",
            r, g, b
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str(&self.svg);
        html.push_str("\n<script type=\"application/json\" id=\"windrose-data\">");
        html.push_str(&self.data_json.replace("</", "<\\/"));
        html.push_str("</script>\n</body>\n</html>\n");
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Options controlling the look of the rose
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub colors: ColorSpec,
    /// Template name, resolved with a warning fallback
    pub template: String,
    /// Reverse the color sequence before assigning it to bins
    pub colors_reversed: bool,
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Bar width relative to the 22.5° sector
    pub bar_width_ratio: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_settings(&RenderSettings::default())
    }
}

impl RenderOptions {
    pub fn from_settings(settings: &RenderSettings) -> Self {
        let colors = if settings.custom_colors.is_empty() {
            ColorSpec::Named(settings.colors.clone())
        } else {
            ColorSpec::Custom(settings.custom_colors.clone())
        };
        Self {
            colors,
            template: settings.template.clone(),
            colors_reversed: settings.colors_reversed,
            title: settings.title.clone(),
            width: settings.width,
            height: settings.height,
            bar_width_ratio: RoseStyle::default().bar_width_ratio,
        }
    }
}

/// Renders wind statistics as a polar stacked-bar chart
#[derive(Debug, Clone, Default)]
pub struct WindRoseRenderer {
    options: RenderOptions,
}

impl WindRoseRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Build the figure without writing anything
    pub fn figure(&self, stats: &WindStats) -> Result<Figure> {
        let template = Template::resolve(&self.options.template);
        let mut style = RoseStyle::from_template(template);
        style.bar_width_ratio = self.options.bar_width_ratio;

        let palette = self.options.colors.resolve()?;
        let bin_colors = assign_colors(&palette, stats.bins(), self.options.colors_reversed);

        let layout = PolarLayout::with_size(self.options.width, self.options.height);
        let data = RoseData::from_stats(stats);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (layout.width, layout.height))
                .into_drawing_area();
            draw_rose(
                &root,
                &data,
                &bin_colors,
                &style,
                &layout,
                self.options.title.as_deref(),
            )?;
            root.present()?;
        }

        tracing::debug!(
            segments = data.segments.len(),
            template = %template,
            bytes = svg.len(),
            "rendered wind rose"
        );

        Ok(Figure {
            svg,
            title: self.options.title.clone(),
            background: style.colors.background,
            data_json: serde_json::to_string(&tidy_records(stats))?,
        })
    }

    /// Render and dispatch according to `mode`.
    ///
    /// `out_file` only applies to [`OutputMode::Save`]; without it the page
    /// goes to `windrose.html` in the working directory.
    pub fn render(
        &self,
        stats: &WindStats,
        mode: OutputMode,
        out_file: Option<&Path>,
    ) -> Result<RenderOutcome> {
        let figure = self.figure(stats)?;
        match mode {
            OutputMode::Save => {
                let path = match out_file {
                    Some(path) => path.to_path_buf(),
                    None => std::env::current_dir()?.join(DEFAULT_OUTPUT_FILE),
                };
                write_figure(&figure, &path)?;
                Ok(RenderOutcome::Saved(path))
            }
            OutputMode::Show => {
                let path = std::env::temp_dir().join(format!("windrose-{}.html", std::process::id()));
                write_figure(&figure, &path)?;
                tracing::info!("Wind rose written to {}, open it in a browser", path.display());
                Ok(RenderOutcome::Shown(path))
            }
            OutputMode::Return => Ok(RenderOutcome::Figure(figure)),
        }
    }
}

/// Write the figure, raw SVG for `.svg` paths and HTML otherwise.
///
/// Missing parent directories are created.
pub fn write_figure(figure: &Figure, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            fs::create_dir_all(parent)?;
        }
    }

    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        fs::write(path, figure.svg())?;
    } else {
        fs::write(path, figure.to_html())?;
    }
    tracing::info!("Saved wind rose to {}", path.display());
    Ok(())
}
