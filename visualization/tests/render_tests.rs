use tempfile::TempDir;
use windrose::{WindDataset, WindStats, compute};
use windrose_visualization::{
    ColorSpec, OutputMode, RenderOptions, RenderOutcome, VisualizationError, WindRoseRenderer,
};

fn sample_stats(normalized: bool) -> WindStats {
    let records = vec![
        (1.2, 5.0),
        (3.4, 44.0),
        (7.5, 91.0),
        (2.2, 182.0),
        (9.8, 268.0),
        (5.1, 355.0),
        (6.6, 359.0),
        (0.4, 120.0),
    ];
    compute(&WindDataset::from_records(records), 3, normalized, None).unwrap()
}

#[test]
fn test_one_polygon_per_row() {
    let stats = sample_stats(false);
    let figure = WindRoseRenderer::default().figure(&stats).unwrap();
    let svg = figure.svg();

    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("<polygon").count(), stats.len());
    // the SVG backend writes text content on its own line
    for label in ["N", "NE", "SSW", "W"] {
        assert!(
            svg.lines().any(|line| line.trim() == label),
            "missing label {}",
            label
        );
    }
    assert!(svg.lines().any(|line| line.trim() == "speed"));
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/deeper/rose.html");

    let outcome = WindRoseRenderer::default()
        .render(&sample_stats(true), OutputMode::Save, Some(&path))
        .unwrap();

    match outcome {
        RenderOutcome::Saved(saved) => assert_eq!(saved, path),
        other => panic!("unexpected outcome {:?}", other),
    }
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<svg"));
    assert!(html.contains("\"direction\""));
}

#[test]
fn test_save_svg_extension_writes_bare_svg() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rose.svg");

    WindRoseRenderer::default()
        .render(&sample_stats(true), OutputMode::Save, Some(&path))
        .unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.trim_start().starts_with("<svg"));
    assert!(!svg.contains("<!DOCTYPE html>"));
}

#[test]
fn test_return_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unused.html");

    let outcome = WindRoseRenderer::default()
        .render(&sample_stats(true), OutputMode::Return, Some(&path))
        .unwrap();

    assert!(matches!(outcome, RenderOutcome::Figure(_)));
    assert!(!path.exists());
}

#[test]
fn test_title_is_escaped_in_html() {
    let options = RenderOptions {
        title: Some("Station <A> & B".to_string()),
        ..RenderOptions::default()
    };
    let figure = WindRoseRenderer::new(options).figure(&sample_stats(true)).unwrap();
    let html = figure.to_html();
    assert!(html.contains("<title>Station &lt;A&gt; &amp; B</title>"));
}

#[test]
fn test_unknown_names_fall_back() {
    let options = RenderOptions {
        colors: ColorSpec::Named("NotAPalette".to_string()),
        template: "solarized".to_string(),
        ..RenderOptions::default()
    };
    let stats = sample_stats(false);
    let figure = WindRoseRenderer::new(options).figure(&stats).unwrap();
    assert_eq!(figure.svg().matches("<polygon").count(), stats.len());
}

#[test]
fn test_custom_colors_are_used() {
    let options = RenderOptions {
        colors: ColorSpec::Custom(vec!["#123456".to_string()]),
        colors_reversed: false,
        ..RenderOptions::default()
    };
    let figure = WindRoseRenderer::new(options).figure(&sample_stats(false)).unwrap();
    assert!(figure.svg().to_ascii_lowercase().contains("#123456"));
}

#[test]
fn test_bad_custom_color_is_an_error() {
    let options = RenderOptions {
        colors: ColorSpec::Custom(vec!["#12345".to_string()]),
        ..RenderOptions::default()
    };
    let err = WindRoseRenderer::new(options)
        .figure(&sample_stats(true))
        .unwrap_err();
    assert!(matches!(err, VisualizationError::ConfigError { .. }));
}

#[test]
fn test_empty_statistics_render() {
    let stats = compute(&WindDataset::from_records(Vec::new()), 9, true, None).unwrap();
    let figure = WindRoseRenderer::default().figure(&stats).unwrap();
    assert!(figure.svg().contains("<svg"));
    assert_eq!(figure.svg().matches("<polygon").count(), 0);
}

#[test]
fn test_too_small_canvas_is_rejected() {
    let options = RenderOptions {
        width: 100,
        height: 100,
        ..RenderOptions::default()
    };
    let err = WindRoseRenderer::new(options)
        .figure(&sample_stats(true))
        .unwrap_err();
    assert!(matches!(err, VisualizationError::LayoutError { .. }));
}
