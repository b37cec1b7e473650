use netscope_viz::{
    render_to_path, render_to_rgb, render_to_svg, AxisScale, ChartKind, ChartOptions, ChartSpec, GridStyle,
    LegendLocation, VizError,
};
use std::path::PathBuf;

fn make_temp_dir(prefix: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("{prefix}_{pid}_{n}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn sample_dataset(kind: ChartKind) -> Vec<Vec<f64>> {
    match kind {
        ChartKind::Heatmap => vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0], vec![6.0, 7.0, 8.0]],
        ChartKind::StackedHistogram => vec![vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 1.0, 2.0, 1.0]],
        _ => vec![
            (0..20).map(|i| (i as f64 * 0.3).sin() + 2.0).collect(),
            (0..20).map(|i| (i as f64 * 0.2).cos() + 2.0).collect(),
        ],
    }
}

fn sample_options(kind: ChartKind) -> ChartOptions {
    let mut options = ChartOptions::new(format!("{kind} chart"))
        .dimensions(640, 480)
        .x_label("x")
        .y_label("y")
        .legend(vec!["first".to_string(), "second".to_string()]);
    if kind == ChartKind::StackedHistogram {
        options = options.group_size(2);
    }
    options
}

#[test]
fn every_kind_renders_to_png() {
    let dir = make_temp_dir("netscope_viz_png");
    for kind in ChartKind::ALL {
        let spec = ChartSpec::new(kind, sample_dataset(kind), sample_options(kind)).expect("valid spec");
        let path = dir.join(format!("{kind}.png"));
        render_to_path(&spec, &path).expect("render png");
        assert!(path.exists(), "{kind} produced no file");
    }
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn svg_target_is_chosen_by_extension() {
    let dir = make_temp_dir("netscope_viz_svg");
    let spec = ChartSpec::new(ChartKind::Line, sample_dataset(ChartKind::Line), sample_options(ChartKind::Line))
        .expect("valid spec");
    let path = dir.join("nested").join("line.svg");
    render_to_path(&spec, &path).expect("render svg");

    let document = std::fs::read_to_string(&path).expect("read svg");
    assert!(document.contains("<svg"));
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn in_memory_targets() {
    let options = ChartOptions {
        x_scale: AxisScale::Log,
        y_grid: GridStyle::Solid,
        x_grid: GridStyle::Off,
        legend_location: LegendLocation::LowerLeft,
        legend_columns: 2,
        show_markers: true,
        ..sample_options(ChartKind::Line)
    };
    let spec = ChartSpec::new(
        ChartKind::Line,
        vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]],
        options.x_values(vec![vec![1.0, 10.0, 100.0], vec![1.0, 10.0, 100.0]]),
    )
    .expect("valid spec");

    let rgb = render_to_rgb(&spec).expect("render rgb");
    assert_eq!(rgb.len(), 640 * 480 * 3);
    assert!(rgb.iter().any(|&b| b != 255), "nothing drawn on the white background");

    let svg = render_to_svg(&spec).expect("render svg");
    assert!(svg.contains("<svg"));
}

#[test]
fn empty_series_render_as_no_op() {
    let spec = ChartSpec::new(ChartKind::Scatter, vec![vec![], vec![1.0]], ChartOptions::default().dimensions(320, 240))
        .expect("valid spec");
    assert!(render_to_rgb(&spec).is_ok());
}

#[test]
fn shape_errors_never_reach_the_renderer() {
    let err = ChartSpec::new(
        ChartKind::StackedHistogram,
        vec![vec![1.0, 2.0, 3.0]],
        ChartOptions::default().group_size(2),
    )
    .unwrap_err();
    assert!(matches!(err, VizError::InvalidDatasetShape(_)));

    let err = "radar".parse::<ChartKind>().unwrap_err();
    assert!(err.to_string().contains("radar"));
}

#[test]
fn aborted_render_leaves_no_file() {
    let dir = make_temp_dir("netscope_viz_aborted");
    let options = ChartOptions {
        x_scale: AxisScale::Log,
        x_limits: Some((-1.0, 10.0)),
        ..ChartOptions::default().dimensions(320, 240)
    };
    let spec = ChartSpec::new(ChartKind::Line, vec![vec![1.0, 2.0, 3.0]], options).expect("valid spec");

    for name in ["aborted.png", "aborted.svg"] {
        let path = dir.join(name);
        let err = render_to_path(&spec, &path).unwrap_err();
        assert!(matches!(err, VizError::InvalidConfiguration(_)));
        assert!(!path.exists(), "{} left behind", path.display());
    }
    let _ = std::fs::remove_dir_all(&dir);
}
