use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;
use track_finder::config::track::{self, OutputFormat, TrackDemoConfig};
use track_finder::detector::{edge_map, horizon_map};
use track_finder::diagnostics::BenchSummary;
use track_finder::edges::Roi;
use track_finder::image::io::{load_frame, save_gray_u8, save_rgba, write_json_file};
use track_finder::overlay::draw_track_overlay;
use track_finder::{DetectionReport, Frame, TrackDetector};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "track_demo".to_string());
    let config = track::parse_cli(&program)?;
    let detector = TrackDetector::new(config.params.clone());
    let multi = config.inputs.len() > 1;

    for input in &config.inputs {
        let loaded = load_frame(input, config.treat_as_ycbcr)?;
        let detailed = detector
            .process_with_diagnostics(&loaded.frame)
            .map_err(|e| format!("Analysis of {} failed: {e}", input.display()))?;
        let bench = run_bench(&detector, &loaded.frame, config.bench_iterations)
            .map_err(|e| format!("Bench on {} failed: {e}", input.display()))?;

        let report = DemoReport {
            input: input.clone(),
            report: &detailed,
            bench: bench.as_ref(),
        };
        emit_report(&config, input, multi, &report)?;

        if let Some(path) = &config.output.overlay_out {
            let path = per_input_path(path, input, multi);
            let mut canvas = loaded.canvas;
            draw_track_overlay(&mut canvas, &detailed.result);
            save_rgba(&canvas, &path)?;
            println!("Overlay written to {}", path.display());
        }

        if let Some(dir) = &config.output.debug_dir {
            save_debug_artifacts(dir, input, &loaded.frame, &detailed, &config)?;
            if config.output.format.includes_text() {
                println!("Debug artifacts written to {}", dir.display());
            } else {
                eprintln!("Debug artifacts written to {}", dir.display());
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoReport<'a> {
    input: PathBuf,
    report: &'a DetectionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    bench: Option<&'a BenchSummary>,
}

fn run_bench(
    detector: &TrackDetector,
    frame: &Frame,
    iterations: usize,
) -> track_finder::Result<Option<BenchSummary>> {
    if iterations == 0 {
        return Ok(None);
    }
    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        detector.process(frame)?;
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
    }
    Ok(Some(BenchSummary::from_samples(&samples)))
}

fn emit_report(
    config: &TrackDemoConfig,
    input: &Path,
    multi: bool,
    report: &DemoReport<'_>,
) -> Result<(), String> {
    let format = config.output.format;
    if format.includes_text() {
        print_text_summary(report);
    }
    if format.includes_json() {
        if let Some(path) = &config.output.json_out {
            let path = per_input_path(path, input, multi);
            write_json_file(&path, report)?;
            println!("JSON report written to {}", path.display());
        } else {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            if format == OutputFormat::Both {
                println!("\nJSON report:\n{json}");
            } else {
                println!("{json}");
            }
        }
    }
    Ok(())
}

fn print_text_summary(report: &DemoReport<'_>) {
    let res = &report.report.result;
    let trace = &report.report.trace;
    println!("{}", report.input.display());
    println!(
        "  frame: {}x{} {} (grid {}x{})",
        trace.input.width,
        trace.input.height,
        trace.input.color_model,
        trace.input.sample_grid.width,
        trace.input.sample_grid.height
    );
    match &res.target {
        Some(t) => println!("  track: [{}, {}) center={}", t.left, t.right, t.center_x()),
        None => println!(
            "  track: unresolved ({} profile runs)",
            trace.track_edges.runs.len()
        ),
    }
    match &res.horizon {
        Some(h) => println!(
            "  horizon: {:.3} (mean delta {})",
            h.fraction, h.mean_delta
        ),
        None => println!("  horizon: undetermined"),
    }
    println!(
        "  rows kept/rejected: {}/{}",
        trace.track_edges.rows_kept, trace.track_edges.rows_rejected
    );
    if let Some(stage) = &trace.horizon {
        let deltas: Vec<u8> = stage.candidates.iter().map(|c| c.mean_delta).collect();
        println!("  horizon candidates: {deltas:?} chosen={:?}", stage.chosen);
    }
    println!("  latency_ms: {:.3}", res.latency_ms);
    if let Some(b) = report.bench {
        println!(
            "  bench: {} runs mean={:.3} min={:.3} max={:.3} ms",
            b.iterations, b.mean_ms, b.min_ms, b.max_ms
        );
    }
}

fn save_debug_artifacts(
    dir: &Path,
    input: &Path,
    frame: &Frame,
    detailed: &DetectionReport,
    config: &TrackDemoConfig,
) -> Result<(), String> {
    let stem = file_stem(input);
    let edges = edge_map(frame, &config.params);
    if !edges.image.data.is_empty() {
        save_gray_u8(&edges.image, &dir.join(format!("{stem}_edge_map.png")))?;
    }
    if let Some(target) = &detailed.result.target {
        let roi = Roi::columns(target.left, target.right, frame.height());
        let map = horizon_map(frame, roi, &config.params);
        if !map.data.is_empty() {
            save_gray_u8(&map, &dir.join(format!("{stem}_horizon_map.png")))?;
        }
    }
    write_json_file(&dir.join(format!("{stem}_report.json")), detailed)
}

/// With several inputs, suffix `path` with the input's stem so reports do not
/// overwrite each other.
fn per_input_path(path: &Path, input: &Path, multi: bool) -> PathBuf {
    if !multi {
        return path.to_path_buf();
    }
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{base}_{}.{}", file_stem(input), ext.to_string_lossy()),
        None => format!("{base}_{}", file_stem(input)),
    };
    path.with_file_name(name)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string())
}
