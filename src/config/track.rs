use crate::TrackParams;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Which report(s) the demo prints to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Report file; one input writes the path as given, several inputs
    /// append the input's file stem.
    pub json_out: Option<PathBuf>,
    /// Annotated copy of each input with the track overlay.
    pub overlay_out: Option<PathBuf>,
    /// Edge map and horizon map PNGs per input.
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TrackDemoConfig {
    pub inputs: Vec<PathBuf>,
    /// Reinterpret RGB input as a 4:2:0 luma-chroma frame.
    #[serde(default)]
    pub treat_as_ycbcr: bool,
    /// Repeat the analysis this many times per input and report latency.
    #[serde(default)]
    pub bench_iterations: usize,
    #[serde(default)]
    pub params: TrackParams,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<TrackDemoConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: TrackDemoConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    if config.inputs.is_empty() {
        return Err(format!("Config {} lists no inputs", path.display()));
    }
    Ok(config)
}

/// Load the config named by the first command-line argument.
pub fn parse_cli(program: &str) -> Result<TrackDemoConfig, String> {
    let path = env::args()
        .nth(1)
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    load_config(Path::new(&path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: TrackDemoConfig = serde_json::from_str(r#"{ "inputs": ["a.png"] }"#).unwrap();
        assert_eq!(cfg.inputs, vec![PathBuf::from("a.png")]);
        assert!(!cfg.treat_as_ycbcr);
        assert_eq!(cfg.bench_iterations, 0);
        assert_eq!(cfg.params, TrackParams::default());
        assert_eq!(cfg.output.format, OutputFormat::Text);
        assert!(cfg.output.json_out.is_none());
    }

    #[test]
    fn params_and_output_are_parsed() {
        let cfg: TrackDemoConfig = serde_json::from_str(
            r#"{
                "inputs": ["a.png", "b.jpg"],
                "treat_as_ycbcr": true,
                "bench_iterations": 20,
                "params": { "binaryThreshold": 100 },
                "output": { "format": "both", "debug_dir": "out/debug" }
            }"#,
        )
        .unwrap();
        assert!(cfg.treat_as_ycbcr);
        assert_eq!(cfg.params.binary_threshold, 100);
        assert_eq!(cfg.params.stripe_divisor, 16);
        assert!(cfg.output.format.includes_text() && cfg.output.format.includes_json());
        assert_eq!(cfg.output.debug_dir, Some(PathBuf::from("out/debug")));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_config(Path::new("/nonexistent/track.json")).unwrap_err();
        assert!(err.starts_with("Failed to read config"));
    }
}
