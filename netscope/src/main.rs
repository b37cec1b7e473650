use anyhow::{Context, Result};
use clap::Parser;
use netscope::config::{FlowTableConfig, PipelineConfig};
use netscope::pipeline::Pipeline;
use netscope_core::init_logging_with_level;
use netscope_ingest::FlowTableVariant;
use netscope_viz::ImageFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "netscope",
    version,
    about = "Render network simulator trace logs into per-flow and per-port charts"
)]
struct Cli {
    /// Path to a TOML pipeline config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory charts are written under
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Built-in flow table: full, focus5 or dense9
    #[arg(long)]
    flow_table: Option<String>,

    /// Image format: png or svg
    #[arg(long)]
    format: Option<String>,

    /// Process input files concurrently
    #[arg(long)]
    parallel: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Trace files or glob patterns; replaces the config's inputs
    inputs: Vec<String>,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if !self.inputs.is_empty() {
            config.inputs = self.inputs;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(name) = self.flow_table {
            let variant: FlowTableVariant = name.parse()?;
            config.flow_table = FlowTableConfig::Variant(variant);
        }
        if let Some(format) = self.format {
            let format: ImageFormat = format.parse()?;
            config.image_format = format;
        }
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging_with_level(&cli.log_level);

    let config = cli.into_config()?;
    let pipeline = Pipeline::new(config).context("Invalid pipeline configuration")?;
    let (_, summary) = pipeline.run()?;

    println!(
        "{} file(s), {} failed, {} record(s), {} chart(s) written, {} failed",
        summary.files, summary.files_failed, summary.records, summary.charts_written, summary.charts_failed
    );
    Ok(())
}
