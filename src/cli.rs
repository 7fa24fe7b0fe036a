/*!
plotspec Command Line Interface

Builds a plot from a JSON data file or a named dataset and writes the
Vega-Lite specification to stdout or a file.
*/

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plotspec::data::{datasets, rows_from_json};
use plotspec::plot::{self, PlotKind};
use plotspec::theme::{set_theme, Theme};
use plotspec::writer::{VegaLiteWriter, Writer};
use plotspec::{Data, VERSION};

#[derive(Parser)]
#[command(name = "plotspec")]
#[command(about = "Declarative plotting on top of Vega-Lite")]
#[command(version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a plot and write its Vega-Lite specification
    Plot {
        /// Plot kind (scatter, line, bar, histogram, ...)
        kind: String,

        /// JSON data file, URL or registered dataset name
        #[arg(long)]
        data: String,

        /// Fields to plot, in the order expected by the plot kind
        #[arg(long = "field", short = 'f', num_args = 1..)]
        fields: Vec<String>,

        /// Plot options as a JSON object
        #[arg(long)]
        opts: Option<String>,

        /// Built-in theme applied to the result
        #[arg(long)]
        theme: Option<String>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the options accepted by a plot kind
    Options {
        /// Plot kind
        kind: String,
    },

    /// List the registered dataset names
    Datasets,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plotspec=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plot {
            kind,
            data,
            fields,
            opts,
            theme,
            compact,
            output,
        } => {
            let kind: PlotKind = kind.parse()?;
            let opts = match opts {
                Some(text) => serde_json::from_str(&text).context("--opts is not valid JSON")?,
                None => Value::Null,
            };

            let mut spec = plot::build(kind, load_data(&data)?, &fields, opts)?;
            if let Some(name) = theme {
                spec = set_theme(spec, &Theme::from_name(&name)?);
            }

            let writer = VegaLiteWriter::new().pretty(!compact);
            match output {
                Some(path) => {
                    writer.write_to_file(&spec, &path)?;
                    info!("Vega-Lite JSON written to: {}", path.display());
                }
                None => println!("{}", writer.write(&spec)?),
            }
        }

        Commands::Options { kind } => {
            let kind: PlotKind = kind.parse()?;
            println!("# {} ({})\n", kind, kind.fields().join(", "));
            print!("{}", plot::option_set(kind)?.docs());
        }

        Commands::Datasets => {
            for name in datasets::names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

/// Inline rows from a JSON file, a URL, or a registered dataset
fn load_data(source: &str) -> anyhow::Result<Data> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(Data::url(source));
    }

    let path = Path::new(source);
    if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        let rows = rows_from_json(&value)?;
        info!("Loaded {} rows from {}", rows.len(), path.display());
        return Ok(Data::Rows(rows));
    }

    if datasets::is_known(source) {
        return Ok(Data::dataset(source));
    }
    bail!(
        "'{}' is neither a file, a URL nor a dataset name (see `plotspec datasets`)",
        source
    )
}
