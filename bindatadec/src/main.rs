//! Data decoder command-line tool.
//!
//! Usage: datadec [OPTIONS] <COMMAND>
//!
//! Commands:
//!   yaml      Decode a YAML-like document (JSON, YAML, TOML or CBOR out)
//!   num       Convert numerals between bin, oct, dec and hex
//!   settings  Show or change the saved number settings
//!
//! Options:
//!       --config <PATH>  Settings file [default: data_decoder_config.json]
//!   -v, --verbose...     More logging (-v info, -vv debug, -vvv trace)
//!   -h, --help           Print help
//!   -V, --version        Print version

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use libdatadec::{convert_bases, convert_lines, decode_str, Base};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

mod logging;
mod settings;
mod transcode;

use settings::{Settings, DEFAULT_CONFIG};
use transcode::{render, Format, Rendered};

#[derive(Parser)]
#[command(name = "datadec", version, about = "Decode YAML-like documents and convert numerals")]
struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a YAML-like document
    Yaml {
        file: PathBuf,

        /// Output format
        #[arg(short = 't', long = "to", value_enum, default_value_t = Format::Json)]
        to: Format,

        /// Write output to this file
        #[arg(short, long, conflicts_with = "write")]
        output: Option<PathBuf>,

        /// Write output next to the input as <FILE>.decoded.<ext>
        #[arg(short, long)]
        write: bool,
    },
    /// Convert a numeral, or every line of a file
    Num {
        /// A value, or a file with one value per line (stdin when absent)
        input: Option<String>,

        /// Input base (bin, oct, dec, hex); defaults to the saved setting
        #[arg(long)]
        from: Option<Base>,

        /// Output base (bin, oct, dec, hex); defaults to the saved setting
        #[arg(long)]
        to: Option<Base>,

        /// Convert each whitespace-separated byte on its own
        #[arg(long, conflicts_with = "whole")]
        per_byte: bool,

        /// Convert the input as one whole value
        #[arg(long)]
        whole: bool,

        /// Write converted lines to this file instead of <stem>_decoded.txt
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change the saved number settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    /// Set the input base
    SetIn { base: Base },
    /// Set the output base
    SetOut { base: Base },
    /// Switch between per-byte and whole-value conversion
    TogglePerByte,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Yaml {
            file,
            to,
            output,
            write,
        } => {
            let output = if write {
                Some(decoded_path(&file, to))
            } else {
                output
            };
            run_yaml(&file, to, output.as_deref())
        }
        Commands::Num {
            input,
            from,
            to,
            per_byte,
            whole,
            output,
        } => {
            let settings = Settings::load(&cli.config);
            let Some((base_in, base_out)) = settings.resolve_bases(from, to) else {
                bail!("set both input and output number types before converting");
            };
            let per_byte = if per_byte {
                true
            } else if whole {
                false
            } else {
                settings.per_byte
            };
            let job = NumJob {
                base_in,
                base_out,
                per_byte,
            };
            run_num(&job, input.as_deref(), output.as_deref())
        }
        Commands::Settings { action } => run_settings(&cli.config, action),
    }
}

fn run_yaml(file: &Path, format: Format, output: Option<&Path>) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let tree = decode_str(&source);
    let rendered = render(&tree, format)?;

    match output {
        Some(path) => {
            fs::write(path, rendered.into_bytes())
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            println!("Decoded YAML written to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            match rendered {
                Rendered::Text(text) => writeln!(stdout, "{}", text)?,
                Rendered::Binary(bytes) => stdout.write_all(&bytes)?,
            }
        }
    }
    Ok(())
}

struct NumJob {
    base_in: Base,
    base_out: Base,
    per_byte: bool,
}

fn run_num(job: &NumJob, input: Option<&str>, output: Option<&Path>) -> Result<()> {
    info!(
        from = %job.base_in,
        to = %job.base_out,
        per_byte = job.per_byte,
        "converting numerals"
    );

    match input {
        Some(value) if Path::new(value).is_file() => {
            let path = Path::new(value);
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let converted = convert_text(job, &text)?;
            let out_path = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| converted_path(path));
            fs::write(&out_path, converted.join("\n"))
                .with_context(|| format!("Failed to write to file: {}", out_path.display()))?;
            println!("Converted value saved to: {}", out_path.display());
        }
        Some(value) => {
            let result = convert_bases(value, job.base_out, job.base_in, job.per_byte)?;
            println!("Converted value: {}", result);
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            for line in convert_text(job, &text)? {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Convert every non-blank line, reporting failures on stderr.
///
/// Fails only when nothing converted.
fn convert_text(job: &NumJob, text: &str) -> Result<Vec<String>> {
    let report = convert_lines(text.lines(), job.base_out, job.base_in, job.per_byte);
    for failure in &report.failures {
        eprintln!(
            "Failed to convert line {}: {} ({})",
            failure.line_num, failure.line, failure.error
        );
    }
    if report.converted.is_empty() {
        bail!("No valid values were converted");
    }
    Ok(report.converted)
}

fn run_settings(config: &Path, action: SettingsAction) -> Result<()> {
    let mut settings = Settings::load(config);
    match action {
        SettingsAction::Show => {
            println!("{}", settings.describe());
            return Ok(());
        }
        SettingsAction::SetIn { base } => {
            settings.selected_input_base = Some(base);
            println!("Input number type set to: {}", base);
        }
        SettingsAction::SetOut { base } => {
            settings.selected_output_base = Some(base);
            println!("Output number type set to: {}", base);
        }
        SettingsAction::TogglePerByte => {
            settings.per_byte = !settings.per_byte;
            println!(
                "Per-byte conversion {}",
                if settings.per_byte { "enabled" } else { "disabled" }
            );
        }
    }
    settings.persist(config);
    Ok(())
}

/// `<FILE>.decoded.<ext>`, next to the input.
fn decoded_path(file: &Path, format: Format) -> PathBuf {
    let mut name = file.as_os_str().to_os_string();
    name.push(".decoded.");
    name.push(format.extension());
    PathBuf::from(name)
}

/// `<stem>_decoded.txt`, next to the input.
fn converted_path(file: &Path) -> PathBuf {
    let mut name = file.with_extension("").into_os_string();
    name.push("_decoded.txt");
    PathBuf::from(name)
}
