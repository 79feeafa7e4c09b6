//! `tojson`: convert a record XML document to JSON.
//!
//! Reads from `--xml <PATH>` or standard input and writes to `-f <PATH>` or
//! standard output. Any failure aborts with a non-zero exit status before
//! output is written.

use anyhow::Context;
use clap::Parser;
use record_xml::{JsonOptions, Record};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Convert record XML documents to JSON.
#[derive(Debug, Parser)]
#[command(name = "tojson", version, about)]
struct Args {
    /// XML file to read (standard input when omitted).
    #[arg(long = "xml", env = "RECORD_XML_INPUT")]
    input: Option<PathBuf>,

    /// File to write (standard output when omitted).
    #[arg(short = 'f', long = "output", env = "RECORD_XML_OUTPUT")]
    output: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Write single-line JSON.
    #[arg(long, conflicts_with = "indent")]
    compact: bool,

    /// Print a plain-text summary of each record instead of JSON.
    #[arg(long)]
    summary: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "RECORD_XML_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

impl Args {
    fn json_options(&self) -> JsonOptions {
        if self.compact {
            JsonOptions::compact()
        } else {
            JsonOptions::new().with_indent(self.indent)
        }
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("record_xml={},tojson={}", level, level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn read(args: &Args) -> anyhow::Result<Vec<Record>> {
    match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            record_xml::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to decode {}", path.display()))
        }
        None => record_xml::from_reader(io::stdin().lock())
            .context("failed to decode standard input"),
    }
}

fn render(args: &Args, records: &[Record]) -> anyhow::Result<Vec<u8>> {
    if args.summary {
        return Ok(records
            .iter()
            .map(ToString::to_string)
            .collect::<String>()
            .into_bytes());
    }

    let mut buffer = Vec::new();
    record_xml::to_writer_with_options(&mut buffer, records, &args.json_options())
        .context("failed to encode records")?;
    Ok(buffer)
}

fn write(args: &Args, bytes: &[u8]) -> anyhow::Result<()> {
    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            file.write_all(bytes)
                .and_then(|()| file.flush())
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .context("failed to write standard output")
        }
    }
}

/// Reads, decodes and renders everything before the output is opened.
fn run(args: &Args) -> anyhow::Result<()> {
    let records = read(args)?;
    info!(records = records.len(), "decoded document");

    let bytes = render(args, &records)?;
    write(args, &bytes)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(?args, "starting");

    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const XML: &str = r#"<root>
  <record index="3"><F C="AB" L="Title"><T> Hello<BR/>World. </T></F></record>
</root>"#;

    fn args(extra: &[&str]) -> Args {
        let argv = std::iter::once("tojson").chain(extra.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    fn records() -> Vec<Record> {
        record_xml::from_str(XML).unwrap()
    }

    #[test]
    fn test_summary_output() {
        let bytes = render(&args(&["--summary"]), &records()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "3: 1 fields\n  code: AB, name: Title\n    - Hello\nWorld\n"
        );
    }

    #[test]
    fn test_compact_output() {
        let bytes = render(&args(&["--compact"]), &records()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "[{\"Field\":[{\"Content\":[\"Hello\\nWorld\"],\"Code\":\"AB\",\"Name\":\"Title\"}],\"Index\":3}]\n"
        );
    }

    #[test]
    fn test_indent_option() {
        let bytes = render(&args(&["--indent", "2"]), &records()).unwrap();
        assert!(String::from_utf8(bytes).unwrap().starts_with("[\n  {\n    \"Field\""));
    }

    #[test]
    fn test_compact_conflicts_with_indent() {
        let argv = ["tojson", "--compact", "--indent", "2"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.xml");
        let output = dir.path().join("out.json");
        fs::write(&input, XML).unwrap();

        let args = args(&[
            "--xml",
            input.to_str().unwrap(),
            "-f",
            output.to_str().unwrap(),
        ]);
        run(&args).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, record_xml::to_string_pretty(&records()).unwrap());
    }

    #[test]
    fn test_failed_decode_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.xml");
        let output = dir.path().join("out.json");
        fs::write(&input, "<root><record index=\"1\"><F><T>cut").unwrap();

        let args = args(&[
            "--xml",
            input.to_str().unwrap(),
            "-f",
            output.to_str().unwrap(),
        ]);
        let err = run(&args).unwrap_err();

        assert!(err.to_string().contains("failed to decode"), "{}", err);
        assert!(!output.exists());
    }

    #[test]
    fn test_failed_decode_keeps_existing_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.xml");
        let output = dir.path().join("out.json");
        fs::write(&input, "<root><record>").unwrap();
        fs::write(&output, "previous").unwrap();

        let args = args(&[
            "--xml",
            input.to_str().unwrap(),
            "-f",
            output.to_str().unwrap(),
        ]);
        assert!(run(&args).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.xml");
        let args = args(&["--xml", missing.to_str().unwrap()]);

        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("failed to open"), "{}", err);
    }
}
