#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::{
    error::Error,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use jsoncompare::{
    render_tree, validate, CompareClient, DifferenceRecord, RenderedNode, Side, ValidationResult,
};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "jsoncompare-cli",
    version,
    about = "Render two JSON documents side by side with their differences highlighted"
)]
struct Args {
    /// First JSON document
    first: PathBuf,
    /// Second JSON document
    second: PathBuf,
    /// Base URL of the comparison service, e.g. http://localhost:3000/api
    #[arg(
        long,
        value_name = "URL",
        conflicts_with = "diffs",
        required_unless_present = "diffs"
    )]
    service_url: Option<String>,
    /// JSON file holding a precomputed difference list
    #[arg(long, value_name = "FILE")]
    diffs: Option<PathBuf>,
    /// Which side(s) to render
    #[arg(long, value_enum, default_value = "both")]
    side: SideChoice,
    /// Label for the root node; with an empty label paths start at the
    /// top-level keys, matching the comparison service's addresses
    #[arg(long, value_name = "LABEL", default_value = "")]
    root_label: String,
    /// Spaces per nesting level
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SideChoice {
    Value1,
    Value2,
    Both,
}

impl SideChoice {
    fn sides(self) -> &'static [Side] {
        match self {
            SideChoice::Value1 => &[Side::Value1],
            SideChoice::Value2 => &[Side::Value2],
            SideChoice::Both => &[Side::Value1, Side::Value2],
        }
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Value1 => "value1",
        Side::Value2 => "value2",
    }
}

fn load(path: &Path, field_name: &str) -> Result<Value, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|error| format!("failed to read {}: {error}", path.display()))?;
    match validate(&text, field_name) {
        ValidationResult::Valid(value) => Ok(value),
        ValidationResult::Invalid(message) => Err(message.into()),
    }
}

fn obtain_diffs(
    args: &Args,
    first: &Value,
    second: &Value,
) -> Result<Vec<DifferenceRecord>, Box<dyn Error>> {
    if let Some(path) = &args.diffs {
        let text = fs::read_to_string(path)
            .map_err(|error| format!("failed to read {}: {error}", path.display()))?;
        let records = serde_json::from_str(&text)
            .map_err(|error| format!("failed to parse {}: {error}", path.display()))?;
        Ok(records)
    } else if let Some(base_url) = &args.service_url {
        let client = CompareClient::new(base_url.as_str());
        Ok(client.compare(first, second)?)
    } else {
        Err("either --service-url or --diffs must be provided".into())
    }
}

fn print_tree(out: &mut impl Write, tree: &RenderedNode, indent: usize) -> io::Result<()> {
    // The unlabeled root is a path seed, not a row of its own.
    let skip_root = tree.key.is_empty();
    let offset = usize::from(skip_root);
    for node in tree.iter() {
        if skip_root && node.depth == 0 {
            continue;
        }
        let marker = if node.is_different { '~' } else { ' ' };
        let padding = (node.depth - offset) * indent;
        match node.display_text() {
            Some(text) => writeln!(out, "{marker} {:padding$}{}: {text}", "", node.key)?,
            None => writeln!(out, "{marker} {:padding$}{}", "", node.key)?,
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<bool, Box<dyn Error>> {
    let first = load(&args.first, "first JSON")?;
    let second = load(&args.second, "second JSON")?;
    let diffs = obtain_diffs(args, &first, &second)?;

    let mut stdout = io::stdout().lock();
    for &side in args.side.sides() {
        let document = match side {
            Side::Value1 => &first,
            Side::Value2 => &second,
        };
        let tree = render_tree(document, &args.root_label, &diffs, side);
        writeln!(stdout, "--- {} ---", side_name(side))?;
        print_tree(&mut stdout, &tree, args.indent)?;
    }
    Ok(!diffs.is_empty())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(2)
        }
    }
}
