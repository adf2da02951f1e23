use repdiff_core::{ComparisonReport, compare_files, detect_format};
use serde::Serialize;
use std::path::Path;

const TOOL: &str = "repdiff-cli";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Help,
    Core(repdiff_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Help => write!(f, "help requested"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<repdiff_core::Error> for CliError {
    fn from(value: repdiff_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn usage() -> &'static str {
    "repdiff-cli\n\
\n\
USAGE:\n\
  repdiff-cli [--json] [--pretty] <path1> <path2>\n\
\n\
NOTES:\n\
  - <path1> and <path2> are .txt or .xml pipeline/trigger report files, in any combination.\n\
  - Mismatches are printed in three sections: key presence, attribute presence, nested values.\n\
  - --json prints the whole report as JSON instead of text; --pretty indents it.\n\
"
}

#[derive(Debug, Default)]
struct Args {
    json: bool,
    pretty: bool,
    paths: Vec<String>,
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    for a in argv.iter().skip(1) {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Help),
            "--json" => args.json = true,
            "--pretty" => args.pretty = true,
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => args.paths.push(path.to_string()),
        }
    }

    if args.paths.len() != 2 {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

#[derive(Serialize)]
struct ReportOut<'a> {
    file1: &'a str,
    file2: &'a str,
    report: &'a ComparisonReport,
}

fn run(args: &Args) -> Result<(), CliError> {
    let path1 = Path::new(&args.paths[0]);
    let path2 = Path::new(&args.paths[1]);

    // An extension outside txt/xml is a usage problem, not a comparison error.
    if detect_format(path1).is_none() || detect_format(path2).is_none() {
        return Err(CliError::Usage(usage()));
    }

    let report = compare_files(path1, path2)?;

    if args.json {
        let out = ReportOut {
            file1: &args.paths[0],
            file2: &args.paths[1],
            report: &report,
        };
        if args.pretty {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &out)?;
        } else {
            serde_json::to_writer(std::io::stdout().lock(), &out)?;
        }
        println!();
        return Ok(());
    }

    let text = report.render_text();
    if !text.is_empty() {
        println!("{text}");
        println!();
    }
    println!("{TOOL} terminated on SUCCESS.");
    Ok(())
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(v) => v,
        Err(CliError::Help) => {
            println!("{}", usage());
            std::process::exit(0);
        }
        Err(CliError::Usage(msg)) => {
            println!("{msg}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(&args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            println!("{msg}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{TOOL} terminated on error.");
            std::process::exit(1);
        }
    }
}
