// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Codeaudit CLI - Custom Code Auditor

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use codeaudit::render::render_region;
use codeaudit::{
    render_json, render_text, AuditConfig, AuditStatus, Auditor, Error, ErrorContext,
    JsonFileSource, Region, RegionReport, ResourceExtractor, Result, TrustClassifier,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("codeaudit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "audit" => {
            if args.len() < 3 {
                eprintln!("Usage: codeaudit audit <pages.json> [--trusted <config.json>] [--json]");
                return ExitCode::from(1);
            }
            match Options::parse(Command::Audit, &args[3..]) {
                Ok(opts) => audit_pages(&args[2], &opts).await,
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::from(1)
                }
            }
        }
        "scan" => {
            if args.len() < 3 {
                eprintln!(
                    "Usage: codeaudit scan <fragment.html> \
                     [--trusted <config.json>] [--json] [--head]"
                );
                return ExitCode::from(1);
            }
            match Options::parse(Command::Scan, &args[3..]) {
                Ok(opts) => scan_fragment(&args[2], &opts).await,
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::from(1)
                }
            }
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("codeaudit {}", codeaudit::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Codeaudit - Custom Code Auditor

USAGE:
    codeaudit <COMMAND> [OPTIONS]

COMMANDS:
    audit <pages.json>      Audit the selected page of a page export
    scan <fragment.html>    Audit a single raw HTML fragment
    help                    Show this help message
    version                 Show version information

OPTIONS:
    --trusted <config.json> Trusted origins config ({{"trusted_origins": [...]}})
    --json                  Print the report as JSON
    --head                  (scan only) Report the fragment as <head> code

EXIT CODES:
    0   Nothing needs review
    1   Error
    2   Unknown origins or inline code found

EXAMPLES:
    codeaudit audit pages.json
    codeaudit scan head.html --trusted trusted.json --json
"#
    );
}

/// Subcommands that take options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Audit,
    Scan,
}

/// Command options shared by `audit` and `scan`
#[derive(Debug)]
struct Options {
    config: AuditConfig,
    json: bool,
    /// Region a scanned fragment is reported under
    region: Region,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: AuditConfig::default(),
            json: false,
            region: Region::Body,
        }
    }
}

impl Options {
    fn parse(command: Command, args: &[String]) -> Result<Self> {
        let mut opts = Options::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => opts.json = true,
                "--head" if command == Command::Scan => opts.region = Region::Head,
                "--trusted" => {
                    let path = iter
                        .next()
                        .ok_or_else(|| Error::from("--trusted requires a path"))?;
                    opts.config =
                        AuditConfig::from_json_file(path).context("loading trusted origins")?;
                }
                other => return Err(format!("Unknown option: {}", other).into()),
            }
        }

        Ok(opts)
    }
}

fn exit_for(needs_review: bool) -> ExitCode {
    if needs_review {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

async fn audit_pages(path: &str, opts: &Options) -> ExitCode {
    let auditor = Auditor::new(Arc::new(JsonFileSource::new(path)), &opts.config);

    let result = auditor.run().await;
    let status = AuditStatus::from_result(&result);

    let report = match result {
        Ok(report) => report,
        Err(_) => {
            eprintln!("{}", status);
            return ExitCode::from(1);
        }
    };

    if opts.json {
        match render_json(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        print!("{}", render_text(&report));
        println!("\n{}", status);
    }

    exit_for(report.needs_review())
}

async fn scan_fragment(path: &str, opts: &Options) -> ExitCode {
    let html = match tokio::fs::read_to_string(path).await {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            return ExitCode::from(1);
        }
    };

    let extractor = ResourceExtractor::from_config(&opts.config);
    let classifier = TrustClassifier::from_config(&opts.config);
    let region = RegionReport::audit(opts.region, html, &extractor, &classifier);

    if opts.json {
        match serde_json::to_string_pretty(&region) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        let mut out = String::new();
        render_region(&mut out, &region);
        print!("{}", out);
    }

    exit_for(region.entries.needs_review())
}
