//! jakarta-analyzer CLI

use anyhow::{Context, Result};
use clap::Parser;
use jakarta_analyzer::{
    analyze_files, codes, get_formatter, CompilationUnit, Config, Engine, OutputFormat, Severity,
};
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(
    name = "jakarta-analyzer",
    version,
    about = "CDI diagnostics and quick fixes for Java sources"
)]
struct Cli {
    /// Files or directories to analyze
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Drop diagnostics below this severity (info, warning, error)
    #[arg(long)]
    min_severity: Option<String>,

    /// Configuration file (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Apply the first available quick fix for each diagnostic in place
    #[arg(long)]
    fix: bool,

    /// List all rule codes and exit
    #[arg(long)]
    list_rules: bool,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    if cli.list_rules {
        for code in codes::ALL {
            println!("{}", code);
        }
        return Ok(0);
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path).context("loading configuration")?,
        None => Config::default(),
    };
    if let Some(min) = &cli.min_severity {
        config.min_severity = min
            .parse::<Severity>()
            .map_err(|_| anyhow::anyhow!("invalid severity '{}'", min))?;
    }

    let engine = Engine::with_config(config);
    let files = discover_files(&cli.paths)?;
    if files.is_empty() {
        anyhow::bail!("no Java source files found");
    }

    if cli.fix {
        let mut applied = 0usize;
        for file in &files {
            applied += apply_fixes(file, &engine)?;
        }
        println!("Applied {} fix{}", applied, if applied == 1 { "" } else { "es" });
    }

    let reports = analyze_files(&files, &engine);

    let formatter = get_formatter(cli.format);
    print!("{}", formatter.format(&reports));

    let has_errors = reports
        .iter()
        .flat_map(|r| &r.diagnostics)
        .any(|d| d.severity == Severity::Error);
    let has_warnings = reports
        .iter()
        .flat_map(|r| &r.diagnostics)
        .any(|d| d.severity == Severity::Warning);

    Ok(if has_errors {
        2
    } else if has_warnings {
        1
    } else {
        0
    })
}

/// Expand paths into the set of Java source files to analyze
fn discover_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.context("walking directory")?;
                if entry.file_type().is_file()
                    && entry.path().extension().and_then(|e| e.to_str()) == Some("java")
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Repeatedly resolve and apply the first available fix until the file is
/// clean or nothing more resolves
fn apply_fixes(file: &PathBuf, engine: &Engine) -> Result<usize> {
    const MAX_PASSES: usize = 16;
    let mut applied = 0usize;

    for _ in 0..MAX_PASSES {
        let source =
            std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
        let Ok(unit) = CompilationUnit::parse(&source, file) else {
            break;
        };

        let diagnostics = engine.collect_diagnostics(&unit);
        let mut fixed = false;

        for diagnostic in &diagnostics {
            let candidates = engine.get_code_actions(&unit, diagnostic);
            let Some(candidate) = candidates.first() else {
                continue;
            };
            let Ok(resolved) = engine.resolve_code_action(&unit, candidate) else {
                continue;
            };
            if let Some(new_source) = resolved.edit.apply_to(&unit.uri(), &source) {
                std::fs::write(file, new_source)
                    .with_context(|| format!("writing {}", file.display()))?;
                log::debug!("applied '{}' to {}", candidate.label, file.display());
                applied += 1;
                fixed = true;
                break;
            }
        }

        if !fixed {
            break;
        }
    }

    Ok(applied)
}
