#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use lx_core::dates::IsoDate;
use lx_core::input::{Amendment, ParsedNorm};
use lx_storage::{LoadPolicy, SqliteStore};
use serde_json::json;

fn usage() -> &'static str {
    "lx_cli — temporal store for amended legal documents\n\n\
USAGE:\n\
  lx_cli [--storage-dir DIR] <COMMAND>\n\n\
COMMANDS:\n\
  reset                             drop all rows, re-apply schema\n\
  load <parsed.json> [--strict]     initial load of a parsed norm\n\
  apply-amendment <amendment.json>  apply one amendment\n\
  apply-all <amendments-dir>        apply a directory of amendments, chronologically\n\
  verify                            run the invariant checks (exit 1 on failure)\n\
  query --date YYYY-MM-DD [--component ID] [--top-k N]\n\
  history --component ID\n\
  provenance [--amendment N] [--component ID] [--top-k N]\n\
  impact --scope ID --from YYYY-MM-DD --to YYYY-MM-DD\n\n\
ENVIRONMENT:\n\
  LX_STORAGE_DIR  storage directory when --storage-dir is absent\n\
  LX_LOG          log filter (tracing EnvFilter syntax, default: info)\n"
}

#[derive(Debug)]
enum Command {
    Reset,
    Load { path: PathBuf, strict: bool },
    ApplyAmendment { path: PathBuf },
    ApplyAll { dir: PathBuf },
    Verify,
    Query {
        date: IsoDate,
        component: Option<String>,
        top_k: usize,
    },
    History { component: String },
    Provenance {
        amendment: Option<i64>,
        component: Option<String>,
        top_k: usize,
    },
    Impact {
        scope: String,
        from: IsoDate,
        to: IsoDate,
    },
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> Result<IsoDate, String> {
    IsoDate::try_new(value).map_err(|err| err.to_string())
}

fn parse_args(args: &[String]) -> Result<(PathBuf, Command), String> {
    let mut storage_dir: Option<PathBuf> = None;
    let mut command: Option<&str> = None;
    let mut operands: Vec<&str> = Vec::new();
    let mut strict = false;
    let mut date: Option<IsoDate> = None;
    let mut from: Option<IsoDate> = None;
    let mut to: Option<IsoDate> = None;
    let mut component: Option<String> = None;
    let mut scope: Option<String> = None;
    let mut amendment: Option<i64> = None;
    let mut top_k: usize = lx_core::plan::DEFAULT_TOP_K;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut take_value = |name: &str| -> Result<String, String> {
            iter.next()
                .map(|v| v.to_string())
                .ok_or_else(|| format!("{name} requires a value"))
        };
        match arg.as_str() {
            "--help" | "-h" => return Err(usage().to_string()),
            "--storage-dir" => storage_dir = Some(PathBuf::from(take_value("--storage-dir")?)),
            "--strict" => strict = true,
            "--date" => date = Some(parse_date(&take_value("--date")?)?),
            "--from" => from = Some(parse_date(&take_value("--from")?)?),
            "--to" => to = Some(parse_date(&take_value("--to")?)?),
            "--component" => component = Some(take_value("--component")?),
            "--scope" => scope = Some(take_value("--scope")?),
            "--amendment" => {
                amendment = Some(
                    take_value("--amendment")?
                        .parse()
                        .map_err(|_| "--amendment requires an integer".to_string())?,
                )
            }
            "--top-k" => {
                top_k = take_value("--top-k")?
                    .parse()
                    .map_err(|_| "--top-k requires an integer".to_string())?
            }
            value if value.starts_with("--") => {
                return Err(format!("unknown flag: {value}\n\n{}", usage()));
            }
            value if command.is_none() => command = Some(value),
            value => operands.push(value),
        }
    }

    let storage_dir = storage_dir
        .or_else(|| env_var("LX_STORAGE_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./data"));

    let command = match command {
        Some("reset") => Command::Reset,
        Some("load") => Command::Load {
            path: operand_path(&operands, "load <parsed.json>")?,
            strict,
        },
        Some("apply-amendment") => Command::ApplyAmendment {
            path: operand_path(&operands, "apply-amendment <amendment.json>")?,
        },
        Some("apply-all") => Command::ApplyAll {
            dir: operand_path(&operands, "apply-all <amendments-dir>")?,
        },
        Some("verify") => Command::Verify,
        Some("query") => Command::Query {
            date: date.ok_or("query requires --date")?,
            component,
            top_k,
        },
        Some("history") => Command::History {
            component: component.ok_or("history requires --component")?,
        },
        Some("provenance") => Command::Provenance {
            amendment,
            component,
            top_k,
        },
        Some("impact") => Command::Impact {
            scope: scope.ok_or("impact requires --scope")?,
            from: from.ok_or("impact requires --from")?,
            to: to.ok_or("impact requires --to")?,
        },
        Some(other) => return Err(format!("unknown command: {other}\n\n{}", usage())),
        None => return Err(usage().to_string()),
    };

    Ok((storage_dir, command))
}

fn operand_path(operands: &[&str], what: &str) -> Result<PathBuf, String> {
    operands
        .first()
        .map(|path| PathBuf::from(*path))
        .ok_or_else(|| format!("usage: lx_cli {what}"))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("read {}: {err}", path.display()))?;
    serde_json::from_str(&raw).map_err(|err| format!("parse {}: {err}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("render output: {err}"),
    }
}

fn run(storage_dir: PathBuf, command: Command) -> Result<ExitCode, String> {
    let mut store = SqliteStore::open(&storage_dir).map_err(|err| err.to_string())?;

    match command {
        Command::Reset => {
            store.reset().map_err(|err| err.to_string())?;
            print_json(&json!({"reset": true}));
        }
        Command::Load { path, strict } => {
            let norm: ParsedNorm = read_json(&path)?;
            let policy = if strict {
                LoadPolicy::Strict
            } else {
                LoadPolicy::Merge
            };
            let stats = store.load_norm(&norm, policy).map_err(|err| err.to_string())?;
            print_json(&stats);
        }
        Command::ApplyAmendment { path } => {
            let amendment: Amendment = read_json(&path)?;
            let stats = store
                .apply_amendment(&amendment)
                .map_err(|err| err.to_string())?;
            print_json(&stats);
        }
        Command::ApplyAll { dir } => {
            let mut amendments: Vec<Amendment> = Vec::new();
            let entries = std::fs::read_dir(&dir)
                .map_err(|err| format!("read dir {}: {err}", dir.display()))?;
            for entry in entries {
                let entry = entry.map_err(|err| err.to_string())?;
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                    amendments.push(read_json(&path)?);
                }
            }
            let report = store.apply_all(&amendments);
            print_json(&report);
            if !report.errors.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Verify => {
            let report = store.verify().map_err(|err| err.to_string())?;
            print_json(&report);
            if !report.ok {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Query {
            date,
            component,
            top_k,
        } => {
            let results = store
                .point_in_time(component.as_deref(), date.as_str(), top_k)
                .map_err(|err| err.to_string())?;
            print_json(&results);
        }
        Command::History { component } => {
            let entries = store
                .version_history(&component)
                .map_err(|err| err.to_string())?;
            print_json(&entries);
        }
        Command::Provenance {
            amendment,
            component,
            top_k,
        } => {
            let results = store
                .provenance(amendment, component.as_deref(), top_k)
                .map_err(|err| err.to_string())?;
            print_json(&results);
        }
        Command::Impact { scope, from, to } => {
            let report = store
                .hierarchical_impact(&scope, from.as_str(), to.as_str())
                .map_err(|err| err.to_string())?;
            print_json(&report);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("LX_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (storage_dir, command) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(storage_dir, command) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
