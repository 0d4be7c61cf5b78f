//! Command-line front end for the node registry.
//!
//! Loads the configured (or `--source`) node list into a registry, optionally
//! replaces it with a JSON node array, then answers one query and prints the
//! result as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result, anyhow, bail};
use noderegistry::logging::init_tracing;
use noderegistry::{NodeRegistry, RegistryConfig, ingest_report, load_nodes_json};
use serde::Serialize;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info;

fn main() {
    init_tracing();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let args = CliArgs::parse()?;
    let config = RegistryConfig::from_env()?;
    let source = args.source.unwrap_or(config.source);
    info!(registry_url = %config.registry_url, source = %source, "starting node registry");

    let report = ingest_report(&source)?;
    if args.check {
        print_json(&report.skipped)?;
        return Ok(if report.is_clean() { 0 } else { 1 });
    }

    let registry = NodeRegistry::with_nodes(report.nodes);
    if let Some(path) = args.replace {
        let nodes = load_nodes_json(&path)?;
        registry.replace(nodes);
    }

    match args.query {
        Query::List => print_json(&registry.nodes())?,
        Query::Id(id) => {
            let node = registry
                .lookup_by_id(&id)
                .ok_or_else(|| anyhow!("node not found: {id}"))?;
            print_json(&node)?;
        }
        Query::Summary(id) => {
            let summary = registry
                .summary_by_id(&id)
                .ok_or_else(|| anyhow!("node not found: {id}"))?;
            println!("{}", summary.render()?);
        }
        Query::Capability(name) => print_json(&registry.lookup_by_capability(&name))?,
    }
    Ok(0)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

enum Query {
    List,
    Id(String),
    Summary(String),
    Capability(String),
}

struct CliArgs {
    source: Option<String>,
    replace: Option<PathBuf>,
    query: Query,
    check: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut source: Option<String> = None;
        let mut replace: Option<PathBuf> = None;
        let mut query: Option<Query> = None;
        let mut check = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            let next_query = match arg.as_str() {
                "--source" => {
                    source = Some(next_value(&mut args, "--source")?);
                    None
                }
                "--replace" => {
                    replace = Some(PathBuf::from(next_value(&mut args, "--replace")?));
                    None
                }
                "--list" => Some(Query::List),
                "--id" => Some(Query::Id(next_value(&mut args, "--id")?)),
                "--summary" => Some(Query::Summary(next_value(&mut args, "--summary")?)),
                "--capability" => Some(Query::Capability(next_value(&mut args, "--capability")?)),
                "--check" => {
                    check = true;
                    None
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            };
            if let Some(next_query) = next_query {
                if query.is_some() {
                    bail!("only one of --list/--id/--summary/--capability may be given");
                }
                query = Some(next_query);
            }
        }

        if check && (query.is_some() || replace.is_some()) {
            bail!("--check cannot be combined with a query or --replace");
        }

        Ok(CliArgs {
            source,
            replace,
            query: query.unwrap_or(Query::List),
            check,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .with_context(|| format!("missing value for {flag}"))
}

fn print_usage() {
    eprintln!(
        "Usage: node-registry [--source ID] [--replace FILE] [--list | --id ID | --summary ID | --capability NAME | --check]\n\nOptions:\n  --source ID         Node list to ingest (file path, else bundled resource). Defaults to $NODE_REGISTRY_SOURCE or nodes.csv.\n  --replace FILE      Replace the loaded nodes with a JSON array of nodes before querying.\n  --list              Print every node as a JSON array (default).\n  --id ID             Print the node with this id.\n  --summary ID        Print the endpoint and capabilities of the node with this id.\n  --capability NAME   Print every node offering this capability.\n  --check             Print skipped source lines as JSON; exit 1 if any were skipped.\n\nExamples:\n  node-registry --capability \"Resource Catalogue\"\n  node-registry --source nodes.csv --check"
    );
}
