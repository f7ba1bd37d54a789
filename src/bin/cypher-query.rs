//! run a single cypher statement from the command line
//!
//! command help reference (kept in sync with `cypher-query --help`):
#[doc = concat!("```text\n", include_str!("cypher-query-help.txt"), "\n```")]
pub const CLI_HELP: &str = include_str!("cypher-query-help.txt");

use cypher_http::{Client, ConnectionTarget, Results};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Raw,
    Int,
    Ints,
    String,
    Strings,
    Node,
    Nodes,
    Relationship,
    Relationships,
}

impl Shape {
    fn parse(name: &str) -> Option<Self> {
        let shape = match name {
            "raw" => Shape::Raw,
            "int" => Shape::Int,
            "ints" => Shape::Ints,
            "string" => Shape::String,
            "strings" => Shape::Strings,
            "node" => Shape::Node,
            "nodes" => Shape::Nodes,
            "relationship" => Shape::Relationship,
            "relationships" => Shape::Relationships,
            _ => return None,
        };
        Some(shape)
    }
}

#[derive(Debug)]
struct Args {
    host: Option<String>,
    port: Option<u16>,
    params: Map<String, Value>,
    shape: Shape,
    timeout: Option<Duration>,
    query: String,
}

enum ParseArgsError {
    Help,
    Message(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().collect()) {
        Ok(args) => args,
        Err(ParseArgsError::Help) => {
            print!("{CLI_HELP}");
            return;
        }
        Err(ParseArgsError::Message(err)) => {
            eprintln!("{err}\n\n{CLI_HELP}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("query failed: {err}");
            if let Some(fault) = err.fault() {
                if !fault.full_name.is_empty() {
                    eprintln!("  exception: {}", fault.full_name);
                }
                for frame in &fault.stacktrace {
                    eprintln!("    at {frame}");
                }
            }
            std::process::exit(1);
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, ParseArgsError> {
    let mut host = None;
    let mut port = None;
    let mut params = Map::new();
    let mut shape = Shape::Raw;
    let mut timeout = Some(Duration::from_secs(30));
    let mut query = None;
    let mut options_done = false;

    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        if !options_done && arg == "--" {
            options_done = true;
            continue;
        }

        if options_done || !arg.starts_with('-') {
            if query.is_some() {
                return Err(ParseArgsError::Message(
                    "only one query may be given".to_string(),
                ));
            }
            query = Some(arg);
            continue;
        }

        match arg.as_str() {
            "--host" => host = Some(required(&mut iter, "--host")?),
            "--port" => {
                let raw = required(&mut iter, "--port")?;
                let parsed = raw
                    .parse::<u16>()
                    .map_err(|err| ParseArgsError::Message(format!("invalid --port {raw}: {err}")))?;
                port = Some(parsed);
            }
            "--param" => {
                let raw = required(&mut iter, "--param")?;
                let (key, value) = parse_param(&raw)?;
                params.insert(key, value);
            }
            "--as" => {
                let raw = required(&mut iter, "--as")?;
                shape = Shape::parse(&raw)
                    .ok_or_else(|| ParseArgsError::Message(format!("unknown shape: {raw}")))?;
            }
            "--timeout" => {
                let raw = required(&mut iter, "--timeout")?;
                let secs = raw.parse::<u64>().map_err(|err| {
                    ParseArgsError::Message(format!("invalid --timeout {raw}: {err}"))
                })?;
                timeout = (secs > 0).then(|| Duration::from_secs(secs));
            }
            "--help" | "-h" => return Err(ParseArgsError::Help),
            _ => return Err(ParseArgsError::Message(format!("unknown argument: {arg}"))),
        }
    }

    let query = query.ok_or_else(|| ParseArgsError::Message("a query is required".to_string()))?;

    Ok(Args {
        host,
        port,
        params,
        shape,
        timeout,
        query,
    })
}

fn required(
    iter: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, ParseArgsError> {
    iter.next()
        .ok_or_else(|| ParseArgsError::Message(format!("{flag} needs a value")))
}

fn parse_param(raw: &str) -> Result<(String, Value), ParseArgsError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ParseArgsError::Message(format!("--param expects key=value, got {raw}")))?;
    if key.is_empty() {
        return Err(ParseArgsError::Message(format!("empty parameter name in {raw}")));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn run(args: Args) -> cypher_http::Result<String> {
    let target = ConnectionTarget::from_env_or(args.host, args.port)?.with_timeout(args.timeout);

    let client = Client::new(target)?;
    let results = client.cypher(args.query).params(args.params).execute()?;
    render(&results, args.shape)
}

fn render(results: &Results, shape: Shape) -> cypher_http::Result<String> {
    let value = match shape {
        Shape::Raw => serde_json::to_value(results)?,
        Shape::Int => serde_json::to_value(results.as_int()?)?,
        Shape::Ints => serde_json::to_value(results.as_ints()?)?,
        Shape::String => serde_json::to_value(results.as_string()?)?,
        Shape::Strings => serde_json::to_value(results.as_strings()?)?,
        Shape::Node => serde_json::to_value(results.as_node()?)?,
        Shape::Nodes => serde_json::to_value(results.as_nodes()?)?,
        Shape::Relationship => serde_json::to_value(results.as_relationship()?)?,
        Shape::Relationships => serde_json::to_value(results.as_relationships()?)?,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}
