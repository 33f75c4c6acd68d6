// src/bin/tdigest_cli.rs
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::io::{self, Read};
use stream_tdigest::tdigest::{DigestOptions, ScaleFamily, TDigest, DEFAULT_COMPRESSION};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, ValueEnum)]
enum Scale {
    Quadratic,
    Arcsine,
}
impl From<Scale> for ScaleFamily {
    fn from(s: Scale) -> Self {
        match s {
            Scale::Quadratic => ScaleFamily::Quadratic,
            Scale::Arcsine => ScaleFamily::Arcsine,
        }
    }
}

#[derive(Parser)]
#[command(name = "tdigest", author, version, about)]
struct Args {
    /// Compression (higher = more clusters, finer tails)
    #[arg(short = 'c', long, default_value_t = DEFAULT_COMPRESSION)]
    compression: f64,

    /// Scale family bounding cluster weights (quadratic|arcsine)
    #[arg(short = 's', long, value_enum, default_value_t = Scale::Quadratic)]
    scale: Scale,

    /// Read `value weight` pairs instead of bare values
    #[arg(short = 'w', long)]
    weighted: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Stream stdin into a digest and print a single quantile value
    Quantile {
        /// q in [0,1] (values outside are extrapolated)
        #[arg(short, long, allow_negative_numbers = true)]
        q: f64,
    },
    /// Stream stdin into a digest and print p50/p90/p99/p99.9/p99.99
    Summary,
    /// Stream stdin into a digest and print its clusters as JSON
    Clusters,
}

const SUMMARY: [(&str, f64); 5] = [
    ("p50", 0.5),
    ("p90", 0.9),
    ("p99", 0.99),
    ("p99.9", 0.999),
    ("p99.99", 0.9999),
];

fn parse_numbers(s: &str) -> Result<Vec<f64>, Box<dyn Error>> {
    let mut out = Vec::new();
    for tok in s
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
    {
        out.push(tok.parse::<f64>()?);
    }
    Ok(out)
}

/// One `value weight` pair per non-empty line.
fn parse_weighted(s: &str) -> Result<Vec<(f64, u64)>, Box<dyn Error>> {
    let mut out = Vec::new();
    for (lineno, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut toks = line
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|t| !t.is_empty());
        match (toks.next(), toks.next(), toks.next()) {
            (Some(v), Some(w), None) => out.push((v.parse::<f64>()?, w.parse::<u64>()?)),
            _ => return Err(format!("line {}: expected `value weight`", lineno + 1).into()),
        }
    }
    Ok(out)
}

fn read_stdin() -> Result<String, Box<dyn Error>> {
    let mut s = String::new();
    io::stdin().read_to_string(&mut s)?;
    Ok(s)
}

fn build_digest(args: &Args, input: &str) -> Result<TDigest, Box<dyn Error>> {
    let opts = DigestOptions {
        compression: args.compression,
        scale: args.scale.clone().into(),
    };
    let mut digest = TDigest::with_options(opts)?;

    if args.weighted {
        for (v, w) in parse_weighted(input)? {
            digest.insert(v, w)?;
        }
    } else {
        digest.add_many(parse_numbers(input)?)?;
    }
    info!(
        clusters = digest.len(),
        total_weight = digest.total_weight(),
        "digest built"
    );
    Ok(digest)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    debug!(compression = args.compression, scale = ?args.scale, "options");

    let input = read_stdin()?;
    let digest = build_digest(&args, &input)?;

    match args.cmd {
        Cmd::Quantile { q } => {
            println!("{}", digest.quantile(q)?);
        }
        Cmd::Summary => {
            for (label, q) in SUMMARY {
                println!("{label}\t{}", digest.quantile(q)?);
            }
        }
        Cmd::Clusters => {
            println!("{}", serde_json::to_string(digest.clusters())?);
        }
    }
    Ok(())
}
