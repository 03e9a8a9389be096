use std::path::PathBuf;

use anyhow::Context;

use clap::{Args, Parser, Subcommand, ValueEnum};

use clap_verbosity_flag::{Verbosity, WarnLevel};

use simplelog::SimpleLogger;

use bgputil::aggregate::{aggregate, summary};
use bgputil::aspath::MatchMode;
use bgputil::{Ipv4, Ipv6, RouteSource};

use crate::io::csv::{CsvRouteWriter, CsvRoutes};
use crate::io::plain::{PlainPrefixWriter, PlainPrefixes};
use crate::io::script::Iproute2Script;
use crate::pipeline;

/// Entry-point function for the `bgputil` CLI tool.
#[allow(clippy::missing_errors_doc)]
pub fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    SimpleLogger::init(
        args.verbosity.log_level_filter(),
        simplelog::Config::default(),
    )
    .context("failed to initialize logger")?;
    match args.command {
        Command::Extract {
            input,
            output,
            filter,
        } => extract(&input, &output, &filter),
        Command::Prefixes {
            input,
            output,
            filter,
        } => prefixes(&input, &output, &filter),
        Command::Script {
            input,
            output,
            nexthop,
        } => script(&input, &output, &nexthop),
        Command::Summarize { input } => summarize(&input),
    }
}

/// A toolset for working with BGP routing table data.
#[derive(Debug, Parser)]
#[command(author, version, about, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten, next_help_heading = "Logging options")]
    verbosity: Verbosity<WarnLevel>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract routes from a CSV routing table into another CSV file.
    ///
    /// Routes are validated, optionally filtered by AS_PATH pattern,
    /// de-duplicated keeping the shortest AS_PATH per prefix, and
    /// optionally aggregated.
    Extract {
        /// Input CSV file with 'prefix' and 'as_path' columns.
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file.
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten, next_help_heading = "Filtering options")]
        filter: FilterOpts,
    },

    /// Extract prefixes from a CSV routing table into a plain-text list.
    Prefixes {
        /// Input CSV file with 'prefix' and 'as_path' columns.
        #[arg(short, long)]
        input: PathBuf,

        /// Output file, one prefix per line.
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten, next_help_heading = "Filtering options")]
        filter: FilterOpts,
    },

    /// Generate an iproute2 route-installation script from a prefix list.
    Script {
        /// Input file, one prefix per line.
        #[arg(short, long)]
        input: PathBuf,

        /// Output shell script.
        #[arg(short, long)]
        output: PathBuf,

        /// Nexthop address, bare or in CIDR form. Prefixes of the other
        /// address family are skipped.
        #[arg(short, long)]
        nexthop: String,
    },

    /// Aggregate a prefix list and report the addressable space it covers.
    Summarize {
        /// Input file, one prefix per line.
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Debug, Args)]
struct FilterOpts {
    /// AS_PATH pattern in Cisco IOS syntax (e.g. '_64500_'). May be
    /// repeated; a route is kept if any pattern matches.
    #[arg(short = 'f', long = "filter")]
    patterns: Vec<String>,

    /// AS_PATH matching dialect.
    #[arg(long, value_enum, default_value_t = Dialect::Exact)]
    mode: Dialect,

    /// Aggregate the surviving prefixes into minimal covering CIDR blocks.
    /// Aggregated routes carry no AS_PATH.
    #[arg(short, long)]
    aggregate: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dialect {
    /// Literal token matching with '^'/'$' window anchors.
    Exact,
    /// Boundary substitution over a general regex engine.
    Regex,
}

impl From<Dialect> for MatchMode {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Exact => Self::Exact,
            Dialect::Regex => Self::Regex,
        }
    }
}

fn extract(input: &PathBuf, output: &PathBuf, filter: &FilterOpts) -> anyhow::Result<()> {
    let mut source = CsvRoutes::open(input)
        .with_context(|| format!("failed to open '{}'", input.display()))?;
    let table = pipeline::collect(&mut source, &filter.patterns, filter.mode.into())?;
    let mut writer = CsvRouteWriter::create(output)
        .with_context(|| format!("failed to create '{}'", output.display()))?;
    let written = if filter.aggregate {
        pipeline::emit(&mut writer, &pipeline::aggregated_routes(&table)?)?
    } else {
        pipeline::emit(&mut writer, table.iter())?
    };
    writer.finish()?;
    log::info!("wrote {written} routes to '{}'", output.display());
    Ok(())
}

fn prefixes(input: &PathBuf, output: &PathBuf, filter: &FilterOpts) -> anyhow::Result<()> {
    let mut source = CsvRoutes::open(input)
        .with_context(|| format!("failed to open '{}'", input.display()))?;
    let table = pipeline::collect(&mut source, &filter.patterns, filter.mode.into())?;
    let mut writer = PlainPrefixWriter::create(output)
        .with_context(|| format!("failed to create '{}'", output.display()))?;
    let written = if filter.aggregate {
        pipeline::emit(&mut writer, &pipeline::aggregated_routes(&table)?)?
    } else {
        pipeline::emit(&mut writer, table.iter())?
    };
    writer.finish()?;
    log::info!("wrote {written} prefixes to '{}'", output.display());
    Ok(())
}

fn script(input: &PathBuf, output: &PathBuf, nexthop: &str) -> anyhow::Result<()> {
    let mut source = PlainPrefixes::open(input)
        .with_context(|| format!("failed to open '{}'", input.display()))?;
    let mut routes = Vec::new();
    while let Some(route) = source.next_route()? {
        routes.push(route);
    }
    let mut writer = Iproute2Script::create(output, nexthop)
        .with_context(|| format!("failed to create '{}'", output.display()))?;
    let written = pipeline::emit(&mut writer, &routes)?;
    writer.finish()?;
    log::info!("wrote {written} route commands to '{}'", output.display());
    Ok(())
}

fn summarize(input: &PathBuf) -> anyhow::Result<()> {
    let mut source = PlainPrefixes::open(input)
        .with_context(|| format!("failed to open '{}'", input.display()))?;
    let mut prefixes = Vec::new();
    while let Some(route) = source.next_route()? {
        prefixes.push(route.prefix().to_string());
    }

    let ipv4_blocks = aggregate::<Ipv4, _, _>(&prefixes);
    for block in &ipv4_blocks {
        println!("{block}");
    }
    let ipv6_blocks = aggregate::<Ipv6, _, _>(&prefixes);
    for block in &ipv6_blocks {
        println!("{block}");
    }
    println!(
        "ipv4: {} blocks covering {} addresses",
        ipv4_blocks.len(),
        summary::<Ipv4, _, _>(&prefixes)
    );
    println!(
        "ipv6: {} blocks covering {} /64 blocks",
        ipv6_blocks.len(),
        summary::<Ipv6, _, _>(&prefixes)
    );
    Ok(())
}
