// src/bin/insider_report.rs
use std::env;

use chrono::NaiveDate;
use insider_collective::config::Settings;
use insider_collective::filter::today;
use insider_collective::report::render_text;
use insider_collective::{
    EmptySelection, FilterCriteria, Report, RoleInterest, TOP_N, Timeframe,
};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
insider-report: summarize recent insider purchases

USAGE:
    insider-report [OPTIONS]

OPTIONS:
    --start YYYY-MM-DD       first filing date (default: today - 10 days)
    --end YYYY-MM-DD         last filing date (default: today)
    --role ROLE              CEO, CFO, Director, 10%, President or SVP (repeatable)
    --ticker SYMBOL          restrict to a symbol (repeatable)
    --empty-matches-none     an empty role/ticker selection matches nothing
    --pages N                listing pages to fetch (default: 29, max: 1000)
    --min-amount N           minimum transaction amount (default: 25000)
    --timeframe d|w|m|q      listing window (default: q)
    --concurrency N          page requests in flight (default: 1)
    --best-effort            skip pages that fail to download
    --top N                  symbols kept in top lists (default: 20)
    --json                   print the report as JSON
    --list-tickers           print the distinct symbols and exit
    -h, --help               show this help

Environment: IC_BASE_URL, IC_TIMEOUT_SECS, IC_PAGES, IC_MIN_AMOUNT, IC_TIMEFRAME,
IC_CONCURRENCY, IC_BEST_EFFORT, RUST_LOG.";

struct Args {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    roles: Vec<RoleInterest>,
    tickers: Vec<String>,
    empty: EmptySelection,
    top: usize,
    json: bool,
    list_tickers: bool,
}

fn parse_date(v: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|e| format!("bad date {v:?}: {e}").into())
}

fn parse_args(settings: &mut Settings) -> Result<Args, Box<dyn std::error::Error>> {
    let mut a = Args {
        start: None,
        end: None,
        roles: Vec::new(),
        tickers: Vec::new(),
        empty: EmptySelection::MatchAll,
        top: TOP_N,
        json: false,
        list_tickers: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| format!("Missing value for {flag}"));
        match arg.as_str() {
            "--start" => a.start = Some(parse_date(&value("--start")?)?),
            "--end" => a.end = Some(parse_date(&value("--end")?)?),
            "--role" => a.roles.push(value("--role")?.parse()?),
            "--ticker" => a.tickers.push(value("--ticker")?.trim().to_uppercase()),
            "--empty-matches-none" => a.empty = EmptySelection::MatchNone,
            "--pages" => settings.pages = value("--pages")?.parse()?,
            "--min-amount" => settings.min_amount = value("--min-amount")?.parse()?,
            "--timeframe" => settings.timeframe = value("--timeframe")?.parse::<Timeframe>()?,
            "--concurrency" => settings.concurrency = value("--concurrency")?.parse()?,
            "--best-effort" => settings.best_effort = true,
            "--top" => a.top = value("--top")?.parse()?,
            "--json" => a.json = true,
            "--list-tickers" => a.list_tickers = true,
            "-h" | "--help" => {
                println!("{HELP}");
                std::process::exit(0);
            }
            other => return Err(format!("Unknown arg: {other}").into()),
        }
    }
    Ok(a)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::from_env()?;
    let args = parse_args(&mut settings)?;

    let client = settings.client()?;
    let feed = settings.feed(&client);

    // One run, one load: the dataset cache only pays off for long-lived callers.
    let dataset = match feed.load().await {
        Ok(d) => d,
        Err(e) if e.is_source_unavailable() => {
            return Err(format!("data source unavailable: {e}").into());
        }
        Err(e) => return Err(e.into()),
    };
    if settings.best_effort && !dataset.skipped_pages.is_empty() {
        let pages: Vec<String> = dataset
            .skipped_pages
            .iter()
            .map(|p| p.page.to_string())
            .collect();
        tracing::warn!(pages = %pages.join(","), "some pages were skipped; results are partial");
    }

    if args.list_tickers {
        for s in dataset.symbols() {
            println!("{s}");
        }
        return Ok(());
    }

    let default = FilterCriteria::default_window(today());
    let criteria = FilterCriteria::between(
        args.start.unwrap_or(default.start()),
        args.end.unwrap_or(default.end()),
    )?
    .roles(args.roles)
    .tickers(args.tickers)
    .empty_selection(args.empty);

    let filtered = criteria.apply(&dataset);
    let report = Report::build(&filtered, args.top);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
