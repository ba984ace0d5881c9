use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use csv::Reader;
use rsi_core::common::enums::PriceTrack;
use rsi_core::common::time::CTime;
use rsi_core::{Candle, RsiCandlesSeries, RsiConfig, RsiPoint};
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "rsi_cli")]
#[command(about = "Compute open/high/low/close RSI for OHLC candle CSV files", long_about = None)]
struct Args {
    /// CSV file, or a directory whose *.csv files are processed in turn
    path: PathBuf,

    /// RSI lookback periods
    #[arg(short, long, default_value = "14")]
    lookback: usize,

    /// Leading rows bulk-loaded before the rest is streamed bar by bar (default: all)
    #[arg(short, long)]
    seed: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with_writer(io::stderr)
        .init();

    let config = RsiConfig::with_lookback(args.lookback)?;

    if args.path.is_dir() {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&args.path)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("csv") {
                paths.push(path);
            }
        }
        paths.sort();
        for path in paths {
            process_csv_file(&path, &config, &args)?;
        }
    } else {
        process_csv_file(&args.path, &config, &args)?;
    }

    Ok(())
}

fn process_csv_file(path: &Path, config: &RsiConfig, args: &Args) -> Result<(), Box<dyn Error>> {
    info!("Processing file: {:?}", path);

    let candles = read_candles(File::open(path)?)?;
    if candles.is_empty() {
        warn!("No candles in {:?}", path);
        return Ok(());
    }

    let seed_len = args.seed.unwrap_or(candles.len()).min(candles.len());
    let (seed, stream) = candles.split_at(seed_len);

    let mut series = RsiCandlesSeries::new(config);
    series.set_data(&collapse_ticks(seed));
    for candle in stream {
        series.update(*candle)?;
    }

    info!(
        rows = candles.len(),
        bars = series.len(),
        streamed = stream.len(),
        warm = series.is_warm(),
        "Analysis completed for {:?}",
        path
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            for point in series.get_rsi_data() {
                writeln!(out, "{}", serde_json::to_string(&point)?)?;
            }
        }
        OutputFormat::Table => {
            writeln!(out, "{}", table_header())?;
            for point in series.get_rsi_data() {
                writeln!(out, "{}", table_row(&point))?;
            }
        }
    }

    Ok(())
}

/// Parse `timestamp,open,high,low,close[,...]` rows (with a header line) and
/// sort them by time. Rows sharing a timestamp keep their file order.
fn read_candles<R: io::Read>(reader: R) -> Result<Vec<Candle>, Box<dyn Error>> {
    let mut rdr = Reader::from_reader(reader);
    let mut candles = Vec::new();

    for result in rdr.records() {
        let record = result?;
        candles.push(parse_csv_record(&record)?);
    }

    candles.sort_by_key(|c| c.time);
    Ok(candles)
}

fn parse_csv_record(record: &csv::StringRecord) -> Result<Candle, Box<dyn Error>> {
    if record.len() < 5 {
        return Err(format!("expected at least 5 columns, got {}", record.len()).into());
    }

    Ok(Candle {
        time: parse_timestamp(record[0].trim())?,
        open: record[1].trim().parse()?,
        high: record[2].trim().parse()?,
        low: record[3].trim().parse()?,
        close: record[4].trim().parse()?,
    })
}

/// Epoch seconds, or `%Y-%m-%d %H:%M:%S` read as UTC.
fn parse_timestamp(field: &str) -> Result<i64, Box<dyn Error>> {
    if let Ok(ts) = field.parse::<i64>() {
        return Ok(ts);
    }
    let datetime = NaiveDateTime::parse_from_str(field, "%Y-%m-%d %H:%M:%S")?;
    Ok(datetime.and_utc().timestamp())
}

/// Keep only the last row of each run of equal timestamps.
fn collapse_ticks(candles: &[Candle]) -> Vec<Candle> {
    let mut bars: Vec<Candle> = Vec::with_capacity(candles.len());
    for candle in candles {
        match bars.last_mut() {
            Some(last) if last.time == candle.time => *last = *candle,
            _ => bars.push(*candle),
        }
    }
    bars
}

fn table_header() -> String {
    let mut line = format!("{:<18}", "time");
    for track in PriceTrack::iter() {
        line.push_str(&format!("{:>10}", track.to_string()));
    }
    line
}

fn table_row(point: &RsiPoint) -> String {
    let time = CTime::from_timestamp(point.time)
        .map(|t| t.to_string())
        .unwrap_or_else(|| point.time.to_string());
    let mut line = format!("{:<18}", time);
    for track in PriceTrack::iter() {
        match point.get(track) {
            Some(v) => line.push_str(&format!("{:>10.2}", v)),
            None => line.push_str(&format!("{:>10}", "-")),
        }
    }
    line
}
