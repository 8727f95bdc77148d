//! Benchmark utilities for tsfold.

use tsfold_lib::{ParsedRecord, Record};

/// First synthetic day, 2000-01-03T00:00:00Z.
const START_MS: i64 = 946_857_600_000;
const DAY_MS: i64 = 86_400_000;

/// Shape of a synthetic data set.
#[derive(Debug, Clone, Copy)]
pub struct SeriesConfig {
    /// Number of distinct symbols.
    pub symbols: usize,
    /// Daily records per symbol.
    pub days: usize,
}

impl SeriesConfig {
    /// Total records generated.
    pub const fn records(&self) -> usize {
        self.symbols * self.days
    }
}

/// Generates a deterministic daily OHLCV series per symbol.
///
/// Prices follow a bounded saw-tooth so every period has distinct extremes,
/// and every seventh day has zero volume.
pub fn synthetic_series(config: SeriesConfig) -> Vec<ParsedRecord> {
    let mut records = Vec::with_capacity(config.records());
    for s in 0..config.symbols {
        let symbol = format!("SYM{s:03}");
        for d in 0..config.days {
            let wave = ((d * 37 + s * 11) % 101) as f64;
            let open = 100.0 + wave;
            let close = 100.0 + ((d * 53 + s * 7) % 97) as f64;
            let high = open.max(close) + (d % 5) as f64;
            let low = open.min(close) - (d % 3) as f64;
            let volume = if d % 7 == 0 { 0 } else { 1_000 + (d % 13) as u64 * 10 };
            records.push(ParsedRecord {
                exchange: String::new(),
                symbol: symbol.clone(),
                record: Record::new(
                    START_MS + d as i64 * DAY_MS,
                    open,
                    high,
                    low,
                    close,
                    volume,
                    close * 0.98,
                ),
            });
        }
    }
    records
}

/// Renders the synthetic series as CSV with the `s,d,o,h,l,c,v,a` layout.
pub fn synthetic_csv(config: SeriesConfig) -> String {
    let mut csv = String::from("Stock_Symbol,Date,Open,High,Low,Close,Volume,Adj Close\n");
    for parsed in synthetic_series(config) {
        let rec = parsed.record;
        let date = rec
            .datetime()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{date},{},{},{},{},{},{}\n",
            parsed.symbol, rec.open, rec.high, rec.low, rec.close, rec.volume, rec.adj_close
        ));
    }
    csv
}
