//! End-to-end jobs over in-memory CSV, written to a temporary directory.

use std::fs;

use tempfile::TempDir;
use tsfold_engine::{Engine, JobConfig, RunStats, Sink, SinkWriter};
use tsfold_select::{FilterKind, OutputMode, Stream};
use tsfold_types::{Period, SortDirection};

const DAILY: &str = "\
Date,Open,High,Low,Close,Volume,Adj Close
2015-01-09,9.5,14.0,8.5,13.0,120,12.9
2015-01-08,9.0,11.0,8.0,10.0,0,9.9
2015-01-07,11.0,15.0,10.0,12.0,300,11.9
2015-01-06,10.0,12.0,9.0,11.0,0,10.9
2014-12-31,7.0,8.0,6.0,7.5,50,7.4
2014-12-30,7.5,8.5,7.0,8.0,40,7.9
";

#[test]
fn consolidates_weekly_with_year_rollover() {
    let dir = TempDir::new().unwrap();
    let config = JobConfig {
        period: Period::Week,
        base_name: "spx".to_string(),
        outcols: "p,d,o,h,l,c,v,a".to_string(),
        ..JobConfig::default()
    };
    let engine = Engine::new(config).unwrap();
    let output = engine.run_reader(DAILY.as_bytes(), "SPX").unwrap();

    // 2014-12-30 and 2014-12-31 fall in ISO week 1 of 2015.
    assert_eq!(
        output.sink(Sink::Summaries),
        &[
            "2015-02,2015-01-09,10.000000,15.000000,8.000000,13.000000,420,12.900000",
            "2015-01,2014-12-31,7.500000,8.500000,6.000000,7.500000,90,7.400000",
        ]
    );

    let writer = SinkWriter::new(dir.path());
    let files = writer.write(&engine, &output).unwrap();
    assert_eq!(files, vec![dir.path().join("spx-week.csv")]);

    let text = fs::read_to_string(&files[0]).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Period Key,Date,Open,High,Low,Close,Volume,Adj Close"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn weekly_buckets_keep_new_year_days_with_their_week() {
    let input = "\
Date,Open,High,Low,Close,Volume,Adj Close
2016-12-27,5.0,5.5,4.5,5.0,10,5.0
2016-01-04,3.0,3.5,2.5,3.0,10,3.0
2016-01-01,2.0,2.5,1.5,2.0,10,2.0
2015-12-31,1.0,1.5,0.5,1.0,10,1.0
";
    let config = JobConfig {
        period: Period::Week,
        direction: SortDirection::Ascending,
        outcols: "p,d,o,c,v".to_string(),
        ..JobConfig::default()
    };
    let output = Engine::new(config).unwrap().run_reader(input.as_bytes(), "SPX").unwrap();

    // 2015-12-31 and 2016-01-01 share ISO week 53 of 2015.
    assert_eq!(
        output.sink(Sink::Summaries),
        &[
            "2015-53,2016-01-01,1.000000,2.000000,20",
            "2016-01,2016-01-04,3.000000,3.000000,10",
            "2016-52,2016-12-27,5.000000,5.000000,10",
        ]
    );
}

#[test]
fn selects_and_routes_all_streams() {
    let dir = TempDir::new().unwrap();
    let config = JobConfig {
        period: Period::Month,
        direction: SortDirection::Ascending,
        filters: Some("h,lv,hv".parse().unwrap()),
        mode: OutputMode::All,
        outcols: "id,in,d,h,v,a".to_string(),
        base_name: "spx".to_string(),
        ..JobConfig::default()
    };
    let engine = Engine::new(config).unwrap();
    let output = engine.run_reader(DAILY.as_bytes(), "SPX").unwrap();

    // January: highest-high and highest-volume share 2015-01-07.
    let combined = output.sink(Sink::Records(Stream::Combined));
    assert!(combined.contains(&"highest-high,0,2015-01-07,15.000000,300,11.900000".to_string()));
    assert!(combined.contains(&"lowest-volume,1,2015-01-09,14.000000,120,12.900000".to_string()));
    assert!(!combined.iter().any(|line| line.starts_with("highest-volume,2,2015-01-07")));

    let duplicates = output.sink(Sink::Records(Stream::Duplicates));
    assert_eq!(duplicates.len(), 6);
    let private = output.sink(Sink::Records(Stream::filter(FilterKind::LowestVolume)));
    assert_eq!(private.len(), 2);

    // Regressed highest-high carries the high in the adjusted close column.
    let regressed = output.sink(Sink::Records(Stream::Regressed));
    assert!(regressed.contains(&"highest-high,0,2015-01-07,15.000000,300,15.000000".to_string()));

    let files = SinkWriter::new(dir.path()).write(&engine, &output).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "spx-month-rec-com.csv",
            "spx-month-rec-dup.csv",
            "spx-month-rec-highest-high.csv",
            "spx-month-rec-lowest-volume.csv",
            "spx-month-rec-highest-volume.csv",
            "spx-month-rec-reg.csv",
        ]
    );
}

#[test]
fn counts_bad_lines_and_writes_stats() {
    let dir = TempDir::new().unwrap();
    let input = format!("{DAILY}2015-01-10,1,2\nnonsense,1,2,3,4,5,6\n");
    let config = JobConfig {
        header: false,
        base_name: "spx".to_string(),
        ..JobConfig::default()
    };
    let engine = Engine::new(config).unwrap();
    let output = engine.run_reader(input.as_bytes(), "SPX").unwrap();

    assert_eq!(output.stats.ingest.lines, 9);
    assert_eq!(output.stats.ingest.headers, 1);
    assert_eq!(output.stats.ingest.good, 6);
    assert_eq!(output.stats.ingest.bad, 2);
    assert_eq!(output.stats.groups, 2);

    let writer = SinkWriter::new(dir.path());
    let files = writer.write(&engine, &output).unwrap();
    let text = fs::read_to_string(&files[0]).unwrap();
    assert!(text.starts_with("2015-01-09,"));

    let path = writer.write_stats("spx", &output.stats).unwrap();
    let stats: RunStats = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(stats, output.stats);
    assert_eq!(stats.rows.get("month"), Some(&2));
}

#[test]
fn output_is_independent_of_shard_count() {
    let mut input = String::from("Stock_Symbol,Date,Open,High,Low,Close,Volume,Adj Close\n");
    for symbol in ["AAA", "BBB", "CCC", "DDD"] {
        for day in 1..=28 {
            input.push_str(&format!("{symbol},2015-02-{day:02},1,{day},0.5,1,{day},1\n"));
        }
    }
    let run = |shards| {
        let config = JobConfig {
            filters: Some("h,l".parse().unwrap()),
            mode: OutputMode::Split,
            outcols: "k,id,d,h".to_string(),
            shards,
            ..JobConfig::default()
        };
        let output = Engine::new(config).unwrap().run_reader(input.as_bytes(), "").unwrap();
        let mut lines = output.sink(Sink::Records(Stream::Duplicates)).to_vec();
        lines.sort();
        lines
    };

    let single = run(1);
    assert_eq!(single.len(), 8);
    assert!(single.contains(&"AAA-2015-02,highest-high,2015-02-28,28.000000".to_string()));
    assert_eq!(single, run(3));
    assert_eq!(single, run(8));
}
