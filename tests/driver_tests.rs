//! Stream driver tests over scripted and file sources.

mod harness;

use std::sync::Arc;
use std::time::Duration;

use harness::{wait_until, TempLog, TestPipeline};
use solver_watch::adapter::source::FileSource;
use solver_watch::app::{RunMode, StreamDriver};
use solver_watch::config::MonitorConfig;
use solver_watch::port::{Cursor, Target};
use solver_watch::testkit::{lines, ScriptedSource};

fn driver(source: Arc<dyn solver_watch::port::LogSource>, t: &TestPipeline) -> StreamDriver {
    StreamDriver::new(source, Arc::clone(&t.pipeline), MonitorConfig::default())
}

#[tokio::test]
async fn backfill_then_follow_hands_off_cursor() {
    let t = TestPipeline::new();
    let source = ScriptedSource::new()
        .with_history([lines::AUCTION_3, lines::SOLVED])
        .with_live([lines::FAILED]);

    driver(Arc::new(source.clone()), &t)
        .run(RunMode::BackfillThenFollow)
        .await
        .unwrap();

    assert_eq!(source.follow_cursors(), vec![Cursor::Offset(2)]);
    let stats = t.pipeline.snapshot();
    assert_eq!(stats.auctions, 1);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.trades, 1);
    assert_eq!(t.ledger.records().len(), 1);
}

#[tokio::test]
async fn follow_only_skips_history() {
    let t = TestPipeline::new();
    let source = ScriptedSource::new()
        .with_history([lines::SOLVED])
        .with_live([lines::PROCESSING]);

    driver(Arc::new(source.clone()), &t)
        .run(RunMode::FollowOnly)
        .await
        .unwrap();

    assert_eq!(source.backfill_calls(), 0);
    assert_eq!(source.follow_cursors(), vec![Cursor::End]);
    assert!(t.ledger.records().is_empty());
    assert_eq!(t.pipeline.snapshot().orders, 1);
}

#[tokio::test]
async fn failed_backfill_falls_back_to_live() {
    let t = TestPipeline::new();
    let source = ScriptedSource::new()
        .failing_backfill()
        .with_live([lines::SOLVED]);

    driver(Arc::new(source.clone()), &t)
        .run(RunMode::BackfillThenFollow)
        .await
        .unwrap();

    assert_eq!(source.follow_cursors(), vec![Cursor::End]);
    assert_eq!(t.ledger.records().len(), 1);
}

#[tokio::test]
async fn file_backfill_processes_every_line() {
    let log = TempLog::with_lines(&[
        lines::NOISE,
        lines::AUCTION_3,
        lines::PROCESSING,
        lines::SOLVED,
        lines::FAILED,
    ]);
    let t = TestPipeline::new();
    let driver = driver(Arc::new(FileSource::new(log.path())), &t);

    let cursor = driver.backfill().await.unwrap();

    let len = std::fs::metadata(log.path()).unwrap().len();
    assert_eq!(cursor, Cursor::Offset(len));
    assert_eq!(t.ledger.lines(), vec![lines::SOLVED_LEDGER_LINE.to_string()]);
    let stats = t.pipeline.snapshot();
    assert_eq!(stats.auctions, 1);
    assert_eq!(stats.orders, 1);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.solutions, 3);
}

#[tokio::test]
async fn file_backfill_twice_records_twice() {
    let log = TempLog::with_lines(&[lines::SOLVED]);
    let t = TestPipeline::new();
    let driver = driver(Arc::new(FileSource::new(log.path())), &t);

    driver.backfill().await.unwrap();
    driver.backfill().await.unwrap();

    assert_eq!(t.ledger.records().len(), 2);
}

#[tokio::test]
async fn file_backfill_stops_before_partial_line() {
    let log = TempLog::with_lines(&[lines::AUCTION_3]);
    let complete = std::fs::metadata(log.path()).unwrap().len();
    log.append_raw("2024-01-01T00:00:09Z INFO solved ord");

    let t = TestPipeline::new();
    let cursor = driver(Arc::new(FileSource::new(log.path())), &t)
        .backfill()
        .await
        .unwrap();

    assert_eq!(cursor, Cursor::Offset(complete));
    assert!(t.ledger.records().is_empty());
}

#[tokio::test]
async fn missing_file_backfill_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let t = TestPipeline::new();
    let driver = driver(Arc::new(FileSource::new(dir.path().join("absent.log"))), &t);

    assert!(driver.backfill().await.is_err());
}

#[tokio::test]
async fn file_follow_sees_appended_lines_exactly_once() {
    let log = TempLog::with_lines(&[lines::SOLVED]);
    let t = TestPipeline::new();
    let source = FileSource::new(log.path()).with_poll_interval(Duration::from_millis(20));
    let driver = driver(Arc::new(source), &t);

    let handle = tokio::spawn(async move { driver.run(RunMode::BackfillThenFollow).await });

    let ledger = t.ledger.clone();
    assert!(wait_until(Duration::from_secs(5), || ledger.records().len() == 1).await);

    // A line written in two parts is processed once, when complete.
    log.append_raw("2024-01-01T00:01:00Z INFO \"solved order\" order_uid=0xsecond ");
    tokio::time::sleep(Duration::from_millis(100)).await;
    log.append_raw("sell_token=TokenAddress(0xA) buy_token=TokenAddress(0xB) sell_amount=1 buy_amount=2\n");
    log.append(&[lines::AUCTION_0]);

    let stats = Arc::clone(&t.pipeline);
    assert!(wait_until(Duration::from_secs(5), || stats.snapshot().auctions == 1).await);

    handle.abort();

    let records = t.ledger.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].order_id, "0xsecond");
    assert_eq!(records[1].buy_token, "0xB");
    assert_eq!(t.notifier.alerts_for(Target::Trades).len(), 2);
}

#[tokio::test]
async fn file_follow_only_ignores_existing_content() {
    let log = TempLog::with_lines(&[lines::SOLVED, lines::AUCTION_3]);
    let t = TestPipeline::new();
    let source = FileSource::new(log.path()).with_poll_interval(Duration::from_millis(20));
    let driver = driver(Arc::new(source), &t);

    let handle = tokio::spawn(async move { driver.run(RunMode::FollowOnly).await });
    tokio::time::sleep(Duration::from_millis(200)).await;
    log.append(&[lines::PROCESSING]);

    let pipeline = Arc::clone(&t.pipeline);
    assert!(wait_until(Duration::from_secs(5), || pipeline.snapshot().orders == 1).await);
    handle.abort();

    assert!(t.ledger.records().is_empty());
    assert_eq!(t.pipeline.snapshot().auctions, 0);
}

#[tokio::test]
async fn file_follow_only_skips_line_in_progress() {
    let log = TempLog::with_lines(&[lines::AUCTION_3]);
    log.append_raw("2024-01-01T00:00:09Z INFO \"solved order\" order_uid=0xstale ");
    let t = TestPipeline::new();
    let source = FileSource::new(log.path()).with_poll_interval(Duration::from_millis(20));
    let driver = driver(Arc::new(source), &t);

    let handle = tokio::spawn(async move { driver.run(RunMode::FollowOnly).await });
    tokio::time::sleep(Duration::from_millis(200)).await;
    log.append_raw("sell_token=TokenAddress(0xA) buy_token=TokenAddress(0xB) sell_amount=1 buy_amount=2\n");
    log.append(&[lines::SOLVED]);

    let ledger = t.ledger.clone();
    assert!(wait_until(Duration::from_secs(5), || !ledger.records().is_empty()).await);
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.abort();

    let records = t.ledger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].order_id, "0xabc123");
    assert_eq!(t.pipeline.snapshot().auctions, 0);
}
