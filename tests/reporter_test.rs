//! ScoreReporter against a live server.
//!
//! The reporter owns a tokio runtime, so these are plain tests; the server
//! runs on its own thread with its own runtime.

use std::net::SocketAddr;
use std::sync::mpsc as std_mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use luck_arcade::scores::{
    run_server, RankingState, ReporterConfig, ScoreReporter, ServerConfig, SubmitScore,
};

fn spawn_server(dir: std::path::PathBuf) -> (SocketAddr, oneshot::Sender<()>, thread::JoinHandle<()>) {
    let (addr_tx, addr_rx) = std_mpsc::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let (ready_tx, ready_rx) = oneshot::channel();
            let config = ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                data_dir: dir,
                max_stored: 100,
            };
            let server = tokio::spawn(run_server(config, Some(ready_tx), async move {
                let _ = shutdown_rx.await;
            }));
            let addr = ready_rx.await.unwrap();
            addr_tx.send(addr).unwrap();
            server.await.unwrap().unwrap();
        });
    });
    let addr = addr_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    (addr, shutdown_tx, handle)
}

fn wait_for_ready(reporter: &mut ScoreReporter) -> Vec<luck_arcade::scores::ScoreEntry> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        match reporter.poll_ranking() {
            RankingState::Ready(entries) => return entries.clone(),
            RankingState::Unavailable => panic!("ranking unavailable"),
            RankingState::Loading => {}
        }
        assert!(Instant::now() < deadline, "ranking never arrived");
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn test_report_then_fetch_ranking() {
    let dir = tempfile::tempdir().unwrap();
    let (addr, shutdown, handle) = spawn_server(dir.path().to_path_buf());

    let config = ReporterConfig {
        base_url: format!("http://{}", addr),
        disabled: false,
    };
    let mut reporter = ScoreReporter::start(&config).unwrap();
    reporter.report("2048", SubmitScore::new("amy", 512).with_max_tile(64));
    assert!(reporter.flush(Duration::from_secs(5)));

    reporter.request_ranking("2048");
    let entries = wait_for_ready(&mut reporter);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].nickname, "amy");
    assert_eq!(entries[0].score, 512);
    assert_eq!(entries[0].max_tile, Some(64));

    // Other games are untouched.
    reporter.request_ranking("luck");
    assert!(wait_for_ready(&mut reporter).is_empty());

    drop(reporter);
    let _ = shutdown.send(());
    handle.join().unwrap();
}

#[test]
fn test_newer_request_wins() {
    let dir = tempfile::tempdir().unwrap();
    let (addr, shutdown, handle) = spawn_server(dir.path().to_path_buf());

    let config = ReporterConfig {
        base_url: format!("http://{}", addr),
        disabled: false,
    };
    let mut reporter = ScoreReporter::start(&config).unwrap();
    reporter.report("luck", SubmitScore::new("bob", 3));
    assert!(reporter.flush(Duration::from_secs(5)));

    reporter.request_ranking("2048");
    reporter.request_ranking("luck");
    let entries = wait_for_ready(&mut reporter);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].nickname, "bob");

    drop(reporter);
    let _ = shutdown.send(());
    handle.join().unwrap();
}
