//! The monitoring loop.

use chrono::Local;
use std::time::Duration;

use crate::error::{PackmonError, Result};
use crate::filter::{self, VendorSet};
use crate::index::IndexSource;
use crate::probe::{ConcurrentProber, Failure, ProbeObserver};
use crate::report::{summarize_run, FailureReport};
use crate::shutdown::ShutdownSignal;
use crate::ui::UserInterface;

use super::{format_timestamp, CycleLog};

/// Result of a single cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The cycle ran to the end and produced a report.
    Completed(FailureReport),
    /// The user interrupted the cycle; nothing was reported.
    Interrupted,
}

/// Why [`RunLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// A single-shot run finished.
    Completed,
    /// The user interrupted the loop.
    Interrupted,
}

/// Fetches the index, probes the monitored packs and reports, once or
/// forever at a fixed interval.
pub struct RunLoop {
    source: Box<dyn IndexSource>,
    prober: ConcurrentProber,
    vendors: VendorSet,
    interval: Duration,
    log: Option<CycleLog>,
    shutdown: ShutdownSignal,
    cycles: usize,
}

impl RunLoop {
    /// Single-shot loop over `source` monitoring the default vendor.
    pub fn new(source: Box<dyn IndexSource>, prober: ConcurrentProber) -> Self {
        Self {
            source,
            prober,
            vendors: VendorSet::default(),
            interval: Duration::ZERO,
            log: None,
            shutdown: ShutdownSignal::new(),
            cycles: 0,
        }
    }

    pub fn with_vendors(mut self, vendors: VendorSet) -> Self {
        self.vendors = vendors;
        self
    }

    /// Pause between cycles; zero runs a single cycle.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_log(mut self, log: CycleLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Share `shutdown` with the loop and its prober.
    pub fn with_shutdown(self, shutdown: ShutdownSignal) -> Self {
        Self {
            prober: self.prober.with_shutdown(shutdown.clone()),
            shutdown,
            ..self
        }
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Run cycles until a single-shot run completes or the user interrupts.
    pub fn run(
        &mut self,
        ui: &mut dyn UserInterface,
        observer: &mut dyn ProbeObserver,
    ) -> Result<LoopExit> {
        loop {
            if let CycleOutcome::Interrupted = self.run_cycle(ui, observer)? {
                return Ok(LoopExit::Interrupted);
            }

            if self.interval.is_zero() {
                return Ok(LoopExit::Completed);
            }

            tracing::debug!(seconds = self.interval.as_secs(), "waiting for next cycle");
            if !self.shutdown.sleep(self.interval) {
                return Ok(LoopExit::Interrupted);
            }
        }
    }

    /// Run one fetch, filter, probe and report cycle.
    ///
    /// An index that cannot be fetched ends the cycle early with a report
    /// holding that single failure.
    pub fn run_cycle(
        &mut self,
        ui: &mut dyn UserInterface,
        observer: &mut dyn ProbeObserver,
    ) -> Result<CycleOutcome> {
        if self.shutdown.is_triggered() {
            return Ok(CycleOutcome::Interrupted);
        }

        self.cycles += 1;
        tracing::info!(cycle = self.cycles, url = self.source.url(), "started checking index");
        if let Some(log) = &mut self.log {
            if let Err(err) = log.cycle_started(&Local::now()) {
                log_write_failed(ui, &err);
            }
        }

        let Some(report) = self.check(ui, observer)? else {
            tracing::info!(cycle = self.cycles, "interrupted");
            return Ok(CycleOutcome::Interrupted);
        };

        let now = Local::now();
        if report.is_clean() {
            ui.success(&format!("{}: No failures!", format_timestamp(&now)));
        } else {
            ui.failure_summary(&format!(
                "{}: {} failures",
                format_timestamp(&now),
                report.failure_count()
            ));
        }
        tracing::info!(
            cycle = self.cycles,
            summary = %report.summary(),
            causes = ?report.cause_counts(),
            "finished checking index"
        );

        if let Some(log) = &mut self.log {
            let written = log
                .report(&now, &report)
                .and_then(|_| log.cycle_finished(&Local::now()));
            if let Err(err) = written {
                log_write_failed(ui, &err);
            }
        }

        Ok(CycleOutcome::Completed(report))
    }

    /// Returns `None` when the probe run was interrupted.
    fn check(
        &self,
        ui: &mut dyn UserInterface,
        observer: &mut dyn ProbeObserver,
    ) -> Result<Option<FailureReport>> {
        let fetched = self.source.fetch();
        if self.shutdown.is_triggered() {
            return Ok(None);
        }

        let snapshot = match fetched {
            Ok(snapshot) => snapshot,
            Err(PackmonError::RequestFailed(failure)) => {
                report_index_failure(ui, &failure);
                return Ok(Some(FailureReport::from_failure(failure)));
            }
            Err(err) => return Err(err),
        };

        ui.message("Pack index response status: 200");
        ui.message(&format!("Timestamp: {}", snapshot.timestamp()));
        ui.message(&format!("{} total packs", snapshot.len()));

        let descriptors = filter::apply(snapshot, &self.vendors);
        ui.message(&format!("{} monitored packs", descriptors.len()));

        let run = self.prober.run(descriptors)?;
        let report = summarize_run(run, observer);

        if self.shutdown.is_triggered() {
            return Ok(None);
        }
        Ok(Some(report))
    }
}

fn log_write_failed(ui: &mut dyn UserInterface, err: &std::io::Error) {
    tracing::warn!(error = %err, "could not write to log file");
    ui.warning(&format!("Could not write to log file: {}", err));
}

fn report_index_failure(ui: &mut dyn UserInterface, failure: &Failure) {
    match failure.status() {
        Some(status) => {
            ui.message(&format!("Pack index response status: {}", status));
            ui.error(&format!(
                "Failed to retrieve pack index! Response status: {}",
                status
            ));
        }
        None => ui.error(&format!("Failed to retrieve pack index: {}", failure)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::HttpIndexSource;
    use crate::probe::{FailureCause, NoopObserver};
    use crate::transport::{MockReply, MockTransport, Transport, TransportError, TransportResponse};
    use crate::ui::MockUI;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    const INDEX_URL: &str = "http://index.example/index.pidx";

    const INDEX: &str = r#"<index>
  <timestamp>2021-05-06T09:35:21Z</timestamp>
  <pindex>
    <pdsc url="http://packs.example/" vendor="Keil" name="Gone" version="1.0.0"/>
    <pdsc url="http://down.example" vendor="Keil" name="Down" version="1.0.0"/>
    <pdsc url="http://packs.example/" vendor="Keil" name="Fine" version="2.0.0"/>
    <pdsc url="http://packs.example/" vendor="ARM" name="Other" version="1.0.0"/>
  </pindex>
</index>"#;

    fn scripted() -> MockTransport {
        MockTransport::new()
            .reply(INDEX_URL, MockReply::Body(200, INDEX.to_string()))
            .reply("http://packs.example/Keil.Gone.pdsc", MockReply::Status(404))
            .reply("http://down.example/Keil.Down.pdsc", MockReply::ConnectError)
    }

    fn run_loop(transport: MockTransport) -> (RunLoop, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let source = HttpIndexSource::new(INDEX_URL, transport.clone());
        let prober = ConcurrentProber::new(transport.clone()).with_limit(4);
        (RunLoop::new(Box::new(source), prober), transport)
    }

    fn completed(outcome: CycleOutcome) -> FailureReport {
        match outcome {
            CycleOutcome::Completed(report) => report,
            CycleOutcome::Interrupted => panic!("cycle was interrupted"),
        }
    }

    #[test]
    fn cycle_reports_keil_failures() {
        let (mut monitor, transport) = run_loop(scripted());
        let mut ui = MockUI::new();

        let report = completed(monitor.run_cycle(&mut ui, &mut NoopObserver).unwrap());

        assert_eq!(report.probed_count(), 3);
        assert_eq!(report.failure_count(), 2);
        let mut causes: Vec<_> = report.failures().iter().map(Failure::cause).collect();
        causes.sort();
        assert_eq!(
            causes,
            vec![
                FailureCause::ConnectFailed,
                FailureCause::HttpError { status: 404 }
            ]
        );

        assert!(ui.has_message("Pack index response status: 200"));
        assert!(ui.has_message("4 total packs"));
        assert!(ui.has_message("3 monitored packs"));
        assert!(ui.has_failure_summary(": 2 failures"));
        // Index plus three Keil descriptors.
        assert_eq!(transport.request_count(), 4);
    }

    #[test]
    fn wildcard_probes_every_pack() {
        let (monitor, _) = run_loop(scripted());
        let mut monitor = monitor.with_vendors(VendorSet::all());
        let mut ui = MockUI::new();

        let report = completed(monitor.run_cycle(&mut ui, &mut NoopObserver).unwrap());
        assert_eq!(report.probed_count(), 4);
    }

    #[test]
    fn clean_cycle_reports_no_failures() {
        let index = INDEX.replace("Gone", "Fine").replace("down.example", "packs.example");
        let (mut monitor, _) = run_loop(
            MockTransport::new().reply(INDEX_URL, MockReply::Body(200, index)),
        );
        let mut ui = MockUI::new();

        let report = completed(monitor.run_cycle(&mut ui, &mut NoopObserver).unwrap());
        assert!(report.is_clean());
        assert!(ui.has_success(": No failures!"));
        assert!(ui.errors().is_empty());
        assert!(ui.failure_summaries().is_empty());
    }

    #[test]
    fn missing_timestamp_is_one_invalid_data_failure() {
        let index = r#"<index><pindex>
            <pdsc url="http://packs.example/" vendor="Keil" name="Fine" version="1.0.0"/>
        </pindex></index>"#;
        let (mut monitor, transport) = run_loop(
            MockTransport::new().reply(INDEX_URL, MockReply::Body(200, index.to_string())),
        );
        let mut ui = MockUI::new();

        let report = completed(monitor.run_cycle(&mut ui, &mut NoopObserver).unwrap());

        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.probed_count(), 0);
        assert_eq!(report.failures()[0].cause(), FailureCause::InvalidData);
        assert_eq!(report.failures()[0].url(), INDEX_URL);
        assert!(ui.has_error("Failed to retrieve pack index"));
        assert!(ui.has_failure_summary(": 1 failures"));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn index_http_error_is_reported_with_status() {
        let (mut monitor, _) = run_loop(MockTransport::new().reply(INDEX_URL, MockReply::Status(503)));
        let mut ui = MockUI::new();

        let report = completed(monitor.run_cycle(&mut ui, &mut NoopObserver).unwrap());

        assert_eq!(report.failures()[0].status(), Some(503));
        assert!(ui.has_message("Pack index response status: 503"));
        assert!(ui.has_error("Failed to retrieve pack index! Response status: 503"));
    }

    #[test]
    fn zero_interval_runs_exactly_one_cycle() {
        let (mut monitor, transport) = run_loop(scripted());
        let mut ui = MockUI::new();

        let exit = monitor.run(&mut ui, &mut NoopObserver).unwrap();

        assert_eq!(exit, LoopExit::Completed);
        assert_eq!(monitor.cycles(), 1);
        assert_eq!(transport.request_count(), 4);
    }

    #[test]
    fn interrupt_before_start_runs_nothing() {
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();
        let (monitor, transport) = run_loop(scripted());
        let mut monitor = monitor
            .with_interval(Duration::from_secs(3600))
            .with_shutdown(shutdown);
        let mut ui = MockUI::new();

        let exit = monitor.run(&mut ui, &mut NoopObserver).unwrap();

        assert_eq!(exit, LoopExit::Interrupted);
        assert_eq!(monitor.cycles(), 0);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn interrupt_during_wait_ends_loop() {
        let shutdown = ShutdownSignal::new();
        let (monitor, _) = run_loop(scripted());
        let mut monitor = monitor
            .with_interval(Duration::from_secs(3600))
            .with_shutdown(shutdown.clone());
        let mut ui = MockUI::new();

        let trigger = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(200));
            shutdown.trigger();
        });
        let exit = monitor.run(&mut ui, &mut NoopObserver).unwrap();
        trigger.join().unwrap();

        assert_eq!(exit, LoopExit::Interrupted);
        assert_eq!(monitor.cycles(), 1);
    }

    /// Index source whose request fails after the user pressed Ctrl+C.
    struct InterruptedFetch {
        shutdown: ShutdownSignal,
    }

    impl IndexSource for InterruptedFetch {
        fn url(&self) -> &str {
            INDEX_URL
        }

        fn fetch(&self) -> Result<crate::index::IndexSnapshot> {
            self.shutdown.trigger();
            Err(PackmonError::RequestFailed(Failure::new(
                INDEX_URL,
                FailureCause::Timeout,
            )))
        }
    }

    /// Transport that triggers shutdown on the first descriptor request.
    struct InterruptingTransport {
        inner: MockTransport,
        shutdown: ShutdownSignal,
    }

    impl Transport for InterruptingTransport {
        fn get(&self, url: &str) -> std::result::Result<TransportResponse, TransportError> {
            self.shutdown.trigger();
            self.inner.get(url)
        }

        fn get_text(
            &self,
            url: &str,
        ) -> std::result::Result<(TransportResponse, String), TransportError> {
            self.inner.get_text(url)
        }
    }

    fn log_lines(path: &std::path::Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn interrupt_during_failed_index_fetch_has_no_summary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("packmon.log");
        let shutdown = ShutdownSignal::new();
        let source = InterruptedFetch {
            shutdown: shutdown.clone(),
        };
        let prober = ConcurrentProber::new(Arc::new(MockTransport::new()));
        let mut monitor = RunLoop::new(Box::new(source), prober)
            .with_log(CycleLog::open(&path).unwrap())
            .with_shutdown(shutdown);
        let mut ui = MockUI::new();

        let exit = monitor.run(&mut ui, &mut NoopObserver).unwrap();

        assert_eq!(exit, LoopExit::Interrupted);
        assert!(ui.errors().is_empty());
        assert!(ui.failure_summaries().is_empty());
        assert!(ui.successes().is_empty());
        let lines = log_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(": Started checking index"));
    }

    #[test]
    fn interrupt_during_probe_run_has_no_summary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("packmon.log");
        let shutdown = ShutdownSignal::new();
        let transport = Arc::new(InterruptingTransport {
            inner: scripted(),
            shutdown: shutdown.clone(),
        });
        let source = HttpIndexSource::new(INDEX_URL, transport.clone());
        let prober = ConcurrentProber::new(transport).with_limit(1);
        let mut monitor = RunLoop::new(Box::new(source), prober)
            .with_log(CycleLog::open(&path).unwrap())
            .with_shutdown(shutdown);
        let mut ui = MockUI::new();

        let outcome = monitor.run_cycle(&mut ui, &mut NoopObserver).unwrap();

        assert_eq!(outcome, CycleOutcome::Interrupted);
        assert!(ui.has_message("3 monitored packs"));
        assert!(ui.failure_summaries().is_empty());
        assert!(ui.successes().is_empty());
        let lines = log_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(": Started checking index"));
    }

    #[test]
    fn cycle_is_written_to_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("packmon.log");
        let (monitor, _) = run_loop(scripted());
        let mut monitor = monitor.with_log(CycleLog::open(&path).unwrap());

        monitor.run(&mut MockUI::new(), &mut NoopObserver).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].ends_with(": Started checking index"));
        assert!(lines[1].ends_with(": 2 failures"));
        assert!(lines.contains(&"    404 http://packs.example/Keil.Gone.pdsc"));
        assert!(lines.contains(&"    CONNECT_FAILED http://down.example/Keil.Down.pdsc"));
        assert!(lines[4].ends_with(": Finished checking index"));
    }
}
