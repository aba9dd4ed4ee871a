//! Coordinator task and its handle.
//!
//! One task owns the `ContinuousMonitor`. Commands arrive over an mpsc
//! channel and answer on a oneshot; the same `select!` loop ticks the
//! watcher and drains expired debounce timers, so state changes never race.
//! The tree walk of a poll runs on the blocking pool with the watcher lent
//! out, and commands keep being answered until it comes back.

use std::time::Duration;

use manasx_core::errors::MonitorError;
use manasx_core::types::{AnalysisResult, MonitorStats};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

use crate::context::OrganizationalContext;
use crate::logs::SessionSummary;
use crate::monitor::ContinuousMonitor;
use crate::state::MonitorState;
use crate::watcher::{ChangeEvent, PollWatcher};

const COMMAND_BUFFER: usize = 64;

type PollTask = JoinHandle<(PollWatcher, Vec<ChangeEvent>)>;

enum Command {
    Start(oneshot::Sender<Result<(), MonitorError>>),
    Stop(oneshot::Sender<Result<Option<SessionSummary>, MonitorError>>),
    Change(ChangeEvent),
    Context(oneshot::Sender<OrganizationalContext>),
    Compliance {
        code: String,
        filename: String,
        reply: oneshot::Sender<AnalysisResult>,
    },
    State(oneshot::Sender<MonitorState>),
    Stats(oneshot::Sender<MonitorStats>),
    Shutdown(oneshot::Sender<Option<SessionSummary>>),
}

/// Cheap, cloneable front door to a spawned monitor.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    tx: mpsc::Sender<Command>,
}

/// Move `monitor` onto its own task. The task runs until `shutdown` is
/// called or every handle is dropped; either way a running monitor is
/// stopped first.
pub fn spawn(monitor: ContinuousMonitor) -> MonitorHandle {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    tokio::spawn(run(monitor, rx));
    MonitorHandle { tx }
}

async fn run(mut monitor: ContinuousMonitor, mut rx: mpsc::Receiver<Command>) {
    let mut ticker = interval(monitor.poll_interval().max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: Option<PollTask> = None;

    loop {
        let deadline = monitor.next_deadline();
        tokio::select! {
            cmd = rx.recv() => {
                let Some(cmd) = cmd else {
                    tracing::debug!("all monitor handles dropped");
                    stop_quietly(&mut monitor).await;
                    break;
                };
                if let Some(reply) = handle(&mut monitor, cmd).await {
                    let summary = stop_quietly(&mut monitor).await;
                    let _ = reply.send(summary);
                    break;
                }
            }
            _ = ticker.tick(), if monitor.is_running() && in_flight.is_none() => {
                if let Some(mut watcher) = monitor.take_watcher() {
                    in_flight = Some(tokio::task::spawn_blocking(move || {
                        let events = watcher.poll();
                        (watcher, events)
                    }));
                }
            }
            joined = poll_done(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                match joined {
                    Ok((watcher, events)) => monitor.restore_watcher(watcher, events, Instant::now()),
                    Err(e) => {
                        tracing::error!(error = %e, "watcher poll task failed");
                        monitor.rewatch();
                    }
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                monitor.flush_due(Instant::now()).await;
            }
        }
    }
    tracing::debug!("monitor task exited");
}

async fn poll_done(
    task: &mut Option<PollTask>,
) -> Result<(PollWatcher, Vec<ChangeEvent>), tokio::task::JoinError> {
    match task {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

/// Apply one command. Returns the shutdown reply when the loop should end.
async fn handle(
    monitor: &mut ContinuousMonitor,
    cmd: Command,
) -> Option<oneshot::Sender<Option<SessionSummary>>> {
    match cmd {
        Command::Start(reply) => {
            let _ = reply.send(monitor.start().await);
        }
        Command::Stop(reply) => {
            let _ = reply.send(monitor.stop().await);
        }
        Command::Change(event) => monitor.record_change(event, Instant::now()),
        Command::Context(reply) => {
            let _ = reply.send(monitor.organizational_context().await);
        }
        Command::Compliance {
            code,
            filename,
            reply,
        } => {
            let _ = reply.send(monitor.check_code_compliance(&code, &filename).await);
        }
        Command::State(reply) => {
            let _ = reply.send(monitor.state());
        }
        Command::Stats(reply) => {
            let _ = reply.send(monitor.stats().clone());
        }
        Command::Shutdown(reply) => return Some(reply),
    }
    None
}

async fn stop_quietly(monitor: &mut ContinuousMonitor) -> Option<SessionSummary> {
    match monitor.stop().await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "stop during shutdown failed");
            None
        }
    }
}

impl MonitorHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, MonitorError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| MonitorError::Stopped)?;
        rx.await.map_err(|_| MonitorError::Stopped)
    }

    pub async fn start(&self) -> Result<(), MonitorError> {
        self.request(Command::Start).await?
    }

    pub async fn stop(&self) -> Result<Option<SessionSummary>, MonitorError> {
        self.request(Command::Stop).await?
    }

    /// Feed a change from an external watcher. Ignored unless running.
    pub async fn notify_change(&self, event: ChangeEvent) -> Result<(), MonitorError> {
        self.tx
            .send(Command::Change(event))
            .await
            .map_err(|_| MonitorError::Stopped)
    }

    pub async fn organizational_context(&self) -> Result<OrganizationalContext, MonitorError> {
        self.request(Command::Context).await
    }

    pub async fn check_code_compliance(
        &self,
        code: &str,
        filename: &str,
    ) -> Result<AnalysisResult, MonitorError> {
        let (code, filename) = (code.to_string(), filename.to_string());
        self.request(|reply| Command::Compliance {
            code,
            filename,
            reply,
        })
        .await
    }

    pub async fn state(&self) -> Result<MonitorState, MonitorError> {
        self.request(Command::State).await
    }

    pub async fn stats(&self) -> Result<MonitorStats, MonitorError> {
        self.request(Command::Stats).await
    }

    /// Stop the monitor if running and end the task.
    pub async fn shutdown(&self) -> Result<Option<SessionSummary>, MonitorError> {
        self.request(Command::Shutdown).await
    }

    /// Whether the task is still accepting commands.
    pub fn is_alive(&self) -> bool {
        !self.tx.is_closed()
    }
}
