use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use desk_logging::{desk_debug, desk_error, desk_info};
use newsdesk_core::{RefreshTrigger, RequestId};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::service::{IngestReport, IngestionService};
use crate::{ConfigError, DeskConfig, IngestError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    IngestCompleted {
        request_id: RequestId,
        report: IngestReport,
    },
    /// A timer fired; the receiver decides whether a refresh actually runs.
    RefreshDue(RefreshTrigger),
}

enum EngineCommand {
    Ingest {
        request_id: RequestId,
        query: Option<String>,
        probe_first: bool,
    },
    ScheduleVisibilityRefresh,
    CancelVisibilityRefresh,
}

/// Owns the engine thread. All async work runs on that thread's
/// current-thread runtime; dropping the handle cancels timers and joins it.
pub struct EngineHandle {
    cmd_tx: UnboundedSender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn start(config: DeskConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(IngestionService::from_config(config)?))
    }

    pub fn new(service: IngestionService) -> Self {
        let (cmd_tx, cmd_rx) = unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let service = Arc::new(service);

        let worker = {
            let shutdown = shutdown.clone();
            let event_tx = event_tx.clone();
            thread::spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        desk_error!("Failed to start engine runtime: {}", err);
                        return;
                    }
                };
                runtime.block_on(run(service, cmd_rx, event_tx, shutdown));
                desk_debug!("Engine stopped");
            })
        };

        Self {
            cmd_tx,
            event_tx,
            event_rx,
            shutdown,
            worker: Some(worker),
        }
    }

    /// Always yields exactly one `IngestCompleted` for `request_id`, even when
    /// the engine thread is gone.
    pub fn ingest(&self, request_id: RequestId, query: Option<String>, probe_first: bool) {
        let sent = self.cmd_tx.send(EngineCommand::Ingest {
            request_id,
            query,
            probe_first,
        });
        if sent.is_err() {
            desk_error!("Engine is not running, request #{} falls back", request_id);
            let report = IngestReport::fallback(IngestError::Network("engine stopped".into()));
            let _ = self
                .event_tx
                .send(EngineEvent::IngestCompleted { request_id, report });
        }
    }

    /// Replaces any pending visibility refresh with a fresh one.
    pub fn schedule_visibility_refresh(&self) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleVisibilityRefresh);
    }

    pub fn cancel_visibility_refresh(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelVisibilityRefresh);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

async fn run(
    service: Arc<IngestionService>,
    mut cmd_rx: UnboundedReceiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    shutdown: CancellationToken,
) {
    if let Some(period) = service.config().auto_refresh_interval() {
        desk_info!("Auto-refresh every {}s", period.as_secs());
        tokio::spawn(auto_refresh(period, event_tx.clone(), shutdown.child_token()));
    }
    let delay = service.config().visibility_refresh_delay();
    let mut visibility: Option<CancellationToken> = None;

    loop {
        let command = tokio::select! {
            _ = shutdown.cancelled() => break,
            command = cmd_rx.recv() => match command {
                Some(command) => command,
                None => break,
            },
        };

        match command {
            EngineCommand::Ingest {
                request_id,
                query,
                probe_first,
            } => {
                let service = service.clone();
                let event_tx = event_tx.clone();
                let task = tokio::spawn(async move {
                    service.ingest(query.as_deref(), probe_first).await
                });
                tokio::spawn(async move {
                    let report = match task.await {
                        Ok(report) => report,
                        Err(err) => {
                            desk_error!("Ingest task for request #{} failed: {}", request_id, err);
                            IngestReport::fallback(IngestError::Network(format!(
                                "ingest task failed: {err}"
                            )))
                        }
                    };
                    let _ = event_tx.send(EngineEvent::IngestCompleted { request_id, report });
                });
            }
            EngineCommand::ScheduleVisibilityRefresh => {
                if let Some(previous) = visibility.take() {
                    previous.cancel();
                }
                let token = shutdown.child_token();
                visibility = Some(token.clone());
                tokio::spawn(delayed_refresh(delay, event_tx.clone(), token));
            }
            EngineCommand::CancelVisibilityRefresh => {
                if let Some(previous) = visibility.take() {
                    previous.cancel();
                }
            }
        }
    }

    shutdown.cancel();
}

async fn auto_refresh(
    period: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = ticker.tick() => {
                if event_tx
                    .send(EngineEvent::RefreshDue(RefreshTrigger::Interval))
                    .is_err()
                {
                    return;
                }
            }
        }
    }
}

async fn delayed_refresh(
    delay: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
    token: CancellationToken,
) {
    tokio::select! {
        _ = token.cancelled() => {}
        _ = tokio::time::sleep(delay) => {
            let _ = event_tx.send(EngineEvent::RefreshDue(RefreshTrigger::Visibility));
        }
    }
}
