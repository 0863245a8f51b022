use desk_logging::{desk_debug, desk_warn};
use newsdesk_core::{Effect, FeedIssue, Msg};
use newsdesk_engine::{DeskConfig, EngineEvent, EngineHandle, IngestError};

/// Executes effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn start(config: DeskConfig) -> anyhow::Result<Self> {
        Ok(Self::new(EngineHandle::start(config)?))
    }

    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Ingest {
                    request_id,
                    query,
                    probe_first,
                } => {
                    desk_debug!(
                        "Ingest request_id={} custom_query={} probe_first={}",
                        request_id,
                        query.is_some(),
                        probe_first
                    );
                    self.engine.ingest(request_id, query, probe_first);
                }
                Effect::ScheduleVisibilityRefresh => self.engine.schedule_visibility_refresh(),
                Effect::CancelVisibilityRefresh => self.engine.cancel_visibility_refresh(),
            }
        }
    }

    /// Drains every event the engine has produced so far.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::IngestCompleted { request_id, report } => {
            let issue = report.issue.map(|err| {
                if err.is_failure() {
                    desk_warn!("Request #{} fell back to demo data: {}", request_id, err);
                }
                map_issue(err)
            });
            Msg::IngestionFinished {
                request_id,
                articles: report.articles,
                issue,
                fetched_at: report.fetched_at,
            }
        }
        EngineEvent::RefreshDue(trigger) => Msg::RefreshRequested(trigger),
    }
}

fn map_issue(err: IngestError) -> FeedIssue {
    match err {
        IngestError::NotConfigured => FeedIssue::NotConfigured,
        IngestError::Auth => FeedIssue::Auth,
        IngestError::RateLimited => FeedIssue::RateLimited,
        IngestError::Http(status) => FeedIssue::Http(status),
        IngestError::Api(message) => FeedIssue::Api(message),
        IngestError::Timeout => FeedIssue::Timeout,
        IngestError::Network(message) => FeedIssue::Network(message),
        IngestError::Decode(message) => FeedIssue::Api(format!("malformed response: {message}")),
        IngestError::EmptyResult => FeedIssue::EmptyResult,
    }
}
