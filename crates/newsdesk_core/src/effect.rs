#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one ingestion. `query: None` means the configured default query.
    Ingest {
        request_id: crate::RequestId,
        query: Option<String>,
        probe_first: bool,
    },
    /// Arm the delayed refresh that follows the view regaining focus.
    ScheduleVisibilityRefresh,
    CancelVisibilityRefresh,
}
