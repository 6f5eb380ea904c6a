//! Analytics emitter - service layer
//!
//! Fire-and-forget notifications about user actions and screen changes.
//! `emit` returns nothing, so a sink can never refuse or fail a transition.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::info;

/// Event names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    QuizStarted,
    AgeWarningShown,
    AgeSubmitted,
    AgeContinuedDespiteWarning,
    ProductToggled,
    CategoryFiltered,
    ProductsSubmitted,
    ScreenEntered,
    ResultsScreenViewed,
    ResultsBackClicked,
    ResultsContinueClicked,
    QuizCompleted,
    WhatsappShareClicked,
    WhatsappCommunityClicked,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::QuizStarted => "quiz_started",
            EventName::AgeWarningShown => "age_warning_shown",
            EventName::AgeSubmitted => "age_submitted",
            EventName::AgeContinuedDespiteWarning => "age_continued_despite_warning",
            EventName::ProductToggled => "product_toggled",
            EventName::CategoryFiltered => "category_filtered",
            EventName::ProductsSubmitted => "products_submitted",
            EventName::ScreenEntered => "screen_entered",
            EventName::ResultsScreenViewed => "results_screen_viewed",
            EventName::ResultsBackClicked => "results_back_clicked",
            EventName::ResultsContinueClicked => "results_continue_clicked",
            EventName::QuizCompleted => "quiz_completed",
            EventName::WhatsappShareClicked => "whatsapp_share_clicked",
            EventName::WhatsappCommunityClicked => "whatsapp_community_clicked",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One analytics notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: EventName,
    /// Start time of the session that produced the event
    pub session_started_at: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
    pub payload: JsonValue,
}

impl AnalyticsEvent {
    pub fn new(name: EventName, session_started_at: DateTime<Utc>, payload: JsonValue) -> Self {
        Self {
            name,
            session_started_at,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Receiver of analytics events
pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: &AnalyticsEvent);
}

/// Writes each event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn emit(&self, event: &AnalyticsEvent) {
        info!(target: "analytics", event = %event.name, payload = %event.payload, "📈 {}", event.name);
    }
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn emit(&self, _event: &AnalyticsEvent) {}
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn names(&self) -> Vec<EventName> {
        self.events().iter().map(|e| e.name).collect()
    }

    /// Events with the given name, oldest first
    pub fn named(&self, name: EventName) -> Vec<AnalyticsEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl AnalyticsSink for MemorySink {
    fn emit(&self, event: &AnalyticsEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_name_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(EventName::AgeContinuedDespiteWarning).unwrap(),
            json!("age_continued_despite_warning")
        );
        assert_eq!(EventName::QuizCompleted.to_string(), "quiz_completed");
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        let started = Utc::now();
        sink.emit(&AnalyticsEvent::new(EventName::QuizStarted, started, json!({})));
        sink.emit(&AnalyticsEvent::new(
            EventName::AgeSubmitted,
            started,
            json!({ "age": 13 }),
        ));

        assert_eq!(
            sink.names(),
            vec![EventName::QuizStarted, EventName::AgeSubmitted]
        );
        assert_eq!(sink.named(EventName::AgeSubmitted)[0].payload["age"], 13);

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_tracing_and_noop_sinks_accept_events() {
        let _ = tracing_subscriber::fmt::try_init();
        let event = AnalyticsEvent::new(EventName::ScreenEntered, Utc::now(), json!({ "screen": "age" }));
        TracingSink.emit(&event);
        NoopSink.emit(&event);
    }
}
