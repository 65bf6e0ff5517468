mod session;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use sewa_core::{
    classify_soil_moisture, clip_utterance, condition_for_code, interpret_predictions,
    normalize_utterance, recommendations, report_from_rows, AssistantReply, ChatInput,
    ConversationMessage, ConversationSession, CropRecommendation, IrrigationAdvisory,
    MarketReport, MessageRole, PestDiagnosis, PestError, ResponseTable, Season, SkyCondition,
};
use sewa_observability::AppMetrics;
use tracing::{info, instrument};
use uuid::Uuid;

pub use session::SessionStore;

const SESSION_TTL_HOURS: i64 = 24;
const MAX_SESSION_MESSAGES: usize = 80;

#[derive(Clone)]
pub struct SahayakAgent {
    table: ResponseTable,
    sessions: SessionStore,
    metrics: Arc<AppMetrics>,
}

impl SahayakAgent {
    pub fn new(table: ResponseTable, metrics: Arc<AppMetrics>) -> Self {
        Self {
            table,
            sessions: SessionStore::new(),
            metrics,
        }
    }

    pub fn handle_chat(&self, input: ChatInput) -> AssistantReply {
        self.handle_chat_at(input, Utc::now())
    }

    #[instrument(skip(self, input, at))]
    pub fn handle_chat_at(&self, input: ChatInput, at: DateTime<Utc>) -> AssistantReply {
        let started = Instant::now();
        self.metrics.inc_request();

        let normalized = normalize_utterance(clip_utterance(&input.text));
        let matched = self.table.match_entry(&normalized);
        let reply_text = match matched {
            Some(entry) => {
                self.metrics.inc_keyword_match();
                entry.response
            }
            None => {
                self.metrics.inc_fallback();
                self.table.fallback()
            }
        };

        // A presented id is honored only while its session is alive;
        // expired or unknown ids get a fresh session under a new id.
        let session_id = input
            .session_id
            .filter(|id| {
                self.sessions
                    .load(id)
                    .map_or(false, |session| session.expires_at > at)
            })
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        self.record_turn(&session_id, at, &normalized, reply_text);

        self.metrics.observe_latency(started.elapsed());
        info!(
            session_id = %session_id,
            matched_keyword = matched.map(|entry| entry.keyword).unwrap_or("-"),
            fallback = matched.is_none(),
            "chat routed"
        );

        AssistantReply {
            session_id,
            reply_text: reply_text.to_string(),
            matched_keyword: matched.map(|entry| entry.keyword.to_string()),
            fallback: matched.is_none(),
            at,
        }
    }

    pub fn irrigation_advisory(&self, moisture: Option<f64>) -> Option<IrrigationAdvisory> {
        self.metrics.inc_request();

        match classify_soil_moisture(moisture) {
            Some(category) => Some(IrrigationAdvisory::for_category(category)),
            None => {
                self.metrics.inc_no_reading();
                None
            }
        }
    }

    pub fn weather_condition(&self, code: u16) -> SkyCondition {
        self.metrics.inc_request();
        condition_for_code(code)
    }

    pub fn crop_cards(&self, season: Option<Season>) -> Vec<&'static CropRecommendation> {
        self.metrics.inc_request();
        recommendations(season)
    }

    pub fn market_report(
        &self,
        state: &str,
        commodity: &str,
        rows: &[Vec<String>],
    ) -> MarketReport {
        self.metrics.inc_request();
        report_from_rows(state, commodity, rows)
    }

    pub fn pest_diagnosis(
        &self,
        predictions: &BTreeMap<String, f64>,
    ) -> Result<PestDiagnosis, PestError> {
        self.metrics.inc_request();
        interpret_predictions(predictions)
    }

    pub fn session(&self, session_id: &str) -> Option<ConversationSession> {
        self.sessions.load(session_id)
    }

    pub fn purge_expired_sessions(&self) -> u64 {
        self.sessions.purge_expired(Utc::now())
    }

    fn record_turn(
        &self,
        session_id: &str,
        at: DateTime<Utc>,
        user_text: &str,
        assistant_text: &str,
    ) {
        let mut session = self
            .sessions
            .load(session_id)
            .filter(|session| session.expires_at > at)
            .unwrap_or_else(|| ConversationSession {
                session_id: session_id.to_string(),
                expires_at: at + Duration::hours(SESSION_TTL_HOURS),
                messages: Vec::new(),
            });

        session.expires_at = at + Duration::hours(SESSION_TTL_HOURS);
        session.messages.push(ConversationMessage {
            at,
            role: MessageRole::User,
            text: user_text.to_string(),
        });
        session.messages.push(ConversationMessage {
            at,
            role: MessageRole::Assistant,
            text: assistant_text.to_string(),
        });

        if session.messages.len() > MAX_SESSION_MESSAGES {
            let keep_from = session.messages.len() - MAX_SESSION_MESSAGES;
            session.messages = session.messages.split_off(keep_from);
        }

        self.sessions.upsert(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> SahayakAgent {
        SahayakAgent::new(ResponseTable::builtin(), AppMetrics::shared())
    }

    fn chat(agent: &SahayakAgent, session_id: Option<String>, text: &str) -> AssistantReply {
        agent.handle_chat(ChatInput {
            session_id,
            text: text.to_string(),
        })
    }

    #[test]
    fn chat_appends_both_messages_to_the_session() {
        let agent = agent();
        let reply = chat(&agent, None, "When should I sow wheat?");

        assert!(!reply.fallback);
        assert_eq!(reply.matched_keyword.as_deref(), Some("wheat"));

        let session = agent.session(&reply.session_id).expect("session stored");
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, MessageRole::User);
        assert_eq!(session.messages[1].role, MessageRole::Assistant);
        assert_eq!(session.messages[1].text, reply.reply_text);
    }

    #[test]
    fn session_id_is_reused_across_turns() {
        let agent = agent();
        let first = chat(&agent, None, "wheat");
        let second = chat(&agent, Some(first.session_id.clone()), "asdkjasdkj");

        assert!(second.fallback);
        assert_eq!(first.session_id, second.session_id);

        let session = agent.session(&first.session_id).expect("session stored");
        assert_eq!(session.messages.len(), 4);
    }

    #[test]
    fn transcript_caps_at_the_message_limit() {
        let agent = agent();
        let first = chat(&agent, None, "wheat");
        for _ in 0..60 {
            chat(&agent, Some(first.session_id.clone()), "wheat");
        }

        let session = agent.session(&first.session_id).expect("session stored");
        assert_eq!(session.messages.len(), MAX_SESSION_MESSAGES);
    }

    #[test]
    fn expired_session_is_replaced_under_a_fresh_id() {
        let agent = agent();
        let first = chat(&agent, None, "wheat");

        let later = Utc::now() + Duration::hours(SESSION_TTL_HOURS + 1);
        let second = agent.handle_chat_at(
            ChatInput {
                session_id: Some(first.session_id.clone()),
                text: "wheat".to_string(),
            },
            later,
        );

        assert_ne!(second.session_id, first.session_id);
        let session = agent.session(&second.session_id).expect("session stored");
        assert_eq!(session.messages.len(), 2);
        assert!(session.expires_at > later);
    }

    #[test]
    fn unknown_session_id_is_not_adopted() {
        let agent = agent();
        let reply = chat(&agent, Some("never-issued".to_string()), "wheat");

        assert_ne!(reply.session_id, "never-issued");
        assert!(agent.session("never-issued").is_none());
        assert!(agent.session(&reply.session_id).is_some());
    }

    #[test]
    fn advisory_passthrough_matches_classifier() {
        let agent = agent();

        let advisory = agent.irrigation_advisory(Some(0.41)).expect("saturated");
        assert_eq!(advisory.category.as_code(), "saturated");
        assert!(agent.irrigation_advisory(None).is_none());
    }

    #[test]
    fn utterance_is_normalized_before_routing() {
        let agent = agent();
        let reply = chat(&agent, None, "   WHEAT \n sowing   time  ");
        assert!(!reply.fallback);

        let session = agent.session(&reply.session_id).expect("session stored");
        assert_eq!(session.messages[0].text, "WHEAT sowing time");
    }
}
