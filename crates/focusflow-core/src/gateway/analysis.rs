//! Schema-constrained analysis of the study log.

use indoc::indoc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::client::{Content, GeminiClient, GenerateContentRequest, GenerationConfig};
use crate::error::GatewayError;
use crate::store::StudySession;

/// Wellbeing ratings derived from the session notes, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    pub stress: u8,
    pub happiness: u8,
    pub concentration: u8,
    pub fatigue: u8,
}

/// Structured result of a study-log analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyAnalysis {
    pub summary: String,
    pub tip: String,
    pub indicators: Indicators,
}

// The model answers with NUMBER fields; values outside 0-100 are clamped
// rather than rejected.
#[derive(Deserialize)]
struct RawAnalysis {
    summary: String,
    tip: String,
    indicators: RawIndicators,
}

#[derive(Deserialize)]
struct RawIndicators {
    stress: f64,
    happiness: f64,
    concentration: f64,
    fatigue: f64,
}

fn clamp_rating(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

impl From<RawAnalysis> for StudyAnalysis {
    fn from(raw: RawAnalysis) -> Self {
        Self {
            summary: raw.summary,
            tip: raw.tip,
            indicators: Indicators {
                stress: clamp_rating(raw.indicators.stress),
                happiness: clamp_rating(raw.indicators.happiness),
                concentration: clamp_rating(raw.indicators.concentration),
                fatigue: clamp_rating(raw.indicators.fatigue),
            },
        }
    }
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A concise, encouraging summary of the user's study day based on their session notes."
            },
            "tip": {
                "type": "STRING",
                "description": "One practical, positive tip to improve the next study day."
            },
            "indicators": {
                "type": "OBJECT",
                "properties": {
                    "stress": {
                        "type": "NUMBER",
                        "description": "A rating from 0 (no stress) to 100 (very high stress) based on the session notes."
                    },
                    "happiness": {
                        "type": "NUMBER",
                        "description": "A rating from 0 (very unhappy) to 100 (very happy) based on the session notes."
                    },
                    "concentration": {
                        "type": "NUMBER",
                        "description": "A rating from 0 (very distracted) to 100 (fully focused) based on the session notes."
                    },
                    "fatigue": {
                        "type": "NUMBER",
                        "description": "A rating from 0 (very energetic) to 100 (very fatigued) based on the session notes."
                    }
                },
                "required": ["stress", "happiness", "concentration", "fatigue"]
            }
        },
        "required": ["summary", "tip", "indicators"]
    })
}

fn build_prompt(sessions: &[StudySession]) -> String {
    let log: Vec<serde_json::Value> = sessions
        .iter()
        .map(|s| json!({ "duration": s.duration_secs, "notes": s.notes }))
        .collect();

    format!(
        indoc! {"
            Analyze the following study session logs. The user wrote a note after
            each session about how it went. Provide a concise summary, one practical
            tip, and rate stress, happiness, concentration and fatigue from 0 to 100.

            Log: {log}
        "},
        log = serde_json::Value::Array(log)
    )
}

/// Ask the model for a structured analysis of the whole session log.
///
/// An empty log is rejected locally before any network I/O.
pub async fn analyze_sessions(
    client: &GeminiClient,
    model: &str,
    sessions: &[StudySession],
) -> Result<StudyAnalysis, GatewayError> {
    if sessions.is_empty() {
        return Err(GatewayError::NoSessions);
    }

    let request = GenerateContentRequest {
        contents: vec![Content::user(build_prompt(sessions))],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".into(),
            response_schema: response_schema(),
        }),
    };

    let text = client.generate(model, &request).await?;
    let raw: RawAnalysis = serde_json::from_str(&text)
        .map_err(|e| GatewayError::InvalidResponse(format!("analysis payload: {e}")))?;
    Ok(raw.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn session(notes: &str) -> StudySession {
        StudySession {
            id: Uuid::new_v4(),
            date: Utc::now(),
            duration_secs: 1500,
            notes: notes.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_log_is_rejected_before_any_network_call() {
        // Unroutable endpoint: reaching the network would fail differently.
        let client = GeminiClient::new("key").with_base_url("http://127.0.0.1:0");
        let err = analyze_sessions(&client, "gemini-2.5-pro", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NoSessions));
    }

    #[test]
    fn prompt_embeds_duration_and_notes() {
        let prompt = build_prompt(&[session("Felt sharp today.")]);
        assert!(prompt.contains("\"duration\":1500"));
        assert!(prompt.contains("Felt sharp today."));
    }

    #[test]
    fn out_of_range_ratings_are_clamped() {
        let raw: RawAnalysis = serde_json::from_str(
            r#"{
                "summary": "Good day.",
                "tip": "Sleep earlier.",
                "indicators": {"stress": -12, "happiness": 250.7, "concentration": 80.4, "fatigue": 33}
            }"#,
        )
        .unwrap();
        let analysis = StudyAnalysis::from(raw);
        assert_eq!(analysis.indicators.stress, 0);
        assert_eq!(analysis.indicators.happiness, 100);
        assert_eq!(analysis.indicators.concentration, 80);
        assert_eq!(analysis.indicators.fatigue, 33);
    }

    #[test]
    fn schema_requires_all_four_indicators() {
        let schema = response_schema();
        let required: Vec<&str> = schema["properties"]["indicators"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["stress", "happiness", "concentration", "fatigue"]
        );
    }
}
