//! Intent-resolver contract.
//!
//! The resolver turns free text ("hire two cooks", "use cheaper packaging")
//! into either validated modification requests or a clarifying question. The
//! engine never parses text itself: everything crossing this boundary is a
//! well-typed value, and ambiguity surfaces as [`ResolverResponse::Question`],
//! never as an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::chart_of_accounts::Target;
use crate::error::Result;
use crate::modification::{Modification, ModificationKind, Parameter, ParameterUnit};
use crate::utils::parse_month;

/// One candidate modification produced by the resolver, before it has been
/// validated against the chart of accounts and given interactive bounds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRequest {
    #[schemars(description = "Either 'percentage' (percent change) or 'fixed' (absolute monthly delta)")]
    pub kind: ModificationKind,

    #[schemars(description = "Statement category, e.g. 'revenue', 'cogs', 'expenses.labor'")]
    pub category: String,

    #[schemars(description = "Leaf item within the category, e.g. 'inStore', 'packaging', 'wages'")]
    pub item: String,

    #[schemars(
        description = "For 'percentage', the percent change (e.g. -15 for a 15% reduction). For 'fixed', the monthly amount added to the leaf."
    )]
    pub value: f64,

    #[serde(default)]
    #[schemars(
        description = "Optional first month the change applies to, in YYYY-MM format. Omit to apply from the first forecast month."
    )]
    pub start_date: Option<String>,

    #[serde(default)]
    #[schemars(description = "Short reasoning behind the suggested value, shown to the user")]
    pub explanation: Option<String>,
}

impl ModificationRequest {
    /// Validates the request against the statement schema and promotes it to
    /// a full [`Modification`] with interactive slider bounds.
    ///
    /// Unknown (category, item) pairs fail here with `TargetNotFound`, so a
    /// malformed resolver output can never reach the projection loop.
    pub fn into_modification(self) -> Result<Modification> {
        let target = Target::resolve(&self.category, &self.item)?;

        let start_date = match &self.start_date {
            Some(month) => Some(parse_month(month)?),
            None => None,
        };

        let (parameter, description) = match self.kind {
            ModificationKind::Percentage => (
                Parameter {
                    value: self.value,
                    min: (-100.0_f64).min(self.value),
                    max: 100.0_f64.max(self.value),
                    step: 1.0,
                    unit: ParameterUnit::Percent,
                },
                format!(
                    "Change {}.{} by {}% each forecast month",
                    target.category(),
                    target.item(),
                    self.value
                ),
            ),
            ModificationKind::Fixed => {
                let lo = self.value * 0.5;
                let hi = self.value * 1.5;
                (
                    Parameter {
                        value: self.value,
                        min: lo.min(hi),
                        max: lo.max(hi),
                        step: 100.0,
                        unit: ParameterUnit::Currency,
                    },
                    format!(
                        "Adjust {}.{} by {:.0} per forecast month",
                        target.category(),
                        target.item(),
                        self.value
                    ),
                )
            }
        };

        Modification::new(
            self.kind,
            target,
            parameter,
            description,
            self.explanation.unwrap_or_default(),
            start_date,
        )
    }
}

/// The resolver's structured reply: either concrete modification requests or
/// a clarifying question to put back to the user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "responseType", content = "data", rename_all = "lowercase")]
pub enum ResolverResponse {
    Modification(Vec<ModificationRequest>),
    Question(String),
}

impl ResolverResponse {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ResolverResponse)
    }

    pub fn schema_as_json() -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::generate_json_schema())?)
    }
}

/// One turn of resolver conversation, kept by the host so follow-up answers
/// ("all of them") resolve against earlier context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[cfg(feature = "resolver-client")]
pub use client::IntentResolver;

#[cfg(feature = "resolver-client")]
mod client {
    use log::{debug, info};
    use serde_json::json;

    use super::{ChatMessage, ResolverResponse};
    use crate::chart_of_accounts::ChartOfAccounts;
    use crate::error::{ForecastError, Result};

    const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Client for an OpenAI-compatible chat completions endpoint.
    pub struct IntentResolver {
        http: reqwest::Client,
        api_key: String,
        base_url: String,
        model: String,
    }

    impl IntentResolver {
        pub fn new(api_key: impl Into<String>) -> Self {
            Self {
                http: reqwest::Client::new(),
                api_key: api_key.into(),
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
            }
        }

        pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = base_url.into();
            self
        }

        pub fn with_model(mut self, model: impl Into<String>) -> Self {
            self.model = model.into();
            self
        }

        fn system_prompt(chart: &ChartOfAccounts) -> String {
            format!(
                r#"You are a financial planning assistant for a small business owner.

The valid modification targets are the (category, item) pairs below:

{}

Rules:
1. If the user's request is a clear financial change, respond with responseType "modification" and a "data" array of modification objects. Each object has: "kind" ('percentage' or 'fixed'), "category", "item", "value", optionally "startDate" (YYYY-MM) and "explanation".
2. If the request is about a financial change but ambiguous (e.g. "cut costs"), respond with responseType "question" and a clarifying question string in "data". Never invent a modification for an ambiguous request.
3. If the user asks a general question, answer conversationally with responseType "question".
4. Only use (category, item) pairs from the list above. Map intents sensibly, e.g. "hire a cook" targets (expenses.labor, wages).
5. Respond with a single valid JSON object containing "responseType" and "data", nothing else.
"#,
                chart.to_markdown()
            )
        }

        /// Resolves free text against the chart of accounts, returning either
        /// modification requests or a clarifying question.
        pub async fn resolve(
            &self,
            user_query: &str,
            chart: &ChartOfAccounts,
            history: &[ChatMessage],
        ) -> Result<ResolverResponse> {
            info!("Resolving user intent ({} chars)", user_query.len());

            let mut messages = vec![json!({
                "role": "system",
                "content": Self::system_prompt(chart),
            })];
            for message in history {
                messages.push(json!({
                    "role": message.role,
                    "content": message.content,
                }));
            }
            messages.push(json!({
                "role": "user",
                "content": user_query,
            }));

            let body = json!({
                "model": self.model,
                "messages": messages,
                "response_format": { "type": "json_object" },
            });

            let response = self
                .http
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?
                .error_for_status()?;

            let payload: serde_json::Value = response.json().await?;
            let content = payload["choices"][0]["message"]["content"]
                .as_str()
                .ok_or_else(|| {
                    ForecastError::ResolverResponse(
                        "completion payload had no message content".to_string(),
                    )
                })?;

            debug!("Resolver raw content: {}", content);

            serde_json::from_str::<ResolverResponse>(content).map_err(|e| {
                ForecastError::ResolverResponse(format!(
                    "could not parse resolver JSON: {} (content: {})",
                    e, content
                ))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_of_accounts::Target;
    use crate::error::ForecastError;
    use crate::utils::last_day_of_month;

    #[test]
    fn test_modification_response_round_trip() {
        let json = r#"{
            "responseType": "modification",
            "data": [{"kind": "percentage", "category": "revenue", "item": "inStore", "value": 15}]
        }"#;

        let response: ResolverResponse = serde_json::from_str(json).unwrap();
        match response {
            ResolverResponse::Modification(requests) => {
                assert_eq!(requests.len(), 1);
                assert_eq!(requests[0].category, "revenue");
                assert_eq!(requests[0].value, 15.0);
            }
            ResolverResponse::Question(_) => panic!("expected modifications"),
        }
    }

    #[test]
    fn test_question_response() {
        let json = r#"{
            "responseType": "question",
            "data": "Which revenue item would you like to focus on increasing?"
        }"#;

        let response: ResolverResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(response, ResolverResponse::Question(q) if q.contains("revenue")));
    }

    #[test]
    fn test_into_modification_percentage() {
        let request = ModificationRequest {
            kind: ModificationKind::Percentage,
            category: "cogs".to_string(),
            item: "packaging".to_string(),
            value: -15.0,
            start_date: None,
            explanation: Some("Cheaper packaging suppliers typically save 10-20%".to_string()),
        };

        let modification = request.into_modification().unwrap();
        assert_eq!(modification.target, Target::CogsPackaging);
        assert_eq!(modification.parameter.value, -15.0);
        assert_eq!(modification.parameter.min, -100.0);
        assert_eq!(modification.parameter.max, 100.0);
        assert!(modification.start_date.is_none());
        assert!(modification.explanation.contains("suppliers"));
    }

    #[test]
    fn test_into_modification_fixed_with_start_date() {
        let request = ModificationRequest {
            kind: ModificationKind::Fixed,
            category: "expenses.labor".to_string(),
            item: "wages".to_string(),
            value: 8000.0,
            start_date: Some("2025-09".to_string()),
            explanation: None,
        };

        let modification = request.into_modification().unwrap();
        assert_eq!(modification.target, Target::LaborWages);
        assert_eq!(modification.parameter.min, 4000.0);
        assert_eq!(modification.parameter.max, 12000.0);
        assert_eq!(modification.parameter.step, 100.0);
        assert_eq!(modification.start_date, Some(last_day_of_month(2025, 9)));
    }

    #[test]
    fn test_into_modification_unknown_target() {
        let request = ModificationRequest {
            kind: ModificationKind::Fixed,
            category: "cogs".to_string(),
            item: "cutlery".to_string(),
            value: 100.0,
            start_date: None,
            explanation: None,
        };

        assert!(matches!(
            request.into_modification(),
            Err(ForecastError::TargetNotFound { .. })
        ));
    }

    #[test]
    fn test_into_modification_bad_start_date() {
        let request = ModificationRequest {
            kind: ModificationKind::Fixed,
            category: "expenses.labor".to_string(),
            item: "wages".to_string(),
            value: 500.0,
            start_date: Some("September".to_string()),
            explanation: None,
        };

        assert!(matches!(
            request.into_modification(),
            Err(ForecastError::DateError(_))
        ));
    }

    #[test]
    fn test_schema_generation() {
        let schema = ResolverResponse::schema_as_json().unwrap();
        assert!(schema.contains("responseType"));
        assert!(schema.contains("percentage"));
    }
}
