// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ucscene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Misuse-case suggestions.
//!
//! The engine does not talk to any suggestion service itself. It builds the request for a
//! selected use case, parses whatever text the service answers with, and turns the
//! suggestions the user confirms into one atomic batch of scene ops.

mod plan;

use std::fmt;
use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{NodeId, NodeKind};

pub use plan::{
    plan_materialization, suggestion_request, MISUSER_COLUMN_OFFSET, MISUSE_COLUMN_OFFSET,
    ROW_SPACING,
};

/// System name sent when the use case sits outside every system boundary.
pub const DEFAULT_SYSTEM_NAME: &str = "the system";

pub const SYSTEM_PROMPT: &str = "You are a security expert who identifies potential misuse \
cases for software systems. Given a use case, identify 3-5 potential misuse scenarios that \
could threaten it. Answer with a JSON array only, where each element has the fields \"name\" \
(short name of the misuse case), \"description\" (the misuse scenario in detail), \"actor\" \
(the kind of malicious actor who might do this) and \"impact\" (the potential impact).";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionRequest {
    #[serde(rename = "useCaseName")]
    pub use_case_name: String,
    #[serde(rename = "systemName", default = "default_system_name")]
    pub system_name: String,
    #[serde(rename = "otherUseCases", default)]
    pub other_use_cases: Vec<String>,
}

fn default_system_name() -> String {
    DEFAULT_SYSTEM_NAME.to_owned()
}

impl SuggestionRequest {
    pub fn validate(&self) -> Result<(), SuggestError> {
        if self.use_case_name.trim().is_empty() {
            return Err(SuggestError::MissingUseCaseName);
        }
        Ok(())
    }

    /// User turn of the conversation sent along with [`SYSTEM_PROMPT`].
    pub fn user_prompt(&self) -> String {
        let related = if self.other_use_cases.is_empty() {
            "none".to_owned()
        } else {
            self.other_use_cases.join(", ")
        };
        format!(
            "Use case: {}\nSystem: {}\nRelated use cases: {}\n\
             Generate 3-5 realistic misuse cases that could threaten this use case. \
             Focus on security weaknesses, malicious usage patterns and ways to exploit \
             the system.",
            self.use_case_name, self.system_name, related
        )
    }
}

/// One proposed misuse case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MisuseSuggestion {
    pub name: String,
    pub description: String,
    pub actor: String,
    pub impact: String,
}

impl MisuseSuggestion {
    const FIELDS: [&'static str; 4] = ["name", "description", "actor", "impact"];

    /// Builds a suggestion from a loosely shaped JSON object; absent fields get placeholders.
    fn from_object(object: &serde_json::Map<String, Value>) -> Self {
        let field = |name: &str| match object.get(name) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => placeholder(name),
            Some(other) => other.to_string(),
        };
        let [name, description, actor, impact] = Self::FIELDS.map(field);
        Self { name, description, actor, impact }
    }
}

fn placeholder(field: &str) -> String {
    format!("{field} information unavailable")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Response body of the suggestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionEnvelope {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<MisuseSuggestion>>,
}

impl SuggestionEnvelope {
    pub fn success(data: Vec<MisuseSuggestion>) -> Self {
        Self { status: EnvelopeStatus::Success, message: None, data: Some(data) }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: Some(message.into()),
            data: Some(Vec::new()),
        }
    }

    pub fn into_result(self) -> Result<Vec<MisuseSuggestion>, SuggestError> {
        match self.status {
            EnvelopeStatus::Success => Ok(self.data.unwrap_or_default()),
            EnvelopeStatus::Error => Err(SuggestError::Remote {
                message: self.message.unwrap_or_else(|| "suggestion service failed".to_owned()),
            }),
        }
    }
}

/// Outbound capability that proposes misuse cases for a use case.
pub trait MisuseCaseSuggester {
    fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<MisuseSuggestion>, SuggestError>;
}

impl<F> MisuseCaseSuggester for F
where
    F: Fn(&SuggestionRequest) -> Result<Vec<MisuseSuggestion>, SuggestError>,
{
    fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<MisuseSuggestion>, SuggestError> {
        self(request)
    }
}

fn embedded_array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").expect("valid suggestion regex"))
}

/// Parses a model answer into suggestions.
///
/// The whole text is tried as a JSON array first. Failing that, the widest `[ { ... } ]`
/// span inside the text is parsed, which copes with answers wrapped in prose.
pub fn parse_suggestions(text: &str) -> Result<Vec<MisuseSuggestion>, SuggestError> {
    let items = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items,
        _ => {
            let Some(span) = embedded_array_regex().find(text) else {
                return Err(SuggestError::unparseable(text));
            };
            match serde_json::from_str::<Value>(span.as_str()) {
                Ok(Value::Array(items)) => items,
                _ => return Err(SuggestError::unparseable(text)),
            }
        }
    };

    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(object) => Some(MisuseSuggestion::from_object(object)),
            _ => {
                warn!("suggest: ignoring non-object item {index}");
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestError {
    MissingUseCaseName,
    NodeNotFound { node_id: NodeId },
    NotAUseCase { node_id: NodeId, kind: NodeKind },
    Unparseable { preview: String },
    Remote { message: String },
}

impl SuggestError {
    fn unparseable(text: &str) -> Self {
        const PREVIEW_CHARS: usize = 100;
        let mut preview = text.chars().take(PREVIEW_CHARS).collect::<String>();
        if text.chars().nth(PREVIEW_CHARS).is_some() {
            preview.push_str("...");
        }
        Self::Unparseable { preview }
    }
}

impl fmt::Display for SuggestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUseCaseName => f.write_str("use case name is required"),
            Self::NodeNotFound { node_id } => write!(f, "node not found (id={node_id})"),
            Self::NotAUseCase { node_id, kind } => {
                write!(f, "suggestions need a use case, {node_id} is a {kind}")
            }
            Self::Unparseable { preview } => {
                write!(f, "could not read suggestions as JSON: {preview:?}")
            }
            Self::Remote { message } => write!(f, "suggestion service error: {message}"),
        }
    }
}

impl std::error::Error for SuggestError {}
