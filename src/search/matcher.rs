//! Description search backed by a chat-completion endpoint.
//!
//! The model is asked to answer with nothing but a JSON array of ISO 3166-1
//! alpha-3 codes. That contract is a format instruction, not a schema: the
//! reply is parsed once and any deviation is a uniform failure. Codes that
//! are not in the catalog are dropped silently.

use crate::catalog::{sort_by_common_name, Catalog};
use crate::domain::{Country, Credential, FlagFinderError, Result};
use crate::net::{is_success, OutboundRequest, RequestKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Builds the natural-language prompt for a flag description.
#[must_use]
pub fn build_prompt(description: &str) -> String {
    format!(
        "Given this flag description: \"{description}\", return a JSON array of country codes \
         (ISO 3166-1 alpha-3) that best match this description. Only return the JSON array, \
         nothing else. Example: [\"USA\", \"GBR\", \"FRA\"]"
    )
}

/// Builds the completion request for a description search.
///
/// # Errors
///
/// - [`FlagFinderError::MissingCredential`] if `credential` is blank; no
///   request is produced in that case
/// - [`FlagFinderError::ModelReply`] if the body cannot be serialized
pub fn description_request(
    endpoint: &str,
    model: &str,
    credential: &Credential,
    description: &str,
    generation: u64,
) -> Result<OutboundRequest> {
    if credential.is_empty() {
        return Err(FlagFinderError::MissingCredential);
    }

    let prompt = build_prompt(description.trim());
    let payload = CompletionRequest {
        model,
        messages: [ChatMessage {
            role: "user",
            content: &prompt,
        }],
        temperature: TEMPERATURE,
    };

    tracing::debug!(
        model = %model,
        generation,
        credential_len = credential.len(),
        "building description request"
    );

    OutboundRequest::post_json(RequestKind::Description { generation }, endpoint, &payload)
        .map(|request| request.with_header("Authorization", format!("Bearer {}", credential.expose())))
        .map_err(|e| FlagFinderError::ModelReply(format!("failed to encode request: {e}")))
}

/// Extracts the country codes from a completion response.
///
/// # Errors
///
/// - [`FlagFinderError::ExternalRequest`] on a non-2xx status
/// - [`FlagFinderError::ModelReply`] if the body is not a completion, has no
///   choices, or its first message is not a JSON array of strings
pub fn parse_reply(status: u16, body: &[u8]) -> Result<Vec<String>> {
    let _span = tracing::debug_span!("parse_reply", status, body_len = body.len()).entered();

    if !is_success(status) {
        return Err(FlagFinderError::ExternalRequest { status });
    }

    let response: CompletionResponse = serde_json::from_slice(body)
        .map_err(|e| FlagFinderError::ModelReply(format!("not a completion response: {e}")))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| FlagFinderError::ModelReply("completion has no choices".to_string()))?;

    let codes: Vec<String> = serde_json::from_str(&content)
        .map_err(|e| FlagFinderError::ModelReply(format!("content is not a code array: {e}")))?;

    tracing::debug!(code_count = codes.len(), "model reply parsed");
    Ok(codes)
}

/// Intersects model codes with the catalog, sorted by common name.
///
/// Matching is exact on `cca3`. The order of `codes` is irrelevant and codes
/// with no catalog entry are dropped.
#[must_use]
pub fn match_codes(catalog: &Catalog, codes: &[String]) -> Vec<Country> {
    let wanted: HashSet<&str> = codes.iter().map(String::as_str).collect();

    let mut matched: Vec<Country> = catalog
        .countries()
        .iter()
        .filter(|country| wanted.contains(country.cca3.as_str()))
        .cloned()
        .collect();

    let dropped = wanted.len().saturating_sub(matched.len());
    if dropped > 0 {
        tracing::debug!(dropped, "model returned codes absent from catalog");
    }

    sort_by_common_name(&mut matched);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::Method;

    fn completion(content: &str) -> Vec<u8> {
        serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
        .to_string()
        .into_bytes()
    }

    fn catalog() -> Catalog {
        Catalog::from(vec![
            Country::new("Germany", "DEU", "Europe"),
            Country::new("France", "FRA", "Europe"),
            Country::new("Austria", "AUT", "Europe"),
        ])
    }

    #[test]
    fn prompt_embeds_description() {
        let prompt = build_prompt("red white red stripes");
        assert!(prompt.contains("\"red white red stripes\""));
        assert!(prompt.contains("ISO 3166-1 alpha-3"));
        assert!(prompt.contains("Only return the JSON array"));
    }

    #[test]
    fn request_has_bearer_and_fixed_parameters() {
        let request = description_request(
            "https://api.openai.com/v1/chat/completions",
            "gpt-3.5-turbo",
            &Credential::new("sk-test"),
            "  blue cross  ",
            7,
        )
        .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.kind, RequestKind::Description { generation: 7 });
        assert_eq!(request.headers.get("Authorization").map(String::as_str), Some("Bearer sk-test"));
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert!(body["messages"][0]["content"].as_str().unwrap().contains("\"blue cross\""));
    }

    #[test]
    fn blank_credential_produces_no_request() {
        let err = description_request("u", "m", &Credential::new("   "), "stripes", 1).unwrap_err();
        assert!(matches!(err, FlagFinderError::MissingCredential));
    }

    #[test]
    fn parses_code_array() {
        let codes = parse_reply(200, &completion(r#"["FRA", "ITA"]"#)).unwrap();
        assert_eq!(codes, vec!["FRA", "ITA"]);
    }

    #[test]
    fn non_success_status_is_external_failure() {
        let err = parse_reply(401, br#"{"error": {"message": "bad key"}}"#).unwrap_err();
        assert!(matches!(err, FlagFinderError::ExternalRequest { status: 401 }));
    }

    #[test]
    fn prose_reply_is_rejected() {
        let err = parse_reply(200, &completion("The flag is France: [\"FRA\"]")).unwrap_err();
        assert!(matches!(err, FlagFinderError::ModelReply(_)));
    }

    #[test]
    fn wrong_json_shape_is_rejected() {
        assert!(parse_reply(200, &completion(r#"{"codes": ["FRA"]}"#)).is_err());
        assert!(parse_reply(200, &completion("[1, 2]")).is_err());
        assert!(parse_reply(200, br#"{"choices": []}"#).is_err());
        assert!(parse_reply(200, b"<html>").is_err());
    }

    #[test]
    fn intersection_drops_unknown_codes_and_sorts() {
        let codes = vec!["FRA".to_string(), "ITA".to_string(), "AUT".to_string()];
        let matched = match_codes(&catalog(), &codes);
        let names: Vec<&str> = matched.iter().map(|c| c.name.common.as_str()).collect();
        assert_eq!(names, vec!["Austria", "France"]);
    }

    #[test]
    fn intersection_is_case_sensitive_and_deduplicated() {
        let codes = vec!["fra".to_string(), "DEU".to_string(), "DEU".to_string()];
        let matched = match_codes(&catalog(), &codes);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].cca3, "DEU");
    }
}
