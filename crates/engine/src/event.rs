//! Inbound authentication event decoding.
//!
//! Responsibilities:
//! - Decode the token-issuance event body into an [`AuthenticationEvent`].
//! - Merge the `name` query parameter with the body's top-level `name`.
//! - Pick the lookup identifier for a strategy.
//!
//! Invariants:
//! - A field with the wrong JSON type is a decode error, never a silent null.
//! - Subject fields: empty and whitespace-only strings are treated as absent;
//!   values are trimmed.
//! - The correlation id is copied through byte for byte.
//! - An empty body decodes as an event with no fields.

use claims_config::Strategy;
use serde::Deserialize;

use crate::error::ParseError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventBody {
    name: Option<String>,
    data: Option<EventData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventData {
    authentication_context: Option<AuthenticationContext>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticationContext {
    correlation_id: Option<String>,
    user: Option<EventUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventUser {
    id: Option<String>,
    mail: Option<String>,
    user_principal_name: Option<String>,
}

/// A parsed token-issuance event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticationEvent {
    /// Copied unchanged to the response; empty when the event has none.
    pub correlation_id: String,
    pub subject_object_id: Option<String>,
    pub subject_mail: Option<String>,
    pub subject_upn: Option<String>,
    /// `name` query parameter, or the body's top-level `name`.
    pub subject_name: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Decode an event body, letting a non-empty `name` override the body's `name`.
pub fn parse_event(body: &[u8], name: Option<&str>) -> Result<AuthenticationEvent, ParseError> {
    let decoded = if body.iter().all(u8::is_ascii_whitespace) {
        EventBody::default()
    } else {
        serde_json::from_slice::<Option<EventBody>>(body)
            .map_err(|e| ParseError::MalformedBody(e.to_string()))?
            .unwrap_or_default()
    };

    let context = decoded
        .data
        .and_then(|d| d.authentication_context)
        .unwrap_or_default();
    let user = context.user.unwrap_or_default();

    let event = AuthenticationEvent {
        correlation_id: context.correlation_id.unwrap_or_default(),
        subject_object_id: clean(user.id),
        subject_mail: clean(user.mail),
        subject_upn: clean(user.user_principal_name),
        subject_name: clean(name.map(str::to_string)).or_else(|| clean(decoded.name)),
    };

    if !event.has_subject() {
        return Err(ParseError::MissingSubject);
    }
    Ok(event)
}

impl AuthenticationEvent {
    /// True when at least one subject field is present.
    pub fn has_subject(&self) -> bool {
        self.subject_object_id.is_some()
            || self.subject_mail.is_some()
            || self.subject_upn.is_some()
            || self.subject_name.is_some()
    }

    /// The lookup identifier for `strategy`, first present wins:
    ///
    /// | strategy          | identifier |
    /// |-------------------|------------|
    /// | `CloudByObjectId` | object id |
    /// | `OnPremBySam`     | name, then the local part of the UPN |
    /// | `OnPremByMail`    | name, then mail, then UPN |
    pub fn identifier_for(&self, strategy: Strategy) -> Option<&str> {
        match strategy {
            Strategy::CloudByObjectId => self.subject_object_id.as_deref(),
            Strategy::OnPremBySam => self.subject_name.as_deref().or_else(|| {
                self.subject_upn
                    .as_deref()
                    .and_then(|upn| upn.split('@').next())
                    .filter(|local| !local.is_empty())
            }),
            Strategy::OnPremByMail => self
                .subject_name
                .as_deref()
                .or(self.subject_mail.as_deref())
                .or(self.subject_upn.as_deref()),
        }
    }
}
