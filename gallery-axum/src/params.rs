use std::collections::HashMap;

use axum::http::HeaderMap;
use axum::http::Uri;
use gallery_core::{GalleryError, SessionContext, SessionId};
use serde_json::json;

pub const SESSION_HEADER: &str = "x-session-id";
pub const SESSION_QUERY: &str = "session";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Default)]
pub struct RestParams {
    pub provider: String,
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub method: String,
    pub path: String,
    pub raw_query: Option<String>,
}

impl RestParams {
    pub fn from_parts(
        provider: &str,
        headers: &HeaderMap,
        query: HashMap<String, String>,
        method: &str,
        uri: &Uri,
    ) -> Self {
        let mut out = Self {
            provider: provider.to_string(),
            headers: HashMap::new(),
            query,
            method: method.to_string(),
            path: uri.path().to_string(),
            raw_query: uri.query().map(|s| s.to_string()),
        };

        for (k, v) in headers.iter() {
            if let Ok(s) = v.to_str() {
                out.headers.insert(k.to_string(), s.to_string());
            }
        }

        out
    }

    /// Header lookup; names are stored lower-cased.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Non-blank query value.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// A `>= 1` integer query value; anything else is a `BadRequest`.
    pub fn positive_usize(&self, key: &str) -> anyhow::Result<Option<usize>> {
        let Some(raw) = self.query_value(key) else {
            return Ok(None);
        };
        match raw.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Some(n)),
            _ => {
                let mut errors = serde_json::Map::new();
                errors.insert(key.to_string(), json!(["must be a positive integer"]));
                Err(GalleryError::bad_request(format!("Invalid query parameter `{key}`"))
                    .with_errors(errors.into())
                    .into_anyhow())
            }
        }
    }

    /// Session id from `x-session-id`, else `?session=`. Invalid ids are ignored.
    pub fn session_id(&self) -> Option<SessionId> {
        self.header(SESSION_HEADER)
            .and_then(SessionId::parse)
            .or_else(|| self.query_value(SESSION_QUERY).and_then(SessionId::parse))
    }

    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    pub fn session_context(&self) -> SessionContext {
        let mut ctx = SessionContext::anonymous();
        if let Some(id) = self.session_id() {
            ctx = ctx.with_session(id);
        }
        if let Some(request_id) = self.request_id() {
            ctx = ctx.with_request_id(request_id);
        }
        ctx
    }
}

pub trait FromRestParams: Sized {
    fn from_rest_params(params: RestParams) -> Self;
}

impl FromRestParams for RestParams {
    fn from_rest_params(params: RestParams) -> Self {
        params
    }
}

impl FromRestParams for () {
    fn from_rest_params(_params: RestParams) -> Self {}
}
