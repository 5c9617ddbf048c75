//! Response-shape routing
//!
//! Most endpoints wrap their payload in the `{statusCode, error, message,
//! data}` envelope; a few return the payload directly. Which shape a call
//! expects is looked up in a [`RouteTable`] (or supplied per call) instead
//! of being guessed from the URL at response time.

use courseportal_domain::constants::CURRENT_USER_ENDPOINT;

/// How a response body should be decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{statusCode, error, message, data}`; the caller receives `data`
    #[default]
    Enveloped,
    /// The caller receives the body as-is
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
}

/// A path pattern such as `/admin/topic/{id}`
///
/// `{name}` segments match exactly one path segment. Query strings and
/// trailing slashes are ignored on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| {
                if segment.starts_with('{') && segment.ends_with('}') {
                    Segment::Param
                } else {
                    Segment::Literal(segment.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split_path(path);
        for segment in &self.segments {
            match (segment, parts.next()) {
                (Segment::Param, Some(_)) => {}
                (Segment::Literal(expected), Some(actual)) if expected == actual => {}
                _ => return false,
            }
        }
        parts.next().is_none()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split_once('?').map_or(path, |(before, _)| before);
    path.split('/').filter(|segment| !segment.is_empty())
}

#[derive(Debug, Clone)]
struct RouteRule {
    method: Option<String>,
    pattern: RoutePattern,
    shape: ResponseShape,
}

/// Maps `(method, path)` to the response shape the endpoint uses
///
/// Rules are checked in insertion order; the first match wins. Unmatched
/// routes are [`ResponseShape::Enveloped`].
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl Default for RouteTable {
    /// The documented exception only: the current-user endpoint is raw.
    fn default() -> Self {
        Self::empty().with_rule(None, CURRENT_USER_ENDPOINT, ResponseShape::Raw)
    }
}

impl RouteTable {
    /// A table where every route is enveloped
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Course-shop backend routes that answer without an envelope
    pub fn course_shop() -> Self {
        Self::default()
            .with_rule(Some("GET"), "/topics", ResponseShape::Raw)
            .with_rule(Some("GET"), "/public/courses", ResponseShape::Raw)
            .with_rule(Some("GET"), "/admin/users", ResponseShape::Raw)
            .with_rule(Some("POST"), "/admin/topic", ResponseShape::Raw)
            .with_rule(Some("PATCH"), "/admin/topic/{id}", ResponseShape::Raw)
            .with_rule(Some("PATCH"), "/admin/topic/delete/{id}", ResponseShape::Raw)
            .with_rule(Some("POST"), "/auth/logout", ResponseShape::Raw)
    }

    /// Add a rule; `method` of `None` matches every method
    #[must_use]
    pub fn with_rule(mut self, method: Option<&str>, pattern: &str, shape: ResponseShape) -> Self {
        self.rules.push(RouteRule {
            method: method.map(str::to_ascii_uppercase),
            pattern: RoutePattern::parse(pattern),
            shape,
        });
        self
    }

    pub fn resolve(&self, method: &str, path: &str) -> ResponseShape {
        self.rules
            .iter()
            .find(|rule| {
                rule.method.as_deref().map_or(true, |m| m.eq_ignore_ascii_case(method))
                    && rule.pattern.matches(path)
            })
            .map_or(ResponseShape::Enveloped, |rule| rule.shape)
    }
}
