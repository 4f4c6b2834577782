use crate::util;
use std::{slice, time::Duration};

/// One step of a recorded scenario.
///
/// The type parameter carries the request payload, which changes as the scenario moves through the
/// export stages: raw [`RequestElement`]s are numbered into [`NormalizedRequest`]s and then annotated
/// into [`AnnotatedRequest`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioElement<R = RequestElement> {
    Request(R),
    Pause(PauseElement),
}

impl<R> ScenarioElement<R> {
    pub fn as_request(&self) -> Option<&R> {
        match self {
            ScenarioElement::Request(request) => Some(request),
            ScenarioElement::Pause(_) => None,
        }
    }

    pub fn map_request<S, F: FnOnce(R) -> S>(self, func: F) -> ScenarioElement<S> {
        match self {
            ScenarioElement::Request(request) => ScenarioElement::Request(func(request)),
            ScenarioElement::Pause(pause) => ScenarioElement::Pause(pause),
        }
    }
}

impl From<RequestElement> for ScenarioElement {
    fn from(request: RequestElement) -> Self {
        ScenarioElement::Request(request)
    }
}

impl<R> From<PauseElement> for ScenarioElement<R> {
    fn from(pause: PauseElement) -> Self {
        ScenarioElement::Pause(pause)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseElement {
    pub duration: Duration,
}

impl PauseElement {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Raw payload, dumped verbatim to a side file during export.
    Bytes(Vec<u8>),
    /// Url-encoded form parameters, rendered inline.
    FormParams(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestElement {
    pub method: String,
    pub url: String,
    pub base_url: String,
    pub headers: Headers,
    pub body: Option<RequestBody>,
    pub status_code: u16,
}

impl RequestElement {
    /// Builds a request for `url`, deriving its base URL (`scheme://authority`) from it.
    pub fn new<S1: Into<String>, S2: Into<String>>(method: S1, url: S2) -> Self {
        let url = url.into();
        let base_url = util::base_url_of(&url);

        Self {
            method: method.into().to_uppercase(),
            url,
            base_url,
            headers: Headers::new(),
            body: None,
            status_code: 200,
        }
    }

    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }
}

/// A request with its position among the requests of a scenario and a URL relative to the inferred
/// base URL when it targets that base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub id: usize,
    pub request: RequestElement,
}

/// A numbered request that knows which shared header set it renders with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRequest {
    pub id: usize,
    pub request: RequestElement,
    /// Id of the request holding the shared header set, `None` when there are no extra headers.
    pub filtered_headers_id: Option<usize>,
}

/// Ordered request headers. Names compare case-insensitively and a repeated name keeps its first
/// position with the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert<S1: Into<String>, S2: Into<String>>(&mut self, name: S1, value: S2) {
        let name = name.into();
        let value = value.into();

        match self
            .0
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some((_, existing_value)) => *existing_value = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> slice::Iter<'_, (String, String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a (String, String);
    type IntoIter = slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
