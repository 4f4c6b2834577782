//! JSON recordings produced by the proxy recorder.
//!
//! ```json
//! {
//!   "elements": [
//!     { "type": "request", "method": "GET", "url": "http://x.test/",
//!       "headers": [{ "name": "Accept", "value": "*/*" }] },
//!     { "type": "pause", "millis": 1200 },
//!     { "type": "request", "method": "POST", "url": "http://x.test/login",
//!       "body": { "form": [{ "name": "user", "value": "me" }] }, "status": 302 }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use scenario_export::{PauseElement, RequestBody, RequestElement, ScenarioElement};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
pub struct Recording {
    pub elements: Vec<RecordedElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordedElement {
    Request {
        method: String,
        url: String,
        #[serde(default)]
        headers: Vec<NameValue>,
        #[serde(default)]
        body: Option<RecordedBody>,
        #[serde(default = "default_status")]
        status: u16,
    },
    Pause {
        millis: u64,
    },
}

#[derive(Debug, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedBody {
    Text(String),
    Form(Vec<NameValue>),
}

fn default_status() -> u16 {
    200
}

impl From<RecordedElement> for ScenarioElement {
    fn from(element: RecordedElement) -> Self {
        match element {
            RecordedElement::Request {
                method,
                url,
                headers,
                body,
                status,
            } => {
                let mut request = RequestElement::new(method, url).with_status_code(status);
                for header in headers {
                    request.headers.insert(header.name, header.value);
                }
                request.body = body.map(|body| match body {
                    RecordedBody::Text(text) => RequestBody::Bytes(text.into_bytes()),
                    RecordedBody::Form(params) => RequestBody::FormParams(
                        params.into_iter().map(|p| (p.name, p.value)).collect(),
                    ),
                });
                ScenarioElement::Request(request)
            }
            RecordedElement::Pause { millis } => PauseElement::from_millis(millis).into(),
        }
    }
}

pub fn parse_recording(content: &str) -> Result<Vec<ScenarioElement>> {
    let recording: Recording = serde_json::from_str(content)?;
    Ok(recording.elements.into_iter().map(Into::into).collect())
}

pub fn load_recording<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioElement>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recording {}", path.display()))?;

    parse_recording(&content).with_context(|| format!("Invalid recording {}", path.display()))
}
