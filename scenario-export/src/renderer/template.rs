use super::{RenderInput, ScenarioRenderer};
use crate::{
    chunker::ElementPayload,
    data::{AnnotatedRequest, PauseElement, RequestBody, ScenarioElement},
    util::escape_string_literal,
};
use lazy_static::lazy_static;
use serde::Serialize;
use std::time::Duration;
use tera::{Context, Tera};

const SIMULATION_TEMPLATE: &str = "simulation.scala.tera";

lazy_static! {
    static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("macros.tera", include_str!("templates/macros.tera")),
            (
                SIMULATION_TEMPLATE,
                include_str!("templates/simulation.scala.tera"),
            ),
        ])
        .unwrap();
        tera
    };
}

/// Renders a Gatling simulation written in Scala with the bundled Tera templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraRenderer;

impl TeraRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ScenarioRenderer for TeraRenderer {
    fn render(
        &self,
        input: &RenderInput<'_>,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let context = Context::from_serialize(SimulationView::new(input))?;

        Ok(TEMPLATES.render(SIMULATION_TEMPLATE, &context)?)
    }
}

#[derive(Debug, Serialize)]
struct SimulationView<'a> {
    package: &'a str,
    class_name: &'a str,
    scenario_name: String,
    base_url: Option<String>,
    protocol_headers: Vec<ProtocolHeaderView>,
    disable_auto_referer: bool,
    header_groups: Vec<HeaderGroupView>,
    grouped: bool,
    chains: Vec<Vec<ElementView>>,
}

#[derive(Debug, Serialize)]
struct ProtocolHeaderView {
    call: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct HeaderGroupView {
    id: usize,
    headers: Vec<NameValueView>,
}

#[derive(Debug, Serialize)]
struct NameValueView {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ElementView {
    Request {
        id: usize,
        call: String,
        has_headers: bool,
        headers_id: usize,
        raw_body_file: Option<String>,
        form_params: Vec<NameValueView>,
        checked_status: Option<u16>,
    },
    Pause {
        duration: String,
    },
}

impl<'a> SimulationView<'a> {
    fn new(input: &RenderInput<'a>) -> Self {
        let protocol_headers = input
            .baseline
            .headers
            .iter()
            .filter_map(|(name, value)| {
                protocol_call(name).map(|call| ProtocolHeaderView {
                    call,
                    value: escape_string_literal(value),
                })
            })
            .collect();

        let header_groups = input
            .header_groups
            .iter()
            .map(|(&id, headers)| HeaderGroupView {
                id,
                headers: name_values(headers),
            })
            .collect();

        let to_views = |elements: &[ScenarioElement<AnnotatedRequest>]| {
            elements
                .iter()
                .map(|element| ElementView::new(element, input))
                .collect::<Vec<_>>()
        };

        let chains = match input.elements {
            ElementPayload::Flat(elements) => vec![to_views(elements)],
            ElementPayload::Grouped(groups) => groups.iter().map(|group| to_views(group)).collect(),
        };

        Self {
            package: input.package,
            class_name: input.class_name,
            scenario_name: escape_string_literal(input.scenario_name),
            base_url: input.baseline.base_url.as_deref().map(escape_string_literal),
            protocol_headers,
            disable_auto_referer: !input.automatic_referer,
            header_groups,
            grouped: input.elements.is_grouped(),
            chains,
        }
    }
}

impl ElementView {
    fn new(element: &ScenarioElement<AnnotatedRequest>, input: &RenderInput<'_>) -> Self {
        match element {
            ScenarioElement::Request(annotated) => {
                let request = &annotated.request;
                let (raw_body_file, form_params) = match &request.body {
                    Some(RequestBody::Bytes(_)) => {
                        (Some(input.body_file_name(annotated.id)), Vec::new())
                    }
                    Some(RequestBody::FormParams(params)) => (None, name_values(params)),
                    None => (None, Vec::new()),
                };

                ElementView::Request {
                    id: annotated.id,
                    call: method_call(&request.method, &request.url),
                    has_headers: annotated.filtered_headers_id.is_some(),
                    headers_id: annotated.filtered_headers_id.unwrap_or_default(),
                    raw_body_file,
                    form_params,
                    checked_status: checked_status(request.status_code),
                }
            }
            ScenarioElement::Pause(PauseElement { duration }) => ElementView::Pause {
                duration: pause_duration(*duration),
            },
        }
    }
}

fn name_values(pairs: &[(String, String)]) -> Vec<NameValueView> {
    pairs
        .iter()
        .map(|(name, value)| NameValueView {
            name: escape_string_literal(name),
            value: escape_string_literal(value),
        })
        .collect()
}

fn protocol_call(header_name: &str) -> Option<&'static str> {
    match header_name {
        "Accept" => Some("acceptHeader"),
        "Accept-Charset" => Some("acceptCharsetHeader"),
        "Accept-Encoding" => Some("acceptEncodingHeader"),
        "Accept-Language" => Some("acceptLanguageHeader"),
        "Authorization" => Some("authorizationHeader"),
        "Connection" => Some("connectionHeader"),
        "Content-Type" => Some("contentTypeHeader"),
        "DNT" => Some("doNotTrackHeader"),
        "Upgrade-Insecure-Requests" => Some("upgradeInsecureRequestsHeader"),
        "User-Agent" => Some("userAgentHeader"),
        _ => None,
    }
}

fn method_call(method: &str, url: &str) -> String {
    let url = escape_string_literal(url);

    match method {
        "GET" | "POST" | "PUT" | "DELETE" | "PATCH" | "HEAD" | "OPTIONS" => {
            format!("{}(\"{}\")", method.to_lowercase(), url)
        }
        _ => format!(
            "httpRequest(\"{}\", \"{}\")",
            escape_string_literal(method),
            url
        ),
    }
}

fn checked_status(status_code: u16) -> Option<u16> {
    match status_code {
        200..=299 | 304 => None,
        status_code => Some(status_code),
    }
}

/// Whole seconds when the pause is exactly that, milliseconds otherwise so nothing is truncated.
fn pause_duration(duration: Duration) -> String {
    if duration > Duration::from_secs(1) && duration.subsec_millis() == 0 {
        duration.as_secs().to_string()
    } else {
        format!("{} milliseconds", duration.as_millis())
    }
}
