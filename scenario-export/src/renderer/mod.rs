mod template;

use crate::{
    chunker::ElementPayload,
    data::{AnnotatedRequest, ScenarioElement},
    frequency::Baseline,
    header_groups::HeaderGroups,
};
use std::fmt::Debug;

pub use template::TeraRenderer;

/// Everything a renderer needs to produce a simulation.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub package: &'a str,
    pub class_name: &'a str,
    pub scenario_name: &'a str,
    pub automatic_referer: bool,
    pub baseline: &'a Baseline,
    pub header_groups: &'a HeaderGroups,
    pub elements: &'a ElementPayload<ScenarioElement<AnnotatedRequest>>,
}

impl RenderInput<'_> {
    /// File name a dumped request body is stored under.
    pub fn body_file_name(&self, request_id: usize) -> String {
        body_file_name(self.class_name, request_id)
    }
}

pub(crate) fn body_file_name(class_name: &str, request_id: usize) -> String {
    format!("{}_request_{}.txt", class_name, request_id)
}

pub trait ScenarioRenderer: Debug {
    fn render(
        &self,
        input: &RenderInput<'_>,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
