use crate::{
    chunker::{self, ElementPayload},
    data::{AnnotatedRequest, NormalizedRequest, RequestBody, ScenarioElement},
    error::Error,
    export_configuration::ExportConfiguration,
    frequency,
    header_groups::{self, HeaderFilter},
    normalizer,
    renderer::RenderInput,
};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, warn};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub simulation_path: PathBuf,
    pub dumped_bodies: Vec<PathBuf>,
    /// Requests whose body couldn't be written; the simulation still references them.
    pub failed_bodies: Vec<usize>,
}

/// The normalized form of a scenario, right before it gets rendered.
#[derive(Debug, Clone)]
pub struct PreparedScenario {
    pub baseline: frequency::Baseline,
    pub header_groups: header_groups::HeaderGroups,
    pub elements: ElementPayload<ScenarioElement<AnnotatedRequest>>,
}

#[derive(Debug)]
pub struct ScenarioExporter {
    configuration: ExportConfiguration,
}

impl ScenarioExporter {
    pub fn new(configuration: ExportConfiguration) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &ExportConfiguration {
        &self.configuration
    }

    pub fn export(&self, scenario: Vec<ScenarioElement>) -> Result<ExportReport, Error> {
        if scenario.is_empty() {
            return Err(Error::EmptyScenario);
        }

        info!(
            class_name = self.configuration.class_name(),
            elements = scenario.len(),
            "exporting scenario"
        );

        let baseline = frequency::compute_baseline(&scenario);
        let normalized = normalizer::normalize(scenario, baseline.base_url.as_deref());
        let (dumped_bodies, failed_bodies) = self.dump_request_bodies(&normalized);
        let prepared = self.prepare(normalized, baseline);

        let simulation_path = self.write_simulation(&prepared)?;

        info!(
            path = %simulation_path.display(),
            bodies = dumped_bodies.len(),
            "simulation exported"
        );

        Ok(ExportReport {
            simulation_path,
            dumped_bodies,
            failed_bodies,
        })
    }

    /// Runs every stage before rendering without touching the file system.
    pub fn prepare_scenario(
        &self,
        scenario: Vec<ScenarioElement>,
    ) -> Result<PreparedScenario, Error> {
        if scenario.is_empty() {
            return Err(Error::EmptyScenario);
        }

        let baseline = frequency::compute_baseline(&scenario);
        let normalized = normalizer::normalize(scenario, baseline.base_url.as_deref());

        Ok(self.prepare(normalized, baseline))
    }

    pub fn render(&self, prepared: &PreparedScenario) -> Result<String, Error> {
        let input = RenderInput {
            package: self.configuration.package(),
            class_name: self.configuration.class_name(),
            scenario_name: self.configuration.scenario_name(),
            automatic_referer: self.configuration.automatic_referer(),
            baseline: &prepared.baseline,
            header_groups: &prepared.header_groups,
            elements: &prepared.elements,
        };

        self.configuration
            .renderer()
            .render(&input)
            .map_err(Error::Render)
    }

    fn prepare(
        &self,
        normalized: Vec<ScenarioElement<NormalizedRequest>>,
        baseline: frequency::Baseline,
    ) -> PreparedScenario {
        match &baseline.base_url {
            Some(base_url) => debug!(base_url = base_url.as_str(), "inferred base url"),
            None => warn!("the scenario has no requests, no base url inferred"),
        }

        let filter = HeaderFilter::new(self.configuration.automatic_referer());
        let (annotated, header_groups) =
            header_groups::deduplicate_headers(normalized, &baseline, &filter);
        debug!(groups = header_groups.len(), "deduplicated request headers");

        let elements = chunker::chunk(annotated, self.configuration.chunk_threshold());
        if elements.is_grouped() {
            debug!(
                threshold = self.configuration.chunk_threshold().get(),
                "scenario split into chains"
            );
        }

        PreparedScenario {
            baseline,
            header_groups,
            elements,
        }
    }

    fn dump_request_bodies(
        &self,
        elements: &[ScenarioElement<NormalizedRequest>],
    ) -> (Vec<PathBuf>, Vec<usize>) {
        let mut dumped = Vec::new();
        let mut failed = Vec::new();

        for request in elements.iter().filter_map(ScenarioElement::as_request) {
            if let Some(RequestBody::Bytes(content)) = &request.request.body {
                match self.dump_request_body(request.id, content) {
                    Ok(path) => dumped.push(path),
                    Err(e) => {
                        error!(request_id = request.id, "{}", e);
                        failed.push(request.id);
                    }
                }
            }
        }

        (dumped, failed)
    }

    fn dump_request_body(&self, request_id: usize, content: &[u8]) -> Result<PathBuf, Error> {
        let path = self.configuration.request_body_file_path(request_id);

        let write = |path: &Path| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)
        };

        write(&path).map_err(|source| Error::BodyDump {
            request_id,
            path: path.clone(),
            source,
        })?;

        debug!(request_id, path = %path.display(), "dumped request body");
        Ok(path)
    }

    fn write_simulation(&self, prepared: &PreparedScenario) -> Result<PathBuf, Error> {
        let content = self.render(prepared)?;
        let bytes = self.configuration.encoding().encode(&content)?;
        let path = self.configuration.simulation_file_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = File::create(&path).map_err(|source| Error::OutputWrite {
            path: path.clone(),
            source,
        })?;
        file.write_all(&bytes).map_err(|source| Error::OutputWrite {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
