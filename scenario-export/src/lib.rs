mod chunker;
mod data;
mod encoding;
mod error;
mod export_configuration;
mod exporter;
mod frequency;
mod header_groups;
mod normalizer;
mod renderer;
mod util;

pub use chunker::{chunk, ElementPayload};
pub use data::{
    AnnotatedRequest, Headers, NormalizedRequest, PauseElement, RequestBody, RequestElement,
    ScenarioElement,
};
pub use encoding::TextEncoding;
pub use error::Error;
pub use export_configuration::{ExportConfiguration, DEFAULT_CHUNK_THRESHOLD};
pub use exporter::{ExportReport, PreparedScenario, ScenarioExporter};
pub use frequency::{compute_baseline, most_frequent, Baseline, BASE_HEADERS};
pub use header_groups::{
    deduplicate_headers, extra_headers, HeaderFilter, HeaderGroups, HeaderList,
};
pub use normalizer::normalize;
pub use renderer::{RenderInput, ScenarioRenderer, TeraRenderer};
