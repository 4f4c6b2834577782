use crate::{
    encoding::TextEncoding,
    error::Error,
    renderer::{ScenarioRenderer, TeraRenderer},
};
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Number of elements past which a scenario is rendered as several chains.
pub const DEFAULT_CHUNK_THRESHOLD: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(threshold) => threshold,
    None => unreachable!(),
};

#[derive(Debug, Clone)]
pub struct ExportConfiguration {
    output_folder: PathBuf,
    request_bodies_folder: PathBuf,
    package: String,
    class_name: String,
    scenario_name: Option<String>,
    encoding: TextEncoding,
    automatic_referer: bool,
    chunk_threshold: NonZeroUsize,
    file_extension: String,
    renderer: Arc<dyn ScenarioRenderer + Send + Sync>,
}

impl ExportConfiguration {
    pub fn new<S: Into<String>>(class_name: S) -> Self {
        Self {
            output_folder: PathBuf::from("."),
            request_bodies_folder: PathBuf::from("bodies"),
            package: String::new(),
            class_name: class_name.into(),
            scenario_name: None,
            encoding: TextEncoding::default(),
            automatic_referer: true,
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
            file_extension: String::from("scala"),
            renderer: Arc::new(TeraRenderer::new()),
        }
    }

    pub fn set_output_folder<P: Into<PathBuf>>(&mut self, output_folder: P) {
        self.output_folder = output_folder.into();
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    pub fn set_request_bodies_folder<P: Into<PathBuf>>(&mut self, request_bodies_folder: P) {
        self.request_bodies_folder = request_bodies_folder.into();
    }

    pub fn request_bodies_folder(&self) -> &Path {
        &self.request_bodies_folder
    }

    pub fn set_package<S: Into<String>>(&mut self, package: S) {
        self.package = package.into();
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn set_class_name<S: Into<String>>(&mut self, class_name: S) {
        self.class_name = class_name.into();
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn set_scenario_name<S: Into<String>>(&mut self, scenario_name: S) {
        self.scenario_name = Some(scenario_name.into());
    }

    /// Display name of the scenario, the class name unless set explicitly.
    pub fn scenario_name(&self) -> &str {
        self.scenario_name.as_deref().unwrap_or(&self.class_name)
    }

    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// When enabled the `Referer` header is left to the load testing tool and never recorded.
    pub fn set_automatic_referer(&mut self, value: bool) {
        self.automatic_referer = value;
    }

    pub fn automatic_referer(&self) -> bool {
        self.automatic_referer
    }

    pub fn set_chunk_threshold(&mut self, threshold: usize) -> Result<(), Error> {
        self.chunk_threshold = NonZeroUsize::new(threshold).ok_or(Error::InvalidChunkThreshold)?;
        Ok(())
    }

    pub fn chunk_threshold(&self) -> NonZeroUsize {
        self.chunk_threshold
    }

    pub fn set_file_extension<S: Into<String>>(&mut self, file_extension: S) {
        self.file_extension = file_extension.into();
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn set_renderer(&mut self, renderer: Arc<dyn ScenarioRenderer + Send + Sync>) {
        self.renderer = renderer;
    }

    pub fn renderer(&self) -> Arc<dyn ScenarioRenderer + Send + Sync> {
        self.renderer.clone()
    }

    /// `<output folder>/<package as directories>/<class name>.<extension>`
    pub fn simulation_file_path(&self) -> PathBuf {
        let mut path = self.output_folder.clone();
        path.extend(self.package.split('.').filter(|segment| !segment.is_empty()));
        path.push(format!("{}.{}", self.class_name, self.file_extension));
        path
    }

    pub fn request_body_file_path(&self, request_id: usize) -> PathBuf {
        self.request_bodies_folder
            .join(crate::renderer::body_file_name(&self.class_name, request_id))
    }
}
