use anyhow::{Context, Result};
use scenario_export::{ExportConfiguration, TextEncoding};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

/// Export settings read from a TOML file. Every key is optional.
///
/// ```toml
/// output-folder = "src/test/scala"
/// request-bodies-folder = "src/test/resources/bodies"
/// package = "computerdatabase"
/// class-name = "RecordedSimulation"
/// encoding = "utf-8"
/// automatic-referer = true
/// chunk-threshold = 100
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub output_folder: Option<PathBuf>,
    pub request_bodies_folder: Option<PathBuf>,
    pub package: Option<String>,
    pub class_name: Option<String>,
    pub scenario_name: Option<String>,
    pub encoding: Option<String>,
    pub automatic_referer: Option<bool>,
    pub chunk_threshold: Option<usize>,
    pub file_extension: Option<String>,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Invalid settings {}", path.display()))
    }

    pub fn into_configuration(self, default_class_name: &str) -> Result<ExportConfiguration> {
        let mut configuration =
            ExportConfiguration::new(self.class_name.as_deref().unwrap_or(default_class_name));

        if let Some(output_folder) = self.output_folder {
            configuration.set_output_folder(output_folder);
        }
        if let Some(request_bodies_folder) = self.request_bodies_folder {
            configuration.set_request_bodies_folder(request_bodies_folder);
        }
        if let Some(package) = self.package {
            configuration.set_package(package);
        }
        if let Some(scenario_name) = self.scenario_name {
            configuration.set_scenario_name(scenario_name);
        }
        if let Some(encoding) = self.encoding {
            configuration.set_encoding(encoding.parse::<TextEncoding>()?);
        }
        if let Some(automatic_referer) = self.automatic_referer {
            configuration.set_automatic_referer(automatic_referer);
        }
        if let Some(chunk_threshold) = self.chunk_threshold {
            configuration.set_chunk_threshold(chunk_threshold)?;
        }
        if let Some(file_extension) = self.file_extension {
            configuration.set_file_extension(file_extension);
        }

        Ok(configuration)
    }
}
