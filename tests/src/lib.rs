#[cfg(test)]
mod tests {
    use scenario_export::{
        extra_headers, AnnotatedRequest, ElementPayload, ExportConfiguration, HeaderFilter,
        PauseElement, RequestBody, RequestElement, ScenarioElement, ScenarioExporter, TextEncoding,
    };
    use std::{collections::HashMap, fs, path::Path};

    fn configure(root: &Path) -> ExportConfiguration {
        let mut configuration = ExportConfiguration::new("RecordedSimulation");
        configuration.set_output_folder(root.join("simulations"));
        configuration.set_request_bodies_folder(root.join("bodies"));
        configuration.set_package("computerdatabase");
        configuration
    }

    fn request(path: &str) -> RequestElement {
        RequestElement::new("GET", format!("http://x.test{}", path))
    }

    fn request_ids(payload: &ElementPayload<ScenarioElement<AnnotatedRequest>>) -> Vec<usize> {
        payload
            .iter()
            .filter_map(|element| element.as_request().map(|r| r.id))
            .collect()
    }

    #[test]
    fn shared_headers_end_to_end() {
        let directory = tempfile::tempdir().unwrap();
        let exporter = ScenarioExporter::new(configure(directory.path()));
        let scenario = || -> Vec<ScenarioElement> {
            vec![
                request("/1").with_header("Auth", "t1").into(),
                request("/2").with_header("Auth", "t1").into(),
                request("/3").with_header("Auth", "t2").into(),
            ]
        };

        let prepared = exporter.prepare_scenario(scenario()).unwrap();

        assert_eq!(prepared.baseline.base_url.as_deref(), Some("http://x.test"));
        assert_eq!(prepared.header_groups.len(), 2);
        assert_eq!(
            prepared.header_groups.get(0),
            Some(&vec![(String::from("Auth"), String::from("t1"))])
        );
        assert_eq!(
            prepared.header_groups.get(2),
            Some(&vec![(String::from("Auth"), String::from("t2"))])
        );
        assert!(!prepared.elements.is_grouped());
        assert_eq!(request_ids(&prepared.elements), vec![0, 1, 2]);
        assert_eq!(
            prepared
                .elements
                .iter()
                .filter_map(|element| element.as_request())
                .map(|r| (r.request.url.as_str(), r.filtered_headers_id))
                .collect::<Vec<_>>(),
            vec![("/1", Some(0)), ("/2", Some(0)), ("/3", Some(2))]
        );

        let report = exporter.export(scenario()).unwrap();
        let simulation = fs::read_to_string(&report.simulation_path).unwrap();

        assert_eq!(
            report.simulation_path,
            directory
                .path()
                .join("simulations/computerdatabase/RecordedSimulation.scala")
        );
        assert!(simulation.contains("val headers_0 = Map(\n        \"Auth\" -> \"t1\")"));
        assert!(simulation.contains("val headers_2 = Map(\n        \"Auth\" -> \"t2\")"));
        assert!(!simulation.contains("val headers_1"));
        assert!(!simulation.contains("chain_0"));

        let positions: Vec<_> = ["request_0", "request_1", "request_2"]
            .iter()
            .map(|name| simulation.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn empty_scenario_writes_nothing() {
        let directory = tempfile::tempdir().unwrap();

        let result = ScenarioExporter::new(configure(directory.path())).export(Vec::new());

        assert!(matches!(result, Err(scenario_export::Error::EmptyScenario)));
        assert!(!directory.path().join("simulations").exists());
        assert!(!directory.path().join("bodies").exists());
    }

    #[test]
    fn byte_bodies_are_dumped_verbatim() {
        let directory = tempfile::tempdir().unwrap();
        let payload = vec![0x7b, 0x00, 0xff, 0x7d];

        let report = ScenarioExporter::new(configure(directory.path()))
            .export(vec![
                request("/").into(),
                PauseElement::from_millis(300).into(),
                RequestElement::new("POST", "http://x.test/api")
                    .with_body(RequestBody::Bytes(payload.clone()))
                    .into(),
                RequestElement::new("POST", "http://x.test/login")
                    .with_body(RequestBody::FormParams(vec![("user".into(), "me".into())]))
                    .into(),
            ])
            .unwrap();

        let body_path = directory
            .path()
            .join("bodies/RecordedSimulation_request_1.txt");
        assert_eq!(report.dumped_bodies, vec![body_path.clone()]);
        assert!(report.failed_bodies.is_empty());
        assert_eq!(fs::read(&body_path).unwrap(), payload);
        assert_eq!(fs::read_dir(directory.path().join("bodies")).unwrap().count(), 1);

        let simulation = fs::read_to_string(&report.simulation_path).unwrap();
        assert!(simulation.contains("RawFileBody(\"RecordedSimulation_request_1.txt\")"));
        assert!(simulation.contains(".formParam(\"user\", \"me\")"));
    }

    #[test]
    fn long_scenarios_are_grouped_in_order() {
        let directory = tempfile::tempdir().unwrap();
        let exporter = ScenarioExporter::new(configure(directory.path()));
        let scenario = || -> Vec<ScenarioElement> {
            (0..250)
                .map(|i| request(&format!("/item/{}", i)).into())
                .collect()
        };

        let prepared = exporter.prepare_scenario(scenario()).unwrap();

        match &prepared.elements {
            ElementPayload::Grouped(groups) => {
                assert_eq!(
                    groups.iter().map(Vec::len).collect::<Vec<_>>(),
                    vec![100, 100, 50]
                );
            }
            ElementPayload::Flat(_) => panic!("250 elements should be grouped"),
        }
        assert_eq!(request_ids(&prepared.elements), (0..250).collect::<Vec<_>>());

        let report = exporter.export(scenario()).unwrap();
        let simulation = fs::read_to_string(report.simulation_path).unwrap();
        assert!(simulation.contains(".exec(chain_0, chain_1, chain_2)"));
        assert!(simulation.contains("val chain_2 = exec(http(\"request_200\")"));
    }

    #[test]
    fn threshold_is_inclusive() {
        let directory = tempfile::tempdir().unwrap();
        let mut configuration = configure(directory.path());
        configuration.set_chunk_threshold(3).unwrap();
        let exporter = ScenarioExporter::new(configuration);

        let flat = exporter
            .prepare_scenario(vec![
                request("/a").into(),
                request("/b").into(),
                request("/c").into(),
            ])
            .unwrap();
        assert!(!flat.elements.is_grouped());
        assert_eq!(request_ids(&flat.elements), vec![0, 1, 2]);

        let grouped = exporter
            .prepare_scenario(vec![
                request("/a").into(),
                PauseElement::from_millis(5).into(),
                request("/b").into(),
                request("/c").into(),
            ])
            .unwrap();
        assert!(grouped.elements.is_grouped());
        assert_eq!(grouped.elements.len(), 4);
    }

    #[test]
    fn identical_extra_headers_resolve_to_their_first_holder() {
        let directory = tempfile::tempdir().unwrap();
        let exporter = ScenarioExporter::new(configure(directory.path()));
        let tokens = ["a", "b", "a", "c", "b", "a", "", "c"];

        let scenario: Vec<ScenarioElement> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let mut element = request(&format!("/{}", i))
                    .with_header("User-Agent", "bench")
                    .with_header("Cookie", format!("session={}", i));
                if !token.is_empty() {
                    element = element.with_header("X-Token", *token);
                }
                element.into()
            })
            .collect();

        let prepared = exporter.prepare_scenario(scenario).unwrap();
        let filter = HeaderFilter::new(true);

        let mut first_holder: HashMap<Vec<(String, String)>, usize> = HashMap::new();
        for annotated in prepared.elements.iter().filter_map(|e| e.as_request()) {
            let extra = extra_headers(&annotated.request, &prepared.baseline, &filter);
            if extra.is_empty() {
                assert_eq!(annotated.filtered_headers_id, None);
                continue;
            }

            let holder = *first_holder.entry(extra.clone()).or_insert(annotated.id);
            assert_eq!(annotated.filtered_headers_id, Some(holder));
            assert_eq!(prepared.header_groups.get(holder), Some(&extra));
        }

        assert_eq!(first_holder.len(), 3);
        assert_eq!(prepared.header_groups.len(), first_holder.len());
        assert_eq!(
            prepared.header_groups.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![0, 1, 3]
        );
    }

    #[test]
    fn other_hosts_keep_absolute_urls() {
        let directory = tempfile::tempdir().unwrap();

        let report = ScenarioExporter::new(configure(directory.path()))
            .export(vec![
                request("/a").into(),
                RequestElement::new("GET", "https://cdn.test/lib.js").into(),
                request("/b").into(),
            ])
            .unwrap();

        let simulation = fs::read_to_string(report.simulation_path).unwrap();
        assert!(simulation.contains(".baseUrl(\"http://x.test\")"));
        assert!(simulation.contains(".get(\"/a\")"));
        assert!(simulation.contains(".get(\"https://cdn.test/lib.js\")"));
    }

    #[test]
    fn simulation_is_written_with_the_configured_encoding() {
        let directory = tempfile::tempdir().unwrap();
        let mut configuration = configure(directory.path());
        configuration.set_encoding(TextEncoding::Utf16Le);
        configuration.set_scenario_name("Café");

        let report = ScenarioExporter::new(configuration)
            .export(vec![request("/").into()])
            .unwrap();

        let bytes = fs::read(report.simulation_path).unwrap();
        let units: Vec<u16> = bytes
            .chunks(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let simulation = String::from_utf16(&units).unwrap();

        assert!(simulation.contains("scenario(\"Café\")"));
    }

    #[test]
    fn unmappable_characters_fail_the_export() {
        let directory = tempfile::tempdir().unwrap();
        let mut configuration = configure(directory.path());
        configuration.set_encoding(TextEncoding::Latin1);
        configuration.set_scenario_name("Euro €");

        let result =
            ScenarioExporter::new(configuration.clone()).export(vec![request("/").into()]);

        assert!(matches!(
            result,
            Err(scenario_export::Error::UnmappableCharacter { character: '€', .. })
        ));
        assert!(!configuration.simulation_file_path().exists());
    }

    #[test]
    fn existing_simulation_is_overwritten() {
        let directory = tempfile::tempdir().unwrap();
        let configuration = configure(directory.path());
        let path = configuration.simulation_file_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale content that is longer than nothing").unwrap();

        ScenarioExporter::new(configuration)
            .export(vec![request("/").into()])
            .unwrap();

        let simulation = fs::read_to_string(&path).unwrap();
        assert!(simulation.starts_with("package computerdatabase"));
        assert!(!simulation.contains("stale content"));
    }
}
