use cinema_export::core::Pipeline;
use cinema_export::{
    DisabledExtractionService, ExportConfig, ExportEngine, ExportError, ExportPipeline,
    ExtractionFailure, GeminiClient, LocalStorage,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn config_for(files: Vec<String>, output_path: &str) -> ExportConfig {
    let mut config = ExportConfig::new(files);
    config.output_path = output_path.to_string();
    config
}

#[tokio::test]
async fn test_end_to_end_structural_export() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().to_str().unwrap().to_string();

    let first = write_input(
        &input_dir,
        "cinema_data.json",
        r#"[
            {"title": "Matrix (1999)", "rating": "9.5", "favorite": true, "comment": "great"},
            {"title": "Inception", "rating": "7"}
        ]"#,
    );
    let second = write_input(
        &input_dir,
        "export.json",
        r#"{"movies": [{"titulo": "  inception  ", "ano": 2010, "nota": "10"}, {"name": "He said \"Go\""}]}"#,
    );

    let config = config_for(vec![first, second], &output_path);
    let pipeline = ExportPipeline::new(
        LocalStorage::new("."),
        LocalStorage::new(output_path.clone()),
        config,
        DisabledExtractionService,
    );

    let written = ExportEngine::new(pipeline).run().await.unwrap();

    assert!(written.ends_with("cinema_export.csv"));
    let csv = std::fs::read_to_string(output_dir.path().join("cinema_export.csv")).unwrap();
    assert_eq!(
        csv,
        "Title,Year,Rating10,WatchedDate\n\
         \"Matrix\",,9.5,\n\
         \"inception\",2010,10,\n\
         \"He said \"\"Go\"\"\",,,"
    );
}

#[tokio::test]
async fn test_end_to_end_ai_fallback_for_unstructured_file() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let ai_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/test-model:generateContent")
            .header("x-goog-api-key", "test-key")
            .body_contains("Seven Samurai");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "text": "{\"movies\": [{\"title\": \"Seven Samurai\", \"year\": \"1954\", \"rating\": \"10\", \"listType\": \"watched\"}]}"
                        }]
                    }
                }]
            }));
    });

    let notes = write_input(
        &input_dir,
        "notes.json",
        "My list: Seven Samurai (1954), loved it, 10/10",
    );
    let structured = write_input(&input_dir, "list.json", r#"[{"title": "Ikiru"}]"#);

    let mut config = config_for(vec![notes, structured], &output_path);
    config.ai_endpoint = server.base_url();
    config.ai_model = "test-model".to_string();
    config.api_key = Some("test-key".to_string());

    let client = GeminiClient::from_config(&config).expect("api key is configured");
    let pipeline = ExportPipeline::new(
        LocalStorage::new("."),
        LocalStorage::new(output_path.clone()),
        config,
        client,
    );

    let records = pipeline.extract().await.unwrap();

    ai_mock.assert_hits(1);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Seven Samurai");
    assert_eq!(records[0].year.as_deref(), Some("1954"));
    assert_eq!(records[1].title, "Ikiru");
}

#[tokio::test]
async fn test_ai_service_failure_degrades_to_empty_batch() {
    let input_dir = TempDir::new().unwrap();

    let server = MockServer::start();
    let ai_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(500).body("internal error");
    });

    let file = write_input(&input_dir, "broken.json", "{ not json");
    let mut config = config_for(vec![file], "unused");
    config.ai_endpoint = server.base_url();
    config.api_key = Some("test-key".to_string());

    let client = GeminiClient::from_config(&config).unwrap();
    let pipeline = ExportPipeline::new(
        LocalStorage::new("."),
        LocalStorage::new("unused"),
        config,
        client,
    );

    let result = pipeline.extract().await;

    ai_mock.assert_hits(1);
    assert!(matches!(
        result,
        Err(ExportError::ExtractionError(ExtractionFailure::Empty))
    ));
}

#[tokio::test]
async fn test_unreadable_input_is_processing_error() {
    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().to_str().unwrap().to_string();
    let missing = output_dir
        .path()
        .join("missing.json")
        .to_str()
        .unwrap()
        .to_string();

    let pipeline = ExportPipeline::new(
        LocalStorage::new("."),
        LocalStorage::new(output_path),
        config_for(vec![missing], "unused"),
        DisabledExtractionService,
    );

    let result = ExportEngine::new(pipeline).run().await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        ExportError::ExtractionError(ExtractionFailure::ProcessingError { .. })
    ));
    assert_eq!(err.user_friendly_message(), "Failed to process the JSON files.");
    assert!(!output_dir.path().join("cinema_export.csv").exists());
}

#[tokio::test]
async fn test_dropped_rows_are_not_exported() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().to_str().unwrap().to_string();

    let file = write_input(
        &input_dir,
        "list.json",
        r#"[{"title": "Alien"}, {"title": "Aliens"}, {"title": "Alien 3"}]"#,
    );
    let mut config = config_for(vec![file], &output_path);
    config.dropped_rows = vec![2, 0];

    let pipeline = ExportPipeline::new(
        LocalStorage::new("."),
        LocalStorage::new(output_path.clone()),
        config,
        DisabledExtractionService,
    );

    ExportEngine::new(pipeline).run().await.unwrap();

    let csv = std::fs::read_to_string(output_dir.path().join("cinema_export.csv")).unwrap();
    assert_eq!(csv, "Title,Year,Rating10,WatchedDate\n\"Aliens\",,,");
}
