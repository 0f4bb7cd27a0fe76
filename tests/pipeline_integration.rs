//! End-to-end tests: fetch both tables from a stub server, merge them and
//! write the CSV files into a temporary directory

mod common;

use behavioural_finance_datasets::analysis::summarize;
use behavioural_finance_datasets::error::{Error, FetchError};
use behavioural_finance_datasets::storage::{ASSETS_FILE, MERGED_FILE, PERSONALITY_FILE};
use behavioural_finance_datasets::table::{InferenceOptions, Value};
use behavioural_finance_datasets::{
    DatasetDirectory, Merger, Pipeline, RemoteCsvExtractor, RestTableExtractor, read_table,
};
use common::{ASSETS_JSON, PERSONALITY_CSV, Route, StubServer, client};
use std::time::Duration;
use tempfile::TempDir;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn stub() -> StubServer {
    StubServer::start(vec![
        ("/personality.csv", Route::csv(PERSONALITY_CSV)),
        ("/rest/v1/assets", Route::json(ASSETS_JSON)),
    ])
    .await
}

#[tokio::test]
async fn test_download_and_merge() {
    let server = stub().await;
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("datasets");
    let http = client(TIMEOUT);

    let pipeline = Pipeline::new(
        RemoteCsvExtractor::new(http.clone(), server.url("/personality.csv")),
        RestTableExtractor::new(http, server.url("/rest/v1/assets"), "test-key"),
        Merger::default(),
        DatasetDirectory::new(&output),
    );
    let report = pipeline.run().await.unwrap();

    assert_eq!(report.get(PERSONALITY_FILE).unwrap().rows, 3);
    assert_eq!(report.get(ASSETS_FILE).unwrap().rows, 5);
    // ids 1 and 2 match twice each, 3 is personality only, 4 is assets only
    assert_eq!(report.get(MERGED_FILE).unwrap().rows, 6);
    assert_eq!(report.get(MERGED_FILE).unwrap().columns, 9);

    let options = InferenceOptions::default();
    let merged = read_table(output.join(MERGED_FILE), &options).unwrap();
    assert_eq!(
        merged.columns(),
        [
            "_id",
            "confidence",
            "risk_tolerance",
            "composure",
            "asset_allocation_id",
            "asset_value",
            "asset_currency",
            "asset_allocation",
            "created",
        ]
    );

    let ids: Vec<String> = merged
        .column("_id")
        .unwrap()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(ids, ["1", "1", "2", "2", "3", "4"]);

    // personality-only row has null asset cells
    assert_eq!(merged.get(4, "asset_value"), Some(&Value::Null));
    // assets-only row has null personality cells
    assert_eq!(merged.get(5, "confidence"), Some(&Value::Null));
    assert_eq!(merged.get(5, "asset_currency"), Some(&Value::from("EUR")));
}

#[tokio::test]
async fn test_written_tables_round_trip() {
    let server = stub().await;
    let temp = TempDir::new().unwrap();
    let http = client(TIMEOUT);
    let options = InferenceOptions::default();

    let pipeline = Pipeline::new(
        RemoteCsvExtractor::new(http.clone(), server.url("/personality.csv")),
        RestTableExtractor::new(http.clone(), server.url("/rest/v1/assets"), "test-key"),
        Merger::default(),
        DatasetDirectory::new(temp.path()),
    );
    pipeline.run().await.unwrap();

    let fetched = http
        .fetch_csv(&server.url("/personality.csv"), &options)
        .await
        .unwrap();
    let written = read_table(temp.path().join(PERSONALITY_FILE), &options).unwrap();
    assert_eq!(written.columns(), fetched.columns());
    assert_eq!(written.num_rows(), fetched.num_rows());
    assert_eq!(written, fetched);

    let fetched = http
        .fetch_json_api(&server.url("/rest/v1/assets"), "test-key", &options)
        .await
        .unwrap();
    let written = read_table(temp.path().join(ASSETS_FILE), &options).unwrap();
    assert_eq!(written.columns(), fetched.columns());
    assert_eq!(written.num_rows(), fetched.num_rows());

    let pinned = options.clone().with_text_columns_of(&fetched);
    let written = read_table(temp.path().join(ASSETS_FILE), &pinned).unwrap();
    assert_eq!(written, fetched);
}

#[tokio::test]
async fn test_failed_assets_fetch_writes_nothing() {
    let server = StubServer::start(vec![
        ("/personality.csv", Route::csv(PERSONALITY_CSV)),
        ("/rest/v1/assets", Route::status(401, r#"{"message":"Invalid API key"}"#)),
    ])
    .await;
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("datasets");
    let http = client(TIMEOUT);

    let pipeline = Pipeline::new(
        RemoteCsvExtractor::new(http.clone(), server.url("/personality.csv")),
        RestTableExtractor::new(http, server.url("/rest/v1/assets"), "wrong-key"),
        Merger::default(),
        DatasetDirectory::new(&output),
    );
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, Error::Fetch(FetchError::Status { .. })));
    assert!(!output.join(PERSONALITY_FILE).exists());
    assert!(!output.join(ASSETS_FILE).exists());
    assert!(!output.join(MERGED_FILE).exists());
}

#[tokio::test]
async fn test_top_gbp_holder_from_written_dataset() {
    let server = stub().await;
    let temp = TempDir::new().unwrap();
    let http = client(TIMEOUT);
    let options = InferenceOptions::default();

    Pipeline::new(
        RemoteCsvExtractor::new(http.clone(), server.url("/personality.csv")),
        RestTableExtractor::new(http, server.url("/rest/v1/assets"), "test-key"),
        Merger::default(),
        DatasetDirectory::new(temp.path()),
    )
    .run()
    .await
    .unwrap();

    let merged = read_table(temp.path().join(MERGED_FILE), &options).unwrap();
    let summary = summarize(&merged, &options).unwrap();

    // GBP totals: id 1 = 120.5 + 30, id 2 = 140
    let top = summary.top_holder.unwrap();
    assert_eq!(top.id, "1");
    assert_eq!(top.currency, "GBP");
    assert!((top.total - 150.5).abs() < 1e-9);
    assert_eq!(top.risk_tolerance, Value::Float(0.6));

    assert_eq!(summary.rows, 6);
    assert_eq!(summary.records_per_date.counts.len(), 3);
}
