//! Integration tests for the ETL pipeline
//!
//! These tests use wiremock to serve the bank table page and run the full
//! fetch → extract → transform → load → query cycle against temp files.

use bank_etl::config::Config;
use bank_etl::storage::{BankStore, QueryValue, SqliteStore};
use bank_etl::{BankRecord, ErrorKind, EtlError, ExchangeRates, Pipeline};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration that fetches from `url` and writes into `dir`
fn create_test_config(url: String, dir: &Path) -> Config {
    let mut config = Config::default();
    config.source.url = url;
    config.source.timeout_secs = 5;
    config.output.csv_path = dir.join("Largest_banks_data.csv").display().to_string();
    config.output.database_path = dir.join("Banks.db").display().to_string();
    config.output.log_path = dir.join("code_log.txt").display().to_string();
    config
}

fn bank_row(rank: u32, name: &str, market_cap: &str) -> String {
    format!(
        r#"<tr><td>{rank}</td><td><span class="flagicon"><a href="/wiki/Flag" title="Flag"><img src="flag.svg"></a></span> <a href="/wiki/{name}" title="{name}">{name}</a></td><td>{market_cap}
</td></tr>"#
    )
}

fn bank_page(rows: &[String]) -> String {
    format!(
        r#"<html><head><title>List of largest banks</title></head><body>
<h2>By market capitalization</h2>
<table class="wikitable"><tbody>
<tr><th>Rank</th><th>Bank name</th><th>Market cap<br>(US$ billion)</th></tr>
{}
</tbody></table>
<h2>By total assets</h2>
<table class="wikitable"><tbody>
{}
</tbody></table>
</body></html>"#,
        rows.concat(),
        bank_row(1, "Assets Table Bank", "9,999")
    )
}

fn default_rows() -> Vec<String> {
    vec![
        bank_row(1, "JPMorgan Chase", "432.92"),
        "<tr><th colspan=\"3\">—</th></tr>".to_string(),
        bank_row(2, "Bank of America", "1,231.52"),
    ]
}

async fn serve(body: String) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_full_run_over_http() {
    let mock_server = serve(bank_page(&default_rows())).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(format!("{}/banks", mock_server.uri()), dir.path());

    let pipeline = Pipeline::from_config(config.clone()).expect("Failed to build pipeline");
    let report = pipeline.run().await.expect("ETL run failed");

    // Separator row is skipped, order is kept, second table is ignored
    let names: Vec<&str> = report.records.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["JPMorgan Chase", "Bank of America"]);
    assert_eq!(report.rows_loaded, 2);

    let csv = std::fs::read_to_string(&config.output.csv_path).expect("CSV missing");
    assert_eq!(
        csv,
        ",Name,MC_USD_Billion,MC_GBP_Billion,MC_EUR_Billion,MC_INR_Billion\n\
         0,JPMorgan Chase,432.92,346.34,402.62,35910.71\n\
         1,Bank of America,1231.52,985.22,1145.31,102154.58\n"
    );

    let store = SqliteStore::open(Path::new(&config.output.database_path)).expect("DB missing");
    let result = store
        .query("SELECT Name, MC_GBP_Billion FROM Largest_banks")
        .expect("Query failed");
    assert_eq!(
        result.rows,
        vec![
            vec![
                QueryValue::Text("JPMorgan Chase".to_string()),
                QueryValue::Real(346.34)
            ],
            vec![
                QueryValue::Text("Bank of America".to_string()),
                QueryValue::Real(985.22)
            ],
        ]
    );

    let sql: Vec<&str> = report.queries.iter().map(|(sql, _)| sql.as_str()).collect();
    assert_eq!(
        sql,
        vec![
            "SELECT * from Largest_banks",
            "SELECT AVG(MC_GBP_Billion) FROM Largest_banks",
            "SELECT Name from Largest_banks LIMIT 5",
        ]
    );
    assert_eq!(report.queries[0].1.rows.len(), 2);
    assert_eq!(report.queries[2].1.rows.len(), 2);

    let average = report.queries[1]
        .1
        .scalar()
        .and_then(QueryValue::as_f64)
        .expect("AVG returned nothing");
    assert!((average - (346.34 + 985.22) / 2.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let mock_server = serve(bank_page(&default_rows())).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(format!("{}/banks", mock_server.uri()), dir.path());
    let pipeline = Pipeline::from_config(config.clone()).expect("Failed to build pipeline");

    let first = pipeline.run().await.expect("First run failed");
    let first_csv = std::fs::read(&config.output.csv_path).expect("CSV missing");
    let second = pipeline.run().await.expect("Second run failed");
    let second_csv = std::fs::read(&config.output.csv_path).expect("CSV missing");

    assert_eq!(first.csv_sha256, second.csv_sha256);
    assert_eq!(first_csv, second_csv);
    assert_eq!(first.queries, second.queries);

    // Replace semantics: the table holds one run's rows, not two
    let store = SqliteStore::open(Path::new(&config.output.database_path)).expect("DB missing");
    let count = store
        .query("SELECT COUNT(*) FROM Largest_banks")
        .expect("Query failed");
    assert_eq!(count.scalar(), Some(&QueryValue::Integer(2)));

    // The progress log is appended to, never truncated
    let log = std::fs::read_to_string(&config.output.log_path).expect("Log missing");
    assert_eq!(log.lines().count(), 14);
    assert_eq!(
        log.lines()
            .filter(|l| l.ends_with(" : Process Complete."))
            .count(),
        2
    );
}

#[tokio::test]
async fn test_non_numeric_market_cap_is_loaded_as_null() {
    let rows = vec![
        bank_row(1, "JPMorgan Chase", "432.92"),
        bank_row(2, "Unlisted Bank", "N/A"),
    ];
    let mock_server = serve(bank_page(&rows)).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(format!("{}/banks", mock_server.uri()), dir.path());

    let report = Pipeline::from_config(config.clone())
        .expect("Failed to build pipeline")
        .run()
        .await
        .expect("ETL run failed");

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.missing_count(), 1);

    let csv = std::fs::read_to_string(&config.output.csv_path).expect("CSV missing");
    assert!(csv.contains("\n1,Unlisted Bank,,,,\n"));

    let store = SqliteStore::open(Path::new(&config.output.database_path)).expect("DB missing");
    let result = store
        .query("SELECT MC_USD_Billion, MC_INR_Billion FROM Largest_banks WHERE Name = 'Unlisted Bank'")
        .expect("Query failed");
    assert_eq!(result.rows, vec![vec![QueryValue::Null, QueryValue::Null]]);
}

#[tokio::test]
async fn test_http_error_is_fetch_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/banks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(format!("{}/banks", mock_server.uri()), dir.path());

    let err = Pipeline::from_config(config.clone())
        .expect("Failed to build pipeline")
        .run()
        .await
        .expect_err("Run should fail");

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
    assert!(matches!(err, EtlError::HttpStatus { status: 503, .. }));
    assert!(!Path::new(&config.output.csv_path).exists());
    assert!(!Path::new(&config.output.database_path).exists());

    let log = std::fs::read_to_string(&config.output.log_path).expect("Log missing");
    assert!(log.lines().last().unwrap().contains("ETL process failed"));
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_failure() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    // Port 9 (discard) on localhost is not expected to accept HTTP
    let config = create_test_config("http://127.0.0.1:9/banks".to_string(), dir.path());

    let err = Pipeline::from_config(config)
        .expect("Failed to build pipeline")
        .run()
        .await
        .expect_err("Run should fail");

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
}

#[tokio::test]
async fn test_malformed_row_aborts_before_loading() {
    let rows = vec![
        bank_row(1, "JPMorgan Chase", "432.92"),
        r#"<tr><td>2</td><td>Bank without links</td><td>231.52</td></tr>"#.to_string(),
    ];
    let mock_server = serve(bank_page(&rows)).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(format!("{}/banks", mock_server.uri()), dir.path());

    let err = Pipeline::from_config(config.clone())
        .expect("Failed to build pipeline")
        .run()
        .await
        .expect_err("Run should fail");

    assert_eq!(err.kind(), ErrorKind::MalformedRow);
    assert!(!Path::new(&config.output.csv_path).exists());
    assert!(!Path::new(&config.output.database_path).exists());
}

#[tokio::test]
async fn test_page_without_table_is_structure_not_found() {
    let mock_server =
        serve("<html><body><p>This page has moved.</p></body></html>".to_string()).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(format!("{}/banks", mock_server.uri()), dir.path());

    let err = Pipeline::from_config(config)
        .expect("Failed to build pipeline")
        .run()
        .await
        .expect_err("Run should fail");

    assert_eq!(err.kind(), ErrorKind::StructureNotFound);
}

#[tokio::test]
async fn test_replaces_table_left_by_previous_job() {
    let mock_server = serve(bank_page(&default_rows())).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(format!("{}/banks", mock_server.uri()), dir.path());

    {
        let mut store =
            SqliteStore::open(Path::new(&config.output.database_path)).expect("DB open failed");
        let rates = ExchangeRates::default();
        let stale: Vec<BankRecord> = (0..10)
            .map(|i| BankRecord::from_usd(format!("Stale {}", i), Some(1.0), &rates))
            .collect();
        store
            .replace_table("Largest_banks", &stale)
            .expect("Seeding failed");
    }

    Pipeline::from_config(config.clone())
        .expect("Failed to build pipeline")
        .run()
        .await
        .expect("ETL run failed");

    let store = SqliteStore::open(Path::new(&config.output.database_path)).expect("DB missing");
    let names = store
        .query("SELECT Name FROM Largest_banks")
        .expect("Query failed");
    assert_eq!(
        names.rows,
        vec![
            vec![QueryValue::Text("JPMorgan Chase".to_string())],
            vec![QueryValue::Text("Bank of America".to_string())],
        ]
    );
}
