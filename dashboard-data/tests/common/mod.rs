//! Common test utilities for dashboard-data integration tests.
#![allow(dead_code)]

use dashboard_data::config::PaginationConfig;
use dashboard_data::services::{Database, FetchClient};
use dashboard_data::Dashboard;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use std::sync::{Arc, Once};
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,dashboard_data=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const FETCH_TIMEOUT: Duration = Duration::from_millis(500);
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Dashboard over a mock data source and a pool that never connects.
/// Only the fetch-backed operations may be exercised.
pub fn dashboard_for_source(server: &MockServer) -> Dashboard {
    init_tracing();

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy("postgres://dashboard@127.0.0.1:1/unused")
        .expect("Failed to build lazy pool");

    Dashboard::new(
        Arc::new(Database::from_pool(pool, QUERY_TIMEOUT)),
        Arc::new(FetchClient::new(&server.uri(), FETCH_TIMEOUT).expect("Failed to build client")),
        PaginationConfig::default(),
    )
}

/// Dashboard whose store refuses every connection. `acquire_timeout` bounds
/// the pool wait, `query_timeout` bounds each query.
pub fn dashboard_without_store(acquire_timeout: Duration, query_timeout: Duration) -> Dashboard {
    init_tracing();

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(acquire_timeout)
        .connect_lazy("postgres://dashboard@127.0.0.1:1/unused")
        .expect("Failed to build lazy pool");

    let fetcher =
        FetchClient::new("http://127.0.0.1:1", FETCH_TIMEOUT).expect("Failed to build client");

    Dashboard::new(
        Arc::new(Database::from_pool(pool, query_timeout)),
        Arc::new(fetcher),
        PaginationConfig::default(),
    )
}

/// Serve `body` as JSON on `GET /{resource}`.
pub async fn mount_collection(server: &MockServer, resource: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", resource)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn customers_json() -> Value {
    json!([
        { "id": "c1", "name": "Delba de Oliveira", "email": "delba@oliveira.com", "image_url": "/customers/delba.png" },
        { "id": "c2", "name": "Lee Robinson", "email": "lee@robinson.com", "image_url": "/customers/lee.png" },
        { "id": "c3", "name": "Hector Simpson", "email": "hector@simpson.com", "image_url": "/customers/hector.png" }
    ])
}

pub fn invoices_json() -> Value {
    json!([
        { "id": "i1", "customer_id": "c1", "amount": 15795, "date": "2022-12-06", "status": "pending" },
        { "id": "i2", "customer_id": "c2", "amount": 20348, "date": "2022-11-14", "status": "pending" },
        { "id": "i3", "customer_id": "c3", "amount": 3040, "date": "2022-10-29", "status": "paid" },
        { "id": "i4", "customer_id": "c1", "amount": 44800, "date": "2023-09-10", "status": "paid" },
        { "id": "i5", "customer_id": "c2", "amount": 34577, "date": "2023-08-05", "status": "pending" },
        { "id": "i6", "customer_id": "c3", "amount": 54246, "date": "2023-07-16", "status": "pending" },
        { "id": "i7", "customer_id": "c1", "amount": 666, "date": "2023-06-27", "status": "pending" }
    ])
}

// -----------------------------------------------------------------------------
// PostgreSQL fixtures
// -----------------------------------------------------------------------------

pub const EVIL_RABBIT: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
pub const DELBA: &str = "3958dc9e-742f-4377-85e9-fec4b6a6442a";
pub const LEE: &str = "3958dc9e-737f-4377-85e9-fec4b6a6442a";
pub const MICHAEL: &str = "76d65c26-f784-44a2-ac19-586678f7c2f2";
pub const AMY: &str = "cc27c14a-0acf-4f4a-a6c9-d45682c144b9";
pub const BALAZS: &str = "13d07535-c59e-4157-a011-f8d2ef4e0cbb";
pub const JUICE: &str = "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa";

/// (id, name, email)
pub const CUSTOMERS: [(&str, &str, &str); 7] = [
    (EVIL_RABBIT, "Evil Rabbit", "evil@rabbit.com"),
    (DELBA, "Delba de Oliveira", "delba@oliveira.com"),
    (LEE, "Lee Robinson", "lee@robinson.com"),
    (MICHAEL, "Michael Novotny", "michael@novotny.com"),
    (AMY, "Amy Burns", "amy@burns.com"),
    (BALAZS, "Balazs Orban", "balazs@orban.com"),
    (JUICE, "100% Juice", "juice_bar@example.com"),
];

/// (invoice number, customer id, amount in cents, status, date)
pub const INVOICES: [(u32, &str, i64, &str, &str); 13] = [
    (1, EVIL_RABBIT, 15795, "pending", "2022-12-06"),
    (2, DELBA, 20348, "pending", "2022-11-14"),
    (3, LEE, 3040, "paid", "2022-10-29"),
    (4, MICHAEL, 44800, "paid", "2023-09-10"),
    (5, BALAZS, 34577, "pending", "2023-08-05"),
    (6, JUICE, 54246, "pending", "2023-07-16"),
    (7, EVIL_RABBIT, 666, "pending", "2023-06-27"),
    (8, DELBA, 32545, "paid", "2023-06-09"),
    (9, LEE, 1250, "paid", "2023-06-17"),
    (10, MICHAEL, 8546, "paid", "2023-06-07"),
    (11, BALAZS, 500, "paid", "2023-08-19"),
    (12, JUICE, 8945, "paid", "2023-06-03"),
    (13, EVIL_RABBIT, 1000, "paid", "2022-06-05"),
];

/// Stable id of fixture invoice `number`.
pub fn invoice_id(number: u32) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-4000-8000-{:012}", number)).expect("valid uuid")
}

/// Dashboard backed by the database at `TEST_DATABASE_URL`, seeded with the
/// fixtures above. `None` when the variable is not set.
pub struct TestDb {
    pub db: Arc<Database>,
    pub dashboard: Dashboard,
}

impl TestDb {
    pub async fn spawn() -> Option<Self> {
        init_tracing();

        let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set - skipping PostgreSQL test");
            return None;
        };

        let db = Database::new(&database_url, 2, 1, QUERY_TIMEOUT)
            .await
            .expect("Failed to connect to test database");
        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        seed(&db).await;

        let db = Arc::new(db);
        let fetcher = FetchClient::new("http://127.0.0.1:1", FETCH_TIMEOUT)
            .expect("Failed to build client");
        let dashboard = Dashboard::new(db.clone(), Arc::new(fetcher), PaginationConfig::default());

        Some(Self { db, dashboard })
    }
}

async fn seed(db: &Database) {
    sqlx::query("TRUNCATE invoices, customers")
        .execute(db.pool())
        .await
        .expect("Failed to truncate tables");

    for (id, name, email) in CUSTOMERS {
        sqlx::query("INSERT INTO customers (id, name, email, image_url) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::parse_str(id).expect("valid uuid"))
            .bind(name)
            .bind(email)
            .bind(format!("/customers/{}.png", name.to_lowercase().replace(' ', "-")))
            .execute(db.pool())
            .await
            .expect("Failed to insert customer");
    }

    for (number, customer_id, amount, status, date) in INVOICES {
        sqlx::query(
            "INSERT INTO invoices (id, customer_id, amount, status, date) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(invoice_id(number))
        .bind(Uuid::parse_str(customer_id).expect("valid uuid"))
        .bind(amount)
        .bind(status)
        .bind(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date"))
        .execute(db.pool())
        .await
        .expect("Failed to insert invoice");
    }
}
