//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container is shared across the whole test run; every test
//! gets its own freshly-migrated database inside it, so tests never see each
//! other's rows and count-based assertions stay deterministic.

use anyhow::{Context, Result};
use axum::Router;
use sqlx::{Executor, PgPool};
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use server_core::common::UserId;
use server_core::domains::auth::JwtService;
use server_core::server::build_app;
use server_core::Config;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    /// Connection URL for the container's maintenance database.
    admin_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG when debugging tests; try_init() because multiple
        // test binaries may race.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;
        let admin_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        Ok(Self {
            admin_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness managing a per-test database plus the services under test.
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
    /// Configuration the app under test is built with.
    pub config: Config,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped; per-test databases die
        // with the container.
    }
}

impl TestHarness {
    /// Creates a new test harness backed by a fresh, migrated database.
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        // Carve out a database for this test
        let db_name = format!("test_{}", Uuid::new_v4().simple());
        let admin_pool = PgPool::connect(&infra.admin_url)
            .await
            .context("Failed to connect to admin database")?;
        admin_pool
            .execute(format!(r#"CREATE DATABASE "{}""#, db_name).as_str())
            .await
            .context("Failed to create test database")?;
        admin_pool.close().await;

        let db_url = infra
            .admin_url
            .rsplit_once('/')
            .map(|(base, _)| format!("{}/{}", base, db_name))
            .expect("admin URL always has a database segment");

        let db_pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to test database")?;

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run migrations")?;

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_secret: "test_secret_key".to_string(),
            jwt_issuer: "test_issuer".to_string(),
            razorpay_key_id: "rzp_test_key".to_string(),
            razorpay_key_secret: "test_razorpay_secret".to_string(),
            allowed_origins: vec![],
        };

        Ok(Self { db_pool, config })
    }

    /// Build the router under test.
    pub fn app(&self) -> Router {
        build_app(self.db_pool.clone(), &self.config)
    }

    /// JWT service sharing the app's secret, for minting test tokens.
    pub fn jwt_service(&self) -> Arc<JwtService> {
        Arc::new(JwtService::new(
            &self.config.jwt_secret,
            self.config.jwt_issuer.clone(),
        ))
    }

    /// Mint a valid access token for the given user.
    pub fn token_for(&self, user_id: UserId) -> String {
        self.jwt_service()
            .create_token(user_id)
            .expect("Token creation should succeed in tests")
    }
}
