//! Shared fixtures for unit and router tests.

use axum_test::TestServer;
use tempfile::TempDir;

use crate::auth::session;
use crate::backend::BackendClient;
use crate::config::Config;
use crate::db::{self, DbPool};
use crate::models::Credential;
use crate::routes::{create_router, AppState};

pub const TEST_CREDENTIAL: &str = "tok-123";

pub fn test_config(backend_url: &str) -> Config {
    Config {
        server_port: 0,
        sqlite_path: String::new(),
        backend_url: backend_url.to_string(),
        backend_timeout_secs: 5,
        secure_cookies: false,
        auth_rate_limit: false,
    }
}

/// The directory must outlive the pool.
pub fn test_pool() -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.db");
    let pool = db::create_pool(path.to_str().unwrap()).unwrap();
    (dir, pool)
}

pub struct TestApp {
    pub server: TestServer,
    pub pool: DbPool,
    _dir: TempDir,
}

impl TestApp {
    pub fn new(backend_url: &str) -> Self {
        let (dir, pool) = test_pool();
        let config = test_config(backend_url);
        let state = AppState {
            db: pool.clone(),
            backend: BackendClient::new(&config).unwrap(),
            config,
        };
        let server = TestServer::new(create_router(state)).unwrap();
        Self { server, pool, _dir: dir }
    }

    /// Stores a session and returns the `Cookie` header value for it.
    pub fn sign_in(&self) -> String {
        let credential = Credential::new(TEST_CREDENTIAL).unwrap();
        let sess = session::create_session(&self.pool, &credential, r#"{"name":"Iron Den"}"#).unwrap();
        format!("{}={}", crate::auth::guard::SESSION_COOKIE, sess.token)
    }

    pub fn session_count(&self) -> i64 {
        let conn = self.pool.get().unwrap();
        conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .unwrap()
    }
}
