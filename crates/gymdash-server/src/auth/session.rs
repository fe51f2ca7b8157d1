use chrono::Utc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{Credential, Session};

/// Persists the backend credential and the gym details blob verbatim.
pub fn create_session(
    pool: &DbPool,
    credential: &Credential,
    gym_details: &str,
) -> AppResult<Session> {
    let conn = pool.get()?;
    let id = Uuid::new_v4().to_string();
    let token = generate_token();
    let created_at = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();

    conn.execute(
        "INSERT INTO sessions (id, token, auth_token, gym_details, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![id, token, credential.as_str(), gym_details, created_at],
    )?;

    Ok(Session {
        id,
        token,
        auth_token: credential.as_str().to_string(),
        gym_details: gym_details.to_string(),
        created_at,
    })
}

pub fn find_session(pool: &DbPool, token: &str) -> AppResult<Option<Session>> {
    let conn = pool.get()?;

    let result = conn.query_row(
        "SELECT id, token, auth_token, gym_details, created_at FROM sessions WHERE token = ?1",
        rusqlite::params![token],
        |row| {
            Ok(Session {
                id: row.get(0)?,
                token: row.get(1)?,
                auth_token: row.get(2)?,
                gym_details: row.get(3)?,
                created_at: row.get(4)?,
            })
        },
    );

    match result {
        Ok(session) => Ok(Some(session)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn delete_session(pool: &DbPool, token: &str) -> AppResult<()> {
    let conn = pool.get()?;
    conn.execute("DELETE FROM sessions WHERE token = ?1", rusqlite::params![token])?;
    Ok(())
}

fn generate_token() -> String {
    use base64::Engine;
    let mut bytes = [0u8; 32];
    use rand::RngCore;
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
