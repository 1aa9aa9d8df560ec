//! Session persistence between CLI invocations.

use std::path::Path;

use rentdesk_core::auth::Session;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Read a stored session. A missing file means no session.
pub async fn load(path: &Path) -> Result<Option<Session>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Store `session`, or remove the file when there is none.
pub async fn save(path: &Path, session: Option<&Session>) -> Result<()> {
    match session {
        Some(session) => {
            write_private(path, &serde_json::to_vec_pretty(session)?).await?;
            tracing::debug!(path = %path.display(), "Session stored");
        }
        None => match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Session file removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        },
    }
    Ok(())
}

/// Write `bytes` to a file only its owner can read.
async fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    // `mode` only applies when the file is created.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .await?;
    }
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rentdesk_core::auth::AuthUser;
    use uuid::Uuid;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rentdesk-{}-{name}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_missing_file_is_no_session() {
        let path = temp_path("missing");
        assert_eq!(load(&path).await.unwrap(), None);
    }

    fn session() -> Session {
        Session {
            access_token: "jwt".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Utc.timestamp_opt(1_900_000_000, 0).unwrap(),
            user: AuthUser {
                id: Uuid::nil(),
                email: Some("ops@example.com".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_save_then_load_then_clear() {
        let path = temp_path("session");
        let session = session();

        save(&path, Some(&session)).await.unwrap();
        assert_eq!(load(&path).await.unwrap(), Some(session));

        save(&path, None).await.unwrap();
        assert_eq!(load(&path).await.unwrap(), None);
        save(&path, None).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_saved_session_is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_path("private");
        tokio::fs::write(&path, b"{}").await.unwrap();
        tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644))
            .await
            .unwrap();

        save(&path, Some(&session())).await.unwrap();

        let mode = tokio::fs::metadata(&path).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(load(&path).await.unwrap(), Some(session()));

        save(&path, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        tokio::fs::write(&path, b"not json").await.unwrap();

        assert!(load(&path).await.is_err());

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
