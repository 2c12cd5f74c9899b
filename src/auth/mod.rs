use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::models::User;

/// Authentication context consumed by the header
#[async_trait]
pub trait AuthContext: Send {
    /// The signed-in user, if any
    fn user(&self) -> Option<User>;

    /// End the current session
    async fn logout(&mut self) -> Result<()>;
}

/// Session backed by a JSON file holding the signed-in user.
///
/// Logging out forgets the user and removes the file.
#[derive(Debug, Clone)]
pub struct SessionAuth {
    path: Option<PathBuf>,
    user: Option<User>,
}

impl SessionAuth {
    /// Read the session file; a missing file means nobody is signed in
    pub async fn load(path: &Path) -> Result<Self> {
        let user = match tokio::fs::read_to_string(path).await {
            Ok(raw) => {
                let user: User =
                    serde_json::from_str(&raw).map_err(|source| DashboardError::Session {
                        path: path.to_path_buf(),
                        source,
                    })?;
                debug!("Session loaded from {}", path.display());
                Some(user)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No session at {}, continuing signed out", path.display());
                None
            }
            Err(source) => {
                return Err(DashboardError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            user,
        })
    }

    /// In-memory session with no backing file
    pub fn with_user(user: Option<User>) -> Self {
        Self { path: None, user }
    }
}

#[async_trait]
impl AuthContext for SessionAuth {
    fn user(&self) -> Option<User> {
        self.user.clone()
    }

    async fn logout(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!("Session file {} already gone", path.display());
                }
                Err(source) => {
                    return Err(DashboardError::Io {
                        path: path.clone(),
                        source,
                    })
                }
            }
        }

        self.user = None;
        info!("User logged out");
        Ok(())
    }
}
