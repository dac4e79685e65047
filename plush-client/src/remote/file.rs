//! File-backed remote.
//!
//! Stands in for the hosted posts table when running the CLI locally: the
//! "table" is a JSON array of raw post rows with joined profiles. The
//! service counts as reachable while the file's directory exists.

use super::{PostRemote, ReachabilityProbe, RemoteError, RemotePost};
use async_trait::async_trait;
use plushie_types::{ExtendedPost, RawPost, UserInfo};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Remote backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileRemote {
    path: PathBuf,
}

impl FileRemote {
    /// Create a remote stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_rows(&self) -> Result<Vec<RawPost>, RemoteError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|e| RemoteError::Malformed(e.to_string()))
    }

    async fn write_rows(&self, rows: &[RawPost]) -> Result<(), RemoteError> {
        let contents =
            serde_json::to_string_pretty(rows).map_err(|e| RemoteError::Malformed(e.to_string()))?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

#[async_trait]
impl PostRemote for FileRemote {
    async fn fetch_posts(&self) -> Result<Vec<RemotePost>, RemoteError> {
        let rows = self.read_rows().await?;
        Ok(rows
            .into_iter()
            .map(|mut post| {
                let user = post.profile.take();
                RemotePost { post, user }
            })
            .collect())
    }

    async fn create_post(&self, post: &ExtendedPost) -> Result<(), RemoteError> {
        if !self.probe().await? {
            return Err(RemoteError::Unavailable(format!(
                "{} is not reachable",
                self.parent_dir().display()
            )));
        }

        let mut rows = self.read_rows().await?;
        if rows.iter().any(|row| row.id.as_ref() == Some(&post.id)) {
            return Err(RemoteError::Rejected {
                id: post.id.clone(),
                reason: "a post with this id already exists".to_string(),
            });
        }

        let mut row = RawPost::from(post);
        row.profile = Some(UserInfo::with_username(post.username.clone()));
        rows.push(row);
        self.write_rows(&rows).await?;

        tracing::debug!("Created remote post {}", post.id);
        Ok(())
    }
}

#[async_trait]
impl ReachabilityProbe for FileRemote {
    async fn probe(&self) -> Result<bool, RemoteError> {
        Ok(tokio::fs::try_exists(self.parent_dir()).await?)
    }
}
