//! Optional off-host replication of the data files to a hosted-repository
//! contents API (GitHub-style full-file replace).
//!
//! The local file is always authoritative: callers append locally first and
//! treat a failed push as a warning, never a rollback.

use anyhow::Context;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

const ENV_REPO: &str = "OPSBOARD_MIRROR_REPO";
const ENV_BRANCH: &str = "OPSBOARD_MIRROR_BRANCH";
const ENV_TOKEN: &str = "OPSBOARD_MIRROR_TOKEN";

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// `owner/name` repository identifier.
    pub repo: String,
    pub branch: String,
    token: String,
}

impl MirrorConfig {
    /// Mirroring is configured entirely from the environment; if the repo or
    /// token is absent the feature is off.
    pub fn from_env() -> Option<MirrorConfig> {
        let repo = std::env::var(ENV_REPO).ok()?;
        let token = std::env::var(ENV_TOKEN).ok()?;
        let branch = std::env::var(ENV_BRANCH).unwrap_or_else(|_| "main".to_string());
        Some(MirrorConfig {
            repo,
            branch,
            token,
        })
    }

    /// Replace `path` in the remote repository with `content`.
    ///
    /// The update is conditioned on the current remote blob sha, so a
    /// concurrent remote edit fails the push instead of being overwritten.
    pub fn push(&self, path: &str, content: &[u8], message: &str) -> anyhow::Result<()> {
        let url = format!("https://api.github.com/repos/{}/contents/{}", self.repo, path);

        let sha = self.current_sha(&url)?;
        let mut body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content),
            "branch": self.branch,
        });
        if let Some(sha) = &sha {
            body["sha"] = serde_json::Value::String(sha.clone());
        }

        self.request("PUT", &url)
            .send_json(body)
            .with_context(|| format!("mirror push to {} failed", self.repo))?;
        log::info!("mirrored {} to {} ({})", path, self.repo, self.branch);
        Ok(())
    }

    /// Blob sha of the existing remote file, or `None` when the file does not
    /// exist yet.
    fn current_sha(&self, url: &str) -> anyhow::Result<Option<String>> {
        #[derive(Deserialize)]
        struct Contents {
            sha: String,
        }

        let response = self
            .request("GET", url)
            .query("ref", &self.branch)
            .call();
        match response {
            Ok(response) => {
                let contents: Contents = response
                    .into_json()
                    .context("unexpected mirror contents response")?;
                Ok(Some(contents.sha))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => Err(e).context("failed to read current mirror contents"),
        }
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        ureq::request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", "opsboard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_repo_and_token() {
        std::env::remove_var(ENV_REPO);
        std::env::remove_var(ENV_TOKEN);
        std::env::remove_var(ENV_BRANCH);
        assert!(MirrorConfig::from_env().is_none());

        std::env::set_var(ENV_REPO, "acme/opsboard-data");
        assert!(MirrorConfig::from_env().is_none());

        std::env::set_var(ENV_TOKEN, "t0ken");
        let config = MirrorConfig::from_env().unwrap();
        assert_eq!(config.repo, "acme/opsboard-data");
        assert_eq!(config.branch, "main");

        std::env::set_var(ENV_BRANCH, "data");
        assert_eq!(MirrorConfig::from_env().unwrap().branch, "data");

        std::env::remove_var(ENV_REPO);
        std::env::remove_var(ENV_TOKEN);
        std::env::remove_var(ENV_BRANCH);
    }
}
