//! Deep links into the Terraform Cloud UI.
//!
//! Links are only built when the run URL yields a usable origin. A missing or
//! malformed run URL is normal and simply means fields render as plain text.

use std::fmt;

use url::Url;

/// Scheme, host and port of the Terraform Cloud instance that sent a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Derive the base URL from a run URL.
    ///
    /// Returns `None` when the run URL is absent, relative, unparsable, or has
    /// no host. There is no fallback host.
    #[must_use]
    pub fn from_run_url(run_url: Option<&str>) -> Option<Self> {
        let parsed = Url::parse(run_url?).ok()?;
        if parsed.cannot_be_a_base() || parsed.host().is_none() {
            return None;
        }

        let mut base = parsed;
        base.set_path("");
        base.set_query(None);
        base.set_fragment(None);
        base.set_username("").ok()?;
        base.set_password(None).ok()?;
        Some(Self(base))
    }

    /// `{base}/app/{organization}/workspaces`
    #[must_use]
    pub fn organization_link(&self, organization: &str) -> Url {
        self.with_path(&format!("app/{organization}/workspaces"))
    }

    /// `{base}/app/{organization}/workspaces/{workspace}`
    #[must_use]
    pub fn workspace_link(&self, organization: &str, workspace: &str) -> Url {
        self.with_path(&format!("app/{organization}/workspaces/{workspace}"))
    }

    fn with_path(&self, path: &str) -> Url {
        let mut url = self.0.clone();
        url.set_path(path);
        url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.origin().ascii_serialization())
    }
}
