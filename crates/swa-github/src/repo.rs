//! Target repository references

use std::fmt;

use crate::error::{GitHubError, Result};

/// A repository addressed as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl RepoRef {
    /// Parse an `owner/repo` string.
    pub fn parse(input: &str) -> Result<Self> {
        match input.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(GitHubError::InvalidRepo {
                input: input.to_string(),
            }),
        }
    }

    /// Resolve a repository reference from an optional input, falling back
    /// to the ambient workflow context (the `GITHUB_REPOSITORY` value the
    /// caller passes in) when the input is absent or blank.
    pub fn resolve(input: Option<&str>, context: Option<&str>) -> Result<Self> {
        match input.map(str::trim).filter(|s| !s.is_empty()) {
            Some(explicit) => Self::parse(explicit),
            None => match context.map(str::trim).filter(|s| !s.is_empty()) {
                Some(ambient) => Self::parse(ambient),
                None => Err(GitHubError::MissingRepoContext),
            },
        }
    }

    /// The `owner/repo` form.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
