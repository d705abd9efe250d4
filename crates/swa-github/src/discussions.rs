//! GitHub Discussions over GraphQL
//!
//! Discussion creation needs GraphQL node ids, so the category lookup
//! resolves both the repository id and the category id in one query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::client::GitHubClient;
use crate::error::{GitHubError, Result};

/// How many categories / discussions a single query fetches.
const PAGE_SIZE: usize = 100;

/// Node ids needed to create a discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIds {
    /// GraphQL node id of the repository.
    pub repository_id: String,
    /// GraphQL node id of the discussion category.
    pub category_id: String,
}

/// A discussion thread, as listed for cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionThread {
    /// GraphQL node id.
    pub id: String,
    /// Discussion title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Web URL of the thread.
    pub url: String,
}

/// Discussion operations the orchestrator and the cleanup sweeper depend on.
#[async_trait]
pub trait DiscussionApi: Send + Sync {
    /// Resolve the repository and category node ids for a category name.
    ///
    /// An unknown category name is fatal for the run.
    async fn resolve_category(&self, owner: &str, repo: &str, name: &str) -> Result<CategoryIds>;

    /// Create a discussion and return its URL.
    async fn create_discussion(&self, ids: &CategoryIds, title: &str, body: &str)
    -> Result<String>;

    /// Delete a discussion by node id.
    async fn delete_discussion(&self, id: &str) -> Result<()>;

    /// List discussions in a category, oldest first.
    async fn list_discussions(
        &self,
        owner: &str,
        repo: &str,
        category_id: &str,
    ) -> Result<Vec<DiscussionThread>>;
}

const CATEGORY_QUERY: &str = "\
query ($owner: String!, $repo: String!, $first: Int!) {
  repository(owner: $owner, name: $repo) {
    id
    discussionCategories(first: $first) {
      nodes {
        id
        name
      }
    }
  }
}";

const CREATE_MUTATION: &str = "\
mutation ($repositoryId: ID!, $categoryId: ID!, $title: String!, $body: String!) {
  createDiscussion(
    input: {repositoryId: $repositoryId, categoryId: $categoryId, title: $title, body: $body}
  ) {
    discussion {
      url
    }
  }
}";

const DELETE_MUTATION: &str = "\
mutation ($id: ID!) {
  deleteDiscussion(input: {id: $id}) {
    clientMutationId
  }
}";

const LIST_QUERY: &str = "\
query ($owner: String!, $repo: String!, $categoryId: ID!, $first: Int!) {
  repository(owner: $owner, name: $repo) {
    discussions(first: $first, categoryId: $categoryId, orderBy: {field: CREATED_AT, direction: ASC}) {
      nodes {
        id
        title
        createdAt
        url
      }
    }
  }
}";

#[derive(Debug, Deserialize)]
struct CategoryQueryData {
    repository: Option<CategoryRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRepository {
    id: String,
    discussion_categories: NodeList<CategoryNode>,
}

#[derive(Debug, Deserialize)]
struct CategoryNode {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct NodeList<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    create_discussion: Option<CreatePayload>,
}

#[derive(Debug, Deserialize)]
struct CreatePayload {
    discussion: CreatedDiscussion,
}

#[derive(Debug, Deserialize)]
struct CreatedDiscussion {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ListData {
    repository: Option<ListRepository>,
}

#[derive(Debug, Deserialize)]
struct ListRepository {
    discussions: NodeList<DiscussionThread>,
}

/// Find a category by exact name among the fetched nodes.
fn find_category(nodes: &[CategoryNode], name: &str) -> Option<String> {
    nodes
        .iter()
        .find(|node| node.name == name)
        .map(|node| node.id.clone())
}

#[async_trait]
impl DiscussionApi for GitHubClient {
    async fn resolve_category(&self, owner: &str, repo: &str, name: &str) -> Result<CategoryIds> {
        let data: CategoryQueryData = self
            .graphql(
                CATEGORY_QUERY,
                json!({ "owner": owner, "repo": repo, "first": PAGE_SIZE }),
            )
            .await?;
        let repository = data.repository.ok_or(GitHubError::MissingField {
            what: "repository in category query",
        })?;

        let category_id = find_category(&repository.discussion_categories.nodes, name)
            .ok_or_else(|| GitHubError::CategoryNotFound {
                name: name.to_string(),
            })?;

        Ok(CategoryIds {
            repository_id: repository.id,
            category_id,
        })
    }

    async fn create_discussion(
        &self,
        ids: &CategoryIds,
        title: &str,
        body: &str,
    ) -> Result<String> {
        let data: CreateData = self
            .graphql(
                CREATE_MUTATION,
                json!({
                    "repositoryId": ids.repository_id,
                    "categoryId": ids.category_id,
                    "title": title,
                    "body": body,
                }),
            )
            .await?;
        let payload = data.create_discussion.ok_or(GitHubError::MissingField {
            what: "createDiscussion payload",
        })?;
        tracing::debug!("created discussion {}", payload.discussion.url);
        Ok(payload.discussion.url)
    }

    async fn delete_discussion(&self, id: &str) -> Result<()> {
        let _: serde_json::Value = self.graphql(DELETE_MUTATION, json!({ "id": id })).await?;
        Ok(())
    }

    async fn list_discussions(
        &self,
        owner: &str,
        repo: &str,
        category_id: &str,
    ) -> Result<Vec<DiscussionThread>> {
        let data: ListData = self
            .graphql(
                LIST_QUERY,
                json!({
                    "owner": owner,
                    "repo": repo,
                    "categoryId": category_id,
                    "first": PAGE_SIZE,
                }),
            )
            .await?;
        let repository = data.repository.ok_or(GitHubError::MissingField {
            what: "repository in discussion listing",
        })?;
        Ok(repository.discussions.nodes)
    }
}
