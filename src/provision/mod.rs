//! Repository provisioning: make sure `owner/slug` exists on the host.
//!
//! The lookup treats 404 as "absent" and the create call treats 422 as
//! "already exists", which covers a repository appearing between the two
//! calls. Every other non-success status is fatal.

use tracing::{debug, info};

use crate::context::ServiceContext;
use crate::error::{RepodocError, Result};
use crate::ports::{HostReply, NewRepo};

/// Everything needed to provision one repository.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    /// Identifier of the source project, embedded in the description.
    pub project_id: String,
    /// Human-readable project name; the repository name is its slug.
    pub english_name: String,
    /// Personal access token used for both calls.
    pub token: String,
    /// Account that owns the repository.
    pub owner: String,
}

impl ProvisionRequest {
    /// Repository name derived from the display name.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.english_name)
    }
}

/// Result of a provisioning run. Both variants exit 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A new private repository was created.
    Created {
        /// Name of the new repository.
        name: String,
    },
    /// The repository was already there, found either by the lookup or by a 422 on create.
    AlreadyExists {
        /// Name of the existing repository.
        name: String,
    },
}

impl ProvisionOutcome {
    /// Console line reported to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ProvisionOutcome::Created { name } => {
                format!("Repository \"{name}\" created successfully.")
            }
            ProvisionOutcome::AlreadyExists { name } => {
                format!("Repository \"{name}\" already exists.")
            }
        }
    }
}

/// Turns a display name into a repository name: trimmed, lowercased, with
/// every whitespace run replaced by a single `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// Description given to newly created repositories.
#[must_use]
pub fn description(project_id: &str, english_name: &str) -> String {
    format!("Repository for GAS project (ID: {project_id}) - {english_name}")
}

/// Checks whether `owner/name` exists: 200 means yes, 404 means no.
///
/// # Errors
///
/// Returns [`RepodocError::RemoteLookup`] on a transport failure or any
/// other status.
pub async fn repo_exists(ctx: &ServiceContext, token: &str, owner: &str, name: &str) -> Result<bool> {
    let reply = ctx
        .host
        .get_repo(token, owner, name)
        .await
        .map_err(|e| RepodocError::RemoteLookup(e.to_string()))?;
    debug!(owner, name, status = reply.status, "repository lookup returned");

    match reply.status {
        200 => Ok(true),
        404 => Ok(false),
        status => Err(RepodocError::RemoteLookup(status_error(&reply, status))),
    }
}

/// Creates a private repository, treating 422 as "already exists".
///
/// # Errors
///
/// Returns [`RepodocError::RemoteCreate`] on a transport failure or any
/// non-success status other than 422.
pub async fn create_repo(ctx: &ServiceContext, request: &ProvisionRequest) -> Result<ProvisionOutcome> {
    let name = request.slug();
    let payload = NewRepo {
        name: name.clone(),
        private: true,
        description: description(&request.project_id, &request.english_name),
    };

    let reply = ctx
        .host
        .create_repo(&request.token, &payload)
        .await
        .map_err(|e| RepodocError::RemoteCreate(e.to_string()))?;

    match reply.status {
        _ if reply.is_success() => Ok(ProvisionOutcome::Created { name }),
        422 => Ok(ProvisionOutcome::AlreadyExists { name }),
        status => Err(RepodocError::RemoteCreate(status_error(&reply, status))),
    }
}

/// Looks the repository up and creates it only when the lookup says it is absent.
///
/// # Errors
///
/// Propagates lookup and creation failures.
pub async fn provision(ctx: &ServiceContext, request: &ProvisionRequest) -> Result<ProvisionOutcome> {
    let name = request.slug();
    info!(owner = %request.owner, repo = %name, "checking repository");

    if repo_exists(ctx, &request.token, &request.owner, &name).await? {
        return Ok(ProvisionOutcome::AlreadyExists { name });
    }

    info!(repo = %name, "repository not found, creating");
    create_repo(ctx, request).await
}

fn status_error(reply: &HostReply, status: u16) -> String {
    let body = reply.body.trim();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {body}")
    }
}
