//! `repodoc provision` command.

use crate::context::ServiceContext;
use crate::error::Result;
use crate::provision::{provision, ProvisionRequest};

/// Execute the `provision` command and print the outcome.
///
/// # Errors
///
/// Returns an error if the existence check or the creation call fails.
pub async fn run_with_context(
    ctx: &ServiceContext,
    project_id: &str,
    english_name: &str,
    token: &str,
    owner: &str,
) -> Result<()> {
    let request = ProvisionRequest {
        project_id: project_id.to_string(),
        english_name: english_name.to_string(),
        token: token.to_string(),
        owner: owner.to_string(),
    };
    let outcome = provision(ctx, &request).await?;
    println!("{}", outcome.message());
    Ok(())
}
