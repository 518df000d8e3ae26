//! Space lookup by name.

use crate::octopus::client::OctopusClient;
use crate::octopus::error::{OctopusError, OctopusResult};
use log::debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpaceCollection {
    #[serde(default)]
    items: Vec<SpaceResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpaceResource {
    id: String,
    name: String,
}

/// Resolve a space name to its id (e.g. `Default` -> `Spaces-1`).
///
/// The server filters by partial name; the match here is exact, ignoring case.
pub async fn resolve_space_id(client: &OctopusClient, space_name: &str) -> OctopusResult<String> {
    let space_name = space_name.trim();
    if space_name.is_empty() {
        return Err(OctopusError::InvalidInput("space name is required".to_string()));
    }

    let path = format!(
        "/api/spaces?partialName={}&skip=0&take={}",
        urlencoding::encode(space_name),
        i32::MAX
    );
    let spaces: SpaceCollection = client.get_json(&path).await?;

    let space = spaces
        .items
        .into_iter()
        .find(|space| space.name.eq_ignore_ascii_case(space_name))
        .ok_or_else(|| OctopusError::SpaceNotFound(space_name.to_string()))?;

    debug!("Resolved space '{}' to {}", space.name, space.id);
    Ok(space.id)
}
