// GitHub Actions step: push build information to Octopus Deploy
//
// Reads `INPUT_*` variables and the runner's GITHUB_* context, then pushes one
// build information record for the current workflow run.

use anyhow::{Context, Result};
use log::LevelFilter;
use push_build_information::{
    BuildInformationPublisher, BuildInformationRepository, GitHubClient, GitHubContext,
    InputParameters, OctopusClient, runner_debug,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(runner_debug(|key| std::env::var(key).ok()));
    let context = GitHubContext::from_env().context("Failed to read GitHub context")?;

    let parameters = InputParameters::from_env().context("Failed to read inputs")?;
    log::debug!("Inputs: {parameters:?}");

    let mut github = GitHubClient::builder().server_url(&context.server_url);
    if let Some(token) = &parameters.github_token {
        github = github.personal_token(token.clone());
    }
    let github = github.build().context("Failed to create GitHub client")?;

    let octopus = OctopusClient::builder()
        .server_url(&parameters.server)
        .credentials(parameters.credentials.clone())
        .build()
        .context("Failed to create Octopus client")?;

    let run_id = context.run_id;
    let publisher =
        BuildInformationPublisher::new(context, github, BuildInformationRepository::new(octopus));

    publisher
        .publish(&parameters, run_id)
        .await
        .context("Failed to push build information")?;

    Ok(())
}

fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("push_build_information", level)
        .parse_default_env()
        .init();
}
