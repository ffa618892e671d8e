use contribstat::gitlab::GitLabClient;

use crate::config::Config;

/// Projects requested per page.
const PAGE_SIZE: u32 = 100;

pub(crate) async fn handle_projects(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let gitlab_url = config
        .gitlab_url()
        .ok_or("CONTRIBSTAT_GITLAB_URL must be set in environment, .env file, or config file")?;
    let gitlab_token = config
        .gitlab_token()
        .ok_or("CONTRIBSTAT_GITLAB_TOKEN must be set in environment, .env file, or config file")?;

    let client = GitLabClient::new(&gitlab_url, &gitlab_token, &config.gitlab.api_version)?;

    let mut page = 1u32;
    let mut total = 0usize;
    println!("{:>10}  {:<32}  {}", "ID", "NAME", "PATH");
    loop {
        let projects = client.list_projects_page(page, PAGE_SIZE).await?;
        if projects.is_empty() {
            break;
        }
        total += projects.len();
        for project in &projects {
            println!(
                "{:>10}  {:<32}  {}",
                project.id, project.name, project.path_with_namespace
            );
        }
        if projects.len() < PAGE_SIZE as usize {
            break;
        }
        page += 1;
    }

    tracing::info!(total, "Listed projects");
    Ok(())
}
