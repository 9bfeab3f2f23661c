use colored::*;

use crate::client::BackendClient;
use crate::error::Result;

/// Comprueba que el backend responde
pub async fn check_health(client: &BackendClient) -> Result<()> {
    let health = client.health().await?;

    println!(
        "{} {} {} at {}",
        health.status.green().bold(),
        health.service,
        health.version,
        client.base_url()
    );

    Ok(())
}
