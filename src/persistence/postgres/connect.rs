use super::schema::{Events, Hands, PrivateCards, Schema, ScheduledTasks, Tables};
use std::sync::Arc;
use tokio_postgres::Client;

/// connects, migrates, and returns the client.
pub async fn connect(database_url: &str) -> Result<Arc<Client>, tokio_postgres::Error> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(database_url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("postgres connection closed: {}", e);
        }
    });
    migrate(&client).await?;
    Ok(Arc::new(client))
}

async fn migrate(client: &Client) -> Result<(), tokio_postgres::Error> {
    client.batch_execute(Tables::creates()).await?;
    client.batch_execute(Tables::indices()).await?;
    client.batch_execute(Events::creates()).await?;
    client.batch_execute(Events::indices()).await?;
    client.batch_execute(PrivateCards::creates()).await?;
    client.batch_execute(PrivateCards::indices()).await?;
    client.batch_execute(Hands::creates()).await?;
    client.batch_execute(Hands::indices()).await?;
    client.batch_execute(ScheduledTasks::creates()).await?;
    client.batch_execute(ScheduledTasks::indices()).await?;
    Ok(())
}
