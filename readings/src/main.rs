//! Command line access to a readings store.
//!
//! Connection settings come from the `MONGODB_*` environment variables.

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use readings::{
    backend::StoreBackendBuilder,
    cli::{self, Cli},
    client::DocumentStoreClient,
    config::ConnectionConfig,
    library::Library,
    logging,
    mongodb::MongoDbStoreBuilder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logging::init()?;

    let config = ConnectionConfig::from_env().context("reading connection settings")?;
    info!(?config, "using document store");

    let backend = MongoDbStoreBuilder::from_config(&config)
        .build()
        .await
        .context("creating document store client")?;
    let library = Library::new(DocumentStoreClient::new(backend));

    let outcome = cli::run(&library, args.command, &mut io::stdout().lock()).await;

    cli::settle(outcome, library.into_client().shutdown().await)
}
