//! The `readings` command line.
//!
//! Command output goes to the writer handed to [`run`]; logs go to stderr, so the JSON
//! printed by `user` and `list` can be piped straight into other tools.

use std::io::Write;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use readings_core::{backend::StoreBackend, error::DocumentStoreResult};

use crate::{library::Library, model::User};

#[derive(Debug, Parser)]
#[command(name = "readings", version, about = "Read article tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a user's record, password masked
    User {
        #[arg(long)]
        email: String,
    },
    /// Print a user's readings as JSON, newest first
    List {
        #[arg(long)]
        email: String,
        /// Root URL canonical reading links are built under
        #[arg(long, env = "READINGS_BASE_URL", default_value = "http://localhost:8000")]
        base_url: String,
    },
    /// Print the external link of one reading
    Show {
        #[arg(long)]
        email: String,
        #[arg(long)]
        reading: String,
    },
}

async fn require_user<B: StoreBackend>(library: &Library<B>, email: &str) -> anyhow::Result<User> {
    match library.user_by_email(email).await? {
        Some(user) => {
            info!(user = ?user.scrubbed(), "found user information");
            Ok(user)
        }
        None => bail!("no user registered as {email}"),
    }
}

/// Executes `command` against `library`, writing its output to `out`.
pub async fn run<B, W>(library: &Library<B>, command: Command, out: &mut W) -> anyhow::Result<()>
where
    B: StoreBackend,
    W: Write,
{
    match command {
        Command::User { email } => {
            let user = require_user(library, &email).await?;
            serde_json::to_writer_pretty(&mut *out, &user.scrubbed())?;
            writeln!(out)?;
        }
        Command::List { email, base_url } => {
            let user = require_user(library, &email).await?;
            let views = library.views_for(&user, &base_url).await?;
            serde_json::to_writer_pretty(&mut *out, &views)?;
            writeln!(out)?;
        }
        Command::Show { email, reading } => {
            let user = require_user(library, &email).await?;
            match library.reading_for(&user, &reading).await? {
                Some(reading) => writeln!(out, "{}", reading.link)?,
                None => bail!("no reading {reading} for {email}"),
            }
        }
    }

    Ok(())
}

/// Combines a command's outcome with the result of shutting down the store.
///
/// The command's own error takes precedence; a failed shutdown is only logged.
pub fn settle(outcome: anyhow::Result<()>, shutdown: DocumentStoreResult<()>) -> anyhow::Result<()> {
    if let Err(e) = shutdown {
        warn!(error = %e, "failed to shut down document store client");
    }

    outcome
}

#[cfg(test)]
mod tests {
    use bson::{DateTime, doc};
    use readings_core::{client::DocumentStoreClient, error::DocumentStoreError};
    use readings_memory::InMemoryStore;
    use serde_json::Value;

    use super::*;
    use crate::{
        library::{READINGS, USERS},
        model::ReadingView,
    };

    async fn library() -> (Library<InMemoryStore>, String) {
        let store = InMemoryStore::new();
        let user_id = store
            .insert(USERS, doc! { "email": "a@example.com", "password": "secret" })
            .await
            .unwrap()
            .as_object_id()
            .unwrap()
            .to_hex();
        let reading_id = store
            .insert(READINGS, doc! {
                "user_id": user_id.as_str(),
                "title": "old",
                "link": "https://example.com/old",
                "when": DateTime::from_millis(1_000),
            })
            .await
            .unwrap()
            .as_object_id()
            .unwrap()
            .to_hex();
        store
            .insert(READINGS, doc! {
                "user_id": user_id.as_str(),
                "title": "new",
                "link": "https://example.com/new",
                "when": DateTime::from_millis(2_000),
            })
            .await
            .unwrap();

        (Library::new(DocumentStoreClient::new(store)), reading_id)
    }

    async fn output(library: &Library<InMemoryStore>, command: Command) -> String {
        let mut out = Vec::new();
        run(library, command, &mut out).await.unwrap();

        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn user_prints_only_json() {
        let (library, _) = library().await;

        let printed = output(&library, Command::User { email: "a@example.com".into() }).await;
        let user: Value = serde_json::from_str(&printed).unwrap();

        assert_eq!(user["email"], "a@example.com");
        assert_eq!(user["password"], "******");
        assert!(user.get("_id").is_none());
    }

    #[tokio::test]
    async fn list_prints_only_json() {
        let (library, _) = library().await;

        let printed = output(&library, Command::List {
            email: "a@example.com".into(),
            base_url: "https://readings.example.com/".into(),
        })
        .await;
        let views: Vec<ReadingView> = serde_json::from_str(&printed).unwrap();

        let titles = views.iter().map(|view| view.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["new", "old"]);
        assert!(views[0].link.starts_with("https://readings.example.com/"));
    }

    #[tokio::test]
    async fn show_prints_the_external_link() {
        let (library, reading_id) = library().await;

        let printed = output(&library, Command::Show {
            email: "a@example.com".into(),
            reading: reading_id,
        })
        .await;

        assert_eq!(printed, "https://example.com/old\n");
    }

    #[tokio::test]
    async fn unknown_user_is_an_error_with_no_output() {
        let (library, _) = library().await;
        let mut out = Vec::new();

        let err = run(&library, Command::User { email: "nobody@example.com".into() }, &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("nobody@example.com"));
        assert!(out.is_empty());
    }

    #[test]
    fn parses_list_arguments() {
        let cli = Cli::try_parse_from([
            "readings", "list", "--email", "a@example.com", "--base-url", "https://r.example.com",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::List { ref email, ref base_url }
                if email == "a@example.com" && base_url == "https://r.example.com"
        ));
    }

    #[test]
    fn failed_shutdown_does_not_mask_the_command_error() {
        let lost = || Err(DocumentStoreError::ConnectionLost("connection closed".into()));

        let err = settle(Err(anyhow::anyhow!("no user registered as x")), lost()).unwrap_err();
        assert_eq!(err.to_string(), "no user registered as x");

        assert!(settle(Ok(()), lost()).is_ok());
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
