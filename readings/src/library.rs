//! Typed access to users and their readings.
//!
//! [`Library`] is what the request layer talks to. Each method is a single
//! [`DocumentStoreClient`] call, so every lookup inherits the client's retry behavior.

use bson::oid::ObjectId;
use tracing::debug;

use readings_core::{
    backend::StoreBackend,
    client::DocumentStoreClient,
    document::from_document,
    error::{DocumentStoreError, DocumentStoreResult},
    query::{QuerySpec, SortSpec},
};

use crate::model::{Reading, ReadingView, User};

pub const USERS: &str = "users";
pub const READINGS: &str = "readings";

#[derive(Debug)]
pub struct Library<B: StoreBackend> {
    client: DocumentStoreClient<B>,
}

impl<B: StoreBackend> Library<B> {
    pub fn new(client: DocumentStoreClient<B>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DocumentStoreClient<B> {
        &self.client
    }

    pub fn into_client(self) -> DocumentStoreClient<B> {
        self.client
    }

    /// Looks up the user registered under `email`.
    pub async fn user_by_email(&self, email: &str) -> DocumentStoreResult<Option<User>> {
        self.client
            .find_one(USERS, QuerySpec::new().eq("email", email))
            .await?
            .map(from_document::<User>)
            .transpose()
    }

    /// Looks up a user by the hex identifier stored in their session.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`] if `id` is not a valid ObjectId.
    pub async fn user_by_id(&self, id: &str) -> DocumentStoreResult<Option<User>> {
        let oid = parse_object_id(id)?;

        self.client
            .find_one(USERS, QuerySpec::by_native_id(oid))
            .await?
            .map(from_document::<User>)
            .transpose()
    }

    /// Lists the readings of `user`, newest first.
    pub async fn readings_for(&self, user: &User) -> DocumentStoreResult<Vec<Reading>> {
        debug!(user = %user.id, "retrieving readings");

        self.client
            .find(
                READINGS,
                QuerySpec::new().eq("user_id", user.id.as_str()),
                Some(SortSpec::new().desc("when")),
            )
            .await?
            .into_iter()
            .map(from_document::<Reading>)
            .collect()
    }

    /// Lists the readings of `user` as served to clients, newest first.
    pub async fn views_for(&self, user: &User, base_url: &str) -> DocumentStoreResult<Vec<ReadingView>> {
        Ok(
            self.readings_for(user)
                .await?
                .iter()
                .map(|reading| reading.view(base_url))
                .collect()
        )
    }

    /// Looks up one of `user`'s readings by its hex identifier.
    ///
    /// Readings owned by other users are reported as absent.
    pub async fn reading_for(&self, user: &User, reading_id: &str) -> DocumentStoreResult<Option<Reading>> {
        let oid = parse_object_id(reading_id)?;

        self.client
            .find_one(
                READINGS,
                QuerySpec::new()
                    .eq("user_id", user.id.as_str())
                    .eq("_id", oid),
            )
            .await?
            .map(from_document::<Reading>)
            .transpose()
    }
}

fn parse_object_id(id: &str) -> DocumentStoreResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|e| DocumentStoreError::InvalidDocument(format!("{id:?} is not a valid identifier: {e}")))
}
