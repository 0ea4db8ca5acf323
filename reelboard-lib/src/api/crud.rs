//! CRUD operations on platform resources.
//!
//! Two layers: typed methods over [`Entity`] types for code that knows what
//! it is fetching, and [`Record`] methods keyed by a runtime [`Resource`]
//! for generic screens such as the table view.

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Endpoint;
use crate::DashboardClient;
use crate::error::Error;
use crate::model::Entity;
use crate::model::Film;
use crate::model::NewAdmin;
use crate::model::NewCreator;
use crate::model::NewFilm;
use crate::model::NewPlaylist;
use crate::model::NewUser;
use crate::model::Record;
use crate::model::Resource;
use crate::validation::Validate;

impl DashboardClient {
    // =========================================================================
    // Typed
    // =========================================================================

    /// Lists every record of `T`'s resource.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let films = client.list::<Film>().await?;
    /// ```
    pub async fn list<T: Entity>(&self) -> Result<Vec<T>, Error> {
        Ok(self.call::<Vec<T>>(&Endpoint::list(T::RESOURCE), None).await?.data)
    }

    /// Retrieves one record by id.
    pub async fn get<T: Entity>(&self, id: &str) -> Result<T, Error> {
        Ok(self.call::<T>(&Endpoint::get(T::RESOURCE, id), None).await?.data)
    }

    /// Validates and submits a create payload, returning the created record.
    pub async fn create<T: Entity>(&self, payload: &T::New) -> Result<T, Error> {
        payload.validate()?;
        let body = serde_json::to_value(payload)?;
        Ok(self.call::<T>(&Endpoint::create(T::RESOURCE), Some(&body)).await?.data)
    }

    /// Applies `patch` to the record `id`, returning the updated record.
    pub async fn update<T: Entity>(&self, id: &str, patch: &Record) -> Result<T, Error> {
        let body = patch_body(patch);
        Ok(self.call::<T>(&Endpoint::update(T::RESOURCE, id), Some(&body)).await?.data)
    }

    /// Films uploaded by the signed-in creator.
    pub async fn creator_films(&self) -> Result<Vec<Film>, Error> {
        Ok(self.call::<Vec<Film>>(&Endpoint::creator_films(), None).await?.data)
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Lists every record of `resource` as dynamic records.
    pub async fn list_records(&self, resource: Resource) -> Result<Vec<Record>, Error> {
        let items = self.call::<Vec<Value>>(&Endpoint::list(resource), None).await?.data;
        debug!("Fetched {} {}", items.len(), resource);
        items.into_iter().map(to_record).collect()
    }

    /// Retrieves one record of `resource` by id.
    pub async fn get_record(&self, resource: Resource, id: &str) -> Result<Record, Error> {
        let item = self.call::<Value>(&Endpoint::get(resource, id), None).await?.data;
        to_record(item)
    }

    /// Creates a record of `resource` from raw JSON.
    ///
    /// The JSON is read into the resource's create payload and validated
    /// first, so malformed payloads fail before any request is made.
    pub async fn create_record(&self, resource: Resource, data: Value) -> Result<Record, Error> {
        match resource {
            Resource::Admins => self.create_from_json::<NewAdmin>(resource, data).await,
            Resource::Creators => self.create_from_json::<NewCreator>(resource, data).await,
            Resource::Users => self.create_from_json::<NewUser>(resource, data).await,
            Resource::Films => self.create_from_json::<NewFilm>(resource, data).await,
            Resource::Playlists => self.create_from_json::<NewPlaylist>(resource, data).await,
        }
    }

    /// Applies `patch` to a record of `resource`.
    pub async fn update_record(&self, resource: Resource, id: &str, patch: &Record) -> Result<Record, Error> {
        let body = patch_body(patch);
        let item = self.call::<Value>(&Endpoint::update(resource, id), Some(&body)).await?.data;
        to_record(item)
    }

    /// Deletes a record, returning the server's message if it sent one.
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<Option<String>, Error> {
        let payload = self.call::<Value>(&Endpoint::delete(resource, id), None).await?;
        debug!("Deleted {} {}", resource, id);
        Ok(payload.message)
    }

    async fn create_from_json<P>(&self, resource: Resource, data: Value) -> Result<Record, Error>
    where
        P: DeserializeOwned + Serialize + Validate,
    {
        let payload: P = serde_json::from_value(data)?;
        payload.validate()?;
        let body = serde_json::to_value(&payload)?;
        let item = self.call::<Value>(&Endpoint::create(resource), Some(&body)).await?.data;
        to_record(item)
    }
}

/// Builds a record from an API object, exposing `_id` as `id`.
pub fn to_record(item: Value) -> Result<Record, Error> {
    let mut record = Record::from_json(item)?;
    if !record.contains("id") {
        if let Some(id) = record.remove("_id") {
            record.insert("id", id);
        }
    }
    Ok(record)
}

/// Identifiers travel in the URL, never in the body.
fn patch_body(patch: &Record) -> Value {
    let mut patch = patch.clone();
    patch.remove("id");
    patch.remove("_id");
    patch.to_json()
}
