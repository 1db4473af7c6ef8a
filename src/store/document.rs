//! Document-store client backed by MongoDB.
//!
//! Stateless beyond the driver's pooled connection handle; every operation
//! checks a session out of the pool and returns it on all exit paths,
//! including errors.

use std::collections::HashSet;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use super::{DocumentStore, StoreError, SEARCH_CAP};
use crate::config::GatewayConfig;
use crate::model::{MovieRecord, UpdateOutcome};
use crate::normalize;

/// Client for the movie catalog collection.
pub struct MongoMovieStore {
    client: Client,
    movies: Collection<MovieRecord>,
}

#[derive(Deserialize)]
struct TitleOnly {
    title: Option<String>,
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

impl MongoMovieStore {
    /// Connect to the database named by the configuration.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.mongo_uri)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;
        let movies = client.database(&config.mongo_db).collection("movies");
        info!(db = %config.mongo_db, "connected to document store");
        Ok(Self { client, movies })
    }

    /// The fixed read projection: catalog fields only, the store's identity
    /// field suppressed.
    fn projection() -> Document {
        doc! {
            "title": 1,
            "year": 1,
            "genres": 1,
            "directors": 1,
            "cast": 1,
            "plot": 1,
            "rating": 1,
            "_id": 0,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoMovieStore {
    async fn list_page(
        &self,
        skip: u64,
        limit: i64,
    ) -> Result<(Vec<MovieRecord>, u64), StoreError> {
        let total = self.movies.count_documents(doc! {}).await?;
        let mut cursor = self
            .movies
            .find(doc! {})
            .projection(Self::projection())
            .skip(skip)
            .limit(limit)
            .await?;
        let mut records = Vec::new();
        while let Some(record) = cursor.try_next().await? {
            records.push(record);
        }
        Ok((records, total))
    }

    async fn search(
        &self,
        title_fragment: Option<&str>,
        cast_fragment: Option<&str>,
    ) -> Result<Vec<MovieRecord>, StoreError> {
        let mut filter = doc! {};
        if let Some(fragment) = title_fragment {
            filter.insert(
                "title",
                doc! { "$regex": normalize::document_substring(fragment), "$options": "i" },
            );
        }
        if let Some(fragment) = cast_fragment {
            filter.insert(
                "cast",
                doc! { "$regex": normalize::document_substring(fragment), "$options": "i" },
            );
        }
        let mut cursor = self
            .movies
            .find(filter)
            .projection(Self::projection())
            .limit(SEARCH_CAP)
            .await?;
        let mut records = Vec::new();
        while let Some(record) = cursor.try_next().await? {
            records.push(record);
        }
        Ok(records)
    }

    async fn update_by_title(
        &self,
        title: &str,
        fields: &Map<String, Value>,
    ) -> Result<UpdateOutcome, StoreError> {
        let filter = doc! {
            "title": { "$regex": normalize::document_exact(title), "$options": "i" }
        };
        let set = mongodb::bson::to_document(fields).map_err(|e| StoreError::Query(e.to_string()))?;
        let result = self.movies.update_many(filter, doc! { "$set": set }).await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn sample_titles(&self, cap: usize) -> Result<HashSet<String>, StoreError> {
        let titles_only = self.movies.clone_with_type::<TitleOnly>();
        let mut cursor = titles_only
            .find(doc! {})
            .projection(doc! { "title": 1, "_id": 0 })
            .limit(cap as i64)
            .await?;
        let mut titles = HashSet::new();
        while let Some(row) = cursor.try_next().await? {
            if let Some(title) = row.title {
                titles.insert(title);
            }
        }
        Ok(titles)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
