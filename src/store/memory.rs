//! In-memory implementations of both store traits.
//!
//! Plain collections with the same matching semantics as the real backends,
//! plus an outage switch. Handles are cheap clones sharing state, so a test
//! can keep one and flip it into a simulated failure while the served
//! gateway holds another.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{DocumentStore, GraphStore, StoreError, SEARCH_CAP};
use crate::model::{
    GraphMovie, GraphPerson, MovieRecord, MovieReviewers, RatedMovie, RaterProfile, ReviewEdge,
    Reviewer, UpdateOutcome,
};

fn contains_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn equals_insensitive(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Document store over a vector of records in insertion order.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    movies: Arc<RwLock<Vec<MovieRecord>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryDocumentStore {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self {
            movies: Arc::new(RwLock::new(movies)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flip the store into (or out of) a simulated outage; every operation
    /// fails while set.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_up(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Query(
                "document store unreachable (simulated outage)".to_string(),
            ));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<MovieRecord>>, StoreError> {
        self.movies
            .read()
            .map_err(|_| StoreError::Query("document store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<MovieRecord>>, StoreError> {
        self.movies
            .write()
            .map_err(|_| StoreError::Query("document store lock poisoned".to_string()))
    }
}

/// Apply a partial merge the way the real store's `$set` does. Fields
/// outside the projected schema are ignored; here the projection is the
/// whole schema.
fn merge_fields(
    record: &MovieRecord,
    fields: &Map<String, Value>,
) -> Result<MovieRecord, StoreError> {
    let mut value =
        serde_json::to_value(record).map_err(|e| StoreError::Query(e.to_string()))?;
    if let Value::Object(object) = &mut value {
        for (key, field) in fields {
            object.insert(key.clone(), field.clone());
        }
    }
    serde_json::from_value(value).map_err(|e| StoreError::Query(e.to_string()))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_page(
        &self,
        skip: u64,
        limit: i64,
    ) -> Result<(Vec<MovieRecord>, u64), StoreError> {
        self.check_up()?;
        let movies = self.read()?;
        let total = movies.len() as u64;
        let page = movies
            .iter()
            .skip(skip as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn search(
        &self,
        title_fragment: Option<&str>,
        cast_fragment: Option<&str>,
    ) -> Result<Vec<MovieRecord>, StoreError> {
        self.check_up()?;
        let movies = self.read()?;
        let mut found = Vec::new();
        for movie in movies.iter() {
            let title_ok = title_fragment.map_or(true, |fragment| {
                movie
                    .title
                    .as_deref()
                    .map_or(false, |title| contains_insensitive(title, fragment))
            });
            let cast_ok = cast_fragment.map_or(true, |fragment| {
                movie
                    .cast
                    .iter()
                    .any(|member| contains_insensitive(member, fragment))
            });
            if title_ok && cast_ok {
                found.push(movie.clone());
                if found.len() as i64 == SEARCH_CAP {
                    break;
                }
            }
        }
        Ok(found)
    }

    async fn update_by_title(
        &self,
        title: &str,
        fields: &Map<String, Value>,
    ) -> Result<UpdateOutcome, StoreError> {
        self.check_up()?;
        let mut movies = self.write()?;
        let mut outcome = UpdateOutcome {
            matched: 0,
            modified: 0,
        };
        for movie in movies.iter_mut() {
            let matches = movie
                .title
                .as_deref()
                .map_or(false, |stored| equals_insensitive(stored, title));
            if !matches {
                continue;
            }
            outcome.matched += 1;
            let merged = merge_fields(movie, fields)?;
            if merged != *movie {
                *movie = merged;
                outcome.modified += 1;
            }
        }
        Ok(outcome)
    }

    async fn sample_titles(&self, cap: usize) -> Result<HashSet<String>, StoreError> {
        self.check_up()?;
        let movies = self.read()?;
        Ok(movies
            .iter()
            .take(cap)
            .filter_map(|movie| movie.title.clone())
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_up()
    }
}

/// Graph store over node and edge vectors in insertion order.
#[derive(Clone, Default)]
pub struct MemoryGraphStore {
    movies: Arc<RwLock<Vec<GraphMovie>>>,
    people: Arc<RwLock<Vec<GraphPerson>>>,
    reviews: Arc<RwLock<Vec<ReviewEdge>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryGraphStore {
    pub fn new(movies: Vec<GraphMovie>, people: Vec<GraphPerson>, reviews: Vec<ReviewEdge>) -> Self {
        Self {
            movies: Arc::new(RwLock::new(movies)),
            people: Arc::new(RwLock::new(people)),
            reviews: Arc::new(RwLock::new(reviews)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flip the store into (or out of) a simulated outage.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_up(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Query(
                "graph store unreachable (simulated outage)".to_string(),
            ));
        }
        Ok(())
    }

    fn read<'a, T>(lock: &'a RwLock<Vec<T>>) -> Result<RwLockReadGuard<'a, Vec<T>>, StoreError> {
        lock.read()
            .map_err(|_| StoreError::Query("graph store lock poisoned".to_string()))
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn reviewers_of(
        &self,
        title_fragment: &str,
    ) -> Result<Option<MovieReviewers>, StoreError> {
        self.check_up()?;
        let movies = Self::read(&self.movies)?;
        let reviews = Self::read(&self.reviews)?;

        // First matching movie only; reviewers of other matches are never
        // merged in.
        let movie = match movies
            .iter()
            .find(|movie| contains_insensitive(&movie.title, title_fragment))
        {
            Some(movie) => movie,
            None => return Ok(None),
        };
        let reviewers = reviews
            .iter()
            .filter(|edge| edge.movie == movie.title)
            .map(|edge| Reviewer {
                name: edge.person.clone(),
                rating: edge.rating,
                summary: edge.summary.clone(),
            })
            .collect();
        Ok(Some(MovieReviewers {
            movie: movie.title.clone(),
            reviewers,
        }))
    }

    async fn movies_rated_by(
        &self,
        name_fragment: &str,
    ) -> Result<Option<RaterProfile>, StoreError> {
        self.check_up()?;
        let movies = Self::read(&self.movies)?;
        let people = Self::read(&self.people)?;
        let reviews = Self::read(&self.reviews)?;

        let person = match people
            .iter()
            .find(|person| contains_insensitive(&person.name, name_fragment))
        {
            Some(person) => person,
            None => return Ok(None),
        };
        let mut distinct = HashSet::new();
        let mut rated_movies = Vec::new();
        for edge in reviews.iter().filter(|edge| edge.person == person.name) {
            distinct.insert(edge.movie.clone());
            let released = movies
                .iter()
                .find(|movie| movie.title == edge.movie)
                .and_then(|movie| movie.released);
            rated_movies.push(RatedMovie {
                title: edge.movie.clone(),
                released,
                rating: edge.rating,
                summary: edge.summary.clone(),
            });
        }
        Ok(Some(RaterProfile {
            name: person.name.clone(),
            born: person.born,
            rated_count: distinct.len() as i64,
            rated_movies,
        }))
    }

    async fn sample_titles(&self, cap: usize) -> Result<HashSet<String>, StoreError> {
        self.check_up()?;
        let movies = Self::read(&self.movies)?;
        let mut titles = HashSet::new();
        for movie in movies.iter() {
            if titles.len() >= cap {
                break;
            }
            titles.insert(movie.title.clone());
        }
        Ok(titles)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_up()
    }
}
