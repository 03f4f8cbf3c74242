//! In-memory resource store for the movie catalogue.

use rand::Rng;
use thiserror::Error;

use super::models::{demo_movies, Movie};

/// Size of the identifier space drawn from by [`RandomIds`].
pub const ID_SPACE: u32 = 100_000_000;

/// Fresh draws attempted before giving up on finding an unused id.
const MAX_ID_ATTEMPTS: usize = 32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("no unused movie id found after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
}

/// Source of candidate identifiers for newly created movies.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Uniform random integer in `[0, ID_SPACE)`, rendered in decimal.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> String {
        rand::thread_rng().gen_range(0..ID_SPACE).to_string()
    }
}

/// Ordered collection of movies.
///
/// Lookups are linear scans; insertion order is the listing order.
pub struct MovieStore {
    movies: Vec<Movie>,
    ids: Box<dyn IdSource>,
}

impl MovieStore {
    /// Empty store drawing ids from [`RandomIds`]
    pub fn new() -> Self {
        Self::with_ids(RandomIds)
    }

    /// Empty store drawing ids from the given source
    pub fn with_ids(ids: impl IdSource + 'static) -> Self {
        Self {
            movies: Vec::new(),
            ids: Box::new(ids),
        }
    }

    /// Store holding the two demo records
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.seed();
        store
    }

    /// Append the demo records
    pub fn seed(&mut self) {
        for movie in demo_movies() {
            self.append(movie);
        }
    }

    pub fn list(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn find_index(&self, id: &str) -> Option<usize> {
        self.movies.iter().position(|movie| movie.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Movie> {
        self.find_index(id).map(|index| &self.movies[index])
    }

    pub fn append(&mut self, movie: Movie) {
        self.movies.push(movie);
    }

    /// Overwrite the record at `index`, returning the previous one.
    /// Out-of-range indices leave the store untouched.
    pub fn replace_at(&mut self, index: usize, movie: Movie) -> Option<Movie> {
        self.movies
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, movie))
    }

    /// Remove the record at `index`, shifting later records down.
    pub fn remove_at(&mut self, index: usize) -> Option<Movie> {
        (index < self.movies.len()).then(|| self.movies.remove(index))
    }

    /// Draw an id that no record in the store currently uses.
    pub fn issue_id(&self) -> Result<String, StoreError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if self.find_index(&candidate).is_none() {
                return Ok(candidate);
            }
            tracing::debug!(attempt, candidate = %candidate, "movie id collision, drawing again");
        }

        Err(StoreError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

impl Default for MovieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MovieStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieStore")
            .field("movies", &self.movies)
            .finish_non_exhaustive()
    }
}
