use crate::libs::error::{StoreError, StoreResult};
use crate::libs::movie::{Movie, MovieDraft, MovieFilter};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const INSERT_MOVIE: &str = "INSERT INTO movies (title, director, genre, release_year, duration, description, rental_rate, stock_quantity, total_copies, is_available)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8, ?8 > 0)";
const SELECT_MOVIE: &str = "SELECT id, title, director, genre, release_year, duration, description, rental_rate, stock_quantity, total_copies, is_available, is_active, created_at FROM movies";
const UPDATE_MOVIE: &str = "UPDATE movies SET title = ?2, director = ?3, genre = ?4, release_year = ?5, duration = ?6, description = ?7,
    rental_rate = ?8, total_copies = ?9, stock_quantity = ?10, is_available = (is_active AND ?10 > 0) WHERE id = ?1";
const ADJUST_STOCK: &str = "UPDATE movies SET stock_quantity = stock_quantity + ?2, is_available = (is_active AND stock_quantity + ?2 > 0) WHERE id = ?1";
const UPDATE_ACTIVE: &str = "UPDATE movies SET is_active = ?2, is_available = (?2 AND stock_quantity > 0) WHERE id = ?1";
const COUNT_OPEN_RENTALS: &str = "SELECT COUNT(*) FROM rentals WHERE movie_id = ?1 AND return_date IS NULL";
const SELECT_GENRES: &str = "SELECT DISTINCT genre FROM movies WHERE genre IS NOT NULL AND is_active = 1 ORDER BY genre";

fn movie_from_row(row: &Row) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        director: row.get(2)?,
        genre: row.get(3)?,
        release_year: row.get(4)?,
        duration_minutes: row.get(5)?,
        description: row.get(6)?,
        rental_rate: row.get(7)?,
        stock: row.get(8)?,
        total_copies: row.get(9)?,
        is_available: row.get(10)?,
        is_active: row.get(11)?,
        created_at: row.get(12)?,
    })
}

pub struct Movies<'a> {
    conn: &'a Connection,
}

impl<'a> Movies<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a movie with every copy in stock.
    pub fn insert(&self, draft: &MovieDraft) -> StoreResult<i64> {
        self.conn.execute(
            INSERT_MOVIE,
            params![
                draft.title,
                draft.director,
                draft.genre,
                draft.release_year,
                draft.duration_minutes,
                draft.description,
                draft.rental_rate,
                draft.total_copies
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(movie_id = id, title = %draft.title, copies = draft.total_copies, "movie inserted");
        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Movie>> {
        let sql = format!("{} WHERE id = ?1", SELECT_MOVIE);
        Ok(self.conn.query_row(&sql, params![id], movie_from_row).optional()?)
    }

    pub fn search(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(title) = filter.title.as_deref().filter(|t| !t.trim().is_empty()) {
            clauses.push("title LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(title)));
        }
        if let Some(genre) = filter.genre.as_deref().filter(|g| !g.trim().is_empty()) {
            clauses.push("genre = ? COLLATE NOCASE");
            values.push(Value::Text(genre.trim().to_string()));
        }
        if let Some(director) = filter.director.as_deref().filter(|d| !d.trim().is_empty()) {
            clauses.push("director LIKE ? ESCAPE '\\'");
            values.push(Value::Text(like_pattern(director)));
        }
        if let Some(year) = filter.release_year {
            clauses.push("release_year = ?");
            values.push(Value::Integer(i64::from(year)));
        }
        if let Some(min) = filter.min_rate {
            clauses.push("rental_rate >= ?");
            values.push(Value::Integer(min.cents()));
        }
        if let Some(max) = filter.max_rate {
            clauses.push("rental_rate <= ?");
            values.push(Value::Integer(max.cents()));
        }
        if filter.available_only {
            clauses.push("is_available = 1 AND stock_quantity > 0");
        }
        if !filter.include_retired {
            clauses.push("is_active = 1");
        }

        let mut sql = SELECT_MOVIE.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY title COLLATE NOCASE, id");

        let mut stmt = self.conn.prepare(&sql)?;
        let movie_iter = stmt.query_map(params_from_iter(values.iter()), movie_from_row)?;

        let mut movies = Vec::new();
        for movie in movie_iter {
            movies.push(movie?);
        }
        Ok(movies)
    }

    pub fn update(&self, id: i64, draft: &MovieDraft, stock: i64) -> StoreResult<()> {
        let affected = self.conn.execute(
            UPDATE_MOVIE,
            params![
                id,
                draft.title,
                draft.director,
                draft.genre,
                draft.release_year,
                draft.duration_minutes,
                draft.description,
                draft.rental_rate,
                draft.total_copies,
                stock
            ],
        )?;
        if affected == 0 {
            return Err(StoreError::not_found("Movie", id));
        }
        tracing::info!(movie_id = id, stock, "movie updated");
        Ok(())
    }

    /// Moves stock by `delta` and recomputes availability.
    pub fn adjust_stock(&self, id: i64, delta: i64) -> StoreResult<()> {
        let affected = self.conn.execute(ADJUST_STOCK, params![id, delta])?;
        if affected == 0 {
            return Err(StoreError::not_found("Movie", id));
        }
        tracing::debug!(movie_id = id, delta, "movie stock adjusted");
        Ok(())
    }

    pub fn set_active(&self, id: i64, active: bool) -> StoreResult<()> {
        let affected = self.conn.execute(UPDATE_ACTIVE, params![id, active])?;
        if affected == 0 {
            return Err(StoreError::not_found("Movie", id));
        }
        tracing::info!(movie_id = id, active, "movie activation changed");
        Ok(())
    }

    pub fn open_rental_count(&self, id: i64) -> StoreResult<i64> {
        Ok(self.conn.query_row(COUNT_OPEN_RENTALS, params![id], |row| row.get(0))?)
    }

    pub fn genres(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_GENRES)?;
        let genres = stmt.query_map([], |row| row.get(0))?.collect::<Result<Vec<String>, _>>()?;
        Ok(genres)
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term.trim().replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{}%", escaped)
}
