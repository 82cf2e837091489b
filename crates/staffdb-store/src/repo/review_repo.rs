//! Review mapper
//!
//! Maps `Review` objects to the `reviews` table. Hydrated objects are shared
//! through the caller's `IdentityMap<Review>`, so a row read twice yields the
//! same handle with refreshed fields.

use rusqlite::{Connection, OptionalExtension, Row};
use staffdb_core::errors::{ExError, StaffError};
use staffdb_core::model::{Review, ReviewRow};
use staffdb_core::ops::{new_handle, Handle, IdentityMap};
use staffdb_core_types::schema::TABLE_REVIEWS;

use crate::errors::{sqlite_error, Result};
use crate::lookup::SqliteLookup;
use crate::repo::{read, write};
use crate::schema;

/// SQLite mapper for reviews
pub struct ReviewRepo;

impl ReviewRepo {
    /// Create the `reviews` table if it does not exist
    ///
    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn create_table(conn: &Connection) -> Result<()> {
        schema::ensure_table(conn, TABLE_REVIEWS, schema::CREATE_REVIEWS)
    }

    /// Drop the `reviews` table if it exists
    ///
    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn drop_table(conn: &Connection) -> Result<()> {
        schema::drop_table(conn, TABLE_REVIEWS)
    }

    /// Insert a transient review and register it in the identity map
    ///
    /// On success the generated primary key is written back into the review.
    /// A failed insert leaves the id unset.
    ///
    /// # Errors
    /// * `AlreadyPersisted` - the review already has an id; nothing is inserted
    /// * `Internal` - the object is already borrowed; nothing is inserted
    /// * `Persistence` - the insert failed (e.g. foreign key violation)
    pub fn save(
        conn: &Connection,
        cache: &mut IdentityMap<Review>,
        review: &Handle<Review>,
    ) -> Result<i64> {
        let mut current = write(review, "save", TABLE_REVIEWS)?;
        if let Some(id) = current.id() {
            return Err(StaffError::AlreadyPersisted {
                table: TABLE_REVIEWS.to_string(),
                id,
            }
            .into());
        }

        conn.execute(
            "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3)",
            rusqlite::params![current.year(), current.summary(), current.employee_id()],
        )
        .map_err(sqlite_error("save", TABLE_REVIEWS))?;
        let id = conn.last_insert_rowid();

        current.mark_persisted(id);
        cache.insert(id, review.clone());
        tracing::debug!(review_id = id, "review inserted");

        Ok(id)
    }

    /// Validate, construct and save a review in one step
    ///
    /// The employee reference is checked against the `employees` table.
    ///
    /// # Errors
    /// Any validation error from the constructor, then the errors of `save`.
    pub fn create(
        conn: &Connection,
        cache: &mut IdentityMap<Review>,
        year: i64,
        summary: impl Into<String>,
        employee_id: i64,
    ) -> Result<Handle<Review>> {
        let review = Review::new(year, summary, employee_id, &SqliteLookup::new(conn))?;
        let handle = new_handle(review);
        Self::save(conn, cache, &handle)?;
        Ok(handle)
    }

    /// Find-or-update hydration
    ///
    /// If the identity map already holds the row's id, that object is refreshed
    /// in place and returned. Otherwise a new object is built and registered.
    /// The map is keyed by the row's `id` column.
    ///
    /// # Errors
    /// A validation error if the row holds invalid values, or `Internal` if
    /// the cached object is already borrowed.
    pub fn instance_from_db(
        cache: &mut IdentityMap<Review>,
        row: &ReviewRow,
    ) -> Result<Handle<Review>> {
        if let Some(handle) = cache.get(row.id) {
            write(&handle, "instance_from_db", TABLE_REVIEWS)?.refresh_from(row)?;
            return Ok(handle);
        }

        let handle = new_handle(Review::hydrate(row)?);
        cache.insert(row.id, handle.clone());
        Ok(handle)
    }

    /// Fetch the raw row for a primary key without touching the identity map
    ///
    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn find_row_by_id(conn: &Connection, id: i64) -> Result<Option<ReviewRow>> {
        conn.query_row(
            "SELECT id, year, summary, employee_id FROM reviews WHERE id = ?1",
            [id],
            review_row,
        )
        .optional()
        .map_err(sqlite_error("find_by_id", TABLE_REVIEWS))
    }

    /// Fetch a review by primary key, hydrated through the identity map
    ///
    /// # Errors
    /// `Persistence` if the statement fails. Validation errors as for
    /// `instance_from_db`.
    pub fn find_by_id(
        conn: &Connection,
        cache: &mut IdentityMap<Review>,
        id: i64,
    ) -> Result<Option<Handle<Review>>> {
        Self::find_row_by_id(conn, id)?
            .map(|row| Self::instance_from_db(cache, &row))
            .transpose()
    }

    /// Write the review's current fields to its row
    ///
    /// # Errors
    /// * `NotPersisted` - the review has no id
    /// * `Persistence` - the update failed
    pub fn update(conn: &Connection, review: &Handle<Review>) -> Result<()> {
        let current = read(review, "update", TABLE_REVIEWS)?;
        let id = current.id().ok_or_else(|| {
            ExError::from(StaffError::NotPersisted {
                table: TABLE_REVIEWS.to_string(),
            })
            .with_op("update")
        })?;

        let changed = conn
            .execute(
                "UPDATE reviews SET year = ?1, summary = ?2, employee_id = ?3 WHERE id = ?4",
                rusqlite::params![current.year(), current.summary(), current.employee_id(), id],
            )
            .map_err(sqlite_error("update", TABLE_REVIEWS))?;
        tracing::debug!(review_id = id, changed, "review updated");

        Ok(())
    }

    /// Delete the review's row and detach the object
    ///
    /// The entry is removed from the identity map and the id reset, so the
    /// object can be saved again as a new row. Transient reviews are ignored.
    ///
    /// # Errors
    /// * `Internal` - the object is already borrowed; nothing is deleted
    /// * `Persistence` - the delete failed
    pub fn delete(
        conn: &Connection,
        cache: &mut IdentityMap<Review>,
        review: &Handle<Review>,
    ) -> Result<()> {
        let mut current = write(review, "delete", TABLE_REVIEWS)?;
        let Some(id) = current.id() else {
            return Ok(());
        };

        conn.execute("DELETE FROM reviews WHERE id = ?1", [id])
            .map_err(sqlite_error("delete", TABLE_REVIEWS))?;

        cache.remove(id);
        current.mark_detached();
        tracing::debug!(review_id = id, "review deleted");

        Ok(())
    }

    /// Every review, hydrated through the identity map, in table-scan order
    ///
    /// # Errors
    /// `Persistence` if the statement fails. Validation errors as for
    /// `instance_from_db`.
    pub fn get_all(
        conn: &Connection,
        cache: &mut IdentityMap<Review>,
    ) -> Result<Vec<Handle<Review>>> {
        let rows = query_rows(
            conn,
            "get_all",
            "SELECT id, year, summary, employee_id FROM reviews",
            [],
        )?;
        rows.iter()
            .map(|row| Self::instance_from_db(cache, row))
            .collect()
    }

    /// Reviews filed against one employee, hydrated through the identity map
    ///
    /// # Errors
    /// `Persistence` if the statement fails.
    pub fn for_employee(
        conn: &Connection,
        cache: &mut IdentityMap<Review>,
        employee_id: i64,
    ) -> Result<Vec<Handle<Review>>> {
        let rows = query_rows(
            conn,
            "for_employee",
            "SELECT id, year, summary, employee_id FROM reviews WHERE employee_id = ?1",
            [employee_id],
        )?;
        rows.iter()
            .map(|row| Self::instance_from_db(cache, row))
            .collect()
    }
}

fn review_row(row: &Row<'_>) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        id: row.get(0)?,
        year: row.get(1)?,
        summary: row.get(2)?,
        employee_id: row.get(3)?,
    })
}

fn query_rows<P: rusqlite::Params>(
    conn: &Connection,
    op: &'static str,
    sql: &str,
    params: P,
) -> Result<Vec<ReviewRow>> {
    let mut stmt = conn.prepare(sql).map_err(sqlite_error(op, TABLE_REVIEWS))?;
    let rows = stmt
        .query_map(params, review_row)
        .map_err(sqlite_error(op, TABLE_REVIEWS))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sqlite_error(op, TABLE_REVIEWS))?;
    Ok(rows)
}
