use crate::db::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::StoreError;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "timecard.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the application data directory, applying any
    /// pending migrations.
    pub fn new() -> Result<Db, StoreError> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db, StoreError> {
        let mut conn = Connection::open(path)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Raw connection with the schema untouched.
    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
        Ok(Connection::open(path)?)
    }
}
