use super::{EdgeSource, EdgeStream, RowCursor, VertexSource, VertexStream};
use crate::{
    error::Result,
    types::{VId, VLabel},
};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// A graph stored in a SQLite3 file.
///
/// The file must have the following schema, where `<label>` is the configured
/// label property:
///
/// ```sql
/// CREATE TABLE vertices (vid INT, <label> INT);
/// CREATE TABLE edges (src INT, dst INT);
/// ```
///
/// Every call to [`vertices`](VertexSource::vertices) or
/// [`edges`](EdgeSource::edges) runs its query again.
pub struct SqliteGraph {
    conn: Connection,
    vertices_query: String,
}

impl SqliteGraph {
    pub fn open<P: AsRef<Path>>(path: P, label_property: &str) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self::from_connection(conn, label_property))
    }

    pub fn from_connection(conn: Connection, label_property: &str) -> Self {
        Self {
            conn,
            vertices_query: format!(
                "SELECT vid, {} FROM vertices",
                quote_ident(label_property)
            ),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl VertexSource for SqliteGraph {
    fn vertices(&self) -> Result<Box<dyn VertexStream + '_>> {
        let mut stmt = self.conn.prepare(&self.vertices_query)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, VId>(0)?, row.get::<_, VLabel>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Box::new(RowCursor::new(rows)))
    }
}

impl EdgeSource for SqliteGraph {
    fn edges(&self) -> Result<Box<dyn EdgeStream + '_>> {
        let mut stmt = self.conn.prepare("SELECT src, dst FROM edges")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, VId>(0)?, row.get::<_, VId>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Box::new(RowCursor::new(rows)))
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
