use crate::report::{flatten_graph, GraphRecord};
use hyperlinks_crawler::LinkGraph;
use rusqlite::{Connection, OptionalExtension, Result, params};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Document store for completed crawls: one session row per invocation and
/// one record per URL with its incoming/outgoing lists as JSON.
pub struct GraphStore {
    conn: Connection,
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

impl GraphStore {
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        let store = GraphStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS crawl_sessions (
                id TEXT PRIMARY KEY,
                started_at INTEGER NOT NULL,
                finished_at INTEGER,
                start_url TEXT NOT NULL,
                visit_limit INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                url TEXT NOT NULL,
                incoming TEXT NOT NULL,  -- JSON array
                outgoing TEXT NOT NULL,  -- JSON array
                FOREIGN KEY(session_id) REFERENCES crawl_sessions(id) ON DELETE CASCADE,
                UNIQUE(session_id, url)
            );

            CREATE INDEX IF NOT EXISTS idx_pages_session ON pages(session_id);
            CREATE INDEX IF NOT EXISTS idx_pages_url ON pages(session_id, url);
            ",
        )?;
        Ok(())
    }

    pub fn create_session(&self, start_url: &str, visit_limit: usize) -> Result<String> {
        let session_id = uuid::Uuid::new_v4().to_string();

        self.conn.execute(
            "INSERT INTO crawl_sessions (id, started_at, start_url, visit_limit)
             VALUES (?1, ?2, ?3, ?4)",
            params![&session_id, current_timestamp(), start_url, visit_limit as i64],
        )?;

        Ok(session_id)
    }

    pub fn complete_session(&self, session_id: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE crawl_sessions SET finished_at = ?1 WHERE id = ?2",
            params![current_timestamp(), session_id],
        )?;
        Ok(())
    }

    /// Insert one record per URL of the graph. Returns the number of
    /// records written.
    pub fn write_graph(&self, session_id: &str, graph: &LinkGraph) -> Result<usize> {
        let records = flatten_graph(graph);
        for record in &records {
            let incoming = serde_json::to_string(&record.incoming)
                .expect("string lists always serialize");
            let outgoing = serde_json::to_string(&record.outgoing)
                .expect("string lists always serialize");
            self.conn.execute(
                "INSERT INTO pages (session_id, url, incoming, outgoing)
                 VALUES (?1, ?2, ?3, ?4)",
                params![session_id, &record.url, incoming, outgoing],
            )?;
        }
        Ok(records.len())
    }

    pub fn get_page(&self, session_id: &str, url: &str) -> Result<Option<GraphRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, incoming, outgoing FROM pages WHERE session_id = ?1 AND url = ?2",
        )?;

        let row = stmt
            .query_row(params![session_id, url], |row| {
                let url: String = row.get(0)?;
                let incoming: String = row.get(1)?;
                let outgoing: String = row.get(2)?;
                Ok((url, incoming, outgoing))
            })
            .optional()?;

        Ok(row.map(|(url, incoming, outgoing)| GraphRecord {
            url,
            incoming: serde_json::from_str(&incoming).unwrap_or_default(),
            outgoing: serde_json::from_str(&outgoing).unwrap_or_default(),
        }))
    }

    pub fn page_count(&self, session_id: &str) -> Result<i64> {
        self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )
    }

    pub fn get_connection(&self) -> &Connection {
        &self.conn
    }
}
