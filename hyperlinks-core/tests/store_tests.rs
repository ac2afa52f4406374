// Tests for the SQLite document store

use hyperlinks_core::store::GraphStore;
use hyperlinks_crawler::LinkGraph;
use tempfile::TempDir;

fn test_store() -> (TempDir, GraphStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = GraphStore::new(&dir.path().join("hyperlinks.db")).expect("store");
    (dir, store)
}

fn sample_graph() -> LinkGraph {
    let mut graph = LinkGraph::new();
    graph.record_outgoing(
        "http://r.com",
        ["http://a.com".to_string(), "http://b.com".to_string()],
    );
    graph.record_incoming("http://a.com", Some("http://r.com"));
    graph.record_incoming("http://b.com", Some("http://r.com"));
    graph
}

#[test]
fn schema_initializes_on_open() {
    let (_dir, store) = test_store();
    let tables: i64 = store
        .get_connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('crawl_sessions', 'pages')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 2);
}

#[test]
fn reopening_an_existing_database_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hyperlinks.db");
    drop(GraphStore::new(&path).unwrap());
    assert!(GraphStore::new(&path).is_ok());
}

#[test]
fn session_rows_record_invocation_parameters() {
    let (_dir, store) = test_store();
    let session_id = store.create_session("http://r.com", 25).unwrap();

    let (start_url, visit_limit, finished_at): (String, i64, Option<i64>) = store
        .get_connection()
        .query_row(
            "SELECT start_url, visit_limit, finished_at FROM crawl_sessions WHERE id = ?1",
            [&session_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();

    assert_eq!(start_url, "http://r.com");
    assert_eq!(visit_limit, 25);
    assert!(finished_at.is_none());

    store.complete_session(&session_id).unwrap();
    let finished_at: Option<i64> = store
        .get_connection()
        .query_row(
            "SELECT finished_at FROM crawl_sessions WHERE id = ?1",
            [&session_id],
            |row| row.get(0),
        )
        .unwrap();
    assert!(finished_at.is_some());
}

#[test]
fn write_graph_stores_one_record_per_url() {
    let (_dir, store) = test_store();
    let session_id = store.create_session("http://r.com", 10).unwrap();

    let written = store.write_graph(&session_id, &sample_graph()).unwrap();
    assert_eq!(written, 3);
    assert_eq!(store.page_count(&session_id).unwrap(), 3);

    let root = store.get_page(&session_id, "http://r.com").unwrap().unwrap();
    assert_eq!(root.outgoing, ["http://a.com", "http://b.com"]);
    assert!(root.incoming.is_empty());

    let leaf = store.get_page(&session_id, "http://a.com").unwrap().unwrap();
    assert_eq!(leaf.incoming, ["http://r.com"]);
    assert!(leaf.outgoing.is_empty());
}

#[test]
fn sessions_are_isolated_from_each_other() {
    let (_dir, store) = test_store();
    let first = store.create_session("http://r.com", 5).unwrap();
    let second = store.create_session("http://r.com", 5).unwrap();

    store.write_graph(&first, &sample_graph()).unwrap();
    assert_eq!(store.page_count(&first).unwrap(), 3);
    assert_eq!(store.page_count(&second).unwrap(), 0);
    assert!(store.get_page(&second, "http://r.com").unwrap().is_none());
}

#[test]
fn empty_graph_writes_no_records() {
    let (_dir, store) = test_store();
    let session_id = store.create_session("http://r.com", 1).unwrap();
    assert_eq!(store.write_graph(&session_id, &LinkGraph::new()).unwrap(), 0);
    assert_eq!(store.page_count(&session_id).unwrap(), 0);
}
