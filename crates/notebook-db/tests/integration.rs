use notebook_db::{create_pool, run_migrations, DbRuntimeSettings};

#[test]
fn file_database_keeps_schema_between_pools() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("notebook.db");
    let path = path.to_str().expect("temp path should be utf-8");

    {
        let pool = create_pool(path, DbRuntimeSettings::default()).expect("failed to create pool");
        let conn = pool.get().expect("failed to get connection");
        let applied = run_migrations(&conn).expect("failed to run migrations");
        assert_eq!(applied, 1);
    }

    let pool = create_pool(path, DbRuntimeSettings::default()).expect("failed to reopen pool");
    let conn = pool.get().expect("failed to get connection");
    let applied = run_migrations(&conn).expect("failed to run migrations");
    assert_eq!(applied, 0, "schema should already be current");

    let journal_mode: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .expect("failed to query journal mode");
    assert_eq!(journal_mode, "wal");

    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type='table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .expect("failed to prepare table query");
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .expect("failed to execute table query")
        .map(|r| r.expect("failed to read table name"))
        .collect();

    assert_eq!(tables, vec!["_notebook_migrations", "pages"]);
}

#[test]
fn pooled_connections_share_file_database() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("shared.db");
    let path = path.to_str().expect("temp path should be utf-8");

    let pool = create_pool(path, DbRuntimeSettings::default()).expect("failed to create pool");
    {
        let conn = pool.get().expect("failed to get connection");
        run_migrations(&conn).expect("failed to run migrations");
        conn.execute(
            "INSERT INTO pages (id, title, content) VALUES ('a', 'A', 'first')",
            [],
        )
        .expect("insert should succeed");
    }

    let first = pool.get().expect("failed to get first connection");
    let second = pool.get().expect("failed to get second connection");
    for conn in [&first, &second] {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))
            .expect("count should succeed");
        assert_eq!(count, 1);
    }
}
