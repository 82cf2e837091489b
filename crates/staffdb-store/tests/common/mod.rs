use rusqlite::Connection;

/// In-memory database with foreign keys on and every table created
#[allow(dead_code)]
pub fn setup_test_db() -> Connection {
    let conn = staffdb_store::db::open_in_memory().unwrap();
    staffdb_store::db::configure(&conn).unwrap();
    staffdb_store::schema::create_all(&conn).unwrap();
    conn
}

/// Seed department 1 and employee 1 directly, bypassing the mappers
#[allow(dead_code)]
pub fn seed_employee(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO departments (id, name, location) VALUES (1, 'Payroll', 'Building A');
         INSERT INTO employees (id, name, job_title, department_id)
         VALUES (1, 'Lee', 'Manager', 1);",
    )
    .unwrap();
}

#[allow(dead_code)]
pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}
