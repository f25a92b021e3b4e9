//! Every window run against a seeded SQLite table.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

use timecraft::config::ScopeConfig;
use timecraft::core::{FixedClock, SQL_DATE_TIME_FORMAT};
use timecraft::scopes::{AnyRecord, DateScoped, DateScopes, SqlQuery, Window};

const ROWS: [(i64, &str); 9] = [
    (1, "2024-03-15 09:00:00"),
    (2, "2024-03-14 23:59:59"),
    (3, "2024-03-09 12:00:00"),
    (4, "2024-03-04 00:00:00"),
    (5, "2024-02-20 08:00:00"),
    (6, "2024-02-01 08:00:00"),
    (7, "2023-03-15 18:00:00"),
    (8, "2023-12-31 23:00:00"),
    (9, "2024-03-17 23:59:59"),
];

/// Friday, March 15th 2024, 10:30.
fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn scopes<R: DateScoped>(default_field: &str) -> DateScopes<R, FixedClock> {
    DateScopes::with_clock(ScopeConfig::with_default_field(default_field), FixedClock(now()))
}

fn seeded() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE posts (id INTEGER PRIMARY KEY, created_at TEXT NOT NULL, published_at TEXT);",
    )
    .unwrap();
    for (id, created_at) in ROWS {
        conn.execute(
            "INSERT INTO posts (id, created_at, published_at) VALUES (?1, ?2, NULL)",
            rusqlite::params![id, created_at],
        )
        .unwrap();
    }
    conn
}

fn ids(conn: &Connection, query: &SqlQuery) -> Vec<i64> {
    let mut ids: Vec<i64> = query.pluck(conn, "id").unwrap();
    ids.sort_unstable();
    ids
}

#[test]
fn windows_select_expected_rows() {
    let conn = seeded();
    let scopes = scopes::<AnyRecord>("created_at");

    let expected: [(Window, &[i64]); 11] = [
        (Window::Today, &[1]),
        (Window::Yesterday, &[2]),
        (Window::OneWeekAgo, &[1, 2, 3, 9]),
        (Window::LastWeek, &[3, 4]),
        (Window::CurrentWeek, &[1, 2, 9]),
        (Window::OneMonthAgo, &[1, 2, 3, 4, 5, 9]),
        (Window::LastMonth, &[5, 6]),
        (Window::CurrentMonth, &[1, 2, 3, 4, 7, 9]),
        (Window::LastYear, &[7, 8]),
        (Window::OneYearAgo, &[7]),
        (Window::CurrentYear, &[1, 2, 3, 4, 5, 6, 9]),
    ];

    for (window, want) in expected {
        let query = scopes.apply(window, SqlQuery::table("posts"), None).unwrap();
        assert_eq!(ids(&conn, &query), want, "window {window}");
    }
}

#[test]
fn named_methods_match_windows() {
    let conn = seeded();
    let scopes = scopes::<AnyRecord>("created_at");
    let posts = || SqlQuery::table("posts");

    assert_eq!(ids(&conn, &scopes.today(posts(), None).unwrap()), [1]);
    assert_eq!(ids(&conn, &scopes.yesterday(posts(), None).unwrap()), [2]);
    assert_eq!(ids(&conn, &scopes.last_week(posts(), None).unwrap()), [3, 4]);
    assert_eq!(ids(&conn, &scopes.last_month(posts(), None).unwrap()), [5, 6]);
    assert_eq!(ids(&conn, &scopes.one_year_ago(posts(), None).unwrap()), [7]);
    assert_eq!(
        scopes.current_year(posts(), None).unwrap().count(&conn).unwrap(),
        7
    );
}

#[test]
fn between_dates_is_inclusive_of_date_bounds() {
    let conn = seeded();
    let scopes = scopes::<AnyRecord>("created_at");

    let query = scopes
        .between_dates(
            SqlQuery::table("posts"),
            "2024-03-01",
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            None,
        )
        .unwrap();
    assert_eq!(ids(&conn, &query), [3, 4]);

    let reversed = scopes
        .between_dates(SqlQuery::table("posts"), "2024-03-10", "2024-03-01", None)
        .unwrap();
    assert!(ids(&conn, &reversed).is_empty());
}

#[test]
fn in_memory_evaluation_agrees_with_sqlite() {
    let conn = seeded();
    let scopes = scopes::<AnyRecord>("created_at");

    for window in Window::ALL {
        let query = scopes.apply(window, SqlQuery::table("posts"), None).unwrap();

        let in_memory: Vec<i64> = ROWS
            .iter()
            .filter(|(_, stamp)| {
                let value = NaiveDateTime::parse_from_str(stamp, SQL_DATE_TIME_FORMAT).unwrap();
                query.constraints().iter().all(|c| c.matches(value))
            })
            .map(|(id, _)| *id)
            .collect();

        assert_eq!(ids(&conn, &query), in_memory, "window {window}");
    }
}

struct Article;

impl DateScoped for Article {
    fn date_field() -> Option<&'static str> {
        Some("published_at")
    }
}

#[test]
fn record_field_overrides_global_default() {
    let conn = seeded();
    conn.execute(
        "UPDATE posts SET published_at = '2024-03-15 07:00:00' WHERE id = 6",
        [],
    )
    .unwrap();

    let scopes = scopes::<Article>("created_at");
    let query = scopes.today(SqlQuery::table("posts"), None).unwrap();
    assert_eq!(ids(&conn, &query), [6]);

    // An explicit field beats the record's.
    let query = scopes.today(SqlQuery::table("posts"), Some("created_at")).unwrap();
    assert_eq!(ids(&conn, &query), [1]);
}
