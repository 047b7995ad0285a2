use diesel::prelude::*;
use prov_persistence::sql::{quote_identifier, quote_literal};
use prov_persistence::{run_in_transaction, PersistenceError, PgSession, SqlSession};

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

fn role_count(session: &mut PgSession, role: &str) -> i64 {
    let row: Count = diesel::sql_query("SELECT COUNT(*) AS count FROM pg_roles WHERE rolname = $1")
        .bind::<diesel::sql_types::Text, _>(role)
        .get_result(session.connection())
        .expect("count roles");
    row.count
}

fn unique_role(prefix: &str) -> String {
    format!("{prefix}{}", std::process::id())
}

#[test]
fn failed_work_leaves_no_role_behind() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let mut session = PgSession::establish(&url).expect("connect");
    let role = unique_role("provflow_rb_");

    let out: Result<(), PersistenceError> = run_in_transaction(&mut session, |tx| {
        tx.execute(&format!("CREATE ROLE {} WITH LOGIN PASSWORD {}",
                            quote_identifier(&role),
                            quote_literal("Xx1!xxxxxxxx")))?;
        tx.execute("SELECT * FROM provflow_table_that_does_not_exist")?;
        Ok(())
    });
    assert!(out.is_err());
    assert_eq!(role_count(&mut session, &role), 0, "rollback must remove the role");
}

#[test]
fn committed_work_is_visible() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let mut session = PgSession::establish(&url).expect("connect");
    let role = unique_role("provflow_ok_");

    run_in_transaction::<_, _, PersistenceError, _>(&mut session, |tx| {
        tx.execute(&format!("CREATE ROLE {}", quote_identifier(&role)))
    }).expect("commit");
    assert_eq!(role_count(&mut session, &role), 1);

    session.execute(&format!("DROP ROLE {}", quote_identifier(&role))).expect("cleanup");
}
