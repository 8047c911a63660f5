use diesel::prelude::*;

use spigot_core::{schema::twitter_account, Database, Result};

/// One set of platform auth material, as stored in the credential table.
/// Immutable once loaded; the pool owns the loaded copies for the process
/// lifetime.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = twitter_account)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TwitterAccount {
    pub id: i32,
    pub user_id: i64,
    pub auth_token: String,
    pub csrf_token: String,
    pub bearer_token: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = twitter_account)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewTwitterAccount {
    pub user_id: i64,
    pub auth_token: String,
    pub csrf_token: String,
    pub bearer_token: String,
}

impl TwitterAccount {
    /// All stored credentials, lowest user id first. The pool always starts
    /// rotation at the lowest id. An empty result is valid and means the
    /// Twitter routes should not be mounted.
    pub fn all(db: Database) -> Result<Vec<Self>> {
        use spigot_core::schema::twitter_account::dsl::*;
        let accounts = twitter_account
            .order(user_id.asc())
            .select(TwitterAccount::as_select())
            .load(db)?;
        Ok(accounts)
    }

    pub fn add(db: Database, account: NewTwitterAccount) -> Result<Self> {
        use spigot_core::schema::twitter_account::dsl::*;
        let inserted = diesel::insert_into(twitter_account)
            .values(&account)
            .returning(TwitterAccount::as_returning())
            .get_result(db)?;
        Ok(inserted)
    }

    /// Remove the account with the given user id, returning whether one
    /// existed.
    pub fn remove(db: Database, target: i64) -> Result<bool> {
        use spigot_core::schema::twitter_account::dsl::*;
        let deleted = diesel::delete(twitter_account.filter(user_id.eq(target))).execute(db)?;
        Ok(deleted > 0)
    }
}

/// Create the credential table when missing. The schema is managed inline at
/// startup instead of through migrations; there is only one table.
pub fn ensure_schema(db: Database) -> Result<()> {
    diesel::sql_query(
        "CREATE TABLE IF NOT EXISTS twitter_account (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      BIGINT  NOT NULL UNIQUE,
            auth_token   TEXT    NOT NULL
                                 CHECK (length(auth_token) == 40),
            csrf_token   TEXT    NOT NULL
                                 CHECK (length(csrf_token) == 160),
            bearer_token TEXT    NOT NULL
                                 CHECK (length(bearer_token) == 111 AND
                                        bearer_token LIKE 'Bearer %')
        )",
    )
    .execute(db)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use diesel::{Connection, SqliteConnection};

    fn db() -> SqliteConnection {
        let mut db = SqliteConnection::establish(":memory:").unwrap();
        ensure_schema(&mut db).unwrap();
        db
    }

    fn credential(user_id: i64) -> NewTwitterAccount {
        NewTwitterAccount {
            user_id,
            auth_token: "a".repeat(40),
            csrf_token: "c".repeat(160),
            bearer_token: format!("Bearer {}", "b".repeat(104)),
        }
    }

    #[test]
    fn add_list_remove_round_trip() {
        let db = &mut db();
        TwitterAccount::add(db, credential(2)).unwrap();
        TwitterAccount::add(db, credential(1)).unwrap();

        let ids: Vec<i64> = TwitterAccount::all(db).unwrap().iter().map(|a| a.user_id).collect();
        assert_eq!(ids, [1, 2]);

        assert!(TwitterAccount::remove(db, 1).unwrap());
        assert!(!TwitterAccount::remove(db, 1).unwrap());
        assert_eq!(TwitterAccount::all(db).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_user_id_is_rejected() {
        let db = &mut db();
        TwitterAccount::add(db, credential(1)).unwrap();
        assert!(TwitterAccount::add(db, credential(1)).is_err());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let db = &mut db();

        let mut bad = credential(1);
        bad.auth_token = "too-short".to_string();
        assert!(TwitterAccount::add(db, bad).is_err());

        let mut bad = credential(2);
        bad.csrf_token = "c".repeat(159);
        assert!(TwitterAccount::add(db, bad).is_err());

        // Right length, missing the "Bearer " prefix.
        let mut bad = credential(3);
        bad.bearer_token = "b".repeat(111);
        assert!(TwitterAccount::add(db, bad).is_err());

        assert!(TwitterAccount::all(db).unwrap().is_empty());
    }
}
