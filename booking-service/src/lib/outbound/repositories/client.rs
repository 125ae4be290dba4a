use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::errors::StoreError;
use crate::domain::principal::models::Client;
use crate::domain::principal::models::ClientDraft;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Login;
use crate::domain::principal::ports::EntityRepository;
use crate::domain::principal::ports::PrincipalDirectory;

const COLUMNS: &str =
    "id, name, date_of_birth, phone_number, email, gender, login, password_hash, salt, row_version";

pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i32,
    name: String,
    date_of_birth: NaiveDate,
    phone_number: String,
    email: String,
    gender: String,
    login: String,
    password_hash: String,
    salt: String,
    row_version: i32,
}

impl TryFrom<ClientRow> for Client {
    type Error = StoreError;

    fn try_from(row: ClientRow) -> Result<Self, StoreError> {
        Ok(Client {
            id: row.id,
            name: row.name,
            date_of_birth: row.date_of_birth,
            phone_number: row.phone_number,
            email: EmailAddress::new(row.email)
                .map_err(|e| StoreError::Database(e.to_string()))?,
            gender: row.gender,
            login: Login::new(row.login).map_err(|e| StoreError::Database(e.to_string()))?,
            password_hash: row.password_hash,
            salt: row.salt,
            row_version: row.row_version,
        })
    }
}

/// Map a unique-constraint violation onto the field it guards.
fn store_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("clients_login_key") {
                return StoreError::Duplicate("Login".to_string());
            }
            if db_err.constraint() == Some("clients_email_key") {
                return StoreError::Duplicate("Email".to_string());
            }
        }
    }
    StoreError::Database(e.to_string())
}

#[async_trait]
impl EntityRepository<Client> for PostgresClientRepository {
    async fn add(&self, draft: ClientDraft) -> Result<Client, StoreError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            INSERT INTO clients (name, date_of_birth, phone_number, email, gender, login, password_hash, salt, row_version)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&draft.name)
        .bind(draft.date_of_birth)
        .bind(&draft.phone_number)
        .bind(draft.email.as_str())
        .bind(&draft.gender)
        .bind(draft.login.as_str())
        .bind(&draft.password_hash)
        .bind(&draft.salt)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        row.try_into()
    }

    async fn get(&self) -> Result<Vec<Client>, StoreError> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {COLUMNS} FROM clients ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Client>, StoreError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(Client::try_from).transpose()
    }

    async fn update(&self, client: Client) -> Result<Client, StoreError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            UPDATE clients
            SET name = $2, date_of_birth = $3, phone_number = $4, email = $5, gender = $6,
                login = $7, password_hash = $8, salt = $9, row_version = row_version + 1
            WHERE id = $1 AND row_version = $10
            RETURNING {COLUMNS}
            "#
        ))
        .bind(client.id)
        .bind(&client.name)
        .bind(client.date_of_birth)
        .bind(&client.phone_number)
        .bind(client.email.as_str())
        .bind(&client.gender)
        .bind(client.login.as_str())
        .bind(&client.password_hash)
        .bind(&client.salt)
        .bind(client.row_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some(row) => row.try_into(),
            // Zero rows: either the record is gone, or another actor bumped
            // the version and the conflict is fatal.
            None => {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)",
                )
                .bind(client.id)
                .fetch_one(&self.pool)
                .await
                .map_err(store_error)?;

                if exists {
                    Err(StoreError::ConcurrencyConflict)
                } else {
                    Err(StoreError::NotFound)
                }
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PrincipalDirectory for PostgresClientRepository {
    type Entity = Client;

    async fn find_by_login(&self, login: &str) -> Result<Option<Client>, StoreError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {COLUMNS} FROM clients WHERE login = $1"
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(Client::try_from).transpose()
    }

    async fn email_in_use(&self, email: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clients WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)
    }
}
