use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::errors::StoreError;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Employee;
use crate::domain::principal::models::EmployeeDraft;
use crate::domain::principal::models::Login;
use crate::domain::principal::ports::EntityRepository;
use crate::domain::principal::ports::PrincipalDirectory;

const COLUMNS: &str = "id, full_name, date_of_birth, email, phone_number, working_role, gender, \
                       login, password_hash, salt, working_time, row_version";

pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    full_name: String,
    date_of_birth: NaiveDate,
    email: String,
    phone_number: String,
    working_role: String,
    gender: String,
    login: String,
    password_hash: String,
    salt: String,
    working_time: Option<String>,
    row_version: i32,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> Result<Self, StoreError> {
        Ok(Employee {
            id: row.id,
            full_name: row.full_name,
            date_of_birth: row.date_of_birth,
            email: EmailAddress::new(row.email)
                .map_err(|e| StoreError::Database(e.to_string()))?,
            phone_number: row.phone_number,
            working_role: row.working_role,
            gender: row.gender,
            login: Login::new(row.login).map_err(|e| StoreError::Database(e.to_string()))?,
            password_hash: row.password_hash,
            salt: row.salt,
            working_time: row.working_time,
            row_version: row.row_version,
        })
    }
}

/// Map a unique-constraint violation onto the field it guards.
fn store_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("employees_login_key") {
                return StoreError::Duplicate("Login".to_string());
            }
            if db_err.constraint() == Some("employees_email_key") {
                return StoreError::Duplicate("Email".to_string());
            }
        }
    }
    StoreError::Database(e.to_string())
}

#[async_trait]
impl EntityRepository<Employee> for PostgresEmployeeRepository {
    async fn add(&self, draft: EmployeeDraft) -> Result<Employee, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            INSERT INTO employees (full_name, date_of_birth, email, phone_number, working_role,
                                   gender, login, password_hash, salt, working_time, row_version)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 1)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&draft.full_name)
        .bind(draft.date_of_birth)
        .bind(draft.email.as_str())
        .bind(&draft.phone_number)
        .bind(&draft.working_role)
        .bind(&draft.gender)
        .bind(draft.login.as_str())
        .bind(&draft.password_hash)
        .bind(&draft.salt)
        .bind(&draft.working_time)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        row.try_into()
    }

    async fn get(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(Employee::try_from).transpose()
    }

    async fn update(&self, employee: Employee) -> Result<Employee, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            UPDATE employees
            SET full_name = $2, date_of_birth = $3, email = $4, phone_number = $5,
                working_role = $6, gender = $7, login = $8, password_hash = $9, salt = $10,
                working_time = $11, row_version = row_version + 1
            WHERE id = $1 AND row_version = $12
            RETURNING {COLUMNS}
            "#
        ))
        .bind(employee.id)
        .bind(&employee.full_name)
        .bind(employee.date_of_birth)
        .bind(employee.email.as_str())
        .bind(&employee.phone_number)
        .bind(&employee.working_role)
        .bind(&employee.gender)
        .bind(employee.login.as_str())
        .bind(&employee.password_hash)
        .bind(&employee.salt)
        .bind(&employee.working_time)
        .bind(employee.row_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some(row) => row.try_into(),
            None => {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)",
                )
                .bind(employee.id)
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
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
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
impl PrincipalDirectory for PostgresEmployeeRepository {
    type Entity = Employee;

    async fn find_by_login(&self, login: &str) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {COLUMNS} FROM employees WHERE login = $1"
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(Employee::try_from).transpose()
    }

    async fn email_in_use(&self, email: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)
    }
}
