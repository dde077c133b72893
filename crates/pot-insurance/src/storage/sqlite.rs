use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::claims::ClaimEntity;
use crate::employees::EmployeeEntity;
use crate::packages::{PackageEntity, PackageQuery, PackageRepository};
use crate::repository::{Page, Repository, RepositoryError};

const DATE_FORMAT: &str = "%Y-%m-%d";

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email, date_of_birth, active";
const CLAIM_COLUMNS: &str =
    "id, claim_number, consumer, employer, date_of_service, plan, amount, status";
const PACKAGE_COLUMNS: &str =
    "id, name, status, payroll_frequency, package_type, start_date, end_date, contributions";

/// SQLite-backed store for every resource table.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connect and create the schema if it does not exist yet.
    pub async fn connect(url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own empty
        // database, so the pool must hold exactly one and never recycle it.
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        Self::setup_schema(&pool).await?;
        info!(in_memory, "sqlite storage ready");

        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, RepositoryError> {
        Self::connect("sqlite::memory:").await
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                id TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                date_of_birth TEXT,
                active INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS claims (
                id TEXT PRIMARY KEY,
                claim_number TEXT NOT NULL,
                consumer TEXT NOT NULL,
                employer TEXT NOT NULL,
                date_of_service TEXT NOT NULL,
                plan TEXT NOT NULL,
                amount TEXT NOT NULL,
                status TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS packages (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                status TEXT NOT NULL,
                payroll_frequency TEXT NOT NULL,
                package_type TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                contributions REAL NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_packages_status ON packages(status);")
            .execute(pool)
            .await?;

        Ok(())
    }
}

fn corrupt(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Corrupt(err.to_string())
}

fn date_text(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn uuid_column(row: &SqliteRow, column: &str) -> Result<Uuid, RepositoryError> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(corrupt)
}

fn date_column(row: &SqliteRow, column: &str) -> Result<NaiveDate, RepositoryError> {
    let raw: String = row.try_get(column)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(corrupt)
}

fn parsed_column<T>(row: &SqliteRow, column: &str) -> Result<T, RepositoryError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.try_get(column)?;
    raw.parse::<T>().map_err(corrupt)
}

fn employee_from_row(row: &SqliteRow) -> Result<EmployeeEntity, RepositoryError> {
    let date_of_birth: Option<String> = row.try_get("date_of_birth")?;
    Ok(EmployeeEntity {
        id: uuid_column(row, "id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        date_of_birth: date_of_birth
            .map(|raw| NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(corrupt))
            .transpose()?,
        active: row.try_get("active")?,
    })
}

fn claim_from_row(row: &SqliteRow) -> Result<ClaimEntity, RepositoryError> {
    Ok(ClaimEntity {
        id: uuid_column(row, "id")?,
        claim_number: row.try_get("claim_number")?,
        consumer: row.try_get("consumer")?,
        employer: row.try_get("employer")?,
        date_of_service: date_column(row, "date_of_service")?,
        plan: row.try_get("plan")?,
        amount: parsed_column::<Decimal>(row, "amount")?,
        status: row.try_get("status")?,
    })
}

fn package_from_row(row: &SqliteRow) -> Result<PackageEntity, RepositoryError> {
    Ok(PackageEntity {
        id: uuid_column(row, "id")?,
        name: row.try_get("name")?,
        status: parsed_column(row, "status")?,
        payroll_frequency: parsed_column(row, "payroll_frequency")?,
        package_type: parsed_column(row, "package_type")?,
        start_date: date_column(row, "start_date")?,
        end_date: date_column(row, "end_date")?,
        contributions: row.try_get("contributions")?,
    })
}

fn ensure_updated(rows_affected: u64) -> Result<(), RepositoryError> {
    if rows_affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

#[async_trait]
impl Repository<EmployeeEntity> for SqliteRepository {
    async fn insert(&self, entity: EmployeeEntity) -> Result<EmployeeEntity, RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO employees ({EMPLOYEE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)"
        ))
        .bind(entity.id.to_string())
        .bind(&entity.first_name)
        .bind(&entity.last_name)
        .bind(&entity.email)
        .bind(entity.date_of_birth.map(date_text))
        .bind(entity.active)
        .execute(&self.pool)
        .await?;
        Ok(entity)
    }

    async fn update(&self, entity: EmployeeEntity) -> Result<EmployeeEntity, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, email = ?, date_of_birth = ?, active = ?
            WHERE id = ?
            "#,
        )
        .bind(&entity.first_name)
        .bind(&entity.last_name)
        .bind(&entity.email)
        .bind(entity.date_of_birth.map(date_text))
        .bind(entity.active)
        .bind(entity.id.to_string())
        .execute(&self.pool)
        .await?;
        ensure_updated(result.rows_affected())?;
        Ok(entity)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<EmployeeEntity>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(employee_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<EmployeeEntity>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(employee_from_row).collect()
    }
}

#[async_trait]
impl Repository<ClaimEntity> for SqliteRepository {
    async fn insert(&self, entity: ClaimEntity) -> Result<ClaimEntity, RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO claims ({CLAIM_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(entity.id.to_string())
        .bind(&entity.claim_number)
        .bind(&entity.consumer)
        .bind(&entity.employer)
        .bind(date_text(entity.date_of_service))
        .bind(&entity.plan)
        .bind(entity.amount.to_string())
        .bind(&entity.status)
        .execute(&self.pool)
        .await?;
        Ok(entity)
    }

    async fn update(&self, entity: ClaimEntity) -> Result<ClaimEntity, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE claims
            SET claim_number = ?, consumer = ?, employer = ?, date_of_service = ?,
                plan = ?, amount = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&entity.claim_number)
        .bind(&entity.consumer)
        .bind(&entity.employer)
        .bind(date_text(entity.date_of_service))
        .bind(&entity.plan)
        .bind(entity.amount.to_string())
        .bind(&entity.status)
        .bind(entity.id.to_string())
        .execute(&self.pool)
        .await?;
        ensure_updated(result.rows_affected())?;
        Ok(entity)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ClaimEntity>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(claim_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<ClaimEntity>, RepositoryError> {
        let rows = sqlx::query(&format!("SELECT {CLAIM_COLUMNS} FROM claims ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(claim_from_row).collect()
    }
}

#[async_trait]
impl Repository<PackageEntity> for SqliteRepository {
    async fn insert(&self, entity: PackageEntity) -> Result<PackageEntity, RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO packages ({PACKAGE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(entity.id.to_string())
        .bind(&entity.name)
        .bind(entity.status.as_str())
        .bind(entity.payroll_frequency.as_str())
        .bind(entity.package_type.as_str())
        .bind(date_text(entity.start_date))
        .bind(date_text(entity.end_date))
        .bind(entity.contributions)
        .execute(&self.pool)
        .await?;
        Ok(entity)
    }

    async fn update(&self, entity: PackageEntity) -> Result<PackageEntity, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE packages
            SET name = ?, status = ?, payroll_frequency = ?, package_type = ?,
                start_date = ?, end_date = ?, contributions = ?
            WHERE id = ?
            "#,
        )
        .bind(&entity.name)
        .bind(entity.status.as_str())
        .bind(entity.payroll_frequency.as_str())
        .bind(entity.package_type.as_str())
        .bind(date_text(entity.start_date))
        .bind(date_text(entity.end_date))
        .bind(entity.contributions)
        .bind(entity.id.to_string())
        .execute(&self.pool)
        .await?;
        ensure_updated(result.rows_affected())?;
        Ok(entity)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<PackageEntity>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(package_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<PackageEntity>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(package_from_row).collect()
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl PackageRepository for SqliteRepository {
    async fn filtered(&self, query: &PackageQuery) -> Result<Page<PackageEntity>, RepositoryError> {
        let pattern = query
            .filter
            .name
            .as_deref()
            .map(|name| format!("%{}%", escape_like(name)));
        let status = query.filter.status.map(|status| status.as_str());

        let mut clauses = Vec::new();
        if pattern.is_some() {
            clauses.push("name LIKE ? ESCAPE '\\'");
        }
        if status.is_some() {
            clauses.push("status = ?");
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM packages{where_sql}");
        let mut count = sqlx::query_scalar::<Sqlite, i64>(&count_sql);
        if let Some(pattern) = &pattern {
            count = count.bind(pattern.as_str());
        }
        if let Some(status) = status {
            count = count.bind(status);
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_sql = format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages{where_sql} ORDER BY {} {}, rowid ASC LIMIT ? OFFSET ?",
            query.sort.field.column(),
            query.sort.direction.sql(),
        );
        let mut select = sqlx::query::<Sqlite>(&select_sql);
        if let Some(pattern) = &pattern {
            select = select.bind(pattern.as_str());
        }
        if let Some(status) = status {
            select = select.bind(status);
        }
        let offset = i64::try_from(query.page.offset()).unwrap_or(i64::MAX);
        let rows = select
            .bind(i64::from(query.page.size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let content = rows
            .iter()
            .map(package_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let total = u64::try_from(total).map_err(corrupt)?;
        Ok(Page::new(content, query.page, total))
    }
}
