use std::str::FromStr;

use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::IdentityRepository;
use crate::identity::errors::IdentityError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "identities_email_key";

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct IdentityRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = IdentityError;

    // Rows that fail validation are storage faults, not caller input.
    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)
            .map_err(|e| IdentityError::Internal(format!("Stored role is invalid: {}", e)))?;
        let name = DisplayName::new(row.name)
            .map_err(|e| IdentityError::Internal(format!("Stored name is invalid: {}", e)))?;
        let email = EmailAddress::new(row.email)
            .map_err(|e| IdentityError::Internal(format!("Stored email is invalid: {}", e)))?;

        Ok(Identity {
            id: IdentityId(row.id),
            name,
            email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.name.as_str())
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(identity.role.as_str())
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return IdentityError::EmailTaken;
                }
            }
            IdentityError::Internal(e.to_string())
        })?;

        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::Internal(e.to_string()))?
        .map(Identity::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::Internal(e.to_string()))?
        .map(Identity::try_from)
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> IdentityRow {
        IdentityRow {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            role: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let identity = Identity::try_from(row()).unwrap();

        assert_eq!(identity.email.as_str(), "alice@x.com");
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_invalid_stored_fields_are_internal() {
        let mut bad_name = row();
        bad_name.name = "   ".to_string();
        let mut bad_email = row();
        bad_email.email = "not-an-email".to_string();
        let mut bad_role = row();
        bad_role.role = "superuser".to_string();

        for row in [bad_name, bad_email, bad_role] {
            assert!(matches!(
                Identity::try_from(row),
                Err(IdentityError::Internal(_))
            ));
        }
    }
}
