//! Enrollment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;
use booking_core::types::UserId;
use booking_domain::model::{Address, Enrollment, EnrollmentWithAddress};
use booking_domain::ports::EnrollmentLookup;

/// Read-only repository for enrollments and their addresses.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentLookup for EnrollmentRepository {
    async fn find_with_address_by_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<EnrollmentWithAddress>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "SELECT id, name, cpf, birthday, phone, user_id, created_at, updated_at \
             FROM enrollments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find enrollment", e))?;

        let Some(enrollment) = enrollment else {
            return Ok(None);
        };

        let address = sqlx::query_as::<_, Address>(
            "SELECT id, cep, street, city, state, number, neighborhood, address_detail, enrollment_id \
             FROM addresses WHERE enrollment_id = $1",
        )
        .bind(enrollment.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find address", e))?;

        Ok(Some(EnrollmentWithAddress {
            enrollment,
            address,
        }))
    }
}
