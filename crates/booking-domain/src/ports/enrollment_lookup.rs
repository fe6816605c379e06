//! Read-only enrollment lookup port.

use async_trait::async_trait;

use booking_core::result::AppResult;
use booking_core::types::UserId;

use crate::model::EnrollmentWithAddress;

/// Lookup of a user's enrollment.
#[async_trait]
pub trait EnrollmentLookup: Send + Sync {
    /// Find the enrollment (and address) belonging to a user.
    async fn find_with_address_by_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<EnrollmentWithAddress>>;
}
