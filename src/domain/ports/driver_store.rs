use crate::domain::entities::driver::DriverDocument;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Persistence port for enrolled drivers.
///
/// Every read returns raw [`DriverDocument`]s; validation happens in the
/// application layer. Implementations report infrastructure failures as
/// [`DomainError::StoreUnavailable`].
#[async_trait]
pub trait DriverStore: Send + Sync {
    /// All drivers whose account status is `Active`, in store order.
    async fn list_active(&self) -> Result<Vec<DriverDocument>, DomainError>;

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<DriverDocument>, DomainError>;

    /// Sets `last_login` and `updated_at` to now. Returns whether a record changed.
    async fn touch_login(&self, user_id: &str) -> Result<bool, DomainError>;

    /// Stores a document as-is, assigning an id when it has none.
    async fn insert(&self, doc: &DriverDocument) -> Result<String, DomainError>;
}
