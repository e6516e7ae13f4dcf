use almox_core::DomainError;

use crate::store::StoreError;

/// Errors surfaced by the stock services: either the domain refused the
/// operation or the store could not apply it.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
