//! Uniform response envelope shared by every endpoint

use serde::Serialize;
use utoipa::ToSchema;

/// Response envelope: `success` and `message` are always present, `data`
/// carries the payload and is null on failures and acknowledgements
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Success with a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success with no payload (`data` is null on the wire)
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failure; `data` is null on the wire
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Marker payload for envelopes whose `data` is always null
#[derive(Debug, Serialize, ToSchema)]
pub struct Empty {}

/// Pagination block carried inside list payloads
#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl Pagination {
    /// Row offset for a page request; `page` and `limit` floor at 1 and
    /// the multiply saturates instead of overflowing
    pub fn offset(page: i64, limit: i64) -> i64 {
        (page.max(1) - 1).saturating_mul(limit.max(1))
    }
}
