//! API handlers and routing for the Libris REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod me;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::user::{CurrentUser, Role},
    AppState,
};

/// Role allow-lists for the gated route groups
pub const MANAGEMENT_ROLES: &[Role] = &[Role::Superadmin, Role::Subadmin];
pub const SUPERADMIN_ONLY: &[Role] = &[Role::Superadmin];
pub const USER_ROLES: &[Role] = &[Role::User];

/// Gateway core shared by the route-group middlewares.
///
/// Verifies the bearer token, attaches the resolved identity to the
/// request, then rejects callers whose role is outside the allow-list.
/// Identity attachment always precedes the role check.
async fn authorize(
    state: &AppState,
    allowed: &[Role],
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::Authentication("Authorization token missing or malformed".to_string())
        })?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Authentication("Authorization token missing or malformed".to_string())
    })?;

    let claims = state.services.tokens.verify(token)?;
    let identity = CurrentUser::from(claims);
    let role = identity.role;
    request.extensions_mut().insert(identity);

    // An empty allow-list admits any authenticated caller.
    if !allowed.is_empty() && !allowed.contains(&role) {
        return Err(AppError::Authorization("Forbidden: Access denied".to_string()));
    }

    Ok(next.run(request).await)
}

/// Gate for the management group: subadmins and superadmins
pub async fn require_management(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, MANAGEMENT_ROLES, request, next).await
}

/// Gate for user administration inside management: superadmins only
pub async fn require_superadmin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, SUPERADMIN_ONLY, request, next).await
}

/// Gate for the self-service group: plain users only
pub async fn require_user(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, USER_ROLES, request, next).await
}

// Extractor for the identity attached by the gateway. On public routes no
// gateway runs, so `Option<CurrentUser>` resolves to `None` there even
// when the client sends a token.
#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::Authentication("Authorization token missing or malformed".to_string())
            })
    }
}

// Wrappers over the stock extractors whose rejections answer in plain
// text; routing the rejection through `AppError` keeps malformed ids and
// bodies inside the envelope.

/// `axum::extract::Query` with the rejection converted to `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// `axum::extract::Path` with the rejection converted to `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// `axum::Json` with the rejection converted to `AppError`; doubles as
/// the handlers' response body type
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        let Self(value) = self;
        axum::Json(value).into_response()
    }
}

/// Create the application router with all routes and role gates
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public registration and sign-in
    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin));

    // User administration, superadmin only (inner gate on top of the
    // management gate)
    let management_users = Router::new()
        .route("/getuser", get(users::get_user))
        .route("/deleteuser/:id", delete(users::delete_user))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_superadmin,
        ));

    // Whole-catalog book administration
    let management_books = Router::new()
        .route("/addbook", post(books::add_book))
        .route("/getbook", get(books::get_book))
        .route("/deletebook/:id", delete(books::delete_book))
        .route("/updatebook/:id", put(books::update_book))
        .route("/searchbook", get(books::search_books));

    let management = Router::new()
        .route("/signup", post(auth::management_signup))
        .nest("/user", management_users)
        .nest("/book", management_books)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_management,
        ));

    // Self-service surface, plain users only
    let user_routes = Router::new()
        .nest(
            "/userandbook",
            Router::new()
                .route("/getme", get(me::get_me))
                .route("/getbooks", get(me::get_my_books))
                .route("/getallbooks", get(me::get_all_books))
                .route("/addbook", post(me::add_my_book))
                .route("/updatebook/:id", put(me::update_my_book))
                .route("/deletebook/:id", delete(me::delete_my_book)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_user));

    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/auth", auth_routes)
        .nest("/management", management)
        .nest("/user", user_routes)
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
