//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::{
    error::ApiError,
    middleware::{AuthUser, auth_middleware},
    models::{
        AuthResponse, LoginRequest, NewUser, RegisterRequest, UserResponse,
        catalog::{PlanType, PurchaseRequest},
    },
    state::AppState,
    validation,
};

/// Create the router for the marketplace API
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/user", get(current_user))
        .route("/api/logout", post(logout))
        .route("/api/user/courses", get(user_courses))
        .route("/api/user/subscription", get(user_subscription))
        .route("/api/purchase", post(purchase))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/courses", get(list_courses))
        .route("/api/courses/:id", get(get_course))
        .merge(protected_routes)
        .with_state(state)
}

/// Unwrap a JSON body, turning extractor rejections into field-level 400s
///
/// The default `Json` rejection answers 422; the error taxonomy treats a
/// malformed payload as a validation failure.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => Err(ApiError::Validation {
            field: "body",
            message: rejection.body_text(),
        }),
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "marketplace-api"
    }))
}

/// Register a new user and open a session for it
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = parse_body(body)?;

    validation::validate_username(&payload.username).map_err(|message| ApiError::Validation {
        field: "username",
        message,
    })?;
    validation::validate_email(&payload.email).map_err(|message| ApiError::Validation {
        field: "email",
        message,
    })?;
    validation::validate_password(&payload.password).map_err(|message| ApiError::Validation {
        field: "password",
        message,
    })?;

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
    };

    let user = state.user_repository.create(&new_user).await?;

    let session = state
        .session_repository
        .create_session(user.id)
        .await
        .map_err(|e| {
            error!("Failed to create session: {}", e);
            ApiError::InternalServerError
        })?;

    let response = AuthResponse {
        token: session.token,
        user: UserResponse::from(&user),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = parse_body(body)?;

    let user = state
        .user_repository
        .find_by_username(&payload.username)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    let password_matches = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;

    if !password_matches {
        return Err(ApiError::Unauthorized);
    }

    let session = state
        .session_repository
        .create_session(user.id)
        .await
        .map_err(|e| {
            error!("Failed to create session: {}", e);
            ApiError::InternalServerError
        })?;

    let response = AuthResponse {
        token: session.token,
        user: UserResponse::from(&user),
    };

    Ok(Json(response))
}

/// Logout endpoint, deletes the session that authenticated the request
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .session_repository
        .delete_session(auth.token)
        .await
        .map_err(|e| {
            error!("Failed to delete session: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(json!({"message": "Logged out successfully"})))
}

/// The authenticated user's profile
pub async fn current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to load user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(UserResponse::from(&user)))
}

/// Get all courses
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let courses = state.catalog_repository.list().await.map_err(|e| {
        error!("Failed to list courses: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(courses))
}

/// Get a single course by ID
///
/// The id segment is parsed by hand so a non-numeric id answers 404 like
/// any other missing course, not a path-rejection 400.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: i32 = id.parse().map_err(|_| ApiError::NotFound("Course"))?;

    let course = state
        .catalog_repository
        .get(id)
        .await
        .map_err(|e| {
            error!("Failed to get course: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("Course"))?;

    Ok(Json(course))
}

/// Get the authenticated user's purchased courses
pub async fn user_courses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = state
        .entitlement_repository
        .courses_for_user(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to get user courses: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(courses))
}

/// Get the authenticated user's active subscription, if any
pub async fn user_subscription(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state
        .entitlement_repository
        .active_subscription(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to get user subscription: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(subscription))
}

/// Purchase route (handles both one-time purchases and subscriptions)
///
/// Exactly one store write happens per successful call; payment is
/// intentionally mocked.
pub async fn purchase(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = parse_body(body)?;

    match payload.purchase_type.as_str() {
        "course" => {
            let course_id = payload.course_id.ok_or(ApiError::Validation {
                field: "courseId",
                message: "courseId is required for course purchases".to_string(),
            })?;

            let course = state
                .catalog_repository
                .get(course_id)
                .await
                .map_err(|e| {
                    error!("Failed to look up course: {}", e);
                    ApiError::InternalServerError
                })?
                .ok_or(ApiError::NotFound("Course"))?;

            let grant = state
                .entitlement_repository
                .grant_course(auth.id, course.id)
                .await
                .map_err(|e| {
                    error!("Failed to grant course: {}", e);
                    ApiError::InternalServerError
                })?;

            Ok((StatusCode::CREATED, Json(grant)).into_response())
        }
        plan @ ("monthly" | "annual") => {
            let plan_type = match plan {
                "monthly" => PlanType::Monthly,
                _ => PlanType::Annual,
            };

            let start_date = Utc::now();
            let end_date = plan_type.term_end(start_date).ok_or_else(|| {
                error!("Subscription term overflowed the calendar");
                ApiError::InternalServerError
            })?;

            let subscription = state
                .entitlement_repository
                .create_subscription(auth.id, plan_type, start_date, end_date)
                .await
                .map_err(|e| {
                    error!("Failed to create subscription: {}", e);
                    ApiError::InternalServerError
                })?;

            Ok((StatusCode::CREATED, Json(subscription)).into_response())
        }
        _ => Err(ApiError::Validation {
            field: "purchaseType",
            message: "purchaseType must be one of course, monthly, annual".to_string(),
        }),
    }
}
