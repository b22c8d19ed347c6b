//! HTTP handlers for client endpoints.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::auth::LoginCommand;
use crate::application::handlers::client::{
    ActivateMembershipCommand, DeactivateMembershipCommand, DeleteClientCommand,
    ForgotPasswordCommand, GetClientQuery, ListClientPurchasesQuery, ListClientsQuery,
    ResetPasswordCommand, SignupCommand, UpdateClientCommand,
};
use crate::domain::foundation::ClientId;
use crate::domain::membership::MembershipStatus;

use super::super::error::ApiError;
use super::super::extract::{AppJson, AppPath, AppQuery};
use super::super::middleware::{RequireAdmin, RequireAuth, RequireClient};
use super::super::multipart::FormData;
use super::super::state::AppState;
use super::dto::{
    ActivateMembershipRequest, ForgotPasswordRequest, ListClientsParams, LoginRequest,
    ResetPasswordRequest, DEFAULT_LIMIT, DEFAULT_PAGE,
};

const PROFILE_IMAGE_FIELD: &str = "profile_image";

/// POST /clients/signup - multipart: email, password, first_name, last_name, profile_image?
pub async fn signup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = FormData::read(multipart, PROFILE_IMAGE_FIELD).await?;
    let cmd = SignupCommand {
        email: form.required("email")?,
        password: form.required("password")?,
        first_name: form.required("first_name")?,
        last_name: form.required("last_name")?,
        profile_image: form.take_file(),
    };

    let result = state.signup_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /clients/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .login_client(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;
    Ok(Json(result))
}

/// GET /clients/me
pub async fn me(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .get_client_handler()
        .handle(GetClientQuery { client_id })
        .await?;
    Ok(Json(detail))
}

/// GET /clients
pub async fn list_clients(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    AppQuery(params): AppQuery<ListClientsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<MembershipStatus>())
        .transpose()
        .map_err(|e| ApiError::bad_request(e).with_detail("field", "status"))?;

    let result = state
        .list_clients_handler()
        .handle(ListClientsQuery {
            page: params.page.unwrap_or(DEFAULT_PAGE),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
            search: params.search,
            status,
        })
        .await?;
    Ok(Json(result))
}

/// PATCH /clients/active/:id
pub async fn activate_membership(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    AppPath(client_id): AppPath<ClientId>,
    AppJson(request): AppJson<ActivateMembershipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .activate_membership_handler()
        .handle(ActivateMembershipCommand {
            client_id,
            paid_date: request.paid_date,
            due_date: request.due_date,
            amount: request.amount,
        })
        .await?;
    Ok(Json(profile))
}

/// PATCH /clients/inactive/:id
pub async fn deactivate_membership(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    AppPath(client_id): AppPath<ClientId>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .deactivate_membership_handler()
        .handle(DeactivateMembershipCommand { client_id })
        .await?;
    Ok(Json(profile))
}

/// GET /clients/:id - public
pub async fn get_client(
    State(state): State<AppState>,
    AppPath(client_id): AppPath<ClientId>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .get_client_handler()
        .handle(GetClientQuery { client_id })
        .await?;
    Ok(Json(detail))
}

/// PATCH /clients/:id - multipart: first_name?, last_name?, profile_image?
pub async fn update_client(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    AppPath(client_id): AppPath<ClientId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = FormData::read(multipart, PROFILE_IMAGE_FIELD).await?;
    let cmd = UpdateClientCommand {
        actor,
        client_id,
        first_name: form.text("first_name"),
        last_name: form.text("last_name"),
        profile_image: form.take_file(),
    };

    let profile = state.update_client_handler().handle(cmd).await?;
    Ok(Json(profile))
}

/// DELETE /clients/:id
pub async fn delete_client(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    AppPath(client_id): AppPath<ClientId>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .delete_client_handler()
        .handle(DeleteClientCommand { client_id })
        .await?;
    Ok(Json(result))
}

/// GET /clients/:id/purchases
pub async fn client_purchases(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    AppPath(client_id): AppPath<ClientId>,
) -> Result<impl IntoResponse, ApiError> {
    let purchases = state
        .client_purchases_handler()
        .handle(ListClientPurchasesQuery { actor, client_id })
        .await?;
    Ok(Json(purchases))
}

/// POST /clients/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(request): AppJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .forgot_password_handler()
        .handle(ForgotPasswordCommand {
            email: request.email,
        })
        .await?;
    Ok(Json(result))
}

/// POST /clients/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .reset_password_handler()
        .handle(ResetPasswordCommand {
            token: request.token,
            password: request.password,
        })
        .await?;
    Ok(Json(result))
}
