//! Send and receive handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};

use clipvault_service::ShareOptions;

use crate::dto::request::SendForm;
use crate::dto::response::{ReceiveResponse, SendResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/send
pub async fn send(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<SendResponse>> {
    let form = SendForm::read(multipart).await?;
    let options = ShareOptions::from_raw(
        form.max_receivers.as_deref(),
        form.expiry_minutes.as_deref(),
        &state.config.share,
    );

    let record = state
        .transfer_service
        .send_share(form.text, form.files, options)
        .await?;

    Ok(Json(SendResponse::sent(record.code)))
}

/// GET /api/receive/{code}
pub async fn receive(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<ReceiveResponse>> {
    let share = state.transfer_service.receive_share(&code).await?;
    Ok(Json(ReceiveResponse::from(share)))
}
