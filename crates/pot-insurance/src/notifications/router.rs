use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::domain::NotificationRequest;
use super::mailer::{MailError, MailTransport};
use super::service::NotificationService;
use crate::error::ServiceError;

/// Router builder exposing `POST /v1/notifications`.
pub fn notification_router<M>(service: Arc<NotificationService<M>>) -> Router
where
    M: MailTransport + ?Sized + 'static,
{
    Router::new()
        .route("/v1/notifications", post(send_handler::<M>))
        .with_state(service)
}

pub(crate) async fn send_handler<M>(
    State(service): State<Arc<NotificationService<M>>>,
    Json(request): Json<NotificationRequest>,
) -> Response
where
    M: MailTransport + ?Sized + 'static,
{
    let (to, notification) = request.into_parts();
    // The transport blocks on the SMTP exchange.
    let outcome =
        tokio::task::spawn_blocking(move || service.send_mail(&to, &notification)).await;

    match outcome {
        Ok(Ok(())) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(err)) => err.into_response(),
        Err(join) => ServiceError::from(MailError::Transport(format!(
            "mail dispatch aborted: {join}"
        )))
        .into_response(),
    }
}
