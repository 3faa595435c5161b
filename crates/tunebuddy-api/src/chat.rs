use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use tunebuddy_db::models::MessageRow;
use tunebuddy_types::api::{
    Claims, DeleteConversationResponse, MessageResponse, SendMessageRequest, UnreadSummary,
};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::{blocking, parse_db_id, parse_db_time};

fn to_message(row: MessageRow) -> MessageResponse {
    let created_at = parse_db_time(&row.created_at, "chat message");
    MessageResponse {
        id: parse_db_id(&row.id, "chat message"),
        sender_id: parse_db_id(&row.sender_id, "chat sender"),
        receiver_id: parse_db_id(&row.receiver_id, "chat receiver"),
        message: row.body,
        created_at,
    }
}

pub async fn unread(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<UnreadSummary>>> {
    let id = claims.sub.to_string();
    let rows = blocking(move || state.db.unread_summaries(&id)).await?;

    let summaries = rows
        .into_iter()
        .map(|row| UnreadSummary {
            peer_id: parse_db_id(&row.peer_id, "unread peer"),
            peer_name: row.peer_name,
            peer_image: row.peer_image,
            last_message: row.last_message,
            timestamp: parse_db_time(&row.last_at, "unread rollup"),
            unread_count: row.unread_count.max(0) as u32,
        })
        .collect();
    Ok(Json(summaries))
}

/// Fetching a conversation also advances the reader's last-read marker,
/// so the counterpart drops out of the unread rollup.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(peer_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let user = claims.sub.to_string();
    let peer = peer_id.to_string();

    let rows = blocking(move || {
        // mark_read writes a row referencing the peer, so resolve them
        // first; an unknown or soft-deleted peer is the client's mistake.
        if state.db.get_user_by_id(&peer)?.is_none() {
            return Err(ApiError::NotFound.into());
        }
        state.db.mark_read(&user, &peer)?;
        state.db.messages_between(&user, &peer)
    })
    .await?;

    Ok(Json(rows.into_iter().map(to_message).collect()))
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(peer_id): Path<Uuid>,
    Json(body): Json<SendMessageRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let text = body.message.trim().to_string();
    if text.is_empty() {
        return Err(ApiError::Validation("Message cannot be empty".to_string()));
    }

    let sender = claims.sub.to_string();
    let receiver = peer_id.to_string();
    let message_id = Uuid::new_v4().to_string();

    let row = blocking(move || {
        if state.db.get_user_by_id(&receiver)?.is_none() {
            return Err(ApiError::NotFound.into());
        }
        state.db.insert_message(&message_id, &sender, &receiver, &text)?;
        state
            .db
            .get_message(&message_id)?
            .ok_or_else(|| anyhow::anyhow!("message {} vanished after insert", message_id))
    })
    .await?;

    Ok((StatusCode::CREATED, Json(to_message(row))))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(message_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = claims.sub.to_string();
    let id = message_id.to_string();

    let deleted = blocking(move || state.db.delete_message(&user, &id)).await?;
    if !deleted {
        // Either someone else's message or one that never existed.
        return Err(ApiError::Forbidden);
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn delete_conversation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(peer_id): Path<Uuid>,
) -> ApiResult<Json<DeleteConversationResponse>> {
    let user = claims.sub.to_string();
    let peer = peer_id.to_string();

    let deleted = blocking(move || state.db.delete_conversation(&user, &peer)).await?;
    Ok(Json(DeleteConversationResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AppStateInner;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tunebuddy_db::Database;
    use tunebuddy_db::models::NewUser;

    fn state() -> AppState {
        Arc::new(AppStateInner {
            db: Database::open_in_memory().unwrap(),
            jwt_secret: "test-secret".to_string(),
            upload_dir: PathBuf::from("uploads"),
        })
    }

    fn seed_user(state: &AppState, email: &str, first: &str) -> Uuid {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        state
            .db
            .create_user(&NewUser {
                id: &id_str,
                email,
                password_hash: "x",
                first_name: first,
                last_name: "Tester",
                bio: None,
                age: None,
                gender: None,
                location: None,
            })
            .unwrap();
        id
    }

    fn claims(id: Uuid) -> Claims {
        Claims {
            sub: id,
            email: "ana@example.com".to_string(),
            exp: 0,
        }
    }

    #[tokio::test]
    async fn fetching_a_conversation_with_an_unknown_peer_is_not_found() {
        let state = state();
        let ana = seed_user(&state, "ana@example.com", "Ana");

        let result = list_messages(
            State(state),
            Extension(claims(ana)),
            Path(Uuid::new_v4()),
        )
        .await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn fetching_a_conversation_with_a_real_peer_marks_it_read() {
        let state = state();
        let ana = seed_user(&state, "ana@example.com", "Ana");
        let ivo = seed_user(&state, "ivo@example.com", "Ivo");

        state
            .db
            .insert_message(
                &Uuid::new_v4().to_string(),
                &ivo.to_string(),
                &ana.to_string(),
                "hey",
            )
            .unwrap();

        let Json(messages) = list_messages(
            State(state.clone()),
            Extension(claims(ana)),
            Path(ivo),
        )
        .await
        .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "hey");

        assert!(state.db.unread_summaries(&ana.to_string()).unwrap().is_empty());
    }
}
