use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use forgather_models::{DiscussionMessage, MessageType};
use forgather_rpc::protocol::calls;
use forgather_rpc::Backend;

use crate::error::CoreError;
use crate::notify::{Notifier, Severity};
use crate::{observability, AppContext};

/// Discussion threads per group. Same refetch-after-write discipline as the
/// voting cache: no optimistic append, no pagination, no live updates; each
/// read reflects the last explicit fetch.
pub struct DiscussionWorkflow<B, N> {
    ctx: Arc<AppContext<B, N>>,
    messages: DashMap<Uuid, Vec<DiscussionMessage>>,
    loading: AtomicBool,
}

impl<B: Backend, N: Notifier> DiscussionWorkflow<B, N> {
    pub fn new(ctx: Arc<AppContext<B, N>>) -> Self {
        Self {
            ctx,
            messages: DashMap::new(),
            loading: AtomicBool::new(false),
        }
    }

    pub fn messages(&self, group_id: Uuid) -> Vec<DiscussionMessage> {
        self.messages
            .get(&group_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    pub async fn fetch_messages(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<DiscussionMessage>, CoreError> {
        self.loading.store(true, Ordering::Relaxed);
        observability::rpc_issued(calls::GET_GROUP_DISCUSSIONS);
        let result = self.ctx.backend.get_group_discussions(group_id).await;
        self.loading.store(false, Ordering::Relaxed);

        match result {
            Ok(messages) => {
                self.messages.insert(group_id, messages.clone());
                Ok(messages)
            }
            Err(err) => {
                observability::rpc_failed(calls::GET_GROUP_DISCUSSIONS);
                let err = CoreError::from(err);
                self.ctx.notify_error(&err);
                Err(err)
            }
        }
    }

    /// Post a message and re-fetch the thread so the visible list is the
    /// backend's, not a local guess.
    pub async fn post_message(
        &self,
        group_id: Uuid,
        text: &str,
        message_type: MessageType,
        parent_id: Option<Uuid>,
    ) -> Result<Uuid, CoreError> {
        let Some(user) = self.ctx.session.current_user() else {
            let err = CoreError::LoginRequired;
            self.ctx.notify_error(&err);
            return Err(err);
        };
        let text = text.trim();
        if text.is_empty() {
            let err = CoreError::Validation("message is required");
            self.ctx.notify_error(&err);
            return Err(err);
        }

        observability::rpc_issued(calls::CREATE_GROUP_DISCUSSION);
        match self
            .ctx
            .backend
            .create_group_discussion(group_id, user.id, text.to_string(), message_type, parent_id)
            .await
        {
            Ok(message_id) => {
                self.ctx.notify(Severity::Success, "discussion.posted");
                let _ = self.fetch_messages(group_id).await;
                Ok(message_id)
            }
            Err(err) => {
                observability::rpc_failed(calls::CREATE_GROUP_DISCUSSION);
                let err = CoreError::from(err);
                self.ctx.notify_error(&err);
                Err(err)
            }
        }
    }
}
