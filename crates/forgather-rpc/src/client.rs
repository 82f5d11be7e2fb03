use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use forgather_models::{
    ClientDashboard, DiscussionMessage, MessageType, SubscriptionStatus, SupplierDashboard,
    VotingSession,
};

use crate::backend::{Backend, VotingSessionDraft};
use crate::protocol::{self, calls, RemoteFault};
use crate::RpcError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the managed backend's remote procedures.
///
/// Each call is exactly one `POST <base>/rpc/<name>` round trip with a JSON
/// body. There is no retry and no request cancellation: a navigation away
/// while a call is in flight simply drops the future.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    base: Url,
    api_key: String,
    access_token: Option<String>,
}

impl RpcClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, RpcError> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RpcError> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| RpcError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(RpcError::InvalidUrl(format!(
                "unsupported scheme: {}",
                base.scheme()
            )));
        }
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("Forgather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RpcError::Http(e.to_string()))?;
        Ok(Self {
            http,
            base,
            api_key: api_key.into(),
            access_token: None,
        })
    }

    /// Attach the authenticated user's access token to subsequent calls.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn endpoint(&self, call: &str) -> String {
        format!("{}/rpc/{call}", self.base.as_str().trim_end_matches('/'))
    }

    async fn call<Req, Resp>(&self, call: &'static str, body: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(call);
        tracing::debug!(call, %url, "issuing rpc");

        let mut request = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RpcError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RpcError::Unauthorized);
        }
        if !status.is_success() {
            return Err(remote_fault(call, status, response).await);
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| RpcError::Decode(e.to_string()))
    }
}

/// Map a rejected procedure to `RpcError::Remote`, preserving the backend's
/// fault body when it is well formed.
async fn remote_fault(
    call: &'static str,
    status: StatusCode,
    response: reqwest::Response,
) -> RpcError {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<RemoteFault>(&body) {
        Ok(fault) => RpcError::Remote {
            call,
            code: fault.code,
            message: fault.message,
        },
        Err(_) => RpcError::Remote {
            call,
            code: status.as_u16().to_string(),
            message: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        },
    }
}

impl Backend for RpcClient {
    async fn get_group_voting_sessions(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<VotingSession>, RpcError> {
        self.call(
            calls::GET_GROUP_VOTING_SESSIONS,
            &protocol::GroupScopedRequest { group_id },
        )
        .await
    }

    async fn create_voting_session(
        &self,
        group_id: Uuid,
        created_by: Uuid,
        draft: VotingSessionDraft,
    ) -> Result<Uuid, RpcError> {
        let req = draft.into_request(group_id, created_by);
        let resp: protocol::CreateVotingSessionResponse =
            self.call(calls::CREATE_VOTING_SESSION, &req).await?;
        Ok(resp.session_id)
    }

    async fn cast_vote(
        &self,
        voting_session_id: Uuid,
        voter_id: Uuid,
        selections: Vec<Uuid>,
        choice: Option<String>,
    ) -> Result<bool, RpcError> {
        let req = protocol::CastVoteRequest {
            voting_session_id,
            voter_id,
            selections,
            choice,
        };
        let resp: protocol::CastVoteResponse = self.call(calls::CAST_VOTE, &req).await?;
        Ok(resp.success)
    }

    async fn get_group_discussions(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<DiscussionMessage>, RpcError> {
        self.call(
            calls::GET_GROUP_DISCUSSIONS,
            &protocol::GroupScopedRequest { group_id },
        )
        .await
    }

    async fn create_group_discussion(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        message: String,
        message_type: MessageType,
        parent_id: Option<Uuid>,
    ) -> Result<Uuid, RpcError> {
        let req = protocol::CreateDiscussionRequest {
            group_id,
            user_id,
            message,
            message_type,
            parent_id,
        };
        let resp: protocol::CreateDiscussionResponse =
            self.call(calls::CREATE_GROUP_DISCUSSION, &req).await?;
        Ok(resp.message_id)
    }

    async fn join_group(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        accepted_terms: bool,
    ) -> Result<Uuid, RpcError> {
        let req = protocol::JoinGroupRequest {
            group_id,
            user_id,
            accepted_terms,
        };
        let resp: protocol::JoinGroupResponse = self.call(calls::JOIN_GROUP, &req).await?;
        Ok(resp.membership_id)
    }

    async fn get_client_dashboard(&self, user_id: Uuid) -> Result<ClientDashboard, RpcError> {
        self.call(
            calls::GET_CLIENT_DASHBOARD,
            &protocol::UserScopedRequest { user_id },
        )
        .await
    }

    async fn get_supplier_dashboard(&self, user_id: Uuid) -> Result<SupplierDashboard, RpcError> {
        self.call(
            calls::GET_SUPPLIER_DASHBOARD,
            &protocol::UserScopedRequest { user_id },
        )
        .await
    }

    async fn get_subscription_status(
        &self,
        user_id: Uuid,
    ) -> Result<SubscriptionStatus, RpcError> {
        self.call(
            calls::GET_SUBSCRIPTION_STATUS,
            &protocol::UserScopedRequest { user_id },
        )
        .await
    }
}
