//! `POST /rpc` handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::{
    rpc::{self, RpcRequest, RpcResponse},
    state::AppState,
};

/// Execute one RPC operation. Faults are reported in the body with `200 OK`.
#[instrument(skip_all, fields(operation = request.operation()))]
pub async fn call(State(state): State<AppState>, Json(request): Json<RpcRequest>) -> Json<RpcResponse> {
    Json(rpc::dispatch(state.customers(), request))
}
