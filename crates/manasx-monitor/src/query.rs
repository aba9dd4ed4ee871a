//! Query surface for external tooling.
//!
//! Tools address the monitor by name with JSON arguments and always get
//! JSON back; failures become `{"error": "[CODE] message"}`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use manasx_core::errors::{ManasxErrorCode, MonitorError};
use manasx_core::types::AnalysisResult;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::actor::MonitorHandle;
use crate::context::OrganizationalContext;
use crate::state::MonitorState;

pub const TOOL_HEALTH: &str = "health";
pub const TOOL_CONTEXT: &str = "get_organizational_context";
pub const TOOL_COMPLIANCE: &str = "check_code_compliance";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub healthy: bool,
    pub monitor: MonitorState,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ComplianceArgs {
    code: String,
    #[serde(default = "default_filename")]
    filename: String,
}

fn default_filename() -> String {
    "snippet.js".to_string()
}

#[async_trait]
pub trait QuerySurface: Send + Sync {
    async fn health(&self) -> HealthStatus;

    async fn get_organizational_context(&self) -> Result<OrganizationalContext, MonitorError>;

    async fn check_code_compliance(
        &self,
        code: &str,
        filename: &str,
    ) -> Result<AnalysisResult, MonitorError>;

    /// Dispatch a named tool call.
    async fn handle_tool_call(&self, name: &str, args: Value) -> Value {
        let outcome = match name {
            TOOL_HEALTH => to_value(self.health().await),
            TOOL_CONTEXT => match self.get_organizational_context().await {
                Ok(ctx) => to_value(ctx),
                Err(e) => Err(e),
            },
            TOOL_COMPLIANCE => match serde_json::from_value::<ComplianceArgs>(args) {
                Ok(a) => match self.check_code_compliance(&a.code, &a.filename).await {
                    Ok(result) => to_value(result),
                    Err(e) => Err(e),
                },
                Err(e) => Err(MonitorError::InvalidToolCall(format!(
                    "{TOOL_COMPLIANCE}: {e}"
                ))),
            },
            other => Err(MonitorError::InvalidToolCall(format!("unknown tool '{other}'"))),
        };
        outcome.unwrap_or_else(|e| {
            tracing::warn!(tool = name, error_code = e.error_code(), error = %e, "tool call failed");
            json!({ "error": e.tool_string() })
        })
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, MonitorError> {
    serde_json::to_value(value)
        .map_err(|e| MonitorError::InvalidToolCall(format!("unserializable response: {e}")))
}

#[async_trait]
impl QuerySurface for MonitorHandle {
    async fn health(&self) -> HealthStatus {
        match self.state().await {
            Ok(state) => HealthStatus {
                healthy: state.is_running(),
                monitor: state,
                timestamp: Utc::now(),
            },
            Err(_) => HealthStatus {
                healthy: false,
                monitor: MonitorState::Idle,
                timestamp: Utc::now(),
            },
        }
    }

    async fn get_organizational_context(&self) -> Result<OrganizationalContext, MonitorError> {
        self.organizational_context().await
    }

    async fn check_code_compliance(
        &self,
        code: &str,
        filename: &str,
    ) -> Result<AnalysisResult, MonitorError> {
        MonitorHandle::check_code_compliance(self, code, filename).await
    }
}
