//! Application events and the broadcast bus
//!
//! Use cases publish facts about what happened; interested listeners react
//! asynchronously. The only coupling between publisher and listener is the
//! event payload.

mod bus;
mod subscription_bootstrap;

pub use bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use subscription_bootstrap::spawn_subscription_bootstrap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::values::{CompanyId, PlanId};

/// Events crossing use-case boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AppEvent {
    /// A company finished signup; its initial subscription is still pending
    CompanyCreated(CompanyCreatedEvent),
}

impl AppEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AppEvent::CompanyCreated(_) => "company_created",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCreatedEvent {
    pub company_id: CompanyId,
    pub plan_id: PlanId,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AppEvent,
}

impl EventMessage {
    pub fn new(event: AppEvent) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
