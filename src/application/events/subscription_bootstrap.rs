//! Initial subscription provisioning
//!
//! Listens for company signups and creates the first subscription. This
//! runs off the signup path on purpose: the company and its admin must
//! land even when provisioning fails, and a missed subscription is
//! repairable later through a plan change.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use super::{AppEvent, SharedEventBus};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::subscription::Subscription;

/// Spawn the listener task. It runs until the bus is dropped.
pub fn spawn_subscription_bootstrap(
    bus: SharedEventBus,
    repos: Arc<dyn RepositoryProvider>,
) -> tokio::task::JoinHandle<()> {
    let mut subscriber = bus.subscribe();
    tokio::spawn(async move {
        while let Some(message) = subscriber.recv().await {
            match message.event {
                AppEvent::CompanyCreated(event) => {
                    let subscription =
                        Subscription::start(event.company_id, event.plan_id, Utc::now());
                    match repos.companies().save_subscription(subscription).await {
                        Ok(sub) => {
                            info!(
                                company_id = %event.company_id,
                                plan_id = %event.plan_id,
                                subscription_id = %sub.id,
                                "initial subscription created"
                            );
                        }
                        Err(e) => {
                            error!(
                                company_id = %event.company_id,
                                error = %e,
                                "initial subscription failed, repair via plan change"
                            );
                        }
                    }
                }
            }
        }
    })
}

// ── Tests ──────────────────────────────────────────────────────
