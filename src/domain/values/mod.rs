//! Validated value objects shared by the domain aggregates

pub mod contact;
pub mod email;
pub mod features;
pub mod ids;
pub mod money;
pub mod name;
pub mod password;
pub mod user_limit;

pub use contact::{Address, Phone};
pub use email::Email;
pub use features::Features;
pub use ids::{CompanyId, PlanId, SubscriptionId, UserId};
pub use money::MonthlyPrice;
pub use name::Name;
pub use password::{HashedPassword, PlainPassword};
pub use user_limit::UserLimit;
