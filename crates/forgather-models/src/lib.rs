pub mod discussion;
pub mod gateway;
pub mod group;
pub mod locale;
pub mod portal;
pub mod subscription;
pub mod voting;

pub use discussion::{DiscussionMessage, MessageType};
pub use gateway::{GatewayConfig, GatewayId};
pub use group::{Group, GroupStatus, GroupType};
pub use locale::{Direction, Language};
pub use portal::{ClientDashboard, Invoice, InvoiceStatus, Quote, Rfq, RfqStatus, SupplierDashboard};
pub use subscription::{SubscriptionStatus, Tier};
pub use voting::{Vote, VotingSession, VotingSessionStatus, VotingSessionType};
