pub mod gateway;
pub mod notifier;
pub mod submitter;

pub use gateway::{HttpOrderGateway, MockOrderGateway, MockReply};
pub use notifier::Notifier;
pub use submitter::{OrderError, OrderSubmitter, SubmitterState, ValidationError};
