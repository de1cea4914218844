pub mod order;
pub mod view;
