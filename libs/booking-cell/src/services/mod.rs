pub mod lifecycle;
pub mod reminder;
pub mod reschedule;
pub mod store;
pub mod wizard;
