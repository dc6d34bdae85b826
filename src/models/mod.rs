pub mod driver;
pub mod duty_event;
pub mod duty_status;
pub mod hos_state;
pub mod trip;
pub mod violation;
