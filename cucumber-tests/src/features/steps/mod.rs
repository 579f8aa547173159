// Decision and projection
pub mod authorization_steps;

// Document administration
pub mod administration_steps;
