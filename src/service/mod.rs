pub mod password;
pub mod registration;

pub use registration::RegistrationService;
