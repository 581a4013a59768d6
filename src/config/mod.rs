//! Configuration module

mod credentials;
mod site;

pub use credentials::SmtpCredentials;
pub use site::SiteConfig;
pub use site::SmtpConfig;
