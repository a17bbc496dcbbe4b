pub mod badge;

pub use badge::Badge as UiBadge;
