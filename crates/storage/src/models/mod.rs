pub mod competition;
pub mod country;
pub mod user;

pub use competition::Competition;
pub use country::Country;
pub use user::UserRef;
