pub mod common;
pub mod competition;
pub mod wcif;
