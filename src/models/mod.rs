pub mod punch;
pub mod punch_kind;
pub mod shift;
pub mod site;
pub mod worker;
