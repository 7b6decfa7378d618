pub mod assessment;
pub mod candidate;
pub mod link;
pub mod principal;
pub mod session;
pub mod user;
pub mod vendor;
