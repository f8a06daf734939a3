pub mod approvals;
pub mod security;
