pub mod alert;
pub mod password;
