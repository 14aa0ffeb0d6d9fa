//! Small stateless helpers shared by the service layer.

pub mod crypto;
pub mod id;
pub mod password;
pub mod token;
pub mod validate;
