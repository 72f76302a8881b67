pub mod dispatch;
pub mod status;
pub mod submit;
