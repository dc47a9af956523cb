pub mod api;
pub mod editor;
pub mod email;
pub mod forms;
pub mod ids;
pub mod session;
pub mod storage;
pub mod token;
