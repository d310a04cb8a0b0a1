//! Tauri Commands
//!
//! 프론트엔드에서 호출하는 명령어 모듈 모음

pub mod payments;
pub mod roster;
pub mod session;
pub mod settings;
pub mod storage;
pub mod submission;
