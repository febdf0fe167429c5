//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, hard
//! navigation) behind small traits so session and network logic can be
//! exercised natively in tests.

pub mod navigation;
pub mod storage;
