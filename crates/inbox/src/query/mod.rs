//! Query API for UI consumption
//!
//! Provides read helpers that return data shaped for the inbox sidebar,
//! the message thread view, and the reply box.

mod threads;

pub use threads::{
    ThreadDetail, ThreadSummary, count_unread, filter_by_classification,
    get_active_thread_detail, get_thread_messages, list_threads, search_threads,
};
