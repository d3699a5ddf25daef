pub mod batch;
pub mod output;
pub mod slug;
