pub mod client;

pub use client::PostgrestRecordStore;
