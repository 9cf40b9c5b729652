pub mod client;

pub use client::{IntelliSocClient, IntelliSocClientBuilder};
