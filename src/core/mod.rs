// src/core/mod.rs

pub mod cancellation_token;
pub mod count_dictionary;

pub use cancellation_token::CancellationToken;
pub use count_dictionary::CountDictionary;
