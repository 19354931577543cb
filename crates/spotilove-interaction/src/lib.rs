//! HTTP interaction layer: the `reqwest` implementation of `SpotiLoveApi`.

pub mod client;
mod dto;

pub use client::SpotiLoveApiClient;
