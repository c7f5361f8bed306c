//! Client for the aviationstack flight data API.

pub mod client;

pub use client::AviationstackClient;
