//! HTTP gateway library for the `pcheck` server binary.

pub mod gateway;
