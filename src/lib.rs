// Copyright 2026 Verwatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Verwatch library — version tracking for client URLs.
//!
//! This library crate exposes the core modules for integration testing.

pub mod cli;
pub mod clients;
pub mod config;
pub mod export;
pub mod extract;
pub mod history;
pub mod pipeline;
pub mod renderer;
pub mod store;
