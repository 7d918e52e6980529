// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: the in-memory post store and its persistence adapter.

pub mod storage;
pub mod store;
