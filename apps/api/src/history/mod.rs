//! Generated-email history: list, inspect, annotate outcomes, edit drafts.

pub mod handlers;
