//! HTTP gateway exposing CRUD on posts backed by a PostgREST data service.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
