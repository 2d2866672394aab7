//! End-to-end pipeline tests with in-memory collaborators.

mod from_config;
