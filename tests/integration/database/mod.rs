//! Database-level integration tests

mod migrations_test;
