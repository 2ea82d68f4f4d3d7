//! Crate-level tests that drive several modules together


mod end_to_end;
