//! Integration tests for facet-builder.

mod assign;
mod constructors;
