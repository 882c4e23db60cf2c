//! Cross-crate scenario tests for the wotex workspace; see `tests/`.
