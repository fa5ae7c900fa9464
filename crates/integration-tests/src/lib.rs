//! Cross-crate scenario tests live in `tests/`; this library target is
//! intentionally empty.
