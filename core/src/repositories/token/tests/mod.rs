//! Tests for token stores
