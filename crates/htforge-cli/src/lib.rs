// crates/htforge-cli/src/lib.rs
// ============================================================================
// Module: htforge CLI Library
// Description: Shared helpers for the htforge command-line interface.
// Purpose: Provide the message catalog to the binary and its tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! Houses the internationalized message catalog. The binary entry point
//! (`src/main.rs`) imports these helpers so that all user-facing output
//! stays consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
