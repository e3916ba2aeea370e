/*!
Implementations of the built-in key managers.

This module provides concrete key managers for each primitive family.
*/

// Symmetric encryption key managers
pub mod symmetric;

// Signature key managers
pub mod signatures;
