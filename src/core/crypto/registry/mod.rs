/*!
Registry for key managers.

This module provides the registry that maps type identifiers to the key
managers implementing them.
*/

pub mod manager;

pub use manager::KeyRegistry;
