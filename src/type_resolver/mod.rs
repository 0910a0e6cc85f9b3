//! Structural type resolution.
//!
//! Type aliases are stored in the same environments as values. Resolving a
//! type replaces every alias reference with the type it names, recursing
//! through arrays, unions, intersections, function signatures and struct
//! members, so chains of aliases flatten in a single call.

pub mod type_resolver;

#[cfg(test)]
mod tests;
