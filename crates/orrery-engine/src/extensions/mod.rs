// extensions/mod.rs
//
// Optional extension modules for the orrery engine.
// Decoupled from core Entity/Scene; games opt in through EngineContext.

pub mod transform;

pub use transform::{TransformGraph, LocalTransform};
