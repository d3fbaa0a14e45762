pub mod camera;
pub mod mesh_instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{PerspectiveCamera, Ray};
pub use mesh_instance::{DrawList, MeshInstance};
pub use traits::{FrameData, Renderer, SurfaceSize};
