pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::error::InitError;
pub use api::game::{CameraConfig, EngineContext, Game, GameConfig};
pub use api::selection::Selection;
pub use api::types::{EntityId, LegendEntry};
pub use components::entity::Entity;
pub use components::mesh::{Color, MeshComponent, MeshShape, Shading};
pub use core::frame_loop::{FrameLoop, LoopState};
pub use core::scene::Scene;
pub use renderer::camera::{PerspectiveCamera, Ray};
pub use renderer::mesh_instance::{DrawList, MeshInstance};
pub use renderer::traits::{FrameData, Renderer, SurfaceSize};
pub use systems::lighting::{AmbientLight, LightState, PointLight};
pub use systems::picking::{pick, screen_to_ndc, PickHit};
pub use systems::render::{back_to_front, build_draw_list};
pub use systems::viewport::{apply_resize, Viewport};

pub use extensions::{LocalTransform, TransformGraph};

pub use glam;
