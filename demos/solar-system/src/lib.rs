use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod game;
pub mod orbit;
pub use game::SolarSystem;

orrery_web::export_orrery!(SolarSystem, "solar-system");
