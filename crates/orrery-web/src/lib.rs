pub mod canvas;
pub mod host;
pub mod runner;
pub mod session;

pub use canvas::Canvas2dRenderer;
pub use host::{mount, unmount, BrowserSession, HostCallbacks, SessionSlot, WebHost};
pub use runner::GameRunner;
pub use session::{Host, Session};
pub use orrery_engine;

use orrery_engine::LegendEntry;

/// Legend rows as a JSON array of `{ "name", "color" }` objects.
pub fn legend_json(entries: &[LegendEntry]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|err| {
        log::warn!("legend serialization failed: {err}");
        String::from("[]")
    })
}

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the mounted session
/// - `orrery_mount` / `orrery_unmount` lifecycle entry points
/// - read accessors for the selection, the legend and the loop state
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyScene;
///
/// orrery_web::export_orrery!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$game_type`: a type implementing `orrery_engine::Game` with a `new()` constructor
/// - `$game_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_orrery {
    ($game_type:ty, $game_name:literal) => {
        thread_local! {
            static SESSION: $crate::SessionSlot<$game_type> =
                ::std::rc::Rc::new(::std::cell::RefCell::new(None));
        }

        /// Mount the scene into the element with `container_id` (or the page
        /// body). Mounting again replaces the running scene.
        #[wasm_bindgen]
        pub fn orrery_mount(
            container_id: Option<String>,
            config_json: Option<String>,
        ) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            SESSION
                .with(|slot| {
                    $crate::mount(slot, game, container_id.as_deref(), config_json.as_deref())
                })
                .map_err(|err| {
                    log::error!("{}: mount failed: {}", $game_name, err);
                    JsValue::from_str(&err.to_string())
                })?;
            log::info!("{}: mounted", $game_name);
            Ok(())
        }

        /// Stop the scene and release the canvas and listeners.
        #[wasm_bindgen]
        pub fn orrery_unmount() -> bool {
            let unmounted = SESSION.with(|slot| $crate::unmount(slot));
            if unmounted {
                log::info!("{}: unmounted", $game_name);
            }
            unmounted
        }

        #[wasm_bindgen]
        pub fn orrery_selected_planet() -> Option<String> {
            SESSION.with(|slot| {
                slot.borrow()
                    .as_ref()
                    .and_then(|s| s.runner().selection().get().map(str::to_owned))
            })
        }

        /// Bumped on every click, so repeated clicks on the same planet are
        /// distinguishable from no click.
        #[wasm_bindgen]
        pub fn orrery_selection_generation() -> u32 {
            SESSION.with(|slot| {
                slot.borrow()
                    .as_ref()
                    .map_or(0, |s| s.runner().selection().generation())
            })
        }

        #[wasm_bindgen]
        pub fn orrery_legend_json() -> String {
            let legend = $crate::orrery_engine::Game::legend(&<$game_type>::new());
            $crate::legend_json(&legend)
        }

        #[wasm_bindgen]
        pub fn orrery_is_running() -> bool {
            SESSION.with(|slot| {
                slot.borrow().as_ref().map_or(false, |s| s.runner().is_running())
            })
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_serializes_as_array() {
        let json = legend_json(&[
            LegendEntry::new("Mercury", "#8c7c6e"),
            LegendEntry::new("Venus", "#e6c389"),
        ]);
        assert_eq!(
            json,
            r##"[{"name":"Mercury","color":"#8c7c6e"},{"name":"Venus","color":"#e6c389"}]"##
        );
    }

    #[test]
    fn empty_legend_is_empty_array() {
        assert_eq!(legend_json(&[]), "[]");
    }
}
