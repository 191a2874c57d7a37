use yew::prelude::*;

use super::{
    board::Board, help_panel::HelpPanel, intro_overlay::IntroOverlay, status_bar::StatusBar,
};

const INTRO_SEEN_KEY: &str = "ig_intro_seen";

#[function_component(App)]
pub fn app() -> Html {
    // Intro overlay shows on first visit only; dismissal persists just the
    // seen flag, never any icon geometry.
    let show_intro = use_state(|| {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                return store.get_item(INTRO_SEEN_KEY).ok().flatten().is_none();
            }
        }
        true
    });
    let hide_intro = {
        let show_intro = show_intro.clone();
        Callback::from(move |_: ()| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.set_item(INTRO_SEEN_KEY, "1");
                }
            }
            show_intro.set(false);
        })
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; color:#c9d1d9; font-family:system-ui, sans-serif;">
            <Board />
            <StatusBar />
            <HelpPanel />
            <IntroOverlay show={*show_intro} hide_intro={hide_intro} />
        </div>
    }
}
