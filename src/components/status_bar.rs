use crate::model::{IDLE_PROMPT, STATUS_REGION_ID};
use yew::prelude::*;

/// Status region across the top. The engine writes drag coordinates into
/// the inner span by id and restores the idle prompt on release; yew only
/// renders the initial content.
#[function_component]
pub fn StatusBar() -> Html {
    html! {
        <div
            id="top-bar"
            style="position:fixed; top:0; left:0; right:0; z-index:10; background:rgba(22,27,34,0.9); border-bottom:1px solid #30363d; padding:8px 14px; font-size:13px;"
        >
            <span id={STATUS_REGION_ID}>{ IDLE_PROMPT }</span>
        </div>
    }
}
