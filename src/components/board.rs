use yew::prelude::*;

use super::icon::Icon;
use crate::engine::Engine;
use crate::model::catalog;

/// The full-viewport container with the 21 catalog icons. The mount effect
/// builds the gesture engine over the rendered elements and tears it down
/// on unmount.
#[function_component(Board)]
pub fn board() -> Html {
    use_effect_with((), move |_| {
        let engine = Engine::mount();
        move || drop(engine)
    });

    html! {
        <div id="garden" style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116;">
            {
                for catalog().into_iter().map(|(id, glyph)| {
                    html! { <Icon key={id.to_string()} id={id.to_string()} glyph={glyph} /> }
                })
            }
        </div>
    }
}
