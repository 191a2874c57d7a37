use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IconProps {
    /// Stable DOM id the engine resolves at mount (`plant3`, `animal7`, ...).
    pub id: String,
    pub glyph: &'static str,
}

/// One manipulable glyph. Starts centered via the CSS default; once the
/// engine adopts it the inline left/top/transform styles take over.
#[function_component]
pub fn Icon(props: &IconProps) -> Html {
    html! {
        <div
            id={props.id.clone()}
            style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%) scale(1) rotate(0deg); font-size:42px; line-height:1; cursor:grab; user-select:none; -webkit-user-select:none; touch-action:none;"
        >
            { props.glyph }
        </div>
    }
}
