use yew::prelude::*;

#[function_component]
pub fn HelpPanel() -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let key_style =
        "min-width:86px; flex-shrink:0; font-weight:600; color:#58a6ff; text-align:right;";
    html! {
        <div style="position:absolute; bottom:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:6px; font-size:12px;">
            <div style="font-weight:600; margin-bottom:2px;">{"Controls"}</div>
            <div style={row_style}>
                <span style={key_style}>{"Drag"}</span>
                <span>{"move an icon"}</span>
            </div>
            <div style={row_style}>
                <span style={key_style}>{"Pinch"}</span>
                <span>{"resize and twist (two fingers)"}</span>
            </div>
            <div style={row_style}>
                <span style={key_style}>{"Wheel"}</span>
                <span>{"resize while holding the icon"}</span>
            </div>
            <div style={row_style}>
                <span style={key_style}>{"Right-click"}</span>
                <span>{"rotate 15°"}</span>
            </div>
            <div style={row_style}>
                <span style={key_style}>{"↑ ↓ ← →"}</span>
                <span>{"resize / rotate the selected icon"}</span>
            </div>
        </div>
    }
}
