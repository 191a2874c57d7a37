//! Icon Garden
//!
//! Yew WASM page for arranging emoji icons by drag, pinch, wheel,
//! right-click and keyboard. CSR only; build with `trunk serve`.

mod components;
mod engine;
mod model;
mod state;

use components::app::App;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    let filter = EnvFilter::new("info,icon_garden=debug");
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    yew::Renderer::<App>::new().render();
}
