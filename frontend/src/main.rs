use crate::app::App;

mod api;
mod app;
mod components;
mod context;
mod pages;
mod router;
mod storage;

fn main() {
    yew::Renderer::<App>::new().render();
}
