//! `window.testingApp`, the hook the automation tools read page state from.

use crate::TestingPage;
use wasm_bindgen::prelude::*;
use zoon::eprintln;

const API_NAME: &str = "testingApp";

pub fn install(page: TestingPage) {
    let Some(window) = web_sys::window() else {
        eprintln!("No window available, {API_NAME} API not installed");
        return;
    };

    let api = js_sys::Object::new();

    // isReady() - true once the page state exists
    let is_ready = Closure::wrap(Box::new(|| true) as Box<dyn Fn() -> bool>);
    js_sys::Reflect::set(&api, &"isReady".into(), is_ready.as_ref()).ok();
    is_ready.forget();

    // snapshot() - PageSnapshot as JSON
    let snapshot = Closure::wrap(Box::new(move || -> String {
        serde_json::to_string(&page.snapshot()).unwrap_or_else(|error| {
            eprintln!("Failed to serialize page snapshot: {error:#?}");
            String::new()
        })
    }) as Box<dyn Fn() -> String>);
    js_sys::Reflect::set(&api, &"snapshot".into(), snapshot.as_ref()).ok();
    snapshot.forget();

    if let Err(error) = js_sys::Reflect::set(&window, &API_NAME.into(), &api) {
        eprintln!("Failed to install {API_NAME} API: {error:?}");
    }
}
