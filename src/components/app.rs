use serde::{Deserialize, Serialize};
use yew::prelude::*;

use super::ElasticScrollView;
use crate::util::clog;

const SETTINGS_KEY: &str = "es_settings";

/// Demo-shell preferences, persisted across visits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub zoom: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

/// Hosting shell: mounts one elastic scroller with demo page content.
/// Everything gesture-related lives inside the scroll view itself.
#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(Settings::default);

    // Load persisted settings
    {
        let settings = settings.clone();
        use_effect_with((), move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(Some(raw)) = store.get_item(SETTINGS_KEY) {
                        if let Ok(s) = serde_json::from_str(&raw) {
                            settings.set(s);
                        }
                    }
                }
            }
            || ()
        });
    }
    // Persist settings changes
    {
        let settings = *settings;
        use_effect_with(settings, move |s| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(raw) = serde_json::to_string(s) {
                        let _ = store.set_item(SETTINGS_KEY, &raw);
                    }
                }
            }
            || ()
        });
    }

    let zoom_in = {
        let settings = settings.clone();
        Callback::from(move |_: MouseEvent| {
            let mut s = *settings;
            s.zoom = (s.zoom * 1.25).clamp(0.5, 3.0);
            clog(&format!("zoom: {:.2}", s.zoom));
            settings.set(s);
        })
    };
    let zoom_out = {
        let settings = settings.clone();
        Callback::from(move |_: MouseEvent| {
            let mut s = *settings;
            s.zoom = (s.zoom * 0.8).clamp(0.5, 3.0);
            clog(&format!("zoom: {:.2}", s.zoom));
            settings.set(s);
        })
    };

    html! {
        <div style="display:flex; flex-direction:column; height:100vh; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
            <div id="top-bar" style="display:flex; align-items:center; gap:8px; padding:10px 14px; background:#161b22; border-bottom:1px solid #30363d;">
                <span style="font-weight:600;">{"Elastic Scroll"}</span>
                <span style="flex:1;"></span>
                <button onclick={zoom_out}>{"-"}</button>
                <span style="min-width:48px; text-align:center;">{ format!("{:.0}%", settings.zoom * 100.0) }</span>
                <button onclick={zoom_in}>{"+"}</button>
            </div>
            <div style="flex:1; min-height:0;">
                <ElasticScrollView zoom={settings.zoom}>
                    { demo_page() }
                </ElasticScrollView>
            </div>
        </div>
    }
}

fn demo_page() -> Html {
    html! {
        <div style="max-width:640px; margin:0 auto; padding:24px 16px 48px; line-height:1.6;">
            <h1 style="font-size:22px;">{"Stretch past the edges"}</h1>
            <p>
                {"Drag beyond the top or bottom of this page and it stretches \
                  like a rubber band instead of showing the browser's native \
                  overscroll. Let go and it snaps back."}
            </p>
            { for (1..=12).map(section) }
        </div>
    }
}

fn section(i: usize) -> Html {
    html! {
        <div style="margin-top:28px;">
            <h2 style="font-size:17px; border-bottom:1px solid #30363d; padding-bottom:4px;">
                { format!("Section {}", i) }
            </h2>
            <p>
                {"Plain scrolling works as usual anywhere in the middle of the \
                  page. The elastic pull only engages once the scroller sits \
                  exactly at a content edge and the drag keeps pushing past it."}
            </p>
            <p>
                {"Use the zoom buttons in the top bar to scale the content; \
                  the edge detection accounts for the scaled height."}
            </p>
        </div>
    }
}
