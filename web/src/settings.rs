use crate::theme::Theme;
use crate::utils::*;
use serde::{Deserialize, Serialize};
use shoutou_core as game;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Board settings for the next game; the current game keeps the config it
/// was created with.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub cols: game::Coord,
    pub rows: game::Coord,
    pub lit_chance: f64,
}

impl Settings {
    /// Validated engine config; whatever was in localStorage may be stale or
    /// hand-edited, so fall back to the defaults instead of panicking.
    pub(crate) fn game_config(&self) -> game::GameConfig {
        game::GameConfig::new((self.cols, self.rows), self.lit_chance).unwrap_or_else(|err| {
            log::warn!("stored settings are invalid ({}), using defaults", err);
            game::GameConfig::default()
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        let config = game::GameConfig::default();
        Self {
            cols: config.size.0,
            rows: config.size.1,
            lit_chance: config.lit_chance,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "shoutou:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub on_apply: Callback<Settings>,
    pub on_cancel: Callback<()>,
}

fn input_value<T: core::str::FromStr>(input: &NodeRef) -> Option<T> {
    input.cast::<HtmlInputElement>()?.value().parse().ok()
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let cols_ref = use_node_ref();
    let rows_ref = use_node_ref();
    let chance_ref = use_node_ref();

    let onapply = {
        let cols_ref = cols_ref.clone();
        let rows_ref = rows_ref.clone();
        let chance_ref = chance_ref.clone();
        let current = props.settings;
        let on_apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| {
            let settings = Settings {
                cols: input_value(&cols_ref).unwrap_or(current.cols).clamp(1, 32),
                rows: input_value(&rows_ref).unwrap_or(current.rows).clamp(1, 32),
                lit_chance: input_value(&chance_ref)
                    .unwrap_or(current.lit_chance)
                    .clamp(0.0, 1.0),
            };
            on_apply.emit(settings);
        })
    };

    let oncancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let theme_link = |label: &'static str, theme: Option<Theme>| {
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            Theme::apply(theme);
        });
        html! {
            <li><a href="#" {onclick}>{label}</a></li>
        }
    };

    html! {
        <Modal>
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <label>
                    {"Columns"}
                    <input ref={cols_ref} type="number" min="1" max="32"
                        value={props.settings.cols.to_string()}/>
                </label>
                <label>
                    {"Rows"}
                    <input ref={rows_ref} type="number" min="1" max="32"
                        value={props.settings.rows.to_string()}/>
                </label>
                <label>
                    {"Chance a light starts on"}
                    <input ref={chance_ref} type="number" min="0" max="1" step="0.05"
                        value={props.settings.lit_chance.to_string()}/>
                </label>
                <ul>
                    { theme_link("Auto", None) }
                    { theme_link("Light", Some(Theme::Light)) }
                    { theme_link("Dark", Some(Theme::Dark)) }
                </ul>
                <footer>
                    <button type="reset" onclick={oncancel}>{"Cancel"}</button>
                    <button onclick={onapply}>{"Apply"}</button>
                </footer>
            </article>
        </dialog>
        </Modal>
    }
}
