use crate::settings::{Settings, SettingsView};
use crate::utils::*;
use bitflags::bitflags;
use chrono::prelude::*;
use gloo::timers::callback::Interval;
use serde::{Deserialize, Serialize};
use shoutou_core as game;
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    InProgress,
    Won,
    /// The generator handed out an all-dark board; a win with zero moves.
    WonAtStart,
}

impl ViewGameState {
    fn is_won(self) -> bool {
        matches!(self, Self::Won | Self::WonAtStart)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GameSession {
    pub engine: game::PlayEngine,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub move_count: u32,
}

impl GameSession {
    fn new(engine: game::PlayEngine) -> Self {
        Self {
            engine,
            started_at: None,
            ended_at: None,
            move_count: 0,
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn view_state(&self) -> ViewGameState {
        use game::EngineState::*;
        match self.engine.state() {
            InProgress => ViewGameState::InProgress,
            Won if self.move_count == 0 => ViewGameState::WonAtStart,
            Won => ViewGameState::Won,
        }
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        self.move_count = self.move_count.saturating_add(1);

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.engine.is_won() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::FlipOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::FlipOutcome| outcome.has_update())
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellPointerState {
    pos: game::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    UpdateTime,
    NewGame,
    ToggleSettings,
    UpdateSettings(Settings),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: game::Coord,
    y: game::Coord,
    lit: bool,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        x,
        y,
        lit,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!("cell", lit.then_some("lit"));
    if pressed {
        class.push("pressed");
    }

    let pointer_callback = |callback: &Callback<CellMsg>| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            let pointer_state = CellPointerState {
                pos: (x, y),
                buttons,
            };
            callback.emit(CellMsg::Update(pointer_state));
            log::trace!("({}, {}) pointer update ({:?})", x, y, buttons);
        })
    };

    let onmousedown = pointer_callback(&callback);
    let onmouseup = pointer_callback(&callback);
    let onmouseenter = pointer_callback(&callback);

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            callback.emit(CellMsg::Leave);
            log::trace!("({}, {}) pointer leave", x, y);
        })
    };

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave}/>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: Settings,
    game: GameSession,
    seed: u64,
    prev_time: u32,
    settings_open: bool,
    current_cell_state: Option<CellPointerState>,
    _timer_interval: Interval,
}

impl GameView {
    fn new_session(settings: &Settings, seed: u64) -> GameSession {
        use game::{GridGenerator, RandomGridGenerator};

        let config = settings.game_config();
        let grid = RandomGridGenerator::new(seed).generate(config);
        GameSession::new(game::PlayEngine::new(grid))
    }

    fn get_time(&self) -> u32 {
        self.game.elapsed_secs(utc_now())
    }

    fn get_game_state(&self) -> ViewGameState {
        self.game.view_state()
    }

    fn get_game_state_class(&self) -> Classes {
        let mid_press = matches!(
            self.current_cell_state,
            Some(CellPointerState {
                buttons: MouseButtons::LEFT,
                ..
            })
        );

        classes!(match self.get_game_state() {
            ViewGameState::InProgress if mid_press => "mid-press",
            ViewGameState::InProgress => "in-progress",
            ViewGameState::Won => "win",
            ViewGameState::WonAtStart => "instant-win",
        })
    }

    fn flip_cell(&mut self, coords: game::Coord2) -> bool {
        let now = utc_now();
        let game = &mut self.game;

        let updated = match game.engine.flip(coords) {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                // the won view suppresses cells, so only a stale event gets here
                log::debug!("flip rejected: {}", err);
                false
            }
        };

        if updated {
            game.on_successful_move(now);
        }

        updated
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn is_pressed(&self, coords: game::Coord2) -> bool {
        if self.get_game_state().is_won() {
            return false;
        }

        matches!(
            self.current_cell_state,
            Some(CellPointerState {
                pos,
                buttons: MouseButtons::LEFT,
            }) if pos == coords
        )
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let (cols, rows) = self.game.engine.size();

        html! {
            <table class="board">
                {
                    for (0..rows).map(|y| html! {
                        <tr>
                            {
                                for (0..cols).map(|x| {
                                    let pos = (x, y);
                                    let lit = self.game.engine.is_lit(pos);
                                    let pressed = self.is_pressed(pos);
                                    let callback = ctx.link().callback(Msg::CellEvent);
                                    html! {
                                        <CellView {x} {y} {lit} {callback} {pressed}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_winner(&self) -> Html {
        html! {
            <div class="winner">
                <div class="neon-orange">{"YOU"}</div>
                <div class="neon-blue">{"WIN!"}</div>
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings = LocalOrDefault::local_or_default();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);

        Self {
            game: Self::new_session(&settings, seed),
            settings,
            seed,
            prev_time: 0,
            settings_open: false,
            current_cell_state: None,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Leave) => {
                log::trace!("cell leave");
                self.current_cell_state.take().is_some()
            }
            CellEvent(Update(cell_state)) => {
                log::trace!("cell update: {:?}", cell_state);
                if cell_state.buttons.is_empty() {
                    match self.current_cell_state.take() {
                        None => false,
                        Some(CellPointerState { pos, buttons }) => {
                            if buttons == MouseButtons::LEFT {
                                log::debug!("flip cell: {:?}", pos);
                                self.flip_cell(pos);
                            }
                            true
                        }
                    }
                } else {
                    match self.current_cell_state.replace(cell_state) {
                        None => true,
                        Some(CellPointerState { pos, buttons }) => {
                            (pos != cell_state.pos)
                                || ((buttons & MouseButtons::LEFT)
                                    != (cell_state.buttons & MouseButtons::LEFT))
                        }
                    }
                }
            }
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.seed = js_random_seed();
                self.game = Self::new_session(&self.settings, self.seed);
                self.current_cell_state = None;
                true
            }
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            UpdateSettings(settings) => {
                self.settings_open = false;
                if self.settings != settings {
                    settings.local_save();
                    self.settings = settings;
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let game_state = self.get_game_state();
        let game_state_class = self.get_game_state_class();
        let lit_left = format_for_counter(self.game.engine.lit_count() as i32);
        let elapsed_time = format_for_counter(self.get_time() as i32);

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_show_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_apply_settings = ctx.link().callback(UpdateSettings);
        let cb_cancel_settings = ctx.link().callback(|_| ToggleSettings);

        html! {
            <div class="shoutou" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <small onclick={cb_show_settings}>{"···"}</small>
                <header>
                    <div class="neon-orange">{"Lights"}</div>
                    <div class="neon-blue">{"Out"}</div>
                </header>
                <nav>
                    <aside>{lit_left}</aside>
                    <span><button class={game_state_class} onclick={cb_new_game}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                {
                    // the winner view replaces the board entirely
                    if game_state.is_won() {
                        self.view_winner()
                    } else {
                        self.view_board(ctx)
                    }
                }
                <SettingsView
                    open={self.settings_open}
                    settings={self.settings}
                    on_apply={cb_apply_settings}
                    on_cancel={cb_cancel_settings}/>
            </div>
        }
    }
}
