//! Game module - drives the deterministic session and mirrors it on screen
//!
//! All game rules live in `coin_grove`; this module owns the Bevy side:
//! collecting keyboard input into input frames, running the session tick on
//! the fixed timestep, and turning session events into sprite despawns and
//! high-score persistence.

use bevy::prelude::*;

use coin_grove::game::coin::CoinPlacement;
use coin_grove::game::events::GameEvent;
use coin_grove::game::tick::{tick, TickConfig};
use coin_grove::{HighScoreStore, InputFrame, SessionState};

pub mod coins;
pub mod components;
pub mod player;
pub mod visuals;
pub mod world;

pub use components::*;

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<FrameInput>()
            // Events
            .add_event::<CoinCollectedEvent>()
            .add_event::<HighScoreEvent>()
            // Session and world setup
            .add_systems(Startup, setup_game)
            // Input is sampled before the fixed loop can consume it
            .add_systems(PreUpdate, player::collect_input)
            // The session advances at the simulation tick rate
            .add_systems(FixedUpdate, advance_session)
            // Visual updates (variable timestep)
            .add_systems(
                Update,
                (
                    player::sync_player_transform,
                    player::animate_player,
                    coins::despawn_collected_coins,
                    coins::animate_coins,
                    visuals::camera_follow,
                    persist_high_score,
                ),
            );
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// The running session plus its tick configuration
#[derive(Resource)]
pub struct Session {
    pub state: SessionState,
    pub config: TickConfig,
}

/// The high-score store backing this machine's profile
#[derive(Resource)]
pub struct ScoreStore(pub HighScoreStore);

/// Input accumulated for the next session tick
#[derive(Resource, Default)]
pub struct FrameInput {
    pub frame: InputFrame,
}

// ============================================================================
// EVENTS
// ============================================================================

/// A coin was collected this tick; its sprite must go
#[derive(Event)]
pub struct CoinCollectedEvent {
    pub coin_id: u32,
}

/// The persisted high score must change
#[derive(Event)]
pub enum HighScoreEvent {
    Changed(u32),
    Reset,
}

// ============================================================================
// GAME SETUP
// ============================================================================

fn setup_game(mut commands: Commands) {
    let map = world::load_map();

    let store = HighScoreStore::open_default();
    let stored = store.load();
    info!("Stored high score: {}", stored);

    let seed: u64 = rand::random();
    let mut state = SessionState::new(map, seed, stored);
    if let Err(err) = state.populate_coins(&CoinPlacement::default()) {
        error!("Coin placement failed: {}", err);
    }
    info!("Session seed {} with {} coins", seed, state.remaining_coins());

    world::spawn_tiles(&mut commands, &state.map);
    player::spawn_player(&mut commands, &state);
    coins::spawn_coins(&mut commands, &state);

    commands.insert_resource(ScoreStore(store));
    commands.insert_resource(Session {
        state,
        config: TickConfig::default(),
    });
}

// ============================================================================
// SESSION TICK
// ============================================================================

/// Run one core tick and fan its events out to the Bevy side
fn advance_session(
    mut session: ResMut<Session>,
    mut input: ResMut<FrameInput>,
    mut collected: EventWriter<CoinCollectedEvent>,
    mut high_score_events: EventWriter<HighScoreEvent>,
) {
    let frame = input.frame;
    // The reset edge is consumed by exactly one tick
    input.frame.set(InputFrame::FLAG_RESET, false);

    let Session { state, config } = &mut *session;
    for event in tick(state, &frame, config).events {
        match event {
            GameEvent::CoinCollected { coin_id, score, .. } => {
                info!("Collected coin {} (score {})", coin_id, score);
                collected.send(CoinCollectedEvent { coin_id });
            }
            GameEvent::HighScoreChanged { high_score, .. } => {
                high_score_events.send(HighScoreEvent::Changed(high_score));
            }
            GameEvent::HighScoreReset { .. } => {
                high_score_events.send(HighScoreEvent::Reset);
            }
        }
    }
}

/// Apply score events to the store the moment they happen
fn persist_high_score(mut events: EventReader<HighScoreEvent>, store: Res<ScoreStore>) {
    for event in events.read() {
        let result = match event {
            HighScoreEvent::Changed(value) => store.0.save(*value),
            HighScoreEvent::Reset => store.0.clear(),
        };
        if let Err(err) = result {
            error!("High score persistence failed: {}", err);
        }
    }
}
