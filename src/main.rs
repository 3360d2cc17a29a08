//! Arena Brawl headless harness
//!
//! Runs one match with seeded random input through the fixed-rate driver and
//! reports the result. Rendering and real input devices live elsewhere.
//!
//! Usage: `arena-brawl [players] [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use arena_brawl::{
    MatchSettings, RandomInput, SetupError, Session,
    consts::{SIM_DT, TICKS_PER_SECOND},
    hud::HudView,
};

/// Stop after this much simulated time even if nobody has won
#[cfg(not(target_arch = "wasm32"))]
const MAX_SIM_SECONDS: u32 = 180;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arena Brawl (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds are driven by the host page, not this binary
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), SetupError> {
    let mut args = std::env::args().skip(1);
    let players = match args.next() {
        Some(arg) => arg.parse::<u32>().map_err(|_| SetupError::InvalidArgument {
            name: "player count",
            value: arg,
        })?,
        None => 2,
    };
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>().map_err(|_| SetupError::InvalidArgument {
            name: "seed",
            value: arg,
        })?,
        None => 12345,
    };
    let settings = match args.next() {
        Some(path) => MatchSettings::load(path)?,
        None => MatchSettings::default(),
    };

    let mut session = Session::new(settings)?;
    let mut input = RandomInput::new(seed);
    session.start(players)?;
    log::info!("Match seeded with {seed}");

    for _ in 0..MAX_SIM_SECONDS * TICKS_PER_SECOND {
        if session.current().is_none_or(|state| state.is_terminal()) {
            break;
        }
        session.update(&mut input, SIM_DT);
    }

    let state = session.current().ok_or(SetupError::NoMatch)?;
    let view = HudView::from_state(state);
    match &view.banner {
        Some(banner) => println!("{banner}"),
        None => println!("No winner after {MAX_SIM_SECONDS}s of play"),
    }
    println!("Clock {}  ({} ticks)", view.clock, state.time_ticks);
    for row in &view.players {
        println!(
            "Player {} [{}] {} {}",
            row.id,
            row.color.as_str(),
            row.pips(),
            row.status()
        );
    }

    Ok(())
}
