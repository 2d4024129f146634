//! Coin Chase headless driver
//!
//! Runs a session in idle mode on a fixed-timestep loop and logs what the
//! renderer and HUD would receive. Useful for soak runs and balance checks.
//!
//! Usage: `coin-chase [tuning.json] [seed]`

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use coin_chase::Tuning;
use coin_chase::consts::MAX_SUBSTEPS;
use coin_chase::sim::{GameEvent, Session, TickInput, tick};

/// Stop after this much simulated time if the autopilot survives
const MAX_RUN_SECS: u64 = 60;

/// Frame loop state
struct Driver {
    session: Session,
    input: TickInput,
    accumulator: f32,
    last_time: Instant,
    max_ticks: u64,
}

impl Driver {
    fn new(session: Session) -> Self {
        let max_ticks = MAX_RUN_SECS * session.tuning.tick_rate_hz as u64;
        Self {
            session,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            accumulator: 0.0,
            last_time: Instant::now(),
            max_ticks,
        }
    }

    fn finished(&self) -> bool {
        !self.session.is_active() || self.session.time_ticks >= self.max_ticks
    }

    /// One rendered frame: run as many fixed ticks as the elapsed time allows
    fn frame(&mut self, dt_secs: f32) {
        let dt = self.session.tuning.tick_secs();
        self.accumulator += dt_secs;

        let mut substeps = 0;
        while self.accumulator >= dt && substeps < MAX_SUBSTEPS {
            tick(&mut self.session, &self.input);
            self.accumulator -= dt;
            substeps += 1;
        }
        // Drop the backlog instead of spiralling
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }

        for event in self.session.drain_events() {
            report(&event);
        }
    }

    fn run(&mut self) {
        while !self.finished() {
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_time).as_secs_f32();
            self.last_time = now;
            self.frame(elapsed);
            std::thread::sleep(Duration::from_secs_f32(self.session.tuning.tick_secs()));
        }
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::HudChanged { score, lives } => {
            log::info!("Score: {} | Lives: {}", score, lives);
        }
        GameEvent::GameOver { final_score } => {
            log::info!("Game Over! Final Score: {}", final_score);
        }
        GameEvent::Explosion { origin, color, count } => {
            log::debug!("{} {:?} particles at {}", count, color, origin);
        }
        GameEvent::EntitySpawned { kind, id, position } => {
            log::trace!("+{:?} {} at {}", kind, id.0, position);
        }
        GameEvent::EntityDespawned { kind, id } => {
            log::trace!("-{:?} {}", kind, id.0);
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Coin Chase (headless) starting...");

    let mut args = std::env::args().skip(1);

    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default tuning", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

    let mut driver = Driver::new(Session::with_tuning(seed, tuning));
    driver.run();

    let session = &driver.session;
    log::info!(
        "Stopped after {} ticks: score {}, lives {}, phase {:?}",
        session.time_ticks,
        session.state.score,
        session.state.lives,
        session.phase()
    );
}
