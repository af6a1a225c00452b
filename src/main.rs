//! Risky Spin entry point
//!
//! Native: a headless runner that spins the wheel against a file-backed
//! preference store. Web: binds the engine to LocalStorage and exposes
//! `spin`/`finish_reveal` to the page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_wheel {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use risky_spin::platform::LocalStorageStore;
    use risky_spin::{Catalog, SpinEngine, WheelSettings};

    const DEFAULT_CATALOG: &str = include_str!("../assets/wheel.json");

    thread_local! {
        static ENGINE: RefCell<Option<SpinEngine<Catalog, LocalStorageStore>>> =
            const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Risky Spin starting...");

        let store = match LocalStorageStore::open() {
            Ok(store) => store,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        let catalog = match Catalog::from_json(DEFAULT_CATALOG) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        let settings = WheelSettings::load(&store);
        let engine = SpinEngine::from_settings(catalog, store, &settings);
        log::info!("Resumed at level {}", engine.level());
        ENGINE.with(|cell| *cell.borrow_mut() = Some(engine));
    }

    /// Spin request from the page. Returns the outcome as JSON, or null if refused.
    #[wasm_bindgen]
    pub fn spin() -> Option<String> {
        ENGINE.with(|cell| {
            let mut guard = cell.borrow_mut();
            let engine = guard.as_mut()?;
            match engine.request_spin() {
                Ok(outcome) => serde_json::to_string(&outcome).ok(),
                Err(e) => {
                    log::info!("Spin refused: {}", e);
                    None
                }
            }
        })
    }

    /// Called by the page once the wheel animation has settled
    #[wasm_bindgen]
    pub fn finish_reveal() {
        ENGINE.with(|cell| {
            if let Some(engine) = cell.borrow_mut().as_mut() {
                engine.finish_reveal();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_wheel::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use risky_spin::consts::SAVE_STORAGE_KEY;
    use risky_spin::platform::{FileStore, KeyValueStore};
    use risky_spin::reveal::{RevealScheduler, TimedReveals, plan_reveal};
    use risky_spin::{Catalog, CatalogError, CatalogProvider, SpinEngine, WheelSettings};

    const DEFAULT_CATALOG: &str = include_str!("../assets/wheel.json");
    const DEFAULT_STORE: &str = "risky_spin_prefs.json";
    /// Frame step used to drive reveal timers
    const FRAME_DT: f32 = 1.0 / 60.0;

    /// Spin the wheel headlessly against a file-backed preference store
    #[derive(Debug, Parser)]
    #[command(name = "risky-spin", about = "Risky Spin wheel runner")]
    struct Cli {
        /// Number of spins to play
        #[arg(long, default_value_t = 10)]
        spins: u32,
        /// Catalog JSON file (defaults to the bundled wheel)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Preference store file
        #[arg(long, default_value = DEFAULT_STORE)]
        store: PathBuf,
        /// Fixed RNG seed (overrides the stored settings)
        #[arg(long)]
        seed: Option<u64>,
        /// Clear saved progress before spinning
        #[arg(long)]
        reset: bool,
    }

    fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
        match path {
            Some(path) => Catalog::load_file(path),
            None => Catalog::from_json(DEFAULT_CATALOG),
        }
    }

    pub fn run() {
        let args = Cli::parse();

        let catalog = match load_catalog(args.catalog.as_deref()) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };

        let mut store = match FileStore::open(&args.store) {
            Ok(store) => store,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };
        if args.reset {
            if let Err(e) = store.remove(SAVE_STORAGE_KEY) {
                log::warn!("Failed to clear save: {}", e);
            }
        }

        let mut settings = WheelSettings::load(&store);
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        let slice_count = catalog.len();
        let mut presentation_rng = Pcg32::seed_from_u64(settings.resolve_seed() ^ 0x5EED);
        let mut engine = SpinEngine::from_settings(catalog, store, &settings);
        let mut reveals = TimedReveals::new();

        println!(
            "Level {} ({}), next safe zone {}, next super zone {}",
            engine.level(),
            engine.progression().zone().as_str(),
            engine.progression().next_safe_zone(),
            engine.progression().next_super_zone()
        );

        for _ in 0..args.spins {
            let outcome = match engine.request_spin() {
                Ok(outcome) => outcome,
                Err(e) => {
                    println!("Spin refused: {}", e);
                    break;
                }
            };
            reveals.schedule_reveal(plan_reveal(outcome, slice_count, &settings, &mut presentation_rng));

            // Spin requests are rejected until the reveal lands
            while !reveals.is_idle() {
                for plan in reveals.advance(FRAME_DT) {
                    let o = &plan.outcome;
                    if o.is_penalty {
                        println!("L{:>3}  BOMB! progress reset to level {}", o.drawn_level, o.level);
                    } else {
                        println!(
                            "L{:>3}  +{} {} (wheel stops at {:.1} deg)",
                            o.drawn_level, o.amount, o.reward_key, plan.rest_angle
                        );
                    }
                    engine.finish_reveal();
                }
            }
        }

        let bar: Vec<String> = engine
            .progression()
            .window_cells()
            .map(|c| if c.active { format!("[{}]", c.level) } else { c.level.to_string() })
            .collect();
        println!("\nLevel bar: {}", bar.join(" "));
        println!("Rewards:");
        for entry in engine.ledger().iter() {
            println!("  {:<10} total {:>6}  x{}", entry.key, entry.total, entry.count);
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_defaults() {
            let cli = Cli::try_parse_from(["risky-spin"]).unwrap();
            assert_eq!(cli.spins, 10);
            assert_eq!(cli.store, PathBuf::from(DEFAULT_STORE));
            assert!(cli.catalog.is_none() && cli.seed.is_none() && !cli.reset);
        }

        #[test]
        fn test_cli_parses_flags() {
            let cli = Cli::try_parse_from([
                "risky-spin", "--spins", "3", "--seed", "42", "--catalog", "wheel.json", "--reset",
            ])
            .unwrap();
            assert_eq!(cli.spins, 3);
            assert_eq!(cli.seed, Some(42));
            assert_eq!(cli.catalog, Some(PathBuf::from("wheel.json")));
            assert!(cli.reset);
        }

        #[test]
        fn test_cli_rejects_bad_values() {
            assert!(Cli::try_parse_from(["risky-spin", "--spins", "abc"]).is_err());
            assert!(Cli::try_parse_from(["risky-spin", "--seed", "-1"]).is_err());
            assert!(Cli::try_parse_from(["risky-spin", "--turbo"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Risky Spin (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
