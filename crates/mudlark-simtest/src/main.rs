//! Mudlark Headless World Harness
//!
//! Loads a world batch, resolves it, and sweeps the resulting graph and the
//! entity capabilities without any game loop.
//!
//! Usage:
//!   cargo run -p mudlark-simtest
//!   cargo run -p mudlark-simtest -- path/to/world.json --strict
//!   cargo run -p mudlark-simtest -- --grid 8x6 --seed 42 --verbose

use mudlark_core::diagnostics::install_crash_hook;
use mudlark_core::generation::{generate_grid, GridConfig};
use mudlark_core::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashSet, VecDeque};
use std::fs::File;
use tracing_subscriber::EnvFilter;

// ── Bundled sample world ────────────────────────────────────────────────
const SAMPLE_JSON: &str = include_str!("../../../data/sample_world.json");

// ── Arguments ───────────────────────────────────────────────────────────

struct Args {
    path: Option<String>,
    verbose: bool,
    strict: bool,
    grid: Option<(usize, usize)>,
    seed: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        path: None,
        verbose: false,
        strict: false,
        grid: None,
        seed: 0,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => args.verbose = true,
            "--strict" => args.strict = true,
            "--grid" => {
                let value = iter.next().ok_or("--grid needs WIDTHxHEIGHT")?;
                let (w, h) = value
                    .split_once('x')
                    .ok_or_else(|| format!("bad grid size `{}`", value))?;
                let w: usize = w.parse().map_err(|_| format!("bad grid width `{}`", w))?;
                let h: usize = h.parse().map_err(|_| format!("bad grid height `{}`", h))?;
                args.grid = Some((w, h));
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a number")?;
                args.seed = value
                    .parse()
                    .map_err(|_| format!("bad seed `{}`", value))?;
            }
            other if other.starts_with('-') => return Err(format!("unknown flag `{}`", other)),
            other => args.path = Some(other.to_string()),
        }
    }
    Ok(args)
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!(
                "usage: mudlark-simtest [WORLD.json] [--grid WxH] [--seed N] [--strict] [--verbose]"
            );
            std::process::exit(2);
        }
    };

    install_crash_hook();
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Mudlark World Harness ===\n");

    let mut results = Vec::new();

    // 1. Records, load and resolution
    let world = build_world(&args, &mut results);

    if let Some(mut world) = world {
        // 2. Graph shape
        results.extend(validate_graph(&world, &args));

        // 3. Describe fan-out
        results.extend(validate_descriptions(&world, args.verbose));

        // 4. Action exchange
        results.extend(validate_exchanges(&mut world));

        // 5. Movement
        results.extend(validate_movement(&mut world));

        // 6. Bulk release
        results.extend(validate_teardown(world));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Load & Resolve ───────────────────────────────────────────────────

fn read_records(args: &Args) -> Result<(String, WorldRecords), LoadError> {
    if let Some((width, height)) = args.grid {
        let mut rng = StdRng::seed_from_u64(args.seed);
        let config = GridConfig {
            width,
            height,
            ..Default::default()
        };
        let records = generate_grid(&config, &mut rng);
        return Ok((format!("grid {}x{} seed {}", width, height, args.seed), records));
    }
    match &args.path {
        Some(path) => {
            let records = WorldRecords::from_reader(File::open(path)?)?;
            Ok((path.clone(), records))
        }
        None => Ok((
            "bundled sample".to_string(),
            WorldRecords::from_json_str(SAMPLE_JSON)?,
        )),
    }
}

fn build_world(args: &Args, results: &mut Vec<TestResult>) -> Option<World> {
    println!("--- Load & Resolve ---");

    let (source, records) = match read_records(args) {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult {
                name: "records_read".into(),
                passed: false,
                detail: e.to_string(),
            });
            return None;
        }
    };
    results.push(TestResult {
        name: "records_read".into(),
        passed: true,
        detail: format!(
            "{}: {} rooms, {} mobs, {} items",
            source,
            records.rooms.len(),
            records.mobs.len(),
            records.items.len()
        ),
    });

    let options = if args.strict {
        LoadOptions::strict()
    } else {
        LoadOptions::default()
    };

    let batch = match load(&records, options) {
        Ok(b) => b,
        Err(e) => {
            results.push(TestResult {
                name: "world_load".into(),
                passed: false,
                detail: e.to_string(),
            });
            return None;
        }
    };
    results.push(TestResult {
        name: "world_load".into(),
        passed: batch.room_count() == records.rooms.len(),
        detail: format!("{} rooms constructed", batch.room_count()),
    });

    match batch.resolve() {
        Ok(world) => {
            results.push(TestResult {
                name: "world_resolve".into(),
                passed: true,
                detail: "every exit id resolved".into(),
            });
            Some(world)
        }
        Err(e) => {
            results.push(TestResult {
                name: "world_resolve".into(),
                passed: false,
                detail: e.to_string(),
            });
            None
        }
    }
}

// ── 2. Graph ────────────────────────────────────────────────────────────

fn validate_graph(world: &World, args: &Args) -> Vec<TestResult> {
    println!("--- Graph ---");
    let mut results = Vec::new();

    let unresolved: Vec<_> = world
        .rooms()
        .filter(|(_, room)| !room.exits().is_resolved())
        .collect();
    results.push(TestResult {
        name: "graph_all_exits_linked".into(),
        passed: unresolved.is_empty(),
        detail: format!("{} rooms with dangling exit ids", unresolved.len()),
    });

    let one_way = world.one_way_exits();
    results.push(TestResult {
        name: "graph_one_way_exits".into(),
        passed: !args.strict || one_way.is_empty(),
        detail: if one_way.is_empty() {
            "all exits are mutual".into()
        } else {
            one_way
                .iter()
                .map(|(room, dir)| format!("#{} {}", room.index(), dir))
                .collect::<Vec<_>>()
                .join(", ")
        },
    });

    // Reachability from the first room
    let reachable = match world.room_id(0) {
        Some(start) => reachable_from(world, start),
        None => 0,
    };
    let total = world.room_count();
    results.push(TestResult {
        name: "graph_reachable_from_start".into(),
        passed: !args.strict || reachable == total,
        detail: format!("{}/{} rooms reachable from room #0", reachable, total),
    });

    if args.verbose {
        println!("  Exit counts:");
        let mut histogram = [0usize; 5];
        for (_, room) in world.rooms() {
            histogram[room.exits().iter().count()] += 1;
        }
        for (exits, rooms) in histogram.iter().enumerate() {
            println!("    {} exits: {} rooms", exits, rooms);
        }
    }

    results
}

fn reachable_from(world: &World, start: RoomId) -> usize {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for dir in Direction::ALL {
            if let Some(next) = world.neighbor(current, dir) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    visited.len()
}

// ── 3. Descriptions ─────────────────────────────────────────────────────

fn validate_descriptions(world: &World, verbose: bool) -> Vec<TestResult> {
    println!("--- Descriptions ---");
    let mut results = Vec::new();

    let mut missing_name = Vec::new();
    let mut missing_occupant = Vec::new();
    for (id, room) in world.rooms() {
        let text = match world.describe_room(id) {
            Ok(t) => t,
            Err(e) => {
                results.push(TestResult {
                    name: format!("describe_room_{}", id.index()),
                    passed: false,
                    detail: e.to_string(),
                });
                continue;
            }
        };
        if !text.contains(&room.name) {
            missing_name.push(id.index());
        }
        let mob_shown = room
            .mob()
            .and_then(|m| world.mob(m))
            .map_or(true, |m| text.contains(&m.name));
        let item_shown = room
            .item()
            .and_then(|i| world.item(i))
            .map_or(true, |i| text.contains(&i.name));
        if !mob_shown || !item_shown {
            missing_occupant.push(id.index());
        }
        if verbose {
            for line in text.lines() {
                println!("    {}", line);
            }
            println!();
        }
    }

    results.push(TestResult {
        name: "describe_includes_room_name".into(),
        passed: missing_name.is_empty(),
        detail: format!("{} rooms missing their name: {:?}", missing_name.len(), missing_name),
    });
    results.push(TestResult {
        name: "describe_includes_occupants".into(),
        passed: missing_occupant.is_empty(),
        detail: format!(
            "{} rooms missing an occupant: {:?}",
            missing_occupant.len(),
            missing_occupant
        ),
    });

    results
}

// ── 4. Exchanges ────────────────────────────────────────────────────────

fn validate_exchanges(world: &mut World) -> Vec<TestResult> {
    println!("--- Action Exchange ---");
    let mut results = Vec::new();

    // Rooms keep the base take/recv pair.
    if let (Some(a), Some(b)) = (world.room_id(0), world.room_id(1)) {
        let outcome = world.exchange(EntityRef::Room(a), EntityRef::Room(b));
        results.push(TestResult {
            name: "exchange_base_is_neutral".into(),
            passed: outcome
                == Ok(Exchange {
                    outcome: NEUTRAL_OUTCOME,
                    accepted: true,
                }),
            detail: format!("room -> room: {:?}", outcome),
        });
    }

    // Mob vs mob: outcome is the attacker's attack, target loses health.
    let pair: Vec<(MobId, u8)> = world
        .mobs()
        .filter(|(_, m)| m.is_alive())
        .take(2)
        .map(|(id, m)| (id, m.attack))
        .collect();
    if let [(attacker, attack), (defender, _)] = pair[..] {
        let before = world.mob(defender).map_or(0, |m| m.health);
        let outcome = world.exchange(EntityRef::Mob(attacker), EntityRef::Mob(defender));
        let after = world.mob(defender).map_or(0, |m| m.health);
        results.push(TestResult {
            name: "exchange_mob_damage".into(),
            passed: matches!(outcome, Ok(Exchange { outcome, accepted: true }) if outcome == attack)
                && after == before.saturating_sub(attack),
            detail: format!("health {} -> {} ({:?})", before, after, outcome),
        });
    } else {
        results.push(TestResult {
            name: "exchange_mob_damage".into(),
            passed: true,
            detail: "fewer than two live mobs, skipped".into(),
        });
    }

    results
}

// ── 5. Movement ─────────────────────────────────────────────────────────

fn validate_movement(world: &mut World) -> Vec<TestResult> {
    println!("--- Movement ---");
    let mut results = Vec::new();

    let occupied: Vec<(RoomId, MobId)> = world
        .rooms()
        .filter_map(|(id, room)| room.mob().map(|m| (id, m)))
        .collect();

    let mut moved = 0;
    let mut misplaced = Vec::new();
    for (room, mob) in occupied {
        for dir in Direction::ALL {
            match world.move_mob(room, dir) {
                Ok(Some(dest)) => {
                    moved += 1;
                    if world.mob_location(mob) != Some(dest)
                        || world.neighbor(room, dir) != Some(dest)
                    {
                        misplaced.push(mob.index());
                    }
                    break;
                }
                Ok(None) => {}
                Err(e) => {
                    results.push(TestResult {
                        name: format!("move_mob_{}", mob.index()),
                        passed: false,
                        detail: e.to_string(),
                    });
                    break;
                }
            }
        }
    }

    results.push(TestResult {
        name: "move_follows_exits".into(),
        passed: misplaced.is_empty(),
        detail: format!("{} mobs moved, misplaced: {:?}", moved, misplaced),
    });

    results
}

// ── 6. Teardown ─────────────────────────────────────────────────────────

fn validate_teardown(world: World) -> Vec<TestResult> {
    println!("--- Teardown ---");
    let expected = world.room_count() + world.mob_count() + world.item_count();
    let released = world.teardown();
    vec![TestResult {
        name: "teardown_releases_all".into(),
        passed: released == expected,
        detail: format!("{} of {} released", released, expected),
    }]
}
