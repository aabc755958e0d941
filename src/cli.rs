use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use pico_args::Arguments;
use std::{
    env,
    io::{BufWriter, Write},
    path::PathBuf,
};

use handswarm::config::{Profile, ProfileStore};
use handswarm::input::{self, RecordedFrame};
use handswarm::pipeline::Session;

const DEFAULT_FPS: f32 = 30.0;

pub fn run() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // No args -> general help
    if env::args().len() == 1 {
        print_help();
        return Ok(());
    }

    if pargs.contains("-h") || pargs.contains("--help") {
        print_help();
        return Ok(());
    }

    let subcmd: Option<String> = pargs.free_from_str().ok();

    match subcmd.as_deref() {
        Some("help") => {
            let topic: Option<String> = pargs.free_from_str().ok();
            if let Some(t) = topic {
                print_subcmd_help(&t);
            } else {
                print_help();
            }
            Ok(())
        }

        Some("replay") => {
            let profile_name: Option<String> = pargs.opt_value_from_str("--profile")?;
            let seed: Option<u64> = pargs.opt_value_from_str("--seed")?;
            let fps: f32 = pargs
                .opt_value_from_str("--fps")?
                .unwrap_or(DEFAULT_FPS);
            let with_poses = pargs.contains("--poses");
            let file: PathBuf = pargs.free_from_str().map_err(|_| {
                anyhow!("usage: handswarm replay <file> [--profile NAME] [--seed N] [--fps F] [--poses]")
            })?;
            if !(fps.is_finite() && fps > 0.0) {
                return Err(anyhow!("--fps must be a positive number, got {fps}"));
            }

            let mut profile = resolve_profile(profile_name.as_deref())?;
            if seed.is_some() {
                profile.swarm.seed = seed;
            }
            let frames = input::read_recording(&file)
                .with_context(|| format!("reading recording {}", file.display()))?;
            replay(&profile, &frames, fps, with_poses)
        }

        Some("list") => {
            let store = ProfileStore::load_or_install_default()?;
            for name in store.list_profiles() {
                let mark = if name == store.active_name { "*" } else { " " };
                println!("{mark} {name}");
            }
            Ok(())
        }

        Some("use") => {
            let name: String = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: handswarm use <profile_name>"))?;
            let mut store = ProfileStore::load_or_install_default()?;
            store
                .set_active(&name)
                .with_context(|| format!("switching to profile '{name}'"))?;
            println!("ok: active profile {name}");
            Ok(())
        }

        Some("show") => {
            let name: Option<String> = pargs.free_from_str().ok();
            let profile = resolve_profile(name.as_deref())?;
            print!("{}", profile.to_toml()?);
            Ok(())
        }

        Some(other) => {
            eprintln!("unknown subcommand: {other}\n");
            print_help();
            Ok(())
        }

        None => {
            print_help();
            Ok(())
        }
    }
}

/// Named profile from the store, or the active one. Falls back to the
/// built-in presets when the store cannot be opened.
fn resolve_profile(name: Option<&str>) -> Result<Profile> {
    match ProfileStore::load_or_install_default() {
        Ok(store) => match name {
            Some(n) => store
                .load(n)
                .with_context(|| format!("loading profile '{n}'")),
            None => {
                info!("using active profile '{}'", store.active_name);
                Ok(store.profile)
            }
        },
        Err(e) => {
            let n = name.unwrap_or(handswarm::config::DEFAULT_PROFILE);
            warn!("profile store unavailable ({e}); using built-in '{n}'");
            Profile::preset(n).ok_or_else(|| anyhow!("unknown built-in profile: {n}"))
        }
    }
}

fn replay(profile: &Profile, frames: &[RecordedFrame], fps: f32, with_poses: bool) -> Result<()> {
    let mut session = Session::new(profile);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut prev_ms: Option<u64> = None;
    let mut changes = 0usize;
    for (i, rec) in frames.iter().enumerate() {
        let now_ms = input::frame_time_ms(rec, i, fps);
        let dt = match prev_ms {
            Some(p) => now_ms.saturating_sub(p) as f32 / 1000.0,
            None => 1.0 / fps,
        };
        prev_ms = Some(now_ms);

        let tick = session.tick(rec.landmarks.as_ref(), now_ms, dt);
        if tick.changed {
            changes += 1;
        }
        let mut report = serde_json::json!({
            "t_ms": now_ms,
            "gesture": tick.gesture.as_str(),
            "changed": tick.changed,
            "moving": tick.moving,
            "swarm": tick.swarm_state.as_str(),
            "following": tick.following,
            "trail_len": tick.trail_len,
            "anchor": tick.anchor,
            "rotation": tick.rotation,
        });
        if with_poses {
            report["poses"] = serde_json::to_value(tick.poses)?;
        }
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(
        "replayed {} frames, {changes} gesture changes",
        frames.len()
    );
    Ok(())
}

fn print_help() {
    println!(
        r#"handswarm - hand-gesture driven particle swarm

USAGE:
  handswarm help [command]            Show general or command-specific help
  handswarm replay <file> [options]   Drive the swarm from a landmark recording
  handswarm list                      List profiles
  handswarm use <name>                Switch active profile
  handswarm show [name]               Print a profile as TOML

TIPS:
  - Profiles: ~/.config/handswarm/profiles
  - Active profile pointer: ~/.config/handswarm/active
  - RUST_LOG=debug for state transitions and trail following
"#
    );
}

fn print_subcmd_help(cmd: &str) {
    match cmd {
        "replay" => println!(
            "usage: handswarm replay <file> [--profile NAME] [--seed N] [--fps F] [--poses]\n\
             Reads JSON lines {{\"t_ms\":..,\"landmarks\":[[x,y,z] x21]|null}} and prints one\n\
             JSON report per frame. Missing t_ms values are derived from --fps (default 30).\n\
             --poses adds every particle pose to each report."
        ),
        "list" => {
            println!("usage: handswarm list\nLists available profiles; marks active with '*'.")
        }
        "use" => println!("usage: handswarm use <name>\nSwitches the active profile to <name>."),
        "show" => println!(
            "usage: handswarm show [name]\nPrints the named profile, or the active one, as TOML."
        ),
        _ => {
            eprintln!("unknown command: {cmd}\n");
            print_help();
        }
    }
}
