use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use glam::Vec3;
use std::path::PathBuf;
use swipe_throw::commands::{replay_file, write_outcomes, ReplayOptions};

#[derive(Parser, Debug)]
#[command(
    name = "throw-replay",
    version,
    about = "Replay a recorded pointer gesture and emit the resulting throws as JSON"
)]
struct Opts {
    /// Recorded gesture (JSON array of pointer events)
    input: PathBuf,

    /// Thrower config JSON (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write outcomes here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Spawn charged balls
    #[arg(long, action = ArgAction::SetTrue)]
    charged: bool,

    /// Aim-assist target position, as x,y,z
    #[arg(long)]
    target: Option<String>,

    /// Physics tick rate
    #[arg(long, default_value_t = 50.0)]
    fixed_hz: f32,

    /// Pretty-print JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,
}

fn parse_vec3(s: &str) -> Result<Vec3> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid number in {:?}", s))?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(anyhow!("expected x,y,z, got {:?}", s)),
    }
}

fn main() -> Result<()> {
    swipe_throw::init_tracing();
    let opts = Opts::parse();

    let options = ReplayOptions {
        charged: opts.charged,
        target: opts.target.as_deref().map(parse_vec3).transpose()?,
        fixed_hz: opts.fixed_hz,
        ..ReplayOptions::default()
    };

    let outcomes = replay_file(&opts.input, opts.config.as_deref(), &options)?;

    match opts.out {
        Some(path) => write_outcomes(&path, &outcomes, opts.pretty)?,
        None => {
            let json = if opts.pretty {
                serde_json::to_string_pretty(&outcomes)?
            } else {
                serde_json::to_string(&outcomes)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
