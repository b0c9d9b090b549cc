use anyhow::Result;
use clap::Parser;
use crash_replay::{
    record::{BufferedRecorder, Record, RecordValue, Recorder},
    ExperienceReplayConfig, ExperienceReplayWrapper, Policy, PointSwarmConfig, PointSwarmEnv,
    ReplayBufferBase, ResetKind, SimEnv, SwarmAct, SwarmObs,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

const N_EPISODES: usize = 20;
const WARMUP_EPISODES: usize = 2;
const SAMPLE_PROB: f64 = 0.5;
const N_DRONES: usize = 8;
const SEED: u64 = 42;

mod config {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
    pub struct SwarmReplayConfig {
        pub env: PointSwarmConfig,
        pub replay: ExperienceReplayConfig,
    }

    impl SwarmReplayConfig {
        pub fn new(n_drones: usize, sample_prob: f64, seed: u64) -> Self {
            Self {
                env: PointSwarmConfig::default().n_drones(n_drones),
                replay: ExperienceReplayConfig::default()
                    .replay_buffer_sample_prob(sample_prob)
                    .seed(seed),
            }
        }

        pub fn load(path: impl AsRef<Path>) -> Result<Self> {
            let file = File::open(path)?;
            let rdr = BufReader::new(file);
            let b = serde_yaml::from_reader(rdr)?;
            Ok(b)
        }

        pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
            let mut file = File::create(path)?;
            file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
            Ok(())
        }
    }
}

use config::SwarmReplayConfig;

/// Commands uniformly random accelerations.
struct RandomPolicy {
    max_accel: f32,
}

impl Policy<PointSwarmEnv> for RandomPolicy {
    fn sample(&mut self, obs: &SwarmObs) -> SwarmAct {
        let a = self.max_accel;
        SwarmAct(
            obs.0
                .iter()
                .map(|_| [(2.0 * fastrand::f32() - 1.0) * a, (2.0 * fastrand::f32() - 1.0) * a])
                .collect(),
        )
    }
}

/// Run a point swarm with collision-triggered experience replay
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of episodes
    #[arg(short, long, default_value_t = N_EPISODES)]
    episodes: usize,

    /// Number of episodes before experience replay is activated
    #[arg(short, long, default_value_t = WARMUP_EPISODES)]
    warmup: usize,

    /// Probability of starting an episode from the replay buffer
    #[arg(short = 'p', long, default_value_t = SAMPLE_PROB)]
    sample_prob: f64,

    /// Number of drones
    #[arg(short, long, default_value_t = N_DRONES)]
    drones: usize,

    /// YAML configuration file, taking precedence over the options above
    #[arg(short, long)]
    config: Option<String>,

    /// Writes the configuration in use to a YAML file
    #[arg(long)]
    save_config: Option<String>,

    /// Random seed
    #[arg(long, default_value_t = SEED)]
    seed: u64,
}

fn create_config(args: &Args) -> Result<SwarmReplayConfig> {
    match &args.config {
        Some(path) => SwarmReplayConfig::load(path),
        None => Ok(SwarmReplayConfig::new(args.drones, args.sample_prob, args.seed)),
    }
}

fn run(config: &SwarmReplayConfig, n_episodes: usize, warmup: usize, seed: u64) -> Result<BufferedRecorder> {
    fastrand::seed(seed);
    let env = PointSwarmEnv::build(&config.env, seed as i64)?;
    let mut wrapper = ExperienceReplayWrapper::build(env, &config.replay)?;
    let mut policy = RandomPolicy {
        max_accel: config.env.max_accel,
    };
    let mut recorder = BufferedRecorder::new();

    for ix in 0..n_episodes {
        wrapper.env_mut().set_activate_replay_buffer(ix >= warmup);
        let mut obs = wrapper.reset()?;
        let replayed = wrapper.last_reset() == Some(ResetKind::Replayed);
        let start_tick = wrapper.env().tick();
        let mut n_collisions = 0.0;
        let mut n_commits = 0.0;

        loop {
            let act = policy.sample(&obs);
            let (step, record) = wrapper.step(&act);
            n_collisions += record.get_scalar("n_collisions")?;
            if record.get("replay_committed_tick").is_some() {
                n_commits += 1.0;
            }
            let is_done = step.is_done();
            obs = step.obs;
            if is_done {
                break;
            }
        }

        info!(
            "Episode {}: {} from tick {}, {} collisions, {} committed, {} in replay buffer",
            ix,
            if replayed { "replayed" } else { "fresh" },
            start_tick,
            n_collisions,
            n_commits,
            wrapper.replay_buffer().len()
        );
        recorder.write(Record::from_slice(&[
            ("episode", RecordValue::Scalar(ix as f32)),
            ("replayed", RecordValue::Scalar(replayed as i32 as f32)),
            ("start_tick", RecordValue::Scalar(start_tick as f32)),
            ("collisions", RecordValue::Scalar(n_collisions)),
            ("commits", RecordValue::Scalar(n_commits)),
            (
                "replay_buffer_size",
                RecordValue::Scalar(wrapper.replay_buffer().len() as f32),
            ),
        ]));
    }

    Ok(recorder)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = create_config(&args)?;
    if let Some(path) = &args.save_config {
        config.save(path)?;
    }

    let recorder = run(&config, args.episodes, args.warmup, args.seed)?;
    let replayed = recorder.scalars("replayed").iter().sum::<f32>();
    let commits = recorder.scalars("commits").iter().sum::<f32>();
    info!(
        "{} episodes, {} replayed, {} collision events committed",
        recorder.len(),
        replayed,
        commits
    );

    Ok(())
}
