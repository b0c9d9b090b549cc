use anyhow::Result;
use crash_replay::{
    CollisionReplayBufferConfig, EpisodeState, ExperienceReplayConfig, ExperienceReplayWrapper,
    PointSwarmConfig, PointSwarmEnv, ReplayBufferBase, ResetKind, SimEnv, SwarmAct,
};
use test_log::test;

type Wrapper = ExperienceReplayWrapper<PointSwarmEnv>;

fn wrapper(sample_prob: f64, capacity: usize) -> Result<Wrapper> {
    let env = PointSwarmEnv::build(&PointSwarmConfig::default(), 11)?;
    let config = ExperienceReplayConfig::default()
        .replay_buffer_sample_prob(sample_prob)
        .replay_buffer(CollisionReplayBufferConfig::default().capacity(capacity));
    Wrapper::build(env, &config)
}

/// Runs an episode to its end and returns the ticks at which commits happened.
fn run_episode(wrapper: &mut Wrapper) -> Result<Vec<u64>> {
    let mut commit_ticks = vec![];
    wrapper.reset()?;
    let act = SwarmAct::zeros(wrapper.env().n_drones());

    loop {
        let (step, record) = wrapper.step(&act);
        assert!(wrapper.history().len() <= wrapper.history().capacity());

        if let Ok(tick) = record.get_scalar("replay_committed_tick") {
            let tick = tick as u64;
            assert_eq!(tick, wrapper.env().tick());
            commit_ticks.push(tick);

            // 1.5 s at 100 Hz, measured from the last checkpoint before the collision
            let cp = wrapper.replay_buffer().iter_oldest_first().last().unwrap();
            assert!(cp.tick() + 150 >= tick && cp.tick() + 101 <= tick);
            assert_eq!(cp.tick() % 50, 0);
        }
        if step.is_done() {
            break;
        }
    }
    Ok(commit_ticks)
}

#[test]
fn test_collisions_are_committed_once_per_fresh_episode() -> Result<()> {
    let mut wrapper = wrapper(0.0, 100)?;
    let mut n_commits = 0;

    for _ in 0..5 {
        let commit_ticks = run_episode(&mut wrapper)?;
        assert_eq!(wrapper.last_reset(), Some(ResetKind::Fresh));
        assert!(commit_ticks.len() <= 1);
        if let Some(&tick) = commit_ticks.first() {
            // past the grace period of 1 s
            assert!(tick > 100);
            assert_eq!(wrapper.episode_state(), EpisodeState::Committed);
        }
        n_commits += commit_ticks.len();
    }

    assert!(n_commits > 0);
    assert_eq!(wrapper.replay_buffer().len(), n_commits);
    Ok(())
}

#[test]
fn test_replay_buffer_stays_bounded() -> Result<()> {
    let capacity = 2;
    let mut wrapper = wrapper(0.5, capacity)?;
    let mut n_replayed = 0;

    for _ in 0..12 {
        run_episode(&mut wrapper)?;
        assert!(wrapper.replay_buffer().len() <= capacity);
        if wrapper.last_reset() == Some(ResetKind::Replayed) {
            n_replayed += 1;
        }
    }

    assert_eq!(wrapper.replay_buffer().len(), capacity);
    assert!(n_replayed > 0);
    Ok(())
}

#[test]
fn test_scene_follows_the_live_environment() -> Result<()> {
    let mut wrapper = wrapper(1.0, 10)?;
    let mut n_steps = 0;
    let act = SwarmAct::zeros(wrapper.env().n_drones());

    for _ in 0..4 {
        wrapper.reset()?;
        for _ in 0..300 {
            wrapper.step(&act);
            n_steps += 1;
        }
    }

    let scene = wrapper.env().scene().unwrap();
    assert_eq!(scene.title(), "point swarm 11");
    assert_eq!(scene.frames(), n_steps);
    assert!(wrapper.replay_buffer().iter().all(|cp| cp.env().scene().is_none()));
    Ok(())
}

#[test]
fn test_replayed_episode_resumes_stored_state() -> Result<()> {
    let mut wrapper = wrapper(1.0, 10)?;
    while wrapper.replay_buffer().is_empty() {
        run_episode(&mut wrapper)?;
    }

    let obs = wrapper.reset()?;
    assert_eq!(wrapper.last_reset(), Some(ResetKind::Replayed));
    assert_eq!(obs, wrapper.env().observe());
    let stored = wrapper
        .replay_buffer()
        .iter()
        .find(|cp| cp.obs() == &obs)
        .map(|cp| cp.tick());
    assert_eq!(stored, Some(wrapper.env().tick()));

    // stepping the replayed environment leaves the buffer untouched
    let act = SwarmAct::zeros(wrapper.env().n_drones());
    for _ in 0..10 {
        wrapper.step(&act);
    }
    assert!(wrapper
        .replay_buffer()
        .iter()
        .all(|cp| cp.obs() == &cp.env().observe()));
    Ok(())
}
