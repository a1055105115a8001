use std::{env, error::Error, fs, path::Path, time::Duration};

use maze_rl::{Maze, MazeEnv, QLearner, QLearnerConfig, ReplayConfig, StopSignal};

const DEFAULT_MAZE: &str = include_str!("maze.txt");

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/maze_walk");

    let maze = match env::args().nth(1) {
        Some(file) => Maze::open(file)?,
        None => DEFAULT_MAZE.parse::<Maze>()?,
    };

    #[cfg(feature = "viz")]
    maze_rl::viz::init_logger(log::LevelFilter::Info)?;

    let stop = StopSignal::new();
    let mut env = MazeEnv::new(&maze);
    let mut agent = QLearner::new(
        env.num_states(),
        QLearnerConfig {
            trials: 2000,
            max_steps: 300,
            gamma: 0.9,
            convergence_patience: 10,
            ..Default::default()
        },
    )?;

    let summary = agent.train(&mut env, &stop);

    fs::create_dir_all(path.join("out"))?;
    let mut wtr = csv::Writer::from_path(path.join("out/episodes.csv"))?;
    wtr.write_record(["episode", "steps", "reward", "reached_goal", "converged"])?;
    for e in &summary.episodes {
        wtr.write_record([
            e.episode.to_string(),
            e.steps.to_string(),
            format!("{:.3}", e.total_reward),
            e.reached_goal.to_string(),
            e.converged.to_string(),
        ])?;
    }
    wtr.flush()?;

    let config = ReplayConfig {
        max_steps: 200,
        delay: Some(Duration::from_millis(250)),
    };

    #[cfg(feature = "viz")]
    {
        let mut observer = maze_rl::viz::TerminalObserver::new(&maze, stop.clone())?;
        match agent.replay(&mut env, &config, &mut observer, &stop) {
            Ok(outcome) => log::info!("reached the goal in {} steps", outcome.steps),
            Err(err) => log::error!("{err}"),
        }
        observer.wait_for_quit()?;
    }

    #[cfg(not(feature = "viz"))]
    {
        let config = ReplayConfig {
            delay: None,
            ..config
        };
        let outcome = agent.replay(
            &mut env,
            &config,
            &mut |step: usize, pos: maze_rl::Pos| println!("step {step}: {pos:?}"),
            &stop,
        )?;
        println!(
            "trained {} episodes, reached the goal in {} steps",
            summary.episodes.len(),
            outcome.steps
        );
    }

    Ok(())
}
