//! Basic example of using the pair-forming rotation search

use std::time::Duration;

use pairspin_core::{BeamStackSolver, Problem, SearchConfig};
use rand::seq::SliceRandom;

fn main() {
    // Build a shuffled 6x6 instance: every token placed twice
    let size = 6;
    let mut entities: Vec<u32> = (0..size * size).map(|i| (i / 2) as u32).collect();
    entities.shuffle(&mut rand::thread_rng());
    let problem = match Problem::new(size, entities) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("invalid instance: {err}");
            return;
        }
    };

    let grid = match problem.make_grid() {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("invalid instance: {err}");
            return;
        }
    };
    println!("Initial board:");
    println!("{grid}\n");
    println!("Pairs: {:?}\n", grid.evaluate_pairs());

    // Solve with the quick preset
    let config = SearchConfig::quick().with_time_budget(Duration::from_secs(2));
    let mut solver = match BeamStackSolver::new(config) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            return;
        }
    };

    match solver.solve(&problem) {
        Ok(result) => {
            println!(
                "Solved: {} | unmatched: {} | moves: {} | explored: {} | {:.1} ms",
                result.solved,
                result.status.unmatched,
                result.move_count(),
                result.explored_nodes,
                result.elapsed_ms()
            );
            for rotation in &result.moves {
                println!("  rotate {rotation}");
            }
            if let Ok(final_grid) = problem.replay(&result.moves) {
                println!("\nFinal board:");
                println!("{final_grid}");
            }
        }
        Err(err) => eprintln!("search failed: {err}"),
    }
}
