use grid_search::{search, GridModel, Position, SearchConfig, StepEvent, Stepper, Strategy};

// In this example two goals are visited in sequence on a 3x3 grid with shape
//  ___
// |S G|
// | # |
// |  G|
//  ___
// where
// - \# marks a wall
// - S marks the start
// - G marks a goal
// The closer top goal is reached first, and the search restarts from there towards the other one.
// The recorded step log is then replayed one expansion at a time, then rewound.

fn main() -> Result<(), grid_search::SearchError> {
    let grid = GridModel::new(
        3,
        3,
        [Position::new(1, 1)],
        [Position::new(2, 0), Position::new(2, 2)],
        Position::new(0, 0),
    )?;
    println!("{}", grid);
    let result = search(&grid, &Strategy::Bfs, &SearchConfig::default())?;
    println!("Reached goals: {:?}", result.reached);
    println!("Path:");
    for p in &result.path {
        println!("{}", p);
    }

    for phase in &result.phases {
        println!("\nSearch from {}:", phase.start);
        let mut stepper = Stepper::new(result.phase_steps(phase));
        while let Some(event) = stepper.step_forward() {
            if let StepEvent::Move(p) = event {
                let frame = stepper.frame();
                println!(
                    "expand {} ({} visited, {} on the frontier)",
                    p,
                    frame.visited.len(),
                    frame.discovered.len()
                );
            }
        }
        while let Some(event) = stepper.step_backward() {
            if let StepEvent::Move(p) = event {
                println!("undo {}", p);
            }
        }
    }
    Ok(())
}
