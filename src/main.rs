//! Pera Arcade headless demo
//!
//! Plays each mini-game once against the platform's default store so the
//! engines can be exercised without a UI. Set `RUST_LOG=info` for engine logs.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pera Arcade (native) starting...");

    let platform = pera_arcade::Platform::system();
    let settings = pera_arcade::Settings::load(platform.store.as_ref());

    let mut total = 0;
    total += demo::brick_breaker(&platform, &settings);
    total += demo::crossword(&platform, &settings);
    total += demo::spin(&platform, &settings);
    println!("\nTotal points earned: {total}");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host links the library directly
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use pera_arcade::consts::FRAME_MS;
    use pera_arcade::crossword::{GRID_SIZE, todays_puzzle};
    use pera_arcade::host::RecordingHost;
    use pera_arcade::sim::GamePhase;
    use pera_arcade::{BrickBreakerSession, CrosswordSession, Platform, Settings, SpinWheel};

    /// Ten minutes of frames
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn brick_breaker(platform: &Platform, settings: &Settings) -> u32 {
        println!("== Brick breaker ==");
        let seed = platform.now_ms() as u64;
        let host = RecordingHost::default();
        let mut game = BrickBreakerSession::with_seed(platform.clone(), host, settings, seed);
        if game.phase() == GamePhase::Cooldown {
            println!("Cooling down: {}", game.countdown_label());
            return 0;
        }
        game.play();

        for frame in 0..MAX_FRAMES {
            let (ball_x, paddle_x) = (game.state().ball.pos.x, game.state().paddle_x);
            // Aim slightly off-centre so the ball never settles into a vertical loop
            let bias = if (frame / 600) % 2 == 0 { 10.0 } else { -10.0 };
            let target = ball_x - bias;
            game.set_left(target < paddle_x - 3.0);
            game.set_right(target > paddle_x + 3.0);
            game.update(FRAME_MS);
            if game.phase().is_terminal() {
                break;
            }
        }

        let state = game.state();
        println!(
            "{:?} on level {} with {} lives, score {}",
            state.phase,
            state.level_index + 1,
            state.lives,
            state.score
        );
        game.close();
        game.host().total_points()
    }

    pub fn crossword(platform: &Platform, settings: &Settings) -> u32 {
        let puzzle = todays_puzzle(platform.local_ms());
        println!("\n== {} ==", puzzle.title);
        let host = RecordingHost::default();
        let mut board = CrosswordSession::with_puzzle(platform.clone(), host, settings, puzzle);
        for clue in board.across_clues() {
            println!("{} across: {}", clue.number, clue.label);
        }
        for clue in board.down_clues() {
            println!("{} down: {}", clue.number, clue.label);
        }

        board.start();
        board.select_cell(0, 0);
        // Follow the cursor, typing each answer
        for _ in 0..GRID_SIZE * GRID_SIZE {
            if board.is_completed() {
                break;
            }
            let Some(answer) = board.selected().and_then(|pos| puzzle.answer(pos)) else {
                break;
            };
            board.type_letter(answer);
        }
        board.refresh_elapsed();
        println!("Solved: {} in {}", board.is_completed(), board.display_time());

        for (rank, entry) in board.leaderboard().entries.iter().enumerate() {
            println!("#{} {} {}", rank + 1, entry.name, pera_arcade::format_time(entry.time_ms));
        }
        board.close();
        board.host().total_points()
    }

    pub fn spin(platform: &Platform, settings: &Settings) -> u32 {
        println!("\n== Spin wheel ==");
        let seed = platform.now_ms() as u64;
        let host = RecordingHost::default();
        let mut wheel = SpinWheel::with_seed(platform.clone(), host, settings, seed);
        if wheel.press_spin().is_none() {
            println!("Locked for {}", wheel.countdown_label());
            return 0;
        }
        if let Some(plan) = wheel.confirm() {
            println!("Wheel stops on segment {} ({:.1} deg)", plan.segment, plan.rotation);
        }
        if let Some(reward) = wheel.finish_spin() {
            println!("{}", reward.label());
        }
        println!("Next spin in {}", wheel.countdown_label());
        wheel.close();
        wheel.host().total_points()
    }
}
