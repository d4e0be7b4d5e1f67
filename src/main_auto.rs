// Copyright (C) 2020-2026 Andy Kurnia. All rights reserved.

use rand::prelude::*;
use xwords::{dictionary, display, error, game_config, game_state, kibitzer, movegen};

fn main() -> error::Returns<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        println!("args:\n  words.txt [seed] [num_games]");
        return Ok(());
    }
    let dictionary = dictionary::WordList::from_file(&args[1])?;
    let mut rng = match args.get(2).map(|s| s.parse::<u64>()) {
        Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed?),
        None => rand_chacha::ChaCha20Rng::from_os_rng(),
    };
    let num_games = match args.get(3) {
        Some(s) => s.parse::<usize>()?,
        None => 1,
    };
    let game_config = &game_config::make_crosswords_game_config();
    let alphabet = game_config.alphabet();
    let limits = game_config::SearchLimits {
        time_budget_ms: Some(5000),
        ..game_config::SearchLimits::default()
    };
    let mut move_generator = movegen::MoveGenerator::new(game_config, &dictionary, limits);

    for game_num in 1..=num_games {
        let key = rng.random::<u64>();
        let mut game_state = game_state::GameState::new(game_config, key, &mut rng)?;
        println!("\nplaying self, game {} (bonus key {})", game_num, key);

        loop {
            display::print_board(alphabet, &game_state.board);
            for (i, player) in (1..).zip(game_state.players.iter()) {
                print!("player {}: {}, ", i, player.score);
            }
            println!("turn: player {}", game_state.turn + 1);
            println!("pool {:2}", game_state.bag.len());
            for (i, player) in (1..).zip(game_state.players.iter()) {
                println!("p{} rack: {}", i, player.rack.labels(alphabet));
            }

            let rack = game_state.current_player().rack.clone();
            let list = move_generator.generate_candidates(&game_state.board, &rack)?;
            println!(
                "found {} candidates{}",
                list.len(),
                if list.timed_out { " (out of time)" } else { "" }
            );
            for w in list.entries().iter().take(5) {
                println!("  {}", serde_json::to_string(&kibitzer::JsonCandidate::from(w))?);
            }
            let best = list.entries().first().cloned();

            let mut played = false;
            if let Some(w) = best {
                game_state.place_word(&w)?;
                let result = game_state.confirm(&dictionary)?;
                if result.ok {
                    println!("played {} for {}", w, result.score_delta.unwrap_or(0));
                    played = true;
                } else {
                    tracing::warn!("{} was refused: {:?}", w, result.reason);
                }
            }
            if !played {
                let rack_len = game_state.current_player().rack.len();
                if rack_len > 0 && game_state.bag.len() >= game_config.rack_size() as usize {
                    let slots = (0..game_config.rack_size() as usize)
                        .filter(|&i| game_state.current_player().rack.slots()[i].is_some())
                        .collect::<Vec<_>>();
                    game_state.exchange(&mut rng, &slots)?;
                    println!("exchanged {}", slots.len());
                } else {
                    game_state.pass()?;
                    println!("passed");
                }
            }

            if game_state.is_game_over() {
                break;
            }
            game_state.next_turn();
        }

        display::print_board(alphabet, &game_state.board);
        for (i, player) in (1..).zip(game_state.players.iter()) {
            println!(
                "player {}: {} (left {})",
                i,
                player.score,
                player.rack.labels(alphabet)
            );
        }
    }

    Ok(())
}
