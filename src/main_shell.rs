// Copyright (C) 2020-2026 Andy Kurnia. All rights reserved.

use rand::prelude::*;
use xwords::dictionary::Dictionary;
use xwords::return_error;
use xwords::{dictionary, display, error, game_config, game_state, kibitzer, matrix, movegen, word};

// "h8" is column h, row 8, as printed by the board display.
fn parse_pos(s: &str) -> Option<matrix::Pos> {
    let mut chars = s.chars();
    let col = chars.next()?.to_ascii_lowercase();
    if !col.is_ascii_lowercase() {
        return None;
    }
    let row = chars.as_str().parse::<i8>().ok()?;
    Some(matrix::Pos::new(col as i8 - 'a' as i8, row.checked_sub(1)?))
}

fn parse_direction(s: &str) -> Option<matrix::Direction> {
    matrix::ALL_DIRECTIONS
        .iter()
        .copied()
        .find(|d| format!("{:?}", d).eq_ignore_ascii_case(s))
}

struct Shell<'a> {
    game_config: &'a game_config::GameConfig,
    dictionary: &'a dictionary::WordList,
    limits: game_config::SearchLimits,
    game_state: game_state::GameState<'a>,
    rng: rand_chacha::ChaCha20Rng,
    last_candidates: Vec<word::Word>,
}

impl<'a> Shell<'a> {
    fn new(
        game_config: &'a game_config::GameConfig,
        dictionary: &'a dictionary::WordList,
        mut rng: rand_chacha::ChaCha20Rng,
    ) -> error::Returns<Self> {
        let key = rng.random::<u64>();
        let game_state = game_state::GameState::new(game_config, key, &mut rng)?;
        Ok(Self {
            game_config,
            dictionary,
            limits: game_config::SearchLimits::default(),
            game_state,
            rng,
            last_candidates: Vec::new(),
        })
    }

    fn show(&self) {
        let alphabet = self.game_config.alphabet();
        display::print_board(alphabet, &self.game_state.board);
        for (i, player) in (1..).zip(self.game_state.players.iter()) {
            print!("player {}: {}, ", i, player.score);
        }
        println!("turn: player {}", self.game_state.turn + 1);
        println!("bag: {}", self.game_state.bag.len());
        println!(
            "rack: {}",
            self.game_state.current_player().rack.labels(alphabet)
        );
    }

    fn confirm(&mut self) -> error::Returns<()> {
        let result = self.game_state.confirm(self.dictionary)?;
        let json = kibitzer::JsonValidation::from(&result);
        println!("{}", serde_json::to_string(&json)?);
        if result.ok {
            self.last_candidates.clear();
            if self.game_state.is_game_over() {
                println!("game over");
            } else {
                self.game_state.next_turn();
            }
        }
        Ok(())
    }

    // false to leave the shell.
    fn execute(&mut self, strings: &[String]) -> error::Returns<bool> {
        match strings[0].as_str() {
            "help" => {
                println!("board, rack, place SLOT POS, lift POS, blank POS LETTER, validate, done,");
                println!("gen [COUNT], play N, word POS DIR WORD, pass, budget [MS], new, source FILE, exit");
            }
            "exit" => {
                return Ok(false);
            }
            "new" => {
                let key = self.rng.random::<u64>();
                self.game_state = game_state::GameState::new(self.game_config, key, &mut self.rng)?;
                self.last_candidates.clear();
                self.show();
            }
            "board" | "rack" => {
                self.show();
            }
            "place" => {
                let (Some(slot), Some(pos)) = (
                    strings.get(1).and_then(|s| s.parse::<usize>().ok()),
                    strings.get(2).and_then(|s| parse_pos(s)),
                ) else {
                    return_error!("usage: place SLOT POS".into());
                };
                self.game_state.drop_tile(slot, pos)?;
                self.show();
            }
            "lift" => {
                let Some(pos) = strings.get(1).and_then(|s| parse_pos(s)) else {
                    return_error!("usage: lift POS".into());
                };
                self.game_state.lift_tile(pos)?;
                self.show();
            }
            "blank" => {
                let (Some(pos), Some(letter)) = (
                    strings.get(1).and_then(|s| parse_pos(s)),
                    strings.get(2).and_then(|s| s.bytes().next()),
                ) else {
                    return_error!("usage: blank POS LETTER".into());
                };
                self.game_state.assign_blank(pos, letter)?;
                self.show();
            }
            "word" => {
                let (Some(pos), Some(direction), Some(name)) = (
                    strings.get(1).and_then(|s| parse_pos(s)),
                    strings.get(2).and_then(|s| parse_direction(s)),
                    strings.get(3),
                ) else {
                    return_error!("usage: word POS DIR WORD".into());
                };
                let w = word::Word::new(pos, name.to_ascii_uppercase(), direction);
                self.game_state.place_word(&w)?;
                self.show();
            }
            "validate" => {
                let result = self.game_state.validate(self.dictionary, true)?;
                println!("{}", serde_json::to_string(&kibitzer::JsonValidation::from(&result))?);
            }
            "done" => {
                self.confirm()?;
                self.show();
            }
            "gen" => {
                let count = strings
                    .get(1)
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(self.limits.size_limit);
                let limits = game_config::SearchLimits {
                    size_limit: count.max(1),
                    ..self.limits
                };
                let list = movegen::generate_candidates(
                    self.game_config,
                    self.dictionary,
                    limits,
                    &self.game_state.board,
                    &self.game_state.current_player().rack,
                )?;
                println!(
                    "found {} candidates (accepted {}, declined {}){}",
                    list.len(),
                    list.accepted,
                    list.declined,
                    if list.timed_out { ", out of time" } else { "" }
                );
                self.last_candidates = list.into_words();
                for (i, w) in self.last_candidates.iter().enumerate() {
                    println!(
                        "{:2}: {} {}",
                        i,
                        w,
                        w.provenance.map_or(String::new(), |p| p.to_string())
                    );
                }
            }
            "play" => {
                let Some(w) = strings
                    .get(1)
                    .and_then(|s| s.parse::<usize>().ok())
                    .and_then(|i| self.last_candidates.get(i).cloned())
                else {
                    return_error!("usage: play N, after gen".into());
                };
                self.game_state.place_word(&w)?;
                self.confirm()?;
                self.show();
            }
            "pass" => {
                self.game_state.pass()?;
                self.last_candidates.clear();
                if self.game_state.is_game_over() {
                    println!("game over");
                } else {
                    self.game_state.next_turn();
                }
                self.show();
            }
            "budget" => {
                self.limits.time_budget_ms = strings.get(1).and_then(|s| s.parse::<u64>().ok());
                println!("time budget: {:?} ms", self.limits.time_budget_ms);
            }
            _ => {
                println!("invalid input, help for help");
            }
        }
        Ok(true)
    }
}

fn main() -> error::Returns<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        println!("args:\n  words.txt [variation]\n    words.csv is also read (word,order)");
        return Ok(());
    }
    let dictionary = dictionary::WordList::from_file(&args[1])?;
    let game_config = match args.get(2) {
        Some(name) => game_config::make_game_config(
            game_config::Variation::from_name(name)
                .ok_or_else(|| format!("invalid variation {:?}", name))?,
            game_config::CURRENT_REVISION,
        ),
        None => game_config::make_crosswords_game_config(),
    };
    tracing::info!("{} words loaded from {}", dictionary.len(), args[1]);
    let mut shell = Shell::new(&game_config, &dictionary, rand_chacha::ChaCha20Rng::from_os_rng())?;
    shell.show();

    let mut rl = rustyline::DefaultEditor::new()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if strings.is_empty() {
                        continue;
                    }
                    if strings[0] == "source" {
                        if strings.len() > 1 {
                            match std::fs::read_to_string(&strings[1]) {
                                Ok(whole_file) => {
                                    let v = cmd_stack.len();
                                    for (line_num, line) in whole_file.lines().enumerate() {
                                        cmd_stack.push((
                                            line.to_string(),
                                            Some((strings[1].clone(), line_num + 1)),
                                        ));
                                    }
                                    cmd_stack[v..].reverse();
                                }
                                Err(err) => {
                                    println!("cannot open file: {:?}", err);
                                }
                            }
                        } else {
                            println!("need another arg");
                        }
                        continue;
                    }
                    match shell.execute(&strings) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(err) => {
                            println!("error: {}", err);
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
