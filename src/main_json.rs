// Copyright (C) 2020-2026 Andy Kurnia. All rights reserved.

use tokio::io::AsyncReadExt;
use xwords::{dictionary, error, game_config, kibitzer, matrix, movegen, return_error, validator, word};

// lexicon: path of a word list, one word per line, or word,order csv.
// variation: "crosswords" (default) or "crosswords-17".
// rack: uppercase letters, "?" for a blank.
// board: words already on the board. lowercase letters are blanks.
//   the first word's first letter is the seed. with no words the seed is
//   the cell farthest from the bonuses and play must cover it.
// play: if present, this word is laid from the rack and validated instead
//   of searching for candidates.
// limits: search limits, all optional.
#[derive(serde::Deserialize)]
struct Question {
    lexicon: String,
    #[serde(default)]
    variation: Option<String>,
    rack: String,
    #[serde(rename = "board")]
    board_words: Vec<kibitzer::JsonWord>,
    #[serde(default)]
    bonus_key: Option<u64>,
    #[serde(default)]
    play: Option<kibitzer::JsonWord>,
    #[serde(default)]
    limits: game_config::SearchLimits,
}

#[derive(serde::Serialize)]
struct Candidates {
    candidates: Vec<kibitzer::JsonCandidate>,
    accepted: usize,
    declined: usize,
    timed_out: bool,
}

fn answer(question: Question) -> error::Returns<serde_json::Value> {
    let game_config = match &question.variation {
        Some(name) => {
            let Some(variation) = game_config::Variation::from_name(name) else {
                return_error!(format!("invalid variation {:?}", name));
            };
            game_config::make_game_config(variation, game_config::CURRENT_REVISION)
        }
        None => game_config::make_crosswords_game_config(),
    };
    // of course this should be cached
    let dictionary = dictionary::WordList::from_file(&question.lexicon)?;
    let mut kibitzer = kibitzer::Kibitzer::new();
    let (mut board, mut rack) = kibitzer.prepare(
        &game_config,
        &question.rack,
        &question.board_words,
        question.bonus_key,
    )?;
    if board.seed().is_none() {
        // an empty board opens away from the bonuses.
        let dim = game_config.dim();
        let opening = board.bonuses().most_distant_from_bonuses(dim).unwrap_or(dim.center());
        board.set_seed(opening)?;
    }

    if let Some(play) = &question.play {
        let w = word::Word::new(
            matrix::Pos::new(play.col, play.row),
            play.word.to_ascii_uppercase(),
            play.direction,
        );
        for (i, letter) in (0i8..).zip(w.name.bytes()) {
            let at = w.seed.offset(w.direction, i);
            if board.letter_at(at) == Some(letter) {
                continue;
            }
            let Some(tile) = rack.take_letter(letter) else {
                return_error!(format!("no {} on the rack for {}", letter as char, w.name));
            };
            board.place(at, tile)?;
        }
        let result = validator::validate(&mut board, &dictionary, game_config.rules(), true)?;
        return Ok(serde_json::to_value(kibitzer::JsonValidation::from(&result))?);
    }

    let list = movegen::generate_candidates(&game_config, &dictionary, question.limits, &board, &rack)?;
    tracing::info!(
        "{} candidates, accepted {} declined {}",
        list.len(),
        list.accepted,
        list.declined
    );
    let answer = Candidates {
        candidates: list.entries().iter().map(|w| w.into()).collect(),
        accepted: list.accepted,
        declined: list.declined,
        timed_out: list.timed_out,
    };
    Ok(serde_json::to_value(answer)?)
}

#[tokio::main]
async fn main() -> error::Returns<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().collect::<Vec<_>>();
    let data = match args.get(1) {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut data = String::new();
            tokio::io::stdin().read_to_string(&mut data).await?;
            data
        }
    };
    let question = serde_json::from_str::<Question>(&data)?;
    let value = tokio::task::spawn_blocking(move || answer(question)).await??;
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}
