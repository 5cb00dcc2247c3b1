use super::*;
use crate::control::common::{kinds_from_string, kinds_to_string, tiles_to_string};
use crate::util::misc::prompt;

use crate::error;

pub struct ManualBuilder;

impl ActorBuilder for ManualBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Manual".to_string(),
            args: vec![],
        }
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(Manual::from_config(config))
    }
}

// 標準入力による操作
#[derive(Clone)]
pub struct Manual {
    config: Config,
    seat: Seat,
}

impl Manual {
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            seat: NO_SEAT,
        }
    }

    fn print_hand(&self, stg: &RoundState) {
        let pl = &stg.players[self.seat];
        let mut hand_str = tiles_to_string(&pl.hand);
        if let Some(t) = pl.drawn {
            hand_str.push_str(&format!(" (drawn: {})", t));
        }
        for m in &pl.melds {
            hand_str.push_str(&format!(",{}", m));
        }
        println!("{}", hand_str);
    }
}

impl Actor for Manual {
    fn init(&mut self, seat: Seat, _seed: u64) {
        self.seat = seat;
    }

    fn select_action(&mut self, stg: &RoundState, acts: &[Action]) -> Action {
        match &stg.pending {
            Pending::Call { tile, .. } => println!("[Call Action] {} discarded", tile),
            Pending::SelfDrawWin { tile } => println!("[Self Draw] {} completes your hand", tile),
            _ => println!("[Turn Action] select action or discard tile"),
        }
        self.print_hand(stg);

        let hand = &stg.players[self.seat].hand;
        for (i, act) in acts.iter().enumerate() {
            match act.index {
                Some(ti) => println!("{} => {} {}", i, act, hand[ti]),
                None => println!("{} => {}", i, act),
            }
        }

        loop {
            let buf = prompt();
            let buf = buf.trim();
            if buf == "!print" {
                println!("{}", stg.view(Some(self.seat)));
                continue;
            }
            match buf.parse::<usize>() {
                Ok(i) if i < acts.len() => {
                    println!();
                    return acts[i].clone();
                }
                Ok(i) => error!("invalid action index: {}", i),
                Err(e) => error!("{}: '{}'", e, buf),
            }
        }
    }

    fn select_guess(&mut self, stg: &RoundState, n: usize) -> Vec<Kind> {
        let river = match stg.attacker {
            Some(a) => tiles_to_string(&stg.players[a].river),
            None => String::new(),
        };
        println!("[Guess] select {} kinds (ex: m1z7). attacker's river: {}", n, river);
        self.print_hand(stg);

        loop {
            let buf = prompt();
            match kinds_from_string(buf.trim()) {
                Ok(kinds) if kinds.len() == n => {
                    println!("guess: {}", kinds_to_string(&kinds));
                    return kinds;
                }
                Ok(kinds) => error!("{} kinds expected, got {}", n, kinds.len()),
                Err(e) => error!("{}", e),
            }
        }
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}
