use rand::prelude::*;

use super::engine::{Outcome, RoundEngine};
use super::possible_actions::calc_possible_actions;
use crate::actor::Actor;
use crate::model::*;
use crate::util::error::{EngineError, EngineResult};
use crate::util::misc::Delay;

use crate::{info, warn};

// 同じ局面での不正な操作の再試行の上限
const MAX_RETRY: usize = 100;

// Actorのseedを牌山とは別系列にするための値
const ACTOR_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

// [Game]
// エンジンとActorを繋ぎ,局を最後まで進行させる
pub struct Game {
    engine: RoundEngine,
    actors: [Box<dyn Actor>; SEAT],
    delay: Box<dyn Delay>,
    rng: StdRng, // Actorのseed生成用
}

impl Game {
    pub fn new(engine: RoundEngine, actors: [Box<dyn Actor>; SEAT], delay: Box<dyn Delay>) -> Self {
        let rng = StdRng::seed_from_u64(engine.seed() ^ ACTOR_SEED_SALT);
        Self {
            rng,
            engine,
            actors,
            delay,
        }
    }

    #[inline]
    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    // n局連続で対局
    pub fn run(&mut self, n_round: usize) -> EngineResult<Vec<RoundResult>> {
        let mut results = vec![];
        for i in 0..n_round {
            let res = self.run_round()?;
            info!("round {}: {:?}", i, res);
            results.push(res);
        }
        Ok(results)
    }

    pub fn run_round(&mut self) -> EngineResult<RoundResult> {
        for (s, a) in self.actors.iter_mut().enumerate() {
            a.init(s, self.rng.gen());
        }
        if let Outcome::RoundEnd(res) = self.engine.start_round()? {
            return Ok(res);
        }

        let mut retry = 0;
        loop {
            match self.do_step() {
                Ok(Outcome::Continue) => retry = 0,
                Ok(Outcome::RoundEnd(res)) => return Ok(res),
                Err(e) if e.is_illegal_action() && retry < MAX_RETRY => {
                    warn!("{}", e);
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn do_step(&mut self) -> EngineResult<Outcome> {
        let stg = self.engine.state().ok_or(EngineError::RoundNotStarted)?;
        let seat = stg.acting_seat().ok_or(EngineError::RoundOver)?;

        match stg.pending {
            Pending::Draw => {
                self.delay.wait(0.8);
                self.engine.draw_for_turn(seat)
            }
            Pending::SelfDraw => {
                self.delay.wait(1.0);
                self.engine.draw_for_turn(seat)
            }
            Pending::Guess => {
                self.delay.wait(2.0);
                let kinds = self.actors[seat].select_guess(stg, self.engine.rule().guess_size);
                self.engine.submit_guess(seat, &kinds)
            }
            _ => {
                let acts = calc_possible_actions(stg, seat);
                let act = self.actors[seat].select_action(stg, &acts);
                self.apply_action(seat, &act)
            }
        }
    }

    fn apply_action(&mut self, seat: Seat, act: &Action) -> EngineResult<Outcome> {
        let stg = self.engine.state().ok_or(EngineError::RoundNotStarted)?;
        let is_self_draw_win = matches!(stg.pending, Pending::SelfDrawWin { .. });

        use ActionType::*;
        match act.action_type {
            Discard => self.engine.discard(seat, act.index.unwrap_or(usize::MAX)),
            Declare => self.engine.declare_tenpai(seat, act.index.unwrap_or(usize::MAX)),
            Chi | Pon | Kan => match act.meld_type() {
                Some(m) => self.engine.offer_call(seat, m),
                None => unreachable!(),
            },
            Tsumo => self.engine.accept_self_draw_win(seat),
            Nop if is_self_draw_win => self.engine.decline_self_draw_win(seat),
            Nop => self.engine.pass_call(seat),
        }
    }
}
