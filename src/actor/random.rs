use rand::prelude::*;

use super::*;

pub struct RandomBuilder;

impl ActorBuilder for RandomBuilder {
    fn get_default_config(&self) -> Config {
        Config {
            name: "Random".to_string(),
            args: vec![
                Arg::float("declare_rate", 0.08),
                Arg::int("min_wall", 10),
                Arg::int("seed", 0), // 0: 対局のseedから導出
            ],
        }
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(Random::from_config(config))
    }
}

// ランダムに打牌するAI
// 鳴きはポンのみ, 聴牌宣言は一定確率, 自摸和了は必ず行う
#[derive(Clone)]
pub struct Random {
    config: Config,
    rng: StdRng,
    fixed_seed: bool,
    seat: Seat,
    declare_rate: f64,
    min_wall: usize,
}

impl Random {
    pub fn from_config(config: Config) -> Self {
        let declare_rate = config.arg("declare_rate").as_float().unwrap_or(0.0);
        let min_wall = config.arg("min_wall").as_int().unwrap_or(0).max(0) as usize;
        let seed = config.arg("seed").as_int().unwrap_or(0) as u64;
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            fixed_seed: seed != 0,
            seat: NO_SEAT,
            declare_rate,
            min_wall,
        }
    }

    fn select_turn_action(&mut self, stg: &RoundState, acts: &[Action]) -> Action {
        let pl = &stg.players[self.seat];
        let declares: Vec<&Action> = acts
            .iter()
            .filter(|a| a.action_type == ActionType::Declare)
            .collect();

        // ツモ直後のみ宣言を検討 (鳴き直後は宣言しない)
        if !declares.is_empty()
            && !pl.is_tenpai
            && pl.drawn.is_some()
            && stg.wall_count() > self.min_wall
            && self.rng.gen_bool(self.declare_rate.clamp(0.0, 1.0))
        {
            if let Some(&a) = declares.choose(&mut self.rng) {
                return a.clone();
            }
        }

        let discards: Vec<&Action> = acts
            .iter()
            .filter(|a| a.action_type == ActionType::Discard)
            .collect();
        match discards.choose(&mut self.rng) {
            Some(&a) => a.clone(),
            None => acts[0].clone(),
        }
    }
}

impl Actor for Random {
    fn init(&mut self, seat: Seat, seed: u64) {
        self.seat = seat;
        if !self.fixed_seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    fn select_action(&mut self, stg: &RoundState, acts: &[Action]) -> Action {
        use ActionType::*;
        match stg.pending {
            Pending::Discard => self.select_turn_action(stg, acts),
            Pending::Call { .. } => acts
                .iter()
                .find(|a| a.action_type == Pon)
                .cloned()
                .unwrap_or_else(Action::nop),
            Pending::SelfDrawWin { .. } => Action::tsumo(),
            _ => Action::nop(),
        }
    }

    fn select_guess(&mut self, _stg: &RoundState, n: usize) -> Vec<Kind> {
        rand::seq::index::sample(&mut self.rng, KIND, n.min(KIND)).into_vec()
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}
