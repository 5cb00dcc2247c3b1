use rand::prelude::*;

use super::{
    call::{available_calls, execute_call},
    common::tiles_to_tile_table,
    dora::DoraTracker,
    wall::{create_wall, split_dead_wall},
};
use crate::hand::{calc_discards_to_tenpai, waiting_tile_kinds};
use crate::listener::Listener;
use crate::model::*;
use crate::util::error::{EngineError, EngineResult};

use crate::{debug, warn};

// 操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,              // 局続行 (次の操作はstate().pendingを参照)
    RoundEnd(RoundResult), // 局終了
}

// [RoundEngine]
// 1局分の状態(RoundState)を排他的に所有し,全ての状態変更はここを経由する
// 外部からはstate()による参照のみ可能
#[derive(Debug)]
pub struct RoundEngine {
    rule: Rule,
    seed: u64,
    rng: StdRng,             // 牌山生成用
    scores: [Score; SEAT],   // 局をまたいで保持する得点
    state: Option<RoundState>,
    listeners: Vec<Box<dyn Listener>>,
}

impl RoundEngine {
    pub fn new(seed: u64, rule: Rule, listeners: Vec<Box<dyn Listener>>) -> Self {
        let scores = [rule.initial_score; SEAT];
        Self {
            rule,
            seed,
            rng: StdRng::seed_from_u64(seed),
            scores,
            state: None,
            listeners,
        }
    }

    #[inline]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn state(&self) -> Option<&RoundState> {
        self.state.as_ref()
    }

    #[inline]
    pub fn scores(&self) -> [Score; SEAT] {
        self.scores
    }

    // 対戦のリセット (得点を初期化し局情報を破棄)
    pub fn reset_match(&mut self) {
        self.scores = [self.rule.initial_score; SEAT];
        self.state = None;
    }

    // [Query]

    // 現在の手牌の待ち牌種 (毎回計算しなおす)
    pub fn waiting_kinds(&self, seat: Seat) -> Vec<Kind> {
        match &self.state {
            Some(stg) => waiting_tile_kinds(&stg.players[seat].hand_table()),
            None => vec![],
        }
    }

    // 打牌前の手牌で聴牌宣言が可能な打牌の(手牌のindex, 待ち)の一覧
    // 同じ牌種が複数ある場合は先頭のindexのみ
    pub fn tenpai_discards(&self, seat: Seat) -> Vec<(Index, Vec<Kind>)> {
        match &self.state {
            Some(stg) => tenpai_discards(&stg.players[seat]),
            None => vec![],
        }
    }

    // [Operation]

    pub fn start_round(&mut self) -> EngineResult<Outcome> {
        let wall = create_wall(&mut self.rng);
        self.start_round_with_wall(wall)
    }

    // 牌山を指定して局を開始 (牌山の末尾からツモ, 先頭14枚が王牌)
    pub fn start_round_with_wall(&mut self, mut wall: Vec<Tile>) -> EngineResult<Outcome> {
        self.rule.validate().map_err(EngineError::InvalidRule)?;
        let mut seen = [false; TOTAL_TILE];
        for t in &wall {
            if t.id >= TOTAL_TILE || seen[t.id] || t.kind != t.id / TILE {
                return Err(EngineError::InvariantViolation(format!(
                    "invalid wall tile {:?}",
                    t
                )));
            }
            seen[t.id] = true;
        }
        if wall.len() != TOTAL_TILE {
            return Err(EngineError::InvariantViolation(format!(
                "wall must have {} tiles, got {}",
                TOTAL_TILE,
                wall.len()
            )));
        }

        let dead_wall = split_dead_wall(&mut wall);
        let dora = DoraTracker::new(dead_wall[DORA_POS], dead_wall[URA_DORA_POS]);

        let mut players = [
            Player::new(0, self.scores[0]),
            Player::new(1, self.scores[1]),
        ];
        for _ in 0..HAND_SIZE {
            for pl in players.iter_mut() {
                if let Some(t) = wall.pop() {
                    pl.hand.push(t);
                }
            }
        }
        for pl in players.iter_mut() {
            pl.sort_hand();
        }
        // 最初の手番のプレイヤーは配牌後に1枚ツモ
        if let Some(t) = wall.pop() {
            players[0].hand.push(t);
            players[0].drawn = Some(t);
            players[0].sort_hand();
        }

        self.state = Some(RoundState {
            step: 0,
            wall,
            dead_wall,
            dora,
            players,
            turn: 0,
            phase: Phase::A,
            pending: Pending::Discard,
            attacker: None,
            defender: None,
            draw_count: 0,
            max_draws: self.rule.max_draws,
            result: None,
        });

        let stg = self.stage();
        let hands = [stg.players[0].hand.clone(), stg.players[1].hand.clone()];
        let event = Event::new(stg.dora.indicator(), self.scores, hands, stg.wall.len());
        self.emit(event);
        debug!("round start: phase A, turn 0");
        self.audit();
        Ok(Outcome::Continue)
    }

    // Phase A: 手番のプレイヤーのツモ
    // B_DRAW: 攻撃側の自摸 (和了牌でなければ自動的に河へ)
    pub fn draw_for_turn(&mut self, seat: Seat) -> EngineResult<Outcome> {
        let stg = self.check_seat("Draw", seat)?;
        let is_self_draw = match stg.pending {
            Pending::Draw => false,
            Pending::SelfDraw => true,
            _ => {
                return Err(EngineError::UnexpectedAction {
                    expected: stg.pending.name(),
                    action: "Draw",
                })
            }
        };

        let stg = self.stage_mut();
        let tile = match stg.wall.pop() {
            Some(t) => t,
            None => return Ok(self.finish(RoundResult::ExhaustiveDraw)),
        };

        let outcome = if is_self_draw {
            stg.draw_count += 1;
            let count = stg.draw_count;
            let is_win = stg.players[seat].waits.contains(&tile.kind);
            self.emit(Event::self_draw(seat, tile, count, is_win));
            if is_win {
                self.stage_mut().pending = Pending::SelfDrawWin { tile };
                Outcome::Continue
            } else {
                self.stage_mut().players[seat].river.push(tile);
                self.emit(Event::discard(seat, tile, true));
                self.after_self_draw()
            }
        } else {
            let pl = &mut stg.players[seat];
            pl.hand.push(tile);
            pl.drawn = Some(tile);
            pl.sort_hand();
            stg.pending = Pending::Discard;
            self.emit(Event::deal(seat, tile, false));
            Outcome::Continue
        };

        self.audit();
        Ok(outcome)
    }

    // Phase A: 手牌(ソート済み)のindex番目の牌を打牌
    pub fn discard(&mut self, seat: Seat, index: Index) -> EngineResult<Outcome> {
        self.check_pending("Discard", seat, "Discard")?;
        let tile = self.check_index(seat, index)?;

        let stg = self.stage_mut();
        let pl = &mut stg.players[seat];
        pl.hand.remove(index);
        pl.river.push(tile);
        let is_drawn = pl.drawn == Some(tile);
        pl.drawn = None;
        self.emit(Event::discard(seat, tile, is_drawn));

        let stg = self.stage_mut();
        if stg.wall.is_empty() {
            return Ok(self.finish(RoundResult::ExhaustiveDraw));
        }

        let claimant = other_seat(seat);
        let calls = available_calls(&stg.players[claimant].hand, tile, &stg.dead_wall);
        if calls.is_empty() {
            stg.turn = claimant;
            stg.pending = Pending::Draw;
        } else {
            stg.pending = Pending::Call {
                discarder: seat,
                tile,
                calls,
            };
        }

        self.audit();
        Ok(Outcome::Continue)
    }

    // 直前の打牌を鳴く
    pub fn offer_call(&mut self, seat: Seat, meld_type: MeldType) -> EngineResult<Outcome> {
        self.check_pending("Call", seat, "Call")?;
        let stg = self.stage_mut();
        let (discarder, tile) = match &stg.pending {
            Pending::Call {
                discarder,
                tile,
                calls,
            } => {
                if !calls.contains(&meld_type) {
                    warn!("seat{} {:?} rejected: {:?}", seat, meld_type, calls);
                    return Err(EngineError::IllegalCall(format!("{:?} on {}", meld_type, tile)));
                }
                (*discarder, *tile)
            }
            _ => unreachable!(),
        };

        let res = execute_call(stg, meld_type, seat, discarder, tile)?;
        stg.turn = seat;
        stg.pending = Pending::Discard;
        self.emit(Event::meld(seat, meld_type, res.consumed, tile));
        if let Some(r) = res.replacement {
            self.emit(Event::deal(seat, r, true));
        }

        debug!("seat{} {:?} on {}, waits: {:?}", seat, meld_type, tile, self.waiting_kinds(seat));
        self.audit();
        Ok(Outcome::Continue)
    }

    // 鳴かずに次のツモへ
    pub fn pass_call(&mut self, seat: Seat) -> EngineResult<Outcome> {
        self.check_pending("Pass", seat, "Call")?;
        let stg = self.stage_mut();
        stg.turn = seat;
        stg.pending = Pending::Draw;
        Ok(Outcome::Continue)
    }

    // 聴牌宣言 (index番目の牌を宣言牌として打牌)
    // 打牌後の手牌が聴牌でない場合は状態を変更せずにErr
    pub fn declare_tenpai(&mut self, seat: Seat, index: Index) -> EngineResult<Outcome> {
        self.check_pending("Declare", seat, "Discard")?;
        let tile = self.check_index(seat, index)?;

        let stg = self.stage_mut();
        let mut tt = stg.players[seat].hand_table();
        tt[tile.kind] -= 1;
        let waits = waiting_tile_kinds(&tt);
        if waits.is_empty() {
            warn!("seat{} declare rejected: not tenpai after {}", seat, tile);
            return Err(EngineError::NotTenpai(tile.to_string()));
        }

        let pl = &mut stg.players[seat];
        pl.hand.remove(index);
        pl.river.push(tile);
        let is_drawn = pl.drawn == Some(tile);
        pl.drawn = None;
        pl.is_tenpai = true;
        pl.waits = waits;

        stg.attacker = Some(seat);
        stg.defender = Some(other_seat(seat));
        stg.phase = Phase::BGuess;
        stg.pending = Pending::Guess;
        stg.draw_count = 0;

        self.emit(Event::discard(seat, tile, is_drawn));
        self.emit(Event::declare(seat, tile));
        debug!("seat{} declared tenpai => phase B_GUESS", seat);
        self.audit();
        Ok(Outcome::Continue)
    }

    // 守備側の識破 (ちょうどguess_size種類の異なる牌種)
    pub fn submit_guess(&mut self, seat: Seat, kinds: &[Kind]) -> EngineResult<Outcome> {
        self.check_pending("Guess", seat, "Guess")?;
        let n = self.rule.guess_size;
        if kinds.len() != n {
            return Err(EngineError::InvalidGuess(format!(
                "{} kinds expected, got {}",
                n,
                kinds.len()
            )));
        }
        for (i, &k) in kinds.iter().enumerate() {
            if k >= KIND {
                return Err(EngineError::InvalidGuess(format!("unknown kind {}", k)));
            }
            if kinds[..i].contains(&k) {
                return Err(EngineError::InvalidGuess(format!(
                    "duplicated kind {}",
                    kind_symbol(k)
                )));
            }
        }

        let stg = self.stage_mut();
        let attacker = other_seat(seat);
        let is_hit = kinds.iter().any(|k| stg.players[attacker].waits.contains(k));
        self.emit(Event::guess(seat, kinds.to_vec(), is_hit));

        if is_hit {
            let result = RoundResult::GuessHit {
                seat,
                kinds: kinds.to_vec(),
            };
            return Ok(self.finish(result));
        }

        let stg = self.stage_mut();
        stg.phase = Phase::BDraw;
        stg.pending = Pending::SelfDraw;
        stg.draw_count = 0;
        debug!("guess missed => phase B_DRAW (attacker: seat{})", attacker);
        Ok(Outcome::Continue)
    }

    pub fn accept_self_draw_win(&mut self, seat: Seat) -> EngineResult<Outcome> {
        self.check_pending("Tsumo", seat, "SelfDrawWin")?;
        let stg = self.stage_mut();
        let tile = match stg.pending {
            Pending::SelfDrawWin { tile } => tile,
            _ => unreachable!(),
        };
        let pl = &mut stg.players[seat];
        pl.hand.push(tile);
        pl.drawn = Some(tile);
        pl.sort_hand();
        Ok(self.finish(RoundResult::SelfDrawWin { seat, tile }))
    }

    // 和了牌を見逃して河へ
    pub fn decline_self_draw_win(&mut self, seat: Seat) -> EngineResult<Outcome> {
        self.check_pending("Decline", seat, "SelfDrawWin")?;
        let stg = self.stage_mut();
        let tile = match stg.pending {
            Pending::SelfDrawWin { tile } => tile,
            _ => unreachable!(),
        };
        stg.players[seat].river.push(tile);
        stg.pending = Pending::SelfDraw;
        self.emit(Event::discard(seat, tile, true));
        let outcome = self.after_self_draw();
        self.audit();
        Ok(outcome)
    }

    // [Internal]

    // 自摸1回分の処理後: 牌山切れ → 流局, 回数上限 → 攻守交代
    fn after_self_draw(&mut self) -> Outcome {
        let stg = self.stage_mut();
        if stg.wall.is_empty() {
            return self.finish(RoundResult::ExhaustiveDraw);
        }

        if stg.draw_count >= stg.max_draws {
            let (attacker, defender) = match (stg.attacker, stg.defender) {
                (Some(a), Some(d)) => (d, a),
                _ => unreachable!(),
            };
            stg.attacker = Some(attacker);
            stg.defender = Some(defender);
            stg.phase = Phase::BGuess;
            stg.pending = Pending::Guess;
            stg.draw_count = 0;
            self.emit(Event::swap(attacker, defender));
            debug!("self draw limit reached => swap, attacker: seat{}", attacker);
        } else {
            stg.pending = Pending::SelfDraw;
        }
        Outcome::Continue
    }

    fn finish(&mut self, result: RoundResult) -> Outcome {
        let stg = self.stage_mut();
        stg.pending = Pending::End;
        stg.result = Some(result.clone());
        for pl in stg.players.iter_mut() {
            pl.is_shown = true;
        }

        let event = match result.winner() {
            Some(winner) => {
                // 和了時に裏ドラを公開
                stg.dora.reveal_ura();
                let pl = &stg.players[winner];
                let n_dora = stg.dora.count_dora(pl.hand.iter().chain(pl.meld_tiles()));
                let revealed = match stg.attacker {
                    Some(a) => stg.players[a].hand.clone(),
                    None => vec![],
                };
                Event::win(
                    result.clone(),
                    revealed,
                    stg.dora.indicator(),
                    stg.dora.ura_indicator().unwrap_or_else(|| stg.dora.indicator()),
                    n_dora,
                )
            }
            None => Event::draw([stg.players[0].hand.clone(), stg.players[1].hand.clone()]),
        };
        self.emit(event);
        debug!("round end: {:?}", result);
        self.audit();
        Outcome::RoundEnd(result)
    }

    fn emit(&mut self, event: Event) {
        if let Some(stg) = self.state.as_mut() {
            stg.step += 1;
        }
        if let Some(stg) = self.state.as_ref() {
            for l in self.listeners.iter_mut() {
                l.notify_event(stg, &event);
            }
        }
    }

    // 全ての牌の枚数を検査. 不整合はプログラムの欠陥なのでデバッグビルドでは停止
    fn audit(&self) {
        if cfg!(debug_assertions) {
            if let Some(Err(e)) = self.state.as_ref().map(|s| s.verify()) {
                panic!("{}", e);
            }
        }
    }

    // 局開始前は呼び出されない (呼び出し元でcheck_*を通過済み)
    fn stage(&self) -> &RoundState {
        self.state.as_ref().expect("round not started")
    }

    fn stage_mut(&mut self) -> &mut RoundState {
        self.state.as_mut().expect("round not started")
    }

    fn check_seat(&self, action: &'static str, seat: Seat) -> EngineResult<&RoundState> {
        let stg = self.state.as_ref().ok_or(EngineError::RoundNotStarted)?;
        if stg.is_over() {
            return Err(EngineError::RoundOver);
        }
        match stg.acting_seat() {
            Some(s) if s == seat => Ok(stg),
            _ => {
                warn!("seat{} {} rejected: not your turn", seat, action);
                Err(EngineError::NotYourTurn {
                    seat,
                    expected: stg.pending.name(),
                })
            }
        }
    }

    fn check_pending(
        &self,
        action: &'static str,
        seat: Seat,
        expected: &'static str,
    ) -> EngineResult<()> {
        let stg = self.check_seat(action, seat)?;
        if stg.pending.name() != expected {
            warn!("seat{} {} rejected: waiting for {}", seat, action, stg.pending.name());
            return Err(EngineError::UnexpectedAction {
                expected: stg.pending.name(),
                action,
            });
        }
        Ok(())
    }

    fn check_index(&self, seat: Seat, index: Index) -> EngineResult<Tile> {
        let hand = &self.stage().players[seat].hand;
        hand.get(index).copied().ok_or(EngineError::InvalidIndex {
            index,
            len: hand.len(),
        })
    }
}

pub fn tenpai_discards(pl: &Player) -> Vec<(Index, Vec<Kind>)> {
    let tt = tiles_to_tile_table(&pl.hand);
    calc_discards_to_tenpai(&tt)
        .into_iter()
        .filter_map(|(k, waits)| {
            pl.hand
                .iter()
                .position(|t| t.kind == k)
                .map(|i| (i, waits))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::control::wall::create_wall_debug;

    #[derive(Default)]
    struct Recorder(Arc<Mutex<Vec<Event>>>);

    impl Listener for Recorder {
        fn notify_event(&mut self, _stg: &RoundState, event: &Event) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    fn engine_with(hands: [&str; SEAT], deal: &str) -> (RoundEngine, Arc<Mutex<Vec<Event>>>) {
        let rec = Recorder::default();
        let events = rec.0.clone();
        let mut eng = RoundEngine::new(0, Rule::default(), vec![Box::new(rec)]);
        let wall = create_wall_debug(7, hands, deal, "s5", "z1").unwrap();
        eng.start_round_with_wall(wall).unwrap();
        (eng, events)
    }

    fn stg(eng: &RoundEngine) -> &RoundState {
        eng.state().unwrap()
    }

    // seat0: m1~m9, p1p1, z7z7 + ツモz1 => z1切りで p1,z7 待ち
    fn tenpai_engine(deal: &str) -> RoundEngine {
        let (eng, _) = engine_with(["m123456789p11z77", "p2589s2589z2345"], deal);
        eng
    }

    #[test]
    fn test_start_round() {
        let mut eng = RoundEngine::new(1, Rule::default(), vec![]);
        assert_eq!(eng.draw_for_turn(0), Err(EngineError::RoundNotStarted));
        eng.start_round().unwrap();

        let s = stg(&eng);
        assert_eq!(s.players[0].hand.len(), 14);
        assert_eq!(s.players[1].hand.len(), 13);
        assert!(s.players[0].drawn.is_some());
        assert_eq!(s.wall_count(), TOTAL_TILE - DEAD_WALL - 27);
        assert_eq!(s.dead_wall.len(), DEAD_WALL);
        assert_eq!(s.phase, Phase::A);
        assert_eq!(s.pending, Pending::Discard);
        assert_eq!(s.dora.indicator(), s.dead_wall[DORA_POS]);
        assert!(s.dora.ura_indicator().is_none());
        s.verify().unwrap();
    }

    #[test]
    fn test_not_your_turn() {
        let mut eng = RoundEngine::new(2, Rule::default(), vec![]);
        eng.start_round().unwrap();
        let step = stg(&eng).step;
        assert!(matches!(eng.discard(1, 0), Err(EngineError::NotYourTurn { seat: 1, .. })));
        assert!(matches!(eng.draw_for_turn(0), Err(EngineError::UnexpectedAction { .. })));
        assert!(matches!(eng.discard(0, 14), Err(EngineError::InvalidIndex { index: 14, len: 14 })));
        assert!(matches!(eng.submit_guess(0, &[0, 1]), Err(EngineError::UnexpectedAction { .. })));
        assert_eq!(stg(&eng).step, step);
        assert_eq!(stg(&eng).players[0].hand.len(), 14);
    }

    #[test]
    fn test_discard_and_pon() {
        let (mut eng, events) =
            engine_with(["m6p147s147z123456", "m66p258s258z12345"], "z7");
        // m6 (kind 5) は手牌の先頭
        assert_eq!(stg(&eng).players[0].hand[0].kind, 5);
        eng.discard(0, 0).unwrap();

        match &stg(&eng).pending {
            Pending::Call { discarder, tile, calls } => {
                assert_eq!(*discarder, 0);
                assert_eq!(tile.kind, 5);
                assert_eq!(calls, &vec![MeldType::Pon]);
            }
            p => panic!("unexpected pending: {:?}", p),
        }
        assert!(matches!(eng.offer_call(0, MeldType::Pon), Err(EngineError::NotYourTurn { .. })));
        assert!(matches!(eng.offer_call(1, MeldType::Chi), Err(EngineError::IllegalCall(_))));
        assert_eq!(stg(&eng).players[1].hand.len(), 13);

        eng.offer_call(1, MeldType::Pon).unwrap();
        let s = stg(&eng);
        assert_eq!(s.turn, 1);
        assert_eq!(s.pending, Pending::Discard);
        assert_eq!(s.players[1].hand.len(), 11);
        assert_eq!(s.players[1].count_kind(5), 0);
        assert_eq!(s.players[1].melds.len(), 1);
        assert_eq!(s.players[1].melds[0].meld_type, MeldType::Pon);
        assert_eq!(s.players[1].melds[0].tiles.len(), 3);
        assert!(s.players[0].river.is_empty());

        let evs = events.lock().unwrap();
        assert!(matches!(evs.last(), Some(Event::Meld(m)) if m.seat == 1 && m.claimed.kind == 5));
    }

    #[test]
    fn test_chi_and_pass() {
        let (mut eng, _) = engine_with(["m6p147s147z123456", "m57p258s258z12345"], "z7");
        eng.discard(0, 0).unwrap();
        assert!(matches!(&stg(&eng).pending, Pending::Call { calls, .. } if calls == &vec![MeldType::Chi]));

        eng.pass_call(1).unwrap();
        let s = stg(&eng);
        assert_eq!(s.turn, 1);
        assert_eq!(s.pending, Pending::Draw);
        assert_eq!(s.players[0].river.len(), 1);

        eng.draw_for_turn(1).unwrap();
        assert_eq!(stg(&eng).players[1].hand.len(), 14);
        assert_eq!(stg(&eng).pending, Pending::Discard);
    }

    #[test]
    fn test_chi_prefers_closed_wait() {
        // m4m5m7m8 に m6: m5m7 (嵌張) を m4m5, m7m8 より優先
        let (mut eng, events) = engine_with(["m6p147s147z123456", "m4578p258s258z123"], "z7");
        eng.discard(0, 0).unwrap();
        assert!(matches!(&stg(&eng).pending, Pending::Call { calls, .. } if calls == &vec![MeldType::Chi]));

        eng.offer_call(1, MeldType::Chi).unwrap();
        let s = stg(&eng);
        assert_eq!(s.turn, 1);
        assert_eq!(s.pending, Pending::Discard);
        let meld = &s.players[1].melds[0];
        assert_eq!(meld.meld_type, MeldType::Chi);
        let kinds: Vec<Kind> = meld.tiles.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![4, 5, 6]);
        assert_eq!(meld.claimed.kind, 5);
        assert_eq!(meld.from, 0);
        assert_eq!(s.players[1].hand.len(), 11);
        assert_eq!(s.players[1].count_kind(3), 1);
        assert_eq!(s.players[1].count_kind(7), 1);
        assert_eq!(s.players[1].count_kind(4), 0);
        assert_eq!(s.players[1].count_kind(6), 0);
        assert!(s.players[0].river.is_empty());
        s.verify().unwrap();

        let evs = events.lock().unwrap();
        assert!(matches!(evs.last(), Some(Event::Meld(m)) if m.meld_type == MeldType::Chi));
    }

    #[test]
    fn test_invalid_rule_rejected() {
        for rule in [
            Rule { guess_size: 0, ..Rule::default() },
            Rule { guess_size: KIND + 1, ..Rule::default() },
            Rule { max_draws: 0, ..Rule::default() },
        ] {
            let mut eng = RoundEngine::new(3, rule, vec![]);
            assert!(matches!(eng.start_round(), Err(EngineError::InvalidRule(_))));
            assert!(eng.state().is_none());
        }
    }

    #[test]
    fn test_kan_replacement() {
        let (mut eng, events) = engine_with(["m6p147s147z123456", "m666p258s258z1234"], "z7");
        let replacement = *stg(&eng).dead_wall.last().unwrap();
        eng.discard(0, 0).unwrap();
        assert!(
            matches!(&stg(&eng).pending, Pending::Call { calls, .. } if calls == &vec![MeldType::Pon, MeldType::Kan])
        );

        eng.offer_call(1, MeldType::Kan).unwrap();
        let s = stg(&eng);
        assert_eq!(s.dead_wall.len(), DEAD_WALL - 1);
        assert_eq!(s.players[1].hand.len(), 11);
        assert_eq!(s.players[1].drawn, Some(replacement));
        assert_eq!(s.players[1].melds[0].tiles.len(), 4);

        let evs = events.lock().unwrap();
        assert!(matches!(evs.last(), Some(Event::Deal(d)) if d.is_replacement && d.tile == replacement));
    }

    #[test]
    fn test_declare_rejected() {
        let mut eng = tenpai_engine("z1");
        let before = stg(&eng).players[0].hand.clone();
        // m1を切ると聴牌しない
        assert!(matches!(eng.declare_tenpai(0, 0), Err(EngineError::NotTenpai(_))));
        let s = stg(&eng);
        assert_eq!(s.players[0].hand, before);
        assert_eq!(s.phase, Phase::A);
        assert!(!s.players[0].is_tenpai);

        assert_eq!(eng.tenpai_discards(0), vec![(11, vec![9, 33])]);
    }

    #[test]
    fn test_declare_and_guess() {
        let mut eng = tenpai_engine("z1");
        assert_eq!(stg(&eng).players[0].hand[11].kind, 27);
        eng.declare_tenpai(0, 11).unwrap();

        let s = stg(&eng);
        assert_eq!(s.phase, Phase::BGuess);
        assert_eq!(s.pending, Pending::Guess);
        assert_eq!(s.attacker, Some(0));
        assert_eq!(s.defender, Some(1));
        assert_eq!(s.players[0].waits, vec![9, 33]);
        assert_eq!(s.players[0].river.last().map(|t| t.kind), Some(27));
        assert_eq!(eng.waiting_kinds(0), vec![9, 33]);

        assert!(matches!(eng.submit_guess(1, &[9]), Err(EngineError::InvalidGuess(_))));
        assert!(matches!(eng.submit_guess(1, &[9, 9]), Err(EngineError::InvalidGuess(_))));
        assert!(matches!(eng.submit_guess(1, &[9, 34]), Err(EngineError::InvalidGuess(_))));
        assert!(matches!(eng.submit_guess(0, &[0, 1]), Err(EngineError::NotYourTurn { .. })));
        assert_eq!(stg(&eng).pending, Pending::Guess);

        let res = eng.submit_guess(1, &[0, 33]).unwrap();
        let expected = RoundResult::GuessHit {
            seat: 1,
            kinds: vec![0, 33],
        };
        assert_eq!(res, Outcome::RoundEnd(expected));
        let s = stg(&eng);
        assert!(s.is_over());
        assert!(s.dora.is_ura_revealed());
        assert!(s.players[0].is_shown);
        assert_eq!(eng.draw_for_turn(0), Err(EngineError::RoundOver));
    }

    #[test]
    fn test_self_draw_win() {
        let mut eng = tenpai_engine("z1m1p1");
        eng.declare_tenpai(0, 11).unwrap();
        eng.submit_guess(1, &[0, 1]).unwrap();
        assert_eq!(stg(&eng).phase, Phase::BDraw);

        // 1回目: m1 (待ちではない) は自動的に河へ
        assert_eq!(eng.draw_for_turn(0).unwrap(), Outcome::Continue);
        let s = stg(&eng);
        assert_eq!(s.draw_count, 1);
        assert_eq!(s.players[0].river.last().map(|t| t.kind), Some(0));
        assert_eq!(s.pending, Pending::SelfDraw);
        assert_eq!(s.players[0].hand.len(), 13);

        // 2回目: p1
        eng.draw_for_turn(0).unwrap();
        let tile = match stg(&eng).pending {
            Pending::SelfDrawWin { tile } => tile,
            ref p => panic!("unexpected pending: {:?}", p),
        };
        assert_eq!(tile.kind, 9);
        assert!(matches!(eng.discard(0, 0), Err(EngineError::UnexpectedAction { .. })));

        let res = eng.accept_self_draw_win(0).unwrap();
        assert_eq!(res, Outcome::RoundEnd(RoundResult::SelfDrawWin { seat: 0, tile }));
        let s = stg(&eng);
        assert_eq!(s.players[0].hand.len(), 14);
        assert!(crate::hand::is_winning_hand(&s.players[0].hand_table(), 14));
        assert!(s.dora.ura_indicator().is_some());
        s.verify().unwrap();
    }

    #[test]
    fn test_swap_after_max_draws() {
        // 4回外れ, 5回目の和了牌を見逃し => 攻守交代
        let (mut eng, events) =
            engine_with(["m123456789p11z77", "p2589s2589z2345"], "z1m1m2m3m4p1");
        eng.declare_tenpai(0, 11).unwrap();
        eng.submit_guess(1, &[0, 1]).unwrap();
        for i in 1..=4 {
            eng.draw_for_turn(0).unwrap();
            assert_eq!(stg(&eng).draw_count, i);
        }
        eng.draw_for_turn(0).unwrap();
        assert!(matches!(stg(&eng).pending, Pending::SelfDrawWin { .. }));
        assert_eq!(stg(&eng).draw_count, 5);

        eng.decline_self_draw_win(0).unwrap();
        let s = stg(&eng);
        assert_eq!(s.phase, Phase::BGuess);
        assert_eq!(s.pending, Pending::Guess);
        assert_eq!(s.attacker, Some(1));
        assert_eq!(s.defender, Some(0));
        assert_eq!(s.draw_count, 0);
        assert_eq!(s.players[0].river.last().map(|t| t.kind), Some(9));
        assert!(s.players[1].waits.is_empty());
        assert!(matches!(events.lock().unwrap().last(), Some(Event::Swap(_))));

        // 宣言していない攻撃側は和了できないので識破も必ず外れる
        assert_eq!(eng.submit_guess(0, &[0, 1]).unwrap(), Outcome::Continue);
        assert_eq!(stg(&eng).phase, Phase::BDraw);
        assert_eq!(stg(&eng).acting_seat(), Some(1));
    }

    #[test]
    fn test_single_wait_declined_swaps() {
        // p4(kind 12)単騎待ち: 4回外れ, 5回目のp4を見逃す
        let (mut eng, _) = engine_with(["m123456789z777p4", ""], "z1m1m2m3m4p4");
        assert_eq!(stg(&eng).players[0].hand[10].kind, 27);
        eng.declare_tenpai(0, 10).unwrap();
        assert_eq!(stg(&eng).players[0].waits, vec![12]);
        eng.submit_guess(1, &[0, 1]).unwrap();

        for _ in 0..4 {
            eng.draw_for_turn(0).unwrap();
            assert_eq!(stg(&eng).pending, Pending::SelfDraw);
        }
        eng.draw_for_turn(0).unwrap();
        assert!(matches!(stg(&eng).pending, Pending::SelfDrawWin { tile } if tile.kind == 12));
        assert_eq!(eng.decline_self_draw_win(0).unwrap(), Outcome::Continue);

        let s = stg(&eng);
        assert_eq!(s.phase, Phase::BGuess);
        assert_eq!(s.attacker, Some(1));
        assert!(s.result.is_none());
        assert_eq!(s.players[0].river.len(), 6); // 宣言牌 + 5回の自摸
    }

    #[test]
    fn test_exhaustive_draw() {
        let mut eng = RoundEngine::new(3, Rule::default(), vec![]);
        eng.start_round().unwrap();
        let result = loop {
            let s = stg(&eng);
            let seat = s.acting_seat().unwrap();
            let res = match s.pending {
                Pending::Draw => eng.draw_for_turn(seat),
                Pending::Discard => {
                    let last = s.players[seat].hand.len() - 1;
                    eng.discard(seat, last)
                }
                Pending::Call { .. } => eng.pass_call(seat),
                ref p => panic!("unexpected pending: {:?}", p),
            };
            if let Outcome::RoundEnd(r) = res.unwrap() {
                break r;
            }
        };
        assert_eq!(result, RoundResult::ExhaustiveDraw);

        let s = stg(&eng);
        assert_eq!(s.wall_count(), 0);
        let river: usize = s.players.iter().map(|p| p.river.len()).sum();
        assert_eq!(river, TOTAL_TILE - DEAD_WALL - 2 * HAND_SIZE);
        assert!(s.players.iter().all(|p| p.is_shown));
        assert!(!s.dora.is_ura_revealed());
    }

    #[test]
    fn test_reset_match() {
        let mut eng = RoundEngine::new(4, Rule::default(), vec![]);
        eng.start_round().unwrap();
        eng.reset_match();
        assert!(eng.state().is_none());
        assert_eq!(eng.scores(), [30000, 30000]);
    }
}
