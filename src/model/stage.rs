use super::*;
use crate::control::dora::DoraTracker;
use crate::util::error::EngineError;
use crate::util::misc::vec_to_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "A")]
    A, // 通常の打牌
    #[serde(rename = "B_GUESS")]
    BGuess, // 待ち牌の識破
    #[serde(rename = "B_DRAW")]
    BDraw, // 攻撃側の自摸 (上限あり)
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::A => "A",
            Phase::BGuess => "B_GUESS",
            Phase::BDraw => "B_DRAW",
        };
        write!(f, "{}", s)
    }
}

// エンジンが次に受け付ける操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "t")]
pub enum Pending {
    Draw,    // 手番のプレイヤーのツモ
    Discard, // 手番のプレイヤーの打牌 (または聴牌宣言)
    // 打牌に対する相手の鳴き選択
    Call {
        discarder: Seat,
        tile: Tile,
        calls: Vec<MeldType>,
    },
    Guess,                     // 守備側の識破
    SelfDraw,                  // 攻撃側の自摸
    SelfDrawWin { tile: Tile }, // 和了牌を自摸した攻撃側の和了/見逃し選択
    End,                       // 局終了
}

impl Pending {
    pub fn name(&self) -> &'static str {
        match self {
            Pending::Draw => "Draw",
            Pending::Discard => "Discard",
            Pending::Call { .. } => "Call",
            Pending::Guess => "Guess",
            Pending::SelfDraw => "SelfDraw",
            Pending::SelfDrawWin { .. } => "SelfDrawWin",
            Pending::End => "End",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum RoundResult {
    // 攻撃側の自摸和了
    SelfDrawWin { seat: Seat, tile: Tile },
    // 守備側の識破成功
    GuessHit { seat: Seat, kinds: Vec<Kind> },
    // 流局 (牌山切れ)
    ExhaustiveDraw,
}

impl RoundResult {
    pub fn winner(&self) -> Option<Seat> {
        match self {
            RoundResult::SelfDrawWin { seat, .. } => Some(*seat),
            RoundResult::GuessHit { seat, .. } => Some(*seat),
            RoundResult::ExhaustiveDraw => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundState {
    pub step: usize,                        // 操作毎に+1
    pub wall: Vec<Tile>,                    // 牌山 (末尾からツモ)
    pub dead_wall: Vec<Tile>,               // 王牌 (末尾から嶺上牌)
    pub dora: DoraTracker,                  // ドラ表示牌
    pub players: [Player; SEAT],            // 各プレイヤー情報
    pub turn: Seat,                         // 手番のプレイヤーの座席
    pub phase: Phase,
    pub pending: Pending,
    pub attacker: Option<Seat>,             // 聴牌宣言したプレイヤー (Phase B)
    pub defender: Option<Seat>,             // 識破するプレイヤー (Phase B)
    pub draw_count: usize,                  // B_DRAWでの自摸回数
    pub max_draws: usize,                   // 自摸回数の上限
    pub result: Option<RoundResult>,
}

impl RoundState {
    #[inline]
    pub fn wall_count(&self) -> usize {
        self.wall.len()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.pending == Pending::End
    }

    // 現在操作を求められているプレイヤー
    pub fn acting_seat(&self) -> Option<Seat> {
        match &self.pending {
            Pending::Draw | Pending::Discard => Some(self.turn),
            Pending::Call { discarder, .. } => Some(other_seat(*discarder)),
            Pending::Guess => self.defender,
            Pending::SelfDraw | Pending::SelfDrawWin { .. } => self.attacker,
            Pending::End => None,
        }
    }

    // 全ての領域(牌山,王牌,手牌,河,鳴き,保留中の自摸牌)の牌の枚数を検査
    // 各牌種がちょうど4枚,各牌が1度だけ現れることを確認
    pub fn verify(&self) -> Result<(), EngineError> {
        let mut seen = [false; TOTAL_TILE];
        let mut counts = [0; KIND];
        let mut n = 0;
        let mut check = |t: &Tile| -> Result<(), EngineError> {
            if t.id >= TOTAL_TILE || t.kind != t.id / TILE {
                return Err(EngineError::InvariantViolation(format!(
                    "malformed tile {:?}",
                    t
                )));
            }
            if seen[t.id] {
                return Err(EngineError::InvariantViolation(format!(
                    "tile {:?} appears twice",
                    t
                )));
            }
            seen[t.id] = true;
            counts[t.kind] += 1;
            n += 1;
            Ok(())
        };

        for t in self.wall.iter().chain(self.dead_wall.iter()) {
            check(t)?;
        }
        for pl in &self.players {
            for t in pl.hand.iter().chain(pl.river.iter()).chain(pl.meld_tiles()) {
                check(t)?;
            }
        }
        if let Pending::SelfDrawWin { tile } = &self.pending {
            check(tile)?;
        }

        if n != TOTAL_TILE {
            return Err(EngineError::InvariantViolation(format!(
                "{} tiles in circulation",
                n
            )));
        }
        if let Some(k) = (0..KIND).find(|&k| counts[k] != TILE) {
            return Err(EngineError::InvariantViolation(format!(
                "{} copies of {}",
                counts[k],
                kind_symbol(k)
            )));
        }
        Ok(())
    }
}

impl RoundState {
    // viewerから見た局面 (None: 全ての手牌を公開)
    pub fn view(&self, viewer: Option<Seat>) -> StageView<'_> {
        StageView { stg: self, viewer }
    }

    fn fmt_with<'a, V: fmt::Display>(
        &'a self,
        f: &mut fmt::Formatter<'_>,
        view: impl Fn(&'a Player) -> V,
    ) -> fmt::Result {
        writeln!(
            f,
            "step: {}, phase: {}, pending: {}, turn: {}, wall_count: {}",
            self.step,
            self.phase,
            self.pending.name(),
            self.turn,
            self.wall.len(),
        )?;
        writeln!(
            f,
            "attacker: {:?}, defender: {:?}, draw_count: {}/{}, dora: {}",
            self.attacker,
            self.defender,
            self.draw_count,
            self.max_draws,
            vec_to_string(&self.dora.indicators()),
        )?;

        let boader = "-".to_string().repeat(80);
        write!(f, "{}", boader)?;
        for p in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", view(p))?;
            write!(f, "{}", boader)?;
        }
        Ok(())
    }
}

// 公開されていない手牌は表示しない
impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, |p| p)
    }
}

pub struct StageView<'a> {
    stg: &'a RoundState,
    viewer: Option<Seat>,
}

impl fmt::Display for StageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.stg.fmt_with(f, |p| p.view(self.viewer))
    }
}
