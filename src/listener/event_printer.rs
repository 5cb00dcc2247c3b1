use crate::control::common::{kinds_to_string, tiles_to_string};
use crate::listener::Listener;
use crate::model::*;

// [EventPrinter]
// 局の進行を標準出力に表示
// viewer以外の非公開の手牌(ツモ牌, 待ち)は局終了まで表示しない
#[derive(Debug, Default)]
pub struct EventPrinter {
    verbose: bool,          // 手牌も表示
    viewer: Option<Seat>,   // None: 観戦 (全て表示)
}

impl EventPrinter {
    pub fn new(verbose: bool, viewer: Option<Seat>) -> Self {
        Self { verbose, viewer }
    }

    fn is_visible(&self, stg: &RoundState, seat: Seat) -> bool {
        stg.players[seat].view(self.viewer).is_revealed()
    }

    pub fn describe(&self, stg: &RoundState, event: &Event) -> String {
        use Event::*;
        let mut lines = vec![];
        match event {
            New(e) => {
                lines.push(format!(
                    "New dora_indicator: {}, wall: {}",
                    e.dora_indicator, e.wall_count
                ));
                if self.verbose {
                    lines.push(stg.view(self.viewer).to_string());
                }
            }
            Deal(e) => {
                let r = if e.is_replacement { " (replacement)" } else { "" };
                if self.is_visible(stg, e.seat) {
                    lines.push(format!("Deal seat{} {}{}", e.seat, e.tile, r));
                } else {
                    lines.push(format!("Deal seat{} ??{}", e.seat, r));
                }
                if self.verbose {
                    lines.push(stg.players[e.seat].view(self.viewer).to_string());
                }
            }
            Discard(e) => {
                let d = if e.is_drawn { " (drawn)" } else { "" };
                lines.push(format!("Discard seat{} {}{}", e.seat, e.tile, d));
            }
            Meld(e) => {
                lines.push(format!(
                    "Meld seat{} {:?} {} + {}",
                    e.seat,
                    e.meld_type,
                    tiles_to_string(&e.consumed),
                    e.claimed
                ));
            }
            Declare(e) => {
                lines.push(format!("Declare seat{} {} => Phase B", e.seat, e.tile));
            }
            Guess(e) => {
                let h = if e.is_hit { "hit" } else { "miss" };
                lines.push(format!("Guess seat{} {} ({})", e.seat, kinds_to_string(&e.kinds), h));
            }
            SelfDraw(e) => {
                // 和了牌かどうかは待ちが分かるので攻撃側にのみ表示
                let w = if e.is_win && self.is_visible(stg, e.seat) {
                    " (winning tile)"
                } else {
                    ""
                };
                lines.push(format!(
                    "SelfDraw seat{} #{}/{} {}{}",
                    e.seat, e.count, stg.max_draws, e.tile, w
                ));
            }
            Swap(e) => {
                lines.push(format!(
                    "Swap attacker: seat{}, defender: seat{}",
                    e.attacker, e.defender
                ));
            }
            Win(e) => {
                lines.push(format!("Win {:?}", e.result));
                lines.push(format!(
                    "hand: {}, dora_indicator: {}, ura_dora_indicator: {}, dora: {}",
                    tiles_to_string(&e.hand),
                    e.dora_indicator,
                    e.ura_dora_indicator,
                    e.n_dora
                ));
                if self.verbose {
                    lines.push(e.hand.iter().map(|t| t.unicode()).collect());
                }
                lines.push(stg.view(self.viewer).to_string());
            }
            Draw(_) => {
                lines.push("Draw (wall exhausted)".to_string());
                lines.push(stg.view(self.viewer).to_string());
            }
        }
        lines.join("\n")
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, stg: &RoundState, event: &Event) {
        println!("(step:{}) {}", stg.step, self.describe(stg, event));
    }
}
